//! Wire types for the Questlog REST API
//!
//! Field names and optionality mirror the backend's serializers. Free-form
//! JSON columns (`meta`, `properties`, `criteria`, progress payloads) stay
//! as [`serde_json::Value`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Platform user role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular participant
    Student,
    /// Platform administrator
    Admin,
}

/// A platform user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// Login name
    pub username: String,
    /// Contact email
    pub email: String,
    /// Role on the platform
    pub role: Role,
    /// Current level
    pub level: u32,
    /// Accumulated experience points
    pub xp: i64,
    /// Currency balance
    pub coins: i64,
    /// Current daily streak
    pub streak: u32,
    /// Faculty affiliation
    #[serde(default)]
    pub faculty: Option<String>,
    /// Group label
    #[serde(default)]
    pub group: Option<String>,
    /// Avatar URL
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Aggregated statistics for the current user (`GET /users/stats/`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    /// Current level
    pub level: u32,
    /// Accumulated experience points
    pub xp: i64,
    /// XP remaining until the next level
    pub xp_to_next_level: i64,
    /// Currency balance
    pub coins: i64,
    /// Current daily streak
    pub streak: u32,
    /// Quests authored by this user
    pub quests_created: u32,
    /// Assignments finished
    pub quests_completed: u32,
    /// Assignments still open
    pub quests_in_progress: u32,
    /// Achievements unlocked
    pub achievements_count: u32,
    /// Leaderboard rank, when ranked
    #[serde(default)]
    pub rank: Option<u32>,
}

/// A quest definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    /// Unique identifier
    pub id: i64,
    /// Title
    pub title: String,
    /// Long description
    pub description: String,
    /// Completion goal text
    pub goal: String,
    /// Whether the quest resets daily
    pub is_daily: bool,
    /// Visible to all users
    pub is_public: bool,
    /// Author user id, null for system quests
    #[serde(default)]
    pub created_by: Option<i64>,
    /// Author username annotation
    #[serde(default)]
    pub created_by_username: Option<String>,
    /// Start of the active window
    #[serde(default)]
    pub active_from: Option<DateTime<Utc>>,
    /// End of the active window
    #[serde(default)]
    pub active_to: Option<DateTime<Utc>>,
    /// Hard deadline
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    /// Difficulty rating
    pub difficulty: u32,
    /// XP granted on completion
    pub xp_reward: i64,
    /// Coins granted on completion
    pub coin_reward: i64,
    /// Free-form metadata
    #[serde(default)]
    pub meta: Value,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Comment count annotation
    #[serde(default)]
    pub comments_count: Option<u32>,
}

/// Either a bare id or an embedded object, depending on the serializer depth
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaybeEmbedded<T> {
    /// Foreign key id only
    Id(i64),
    /// Fully embedded object
    Full(Box<T>),
}

/// A user's instance of undertaking a quest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    /// Unique identifier
    pub id: i64,
    /// The quest being undertaken
    pub quest: MaybeEmbedded<Quest>,
    /// Assignee user id
    pub user: i64,
    /// Group context, if assigned through a group
    #[serde(default)]
    pub group: Option<i64>,
    /// Completion flag
    pub is_completed: bool,
    /// Completion timestamp
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Number of attempts
    pub attempt_count: u32,
    /// Per-assignment due date
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// XP granted on completion
    pub xp_reward: i64,
    /// Coins granted on completion
    pub coin_reward: i64,
    /// Awaiting manual review
    pub needs_review: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Quest title annotation
    #[serde(default)]
    pub quest_title: Option<String>,
    /// Quest description annotation
    #[serde(default)]
    pub quest_description: Option<String>,
    /// Like count annotation
    #[serde(default)]
    pub likes_count: Option<u32>,
    /// Whether the current user liked this
    #[serde(default)]
    pub is_liked: Option<bool>,
}

/// A user group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier
    pub id: i64,
    /// Group name
    pub name: String,
    /// Description
    pub description: String,
    /// Associated course id
    #[serde(default)]
    pub course: Option<i64>,
    /// Creator user id
    #[serde(default)]
    pub created_by: Option<i64>,
    /// Creator username annotation
    #[serde(default)]
    pub created_by_username: Option<String>,
    /// Member count annotation
    #[serde(default)]
    pub members_count: Option<u32>,
    /// Open to join
    pub is_public: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Whether the current user is a member
    #[serde(default)]
    pub is_member: Option<bool>,
}

/// A post on a group wall
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupPost {
    /// Unique identifier
    pub id: i64,
    /// Owning group id
    pub group: i64,
    /// Author user id
    pub author: i64,
    /// Author username annotation
    #[serde(default)]
    pub author_username: Option<String>,
    /// Post text
    pub text: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Comment count annotation
    #[serde(default)]
    pub comments_count: Option<u32>,
}

/// A comment on a group post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupPostComment {
    /// Unique identifier
    pub id: i64,
    /// Parent post id
    pub post: i64,
    /// Author user id
    pub author: i64,
    /// Author username annotation
    #[serde(default)]
    pub author_username: Option<String>,
    /// Comment text
    pub text: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// A collective XP goal for a group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupGoal {
    /// Unique identifier
    pub id: i64,
    /// Owning group id
    pub group: i64,
    /// Goal title
    pub title: String,
    /// Description
    pub description: String,
    /// XP required to complete the goal
    pub target_xp: i64,
    /// XP contributed so far
    pub current_xp: i64,
    /// Deadline
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    /// Completion flag
    pub is_completed: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Completion timestamp
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// State of a friend request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendStatus {
    /// Awaiting a response
    Pending,
    /// Accepted by the recipient
    Accepted,
    /// Rejected by the recipient
    Rejected,
}

/// A friend request between two users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequest {
    /// Unique identifier
    pub id: i64,
    /// Sender user id
    pub from_user: i64,
    /// Recipient user id
    pub to_user: i64,
    /// Current state
    pub status: FriendStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Sender username annotation
    #[serde(default)]
    pub from_user_username: Option<String>,
    /// Recipient username annotation
    #[serde(default)]
    pub to_user_username: Option<String>,
}

/// A direct message between two users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier
    pub id: i64,
    /// Sender user id
    pub sender: i64,
    /// Recipient user id
    pub receiver: i64,
    /// Message text
    pub text: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Read flag
    pub is_read: bool,
    /// Sender username annotation
    #[serde(default)]
    pub sender_username: Option<String>,
    /// Recipient username annotation
    #[serde(default)]
    pub receiver_username: Option<String>,
}

/// A comment on a quest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestComment {
    /// Unique identifier
    pub id: i64,
    /// Parent quest id
    pub quest: i64,
    /// Author user id
    pub user: i64,
    /// Author username annotation
    #[serde(default)]
    pub user_username: Option<String>,
    /// Comment text
    pub text: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// A like on a completed quest assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestLike {
    /// Unique identifier
    pub id: i64,
    /// Liked assignment id
    pub quest_assignment: i64,
    /// Liking user id
    pub user: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// An achievement definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    /// Unique identifier
    pub id: i64,
    /// Stable key
    pub key: String,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// XP granted when unlocked
    pub xp_reward: i64,
    /// Coins granted when unlocked
    pub coin_reward: i64,
    /// Unlock criteria
    #[serde(default)]
    pub criteria: Value,
}

/// A user's progress toward an achievement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementProgress {
    /// Unique identifier
    pub id: i64,
    /// The achievement in question
    pub achievement: MaybeEmbedded<Achievement>,
    /// User id
    pub user: i64,
    /// Unlocked flag
    pub achieved: bool,
    /// Free-form progress payload
    #[serde(default)]
    pub progress: Value,
    /// Unlock timestamp
    #[serde(default)]
    pub achieved_at: Option<DateTime<Utc>>,
}

/// A notification delivered to a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier
    pub id: i64,
    /// Recipient user id
    pub user: i64,
    /// Title
    pub title: String,
    /// Body text
    pub body: String,
    /// Free-form payload
    #[serde(default)]
    pub data: Value,
    /// Read flag
    pub is_read: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// One row of the leaderboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Position, 1-based
    pub rank: u32,
    /// The ranked user
    pub user: User,
    /// Level at ranking time
    pub level: u32,
    /// XP at ranking time
    pub xp: i64,
    /// Quests completed in the ranking period
    pub quests_completed: u32,
    /// Streak at ranking time
    pub streak: u32,
    /// Whether this row is the requesting user
    #[serde(default)]
    pub is_current_user: Option<bool>,
}

/// Leaderboard ranking period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardPeriod {
    /// All time
    All,
    /// Last 7 days
    Week,
    /// Last 30 days
    Month,
}

impl LeaderboardPeriod {
    /// Query-parameter value
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

/// Leaderboard sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardSort {
    /// By level
    Level,
    /// By accumulated XP
    Xp,
    /// By quests completed
    Quests,
    /// By streak length
    Streak,
}

impl LeaderboardSort {
    /// Query-parameter value
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Level => "level",
            Self::Xp => "xp",
            Self::Quests => "quests",
            Self::Streak => "streak",
        }
    }
}

/// Login payload for `POST /token/`
#[derive(Debug, Clone, Serialize)]
pub struct LoginCredentials {
    /// Login name
    pub username: String,
    /// Password
    pub password: String,
}

/// Registration payload for `POST /users/`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterData {
    /// Desired login name
    pub username: String,
    /// Contact email
    pub email: String,
    /// Password
    pub password: String,
    /// Faculty affiliation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty: Option<String>,
    /// Group label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// Category of a tradable item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// Cosmetic item
    Cosmetic,
    /// Single-use item
    Consumable,
    /// Temporary boost
    Boost,
    /// Anything else
    Other,
}

/// A tradable item definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: i64,
    /// Stock keeping unit
    pub sku: String,
    /// Display name
    pub name: String,
    /// Description
    pub description: String,
    /// Category
    pub item_type: ItemType,
    /// Free-form properties
    #[serde(default)]
    pub properties: Value,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// An item listed in the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreItem {
    /// Unique identifier
    pub id: i64,
    /// The listed item
    pub item: Item,
    /// Price in coins
    pub price: i64,
    /// Remaining stock, null for unlimited
    #[serde(default)]
    pub stock: Option<i64>,
    /// Per-user purchase limit
    #[serde(default)]
    pub purchase_limit: Option<u32>,
    /// Whether the listing is purchasable
    pub is_active: bool,
}

/// An item in a user's inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Unique identifier
    pub id: i64,
    /// Owner user id
    pub user: i64,
    /// The owned item
    pub item: Item,
    /// Quantity held
    pub quantity: u32,
    /// Acquisition timestamp
    pub acquired_at: DateTime<Utc>,
    /// Expiry, for time-limited items
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Free-form instance data
    #[serde(default)]
    pub data: Value,
}

/// An item currently equipped by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquippedItem {
    /// Unique identifier
    pub id: i64,
    /// Owner user id
    pub user: i64,
    /// The equipped item
    pub item: Item,
    /// Equipment slot
    pub slot: String,
    /// When it was equipped
    pub equipped_at: DateTime<Utc>,
}

/// Fields accepted when creating or patching a quest. All optional; omitted
/// fields are left untouched on PATCH and defaulted by the server on POST.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QuestPatch {
    /// Title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Completion goal text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    /// Daily flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_daily: Option<bool>,
    /// Public flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    /// Deadline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    /// Difficulty rating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u32>,
    /// XP reward
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xp_reward: Option<i64>,
    /// Coin reward
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coin_reward: Option<i64>,
}

/// Fields accepted when creating or patching a group
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupPatch {
    /// Group name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Public flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    /// Associated course id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<i64>,
}

/// Fields accepted when creating a group goal
#[derive(Debug, Clone, Serialize)]
pub struct NewGroupGoal {
    /// Owning group id
    pub group: i64,
    /// Goal title
    pub title: String,
    /// Description
    pub description: String,
    /// XP required to complete the goal
    pub target_xp: i64,
    /// Deadline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
}
