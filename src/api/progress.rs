//! Achievement, notification, and leaderboard endpoints

use serde_json::json;

use crate::Result;
use crate::client::ApiClient;
use crate::types::{
    Achievement, AchievementProgress, LeaderboardEntry, LeaderboardPeriod, LeaderboardSort,
    Notification,
};

/// Parameters for the leaderboard rankings query
#[derive(Debug, Clone, Default)]
pub struct LeaderboardQuery {
    /// Ranking period
    pub period: Option<LeaderboardPeriod>,
    /// Sort key
    pub sort_by: Option<LeaderboardSort>,
    /// Restrict to one faculty
    pub faculty: Option<String>,
    /// Restrict to one group
    pub group: Option<String>,
}

impl LeaderboardQuery {
    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(period) = self.period {
            query.push(("period".to_string(), period.as_str().to_string()));
        }
        if let Some(sort_by) = self.sort_by {
            query.push(("sort_by".to_string(), sort_by.as_str().to_string()));
        }
        if let Some(ref faculty) = self.faculty {
            query.push(("faculty".to_string(), faculty.clone()));
        }
        if let Some(ref group) = self.group {
            query.push(("group".to_string(), group.clone()));
        }
        query
    }
}

impl ApiClient {
    /// List all achievement definitions
    pub async fn achievements(&self) -> Result<Vec<Achievement>> {
        self.get("/achievements/").await
    }

    /// The current user's progress toward each achievement
    pub async fn achievement_progress(&self) -> Result<Vec<AchievementProgress>> {
        self.get("/achievement-progress/").await
    }

    /// List the current user's notifications
    pub async fn notifications(&self) -> Result<Vec<Notification>> {
        self.get("/notifications/").await
    }

    /// Mark a notification as read
    pub async fn mark_notification_read(&self, notification_id: i64) -> Result<()> {
        self.patch_unit(
            &format!("/notifications/{notification_id}/"),
            &json!({ "is_read": true }),
        )
        .await
    }

    /// Leaderboard rankings for the given period and sort
    pub async fn leaderboard(&self, query: &LeaderboardQuery) -> Result<Vec<LeaderboardEntry>> {
        self.get_query("/leaderboard/rankings/", query.to_query()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaderboard_query_serialization() {
        let query = LeaderboardQuery {
            period: Some(LeaderboardPeriod::Month),
            sort_by: Some(LeaderboardSort::Xp),
            faculty: None,
            group: Some("CS-2026".to_string()),
        };
        assert_eq!(
            query.to_query(),
            vec![
                ("period".to_string(), "month".to_string()),
                ("sort_by".to_string(), "xp".to_string()),
                ("group".to_string(), "CS-2026".to_string()),
            ]
        );
    }
}
