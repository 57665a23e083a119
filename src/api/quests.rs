//! Quest, assignment, comment, and like endpoints

use serde_json::json;

use crate::Result;
use crate::client::ApiClient;
use crate::types::{Assignment, Quest, QuestComment, QuestLike, QuestPatch};

/// Filters for listing quests
#[derive(Debug, Clone, Default)]
pub struct QuestFilter {
    /// Restrict to public or private quests
    pub is_public: Option<bool>,
    /// Free-text search over title and description
    pub search: Option<String>,
}

impl QuestFilter {
    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(is_public) = self.is_public {
            query.push(("is_public".to_string(), is_public.to_string()));
        }
        if let Some(ref search) = self.search {
            query.push(("search".to_string(), search.clone()));
        }
        query
    }
}

impl ApiClient {
    /// List quests, optionally filtered
    pub async fn quests(&self, filter: &QuestFilter) -> Result<Vec<Quest>> {
        self.get_query("/quests/", filter.to_query()).await
    }

    /// Create a quest
    pub async fn create_quest(&self, quest: &QuestPatch) -> Result<Quest> {
        self.post("/quests/", quest).await
    }

    /// Update fields of an existing quest
    pub async fn update_quest(&self, quest_id: i64, quest: &QuestPatch) -> Result<Quest> {
        self.patch(&format!("/quests/{quest_id}/"), quest).await
    }

    /// Delete a quest
    pub async fn delete_quest(&self, quest_id: i64) -> Result<()> {
        self.delete(&format!("/quests/{quest_id}/")).await
    }

    /// Accept a quest, creating an assignment for the current user
    pub async fn accept_quest(&self, quest_id: i64) -> Result<Assignment> {
        self.post_empty(&format!("/quests/{quest_id}/accept/")).await
    }

    /// List the current user's assignments
    pub async fn assignments(&self) -> Result<Vec<Assignment>> {
        self.get("/assignments/").await
    }

    /// Mark an assignment complete; the server computes rewards
    pub async fn complete_assignment(&self, assignment_id: i64) -> Result<Assignment> {
        self.post_empty(&format!("/assignments/{assignment_id}/complete/"))
            .await
    }

    /// List comments on a quest
    pub async fn quest_comments(&self, quest_id: i64) -> Result<Vec<QuestComment>> {
        self.get_query(
            "/quest-comments/",
            vec![("quest".to_string(), quest_id.to_string())],
        )
        .await
    }

    /// Comment on a quest
    pub async fn create_quest_comment(&self, quest_id: i64, text: &str) -> Result<QuestComment> {
        self.post("/quest-comments/", &json!({ "quest": quest_id, "text": text }))
            .await
    }

    /// Delete a quest comment
    pub async fn delete_quest_comment(&self, comment_id: i64) -> Result<()> {
        self.delete(&format!("/quest-comments/{comment_id}/")).await
    }

    /// Like a completed assignment
    pub async fn like_quest(&self, assignment_id: i64) -> Result<()> {
        self.post_unit("/quest-likes/", &json!({ "quest_assignment": assignment_id }))
            .await
    }

    /// Remove a like
    pub async fn unlike_quest(&self, like_id: i64) -> Result<()> {
        self.delete(&format!("/quest-likes/{like_id}/")).await
    }

    /// List likes on an assignment
    pub async fn quest_likes(&self, assignment_id: i64) -> Result<Vec<QuestLike>> {
        self.get_query(
            "/quest-likes/",
            vec![("assignment".to_string(), assignment_id.to_string())],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_to_query() {
        let filter = QuestFilter {
            is_public: Some(true),
            search: Some("reading".to_string()),
        };
        assert_eq!(
            filter.to_query(),
            vec![
                ("is_public".to_string(), "true".to_string()),
                ("search".to_string(), "reading".to_string()),
            ]
        );

        assert!(QuestFilter::default().to_query().is_empty());
    }
}
