//! Group, group post, and group goal endpoints

use serde_json::json;

use crate::Result;
use crate::client::ApiClient;
use crate::types::{Group, GroupGoal, GroupPatch, GroupPost, GroupPostComment, NewGroupGoal};

impl ApiClient {
    /// List groups visible to the current user
    pub async fn groups(&self) -> Result<Vec<Group>> {
        self.get("/groups/").await
    }

    /// Create a group
    pub async fn create_group(&self, group: &GroupPatch) -> Result<Group> {
        self.post("/groups/", group).await
    }

    /// Update fields of an existing group
    pub async fn update_group(&self, group_id: i64, group: &GroupPatch) -> Result<Group> {
        self.patch(&format!("/groups/{group_id}/"), group).await
    }

    /// Delete a group
    pub async fn delete_group(&self, group_id: i64) -> Result<()> {
        self.delete(&format!("/groups/{group_id}/")).await
    }

    /// Join a group
    pub async fn join_group(&self, group_id: i64) -> Result<()> {
        self.post_empty_unit(&format!("/groups/{group_id}/join/")).await
    }

    /// Leave a group
    pub async fn leave_group(&self, group_id: i64) -> Result<()> {
        self.post_empty_unit(&format!("/groups/{group_id}/leave/")).await
    }

    /// List posts on a group wall
    pub async fn group_posts(&self, group_id: i64) -> Result<Vec<GroupPost>> {
        self.get_query(
            "/group-posts/",
            vec![("group".to_string(), group_id.to_string())],
        )
        .await
    }

    /// Post to a group wall
    pub async fn create_group_post(&self, group_id: i64, text: &str) -> Result<GroupPost> {
        self.post("/group-posts/", &json!({ "group": group_id, "text": text }))
            .await
    }

    /// Edit a group post
    pub async fn update_group_post(&self, post_id: i64, text: &str) -> Result<GroupPost> {
        self.patch(&format!("/group-posts/{post_id}/"), &json!({ "text": text }))
            .await
    }

    /// Delete a group post
    pub async fn delete_group_post(&self, post_id: i64) -> Result<()> {
        self.delete(&format!("/group-posts/{post_id}/")).await
    }

    /// List comments on a group post
    pub async fn group_post_comments(&self, post_id: i64) -> Result<Vec<GroupPostComment>> {
        self.get_query(
            "/group-post-comments/",
            vec![("post".to_string(), post_id.to_string())],
        )
        .await
    }

    /// Comment on a group post
    pub async fn create_group_post_comment(
        &self,
        post_id: i64,
        text: &str,
    ) -> Result<GroupPostComment> {
        self.post(
            "/group-post-comments/",
            &json!({ "post": post_id, "text": text }),
        )
        .await
    }

    /// Delete a group post comment
    pub async fn delete_group_post_comment(&self, comment_id: i64) -> Result<()> {
        self.delete(&format!("/group-post-comments/{comment_id}/")).await
    }

    /// List a group's collective goals
    pub async fn group_goals(&self, group_id: i64) -> Result<Vec<GroupGoal>> {
        self.get_query(
            "/group-goals/",
            vec![("group".to_string(), group_id.to_string())],
        )
        .await
    }

    /// Create a group goal
    pub async fn create_group_goal(&self, goal: &NewGroupGoal) -> Result<GroupGoal> {
        self.post("/group-goals/", goal).await
    }

    /// Contribute XP toward a group goal
    pub async fn contribute_to_goal(&self, goal_id: i64, xp: i64) -> Result<GroupGoal> {
        self.post(
            &format!("/group-goals/{goal_id}/contribute/"),
            &json!({ "xp": xp }),
        )
        .await
    }
}
