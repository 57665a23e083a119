//! Friend request and messaging endpoints

use serde_json::json;

use crate::Result;
use crate::client::ApiClient;
use crate::types::{FriendRequest, Message};

impl ApiClient {
    /// List friend requests involving the current user
    pub async fn friend_requests(&self) -> Result<Vec<FriendRequest>> {
        self.get("/friend-requests/").await
    }

    /// Send a friend request to another user
    pub async fn send_friend_request(&self, to_user: i64) -> Result<FriendRequest> {
        self.post("/friend-requests/", &json!({ "to_user": to_user }))
            .await
    }

    /// Accept a pending friend request
    pub async fn accept_friend_request(&self, request_id: i64) -> Result<FriendRequest> {
        self.patch(
            &format!("/friend-requests/{request_id}/"),
            &json!({ "status": "accepted" }),
        )
        .await
    }

    /// Reject a pending friend request
    pub async fn reject_friend_request(&self, request_id: i64) -> Result<FriendRequest> {
        self.patch(
            &format!("/friend-requests/{request_id}/"),
            &json!({ "status": "rejected" }),
        )
        .await
    }

    /// Withdraw or remove a friend request
    pub async fn delete_friend_request(&self, request_id: i64) -> Result<()> {
        self.delete(&format!("/friend-requests/{request_id}/")).await
    }

    /// List messages, optionally restricted to one conversation partner
    pub async fn messages(&self, peer: Option<i64>) -> Result<Vec<Message>> {
        let query = peer
            .map(|user| vec![("user".to_string(), user.to_string())])
            .unwrap_or_default();
        self.get_query("/messages/", query).await
    }

    /// Send a direct message
    pub async fn send_message(&self, receiver: i64, text: &str) -> Result<Message> {
        self.post("/messages/", &json!({ "receiver": receiver, "text": text }))
            .await
    }

    /// Mark a message as read
    pub async fn mark_message_read(&self, message_id: i64) -> Result<()> {
        self.patch_unit(
            &format!("/messages/{message_id}/"),
            &json!({ "is_read": true }),
        )
        .await
    }
}
