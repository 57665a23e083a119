//! Authentication and user endpoints

use tracing::info;

use crate::Result;
use crate::client::ApiClient;
use crate::session::SessionTokens;
use crate::types::{LoginCredentials, RegisterData, User, UserStats};

impl ApiClient {
    /// Log in with username and password. On success the returned token pair
    /// activates the session and is persisted.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<()> {
        let tokens: SessionTokens = self.post("/token/", credentials).await?;
        self.session().activate(tokens)?;
        info!(username = %credentials.username, "Logged in");
        Ok(())
    }

    /// Register a new account. Does not log in; call [`ApiClient::login`]
    /// afterwards.
    pub async fn register(&self, data: &RegisterData) -> Result<User> {
        self.post("/users/", data).await
    }

    /// Log out: destroy the session locally. The backend keeps no
    /// server-side session state beyond token validity.
    pub fn logout(&self) {
        self.session().destroy();
    }

    /// The authenticated user's profile
    pub async fn current_user(&self) -> Result<User> {
        self.get("/users/me/").await
    }

    /// Aggregated statistics for the authenticated user
    pub async fn user_stats(&self) -> Result<UserStats> {
        self.get("/users/stats/").await
    }

    /// Search users by username fragment
    pub async fn search_users(&self, username: &str) -> Result<Vec<User>> {
        self.get_query(
            "/users/search/",
            vec![("username".to_string(), username.to_string())],
        )
        .await
    }
}
