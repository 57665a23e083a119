//! Authenticated API gateway client
//!
//! Wraps outbound HTTP calls with bearer-token attachment and transparent
//! access-token renewal on authorization failure. A request that comes back
//! 401 is retried exactly once after a successful exchange of the refresh
//! token; a second 401 propagates. Renewal failure is fatal to the session:
//! both tokens are cleared and the embedding application is notified through
//! [`SessionObserver`].

use std::sync::Arc;

use reqwest::{Client, Method, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::session::{Session, SessionStore};
use crate::{Error, Result};

/// Hook for session-fatal events. The embedding application implements this
/// to navigate to its login entry point when renewal fails.
pub trait SessionObserver: Send + Sync {
    /// Called after the session has been destroyed because renewal failed
    /// or no refresh token was available.
    fn session_expired(&self) {}
}

struct NoopObserver;

impl SessionObserver for NoopObserver {}

/// An outbound request captured with its retry state. Held only long enough
/// to be re-dispatched once after a renewal.
#[derive(Debug, Clone)]
pub(crate) struct PreparedRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
    retried: bool,
}

impl PreparedRequest {
    fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            query: Vec::new(),
            body: None,
            retried: false,
        }
    }
}

/// Authenticated client for the Questlog REST API
pub struct ApiClient {
    /// HTTP client shared by all requests, renewal included
    http: Client,

    /// Base URL and timeouts
    config: ClientConfig,

    /// Credential pair, injected rather than global
    session: Arc<Session>,

    /// Renewal gate: concurrent 401s coalesce into one refresh call
    renewal: Mutex<()>,

    /// Session-expiry hook
    observer: Arc<dyn SessionObserver>,
}

impl ApiClient {
    /// Create a client for the given configuration and session
    pub fn new(config: ClientConfig, session: Arc<Session>) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .tcp_nodelay(true)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            http,
            config,
            session,
            renewal: Mutex::new(()),
            observer: Arc::new(NoopObserver),
        })
    }

    /// Create a client from `QUESTLOG_*` environment configuration, with the
    /// session persisted in the default location
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env()?;
        let store = match &config.session_dir {
            Some(dir) => SessionStore::new(dir.clone(), &config.base_url)?,
            None => SessionStore::default_location(&config.base_url)?,
        };
        let session = Session::new(store);
        Self::new(config, session)
    }

    /// Install a session-expiry observer
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// The session this client operates on
    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// The client configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // =========================================================================
    // Request dispatch and renewal protocol
    // =========================================================================

    /// Build and dispatch a single HTTP attempt
    async fn dispatch(
        &self,
        request: &PreparedRequest,
        access: Option<&str>,
    ) -> Result<reqwest::Response> {
        let url = self.config.endpoint(&request.path);

        let mut builder = self.http.request(request.method.clone(), &url);

        if let Some(token) = access {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        debug!(method = %request.method, url = %url, retried = request.retried, "Dispatching request");

        Ok(builder.send().await?)
    }

    /// Send a prepared request, running the renewal protocol on 401
    async fn send(&self, mut request: PreparedRequest) -> Result<reqwest::Response> {
        let access = self.session.access_token();
        let response = self.dispatch(&request, access.as_deref()).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::check(response).await;
        }

        // First authorization failure: mark the request retried before any
        // renewal so a renewal loop is impossible. Capture the failure now;
        // if renewal cannot recover, this is what the caller gets back.
        request.retried = true;
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        let Some(renewed) = self.renew(access.as_deref()).await else {
            return Err(Error::SessionExpired { status, body });
        };
        let retry = self.dispatch(&request, Some(&renewed)).await?;

        if retry.status() == StatusCode::UNAUTHORIZED {
            // Already retried once: propagate without a second renewal.
            let status = retry.status().as_u16();
            let body = retry.text().await.unwrap_or_default();
            warn!(path = %request.path, "Request unauthorized after renewal");
            return Err(Error::Unauthorized { status, body });
        }

        Self::check(retry).await
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// Coalesces concurrent callers: whoever holds the gate first renews, the
    /// rest find a changed access token and reuse it. Returns `None` when
    /// renewal is impossible or rejected; the session has been destroyed and
    /// the observer notified by then.
    async fn renew(&self, failed_access: Option<&str>) -> Option<String> {
        let _gate = self.renewal.lock().await;

        // A concurrent request may have renewed while we waited on the gate.
        if let Some(current) = self.session.access_token() {
            if Some(current.as_str()) != failed_access {
                debug!("Reusing access token renewed by a concurrent request");
                return Some(current);
            }
        }

        let Some(refresh) = self.session.refresh_token() else {
            info!("No refresh token available, session expired");
            self.expire_session();
            return None;
        };

        let url = self.config.endpoint("/token/refresh/");
        let outcome = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "refresh": refresh }))
            .send()
            .await;

        let response = match outcome {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!(status = %response.status(), "Token renewal rejected, destroying session");
                self.expire_session();
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Token renewal request failed, destroying session");
                self.expire_session();
                return None;
            }
        };

        #[derive(serde::Deserialize)]
        struct RefreshResponse {
            access: String,
        }

        let renewed = match response.json::<RefreshResponse>().await {
            Ok(body) => body.access,
            Err(e) => {
                warn!(error = %e, "Malformed renewal response, destroying session");
                self.expire_session();
                return None;
            }
        };

        // The new access token must be persisted before the retry goes out.
        if let Err(e) = self.session.renew_access(renewed.clone()) {
            warn!(error = %e, "Failed to store renewed access token, destroying session");
            self.expire_session();
            return None;
        }

        info!("Access token renewed after authorization failure");
        Some(renewed)
    }

    fn expire_session(&self) {
        self.session.destroy();
        self.observer.session_expired();
    }

    /// Map non-success responses to errors. 401 never reaches this point.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::Api {
            status: status.as_u16(),
            body,
        })
    }

    // =========================================================================
    // Typed verbs used by the endpoint surface
    // =========================================================================

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(PreparedRequest::new(Method::GET, path)).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T> {
        let mut request = PreparedRequest::new(Method::GET, path);
        request.query = query;
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let mut request = PreparedRequest::new(Method::POST, path);
        request.body = Some(serde_json::to_value(body)?);
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(PreparedRequest::new(Method::POST, path)).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let mut request = PreparedRequest::new(Method::POST, path);
        request.body = Some(serde_json::to_value(body)?);
        self.send(request).await?;
        Ok(())
    }

    pub(crate) async fn post_empty_unit(&self, path: &str) -> Result<()> {
        self.send(PreparedRequest::new(Method::POST, path)).await?;
        Ok(())
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let mut request = PreparedRequest::new(Method::PATCH, path);
        request.body = Some(serde_json::to_value(body)?);
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn patch_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let mut request = PreparedRequest::new(Method::PATCH, path);
        request.body = Some(serde_json::to_value(body)?);
        self.send(request).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.send(PreparedRequest::new(Method::DELETE, path)).await?;
        Ok(())
    }
}
