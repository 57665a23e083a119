//! End-to-end tests of the renewal protocol
//!
//! Runs the client against an in-process mock of the token and resource
//! endpoints. Covers:
//! - Bearer token attachment
//! - Transparent retry after a single 401
//! - No second renewal for an already-retried request
//! - Session destruction on renewal failure
//! - Coalescing of concurrent renewals

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

use questlog_client::{
    ApiClient, ClientConfig, Error, Session, SessionObserver, SessionStore, SessionTokens,
};

const REFRESH_TOKEN: &str = "ref-1";

struct MockBackend {
    /// The access token the backend currently accepts
    valid_access: Mutex<String>,
    /// Number of calls to the refresh endpoint
    refresh_calls: AtomicUsize,
    /// Whether the refresh endpoint honors the refresh token
    refresh_ok: AtomicBool,
    /// Last Authorization header seen on /users/me/
    last_auth_header: Mutex<Option<String>>,
}

impl MockBackend {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            valid_access: Mutex::new("acc-1".to_string()),
            refresh_calls: AtomicUsize::new(0),
            refresh_ok: AtomicBool::new(true),
            last_auth_header: Mutex::new(None),
        })
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(ToString::to_string)
}

async fn token_handler(
    State(state): State<Arc<MockBackend>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if body["username"] == "ada" && body["password"] == "hunter2" {
        let access = state.valid_access.lock().clone();
        (
            StatusCode::OK,
            Json(json!({ "access": access, "refresh": REFRESH_TOKEN })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "No active account found" })),
        )
    }
}

async fn refresh_handler(
    State(state): State<Arc<MockBackend>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let n = state.refresh_calls.fetch_add(1, Ordering::SeqCst) + 1;

    if !state.refresh_ok.load(Ordering::SeqCst) || body["refresh"] != REFRESH_TOKEN {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Token is invalid or expired" })),
        );
    }

    let renewed = format!("acc-renewed-{n}");
    *state.valid_access.lock() = renewed.clone();
    (StatusCode::OK, Json(json!({ "access": renewed })))
}

async fn me_handler(
    State(state): State<Arc<MockBackend>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let auth = bearer(&headers);
    *state.last_auth_header.lock() = auth.clone();

    if auth.as_deref() != Some(state.valid_access.lock().as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Given token not valid" })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "id": 7,
            "username": "ada",
            "email": "ada@example.edu",
            "role": "student",
            "level": 3,
            "xp": 450,
            "coins": 120,
            "streak": 5
        })),
    )
}

/// Rejects every request as unauthorized, regardless of token
async fn always_401() -> impl IntoResponse {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Given token not valid" })),
    )
}

async fn broken_handler() -> impl IntoResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": "boom" })),
    )
}

async fn spawn_backend(state: Arc<MockBackend>) -> SocketAddr {
    let app = Router::new()
        .route("/api/token/", post(token_handler))
        .route("/api/token/refresh/", post(refresh_handler))
        .route("/api/users/me/", get(me_handler))
        .route("/api/users/stats/", get(always_401))
        .route("/api/quests/", get(broken_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

struct Harness {
    backend: Arc<MockBackend>,
    client: ApiClient,
    _dir: TempDir,
}

async fn harness() -> Harness {
    let backend = MockBackend::new();
    let addr = spawn_backend(backend.clone()).await;

    let dir = TempDir::new().unwrap();
    let config = ClientConfig::with_base_url(format!("http://{addr}/api")).unwrap();
    let store = SessionStore::new(dir.path().to_path_buf(), &config.base_url).unwrap();
    let session = Session::new(store);
    let client = ApiClient::new(config, session).unwrap();

    Harness {
        backend,
        client,
        _dir: dir,
    }
}

fn tokens(access: &str) -> SessionTokens {
    SessionTokens {
        access: access.to_string(),
        refresh: REFRESH_TOKEN.to_string(),
    }
}

#[derive(Default)]
struct ExpiryFlag(AtomicBool);

impl SessionObserver for ExpiryFlag {
    fn session_expired(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn valid_token_is_attached_and_profile_returned() {
    let h = harness().await;
    h.client.session().activate(tokens("acc-1")).unwrap();

    let user = h.client.current_user().await.unwrap();
    assert_eq!(user.username, "ada");
    assert_eq!(user.level, 3);

    // The outbound request carried the stored access token
    assert_eq!(
        h.backend.last_auth_header.lock().as_deref(),
        Some("acc-1")
    );
    assert_eq!(h.backend.refresh_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn expired_access_is_renewed_transparently() {
    let h = harness().await;
    h.client.session().activate(tokens("acc-stale")).unwrap();

    let user = h.client.current_user().await.unwrap();
    assert_eq!(user.username, "ada");

    // Exactly one renewal, and the retry carried the new token
    assert_eq!(h.backend.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        h.backend.last_auth_header.lock().as_deref(),
        Some("acc-renewed-1")
    );
    assert_eq!(
        h.client.session().access_token().as_deref(),
        Some("acc-renewed-1")
    );
    // Refresh token untouched
    assert_eq!(
        h.client.session().refresh_token().as_deref(),
        Some(REFRESH_TOKEN)
    );
}

#[tokio::test]
async fn second_401_propagates_without_second_renewal() {
    let h = harness().await;
    h.client.session().activate(tokens("acc-stale")).unwrap();

    // /users/stats/ rejects even a freshly renewed token
    let err = h.client.user_stats().await.unwrap_err();
    assert!(matches!(err, Error::Unauthorized { status: 401, .. }));

    // Renewal happened once, then the failure propagated
    assert_eq!(h.backend.refresh_calls.load(Ordering::SeqCst), 1);
    // The session itself survived: renewal succeeded
    assert!(h.client.session().is_active());
}

#[tokio::test]
async fn renewal_failure_destroys_session_and_notifies() {
    let h = harness().await;
    h.backend.refresh_ok.store(false, Ordering::SeqCst);

    let flag = Arc::new(ExpiryFlag::default());
    let client = harness_with_observer(&h, flag.clone());
    client.session().activate(tokens("acc-stale")).unwrap();

    let err = client.current_user().await.unwrap_err();
    assert!(err.is_session_expired());

    assert!(!client.session().is_active());
    assert!(client.session().access_token().is_none());
    assert!(client.session().refresh_token().is_none());
    assert!(flag.0.load(Ordering::SeqCst), "observer not notified");
}

#[tokio::test]
async fn missing_refresh_token_destroys_session() {
    let h = harness().await;
    let flag = Arc::new(ExpiryFlag::default());
    let client = harness_with_observer(&h, flag.clone());

    // No tokens at all: the 401 cannot be recovered from
    let err = client.current_user().await.unwrap_err();
    assert!(err.is_session_expired());
    assert_eq!(h.backend.refresh_calls.load(Ordering::SeqCst), 0);
    assert!(flag.0.load(Ordering::SeqCst));
}

#[tokio::test]
async fn non_auth_errors_propagate_without_retry() {
    let h = harness().await;
    h.client.session().activate(tokens("acc-1")).unwrap();

    let err = h
        .client
        .quests(&questlog_client::api::QuestFilter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Api { status: 500, .. }));
    assert_eq!(h.backend.refresh_calls.load(Ordering::SeqCst), 0);
    assert!(h.client.session().is_active());
}

#[tokio::test]
async fn concurrent_renewals_coalesce() {
    let h = harness().await;
    h.client.session().activate(tokens("acc-stale")).unwrap();

    let client = Arc::new(h.client);
    let (a, b, c) = tokio::join!(
        client.current_user(),
        client.current_user(),
        client.current_user()
    );
    assert!(a.is_ok() && b.is_ok() && c.is_ok());

    // All three 401s shared one in-flight renewal
    assert_eq!(h.backend.refresh_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn login_then_request_then_logout() {
    let h = harness().await;

    let credentials = questlog_client::types::LoginCredentials {
        username: "ada".to_string(),
        password: "hunter2".to_string(),
    };
    h.client.login(&credentials).await.unwrap();
    assert!(h.client.session().is_active());

    let user = h.client.current_user().await.unwrap();
    assert_eq!(user.id, 7);

    h.client.logout();
    assert!(!h.client.session().is_active());
}

#[tokio::test]
async fn bad_credentials_do_not_activate_session() {
    let h = harness().await;

    let credentials = questlog_client::types::LoginCredentials {
        username: "ada".to_string(),
        password: "wrong".to_string(),
    };
    let err = h.client.login(&credentials).await.unwrap_err();
    // No refresh token exists, so the 401 is unrecoverable; the original
    // failure's status is preserved on the error
    assert!(err.is_session_expired());
    assert_eq!(err.status(), Some(401));
    assert!(!h.client.session().is_active());
}

/// Build a second client against the same backend and session directory,
/// with an expiry observer installed.
fn harness_with_observer(h: &Harness, observer: Arc<ExpiryFlag>) -> ApiClient {
    let config = h.client.config().clone();
    let store = SessionStore::new(
        h._dir.path().to_path_buf(),
        &config.base_url,
    )
    .unwrap();
    let session = Session::new(store);
    ApiClient::new(config, session)
        .unwrap()
        .with_observer(observer)
}
