//! In-process stand-in for the recommendation service
//!
//! Serves the auth, profile and recommend routes on an ephemeral local port
//! and records what it was sent.
//!
//! Canned behaviour:
//! - login succeeds only with password `secret` (token `tok-1`, name `Jane Doe`)
//! - register rejects `taken@example.com`
//! - protected routes need a bearer token other than `revoked`
//! - `/profile` returns 404 until a profile is saved;
//!   a profile named `explode` fails with a bare 500
//! - recommend text `crash` → 500 with detail, `gateway` → 502 without JSON,
//!   `garbled` → 200 with an unexpected body

use crate::client::ApiClient;
use crate::config::ApiConfig;
use crate::session::{MemorySessionStore, Session, SessionStore};
use axum::{
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
pub struct MockState {
    hits: Mutex<Vec<Hit>>,
    profile: Mutex<Option<Value>>,
    recommend_texts: Mutex<Vec<String>>,
    recommend_delay: Mutex<Duration>,
}

#[derive(Debug, Clone)]
struct Hit {
    route: String,
    authorization: Option<String>,
}

impl MockState {
    fn record(&self, route: &str, headers: &HeaderMap) {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.hits.lock().unwrap().push(Hit {
            route: route.to_string(),
            authorization,
        });
    }
}

pub struct MockBackend {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());

        let app = Router::new()
            .route("/auth/register", post(register))
            .route("/auth/login", post(login))
            .route(
                "/profile",
                get(get_profile).post(save_profile_post).put(save_profile_put),
            )
            .route("/api/recommend", post(recommend))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    /// Pre-load a stored profile
    pub fn set_profile(&self, profile: Value) {
        *self.state.profile.lock().unwrap() = Some(profile);
    }

    pub fn stored_profile(&self) -> Option<Value> {
        self.state.profile.lock().unwrap().clone()
    }

    pub fn set_recommend_delay(&self, delay: Duration) {
        *self.state.recommend_delay.lock().unwrap() = delay;
    }

    pub fn recommend_texts(&self) -> Vec<String> {
        self.state.recommend_texts.lock().unwrap().clone()
    }

    /// Number of calls to `"METHOD /path"`
    pub fn hits_for(&self, route: &str) -> usize {
        self.state
            .hits
            .lock()
            .unwrap()
            .iter()
            .filter(|h| h.route == route)
            .count()
    }

    /// Authorization headers seen on any method of `path`
    pub fn auth_headers_for(&self, path: &str) -> Vec<Option<String>> {
        self.state
            .hits
            .lock()
            .unwrap()
            .iter()
            .filter(|h| h.route.split_once(' ').map(|(_, p)| p) == Some(path))
            .map(|h| h.authorization.clone())
            .collect()
    }
}

/// Base URL of a port nothing is listening on
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn is_authenticated(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("Bearer ") && v != "Bearer revoked")
        .unwrap_or(false)
}

async fn register(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record("POST /auth/register", &headers);

    let email = body["email"].as_str().unwrap_or_default();
    if email == "taken@example.com" {
        return detail(StatusCode::BAD_REQUEST, "Email already registered");
    }

    Json(json!({
        "access_token": format!("tok-{}", email),
        "user_name": body["name"],
    }))
    .into_response()
}

async fn login(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record("POST /auth/login", &headers);

    if body["password"].as_str() == Some("secret") {
        Json(json!({ "access_token": "tok-1", "user_name": "Jane Doe" })).into_response()
    } else {
        detail(StatusCode::UNAUTHORIZED, "Invalid credentials")
    }
}

async fn get_profile(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.record("GET /profile", &headers);

    if !is_authenticated(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Not authenticated");
    }

    match state.profile.lock().unwrap().clone() {
        Some(profile) => Json(profile).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Profile not found"),
    }
}

async fn save_profile_post(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record("POST /profile", &headers);
    save_profile(&state, &headers, body)
}

async fn save_profile_put(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record("PUT /profile", &headers);
    save_profile(&state, &headers, body)
}

fn save_profile(state: &MockState, headers: &HeaderMap, body: Value) -> Response {
    if !is_authenticated(headers) {
        return detail(StatusCode::UNAUTHORIZED, "Not authenticated");
    }
    if body["name"].as_str() == Some("explode") {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    *state.profile.lock().unwrap() = Some(body.clone());
    Json(body).into_response()
}

async fn recommend(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    state.record("POST /api/recommend", &headers);

    if !is_authenticated(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Not authenticated");
    }

    let mut text = String::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        if field.name() == Some("text") {
            text = field.text().await.unwrap();
        }
    }
    state.recommend_texts.lock().unwrap().push(text.clone());

    let delay = *state.recommend_delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    match text.as_str() {
        "crash" => detail(StatusCode::INTERNAL_SERVER_ERROR, "Model unavailable"),
        "gateway" => (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>").into_response(),
        "garbled" => Json(json!({ "unexpected": true })).into_response(),
        _ => Json(json!({
            "expertise_field": "Backend Engineering",
            "confidence": 0.873,
            "roadmap": "1. Learn SQL\n2. Build an API\n3. Deploy it",
            "explanation": "You mentioned databases and scalable systems.",
        }))
        .into_response(),
    }
}

/// Client pointed at `base_url`, reading tokens from `session`
pub fn client_for(base_url: &str, session: Arc<dyn SessionStore>) -> Arc<ApiClient> {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        ..ApiConfig::default()
    };
    Arc::new(ApiClient::new(&config, session).unwrap())
}

/// Memory store holding the mock backend's token
pub fn signed_in(name: &str) -> Arc<MemorySessionStore> {
    Arc::new(MemorySessionStore::with_session(Session::new("tok-1", name)))
}
