//! Recommendation service REST client
//!
//! One shared client per process. Every outgoing request passes through
//! [`ApiClient::request`], which attaches the stored token as a bearer
//! credential when one is present and tags the call with a request ID.

use super::dto::{AuthResponse, LoginRequest, Profile, RecommendationResult, RegisterRequest};
use super::error::{extract_detail, ApiError, ApiResult};
use crate::config::ApiConfig;
use crate::session::SessionStore;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Header carrying the per-call correlation ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client for the recommendation service
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Create a new client with the given configuration
    pub fn new(config: &ApiConfig, session: Arc<dyn SessionStore>) -> ApiResult<Self> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout())
            .user_agent(concat!("starrt/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /auth/register`
    pub async fn register(&self, body: &RegisterRequest) -> ApiResult<AuthResponse> {
        let (builder, request_id) = self.request(Method::POST, "/auth/register");
        self.send(builder.json(body), &request_id, "register").await
    }

    /// `POST /auth/login`
    pub async fn login(&self, body: &LoginRequest) -> ApiResult<AuthResponse> {
        let (builder, request_id) = self.request(Method::POST, "/auth/login");
        self.send(builder.json(body), &request_id, "login").await
    }

    /// `GET /profile`; fails with a server error when no profile exists yet
    pub async fn get_profile(&self) -> ApiResult<Profile> {
        let (builder, request_id) = self.request(Method::GET, "/profile");
        self.send(builder, &request_id, "profile.get").await
    }

    /// `POST /profile`
    pub async fn create_profile(&self, profile: &Profile) -> ApiResult<Profile> {
        let (builder, request_id) = self.request(Method::POST, "/profile");
        self.send(builder.json(profile), &request_id, "profile.create")
            .await
    }

    /// `PUT /profile`
    pub async fn update_profile(&self, profile: &Profile) -> ApiResult<Profile> {
        let (builder, request_id) = self.request(Method::PUT, "/profile");
        self.send(builder.json(profile), &request_id, "profile.update")
            .await
    }

    /// `POST /api/recommend` with a multipart `text` field
    ///
    /// The call is abandoned once `window` elapses. Dropping the in-flight
    /// future closes the connection; whatever the service already started is
    /// left to it.
    pub async fn recommend(&self, text: &str, window: Duration) -> ApiResult<RecommendationResult> {
        let form = reqwest::multipart::Form::new().text("text", text.to_string());
        let (builder, request_id) = self.request(Method::POST, "/api/recommend");

        let call = self.send(builder.multipart(form), &request_id, "recommend");
        match tokio::time::timeout(window, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    request_id = %request_id,
                    window_secs = window.as_secs_f64(),
                    "Recommendation aborted after client-side timeout"
                );
                Err(ApiError::Timeout)
            }
        }
    }

    /// Build a request, attaching the bearer token if one is stored
    fn request(&self, method: Method, path: &str) -> (RequestBuilder, String) {
        let url = format!("{}{}", self.base_url, path);
        let request_id = uuid::Uuid::new_v4().to_string();

        let mut builder = self
            .http
            .request(method, url)
            .header(REQUEST_ID_HEADER, &request_id);

        match self.session.token() {
            Ok(Some(token)) => builder = builder.bearer_auth(token),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Session unreadable, sending request unauthenticated");
            }
        }

        (builder, request_id)
    }

    /// Send a request and decode a JSON body, mapping failures to [`ApiError`]
    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        request_id: &str,
        operation: &str,
    ) -> ApiResult<T> {
        let started = Instant::now();

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(
                request_id = %request_id,
                operation,
                error = %e,
                "Request failed before a response arrived"
            );
            ApiError::from(e)
        })?;

        let status = response.status();
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = extract_detail(&body);
            tracing::warn!(
                request_id = %request_id,
                operation,
                status = status.as_u16(),
                elapsed_ms,
                detail = detail.as_deref().unwrap_or(""),
                "Service returned an error"
            );
            return Err(ApiError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        tracing::debug!(
            request_id = %request_id,
            operation,
            status = status.as_u16(),
            elapsed_ms,
            "Request completed"
        );

        response.json::<T>().await.map_err(|e| {
            tracing::warn!(request_id = %request_id, operation, error = %e, "Undecodable response");
            ApiError::Decode(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{EducationLevel, ErrorKind};
    use crate::session::{MemorySessionStore, Session};
    use crate::testing::{client_for, unreachable_base_url, MockBackend};

    #[tokio::test]
    async fn test_base_url_trailing_slash_trimmed() {
        let session: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
        let client = client_for("http://127.0.0.1:8000///", session);
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
    }

    #[tokio::test]
    async fn test_login_success() {
        let backend = MockBackend::start().await;
        let session: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
        let client = client_for(&backend.base_url, session);

        let auth = client
            .login(&LoginRequest {
                email: "jane@example.com".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();

        assert_eq!(auth.access_token, "tok-1");
        assert_eq!(auth.user_name.as_deref(), Some("Jane Doe"));
    }

    #[tokio::test]
    async fn test_login_failure_carries_detail() {
        let backend = MockBackend::start().await;
        let session: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
        let client = client_for(&backend.base_url, session);

        let err = client
            .login(&LoginRequest {
                email: "jane@example.com".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Server { status: 401 });
        assert_eq!(err.detail(), Some("Invalid credentials"));
    }

    #[tokio::test]
    async fn test_no_token_sends_unauthenticated() {
        let backend = MockBackend::start().await;
        let session: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
        let client = client_for(&backend.base_url, session);

        let err = client.get_profile().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Server { status: 401 });
        assert_eq!(backend.auth_headers_for("/profile"), vec![None]);
    }

    #[tokio::test]
    async fn test_token_attached_as_bearer() {
        let backend = MockBackend::start().await;
        let store = Arc::new(MemorySessionStore::new());
        let client = client_for(&backend.base_url, store.clone());

        // Token is read at send time, not at construction
        store.set(&Session::new("tok-1", "Jane")).unwrap();
        let err = client.get_profile().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Server { status: 404 });
        assert_eq!(
            backend.auth_headers_for("/profile"),
            vec![Some("Bearer tok-1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_profile_create_then_get() {
        let backend = MockBackend::start().await;
        let session: Arc<dyn SessionStore> =
            Arc::new(MemorySessionStore::with_session(Session::token_only("tok-1")));
        let client = client_for(&backend.base_url, session);

        let profile = Profile {
            name: "Jane Doe".into(),
            highest_education_level: EducationLevel::PhD,
            short_term_goal: "Research internship".into(),
            programming_languages: vec!["Rust".into()],
            technical_domains: vec!["Systems".into()],
            preferred_domains: vec![],
        };

        let saved = client.create_profile(&profile).await.unwrap();
        assert_eq!(saved, profile);

        let loaded = client.get_profile().await.unwrap();
        assert_eq!(loaded.highest_education_level, EducationLevel::PhD);
        assert_eq!(loaded.programming_languages, vec!["Rust"]);

        let updated = client
            .update_profile(&Profile {
                name: "Jane Q. Doe".into(),
                ..profile
            })
            .await
            .unwrap();
        assert_eq!(updated.name, "Jane Q. Doe");
        assert_eq!(backend.hits_for("PUT /profile"), 1);
    }

    #[tokio::test]
    async fn test_recommend_sends_multipart_text() {
        let backend = MockBackend::start().await;
        let session: Arc<dyn SessionStore> =
            Arc::new(MemorySessionStore::with_session(Session::token_only("tok-1")));
        let client = client_for(&backend.base_url, session);

        let result = client
            .recommend("I like databases", Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(result.expertise_field, "Backend Engineering");
        assert_eq!(result.confidence_percent(), "87.3%");
        assert_eq!(backend.recommend_texts(), vec!["I like databases"]);
    }

    #[tokio::test]
    async fn test_recommend_timeout_aborts() {
        let backend = MockBackend::start().await;
        backend.set_recommend_delay(Duration::from_secs(5));
        let session: Arc<dyn SessionStore> =
            Arc::new(MemorySessionStore::with_session(Session::token_only("tok-1")));
        let client = client_for(&backend.base_url, session);

        let started = Instant::now();
        let err = client
            .recommend("slow please", Duration::from_millis(100))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_server_error_without_json_body() {
        let backend = MockBackend::start().await;
        let session: Arc<dyn SessionStore> =
            Arc::new(MemorySessionStore::with_session(Session::token_only("tok-1")));
        let client = client_for(&backend.base_url, session);

        let err = client
            .recommend("gateway", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Server { status: 502 });
        assert_eq!(err.detail(), None);
    }

    #[tokio::test]
    async fn test_unexpected_body_is_decode_error() {
        let backend = MockBackend::start().await;
        let session: Arc<dyn SessionStore> =
            Arc::new(MemorySessionStore::with_session(Session::token_only("tok-1")));
        let client = client_for(&backend.base_url, session);

        let err = client
            .recommend("garbled", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        let base_url = unreachable_base_url().await;
        let session: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
        let client = client_for(&base_url, session);

        let err = client
            .login(&LoginRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }
}
