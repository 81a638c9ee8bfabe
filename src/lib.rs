//! # STARRT
//!
//! Terminal client for the STARRT.ai career recommendation service.
//!
//! ## Modules
//!
//! - [`session`]: persisted token and display name
//! - [`client`]: HTTP client for the auth, profile and recommend endpoints
//! - [`screens`]: session-gated screen controllers
//! - [`app`]: navigator that owns the active screen
//! - [`render`]: plain-text rendering
//! - [`transcription`]: simulated voice transcription
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use starrt::{ApiClient, App, Config, FileSessionStore, MockTranscriber, Route, ScreenSettings};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_default();
//!     let session = Arc::new(FileSessionStore::new(config.session.path()));
//!     let client = Arc::new(ApiClient::new(&config.api, session.clone())?);
//!
//!     let mut app = App::new(
//!         client,
//!         session,
//!         Arc::new(MockTranscriber::new()),
//!         ScreenSettings::from_config(&config),
//!     );
//!     app.navigate(Route::Dashboard).await;
//!     println!("{}", starrt::render::render(app.screen()));
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod client;
pub mod config;
pub mod logging;
pub mod render;
pub mod screens;
pub mod session;
pub mod transcription;

#[cfg(test)]
mod testing;

pub use app::{ActiveScreen, App, ScreenSettings};

pub use client::{
    ApiClient, ApiError, ApiResult, AuthResponse, EducationLevel, ErrorKind, LoginRequest,
    Profile, RecommendationResult, RegisterRequest,
};

pub use config::{Config, ConfigError, LoggingConfig};

pub use screens::{InputMode, Navigation, Route, ScreenState};

pub use session::{
    first_name, FileSessionStore, MemorySessionStore, Session, SessionError, SessionStore,
    DEFAULT_DISPLAY_NAME,
};

pub use transcription::{AudioClip, MockTranscriber, TranscriptionError, TranscriptionProvider};
