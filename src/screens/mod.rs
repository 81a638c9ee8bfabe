//! Screens
//!
//! Each screen is a controller owning its local view state. Controllers are
//! handed the API client and session store at construction and never touch
//! ambient globals.
//!
//! ## Lifecycle
//!
//! ```text
//! CheckingSession ─┬─> Unauthenticated (redirect to login)
//!                  └─> Idle <──> Submitting ──> Succeeded | Failed
//! ```
//!
//! A failed submit leaves the screen actionable; nothing is retried.

mod dashboard;
mod home;
mod login;
mod profile;
mod recommend;
mod register;

pub use dashboard::DashboardScreen;
pub use home::HomeScreen;
pub use login::LoginScreen;
pub use profile::{split_list, ProfileForm, ProfileScreen};
pub use recommend::{InputMode, LastMessage, RecommendScreen};
pub use register::RegisterScreen;

use crate::session::{Session, SessionStore};
use std::fmt;
use std::time::Duration;

/// Inline messages shown by the screens
pub mod messages {
    pub const LOGIN_FAILED: &str = "Login failed";
    pub const REGISTER_FAILED: &str = "Registration failed";
    pub const LOGOUT_FAILED: &str = "Could not sign out";
    pub const PROFILE_SAVE_FAILED: &str = "Failed to save profile";
    pub const PROFILE_SAVED: &str = "Profile saved successfully!";
    pub const RECOMMEND_FAILED: &str = "Failed to get recommendation";
    pub const EMPTY_TEXT: &str = "Please enter some text to analyze";
    pub const NO_AUDIO: &str = "Please record or upload audio to simulate transcription";
    pub const RECOMMEND_TIMEOUT: &str =
        "Request timeout. Backend is still processing. Try again in a moment.";
    pub const ACCOUNT_CREATED: &str = "Account created! Please login.";
}

/// Independently routable views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    /// `registered` is set when arriving straight from a successful sign-up
    Login { registered: bool },
    Register,
    Dashboard,
    Profile,
    Recommend,
}

impl Route {
    /// Whether the screen needs a stored session to render
    pub fn requires_session(&self) -> bool {
        matches!(self, Route::Dashboard | Route::Profile | Route::Recommend)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Login { registered: true } => write!(f, "/login?registered=true"),
            Route::Login { registered: false } => write!(f, "/login"),
            Route::Register => write!(f, "/register"),
            Route::Dashboard => write!(f, "/dashboard"),
            Route::Profile => write!(f, "/profile"),
            Route::Recommend => write!(f, "/recommend"),
        }
    }
}

/// What a screen asks the navigator to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    To(Route),
    /// Navigate once `delay` has passed
    After(Duration, Route),
}

/// Local state shared by every screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenState {
    CheckingSession,
    Unauthenticated,
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

impl ScreenState {
    /// Whether the action control is enabled
    pub fn can_submit(&self) -> bool {
        matches!(
            self,
            ScreenState::Idle | ScreenState::Succeeded | ScreenState::Failed(_)
        )
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, ScreenState::Submitting)
    }

    /// Inline error, if the last action failed
    pub fn error(&self) -> Option<&str> {
        match self {
            ScreenState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Common read-only view over a screen controller
pub trait Screen {
    fn route(&self) -> Route;
    fn state(&self) -> &ScreenState;
}

/// Read the session for a protected screen
///
/// An unreadable store counts as signed out.
pub(crate) fn require_session(store: &dyn SessionStore, route: Route) -> Option<Session> {
    match store.get() {
        Ok(Some(session)) => Some(session),
        Ok(None) => {
            tracing::debug!(route = %route, "No session, redirecting to login");
            None
        }
        Err(e) => {
            tracing::warn!(route = %route, error = %e, "Session unreadable, redirecting to login");
            None
        }
    }
}

/// Redirect target for a protected screen without a session
pub(crate) const LOGIN: Route = Route::Login { registered: false };

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemorySessionStore, SessionError};

    struct BrokenStore;

    impl SessionStore for BrokenStore {
        fn get(&self) -> crate::session::SessionResult<Option<Session>> {
            Err(SessionError::Lock("poisoned".into()))
        }
        fn set(&self, _: &Session) -> crate::session::SessionResult<()> {
            Err(SessionError::Lock("poisoned".into()))
        }
        fn clear(&self) -> crate::session::SessionResult<()> {
            Err(SessionError::Lock("poisoned".into()))
        }
    }

    #[test]
    fn test_state_controls() {
        assert!(!ScreenState::CheckingSession.can_submit());
        assert!(!ScreenState::Unauthenticated.can_submit());
        assert!(!ScreenState::Submitting.can_submit());
        assert!(ScreenState::Idle.can_submit());
        assert!(ScreenState::Failed("x".into()).can_submit());
        assert_eq!(ScreenState::Failed("x".into()).error(), Some("x"));
        assert_eq!(ScreenState::Succeeded.error(), None);
    }

    #[test]
    fn test_protected_routes() {
        assert!(Route::Dashboard.requires_session());
        assert!(Route::Profile.requires_session());
        assert!(Route::Recommend.requires_session());
        assert!(!Route::Home.requires_session());
        assert!(!LOGIN.requires_session());
        assert!(!Route::Register.requires_session());
    }

    #[test]
    fn test_route_display() {
        assert_eq!(Route::Login { registered: true }.to_string(), "/login?registered=true");
        assert_eq!(Route::Recommend.to_string(), "/recommend");
    }

    #[test]
    fn test_require_session() {
        let store = MemorySessionStore::new();
        assert!(require_session(&store, Route::Dashboard).is_none());

        store.set(&Session::new("tok", "Jane")).unwrap();
        assert_eq!(
            require_session(&store, Route::Dashboard).map(|s| s.token),
            Some("tok".to_string())
        );

        assert!(require_session(&BrokenStore, Route::Dashboard).is_none());
    }
}
