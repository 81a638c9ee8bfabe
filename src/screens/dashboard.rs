//! Signed-in landing screen

use super::{messages, require_session, Navigation, Route, Screen, ScreenState, LOGIN};
use crate::session::{SessionStore, DEFAULT_DISPLAY_NAME};
use std::sync::Arc;

/// Greeting plus links to the profile and recommend screens
pub struct DashboardScreen {
    session: Arc<dyn SessionStore>,
    state: ScreenState,
    user_name: String,
}

impl DashboardScreen {
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self {
            session,
            state: ScreenState::CheckingSession,
            user_name: String::new(),
        }
    }

    pub fn mount(&mut self) -> Navigation {
        match require_session(self.session.as_ref(), Route::Dashboard) {
            Some(session) => {
                self.user_name = session.name_or(DEFAULT_DISPLAY_NAME).to_string();
                self.state = ScreenState::Idle;
                Navigation::Stay
            }
            None => {
                self.state = ScreenState::Unauthenticated;
                Navigation::To(LOGIN)
            }
        }
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn open_profile(&self) -> Navigation {
        Navigation::To(Route::Profile)
    }

    pub fn open_recommend(&self) -> Navigation {
        Navigation::To(Route::Recommend)
    }

    /// Clear both session fields and return home
    pub fn logout(&mut self) -> Navigation {
        match self.session.clear() {
            Ok(()) => {
                tracing::info!("Signed out");
                Navigation::To(Route::Home)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to clear session");
                self.state = ScreenState::Failed(messages::LOGOUT_FAILED.to_string());
                Navigation::Stay
            }
        }
    }
}

impl Screen for DashboardScreen {
    fn route(&self) -> Route {
        Route::Dashboard
    }

    fn state(&self) -> &ScreenState {
        &self.state
    }
}
