//! Sign-in screen

use super::{messages, Navigation, Route, Screen, ScreenState};
use crate::client::{ApiClient, LoginRequest};
use crate::session::{first_name, Session, SessionStore};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Email/password form that stores the session on success
pub struct LoginScreen {
    client: Arc<ApiClient>,
    session: Arc<dyn SessionStore>,
    state: ScreenState,
    pub form: LoginRequest,
    banner_until: Option<Instant>,
}

impl LoginScreen {
    /// `registered` shows the "account created" banner for `banner_for`
    pub fn new(
        client: Arc<ApiClient>,
        session: Arc<dyn SessionStore>,
        registered: bool,
        banner_for: Duration,
    ) -> Self {
        Self {
            client,
            session,
            state: ScreenState::Idle,
            form: LoginRequest::default(),
            banner_until: registered.then(|| Instant::now() + banner_for),
        }
    }

    /// Banner shown right after sign-up, while it is still due
    pub fn banner(&self) -> Option<&'static str> {
        match self.banner_until {
            Some(until) if Instant::now() < until => Some(messages::ACCOUNT_CREATED),
            _ => None,
        }
    }

    pub async fn submit(&mut self) -> Navigation {
        if !self.state.can_submit() {
            return Navigation::Stay;
        }
        self.state = ScreenState::Submitting;

        match self.client.login(&self.form).await {
            Ok(auth) => {
                let name = first_name(auth.user_name.as_deref().unwrap_or_default());
                if let Err(e) = self.session.set(&Session::new(auth.access_token, name)) {
                    tracing::error!(error = %e, "Failed to persist session after login");
                    self.state = ScreenState::Failed(messages::LOGIN_FAILED.to_string());
                    return Navigation::Stay;
                }

                tracing::info!("Signed in");
                self.state = ScreenState::Succeeded;
                Navigation::To(Route::Dashboard)
            }
            Err(e) => {
                self.state = ScreenState::Failed(e.user_message(messages::LOGIN_FAILED));
                Navigation::Stay
            }
        }
    }
}

impl Screen for LoginScreen {
    fn route(&self) -> Route {
        Route::Login {
            registered: self.banner_until.is_some(),
        }
    }

    fn state(&self) -> &ScreenState {
        &self.state
    }
}
