//! Sign-up screen

use super::{messages, Navigation, Route, Screen, ScreenState};
use crate::client::{ApiClient, RegisterRequest};
use crate::session::{first_name, Session, SessionStore};
use std::sync::Arc;

/// Account creation form; success sends the user on to sign in
pub struct RegisterScreen {
    client: Arc<ApiClient>,
    session: Arc<dyn SessionStore>,
    state: ScreenState,
    pub form: RegisterRequest,
}

impl RegisterScreen {
    pub fn new(client: Arc<ApiClient>, session: Arc<dyn SessionStore>) -> Self {
        Self {
            client,
            session,
            state: ScreenState::Idle,
            form: RegisterRequest::default(),
        }
    }

    pub async fn submit(&mut self) -> Navigation {
        if !self.state.can_submit() {
            return Navigation::Stay;
        }
        self.state = ScreenState::Submitting;

        match self.client.register(&self.form).await {
            Ok(auth) => {
                // The token from sign-up is kept; the login screen replaces it
                let name = first_name(auth.user_name.as_deref().unwrap_or(&self.form.name));
                if let Err(e) = self.session.set(&Session::new(auth.access_token, name)) {
                    tracing::warn!(error = %e, "Failed to persist session after registration");
                }

                tracing::info!("Account created");
                self.state = ScreenState::Succeeded;
                Navigation::To(Route::Login { registered: true })
            }
            Err(e) => {
                self.state = ScreenState::Failed(e.user_message(messages::REGISTER_FAILED));
                Navigation::Stay
            }
        }
    }
}

impl Screen for RegisterScreen {
    fn route(&self) -> Route {
        Route::Register
    }

    fn state(&self) -> &ScreenState {
        &self.state
    }
}
