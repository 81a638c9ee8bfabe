//! Profile screen
//!
//! Free-text list fields are edited as comma-separated text and converted at
//! the boundary: [`split_list`] on submit, `", "`-join when an existing profile
//! is loaded.

use super::{messages, require_session, Navigation, Route, Screen, ScreenState, LOGIN};
use crate::client::{ApiClient, EducationLevel, Profile};
use crate::session::SessionStore;
use std::sync::Arc;
use std::time::Duration;

/// Name stored for greetings when the profile has none
const ANONYMOUS_NAME: &str = "there";

/// Split comma-separated input: trim each item, drop empties, keep order and
/// duplicates
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Form-bound view of a [`Profile`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub name: String,
    pub highest_education_level: EducationLevel,
    pub short_term_goal: String,
    pub programming_languages: String,
    pub technical_domains: String,
    pub preferred_domains: String,
}

impl ProfileForm {
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            highest_education_level: profile.highest_education_level,
            short_term_goal: profile.short_term_goal.clone(),
            programming_languages: profile.programming_languages.join(", "),
            technical_domains: profile.technical_domains.join(", "),
            preferred_domains: profile.preferred_domains.join(", "),
        }
    }

    pub fn to_profile(&self) -> Profile {
        Profile {
            name: self.name.clone(),
            highest_education_level: self.highest_education_level,
            short_term_goal: self.short_term_goal.clone(),
            programming_languages: split_list(&self.programming_languages),
            technical_domains: split_list(&self.technical_domains),
            preferred_domains: split_list(&self.preferred_domains),
        }
    }
}

/// Create-or-edit form for the signed-in user's profile
pub struct ProfileScreen {
    client: Arc<ApiClient>,
    session: Arc<dyn SessionStore>,
    state: ScreenState,
    form: ProfileForm,
    redirect_delay: Duration,
}

impl ProfileScreen {
    pub fn new(
        client: Arc<ApiClient>,
        session: Arc<dyn SessionStore>,
        redirect_delay: Duration,
    ) -> Self {
        Self {
            client,
            session,
            state: ScreenState::CheckingSession,
            form: ProfileForm::default(),
            redirect_delay,
        }
    }

    /// Check the session, then pre-fill from an existing profile
    pub async fn mount(&mut self) -> Navigation {
        if require_session(self.session.as_ref(), Route::Profile).is_none() {
            self.state = ScreenState::Unauthenticated;
            return Navigation::To(LOGIN);
        }

        match self.client.get_profile().await {
            Ok(profile) => self.form = ProfileForm::from_profile(&profile),
            Err(e) if e.is_unauthorized() => {
                self.state = ScreenState::Unauthenticated;
                return Navigation::To(LOGIN);
            }
            Err(e) => tracing::debug!(error = %e, "No profile yet"),
        }

        self.state = ScreenState::Idle;
        Navigation::Stay
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    /// Edit the form; any edit hides the previous success banner
    pub fn edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut ProfileForm),
    {
        f(&mut self.form);
        if self.state == ScreenState::Succeeded {
            self.state = ScreenState::Idle;
        }
    }

    pub fn success_message(&self) -> Option<&'static str> {
        (self.state == ScreenState::Succeeded).then_some(messages::PROFILE_SAVED)
    }

    pub async fn submit(&mut self) -> Navigation {
        if !self.state.can_submit() {
            return Navigation::Stay;
        }
        self.state = ScreenState::Submitting;

        let payload = self.form.to_profile();
        match self.client.create_profile(&payload).await {
            Ok(_) => {
                let name = if self.form.name.is_empty() {
                    ANONYMOUS_NAME
                } else {
                    self.form.name.as_str()
                };
                if let Err(e) = self.session.set_display_name(name) {
                    tracing::warn!(error = %e, "Failed to update display name");
                }

                tracing::info!(
                    languages = payload.programming_languages.len(),
                    "Profile saved"
                );
                self.state = ScreenState::Succeeded;
                Navigation::After(self.redirect_delay, Route::Recommend)
            }
            Err(e) if e.is_unauthorized() => {
                self.state = ScreenState::Unauthenticated;
                Navigation::To(LOGIN)
            }
            Err(e) => {
                self.state = ScreenState::Failed(e.user_message(messages::PROFILE_SAVE_FAILED));
                Navigation::Stay
            }
        }
    }
}

impl Screen for ProfileScreen {
    fn route(&self) -> Route {
        Route::Profile
    }

    fn state(&self) -> &ScreenState {
        &self.state
    }
}
