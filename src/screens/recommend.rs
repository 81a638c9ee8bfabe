//! Recommend screen
//!
//! Chat-style exchange: the user's text (typed, or a simulated voice
//! transcript) goes to the service and the structured answer replaces the
//! input form until the user asks for a new recommendation.

use super::{messages, require_session, Navigation, Route, Screen, ScreenState, LOGIN};
use crate::client::{ApiClient, ErrorKind, RecommendationResult};
use crate::session::SessionStore;
use crate::transcription::{AudioClip, TranscriptionProvider};
use std::sync::Arc;
use std::time::Duration;

/// Greeting name when none is stored
const GREETING_FALLBACK: &str = "there";

/// Which input form is active
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Text,
    Voice,
}

/// The message that produced the current result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastMessage {
    pub text: String,
    pub from_voice: bool,
}

pub struct RecommendScreen {
    client: Arc<ApiClient>,
    session: Arc<dyn SessionStore>,
    transcriber: Arc<dyn TranscriptionProvider>,
    window: Duration,
    state: ScreenState,
    user_name: String,
    mode: InputMode,
    input_text: String,
    audio: Option<AudioClip>,
    transcript: String,
    result: Option<RecommendationResult>,
    last_message: Option<LastMessage>,
}

impl RecommendScreen {
    /// `window` bounds each recommendation call
    pub fn new(
        client: Arc<ApiClient>,
        session: Arc<dyn SessionStore>,
        transcriber: Arc<dyn TranscriptionProvider>,
        window: Duration,
    ) -> Self {
        Self {
            client,
            session,
            transcriber,
            window,
            state: ScreenState::CheckingSession,
            user_name: String::new(),
            mode: InputMode::Text,
            input_text: String::new(),
            audio: None,
            transcript: String::new(),
            result: None,
            last_message: None,
        }
    }

    /// Check the session, then require an existing profile
    pub async fn mount(&mut self) -> Navigation {
        let Some(session) = require_session(self.session.as_ref(), Route::Recommend) else {
            self.state = ScreenState::Unauthenticated;
            return Navigation::To(LOGIN);
        };

        if let Err(e) = self.client.get_profile().await {
            if e.is_unauthorized() {
                self.state = ScreenState::Unauthenticated;
                return Navigation::To(LOGIN);
            }
            tracing::info!(error = %e, "Profile not set up, redirecting to profile");
            return Navigation::To(Route::Profile);
        }

        self.user_name = session.name_or(GREETING_FALLBACK).to_string();
        self.state = ScreenState::Idle;
        Navigation::Stay
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
    }

    pub fn audio(&self) -> Option<&AudioClip> {
        self.audio.as_ref()
    }

    /// Select (or deselect) an audio clip; clears any inline error
    pub fn choose_audio(&mut self, clip: Option<AudioClip>) {
        self.audio = clip;
        if self.state.error().is_some() {
            self.state = ScreenState::Idle;
        }
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Overwrite the editable transcript
    pub fn set_transcript(&mut self, text: impl Into<String>) {
        self.transcript = text.into();
    }

    pub fn result(&self) -> Option<&RecommendationResult> {
        self.result.as_ref()
    }

    pub fn last_message(&self) -> Option<&LastMessage> {
        self.last_message.as_ref()
    }

    /// The input form is hidden while a result is displayed
    pub fn shows_form(&self) -> bool {
        self.result.is_none()
    }

    /// Fill the editable transcript from the provider
    pub async fn generate_transcript(&mut self) {
        match self.transcriber.transcribe(self.audio.as_ref()).await {
            Ok(text) => self.transcript = text,
            Err(e) => self.state = ScreenState::Failed(e.to_string()),
        }
    }

    /// Analyze the typed text
    pub async fn submit_text(&mut self) -> Navigation {
        if !self.accepts_submit() {
            return Navigation::Stay;
        }
        if self.input_text.is_empty() {
            self.state = ScreenState::Failed(messages::EMPTY_TEXT.to_string());
            return Navigation::Stay;
        }

        let text = self.input_text.clone();
        self.analyze(text, false).await
    }

    /// Analyze the edited transcript, or a fresh one for the chosen clip
    pub async fn submit_voice(&mut self) -> Navigation {
        if !self.accepts_submit() {
            return Navigation::Stay;
        }
        if self.transcript.is_empty() && self.audio.is_none() {
            self.state = ScreenState::Failed(messages::NO_AUDIO.to_string());
            return Navigation::Stay;
        }

        let transcript = if self.transcript.is_empty() {
            match self.transcriber.transcribe(self.audio.as_ref()).await {
                Ok(text) => text,
                Err(e) => {
                    self.state = ScreenState::Failed(e.to_string());
                    return Navigation::Stay;
                }
            }
        } else {
            self.transcript.clone()
        };

        self.analyze(transcript, true).await
    }

    /// Submits need the form on screen and no call in flight
    fn accepts_submit(&self) -> bool {
        self.shows_form() && self.state.can_submit()
    }

    /// Dismiss the current result and show the form again
    pub fn new_recommendation(&mut self) {
        self.result = None;
        self.state = ScreenState::Idle;
    }

    async fn analyze(&mut self, text: String, from_voice: bool) -> Navigation {
        self.state = ScreenState::Submitting;

        match self.client.recommend(&text, self.window).await {
            Ok(result) => {
                tracing::info!(
                    field = %result.expertise_field,
                    confidence = result.confidence,
                    from_voice,
                    "Recommendation received"
                );
                self.last_message = Some(LastMessage { text, from_voice });
                self.result = Some(result);
                if from_voice {
                    self.transcript.clear();
                } else {
                    self.input_text.clear();
                }
                self.audio = None;
                self.state = ScreenState::Succeeded;
                Navigation::Stay
            }
            Err(e) => {
                let message = match e.kind() {
                    ErrorKind::Timeout => messages::RECOMMEND_TIMEOUT.to_string(),
                    ErrorKind::Server { status: 401 } => {
                        self.state = ScreenState::Unauthenticated;
                        return Navigation::To(LOGIN);
                    }
                    _ => e.user_message_or_raw(messages::RECOMMEND_FAILED),
                };
                self.state = ScreenState::Failed(message);
                Navigation::Stay
            }
        }
    }
}

impl Screen for RecommendScreen {
    fn route(&self) -> Route {
        Route::Recommend
    }

    fn state(&self) -> &ScreenState {
        &self.state
    }
}
