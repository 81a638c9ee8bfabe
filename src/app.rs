//! Screen Navigator
//!
//! Owns the active screen and performs route transitions. Every transition
//! mounts the new screen, which runs its session guard, and follows any
//! redirect it returns.

use crate::client::ApiClient;
use crate::config::Config;
use crate::screens::{
    DashboardScreen, HomeScreen, LoginScreen, Navigation, ProfileScreen, RecommendScreen,
    RegisterScreen, Route, Screen, ScreenState,
};
use crate::session::SessionStore;
use crate::transcription::TranscriptionProvider;
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on chained redirects from a single navigation
const MAX_REDIRECTS: usize = 8;

/// Timings the screens are built with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSettings {
    pub recommend_timeout: Duration,
    pub profile_redirect_delay: Duration,
    pub registered_banner: Duration,
}

impl ScreenSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            recommend_timeout: config.recommend.timeout(),
            profile_redirect_delay: config.profile.redirect_delay(),
            registered_banner: config.login.registered_banner(),
        }
    }
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// The screen currently shown
pub enum ActiveScreen {
    Home(HomeScreen),
    Login(LoginScreen),
    Register(RegisterScreen),
    Dashboard(DashboardScreen),
    Profile(ProfileScreen),
    Recommend(RecommendScreen),
}

impl ActiveScreen {
    fn as_screen(&self) -> &dyn Screen {
        match self {
            ActiveScreen::Home(s) => s,
            ActiveScreen::Login(s) => s,
            ActiveScreen::Register(s) => s,
            ActiveScreen::Dashboard(s) => s,
            ActiveScreen::Profile(s) => s,
            ActiveScreen::Recommend(s) => s,
        }
    }

    pub fn route(&self) -> Route {
        self.as_screen().route()
    }

    pub fn state(&self) -> &ScreenState {
        self.as_screen().state()
    }
}

/// Routes between screens, sharing one client and one session store
pub struct App {
    client: Arc<ApiClient>,
    session: Arc<dyn SessionStore>,
    transcriber: Arc<dyn TranscriptionProvider>,
    settings: ScreenSettings,
    screen: ActiveScreen,
}

impl App {
    /// Start on the home screen
    pub fn new(
        client: Arc<ApiClient>,
        session: Arc<dyn SessionStore>,
        transcriber: Arc<dyn TranscriptionProvider>,
        settings: ScreenSettings,
    ) -> Self {
        Self {
            client,
            session,
            transcriber,
            settings,
            screen: ActiveScreen::Home(HomeScreen::new()),
        }
    }

    pub fn route(&self) -> Route {
        self.screen.route()
    }

    pub fn screen(&self) -> &ActiveScreen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut ActiveScreen {
        &mut self.screen
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Show `route`, following redirects issued while mounting
    pub async fn navigate(&mut self, route: Route) {
        let mut target = route;

        for _ in 0..MAX_REDIRECTS {
            tracing::debug!(route = %target, "Navigating");
            self.screen = self.build(target);

            match self.mount().await {
                Navigation::To(next) if next != target => {
                    tracing::debug!(from = %target, to = %next, "Redirected");
                    target = next;
                }
                _ => return,
            }
        }

        tracing::warn!(route = %target, "Too many redirects, staying put");
    }

    /// Apply the outcome of a screen action
    pub async fn follow(&mut self, navigation: Navigation) {
        match navigation {
            Navigation::Stay => {}
            Navigation::To(route) => self.navigate(route).await,
            Navigation::After(delay, route) => {
                tokio::time::sleep(delay).await;
                self.navigate(route).await;
            }
        }
    }

    fn build(&self, route: Route) -> ActiveScreen {
        let client = Arc::clone(&self.client);
        let session = Arc::clone(&self.session);

        match route {
            Route::Home => ActiveScreen::Home(HomeScreen::new()),
            Route::Login { registered } => ActiveScreen::Login(LoginScreen::new(
                client,
                session,
                registered,
                self.settings.registered_banner,
            )),
            Route::Register => ActiveScreen::Register(RegisterScreen::new(client, session)),
            Route::Dashboard => ActiveScreen::Dashboard(DashboardScreen::new(session)),
            Route::Profile => ActiveScreen::Profile(ProfileScreen::new(
                client,
                session,
                self.settings.profile_redirect_delay,
            )),
            Route::Recommend => ActiveScreen::Recommend(RecommendScreen::new(
                client,
                session,
                Arc::clone(&self.transcriber),
                self.settings.recommend_timeout,
            )),
        }
    }

    async fn mount(&mut self) -> Navigation {
        match &mut self.screen {
            ActiveScreen::Dashboard(s) => s.mount(),
            ActiveScreen::Profile(s) => s.mount().await,
            ActiveScreen::Recommend(s) => s.mount().await,
            ActiveScreen::Home(_) | ActiveScreen::Login(_) | ActiveScreen::Register(_) => {
                Navigation::Stay
            }
        }
    }
}
