//! Landing screen

use super::{Navigation, Route, Screen, ScreenState, LOGIN};

/// Public landing page with links to sign in or sign up
#[derive(Debug)]
pub struct HomeScreen {
    state: ScreenState,
}

impl HomeScreen {
    pub fn new() -> Self {
        Self {
            state: ScreenState::Idle,
        }
    }

    pub fn login(&self) -> Navigation {
        Navigation::To(LOGIN)
    }

    pub fn register(&self) -> Navigation {
        Navigation::To(Route::Register)
    }
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for HomeScreen {
    fn route(&self) -> Route {
        Route::Home
    }

    fn state(&self) -> &ScreenState {
        &self.state
    }
}
