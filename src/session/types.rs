//! Session model

/// Display name shown when no name is known
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// Authenticated session
///
/// Presence of a session means "authenticated" to the screens. Its validity
/// is only discovered when the next API call fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque bearer credential
    pub token: String,
    /// Name shown in greetings, if one was stored
    pub display_name: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>, display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        Self {
            token: token.into(),
            display_name: if display_name.is_empty() {
                None
            } else {
                Some(display_name)
            },
        }
    }

    /// Session without a display name
    pub fn token_only(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            display_name: None,
        }
    }

    /// Display name, or `fallback` when none was stored
    pub fn name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.display_name.as_deref().unwrap_or(fallback)
    }
}

/// Extract the first name from a full name
///
/// Returns everything before the first space, provided the space is not the
/// leading character. Empty input yields `"User"`.
pub fn first_name(full_name: &str) -> String {
    if full_name.is_empty() {
        return DEFAULT_DISPLAY_NAME.to_string();
    }

    match full_name.find(' ') {
        Some(idx) if idx > 0 => full_name[..idx].to_string(),
        _ => full_name.to_string(),
    }
}
