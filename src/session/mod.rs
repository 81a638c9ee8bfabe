//! Session Store
//!
//! Holds the bearer token and display name for the signed-in user.
//!
//! ## Contract
//!
//! - A session is written at login, read by every protected screen and
//!   removed at logout
//! - There is no expiry and no refresh: a stored token counts as present
//!   until [`SessionStore::clear`] runs, whatever the server thinks of it
//! - Screens receive the store by injection (`Arc<dyn SessionStore>`)

mod error;
mod store;
mod types;

pub use error::{SessionError, SessionResult};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
pub use types::{first_name, Session, DEFAULT_DISPLAY_NAME};
