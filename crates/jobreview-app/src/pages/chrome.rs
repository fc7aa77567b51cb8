//! Static header and footer, plus the logout action.

use jobreview_core::{AppKind, LOGIN_PATH, Session};
use tracing::info;

use crate::session::{SessionError, SessionStore};

pub const FOOTER_TEXT: &str = "© 2025 OrgNest. All rights reserved.";

pub struct Header {
    app: AppKind,
}

impl Header {
    pub fn new(app: AppKind) -> Self {
        Self { app }
    }

    /// One-line banner with the app title and, when logged in, the user.
    pub fn banner(&self, session: Option<&Session>) -> String {
        match session.filter(|s| !s.name.is_empty()) {
            Some(s) => format!("{} | {}", self.app.title(), s.name),
            None => self.app.title().to_string(),
        }
    }

    /// Clear the stored session and return the path to go to.
    pub fn logout(&self, store: &mut SessionStore) -> Result<&'static str, SessionError> {
        store.clear()?;
        info!(app = %self.app, "logged out");
        Ok(LOGIN_PATH)
    }
}
