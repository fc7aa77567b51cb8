//! App variants, sessions, and the route guard.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;

pub const LOGIN_PATH: &str = "/login";

/// Which of the two front-ends is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppKind {
    Reviewer,
    Admin,
}

impl AppKind {
    /// Storage key holding the bearer token.
    pub fn token_key(self) -> &'static str {
        match self {
            Self::Reviewer => "token1",
            Self::Admin => "token",
        }
    }

    /// Storage key holding the display name.
    pub fn username_key(self) -> &'static str {
        "username"
    }

    /// The authenticated landing page.
    pub fn review_path(self) -> &'static str {
        match self {
            Self::Reviewer => "/primary-review",
            Self::Admin => "/admin-review",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Reviewer => "Primary Review",
            Self::Admin => "Admin Review",
        }
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Reviewer => "reviewer",
            Self::Admin => "admin",
        })
    }
}

impl FromStr for AppKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reviewer" => Ok(Self::Reviewer),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseError::UnknownApp(s.to_string())),
        }
    }
}

/// A logged-in user: bearer token plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub name: String,
}

impl Session {
    /// A token that is empty or the literal `"null"` does not authenticate.
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty() && self.token != "null"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Review,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Render(Page),
    Redirect(&'static str),
}

/// Map a path to a page, redirecting around the auth guard.
pub fn resolve_route(app: AppKind, path: &str, session: Option<&Session>) -> Route {
    let authed = session.is_some_and(Session::is_authenticated);
    if path == LOGIN_PATH {
        Route::Render(Page::Login)
    } else if path == app.review_path() {
        if authed {
            Route::Render(Page::Review)
        } else {
            Route::Redirect(LOGIN_PATH)
        }
    } else if authed {
        Route::Redirect(app.review_path())
    } else {
        Route::Redirect(LOGIN_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(token: &str) -> Session {
        Session {
            token: token.into(),
            name: "Ada".into(),
        }
    }

    #[test]
    fn login_always_renders() {
        assert_eq!(
            resolve_route(AppKind::Admin, "/login", Some(&session("t"))),
            Route::Render(Page::Login)
        );
        assert_eq!(
            resolve_route(AppKind::Admin, "/login", None),
            Route::Render(Page::Login)
        );
    }

    #[test]
    fn review_is_guarded() {
        let s = session("t");
        assert_eq!(
            resolve_route(AppKind::Reviewer, "/primary-review", Some(&s)),
            Route::Render(Page::Review)
        );
        assert_eq!(
            resolve_route(AppKind::Reviewer, "/primary-review", None),
            Route::Redirect("/login")
        );
        assert_eq!(
            resolve_route(AppKind::Reviewer, "/admin-review", Some(&s)),
            Route::Redirect("/primary-review")
        );
    }

    #[test]
    fn wildcard_follows_session() {
        assert_eq!(
            resolve_route(AppKind::Admin, "/anything", Some(&session("t"))),
            Route::Redirect("/admin-review")
        );
        assert_eq!(
            resolve_route(AppKind::Admin, "/", None),
            Route::Redirect("/login")
        );
    }

    #[test]
    fn null_token_is_unauthenticated() {
        assert!(!session("null").is_authenticated());
        assert!(!session("").is_authenticated());
        assert_eq!(
            resolve_route(AppKind::Reviewer, "/primary-review", Some(&session("null"))),
            Route::Redirect("/login")
        );
    }

    #[test]
    fn storage_keys_differ_per_app() {
        assert_eq!(AppKind::Reviewer.token_key(), "token1");
        assert_eq!(AppKind::Admin.token_key(), "token");
        assert_eq!(AppKind::Admin.username_key(), "username");
    }
}
