//! Session store, routing guard, and the review pages.

pub mod pages;
pub mod prompt;
pub mod router;
pub mod session;

#[cfg(test)]
mod fake;

pub use pages::{
    AdminPage, FOOTER_TEXT, Header, LoginOutcome, LoginPage, PendingRosterAdd, ReviewerPage,
};
pub use prompt::{Prompt, accepted};
pub use router::Router;
pub use session::{FileStorage, MemoryStorage, SessionError, SessionStore, Storage};
