//! Pages: login, header/footer chrome, and the two review pages.

pub mod admin;
pub mod chrome;
pub mod login;
pub mod reviewer;

pub use admin::{AdminPage, PendingRosterAdd};
pub use chrome::{FOOTER_TEXT, Header};
pub use login::{LoginOutcome, LoginPage};
pub use reviewer::ReviewerPage;
