//! Login page: exchange credentials for a token and store the session.

use std::sync::Arc;

use jobreview_client::ReviewApi;
use jobreview_core::AppKind;
use tracing::{error, info, warn};

use crate::session::SessionStore;

const REJECTED: &str = "Login failed";
const UNREACHABLE: &str = "Login failed. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Logged in; go to this path.
    Navigate(&'static str),
    /// Blocking alert. Stay on the login page.
    Alert(String),
}

pub struct LoginPage {
    app: AppKind,
    api: Arc<dyn ReviewApi>,
}

impl LoginPage {
    pub fn new(app: AppKind, api: Arc<dyn ReviewApi>) -> Self {
        Self { app, api }
    }

    pub async fn submit(
        &self,
        store: &mut SessionStore,
        username: &str,
        password: &str,
    ) -> LoginOutcome {
        match self.api.login(username, password).await {
            Ok(session) => {
                if let Err(e) = store.save(&session) {
                    error!(error = %e, "could not store session");
                    return LoginOutcome::Alert(UNREACHABLE.to_string());
                }
                info!(app = %self.app, user = %session.name, "login succeeded");
                LoginOutcome::Navigate(self.app.review_path())
            }
            Err(e) if e.is_server() => {
                warn!(error = %e, username, "login rejected");
                LoginOutcome::Alert(e.server_message().unwrap_or_else(|| REJECTED.to_string()))
            }
            Err(e) => {
                error!(error = %e, "login error");
                LoginOutcome::Alert(UNREACHABLE.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeApi;

    fn page(api: FakeApi) -> LoginPage {
        LoginPage::new(AppKind::Admin, Arc::new(api))
    }

    #[tokio::test]
    async fn success_stores_session_and_navigates() {
        let page = page(FakeApi::default().with_user("ada", "pw", "Ada Lovelace"));
        let mut store = SessionStore::in_memory(AppKind::Admin);
        let outcome = page.submit(&mut store, "ada", "pw").await;
        assert_eq!(outcome, LoginOutcome::Navigate("/admin-review"));
        let session = store.load().unwrap();
        assert_eq!(session.token, "token-ada");
        assert_eq!(session.name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn bad_password_alerts_with_server_message() {
        let page = page(FakeApi::default().with_user("ada", "pw", "Ada"));
        let mut store = SessionStore::in_memory(AppKind::Admin);
        let outcome = page.submit(&mut store, "ada", "wrong").await;
        assert_eq!(outcome, LoginOutcome::Alert("Invalid credentials".into()));
        assert!(store.load().is_none());
    }

    #[tokio::test]
    async fn transport_failure_alerts_generic_message() {
        let api = FakeApi::default().with_user("ada", "pw", "Ada");
        api.set_offline(true);
        let page = page(api);
        let mut store = SessionStore::in_memory(AppKind::Admin);
        let outcome = page.submit(&mut store, "ada", "pw").await;
        assert_eq!(outcome, LoginOutcome::Alert(UNREACHABLE.into()));
        assert!(store.load().is_none());
    }

    #[tokio::test]
    async fn rejection_without_json_body_alerts_login_failed() {
        let api = FakeApi::default().with_user("ada", "pw", "Ada");
        api.set_plain_login_rejection(true);
        let page = page(api);
        let mut store = SessionStore::in_memory(AppKind::Admin);
        let outcome = page.submit(&mut store, "ada", "wrong").await;
        assert_eq!(outcome, LoginOutcome::Alert(REJECTED.into()));
        assert!(store.load().is_none());
    }
}
