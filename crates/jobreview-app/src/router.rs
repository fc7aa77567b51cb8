//! Path routing behind the session guard.

use jobreview_core::{AppKind, Route, resolve_route};

use crate::session::SessionStore;

pub struct Router {
    app: AppKind,
}

impl Router {
    pub fn new(app: AppKind) -> Self {
        Self { app }
    }

    /// Resolve `path` against whatever session is currently stored.
    pub fn resolve(&self, path: &str, store: &SessionStore) -> Route {
        let session = store.load();
        resolve_route(self.app, path, session.as_ref())
    }

    /// Follow redirects until a page renders.
    pub fn navigate(&self, path: &str, store: &SessionStore) -> jobreview_core::Page {
        let mut path = path;
        loop {
            match self.resolve(path, store) {
                Route::Render(page) => return page,
                Route::Redirect(to) => path = to,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobreview_core::{Page, Session};

    #[test]
    fn wildcard_lands_on_login_without_session() {
        let store = SessionStore::in_memory(AppKind::Reviewer);
        let router = Router::new(AppKind::Reviewer);
        assert_eq!(router.navigate("/", &store), Page::Login);
        assert_eq!(router.navigate("/primary-review", &store), Page::Login);
    }

    #[test]
    fn wildcard_lands_on_review_with_session() {
        let mut store = SessionStore::in_memory(AppKind::Admin);
        store
            .save(&Session {
                token: "t".into(),
                name: "Root".into(),
            })
            .unwrap();
        let router = Router::new(AppKind::Admin);
        assert_eq!(router.navigate("/whatever", &store), Page::Review);
        assert_eq!(router.navigate("/login", &store), Page::Login);
    }
}
