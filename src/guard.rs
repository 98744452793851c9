//! Route guard: decides whether a route may be entered with the current session.

use crate::navigation::{Navigator, Route};
use crate::session::Session;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(Route),
}

/// Decide access to `target`; unreadable session storage counts as logged out
pub fn check(session: &Session, target: Route) -> GuardDecision {
    let authenticated = session.is_logged_in().unwrap_or_else(|e| {
        warn!("Could not read session, treating as logged out: {}", e);
        false
    });
    debug!("Guard check for {}: authenticated={}", target, authenticated);

    match (authenticated, target) {
        (false, route) if route.is_protected() => GuardDecision::Redirect(Route::Login),
        (true, Route::Login) => GuardDecision::Redirect(Route::Home),
        _ => GuardDecision::Allow,
    }
}

/// Run the guard and follow a redirect through `navigator`; true when allowed
pub fn enter(session: &Session, navigator: &dyn Navigator, target: Route) -> bool {
    match check(session, target) {
        GuardDecision::Allow => true,
        GuardDecision::Redirect(route) => {
            navigator.navigate(route);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::storage_keys;
    use crate::navigation::RouteHistory;
    use crate::session::{MemorySessionStore, SessionStore};
    use std::sync::Arc;

    fn logged_in_session() -> Session {
        let store = Arc::new(MemorySessionStore::new());
        store.set_item(storage_keys::TOKEN, "tok").unwrap();
        Session::new(store)
    }

    #[test]
    fn test_anonymous_is_sent_to_login() {
        let session = Session::in_memory();
        assert_eq!(
            check(&session, Route::Home),
            GuardDecision::Redirect(Route::Login)
        );
        assert_eq!(
            check(&session, Route::Dashboard),
            GuardDecision::Redirect(Route::Login)
        );
        assert_eq!(check(&session, Route::Login), GuardDecision::Allow);
        assert_eq!(check(&session, Route::Signup), GuardDecision::Allow);
    }

    #[test]
    fn test_logged_in_skips_login_page() {
        let session = logged_in_session();
        assert_eq!(
            check(&session, Route::Login),
            GuardDecision::Redirect(Route::Home)
        );
        assert_eq!(check(&session, Route::Dashboard), GuardDecision::Allow);
    }

    #[test]
    fn test_enter_follows_redirect() {
        let session = Session::in_memory();
        let history = RouteHistory::new();

        assert!(!enter(&session, &history, Route::Dashboard));
        assert_eq!(history.current(), Some(Route::Login));

        assert!(enter(&session, &history, Route::Signup));
        assert_eq!(history.visited().len(), 1);
    }
}
