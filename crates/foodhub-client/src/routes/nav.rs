use std::sync::Arc;

use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::broadcast::Receiver;

use crate::auth::session::{SessionEvent, SessionRepository};
use crate::error::ClientResult;
use crate::models::{Role, User};
use crate::routes::Route;

/// Navigation bar state, kept in step with the session store.
pub struct NavBar {
    sessions: Arc<dyn SessionRepository>,
    events: Receiver<SessionEvent>,
    user: Option<User>,
}

impl NavBar {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        let events = sessions.subscribe();
        let mut nav = Self {
            sessions,
            events,
            user: None,
        };
        nav.refresh();
        nav
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Re-reads the signed-in user from the store.
    pub fn refresh(&mut self) {
        self.user = match self.sessions.get_session() {
            Ok(session) => session.map(|s| s.user),
            Err(e) => {
                tracing::warn!("Could not read session: {e}");
                None
            }
        };
    }

    /// Applies any pending session changes without waiting.
    /// Returns whether anything changed.
    pub fn poll_changes(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.events.try_recv() {
                Ok(_) | Err(TryRecvError::Lagged(_)) => changed = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        if changed {
            self.refresh();
        }
        changed
    }

    /// Waits for the next session change and applies it.
    pub async fn next_change(&mut self) -> Option<SessionEvent> {
        let event = loop {
            match self.events.recv().await {
                Ok(event) => break Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!("Navigation bar skipped {skipped} session events");
                }
                Err(RecvError::Closed) => break None,
            }
        };
        self.refresh();
        event
    }

    pub fn greeting(&self) -> Option<String> {
        self.user.as_ref().map(|u| format!("Hi, {}", u.name))
    }

    pub fn links(&self) -> Vec<(&'static str, Route)> {
        let mut links = vec![
            ("Home", Route::Home),
            ("Menu", Route::Meals),
            ("Restaurants", Route::Providers),
            ("Cart", Route::Cart),
        ];

        match &self.user {
            Some(user) if user.role == Role::Provider => {
                links.push(("Dashboard", Route::ProviderDashboard));
            }
            Some(_) => {}
            None => {
                links.push(("Log in", Route::Login));
                links.push(("Sign up", Route::Register));
            }
        }
        links
    }

    /// Clears the session and heads back to the home page.
    pub fn logout(&mut self) -> ClientResult<Route> {
        self.sessions.clear_session()?;
        self.user = None;
        Ok(Route::Home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::SessionStore;
    use crate::db::MemoryStore;
    use rstest::{fixture, rstest};

    #[fixture]
    fn sessions() -> Arc<dyn SessionRepository> {
        Arc::new(SessionStore::new(MemoryStore::new()))
    }

    fn provider() -> User {
        User {
            id: 3,
            name: "Mario".into(),
            role: Role::Provider,
        }
    }

    fn labels(nav: &NavBar) -> Vec<&'static str> {
        nav.links().into_iter().map(|(label, _)| label).collect()
    }

    #[rstest]
    fn guest_sees_login_links(sessions: Arc<dyn SessionRepository>) {
        let nav = NavBar::new(sessions);
        assert!(nav.greeting().is_none());
        assert_eq!(
            labels(&nav),
            vec!["Home", "Menu", "Restaurants", "Cart", "Log in", "Sign up"]
        );
    }

    #[rstest]
    fn picks_up_sign_in_from_another_view(sessions: Arc<dyn SessionRepository>) {
        let mut nav = NavBar::new(sessions.clone());
        assert!(!nav.poll_changes());

        sessions.set_session("tok", &provider()).unwrap();
        assert!(nav.poll_changes());
        assert_eq!(nav.greeting().as_deref(), Some("Hi, Mario"));
        assert!(labels(&nav).contains(&"Dashboard"));
    }

    #[rstest]
    fn customer_has_no_dashboard(sessions: Arc<dyn SessionRepository>) {
        let customer = User {
            id: 4,
            name: "Peach".into(),
            role: Role::Customer,
        };
        sessions.set_session("tok", &customer).unwrap();

        let nav = NavBar::new(sessions);
        assert_eq!(labels(&nav), vec!["Home", "Menu", "Restaurants", "Cart"]);
    }

    #[rstest]
    #[tokio::test]
    async fn logout_notifies_other_bars(sessions: Arc<dyn SessionRepository>) {
        sessions.set_session("tok", &provider()).unwrap();
        let mut desktop = NavBar::new(sessions.clone());
        let mut mobile = NavBar::new(sessions.clone());
        assert!(mobile.user().is_some());

        assert_eq!(desktop.logout().unwrap(), Route::Home);
        assert!(desktop.user().is_none());

        assert_eq!(mobile.next_change().await, Some(SessionEvent::SignedOut));
        assert!(mobile.user().is_none());
        assert!(sessions.get_session().unwrap().is_none());
    }
}
