//! Persisted session state and its change notifications.

use tokio::sync::broadcast;

use crate::db::KeyValueStore;
use crate::error::ClientResult;
use crate::models::{Session, User};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

const EVENT_CAPACITY: usize = 16;

/// Broadcast to every subscriber after the session changes.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SignedIn(User),
    SignedOut,
}

/// Read/write access to the current session plus change notifications.
pub trait SessionRepository: Send + Sync {
    fn get_session(&self) -> ClientResult<Option<Session>>;
    fn set_session(&self, token: &str, user: &User) -> ClientResult<()>;
    fn clear_session(&self) -> ClientResult<()>;
    fn subscribe(&self) -> broadcast::Receiver<SessionEvent>;
}

/// Session repository backed by a key-value store.
///
/// Token and user are two independent entries; a read that finds only one of
/// them reports no session.
pub struct SessionStore<S> {
    storage: S,
    events: broadcast::Sender<SessionEvent>,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { storage, events }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn notify(&self, event: SessionEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

impl<S: KeyValueStore> SessionRepository for SessionStore<S> {
    fn get_session(&self) -> ClientResult<Option<Session>> {
        let token = self.storage.get_item(TOKEN_KEY)?;
        let user = self.storage.get_item(USER_KEY)?;

        match (token, user) {
            (Some(token), Some(raw_user)) => match serde_json::from_str::<User>(&raw_user) {
                Ok(user) => Ok(Some(Session { token, user })),
                Err(e) => {
                    tracing::warn!("Stored user is unreadable, treating as signed out: {e}");
                    Ok(None)
                }
            },
            (None, None) => Ok(None),
            (token, _) => {
                tracing::warn!(
                    "Partial session in storage (token present: {}), treating as signed out",
                    token.is_some()
                );
                Ok(None)
            }
        }
    }

    fn set_session(&self, token: &str, user: &User) -> ClientResult<()> {
        let raw_user = serde_json::to_string(user)?;
        self.storage.set_item(TOKEN_KEY, token)?;
        self.storage.set_item(USER_KEY, &raw_user)?;

        tracing::info!("Signed in as {} ({})", user.name, user.role);
        self.notify(SessionEvent::SignedIn(user.clone()));
        Ok(())
    }

    fn clear_session(&self) -> ClientResult<()> {
        self.storage.remove_item(TOKEN_KEY)?;
        self.storage.remove_item(USER_KEY)?;

        tracing::info!("Signed out");
        self.notify(SessionEvent::SignedOut);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}
