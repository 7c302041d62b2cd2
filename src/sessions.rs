//! Session store — one in-memory view router per visitor, with idle expiry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::dashboard::Dashboard;
use crate::error::SessionError;
use crate::funnel::{SocialLinks, ViewRouter};

/// A visitor's router plus bookkeeping for expiry.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub router: ViewRouter,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl Session {
    fn new(router: ViewRouter) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            router,
            created_at: now,
            last_seen: now,
        }
    }

    /// How long the session has existed as of `now`.
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.created_at
    }

    fn is_idle(&self, now: DateTime<Utc>, timeout: chrono::Duration) -> bool {
        now - self.last_seen > timeout
    }
}

/// In-memory sessions. Nothing survives a restart.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
    dashboard: Dashboard,
    social: SocialLinks,
    idle_timeout: chrono::Duration,
}

impl SessionStore {
    pub fn new(dashboard: Dashboard, social: SocialLinks, idle_timeout: Duration) -> Arc<Self> {
        Arc::new(Self {
            sessions: RwLock::new(HashMap::new()),
            dashboard,
            social,
            idle_timeout: chrono::Duration::from_std(idle_timeout)
                .unwrap_or_else(|_| chrono::Duration::weeks(52 * 100)),
        })
    }

    /// Start a new session on the landing view.
    pub async fn create(&self) -> Uuid {
        let session = Session::new(ViewRouter::new(self.dashboard.clone(), self.social.clone()));
        let id = session.id;
        self.sessions.write().await.insert(id, session);
        info!(session_id = %id, "Session created");
        id
    }

    /// Run `f` against a session's router and mark the session as seen.
    pub async fn with_session<F, T>(&self, id: Uuid, f: F) -> Result<T, SessionError>
    where
        F: FnOnce(&mut ViewRouter) -> T,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(SessionError::NotFound { id })?;
        session.last_seen = Utc::now();
        Ok(f(&mut session.router))
    }

    /// Copy of a session, if it exists.
    pub async fn get(&self, id: Uuid) -> Option<Session> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!(session_id = %id, "Session removed");
        }
        removed
    }

    /// Drop sessions idle longer than the timeout as of `now`.
    /// Returns the number of sessions removed.
    pub async fn expire_idle(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|id, session| {
            let keep = !session.is_idle(now, self.idle_timeout);
            if !keep {
                debug!(
                    session_id = %id,
                    age_secs = session.age(now).num_seconds(),
                    "Session expired"
                );
            }
            keep
        });
        let expired = before - sessions.len();

        if expired > 0 {
            info!(count = expired, "Expired idle sessions");
        }

        expired
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Spawn a background task that periodically prunes idle sessions.
pub fn spawn_expiry_task(store: Arc<SessionStore>, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            store.expire_idle(Utc::now()).await;
        }
    })
}
