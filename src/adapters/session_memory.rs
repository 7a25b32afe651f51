use crate::core::{SessionState, SessionStore};
use crate::utils::error::{Result, ShopError};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

struct StoredSession {
    payload: String,
    expires_at: DateTime<Utc>,
}

/// Process-local session store. Sessions are kept as serialized JSON and
/// expire `ttl` after their last save.
///
/// Each load or save is atomic, but a request's load → change → save is not:
/// two concurrent requests from one browser can overwrite each other.
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<Uuid, StoredSession>>,
    ttl: Duration,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, id: &Uuid) -> Result<Option<SessionState>> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(id) {
                None => return Ok(None),
                Some(stored) if stored.expires_at > Utc::now() => {
                    return Ok(Some(serde_json::from_str(&stored.payload)?));
                }
                Some(_) => {}
            }
        }

        tracing::debug!(session = %id, "Dropping expired session");
        self.sessions.write().await.remove(id);
        Ok(None)
    }

    async fn save(&self, id: &Uuid, state: &SessionState) -> Result<()> {
        let expires_at = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| ShopError::SessionError {
                message: format!("session lifetime {} is out of range", self.ttl),
            })?;
        let stored = StoredSession {
            payload: serde_json::to_string(state)?,
            expires_at,
        };
        self.sessions.write().await.insert(*id, stored);
        Ok(())
    }

    async fn prune_expired(&self) -> Result<usize> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, stored| stored.expires_at > now);
        Ok(before - sessions.len())
    }
}
