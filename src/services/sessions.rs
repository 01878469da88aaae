//! Session state stores
//!
//! A store maps a session id to its [`SessionState`]. Unknown and expired
//! sessions load as an empty state.

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::visit::SessionState,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, session_id: &str) -> AppResult<SessionState>;
    async fn save(&self, session_id: &str, state: &SessionState) -> AppResult<()>;
}

struct MemoryEntry {
    state: SessionState,
    expires_at: Instant,
}

/// Process-local store, lost on restart
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, MemoryEntry>>,
    ttl: Duration,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, session_id: &str) -> AppResult<SessionState> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(session_id)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.state.clone())
            .unwrap_or_default())
    }

    async fn save(&self, session_id: &str, state: &SessionState) -> AppResult<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            session_id.to_string(),
            MemoryEntry {
                state: state.clone(),
                expires_at: now + self.ttl,
            },
        );
        Ok(())
    }
}

/// Redis-backed store: one JSON value per session under `session:{id}`
#[derive(Clone)]
pub struct RedisSessionStore {
    client: Client,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    /// Create the store and check the server answers
    pub async fn new(url: &str, ttl_seconds: u64) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection test failed: {}", e)))?;

        Ok(Self { client, ttl_seconds })
    }

    fn key(session_id: &str) -> String {
        format!("session:{}", session_id)
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, session_id: &str) -> AppResult<SessionState> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn
            .get(Self::key(session_id))
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read session from Redis: {}", e)))?;

        match raw {
            Some(json) => serde_json::from_str(&json).map_err(|e| {
                AppError::MalformedSessionState(format!("session {} is not a JSON map: {}", session_id, e))
            }),
            None => Ok(SessionState::new()),
        }
    }

    async fn save(&self, session_id: &str, state: &SessionState) -> AppResult<()> {
        let json = serde_json::to_string(state)
            .map_err(|e| AppError::Internal(format!("Failed to encode session: {}", e)))?;

        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(Self::key(session_id), json, self.ttl_seconds)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store session in Redis: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemorySessionStore::new(Duration::from_secs(60));
        assert!(store.load("abc").await.unwrap().is_empty());

        let mut state = SessionState::new();
        state.set("visits", "2");
        store.save("abc", &state).await.unwrap();

        assert_eq!(store.load("abc").await.unwrap().get("visits"), Some("2"));
        assert!(store.load("other").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_expiry() {
        let store = MemorySessionStore::new(Duration::from_millis(20));
        let mut state = SessionState::new();
        state.set("visits", "1");
        store.save("old", &state).await.unwrap();

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(store.load("old").await.unwrap().is_empty());

        // expired entries are swept on the next write
        store.save("new", &state).await.unwrap();
        assert_eq!(store.len().await, 1);
    }

    #[test]
    fn test_redis_key() {
        assert_eq!(RedisSessionStore::key("1234"), "session:1234");
    }
}
