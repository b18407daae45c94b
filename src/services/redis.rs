//! Redis service holding per-session state

use redis::{AsyncCommands, Client};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::session::SessionState,
};

fn session_key(sid: &Uuid) -> String {
    format!("session:{}", sid)
}

fn encode_session(state: &SessionState) -> AppResult<String> {
    serde_json::to_string(state)
        .map_err(|e| AppError::Internal(format!("Failed to encode session: {}", e)))
}

/// Unreadable values start the session over
fn decode_session(sid: &Uuid, json: &str) -> SessionState {
    serde_json::from_str(json).unwrap_or_else(|e| {
        tracing::warn!("Discarding unreadable session {}: {}", sid, e);
        SessionState::default()
    })
}

#[derive(Clone)]
pub struct RedisService {
    client: Client,
}

impl RedisService {
    /// Create a new Redis service and check the connection
    pub async fn new(url: &str) -> AppResult<Self> {
        let service = Self::open(url)?;

        let mut conn = service.get_connection().await?;
        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection test failed: {}", e)))?;

        Ok(service)
    }

    /// Create the client without connecting
    pub fn open(url: &str) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;
        Ok(Self { client })
    }

    /// Load the state of a session, empty when unknown or expired
    pub async fn load_session(&self, sid: &Uuid) -> AppResult<SessionState> {
        let mut conn = self.get_connection().await?;

        let stored: Option<String> = conn
            .get(session_key(sid))
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get session from Redis: {}", e)))?;

        Ok(stored
            .map(|json| decode_session(sid, &json))
            .unwrap_or_default())
    }

    /// Persist the state of a session for `ttl_seconds`
    pub async fn save_session(&self, sid: &Uuid, state: &SessionState, ttl_seconds: u64) -> AppResult<()> {
        let mut conn = self.get_connection().await?;

        let json = encode_session(state)?;
        conn.set_ex::<_, _, ()>(session_key(sid), json, ttl_seconds)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store session in Redis: {}", e)))?;

        Ok(())
    }

    /// Get a Redis connection
    pub async fn get_connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))
    }
}
