//! Queue transport - the wire side of the publisher
//!
//! The durable queue is a named Redis list; `send` appends the raw JSON
//! payload with `RPUSH`. The trait exists so the publisher worker can be
//! tested against an in-memory transport.

use account_common::QueueConfig;
use async_trait::async_trait;
use deadpool_redis::{Config, Pool, Runtime};
use redis::AsyncCommands;

/// Transport errors, split by whether the connection itself is at fault
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Failed to connect to broker: {0}")]
    Connect(String),

    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    #[error("Failed to send to queue: {0}")]
    Send(String),
}

impl TransportError {
    /// True if the worker should re-enter its connect loop
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connect(_) | Self::ConnectionLost(_))
    }
}

/// One named durable queue on a broker
#[async_trait]
pub trait QueueTransport: Send {
    /// Establish the connection and declare the queue. Invoked by the
    /// worker, with backoff, until it succeeds.
    async fn connect(&mut self) -> Result<(), TransportError>;

    /// Deliver one raw payload to the queue
    async fn send(&mut self, payload: &[u8]) -> Result<(), TransportError>;
}

/// Redis-backed transport: the queue is a list named by the config
pub struct RedisTransport {
    queue_name: String,
    url: String,
    max_connections: usize,
    pool: Option<Pool>,
}

impl RedisTransport {
    /// Create an unconnected transport from config
    pub fn new(config: &QueueConfig) -> Self {
        Self {
            queue_name: config.queue_name.clone(),
            url: config.url.clone(),
            max_connections: config.max_connections as usize,
            pool: None,
        }
    }

    /// Name of the queue this transport delivers to
    pub fn queue_name(&self) -> &str {
        &self.queue_name
    }

    fn classify(e: &redis::RedisError) -> bool {
        e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal()
    }
}

#[async_trait]
impl QueueTransport for RedisTransport {
    async fn connect(&mut self) -> Result<(), TransportError> {
        let cfg = Config::from_url(&self.url);
        let pool = cfg
            .builder()
            .map_err(|e| TransportError::Connect(e.to_string()))?
            .max_size(self.max_connections)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| TransportError::Connect(e.to_string()))?;

        // Round-trip once so readiness means a live broker, not just a pool
        let mut conn = pool
            .get()
            .await
            .map_err(|e| TransportError::Connect(e.to_string()))?;
        redis::cmd("PING")
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| TransportError::Connect(e.to_string()))?;

        // Redact credentials from URL for logging
        let safe_url = self.url.split('@').next_back().unwrap_or(&self.url);
        tracing::info!(url = %safe_url, queue = %self.queue_name, "Queue transport connected");

        self.pool = Some(pool);
        Ok(())
    }

    async fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        let pool = self
            .pool
            .as_ref()
            .ok_or_else(|| TransportError::ConnectionLost("not connected".to_string()))?;

        let mut conn = pool
            .get()
            .await
            .map_err(|e| TransportError::ConnectionLost(e.to_string()))?;

        conn.rpush::<_, _, ()>(&self.queue_name, payload)
            .await
            .map_err(|e| {
                if Self::classify(&e) {
                    TransportError::ConnectionLost(e.to_string())
                } else {
                    TransportError::Send(e.to_string())
                }
            })
    }
}
