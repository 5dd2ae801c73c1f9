//! Queue publisher - buffered, non-blocking change-event hand-off
//!
//! `QueuePublisher` is the process-wide publishing handle; a supervised
//! background worker owns the transport. Events published before the
//! transport is ready sit in a bounded in-process buffer and are delivered
//! once the connection comes up. After the connection is ready each event
//! gets a single send attempt; failures are logged and counted, never
//! retried. A send failure that indicates a lost connection re-enters the
//! connect loop (the failed event is still dropped).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use account_common::QueueConfig;
use account_core::{ChangeEvent, ChangeEventPublisher, DomainError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::transport::QueueTransport;

/// Publisher timing and buffering configuration
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// Capacity of the in-process publish buffer
    pub buffer_capacity: usize,
    /// First delay between connection attempts
    pub initial_backoff: Duration,
    /// Backoff cap; delays double up to this value
    pub max_backoff: Duration,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: 1024,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
        }
    }
}

impl From<&QueueConfig> for PublisherConfig {
    fn from(config: &QueueConfig) -> Self {
        Self {
            buffer_capacity: config.buffer_capacity,
            ..Self::default()
        }
    }
}

/// Counters for delivered and dropped events
///
/// Publish failures are invisible to the mutation that produced the event;
/// these counters are the observable record operators reconcile against.
#[derive(Debug, Default)]
pub struct PublisherMetrics {
    published: AtomicU64,
    dropped: AtomicU64,
}

impl PublisherMetrics {
    /// Events delivered to the broker
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    /// Events that were accepted but never delivered
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn record_published(&self) {
        self.published.fetch_add(1, Ordering::Relaxed);
    }

    fn record_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }
}

/// Cloneable handle for publishing change events
#[derive(Clone)]
pub struct QueuePublisher {
    tx: mpsc::Sender<ChangeEvent>,
    metrics: Arc<PublisherMetrics>,
}

impl QueuePublisher {
    /// Spawn the background worker and return the publishing handle
    ///
    /// The worker runs until every `QueuePublisher` clone has been dropped
    /// and the buffer is drained.
    pub fn spawn<T>(transport: T, config: PublisherConfig) -> (Self, JoinHandle<()>)
    where
        T: QueueTransport + 'static,
    {
        let (tx, rx) = mpsc::channel(config.buffer_capacity);
        let metrics = Arc::new(PublisherMetrics::default());
        let handle = tokio::spawn(worker(transport, rx, config, Arc::clone(&metrics)));
        (Self { tx, metrics }, handle)
    }

    /// Delivery counters
    pub fn metrics(&self) -> Arc<PublisherMetrics> {
        Arc::clone(&self.metrics)
    }
}

impl ChangeEventPublisher for QueuePublisher {
    fn publish(&self, event: ChangeEvent) -> Result<(), DomainError> {
        self.tx.try_send(event).map_err(|e| {
            self.metrics.record_dropped();
            match e {
                mpsc::error::TrySendError::Full(_) => {
                    DomainError::QueueError("publish buffer full".to_string())
                }
                mpsc::error::TrySendError::Closed(_) => {
                    DomainError::QueueError("publisher shut down".to_string())
                }
            }
        })
    }
}

impl std::fmt::Debug for QueuePublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueuePublisher")
            .field("published", &self.metrics.published())
            .field("dropped", &self.metrics.dropped())
            .finish()
    }
}

async fn worker<T: QueueTransport>(
    mut transport: T,
    mut rx: mpsc::Receiver<ChangeEvent>,
    config: PublisherConfig,
    metrics: Arc<PublisherMetrics>,
) {
    connect_with_backoff(&mut transport, &config).await;

    while let Some(event) = rx.recv().await {
        let payload = match event.to_json() {
            Ok(payload) => payload,
            Err(e) => {
                error!(error = %e, "Failed to serialize change event; dropping");
                metrics.record_dropped();
                continue;
            }
        };

        match transport.send(payload.as_bytes()).await {
            Ok(()) => {
                metrics.record_published();
                debug!(operation = %event.operation, "Published change event");
            }
            Err(e) if e.is_connection() => {
                // Single post-ready attempt per event: the event is gone,
                // only the connection is recovered.
                error!(error = %e, "Connection lost during publish; dropping event and reconnecting");
                metrics.record_dropped();
                connect_with_backoff(&mut transport, &config).await;
            }
            Err(e) => {
                error!(error = %e, "Failed to publish change event; dropping");
                metrics.record_dropped();
            }
        }
    }

    debug!("Queue publisher worker stopped");
}

async fn connect_with_backoff<T: QueueTransport>(transport: &mut T, config: &PublisherConfig) {
    let mut backoff = config.initial_backoff;
    loop {
        match transport.connect().await {
            Ok(()) => return,
            Err(e) => {
                warn!(
                    error = %e,
                    backoff_ms = backoff.as_millis() as u64,
                    "Broker not ready; retrying"
                );
                tokio::time::sleep(backoff).await;
                backoff = (backoff * 2).min(config.max_backoff);
            }
        }
    }
}
