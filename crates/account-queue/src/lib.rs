//! # account-queue
//!
//! Change-event hand-off to the durable message queue.
//!
//! The publisher owns a background worker that establishes the broker
//! connection once per process lifetime and drains an in-process buffer.
//! `publish` never blocks business logic: events queued before the
//! connection is ready wait in the buffer; after the connection is ready
//! each event gets exactly one send attempt (failed attempts are logged,
//! counted, and dropped).

pub mod publisher;
pub mod transport;

// Re-export commonly used types at crate root
pub use publisher::{PublisherConfig, PublisherMetrics, QueuePublisher};
pub use transport::{QueueTransport, RedisTransport, TransportError};
