//! Test helpers for wiring a full in-memory pipeline

use std::sync::{Arc, Mutex};
use std::time::Duration;

use account_common::QueueConfig;
use account_queue::{PublisherConfig, QueuePublisher};
use account_service::ServiceContext;
use tokio::task::JoinHandle;

use crate::fixtures::{InMemoryCollection, InMemoryQueue, InMemoryUsers};

/// Everything a pipeline test needs to inspect
pub struct TestPipeline {
    pub ctx: ServiceContext,
    pub users: Arc<InMemoryUsers>,
    pub posts: Arc<InMemoryCollection>,
    pub comments: Arc<InMemoryCollection>,
    pub reports: Arc<InMemoryCollection>,
    pub publisher: QueuePublisher,
    pub delivered: Arc<Mutex<Vec<String>>>,
    pub worker: JoinHandle<()>,
}

/// Build a context over in-memory stores and a real queue publisher
///
/// `fail_connects` simulates broker warm-up latency: the transport refuses
/// that many connection attempts before coming up.
pub fn build_pipeline(fail_connects: usize) -> TestPipeline {
    let users = Arc::new(InMemoryUsers::default());
    let posts = Arc::new(InMemoryCollection::default());
    let comments = Arc::new(InMemoryCollection::default());
    let reports = Arc::new(InMemoryCollection::default());

    let (transport, delivered) = InMemoryQueue::new(fail_connects);
    // Same config path production takes, with test-speed backoffs
    let queue_config = QueueConfig {
        url: "redis://127.0.0.1:6379".to_string(),
        queue_name: "auth".to_string(),
        buffer_capacity: 64,
        max_connections: 2,
    };
    let config = PublisherConfig {
        initial_backoff: Duration::from_millis(5),
        max_backoff: Duration::from_millis(40),
        ..PublisherConfig::from(&queue_config)
    };
    let (publisher, worker) = QueuePublisher::spawn(transport, config);

    let ctx = ServiceContext::new(
        Arc::clone(&users) as _,
        Arc::clone(&posts) as _,
        Arc::clone(&comments) as _,
        Arc::clone(&reports) as _,
        Arc::new(publisher.clone()),
    );

    TestPipeline { ctx, users, posts, comments, reports, publisher, delivered, worker }
}

/// Poll until `cond` holds or a one-second budget runs out
pub async fn wait_until<F: Fn() -> bool>(cond: F) {
    for _ in 0..200 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached within timeout");
}
