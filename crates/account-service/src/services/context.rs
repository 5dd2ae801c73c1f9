//! Service context - dependency container for services
//!
//! Holds the repositories, the change-event publisher, and the cascade
//! metrics. The publisher and repositories are injected so the cascade is
//! testable against in-memory fakes.

use std::sync::Arc;

use account_core::traits::{
    ChangeEventPublisher, CommentRepository, PostRepository, ReportRepository, UserRepository,
};

use super::cascade::CascadeMetrics;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    report_repo: Arc<dyn ReportRepository>,
    publisher: Arc<dyn ChangeEventPublisher>,
    cascade_metrics: Arc<CascadeMetrics>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        post_repo: Arc<dyn PostRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        report_repo: Arc<dyn ReportRepository>,
        publisher: Arc<dyn ChangeEventPublisher>,
    ) -> Self {
        Self {
            user_repo,
            post_repo,
            comment_repo,
            report_repo,
            publisher,
            cascade_metrics: Arc::new(CascadeMetrics::default()),
        }
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the post adapter
    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    /// Get the comment adapter
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the report adapter
    pub fn report_repo(&self) -> &dyn ReportRepository {
        self.report_repo.as_ref()
    }

    /// Get the change-event publisher
    pub fn publisher(&self) -> &dyn ChangeEventPublisher {
        self.publisher.as_ref()
    }

    /// Get the cascade failure counters
    pub fn cascade_metrics(&self) -> &Arc<CascadeMetrics> {
        &self.cascade_metrics
    }
}

#[cfg(test)]
impl ServiceContext {
    /// Swap the publisher, for tests exercising publish failures
    pub(crate) fn with_publisher(mut self, publisher: Arc<dyn ChangeEventPublisher>) -> Self {
        self.publisher = publisher;
        self
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("cascade_metrics", &self.cascade_metrics)
            .finish()
    }
}
