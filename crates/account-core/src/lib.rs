//! # account-core
//!
//! Domain layer containing entities, change events, repository traits, and domain errors.
//! This crate has zero dependencies on infrastructure (database, broker, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{Comment, OwnerPatch, Post, Report, User, UserFlags};
pub use error::DomainError;
pub use events::{ChangeEvent, ChangeOp};
pub use traits::{
    ChangeEventPublisher, CommentRepository, PostRepository, OwnedRecordRepository, RepoResult,
    ReportRepository, UserRepository,
};
