//! # account-db
//!
//! Database layer: PostgreSQL repositories implementing the data-access
//! traits defined in `account-core`.

pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types at crate root
pub use pool::{create_pool, create_pool_from_env};
pub use repositories::{
    PgCommentRepository, PgPostRepository, PgReportRepository, PgUserRepository,
};
pub use sqlx::PgPool;
