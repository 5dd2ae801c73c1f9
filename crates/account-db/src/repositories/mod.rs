//! PostgreSQL repository implementations

mod comment;
mod error;
mod post;
mod report;
mod user;

pub use comment::PgCommentRepository;
pub use post::PgPostRepository;
pub use report::PgReportRepository;
pub use user::PgUserRepository;
