//! Service layer modules

mod cascade;
mod context;
mod error;
#[cfg(test)]
pub(crate) mod testing;
mod user;

pub use cascade::{CascadeCoordinator, CascadeMetrics};
pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
pub use user::UserService;
