//! # account-service
//!
//! Application layer: user lifecycle mutations and the cascade coordinator
//! that keeps dependent collections consistent with the primary user record.

pub mod services;

// Re-export commonly used types at crate root
pub use services::{
    CascadeCoordinator, CascadeMetrics, ServiceContext, ServiceError, ServiceResult, UserService,
};
