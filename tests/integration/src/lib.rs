//! Integration test support
//!
//! In-memory stores and transports for exercising the full mutation →
//! cascade → publish pipeline without Postgres or Redis.

pub mod fixtures;
pub mod helpers;
