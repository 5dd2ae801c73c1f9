//! Domain entities

mod content;
mod user;

pub use content::{Comment, OwnerPatch, Post, Report};
pub use user::{User, UserFlags};
