//! Database row models

mod content;
mod user;

pub use content::{CommentModel, PostModel, ReportModel};
pub use user::UserModel;
