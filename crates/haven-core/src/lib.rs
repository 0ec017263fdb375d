pub mod config;
pub mod error;
pub mod types;

pub use error::{HavenError, Result};
pub use types::{ConversationEntry, InboundMessage, Role, UserId};
