//! Domain model for the message log.

mod ids;
mod message;

pub use ids::MessageId;
pub use message::{EmptyMessageContent, Message};
