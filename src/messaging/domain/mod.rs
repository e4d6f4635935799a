//! Index-addressed view types returned across the operation surface.

mod views;

pub use views::{ConversationSummary, FeedView, MessageView, SentMessage};
