//! Port contracts for the conversation feed.

pub mod repository;

pub use repository::FeedStore;
