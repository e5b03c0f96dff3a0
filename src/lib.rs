//! In-memory social feed: users, posts, likes, reposts and a follow graph,
//! seen from a single current user, plus a thin JSON consumer over it.

pub mod config;
pub mod core;
pub mod follow;
pub mod handlers;
pub mod models;
pub mod posts;
pub mod store;
pub mod users;

pub use crate::core::db::Fixture;
pub use crate::core::errors::{ApiError, StoreError, StoreResult};
pub use crate::store::SocialStore;
