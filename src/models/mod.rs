pub mod models;

pub use models::{FollowState, LikeState, Post, PostView, RepostState, User, UserView};
