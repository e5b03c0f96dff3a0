use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub avatar: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
}

/// A post and its engagement state.
///
/// `liked_by` and `reposted_by` back the `likes` and `reposts` counters: the
/// store only ever moves a counter together with its set.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub likes: u64,
    pub reposts: u64,
    pub replies: u64,
    #[serde(default)]
    pub liked_by: BTreeSet<String>,
    #[serde(default)]
    pub reposted_by: BTreeSet<String>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LikeState {
    pub liked: bool,
    pub likes: u64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepostState {
    pub reposted: bool,
    pub reposts: u64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FollowState {
    pub following: bool,
}

/// Everything a timeline card needs: the post, its author and the current
/// user's engagement flags.
#[derive(Serialize, Clone, Debug)]
pub struct PostView {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub likes: u64,
    pub reposts: u64,
    pub replies: u64,
    pub author: User,
    pub liked: bool,
    pub reposted: bool,
}

#[derive(Serialize, Clone, Debug)]
pub struct UserView {
    #[serde(flatten)]
    pub user: User,
    pub followed: bool,
}
