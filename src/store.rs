use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::core::db::Fixture;
use crate::core::errors::{StoreError, StoreResult};
use crate::core::helpers::now;
use crate::models::{Post, User};

pub type Clock = fn() -> DateTime<Utc>;

fn invalid(msg: String) -> StoreError {
    StoreError::InvalidFixture(msg)
}

/// In-memory social graph seen from one fixed current user.
///
/// Queries take `&self` and commands take `&mut self`; callers that share a
/// store across threads wrap it in a single lock. Queries live next to the
/// entities they read: see `users`, `posts` and `follow`.
#[derive(Debug)]
pub struct SocialStore {
    pub(crate) users: HashMap<String, User>,
    /// User ids in insertion order.
    pub(crate) users_list: Vec<String>,
    pub(crate) posts: HashMap<String, Post>,
    /// Post ids in insertion order.
    pub(crate) feed: Vec<String>,
    /// follower id -> followee ids
    pub(crate) followings: HashMap<String, BTreeSet<String>>,
    pub(crate) current_user_id: String,
    pub(crate) clock: Clock,
}

impl SocialStore {
    /// Store seeded with the demo fixture, acting as `user1`.
    pub fn demo() -> StoreResult<Self> {
        Self::from_fixture(crate::config::DEFAULT_CURRENT_USER_ID, Fixture::demo())
    }

    pub fn from_fixture(current_user_id: &str, fixture: Fixture) -> StoreResult<Self> {
        Self::with_clock(current_user_id, fixture, now)
    }

    /// Like `from_fixture`, reading time from `clock` for seeding and for new
    /// posts.
    pub fn with_clock(current_user_id: &str, fixture: Fixture, clock: Clock) -> StoreResult<Self> {
        let mut store = SocialStore {
            users: HashMap::new(),
            users_list: Vec::new(),
            posts: HashMap::new(),
            feed: Vec::new(),
            followings: HashMap::new(),
            current_user_id: current_user_id.to_string(),
            clock,
        };

        let mut usernames = HashSet::new();
        for user in fixture.users {
            if store.users.contains_key(&user.id) {
                return Err(invalid(format!("duplicate user id {}", user.id)));
            }
            if !usernames.insert(user.username.clone()) {
                return Err(invalid(format!("duplicate username {}", user.username)));
            }
            store.followings.insert(user.id.clone(), BTreeSet::new());
            store.users_list.push(user.id.clone());
            store.users.insert(user.id.clone(), user);
        }

        if !store.users.contains_key(current_user_id) {
            return Err(invalid(format!("current user {} is not seeded", current_user_id)));
        }

        let seeded_at = clock();
        for seed in fixture.posts {
            if store.posts.contains_key(&seed.id) {
                return Err(invalid(format!("duplicate post id {}", seed.id)));
            }
            if !store.users.contains_key(&seed.user_id) {
                return Err(invalid(format!(
                    "post {} references unknown user {}",
                    seed.id, seed.user_id
                )));
            }
            let created_at = Duration::try_minutes(seed.minutes_ago)
                .and_then(|age| seeded_at.checked_sub_signed(age))
                .ok_or_else(|| {
                    invalid(format!("post {} has out-of-range minutes_ago", seed.id))
                })?;
            let post = Post {
                id: seed.id.clone(),
                user_id: seed.user_id,
                content: seed.content,
                created_at,
                likes: seed.likes,
                reposts: seed.reposts,
                replies: seed.replies,
                liked_by: BTreeSet::new(),
                reposted_by: BTreeSet::new(),
            };
            store.feed.push(seed.id.clone());
            store.posts.insert(seed.id, post);
        }

        for edge in fixture.follows {
            if edge.follower_id == edge.following_id {
                return Err(invalid(format!("{} follows itself", edge.follower_id)));
            }
            if !store.users.contains_key(&edge.following_id) {
                return Err(invalid(format!(
                    "follow edge to unknown user {}",
                    edge.following_id
                )));
            }
            let Some(followees) = store.followings.get_mut(&edge.follower_id) else {
                return Err(invalid(format!(
                    "follow edge from unknown user {}",
                    edge.follower_id
                )));
            };
            followees.insert(edge.following_id);
        }

        debug!(
            users = store.users.len(),
            posts = store.posts.len(),
            current_user = %store.current_user_id,
            "seeded store"
        );

        Ok(store)
    }

    pub fn current_user_id(&self) -> &str {
        &self.current_user_id
    }
}
