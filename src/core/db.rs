use std::path::Path;

use anyhow::Context;
use serde::{Serialize, Deserialize};
use tracing::info;

use crate::config::ServerConfig;
use crate::core::errors::{StoreError, StoreResult};
use crate::models::User;
use crate::store::SocialStore;

const DEMO_AVATAR: &str = "https://placekeanu.com/500";

/// Seed data a store is built from.
///
/// Counters are taken as given: they stand for engagement from accounts
/// outside the simulated population, so seeded follow edges and counters are
/// not reconciled against each other.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Fixture {
    pub users: Vec<User>,
    #[serde(default)]
    pub posts: Vec<SeedPost>,
    #[serde(default)]
    pub follows: Vec<SeedFollow>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SeedPost {
    pub id: String,
    pub user_id: String,
    pub content: String,
    /// Age of the post when the store is initialised.
    pub minutes_ago: i64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub reposts: u64,
    #[serde(default)]
    pub replies: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SeedFollow {
    pub follower_id: String,
    pub following_id: String,
}

fn demo_user(
    id: &str,
    username: &str,
    display_name: &str,
    bio: &str,
    followers: u64,
    following: u64,
) -> User {
    User {
        id: id.to_string(),
        username: username.to_string(),
        display_name: display_name.to_string(),
        avatar: DEMO_AVATAR.to_string(),
        bio: Some(bio.to_string()),
        followers,
        following,
    }
}

/// `engagement` is `(likes, reposts, replies)`.
fn demo_post(
    id: &str,
    user_id: &str,
    content: &str,
    minutes_ago: i64,
    engagement: (u64, u64, u64),
) -> SeedPost {
    let (likes, reposts, replies) = engagement;
    SeedPost {
        id: id.to_string(),
        user_id: user_id.to_string(),
        content: content.to_string(),
        minutes_ago,
        likes,
        reposts,
        replies,
    }
}

fn demo_follow(follower_id: &str, following_id: &str) -> SeedFollow {
    SeedFollow {
        follower_id: follower_id.to_string(),
        following_id: following_id.to_string(),
    }
}

impl Fixture {
    /// Four users, five posts and four follow edges.
    pub fn demo() -> Self {
        let users = vec![
            demo_user(
                "user1",
                "johndoe",
                "John Doe",
                "Software engineer and tech enthusiast",
                1200,
                450,
            ),
            demo_user("user2", "janedoe", "Jane Doe", "Designer & creator", 3400, 890),
            demo_user(
                "user3",
                "techguru",
                "Tech Guru",
                "Sharing the latest in tech",
                15600,
                120,
            ),
            demo_user(
                "user4",
                "devmaster",
                "Dev Master",
                "Building the future, one commit at a time",
                8900,
                230,
            ),
        ];

        let posts = vec![
            demo_post(
                "tweet1",
                "user2",
                "Just launched a new design system! \
                 Excited to see what the community builds with it. 🎨",
                30,
                (45, 12, 8),
            ),
            demo_post(
                "tweet2",
                "user3",
                "The future of web development is looking bright. \
                 React Server Components are game-changing! 🚀",
                2 * 60,
                (234, 67, 23),
            ),
            demo_post(
                "tweet3",
                "user4",
                "Spent the weekend building a microservices architecture. \
                 The complexity is real, but the scalability is worth it.",
                5 * 60,
                (89, 34, 15),
            ),
            demo_post(
                "tweet4",
                "user1",
                "Working on a new Next.js project. The App Router is fantastic!",
                24 * 60,
                (12, 3, 5),
            ),
            demo_post(
                "tweet5",
                "user2",
                "Design tip: Always consider accessibility first. \
                 Your users will thank you! ♿️",
                2 * 24 * 60,
                (156, 45, 28),
            ),
        ];

        let follows = vec![
            demo_follow("user1", "user2"),
            demo_follow("user1", "user3"),
            demo_follow("user2", "user3"),
            demo_follow("user3", "user4"),
        ];

        Fixture { users, posts, follows }
    }

    pub fn from_json(json: &str) -> StoreResult<Self> {
        serde_json::from_str(json).map_err(|e| StoreError::InvalidFixture(e.to_string()))
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fixture {}", path.display()))?;
        let fixture = Fixture::from_json(&json)
            .with_context(|| format!("failed to parse fixture {}", path.display()))?;
        Ok(fixture)
    }
}

/// Builds the process-wide store from configuration.
pub fn init_store(config: &ServerConfig) -> anyhow::Result<SocialStore> {
    let fixture = match &config.fixture_path {
        Some(path) => {
            info!(path = %path.display(), "loading fixture");
            Fixture::load(path)?
        }
        None => Fixture::demo(),
    };

    let store = SocialStore::from_fixture(&config.current_user_id, fixture)
        .with_context(|| format!("failed to seed store for {}", config.current_user_id))?;

    info!(
        users = store.list_users().len(),
        posts = store.list_all_posts().len(),
        current_user = %store.current_user_id(),
        "store initialised"
    );

    Ok(store)
}
