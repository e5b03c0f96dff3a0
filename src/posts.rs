use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::core::errors::{StoreError, StoreResult};
use crate::core::helpers::{new_post_id, toggle_member};
use crate::models::{LikeState, Post, PostView, RepostState};
use crate::store::SocialStore;

impl SocialStore {
    pub fn get_post(&self, post_id: &str) -> Option<&Post> {
        self.posts.get(post_id)
    }

    /// Every post, newest first. Posts sharing a timestamp come out latest
    /// inserted first.
    pub fn list_all_posts(&self) -> Vec<&Post> {
        self.sorted_posts(|_| true)
    }

    pub fn list_posts_by_user(&self, user_id: &str) -> Vec<&Post> {
        self.sorted_posts(|p| p.user_id == user_id)
    }

    /// Posts by the current user or anyone they follow, newest first.
    pub fn list_timeline_posts(&self) -> Vec<&Post> {
        let followees = self.followings.get(&self.current_user_id);
        self.sorted_posts(|p| {
            p.user_id == self.current_user_id || followees.is_some_and(|f| f.contains(&p.user_id))
        })
    }

    fn sorted_posts<F>(&self, keep: F) -> Vec<&Post>
    where
        F: Fn(&Post) -> bool,
    {
        // Walk the feed backwards so the stable sort leaves equal timestamps
        // in reverse insertion order.
        let mut posts: Vec<&Post> = self
            .feed
            .iter()
            .rev()
            .filter_map(|id| self.posts.get(id))
            .filter(|p| keep(p))
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }

    pub fn is_liked_by_current_user(&self, post_id: &str) -> bool {
        self.posts
            .get(post_id)
            .is_some_and(|p| p.liked_by.contains(&self.current_user_id))
    }

    pub fn is_reposted_by_current_user(&self, post_id: &str) -> bool {
        self.posts
            .get(post_id)
            .is_some_and(|p| p.reposted_by.contains(&self.current_user_id))
    }

    /// Publishes `content` as the current user. Content is stored verbatim;
    /// length and emptiness are the caller's business.
    pub fn create_post(&mut self, content: impl Into<String>) -> Post {
        let post = Post {
            id: new_post_id(),
            user_id: self.current_user_id.clone(),
            content: content.into(),
            created_at: (self.clock)(),
            likes: 0,
            reposts: 0,
            replies: 0,
            liked_by: BTreeSet::new(),
            reposted_by: BTreeSet::new(),
        };

        self.feed.push(post.id.clone());
        self.posts.insert(post.id.clone(), post.clone());

        info!(post_id = %post.id, user_id = %post.user_id, "post created");
        post
    }

    pub fn toggle_like(&mut self, post_id: &str) -> StoreResult<LikeState> {
        let post = self
            .posts
            .get_mut(post_id)
            .ok_or_else(|| StoreError::post_not_found(post_id))?;

        let liked = toggle_member(&mut post.liked_by, &mut post.likes, &self.current_user_id);
        debug!(post_id, liked, likes = post.likes, "like toggled");

        Ok(LikeState { liked, likes: post.likes })
    }

    pub fn toggle_repost(&mut self, post_id: &str) -> StoreResult<RepostState> {
        let post = self
            .posts
            .get_mut(post_id)
            .ok_or_else(|| StoreError::post_not_found(post_id))?;

        let reposted =
            toggle_member(&mut post.reposted_by, &mut post.reposts, &self.current_user_id);
        debug!(post_id, reposted, reposts = post.reposts, "repost toggled");

        Ok(RepostState { reposted, reposts: post.reposts })
    }

    /// Card data for each post. Posts whose author is unknown are skipped.
    pub fn post_views(&self, posts: &[&Post]) -> Vec<PostView> {
        posts
            .iter()
            .filter_map(|post| {
                let author = self.users.get(&post.user_id)?;
                Some(PostView {
                    id: post.id.clone(),
                    user_id: post.user_id.clone(),
                    content: post.content.clone(),
                    created_at: post.created_at,
                    likes: post.likes,
                    reposts: post.reposts,
                    replies: post.replies,
                    author: author.clone(),
                    liked: post.liked_by.contains(&self.current_user_id),
                    reposted: post.reposted_by.contains(&self.current_user_id),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::core::db::Fixture;

    fn frozen() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn ids(posts: &[&Post]) -> Vec<String> {
        posts.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn all_posts_are_newest_first() {
        let store = SocialStore::demo().unwrap();
        assert_eq!(
            ids(&store.list_all_posts()),
            ["tweet1", "tweet2", "tweet3", "tweet4", "tweet5"]
        );
    }

    #[test]
    fn equal_timestamps_sort_latest_insert_first() {
        let mut store = SocialStore::with_clock("user1", Fixture::demo(), frozen).unwrap();
        let first = store.create_post("first");
        let second = store.create_post("second");
        assert_eq!(first.created_at, second.created_at);

        let all = store.list_all_posts();
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
        assert_eq!(all[2].id, "tweet1");
    }

    #[test]
    fn posts_by_user_filters_on_author() {
        let store = SocialStore::demo().unwrap();
        assert_eq!(ids(&store.list_posts_by_user("user2")), ["tweet1", "tweet5"]);
        assert!(store.list_posts_by_user("user99").is_empty());
    }

    #[test]
    fn timeline_is_self_plus_followees() {
        let store = SocialStore::demo().unwrap();
        // user1 follows user2 and user3; user4 is not followed.
        assert_eq!(ids(&store.list_timeline_posts()), ["tweet1", "tweet2", "tweet4", "tweet5"]);
    }

    #[test]
    fn create_post_starts_empty() {
        let mut store = SocialStore::demo().unwrap();
        let post = store.create_post("hello");

        assert_eq!(post.user_id, "user1");
        assert_eq!((post.likes, post.reposts, post.replies), (0, 0, 0));
        assert!(post.liked_by.is_empty() && post.reposted_by.is_empty());
        assert_eq!(store.list_all_posts()[0].content, "hello");
    }

    #[test]
    fn create_post_accepts_any_string() {
        let mut store = SocialStore::demo().unwrap();
        let long = "x".repeat(1000);
        assert_eq!(store.create_post("").content, "");
        assert_eq!(store.create_post(long.clone()).content, long);
    }

    #[test]
    fn toggle_like_round_trips() {
        let mut store = SocialStore::demo().unwrap();
        assert_eq!(store.toggle_like("tweet1").unwrap(), LikeState { liked: true, likes: 46 });
        assert!(store.is_liked_by_current_user("tweet1"));
        assert_eq!(store.toggle_like("tweet1").unwrap(), LikeState { liked: false, likes: 45 });
        assert!(!store.is_liked_by_current_user("tweet1"));
    }

    #[test]
    fn toggle_repost_round_trips() {
        let mut store = SocialStore::demo().unwrap();
        assert_eq!(
            store.toggle_repost("tweet2").unwrap(),
            RepostState { reposted: true, reposts: 68 }
        );
        assert!(store.is_reposted_by_current_user("tweet2"));
        assert_eq!(
            store.toggle_repost("tweet2").unwrap(),
            RepostState { reposted: false, reposts: 67 }
        );
    }

    #[test]
    fn unknown_posts_fail_hard_on_toggle_and_soft_on_queries() {
        let mut store = SocialStore::demo().unwrap();
        assert_eq!(store.toggle_like("missing"), Err(StoreError::post_not_found("missing")));
        assert_eq!(store.toggle_repost("missing"), Err(StoreError::post_not_found("missing")));
        assert!(!store.is_liked_by_current_user("missing"));
        assert!(!store.is_reposted_by_current_user("missing"));
    }

    #[test]
    fn toggling_a_maxed_out_counter_does_not_overflow() {
        let mut fixture = Fixture::demo();
        fixture.posts[0].likes = u64::MAX;
        fixture.posts[0].reposts = u64::MAX;
        let mut store = SocialStore::from_fixture("user1", fixture).unwrap();

        let liked = store.toggle_like("tweet1").unwrap();
        assert_eq!(liked, LikeState { liked: true, likes: u64::MAX });
        let reposted = store.toggle_repost("tweet1").unwrap();
        assert_eq!(reposted, RepostState { reposted: true, reposts: u64::MAX });
    }

    #[test]
    fn likes_and_reposts_are_independent() {
        let mut store = SocialStore::demo().unwrap();
        store.toggle_like("tweet3").unwrap();
        let post = store.get_post("tweet3").unwrap();
        assert_eq!((post.likes, post.reposts), (90, 34));
        assert!(post.reposted_by.is_empty());
    }

    #[test]
    fn post_views_carry_author_and_flags() {
        let mut store = SocialStore::demo().unwrap();
        store.toggle_like("tweet1").unwrap();

        let all = store.list_all_posts();
        let views = store.post_views(&all);
        assert_eq!(views.len(), 5);
        assert_eq!(views[0].author.username, "janedoe");
        assert!(views[0].liked);
        assert!(!views[0].reposted);
        assert_eq!(views[0].likes, 46);
    }
}
