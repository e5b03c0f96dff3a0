use tracing::{debug, warn};

use crate::core::helpers::bump;
use crate::models::FollowState;
use crate::store::SocialStore;

impl SocialStore {
    /// Follows or unfollows `target_user_id` as the current user.
    ///
    /// Following yourself, or someone who does not exist, is a no-op that
    /// reports `following: false`.
    pub fn toggle_follow(&mut self, target_user_id: &str) -> FollowState {
        if target_user_id == self.current_user_id {
            debug!(user_id = %target_user_id, "ignoring self-follow");
            return FollowState { following: false };
        }
        if !self.users.contains_key(target_user_id) {
            warn!(user_id = %target_user_id, "ignoring follow of unknown user");
            return FollowState { following: false };
        }

        let followees = self.followings.entry(self.current_user_id.clone()).or_default();
        let following = if followees.remove(target_user_id) {
            false
        } else {
            followees.insert(target_user_id.to_string());
            true
        };

        if let Some(target) = self.users.get_mut(target_user_id) {
            bump(&mut target.followers, following);
        }
        if let Some(me) = self.users.get_mut(&self.current_user_id) {
            bump(&mut me.following, following);
        }

        debug!(user_id = %target_user_id, following, "follow toggled");
        FollowState { following }
    }

    pub fn is_followed_by_current_user(&self, user_id: &str) -> bool {
        self.followings
            .get(&self.current_user_id)
            .is_some_and(|f| f.contains(user_id))
    }

    /// Ids `user_id` follows, sorted.
    pub fn list_following(&self, user_id: &str) -> Vec<&str> {
        self.followings
            .get(user_id)
            .map(|f| f.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Ids following `user_id`, sorted.
    pub fn list_followers(&self, user_id: &str) -> Vec<&str> {
        let mut followers: Vec<&str> = self
            .followings
            .iter()
            .filter(|(_, followees)| followees.contains(user_id))
            .map(|(id, _)| id.as_str())
            .collect();
        followers.sort_unstable();
        followers
    }
}
