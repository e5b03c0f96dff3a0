use crate::core::errors::{StoreError, StoreResult};
use crate::models::{User, UserView};
use crate::store::SocialStore;

impl SocialStore {
    pub fn get_current_user(&self) -> StoreResult<&User> {
        self.users
            .get(&self.current_user_id)
            .ok_or_else(|| StoreError::user_not_found(&self.current_user_id))
    }

    pub fn get_user(&self, user_id: &str) -> Option<&User> {
        self.users.get(user_id)
    }

    /// All users in the order they were seeded.
    pub fn list_users(&self) -> Vec<&User> {
        self.users_list
            .iter()
            .filter_map(|id| self.users.get(id))
            .collect()
    }

    /// Every other user, annotated with whether the current user follows them.
    pub fn user_views(&self) -> Vec<UserView> {
        self.list_users()
            .into_iter()
            .filter(|user| user.id != self.current_user_id)
            .map(|user| UserView {
                user: user.clone(),
                followed: self.is_followed_by_current_user(&user.id),
            })
            .collect()
    }
}
