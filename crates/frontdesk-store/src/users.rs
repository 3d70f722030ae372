//! User lookups and creation.

use uuid::Uuid;

use crate::models::{NewUser, User};
use crate::store::Store;

impl Store {
    pub async fn user(&self, id: Uuid) -> Option<User> {
        self.tables().await.users.get(&id).cloned()
    }

    /// First user whose username matches exactly.
    pub async fn user_by_username(&self, username: &str) -> Option<User> {
        self.tables()
            .await
            .users
            .values()
            .find(|user| user.username == username)
            .cloned()
    }

    /// Insert a new user with a fresh id.
    ///
    /// Does not check the username against existing records; a caller that
    /// needs uniqueness looks it up first.
    pub async fn create_user(&self, new: NewUser) -> User {
        let user = User {
            id: Uuid::new_v4(),
            username: new.username,
            password: new.password,
        };
        self.tables_mut().await.users.insert(user.id, user.clone());
        user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password: "hunter2".to_string(),
        }
    }

    #[tokio::test]
    async fn lookup_by_id_and_username() {
        let store = Store::new();
        let user = store.create_user(new_user("dreyes")).await;

        assert_eq!(store.user(user.id).await, Some(user.clone()));
        assert_eq!(store.user_by_username("dreyes").await, Some(user));
        assert!(store.user_by_username("nobody").await.is_none());
        assert!(store.user(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn duplicate_usernames_are_not_rejected_by_the_store() {
        let store = Store::new();
        let first = store.create_user(new_user("dreyes")).await;
        let second = store.create_user(new_user("dreyes")).await;
        assert_ne!(first.id, second.id);
    }
}
