//! In-process [`UserStore`], used by tests and local runs without a database.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, UserStore};
use crate::models::user::{CreateUser, Role, User};

/// [`UserStore`] holding records in a map behind an async lock
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites a user's role
    ///
    /// There is no API for promoting users; admins are seeded directly.
    pub async fn set_role(&self, id: Uuid, role: Role) -> bool {
        match self.users.write().await.get_mut(&id) {
            Some(user) => {
                user.role = role;
                true
            }
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, data: CreateUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        for existing in users.values() {
            if existing.email == data.email {
                return Err(StoreError::Duplicate("email".to_string()));
            }
            if existing.username == data.username {
                return Err(StoreError::Duplicate("username".to_string()));
            }
            if existing.activation_code == data.activation_code {
                return Err(StoreError::Duplicate("activation code".to_string()));
            }
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            full_name: data.full_name,
            username: data.username,
            email: data.email,
            password: data.password,
            role: Role::default(),
            profile_picture: "user.jpg".to_string(),
            is_active: false,
            activation_code: data.activation_code,
            created_at: now,
            updated_at: now,
        };

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;

        Ok(users
            .values()
            .find(|u| u.email == identifier)
            .or_else(|| users.values().find(|u| u.username == identifier))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn activate(&self, code: &str) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().await;

        let Some(user) = users
            .values_mut()
            .find(|u| !u.is_active && u.activation_code == code)
        else {
            return Ok(None);
        };

        user.is_active = true;
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str, code: &str) -> CreateUser {
        CreateUser {
            full_name: "Test User".to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password: "digest".to_string(),
            activation_code: code.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let store = MemoryUserStore::new();
        let user = store
            .create(new_user("alice", "alice@example.com", "c1"))
            .await
            .unwrap();

        assert_eq!(user.role, Role::User);
        assert!(!user.is_active);
        assert_eq!(user.profile_picture, "user.jpg");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_duplicates_rejected() {
        let store = MemoryUserStore::new();
        store
            .create(new_user("alice", "alice@example.com", "c1"))
            .await
            .unwrap();

        let err = store
            .create(new_user("alice2", "alice@example.com", "c2"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(f) if f == "email"));

        let err = store
            .create(new_user("alice", "other@example.com", "c3"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(f) if f == "username"));
    }

    #[tokio::test]
    async fn test_find_by_identifier() {
        let store = MemoryUserStore::new();
        let user = store
            .create(new_user("alice", "alice@example.com", "c1"))
            .await
            .unwrap();

        let by_email = store.find_by_identifier("alice@example.com").await.unwrap();
        let by_username = store.find_by_identifier("alice").await.unwrap();

        assert_eq!(by_email.map(|u| u.id), Some(user.id));
        assert_eq!(by_username.map(|u| u.id), Some(user.id));
        assert!(store.find_by_identifier("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_email_match_wins_over_username() {
        let store = MemoryUserStore::new();
        let by_username = store
            .create(new_user("carol@example.com", "someone@example.com", "c1"))
            .await
            .unwrap();
        let by_email = store
            .create(new_user("carol", "carol@example.com", "c2"))
            .await
            .unwrap();

        let found = store
            .find_by_identifier("carol@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, by_email.id);
        assert_ne!(found.id, by_username.id);
    }

    #[tokio::test]
    async fn test_activate_once() {
        let store = MemoryUserStore::new();
        store
            .create(new_user("alice", "alice@example.com", "c1"))
            .await
            .unwrap();

        let activated = store.activate("c1").await.unwrap().unwrap();
        assert!(activated.is_active);

        assert!(store.activate("c1").await.unwrap().is_none());
        assert!(store.activate("unknown").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_role() {
        let store = MemoryUserStore::new();
        let user = store
            .create(new_user("alice", "alice@example.com", "c1"))
            .await
            .unwrap();

        assert!(store.set_role(user.id, Role::Admin).await);
        let found = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(found.role, Role::Admin);
        assert!(!store.set_role(Uuid::new_v4(), Role::Admin).await);
    }
}
