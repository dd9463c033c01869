//! In-memory user store shared with handlers through an `Extension`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl UserStore {
    pub async fn list(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    /// Insert a user under the next free id.
    pub async fn insert(&self, name: String) -> User {
        let mut users = self.users.write().await;
        let id = users.last().map_or(1, |u| u.id + 1);
        let user = User { id, name };
        users.push(user.clone());
        user
    }
}
