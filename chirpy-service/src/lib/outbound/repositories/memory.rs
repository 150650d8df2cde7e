use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::Chirp;
use crate::domain::chirp::models::ChirpId;
use crate::domain::chirp::ports::ChirpRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    // Insertion order doubles as creation order
    chirps: Vec<Chirp>,
}

/// Process-local store backing both in-memory repositories.
///
/// Mirrors the relational constraints: unique emails, chirps must reference
/// an existing user, and deleting users cascades to their chirps.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repository(&self) -> InMemoryUserRepository {
        InMemoryUserRepository {
            store: self.clone(),
        }
    }

    pub fn chirp_repository(&self) -> InMemoryChirpRepository {
        InMemoryChirpRepository {
            store: self.clone(),
        }
    }
}

pub struct InMemoryUserRepository {
    store: InMemoryStore,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut tables = self.store.tables.write().await;

        if tables.users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let tables = self.store.tables.read().await;
        Ok(tables.users.values().find(|u| &u.email == email).cloned())
    }

    async fn delete_all(&self) -> Result<u64, UserError> {
        let mut tables = self.store.tables.write().await;

        let deleted = tables.users.len() as u64;
        tables.users.clear();
        tables.chirps.clear();

        Ok(deleted)
    }
}

pub struct InMemoryChirpRepository {
    store: InMemoryStore,
}

#[async_trait]
impl ChirpRepository for InMemoryChirpRepository {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError> {
        let mut tables = self.store.tables.write().await;

        if !tables.users.contains_key(&chirp.user_id) {
            return Err(ChirpError::AuthorNotFound(chirp.user_id.to_string()));
        }

        tables.chirps.push(chirp.clone());
        Ok(chirp)
    }

    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError> {
        let tables = self.store.tables.read().await;
        Ok(tables.chirps.iter().find(|c| &c.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Chirp>, ChirpError> {
        let tables = self.store.tables.read().await;
        Ok(tables.chirps.clone())
    }
}
