//! InMemoryUserRepository - Credential store in memoria
//!
//! Usato dai test HTTP al posto di MySQL. L'entry API di
//! `DashMap` blocca lo shard dell'email durante l'insert, quindi due
//! registrazioni concorrenti con la stessa email producono un solo utente.

use super::{Create, Read, StoreError, UserStore};
use crate::dtos::CreateUserDTO;
use crate::entities::User;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI32, Ordering};

pub struct InMemoryUserRepository {
    // Key: email, Value: utente
    users: DashMap<String, User>,
    next_id: AtomicI32,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            next_id: AtomicI32::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Create<User, CreateUserDTO> for InMemoryUserRepository {
    async fn create(&self, data: &CreateUserDTO) -> Result<User, StoreError> {
        match self.users.entry(data.email.clone()) {
            Entry::Occupied(_) => Err(StoreError::Conflict),
            Entry::Vacant(slot) => {
                let user = User {
                    id: self.next_id.fetch_add(1, Ordering::SeqCst),
                    name: data.name.clone(),
                    email: data.email.clone(),
                    password_hash: data.password_hash.clone(),
                };
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }
}

impl Read<User, i32> for InMemoryUserRepository {
    async fn read(&self, id: &i32) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.value().id == *id)
            .map(|entry| entry.value().clone()))
    }
}

impl UserStore for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<User, StoreError> {
        self.users
            .get(email)
            .map(|entry| entry.value().clone())
            .ok_or(StoreError::NotFound)
    }
}
