//! Common repository traits
//!
//! This module defines generic interfaces for database operations and the
//! `UserStore` interface consumed by the authentication services.
//!
//! The futures are declared `Send` so that handlers generic over the store
//! can be served by axum.

use crate::dtos::CreateUserDTO;
use crate::entities::User;
use std::future::Future;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user not found")]
    NotFound,
    #[error("email already registered")]
    Conflict,
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(ref db) if db.is_unique_violation() => StoreError::Conflict,
            other => StoreError::Database(other),
        }
    }
}

/// Trait for creating new entities in the storage
///
/// # Type Parameters
/// * `Entity` - Type of the returned entity (with ID assigned by the storage)
/// * `CreateDTO` - DTO for creation (without ID, will be automatically generated)
pub trait Create<Entity, CreateDTO> {
    /// Creates a new entity
    ///
    /// # Returns
    /// * `Ok(Entity)` - Created entity with ID assigned by the storage
    /// * `Err(StoreError::Conflict)` - A unique constraint was violated
    fn create(&self, data: &CreateDTO) -> impl Future<Output = Result<Entity, StoreError>> + Send;
}

/// Trait for reading a single entity by primary key
///
/// # Type Parameters
/// * `Entity` - Type of the entity to read
/// * `Id` - Type of the primary key
pub trait Read<Entity, Id> {
    /// # Returns
    /// * `Ok(Some(Entity))` - Entity found
    /// * `Ok(None)` - No entity with that ID
    fn read(&self, id: &Id) -> impl Future<Output = Result<Option<Entity>, StoreError>> + Send;
}

/// Credential store: identità degli utenti con email univoca.
///
/// L'unicità dell'email deve essere garantita dallo storage in modo atomico
/// (indice unique), mai con un controllo seguito da un insert.
pub trait UserStore: Create<User, CreateUserDTO> + Read<User, i32> + Send + Sync + 'static {
    fn find_by_email(&self, email: &str) -> impl Future<Output = Result<User, StoreError>> + Send;

    fn find_by_id(&self, id: i32) -> impl Future<Output = Result<User, StoreError>> + Send {
        async move { self.read(&id).await?.ok_or(StoreError::NotFound) }
    }
}
