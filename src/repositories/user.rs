//! UserRepository - Repository MySQL per la gestione degli utenti
//!
//! Le query usano `sqlx::query_as` (controllo a run-time) così il crate compila
//! anche senza un database raggiungibile.

use super::{Create, Read, StoreError, UserStore};
use crate::dtos::CreateUserDTO;
use crate::entities::User;
use sqlx::MySqlPool;
use tracing::{debug, instrument};

pub struct UserRepository {
    connection_pool: MySqlPool,
}

impl UserRepository {
    pub fn new(connection_pool: MySqlPool) -> UserRepository {
        Self { connection_pool }
    }
}

impl Create<User, CreateUserDTO> for UserRepository {
    /// L'indice unique su `email` fa fallire l'insert duplicato con `Conflict`
    #[instrument(skip(self, data))]
    async fn create(&self, data: &CreateUserDTO) -> Result<User, StoreError> {
        let result = sqlx::query("INSERT INTO users (name, email, password_hash) VALUES (?, ?, ?)")
            .bind(&data.name)
            .bind(&data.email)
            .bind(&data.password_hash)
            .execute(&self.connection_pool)
            .await?;

        let new_id = user_id_from_insert(result.last_insert_id())?;
        debug!("Inserted user {}", new_id);

        Ok(User {
            id: new_id,
            name: data.name.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
        })
    }
}

// AUTO_INCREMENT è un u64 lato driver, la colonna `id` è INT
fn user_id_from_insert(last_insert_id: u64) -> Result<i32, StoreError> {
    i32::try_from(last_insert_id).map_err(|e| StoreError::Database(sqlx::Error::Decode(Box::new(e))))
}

impl Read<User, i32> for UserRepository {
    async fn read(&self, id: &i32) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(user)
    }
}

impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.connection_pool)
        .await?
        .ok_or(StoreError::NotFound)
    }
}
