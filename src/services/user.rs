//! User services - Identità dell'utente autenticato

use crate::dtos::UserDTO;
use crate::entities::User;
use axum::{Extension, extract::Json};
use tracing::{debug, instrument};

#[instrument(skip(current_user), fields(user_id = %current_user.id))]
pub async fn current_user(
    Extension(current_user): Extension<User>, // ottenuto dall'autenticazione tramite token jwt
) -> Json<UserDTO> {
    debug!("Returning authenticated user");
    Json(UserDTO::from(current_user))
}
