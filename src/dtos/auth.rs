//! Auth DTOs - Risposte degli endpoint di login e refresh

use crate::dtos::UserDTO;
use serde::{Deserialize, Serialize};

/// Risposta di POST /login. Il refresh token viaggia solo nel cookie.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseDTO {
    pub access_token: String,
    pub user: UserDTO,
}

/// Body opzionale di POST /refresh, per i client che non usano i cookie
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RefreshDTO {
    pub refresh_token: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenDTO {
    pub access_token: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageDTO {
    pub message: String,
}
