//! User DTOs - Data Transfer Objects per utenti

use crate::entities::{MAX_PASSWORD_BYTES, User};
use serde::{Deserialize, Serialize};
use validator::Validate;

// struct per gestire io col client
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserDTO {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<User> for UserDTO {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email, // password_hash mai esposta al client!!!
        }
    }
}

/// Body di POST /register
#[derive(Deserialize, Debug, Validate)]
pub struct RegisterDTO {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(
        email(message = "Email is not valid"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,

    // conta i caratteri; il limite in byte lo controlla `password_fits_bcrypt`
    #[validate(length(min = 8, max = 72, message = "Password must be between 8 and 72 characters"))]
    pub password: String,
}

impl RegisterDTO {
    /// Nome senza spazi ai bordi, email in minuscolo
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: normalize_email(&self.email),
            password: self.password,
        }
    }

    /// Le password UTF-8 multibyte possono superare i 72 byte anche sotto i 72 caratteri
    pub fn password_fits_bcrypt(&self) -> bool {
        self.password.len() <= MAX_PASSWORD_BYTES
    }
}

/// Body di POST /login
#[derive(Deserialize, Debug, Validate)]
pub struct LoginDTO {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginDTO {
    pub fn normalized(self) -> Self {
        Self {
            email: normalize_email(&self.email),
            password: self.password,
        }
    }
}

/// DTO per creare un nuovo utente (senza id, password già hashata)
#[derive(Debug, Clone)]
pub struct CreateUserDTO {
    pub name: String,
    pub email: String,
    pub password_hash: Vec<u8>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(name: &str, email: &str, password: &str) -> RegisterDTO {
        RegisterDTO {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
        .normalized()
    }

    #[test]
    fn valid_registration_passes() {
        assert!(register("Alice", "a@x.com", "password1").validate().is_ok());
    }

    #[test]
    fn registration_is_normalized() {
        let dto = register("  Alice ", " A@X.com ", "password1");
        assert_eq!(dto.name, "Alice");
        assert_eq!(dto.email, "a@x.com");
        assert_eq!(dto.password, "password1");
    }

    #[test]
    fn blank_name_is_rejected() {
        let errors = register("   ", "a@x.com", "password1").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn invalid_email_is_rejected() {
        let errors = register("Alice", "not-an-email", "password1")
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn short_and_long_passwords_are_rejected() {
        assert!(register("Alice", "a@x.com", "short").validate().is_err());
        assert!(register("Alice", "a@x.com", &"a".repeat(73)).validate().is_err());
        assert!(register("Alice", "a@x.com", &"a".repeat(72)).validate().is_ok());
    }

    #[test]
    fn password_limit_counts_bytes() {
        // 30 caratteri ma 90 byte
        let multibyte = register("Alice", "a@x.com", &"€".repeat(30));
        assert!(multibyte.validate().is_ok());
        assert!(!multibyte.password_fits_bcrypt());

        assert!(register("Alice", "a@x.com", &"€".repeat(24)).password_fits_bcrypt());
        assert!(register("Alice", "a@x.com", &"a".repeat(72)).password_fits_bcrypt());
    }

    #[test]
    fn login_requires_both_fields() {
        let empty = LoginDTO {
            email: " ".to_string(),
            password: String::new(),
        }
        .normalized();
        let errors = empty.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn user_dto_has_no_password_field() {
        let user = User {
            id: 3,
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: b"$2b$04$hash".to_vec(),
        };
        let json = serde_json::to_value(UserDTO::from(user)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 3, "name": "Alice", "email": "a@x.com"})
        );
    }
}
