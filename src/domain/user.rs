use chrono::{DateTime, Utc};

use super::errors::DomainError;

pub const MAX_USERNAME_LEN: usize = 150;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub date_joined: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    pub fn validate(&self) -> Result<(), DomainError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(DomainError::InvalidInput("username is required".to_string()));
        }
        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(DomainError::InvalidInput(format!(
                "username must be at most {MAX_USERNAME_LEN} characters"
            )));
        }
        if self.password.is_empty() {
            return Err(DomainError::InvalidInput("password is required".to_string()));
        }
        if !self.email.is_empty() && !self.email.contains('@') {
            return Err(DomainError::InvalidInput(
                "email must be a valid address".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// A user together with the bearer token that authenticates them.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(username: &str, email: &str, password: &str) -> Registration {
        Registration {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn complete_registration_is_valid() {
        assert!(registration("newbuyer", "buyer@example.com", "securepass123")
            .validate()
            .is_ok());
    }

    #[test]
    fn email_is_optional() {
        assert!(registration("newbuyer", "", "securepass123").validate().is_ok());
    }

    #[test]
    fn blank_username_is_rejected() {
        assert!(registration("   ", "a@b.c", "pw").validate().is_err());
    }

    #[test]
    fn overlong_username_is_rejected() {
        let long = "u".repeat(MAX_USERNAME_LEN + 1);
        assert!(registration(&long, "", "pw").validate().is_err());
    }

    #[test]
    fn empty_password_is_rejected() {
        assert!(registration("newbuyer", "", "").validate().is_err());
    }

    #[test]
    fn malformed_email_is_rejected() {
        assert!(registration("newbuyer", "not-an-email", "pw").validate().is_err());
    }
}
