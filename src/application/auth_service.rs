use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::domain::errors::DomainError;
use crate::domain::ports::UserRepository;
use crate::domain::user::{AuthSession, Credentials, NewUser, Registration, User};

/// Token keys are 20 random bytes, hex encoded.
pub const TOKEN_BYTES: usize = 20;

pub fn generate_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::random();
    hex::encode(bytes)
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub fn register(&self, registration: Registration) -> Result<AuthSession, DomainError> {
        registration.validate()?;

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(registration.password.as_bytes(), &salt)
            .map_err(|e| DomainError::Internal(format!("Hashing failed: {e}")))?
            .to_string();

        let user = self.users.create(NewUser {
            username: registration.username.trim().to_string(),
            email: registration.email.trim().to_string(),
            password_hash,
        })?;
        let token = self.users.get_or_create_token(user.id, &generate_token())?;

        log::info!("Registered user {} ({})", user.id, user.username);
        Ok(AuthSession { token, user })
    }

    pub fn login(&self, credentials: Credentials) -> Result<AuthSession, DomainError> {
        let user = self
            .users
            .find_by_username(credentials.username.trim())?
            .ok_or(DomainError::InvalidCredentials)?;

        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|e| DomainError::Internal(format!("Invalid hash format: {e}")))?;
        Argon2::default()
            .verify_password(credentials.password.as_bytes(), &parsed_hash)
            .map_err(|_| DomainError::InvalidCredentials)?;

        let token = self.users.get_or_create_token(user.id, &generate_token())?;
        Ok(AuthSession { token, user })
    }

    pub fn authenticate(&self, token: &str) -> Result<User, DomainError> {
        if token.is_empty() {
            return Err(DomainError::Unauthenticated);
        }
        self.users
            .find_by_token(token)?
            .ok_or(DomainError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::InMemoryStore;

    fn service() -> AuthService {
        AuthService::new(Arc::new(InMemoryStore::new()))
    }

    fn registration(username: &str, password: &str) -> Registration {
        Registration {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: password.to_string(),
        }
    }

    #[test]
    fn generated_tokens_are_forty_hex_chars() {
        let token = generate_token();
        assert_eq!(token.len(), TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, generate_token());
    }

    #[test]
    fn register_issues_a_token_that_authenticates() {
        let auth = service();

        let session = auth
            .register(registration("newbuyer", "securepass123"))
            .expect("register");

        assert!(!session.token.is_empty());
        let user = auth.authenticate(&session.token).expect("authenticate");
        assert_eq!(user.username, "newbuyer");
        assert_ne!(user.password_hash, "securepass123");
    }

    #[test]
    fn duplicate_username_is_a_conflict() {
        let auth = service();
        auth.register(registration("dup", "pw")).unwrap();

        let err = auth.register(registration("dup", "other")).unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn login_returns_the_registration_token() {
        let auth = service();
        let session = auth.register(registration("viewer", "viewerpass123")).unwrap();

        let login = auth
            .login(Credentials {
                username: "viewer".to_string(),
                password: "viewerpass123".to_string(),
            })
            .expect("login");

        assert_eq!(login.token, session.token);
        assert_eq!(login.user.id, session.user.id);
    }

    #[test]
    fn login_with_wrong_password_fails() {
        let auth = service();
        auth.register(registration("viewer", "viewerpass123")).unwrap();

        let err = auth
            .login(Credentials {
                username: "viewer".to_string(),
                password: "nope".to_string(),
            })
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[test]
    fn login_of_unknown_user_fails() {
        let err = service()
            .login(Credentials {
                username: "ghost".to_string(),
                password: "pw".to_string(),
            })
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[test]
    fn unknown_or_empty_token_is_unauthenticated() {
        let auth = service();
        assert!(matches!(
            auth.authenticate("deadbeef").unwrap_err(),
            DomainError::Unauthenticated
        ));
        assert!(matches!(
            auth.authenticate("").unwrap_err(),
            DomainError::Unauthenticated
        ));
    }
}
