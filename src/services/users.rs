//! Authentication and user service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{Capability, User, UserClaims, UserInfo},
    repository::Repository,
};

/// Issued bearer token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: UserClaims,
}

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate by username and password and open a new session
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<IssuedToken> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !user.is_active {
            return Err(AppError::Authentication("Account is disabled".to_string()));
        }

        if !verify_password(&user.password_hash, password)? {
            return Err(AppError::Authentication("Invalid username or password".to_string()));
        }

        let capabilities = self.repository.users.get_capabilities(user.id).await?;
        let issued = self.issue_token(&user, capabilities)?;

        tracing::info!("User {} logged in (session {})", user.username, issued.claims.sid);
        Ok(issued)
    }

    fn issue_token(&self, user: &User, capabilities: Vec<Capability>) -> AppResult<IssuedToken> {
        let now = Utc::now().timestamp();
        let exp = now + self.session_ttl_seconds() as i64;

        let claims = UserClaims {
            sub: user.username.clone(),
            user_id: user.id,
            sid: Uuid::new_v4(),
            capabilities,
            exp,
            iat: now,
        };

        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        Ok(IssuedToken { token, claims })
    }

    /// Lifetime of tokens and of their session state
    pub fn session_ttl_seconds(&self) -> u64 {
        self.config.jwt_expiration_hours * 3600
    }

    /// Current user information
    pub async fn me(&self, claims: &UserClaims) -> AppResult<UserInfo> {
        let user = self.repository.users.get_by_id(claims.user_id).await?;
        Ok(UserInfo {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            capabilities: claims.capabilities.clone(),
        })
    }

    /// Create the configured administrator with every capability if missing
    pub async fn ensure_admin(&self) -> AppResult<()> {
        let (Some(username), Some(password)) =
            (&self.config.admin_username, &self.config.admin_password)
        else {
            return Ok(());
        };

        if self.repository.users.get_by_username(username).await?.is_some() {
            return Ok(());
        }

        let hash = hash_password(password)?;
        let user = self.repository.users.create(username, &hash).await?;
        for capability in Capability::ALL {
            self.repository.users.grant(user.id, capability).await?;
        }

        tracing::info!("Administrator account '{}' created", username);
        Ok(())
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a password against a stored Argon2 hash
pub fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
