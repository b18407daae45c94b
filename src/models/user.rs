//! User model, capabilities and token claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;

/// Named permission grants checked before privileged operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// See every borrowed book instance
    CanViewAllBorrowedBooks,
    /// Renew loans on behalf of borrowers
    CanManageLoans,
    /// Edit authors, books, genres, languages and instances
    CanManageCatalog,
}

impl Capability {
    pub const ALL: [Capability; 3] = [
        Capability::CanViewAllBorrowedBooks,
        Capability::CanManageLoans,
        Capability::CanManageCatalog,
    ];

    /// Codename as stored in the `permissions` table
    pub fn codename(&self) -> &'static str {
        match self {
            Capability::CanViewAllBorrowedBooks => "can_view_all_borrowed_books",
            Capability::CanManageLoans => "can_manage_loans",
            Capability::CanManageCatalog => "can_manage_catalog",
        }
    }

    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            Capability::CanViewAllBorrowedBooks => "one can view all borrowed books",
            Capability::CanManageLoans => "one can manage loans",
            Capability::CanManageCatalog => "one can manage the catalog",
        }
    }
}

impl std::str::FromStr for Capability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .into_iter()
            .find(|c| c.codename() == s)
            .ok_or_else(|| format!("Unknown capability: {}", s))
    }
}

/// User model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub crea_date: DateTime<Utc>,
}

/// JWT Claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    /// Session identifier, fresh for every login
    pub sid: Uuid,
    pub capabilities: Vec<Capability>,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    // Authorization checks
    pub fn require_capability(&self, capability: Capability) -> Result<(), AppError> {
        if self.has_capability(capability) {
            Ok(())
        } else {
            Err(AppError::Authorization(format!(
                "Missing permission: {}",
                capability.codename()
            )))
        }
    }
}

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Current user information
#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfo {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub capabilities: Vec<Capability>,
}
