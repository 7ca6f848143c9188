//! Bearer-token checks for staff-only endpoints.
//!
//! Tokens are issued elsewhere in the course platform; this module only
//! verifies them and checks the caller's role.

use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while authorizing a request
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Token has expired")]
    Expired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("User not found")]
    UnknownUser,

    #[error("Not authorized, {0} access required")]
    Forbidden(String),

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

impl AuthError {
    /// HTTP status used when this error reaches the boundary
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::MissingToken => 401,
            AuthError::UnsupportedAlgorithm(_) => 500,
            _ => 403,
        }
    }
}

/// Course roles as stored in the `roles` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "role_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RoleType {
    Prof,
    Student,
    Ta,
}

impl RoleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleType::Prof => "prof",
            RoleType::Student => "student",
            RoleType::Ta => "ta",
        }
    }
}

/// Claims carried by course platform access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Verifies signed access tokens
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str, algorithm: &str) -> Result<Self, AuthError> {
        let algorithm = Algorithm::from_str(algorithm)
            .map_err(|_| AuthError::UnsupportedAlgorithm(algorithm.to_string()))?;

        Ok(Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(algorithm),
        })
    }

    /// Decode and validate a token, returning its claims
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        if data.claims.sub.is_empty() {
            return Err(AuthError::InvalidToken("Invalid token payload".to_string()));
        }

        Ok(data.claims)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    header
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)
}

/// Check that a looked-up role is one of the allowed ones
pub fn ensure_role(role: Option<RoleType>, allowed: &[RoleType]) -> Result<RoleType, AuthError> {
    let role = role.ok_or(AuthError::UnknownUser)?;
    if allowed.contains(&role) {
        Ok(role)
    } else {
        let names: Vec<&str> = allowed.iter().map(RoleType::as_str).collect();
        Err(AuthError::Forbidden(names.join(" or ")))
    }
}
