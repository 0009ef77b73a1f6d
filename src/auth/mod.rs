use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::database::models::UserRole;
use crate::error::ApiError;

/// Identity carried inside a session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationData {
    pub id: String,
    pub role: UserRole,
}

impl AuthenticationData {
    pub fn new(id: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    /// Kept as a string so a foreign role is reported as a validation error, not a decode failure
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(data: &AuthenticationData, expires_in: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: data.id.clone(),
            role: data.role.as_str().to_string(),
            exp: (now + expires_in).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    InvalidSecret,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
        }
    }
}

impl std::error::Error for JwtError {}

/// Issues and verifies HS256 session tokens
pub struct Authenticator {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in: Duration,
}

impl Authenticator {
    pub fn new(secret: &str, expires_in: Duration) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }

        let mut validation = Validation::default();
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expires_in,
        })
    }

    pub fn generate_token(&self, data: &AuthenticationData) -> Result<String, JwtError> {
        let claims = Claims::new(data, self.expires_in);
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }

    /// Verify signature and expiry, then validate the embedded role
    pub fn get_token_data(&self, token: &str) -> Result<AuthenticationData, ApiError> {
        if token.trim().is_empty() {
            return Err(ApiError::unauthorized("Missing authorization token"));
        }

        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!("Rejected token: {}", e);
                ApiError::unauthorized("Invalid or expired token")
            })?;

        let role = token_data.claims.role.parse::<UserRole>()?;
        Ok(AuthenticationData {
            id: token_data.claims.id,
            role,
        })
    }
}
