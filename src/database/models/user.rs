use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Normal,
    Subscriber,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Normal => "NORMAL",
            UserRole::Subscriber => "SUBSCRIBER",
            UserRole::Admin => "ADMIN",
        }
    }
}

impl FromStr for UserRole {
    type Err = ApiError;

    /// Exact, case-sensitive match against the three role names
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "NORMAL" => Ok(UserRole::Normal),
            "SUBSCRIBER" => Ok(UserRole::Subscriber),
            "ADMIN" => Ok(UserRole::Admin),
            _ => Err(ApiError::validation_error("Invalid user role", None)),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a role string, failing with a validation error for anything unknown
pub fn string_to_user_role(input: &str) -> Result<UserRole, ApiError> {
    input.parse()
}

/// Persisted user record. `password` holds the hash and never leaves the crate boundary.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub nickname: String,
    pub password: String,
    pub role: UserRole,
}

#[derive(Debug, Default, Deserialize)]
pub struct SignupInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub nickname: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// User as exposed to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserOutput {
    pub id: String,
    pub name: String,
    pub email: String,
    pub nickname: String,
    pub role: UserRole,
}

impl From<User> for UserOutput {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            nickname: user.nickname,
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenOutput {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_round_trip() {
        for role in [UserRole::Normal, UserRole::Subscriber, UserRole::Admin] {
            assert_eq!(string_to_user_role(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn unknown_roles_are_validation_errors() {
        for input in ["", "admin", "Normal", "SUPERUSER", " ADMIN", "ADMIN ", "NORMAL\n"] {
            match string_to_user_role(input) {
                Err(ApiError::ValidationError { message, .. }) => {
                    assert_eq!(message, "Invalid user role")
                }
                other => panic!("expected validation error for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn output_omits_password() {
        let user = User {
            id: "u1".to_string(),
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            nickname: "a".to_string(),
            password: "$argon2id$v=19$secret".to_string(),
            role: UserRole::Subscriber,
        };
        let value = serde_json::to_value(UserOutput::from(user)).unwrap();

        assert!(value.get("password").is_none());
        assert_eq!(value["role"], "SUBSCRIBER");
    }
}
