use std::sync::Arc;

use crate::auth::{AuthenticationData, Authenticator};
use crate::business::RequiredFields;
use crate::database::models::{string_to_user_role, LoginInput, SignupInput, User, UserOutput};
use crate::database::UserDatabase;
use crate::error::ApiError;
use crate::services::{HashManager, IdGenerator};

pub struct UserBusiness {
    id_generator: Arc<IdGenerator>,
    authenticator: Arc<Authenticator>,
    hash_manager: Arc<HashManager>,
    user_database: Arc<dyn UserDatabase>,
}

impl UserBusiness {
    pub fn new(
        id_generator: Arc<IdGenerator>,
        authenticator: Arc<Authenticator>,
        hash_manager: Arc<HashManager>,
        user_database: Arc<dyn UserDatabase>,
    ) -> Self {
        Self {
            id_generator,
            authenticator,
            hash_manager,
            user_database,
        }
    }

    /// Register a new user and return a session token for them
    pub async fn signup(&self, input: SignupInput) -> Result<String, ApiError> {
        let mut required = RequiredFields::new();
        let name = required.take("name", &input.name);
        let email = required.take("email", &input.email);
        let nickname = required.take("nickname", &input.nickname);
        let password = required.take_raw("password", &input.password);
        let role = required.take_raw("role", &input.role);
        required.finish()?;

        validate_email_format(email)?;
        let role = string_to_user_role(role)?;

        if self.user_database.get_user_by_email(email).await?.is_some() {
            return Err(ApiError::conflict("Email already registered"));
        }

        let user = User {
            id: self.id_generator.generate(),
            name: name.to_string(),
            email: email.to_string(),
            nickname: nickname.to_string(),
            password: self.hash_manager.hash(password)?,
            role,
        };
        self.user_database.create_user(&user).await?;
        tracing::info!("User signed up: {} ({})", user.id, user.role);

        let token = self
            .authenticator
            .generate_token(&AuthenticationData::new(user.id, role))?;
        Ok(token)
    }

    /// Exchange credentials for a session token
    pub async fn login(&self, input: LoginInput) -> Result<String, ApiError> {
        let mut required = RequiredFields::new();
        let email = required.take("email", &input.email);
        let password = required.take_raw("password", &input.password);
        required.finish()?;

        let user = match self.user_database.get_user_by_email(email).await? {
            Some(user) if self.hash_manager.compare(password, &user.password) => user,
            _ => {
                tracing::warn!("Failed login attempt for {}", email);
                return Err(ApiError::unauthorized("Invalid credentials"));
            }
        };

        tracing::info!("User logged in: {}", user.id);
        let token = self
            .authenticator
            .generate_token(&AuthenticationData::new(user.id, user.role))?;
        Ok(token)
    }

    /// The current user, without credentials
    pub async fn get_profile(&self, token: &str) -> Result<UserOutput, ApiError> {
        let auth = self.authenticator.get_token_data(token)?;
        let user = self
            .user_database
            .get_user_by_id(&auth.id)
            .await?
            .ok_or_else(|| ApiError::not_found("User not found"))?;
        Ok(UserOutput::from(user))
    }
}

fn validate_email_format(email: &str) -> Result<(), ApiError> {
    let invalid = || ApiError::validation_error("Invalid email format", None);

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || email.chars().any(char::is_whitespace)
    {
        return Err(invalid());
    }
    Ok(())
}
