use chrono::Duration;
use std::sync::Arc;

use crate::auth::Authenticator;
use crate::database::models::{SignupInput, UserRole};
use crate::database::MemoryDatabase;
use crate::state::AppState;

pub const TEST_SECRET: &str = "musicbox-test-secret";

/// Application state over a fresh in-memory store
pub struct TestContext {
    pub state: AppState,
    pub database: Arc<MemoryDatabase>,
    pub authenticator: Arc<Authenticator>,
}

impl TestContext {
    pub fn new() -> Self {
        let database = Arc::new(MemoryDatabase::new());
        let authenticator = Arc::new(
            Authenticator::new(TEST_SECRET, Duration::hours(1))
                .expect("test secret is non-empty"),
        );
        let state = AppState::from_database(database.clone(), authenticator.clone());

        Self {
            state,
            database,
            authenticator,
        }
    }

    /// Sign up a user with a unique email, returning its token and id
    pub async fn signup_as(&self, role: UserRole) -> (String, String) {
        let email = format!("{}@musicbox.test", uuid::Uuid::new_v4().simple());
        let token = self
            .state
            .users
            .signup(SignupInput {
                name: Some("Test User".to_string()),
                email: Some(email),
                nickname: Some("tester".to_string()),
                password: Some("pw123".to_string()),
                role: Some(role.as_str().to_string()),
            })
            .await
            .expect("signup succeeds");

        let id = self
            .authenticator
            .get_token_data(&token)
            .expect("fresh token decodes")
            .id;
        (token, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn signups_get_distinct_ids() {
        let ctx = TestContext::new();
        let (_, first) = ctx.signup_as(UserRole::Normal).await;
        let (_, second) = ctx.signup_as(UserRole::Normal).await;
        assert_ne!(first, second);
    }
}
