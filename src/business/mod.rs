pub mod music;
pub mod playlist;
pub mod user;

pub use music::MusicBusiness;
pub use playlist::PlaylistBusiness;
pub use user::UserBusiness;

use std::collections::HashMap;

use crate::auth::AuthenticationData;
use crate::error::ApiError;

/// Collects missing or blank required fields into a single validation error
#[derive(Default)]
pub(crate) struct RequiredFields {
    field_errors: HashMap<String, String>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the trimmed value, recording a field error when it is absent or blank
    pub fn take<'a>(&mut self, field: &str, value: &'a Option<String>) -> &'a str {
        match value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => v,
            _ => {
                self.missing(field);
                ""
            }
        }
    }

    /// Like `take` but keeps surrounding whitespace, for secrets
    pub fn take_raw<'a>(&mut self, field: &str, value: &'a Option<String>) -> &'a str {
        match value.as_deref() {
            Some(v) if !v.is_empty() => v,
            _ => {
                self.missing(field);
                ""
            }
        }
    }

    fn missing(&mut self, field: &str) {
        self.field_errors
            .insert(field.to_string(), "This field is required".to_string());
    }

    pub fn finish(self) -> Result<(), ApiError> {
        if self.field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error(
                "Missing required fields",
                Some(self.field_errors),
            ))
        }
    }
}

/// Trimmed optional text, with blanks collapsed to `None`
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Owners may act on their own resources; ADMIN may act on anyone's
pub(crate) fn ensure_owner_or_admin(
    auth: &AuthenticationData,
    owner_id: &str,
    resource: &str,
) -> Result<(), ApiError> {
    if auth.is_admin() || auth.id == owner_id {
        return Ok(());
    }

    tracing::warn!(
        "Authorization denied: user '{}' ({}) does not own {} of '{}'",
        auth.id,
        auth.role,
        resource,
        owner_id
    );
    Err(ApiError::forbidden(format!(
        "Only the owner or an admin can modify this {}",
        resource
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::UserRole;

    #[test]
    fn collects_every_missing_field() {
        let mut required = RequiredFields::new();
        let title_value = Some("  Song ".to_string());
        let title = required.take("title", &title_value);
        required.take("author", &None);
        required.take("file", &Some("   ".to_string()));

        assert_eq!(title, "Song");
        match required.finish() {
            Err(ApiError::ValidationError {
                field_errors: Some(fields),
                ..
            }) => {
                assert_eq!(fields.len(), 2);
                assert!(fields.contains_key("author"));
                assert!(fields.contains_key("file"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn owner_or_admin_matrix() {
        let cases = [
            (UserRole::Normal, "owner", true),
            (UserRole::Subscriber, "owner", true),
            (UserRole::Admin, "owner", true),
            (UserRole::Normal, "other", false),
            (UserRole::Subscriber, "other", false),
            (UserRole::Admin, "other", true),
        ];

        for (role, caller, allowed) in cases {
            let auth = AuthenticationData::new(caller, role);
            let result = ensure_owner_or_admin(&auth, "owner", "music");
            match (allowed, result) {
                (true, Ok(())) => {}
                (false, Err(ApiError::Forbidden(_))) => {}
                (_, other) => panic!("{:?} as {}: unexpected {:?}", role, caller, other),
            }
        }
    }

    #[test]
    fn blank_optional_text_is_none() {
        assert_eq!(optional_text(Some("  ".to_string())), None);
        assert_eq!(optional_text(Some(" Album ".to_string())), Some("Album".to_string()));
        assert_eq!(optional_text(None), None);
    }
}
