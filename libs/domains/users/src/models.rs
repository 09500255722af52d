use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// User account - owner, booker or commenter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Email address (unique across all users)
    pub email: String,
}

/// DTO for registering a new user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
}

/// DTO for partially updating a user
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

impl User {
    /// Apply a partial update, leaving absent fields untouched
    pub fn apply_update(&mut self, update: UpdateUser) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_update_changes_only_provided_fields() {
        let mut user = User {
            id: 1,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        };

        user.apply_update(UpdateUser {
            name: Some("Alicia".to_string()),
            email: None,
        });

        assert_eq!(user.name, "Alicia");
        assert_eq!(user.email, "alice@example.com");
    }

    #[test]
    fn create_user_rejects_invalid_email() {
        let input = CreateUser {
            name: "Bob".to_string(),
            email: "not-an-email".to_string(),
        };

        assert!(input.validate().is_err());
    }

    #[test]
    fn update_user_allows_all_fields_absent() {
        let input = UpdateUser::default();
        assert!(input.validate().is_ok());
    }
}
