use std::sync::Arc;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User};
use crate::repository::UserRepository;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new user
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: i64) -> UserResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// List all users
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.find_all().await
    }

    /// Partially update a user
    pub async fn update_user(&self, id: i64, input: UpdateUser) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Delete a user
    pub async fn delete_user(&self, id: i64) -> UserResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(UserError::NotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use mockall::predicate::eq;

    fn sample_user(id: i64) -> User {
        User {
            id,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn create_user_rejects_invalid_email() {
        let mock_repo = MockUserRepository::new();
        let service = UserService::new(mock_repo);

        let result = service
            .create_user(CreateUser {
                name: "Alice".to_string(),
                email: "broken".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserError::Validation(_))));
    }

    #[tokio::test]
    async fn create_user_passes_valid_input_to_repository() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_create()
            .returning(|input| {
                Ok(User {
                    id: 1,
                    name: input.name,
                    email: input.email,
                })
            })
            .times(1);

        let service = UserService::new(mock_repo);
        let user = service
            .create_user(CreateUser {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.email, "alice@example.com");
    }

    #[tokio::test]
    async fn get_user_maps_missing_row_to_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(42))
            .returning(|_| Ok(None));

        let service = UserService::new(mock_repo);
        let result = service.get_user(42).await;

        assert!(matches!(result, Err(UserError::NotFound(42))));
    }

    #[tokio::test]
    async fn get_user_returns_existing_user() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(7))
            .returning(|id| Ok(Some(sample_user(id))));

        let service = UserService::new(mock_repo);
        let user = service.get_user(7).await.unwrap();

        assert_eq!(user.id, 7);
    }

    #[tokio::test]
    async fn delete_user_maps_missing_row_to_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_delete().with(eq(9)).returning(|_| Ok(false));

        let service = UserService::new(mock_repo);
        let result = service.delete_user(9).await;

        assert!(matches!(result, Err(UserError::NotFound(9))));
    }

    #[tokio::test]
    async fn update_user_rejects_invalid_email() {
        let mock_repo = MockUserRepository::new();
        let service = UserService::new(mock_repo);

        let result = service
            .update_user(
                1,
                UpdateUser {
                    name: None,
                    email: Some("nope".to_string()),
                },
            )
            .await;

        assert!(matches!(result, Err(UserError::Validation(_))));
    }
}
