use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::ports::outgoing::user_repository::{
    UserRepository, UserRepositoryError,
};

#[derive(Debug, Clone)]
pub enum DeleteUserError {
    SelfDeleteForbidden,
    UserNotFound,
    RepositoryError(String),
}

impl std::fmt::Display for DeleteUserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteUserError::SelfDeleteForbidden => {
                write!(f, "Admins cannot delete their own account")
            }
            DeleteUserError::UserNotFound => write!(f, "User not found"),
            DeleteUserError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for DeleteUserError {}

#[async_trait]
pub trait IDeleteUserUseCase: Send + Sync {
    async fn execute(&self, acting_admin: Uuid, target: Uuid) -> Result<(), DeleteUserError>;
}

/// Hard delete. The self-delete guard keeps the last admin from locking
/// everyone out of the admin surface.
pub struct DeleteUserUseCase<R>
where
    R: UserRepository,
{
    repository: R,
}

impl<R> DeleteUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> IDeleteUserUseCase for DeleteUserUseCase<R>
where
    R: UserRepository + Send + Sync,
{
    async fn execute(&self, acting_admin: Uuid, target: Uuid) -> Result<(), DeleteUserError> {
        if acting_admin == target {
            return Err(DeleteUserError::SelfDeleteForbidden);
        }

        self.repository
            .delete_user(target)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => DeleteUserError::UserNotFound,
                other => DeleteUserError::RepositoryError(other.to_string()),
            })?;

        tracing::info!(admin_id = %acting_admin, user_id = %target, "User deleted by admin");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::ports::outgoing::mocks::MockUserRepositoryPort;

    #[tokio::test]
    async fn test_delete_success() {
        let target = Uuid::new_v4();

        let mut repository = MockUserRepositoryPort::new();
        repository
            .expect_delete_user()
            .times(1)
            .withf(move |id| *id == target)
            .returning(|_| Ok(()));

        let use_case = DeleteUserUseCase::new(repository);

        assert!(use_case.execute(Uuid::new_v4(), target).await.is_ok());
    }

    #[tokio::test]
    async fn test_self_delete_forbidden() {
        // No expectation set: the repository must never be reached.
        let use_case = DeleteUserUseCase::new(MockUserRepositoryPort::new());
        let admin = Uuid::new_v4();

        let result = use_case.execute(admin, admin).await;

        assert!(matches!(result, Err(DeleteUserError::SelfDeleteForbidden)));
    }

    #[tokio::test]
    async fn test_delete_unknown_user() {
        let mut repository = MockUserRepositoryPort::new();
        repository
            .expect_delete_user()
            .returning(|_| Err(UserRepositoryError::UserNotFound));

        let use_case = DeleteUserUseCase::new(repository);

        let result = use_case.execute(Uuid::new_v4(), Uuid::new_v4()).await;

        assert!(matches!(result, Err(DeleteUserError::UserNotFound)));
    }
}
