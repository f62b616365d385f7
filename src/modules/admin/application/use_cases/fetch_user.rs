use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::User;
use crate::auth::application::ports::outgoing::user_query::UserQuery;

#[derive(Debug, Clone)]
pub enum FetchUserError {
    UserNotFound,
    QueryError(String),
}

impl std::fmt::Display for FetchUserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchUserError::UserNotFound => write!(f, "User not found"),
            FetchUserError::QueryError(msg) => write!(f, "Query error: {}", msg),
        }
    }
}

impl std::error::Error for FetchUserError {}

#[async_trait]
pub trait IFetchUserUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid) -> Result<User, FetchUserError>;
}

pub struct FetchUserUseCase<Q>
where
    Q: UserQuery,
{
    query: Q,
}

impl<Q> FetchUserUseCase<Q>
where
    Q: UserQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> IFetchUserUseCase for FetchUserUseCase<Q>
where
    Q: UserQuery + Send + Sync,
{
    async fn execute(&self, user_id: Uuid) -> Result<User, FetchUserError> {
        self.query
            .find_by_id(user_id)
            .await
            .map_err(|e| FetchUserError::QueryError(e.to_string()))?
            .ok_or(FetchUserError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::test_fixtures::sample_user;
    use crate::auth::application::ports::outgoing::mocks::MockUserQueryPort;

    #[tokio::test]
    async fn test_fetch_existing_user() {
        let user = sample_user();
        let user_id = user.id;

        let mut query = MockUserQueryPort::new();
        query
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));

        let use_case = FetchUserUseCase::new(query);

        assert_eq!(use_case.execute(user_id).await.unwrap().id, user_id);
    }

    #[tokio::test]
    async fn test_fetch_unknown_user() {
        let mut query = MockUserQueryPort::new();
        query.expect_find_by_id().returning(|_| Ok(None));

        let use_case = FetchUserUseCase::new(query);

        assert!(matches!(
            use_case.execute(Uuid::new_v4()).await,
            Err(FetchUserError::UserNotFound)
        ));
    }
}
