use async_trait::async_trait;

use crate::auth::application::domain::entities::User;
use crate::auth::application::ports::outgoing::user_query::UserQuery;

#[derive(Debug, Clone)]
pub enum ListUsersError {
    QueryError(String),
}

impl std::fmt::Display for ListUsersError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListUsersError::QueryError(msg) => write!(f, "Query error: {}", msg),
        }
    }
}

impl std::error::Error for ListUsersError {}

#[async_trait]
pub trait IListUsersUseCase: Send + Sync {
    async fn execute(&self) -> Result<Vec<User>, ListUsersError>;
}

pub struct ListUsersUseCase<Q>
where
    Q: UserQuery,
{
    query: Q,
}

impl<Q> ListUsersUseCase<Q>
where
    Q: UserQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> IListUsersUseCase for ListUsersUseCase<Q>
where
    Q: UserQuery + Send + Sync,
{
    async fn execute(&self) -> Result<Vec<User>, ListUsersError> {
        self.query
            .list_all()
            .await
            .map_err(|e| ListUsersError::QueryError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::test_fixtures::sample_user;
    use crate::auth::application::ports::outgoing::mocks::MockUserQueryPort;
    use crate::auth::application::ports::outgoing::user_query::UserQueryError;

    #[tokio::test]
    async fn test_lists_users() {
        let users = vec![sample_user(), sample_user()];

        let mut query = MockUserQueryPort::new();
        query.expect_list_all().returning(move || Ok(users.clone()));

        let use_case = ListUsersUseCase::new(query);

        assert_eq!(use_case.execute().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_query_error_propagates() {
        let mut query = MockUserQueryPort::new();
        query
            .expect_list_all()
            .returning(|| Err(UserQueryError::DatabaseError("down".to_string())));

        let use_case = ListUsersUseCase::new(query);

        assert!(matches!(
            use_case.execute().await,
            Err(ListUsersError::QueryError(_))
        ));
    }
}
