use async_trait::async_trait;

use crate::auth::application::ports::outgoing::user_query::{UserQuery, UserStats};

#[derive(Debug, Clone)]
pub enum DashboardStatsError {
    QueryError(String),
}

impl std::fmt::Display for DashboardStatsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DashboardStatsError::QueryError(msg) => write!(f, "Query error: {}", msg),
        }
    }
}

impl std::error::Error for DashboardStatsError {}

#[async_trait]
pub trait IDashboardStatsUseCase: Send + Sync {
    async fn execute(&self) -> Result<UserStats, DashboardStatsError>;
}

pub struct DashboardStatsUseCase<Q>
where
    Q: UserQuery,
{
    query: Q,
}

impl<Q> DashboardStatsUseCase<Q>
where
    Q: UserQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> IDashboardStatsUseCase for DashboardStatsUseCase<Q>
where
    Q: UserQuery + Send + Sync,
{
    async fn execute(&self) -> Result<UserStats, DashboardStatsError> {
        self.query
            .count_stats()
            .await
            .map_err(|e| DashboardStatsError::QueryError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::ports::outgoing::mocks::MockUserQueryPort;

    #[tokio::test]
    async fn test_returns_counters() {
        let mut query = MockUserQueryPort::new();
        query.expect_count_stats().returning(|| {
            Ok(UserStats {
                total_users: 10,
                verified_users: 7,
                kyc_pending: 2,
                kyc_approved: 3,
                kyc_rejected: 1,
                wallets_connected: 4,
            })
        });

        let use_case = DashboardStatsUseCase::new(query);
        let stats = use_case.execute().await.unwrap();

        assert_eq!(stats.total_users, 10);
        assert_eq!(stats.kyc_pending, 2);
    }
}
