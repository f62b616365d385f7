use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::auth::application::domain::entities::{User, UserRole};
use crate::auth::application::ports::outgoing::user_repository::{
    UserChanges, UserRepository, UserRepositoryError,
};

// ========================= Request =========================
#[derive(Debug, Clone)]
pub struct UpdateUserRequest {
    changes: UserChanges,
}

#[derive(Debug, Clone)]
pub enum UpdateUserRequestError {
    EmptyUpdate,
    EmptyFirstName,
    EmptyLastName,
    UnknownRole(String),
}

impl std::fmt::Display for UpdateUserRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateUserRequestError::EmptyUpdate => write!(f, "No fields to update"),
            UpdateUserRequestError::EmptyFirstName => write!(f, "First name cannot be empty"),
            UpdateUserRequestError::EmptyLastName => write!(f, "Last name cannot be empty"),
            UpdateUserRequestError::UnknownRole(role) => write!(f, "Unknown role: {}", role),
        }
    }
}

impl std::error::Error for UpdateUserRequestError {}

impl UpdateUserRequest {
    pub fn new(
        first_name: Option<String>,
        last_name: Option<String>,
        role: Option<String>,
        is_verified: Option<bool>,
    ) -> Result<Self, UpdateUserRequestError> {
        let first_name = match first_name {
            Some(name) => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(UpdateUserRequestError::EmptyFirstName);
                }
                Some(name)
            }
            None => None,
        };

        let last_name = match last_name {
            Some(name) => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(UpdateUserRequestError::EmptyLastName);
                }
                Some(name)
            }
            None => None,
        };

        let role = match role {
            Some(role) => Some(
                UserRole::from_str(&role)
                    .ok_or(UpdateUserRequestError::UnknownRole(role))?,
            ),
            None => None,
        };

        // Admins are always verified; a promotion carries the flag with it.
        let is_verified = if role == Some(UserRole::Admin) {
            Some(true)
        } else {
            is_verified
        };

        let changes = UserChanges {
            first_name,
            last_name,
            role,
            is_verified,
        };

        if changes.first_name.is_none()
            && changes.last_name.is_none()
            && changes.role.is_none()
            && changes.is_verified.is_none()
        {
            return Err(UpdateUserRequestError::EmptyUpdate);
        }

        Ok(Self { changes })
    }

    pub fn changes(&self) -> &UserChanges {
        &self.changes
    }
}

impl<'de> Deserialize<'de> for UpdateUserRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Helper {
            first_name: Option<String>,
            last_name: Option<String>,
            role: Option<String>,
            is_verified: Option<bool>,
        }

        let helper = Helper::deserialize(deserializer)?;
        UpdateUserRequest::new(
            helper.first_name,
            helper.last_name,
            helper.role,
            helper.is_verified,
        )
        .map_err(serde::de::Error::custom)
    }
}

// ========================= Error =========================
#[derive(Debug, Clone)]
pub enum UpdateUserError {
    UserNotFound,
    RepositoryError(String),
}

impl std::fmt::Display for UpdateUserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateUserError::UserNotFound => write!(f, "User not found"),
            UpdateUserError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for UpdateUserError {}

// ========================= Use Case =========================
#[async_trait]
pub trait IUpdateUserUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        request: UpdateUserRequest,
    ) -> Result<User, UpdateUserError>;
}

pub struct UpdateUserUseCase<R>
where
    R: UserRepository,
{
    repository: R,
}

impl<R> UpdateUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> IUpdateUserUseCase for UpdateUserUseCase<R>
where
    R: UserRepository + Send + Sync,
{
    async fn execute(
        &self,
        user_id: Uuid,
        request: UpdateUserRequest,
    ) -> Result<User, UpdateUserError> {
        let user = self
            .repository
            .update_user(user_id, request.changes().clone())
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => UpdateUserError::UserNotFound,
                other => UpdateUserError::RepositoryError(other.to_string()),
            })?;

        tracing::info!(user_id = %user_id, "User updated by admin");

        Ok(user)
    }
}
