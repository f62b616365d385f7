#[cfg(test)]
pub mod mocks;
pub mod password_hasher;
pub mod token_provider;
pub mod user_query;
pub mod user_repository;
pub mod wallet_verifier;

pub use password_hasher::{HashError, PasswordHasher};
pub use token_provider::{TokenClaims, TokenError, TokenProvider, TokenPurpose};
pub use user_query::{UserQuery, UserQueryError};
pub use user_repository::{UserRepository, UserRepositoryError};
