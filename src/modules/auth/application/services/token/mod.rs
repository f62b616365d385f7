pub mod token_config;
pub mod token_service;

pub use token_config::TokenConfig;
pub use token_service::TokenService;
