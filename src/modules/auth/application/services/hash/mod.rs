pub mod reset_token;

pub use reset_token::{generate_reset_token, hash_token};
