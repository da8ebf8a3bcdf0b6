//! Credentials and bearer tokens.
//!
//! - [`password`]: SHA-256 password digests as stored in `users.password_hash`.
//! - [`token`]: HS256-signed access tokens carrying the user id.

pub mod password;
pub mod token;

pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenError, TokenSigner};
