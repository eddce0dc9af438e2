//! Credential handling: password hashing, session tokens, and the cookie
//! that carries them.

pub mod cookie;
pub mod password;
pub mod token;

pub use token::{Claims, TokenService};
