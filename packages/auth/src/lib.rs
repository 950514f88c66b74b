// ABOUTME: Dayboard authentication library: password hashing and bearer tokens
// ABOUTME: Storage-agnostic; the API layer wires it to user records

pub mod error;
pub mod password;
pub mod token;

pub use error::{AuthError, AuthResult};
pub use password::{
    hash_password, normalize_email, validate_email, validate_password, verify_password,
};
pub use token::{Claims, TokenIssuer};
