/// Security module: password hashing, JWT lifecycle and authorization policy
pub mod jwt;
pub mod password;
pub mod policy;

pub use jwt::{AccessTokenResponse, Claims, TokenPair};
pub use password::{hash_password, verify_password};
