//! Classroom Service Library
//!
//! Authentication, session lifecycle and role-scoped course management for
//! the Campus platform.
//!
//! ## Modules
//!
//! - `config`: Service configuration from environment
//! - `db`: Database access (users, courses, token revocation)
//! - `error`: Error taxonomy and HTTP mapping
//! - `handlers`: HTTP handlers
//! - `middleware`: JWT authentication middleware
//! - `models`: Data models and request/response types
//! - `openapi`: OpenAPI document
//! - `routes`: Route table
//! - `security`: JWT lifecycle, password hashing, authorization policy
//! - `services`: Business logic (auth, users, courses, assistant)

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod security;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{Course, Role, User};
