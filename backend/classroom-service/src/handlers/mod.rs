/// HTTP handlers, kept thin: validate, call the service layer, serialize
pub mod auth;
pub mod courses;
pub mod health;
pub mod users;
