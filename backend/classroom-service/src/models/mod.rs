/// Data models for accounts, courses, and the assistant chat
pub mod course;
pub mod user;

pub use course::{
    ChatRequest, ChatResponse, Course, CourseResponse, CreateCourseRequest, UpdateCourseRequest,
};
pub use user::{
    LoginRequest, LogoutRequest, RefreshTokenRequest, RegisterRequest, Role, UpdatePasswordRequest,
    UpdateProfileRequest, User, UserResponse,
};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Plain confirmation body for operations without a richer payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
