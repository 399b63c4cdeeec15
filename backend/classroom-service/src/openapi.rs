use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::models::{
    ChatRequest, ChatResponse, CourseResponse, CreateCourseRequest, LoginRequest, LogoutRequest,
    MessageResponse, RefreshTokenRequest, RegisterRequest, Role, UpdateCourseRequest,
    UpdatePasswordRequest, UpdateProfileRequest, UserResponse,
};
use crate::security::jwt::{AccessTokenResponse, TokenPair};

/// OpenAPI document covering the REST endpoints of the classroom service
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth::register,
        crate::handlers::auth::login,
        crate::handlers::auth::refresh,
        crate::handlers::auth::logout,
        crate::handlers::users::get_user,
        crate::handlers::users::update_user,
        crate::handlers::users::update_password,
        crate::handlers::courses::list_courses,
        crate::handlers::courses::list_own_courses,
        crate::handlers::courses::create_course,
        crate::handlers::courses::update_course,
        crate::handlers::courses::chat_with_course
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        RefreshTokenRequest,
        LogoutRequest,
        UpdateProfileRequest,
        UpdatePasswordRequest,
        CreateCourseRequest,
        UpdateCourseRequest,
        ChatRequest,
        Role,
        UserResponse,
        CourseResponse,
        ChatResponse,
        TokenPair,
        AccessTokenResponse,
        MessageResponse,
        ErrorResponse
    )),
    tags(
        (name = "Auth", description = "Registration, login and token lifecycle"),
        (name = "Users", description = "Profile and password management"),
        (name = "Courses", description = "Course catalog, authoring and chat")
    )
)]
pub struct ApiDoc;
