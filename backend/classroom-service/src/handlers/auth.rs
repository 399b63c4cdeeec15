/// Authentication handlers
use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::error::{ErrorResponse, Result};
use crate::models::{
    LoginRequest, LogoutRequest, MessageResponse, RefreshTokenRequest, RegisterRequest,
    UserResponse,
};
use crate::security::jwt::{AccessTokenResponse, TokenPair};
use crate::services::AuthService;

/// Register endpoint handler
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid input or duplicate email", body = ErrorResponse)
    )
)]
pub async fn register(
    service: web::Data<AuthService>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    let request = payload.into_inner();
    request.validate()?;

    let user = service.register(request).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Login endpoint handler
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token pair issued", body = TokenPair),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    service: web::Data<AuthService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let request = payload.into_inner();
    request.validate()?;

    let tokens = service.login(request).await?;
    Ok(HttpResponse::Ok().json(tokens))
}

/// Refresh endpoint handler. The presented refresh token stays valid.
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    tag = "Auth",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "New access token", body = AccessTokenResponse),
        (status = 401, description = "Refresh token revoked, expired or malformed", body = ErrorResponse)
    )
)]
pub async fn refresh(
    service: web::Data<AuthService>,
    payload: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse> {
    let renewed = service.refresh(&payload.refresh_token).await?;
    Ok(HttpResponse::Ok().json(renewed))
}

/// Logout endpoint handler. Authenticates by the refresh token itself.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Auth",
    request_body = LogoutRequest,
    responses(
        (status = 200, description = "Refresh token revoked", body = MessageResponse),
        (status = 401, description = "Refresh token expired or malformed", body = ErrorResponse)
    )
)]
pub async fn logout(
    service: web::Data<AuthService>,
    payload: web::Json<LogoutRequest>,
) -> Result<HttpResponse> {
    service.logout(&payload.refresh_token).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Logged out successfully".to_string(),
    }))
}
