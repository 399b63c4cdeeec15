/// User profile handlers. All routes operate on the caller's own account:
/// a path id different from the authenticated identity is rejected.
use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, ErrorResponse, Result};
use crate::middleware::AuthenticatedUser;
use crate::models::{MessageResponse, UpdatePasswordRequest, UpdateProfileRequest, UserResponse};
use crate::services::UserService;

fn ensure_self(user: &AuthenticatedUser, target: Uuid) -> Result<()> {
    if user.id != target {
        return Err(AppError::Forbidden(
            "profile operations are limited to your own account".to_string(),
        ));
    }
    Ok(())
}

/// Profile retrieval handler
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User id, must match the caller")),
    responses(
        (status = 200, description = "Profile", body = UserResponse),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 403, description = "Not the caller's account", body = ErrorResponse)
    )
)]
pub async fn get_user(
    service: web::Data<UserService>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let target = path.into_inner();
    ensure_self(&user, target)?;

    let profile = service.get_profile(target).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Profile update handler
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User id, must match the caller")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "Invalid input or duplicate email", body = ErrorResponse),
        (status = 403, description = "Not the caller's account", body = ErrorResponse)
    )
)]
pub async fn update_user(
    service: web::Data<UserService>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse> {
    let target = path.into_inner();
    ensure_self(&user, target)?;

    let request = payload.into_inner();
    request.validate()?;

    let profile = service.update_profile(target, request).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Password update handler
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}/password",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User id, must match the caller")),
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Confirmation mismatch", body = ErrorResponse),
        (status = 401, description = "Current password wrong", body = ErrorResponse),
        (status = 403, description = "Not the caller's account", body = ErrorResponse)
    )
)]
pub async fn update_password(
    service: web::Data<UserService>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    payload: web::Json<UpdatePasswordRequest>,
) -> Result<HttpResponse> {
    let target = path.into_inner();
    ensure_self(&user, target)?;

    let request = payload.into_inner();
    request.validate()?;

    service.update_password(target, request).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Password updated successfully".to_string(),
    }))
}
