/// Course handlers
use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ErrorResponse, Result};
use crate::middleware::AuthenticatedUser;
use crate::models::{ChatRequest, ChatResponse, CourseResponse, CreateCourseRequest, UpdateCourseRequest};
use crate::services::CourseService;

/// Catalog listing handler (students only)
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    tag = "Courses",
    responses(
        (status = 200, description = "Active courses", body = [CourseResponse]),
        (status = 403, description = "Caller is not a student", body = ErrorResponse)
    )
)]
pub async fn list_courses(
    service: web::Data<CourseService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let courses = service.list_catalog(user.role).await?;
    Ok(HttpResponse::Ok().json(courses))
}

/// Own-courses listing handler (instructors only)
#[utoipa::path(
    get,
    path = "/api/v1/courses/mine",
    tag = "Courses",
    responses(
        (status = 200, description = "Courses authored by the caller", body = [CourseResponse]),
        (status = 403, description = "Caller is not an instructor", body = ErrorResponse)
    )
)]
pub async fn list_own_courses(
    service: web::Data<CourseService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let courses = service.list_own(user.id, user.role).await?;
    Ok(HttpResponse::Ok().json(courses))
}

/// Course creation handler (instructors only)
#[utoipa::path(
    post,
    path = "/api/v1/courses",
    tag = "Courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 403, description = "Caller is not an instructor", body = ErrorResponse)
    )
)]
pub async fn create_course(
    service: web::Data<CourseService>,
    user: AuthenticatedUser,
    payload: web::Json<CreateCourseRequest>,
) -> Result<HttpResponse> {
    let request = payload.into_inner();
    request.validate()?;

    let course = service.create(user.id, user.role, request).await?;
    Ok(HttpResponse::Created().json(course))
}

/// Course update handler (owner only)
#[utoipa::path(
    put,
    path = "/api/v1/courses/{id}",
    tag = "Courses",
    params(("id" = Uuid, Path, description = "Course id")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 403, description = "Caller does not own the course", body = ErrorResponse),
        (status = 404, description = "Unknown course", body = ErrorResponse)
    )
)]
pub async fn update_course(
    service: web::Data<CourseService>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateCourseRequest>,
) -> Result<HttpResponse> {
    let request = payload.into_inner();
    request.validate()?;

    let course = service.update(user.id, path.into_inner(), request).await?;
    Ok(HttpResponse::Ok().json(course))
}

/// Course chat handler (any authenticated role)
#[utoipa::path(
    post,
    path = "/api/v1/courses/{id}/chat",
    tag = "Courses",
    params(("id" = Uuid, Path, description = "Course id")),
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant answer", body = ChatResponse),
        (status = 404, description = "Unknown course", body = ErrorResponse),
        (status = 502, description = "Model collaborator unavailable", body = ErrorResponse)
    )
)]
pub async fn chat_with_course(
    service: web::Data<CourseService>,
    _user: AuthenticatedUser,
    path: web::Path<Uuid>,
    payload: web::Json<ChatRequest>,
) -> Result<HttpResponse> {
    let request = payload.into_inner();
    request.validate()?;

    let reply = service.chat(path.into_inner(), &request.content).await?;
    Ok(HttpResponse::Ok().json(reply))
}
