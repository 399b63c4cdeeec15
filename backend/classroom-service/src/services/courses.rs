/// Course management and the chat surface.
///
/// Listing is role-split: students browse the catalog of active courses,
/// instructors see only their own. Mutation is owner-only.
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::db;
use crate::error::{AppError, Result};
use crate::models::{ChatResponse, CourseResponse, CreateCourseRequest, Role, UpdateCourseRequest};
use crate::security::policy;
use crate::services::assistant::CourseAssistant;

#[derive(Clone)]
pub struct CourseService {
    db: PgPool,
    assistant: Arc<dyn CourseAssistant>,
}

impl CourseService {
    pub fn new(db: PgPool, assistant: Arc<dyn CourseAssistant>) -> Self {
        Self { db, assistant }
    }

    /// Catalog of active courses, visible to students only.
    pub async fn list_catalog(&self, role: Role) -> Result<Vec<CourseResponse>> {
        if !policy::can_list_catalog(role) {
            return Err(AppError::Forbidden(
                "only students may browse the catalog".to_string(),
            ));
        }

        let courses = db::courses::list_active(&self.db).await?;
        Ok(courses.into_iter().map(CourseResponse::from).collect())
    }

    /// Courses authored by the calling instructor.
    pub async fn list_own(&self, user_id: Uuid, role: Role) -> Result<Vec<CourseResponse>> {
        if !policy::can_list_own_courses(role) {
            return Err(AppError::Forbidden(
                "only instructors have authored courses".to_string(),
            ));
        }

        let courses = db::courses::list_by_instructor(&self.db, user_id).await?;
        Ok(courses.into_iter().map(CourseResponse::from).collect())
    }

    /// Create a course owned by the calling instructor.
    pub async fn create(
        &self,
        user_id: Uuid,
        role: Role,
        request: CreateCourseRequest,
    ) -> Result<CourseResponse> {
        if !policy::can_create_course(role) {
            return Err(AppError::Forbidden(
                "only instructors may create courses".to_string(),
            ));
        }

        let course = db::courses::create_course(
            &self.db,
            user_id,
            &request.name,
            &request.description,
            &request.context,
            request.active,
        )
        .await?;

        info!(
            course_id = %course.id,
            instructor_id = %user_id,
            "Course created"
        );

        Ok(CourseResponse::from(course))
    }

    /// Update a course. Only the owning instructor may do so.
    pub async fn update(
        &self,
        user_id: Uuid,
        course_id: Uuid,
        request: UpdateCourseRequest,
    ) -> Result<CourseResponse> {
        let course = db::courses::find_by_id(&self.db, course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("course not found".to_string()))?;

        if !policy::can_modify_course(user_id, &course) {
            return Err(AppError::Forbidden(
                "only the course owner may modify it".to_string(),
            ));
        }

        let updated = db::courses::update_course(
            &self.db,
            course_id,
            &request.name,
            &request.description,
            &request.context,
            request.active,
        )
        .await?;

        info!(course_id = %course_id, "Course updated");

        Ok(CourseResponse::from(updated))
    }

    /// Ask the course assistant a question. Open to any authenticated
    /// role; the course's context material travels with the question.
    pub async fn chat(&self, course_id: Uuid, question: &str) -> Result<ChatResponse> {
        let course = db::courses::find_by_id(&self.db, course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("course not found".to_string()))?;

        let answer = self.assistant.answer(&course, question).await?;

        Ok(ChatResponse { answer })
    }
}
