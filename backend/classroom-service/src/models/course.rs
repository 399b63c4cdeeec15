use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Course model - owned by exactly one instructor
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: Uuid,
    pub instructor_id: Uuid,
    pub name: String,
    pub description: String,
    pub context: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Course creation request; the owner is the authenticated instructor
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub context: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Course update request; full replacement of the mutable fields
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub context: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseResponse {
    pub id: Uuid,
    pub instructor_id: Uuid,
    pub name: String,
    pub description: String,
    pub context: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            instructor_id: course.instructor_id,
            name: course.name,
            description: course.description,
            context: course.context,
            active: course.active,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

/// Question sent to the course assistant
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 4000))]
    pub content: String,
}

/// Assistant reply
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults() {
        let req: CreateCourseRequest =
            serde_json::from_str(r#"{"name": "Test Course"}"#).unwrap();
        assert_eq!(req.name, "Test Course");
        assert_eq!(req.description, "");
        assert_eq!(req.context, "");
        assert!(req.active);
    }

    #[test]
    fn test_update_request_full_payload() {
        let req: UpdateCourseRequest = serde_json::from_str(
            r#"{
                "name": "Updated Course",
                "description": "Updated description",
                "context": "Updated context",
                "active": true
            }"#,
        )
        .unwrap();
        assert_eq!(req.name, "Updated Course");
        assert_eq!(req.description, "Updated description");
        assert_eq!(req.context, "Updated context");
        assert!(req.active);
    }

    #[test]
    fn test_chat_request_rejects_empty_content() {
        use validator::Validate;

        let req = ChatRequest {
            content: String::new(),
        };
        assert!(req.validate().is_err());

        let req = ChatRequest {
            content: "What is the context?".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_course_name_required_for_update() {
        use validator::Validate;

        let req = UpdateCourseRequest {
            name: String::new(),
            description: String::new(),
            context: String::new(),
            active: true,
        };
        assert!(req.validate().is_err());
    }
}
