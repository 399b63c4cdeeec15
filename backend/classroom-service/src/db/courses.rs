/// Course database operations
use crate::error::Result;
use crate::models::Course;
use sqlx::PgPool;
use uuid::Uuid;

/// Find course by ID
pub async fn find_by_id(pool: &PgPool, course_id: Uuid) -> Result<Option<Course>> {
    let course = sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE id = $1")
        .bind(course_id)
        .fetch_optional(pool)
        .await?;

    Ok(course)
}

/// List the active-course catalog, newest first
pub async fn list_active(pool: &PgPool) -> Result<Vec<Course>> {
    let courses = sqlx::query_as::<_, Course>(
        "SELECT * FROM courses WHERE active = TRUE ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(courses)
}

/// List every course owned by an instructor, newest first
pub async fn list_by_instructor(pool: &PgPool, instructor_id: Uuid) -> Result<Vec<Course>> {
    let courses = sqlx::query_as::<_, Course>(
        "SELECT * FROM courses WHERE instructor_id = $1 ORDER BY created_at DESC",
    )
    .bind(instructor_id)
    .fetch_all(pool)
    .await?;

    Ok(courses)
}

/// Create a course owned by the given instructor
pub async fn create_course(
    pool: &PgPool,
    instructor_id: Uuid,
    name: &str,
    description: &str,
    context: &str,
    active: bool,
) -> Result<Course> {
    let course = sqlx::query_as::<_, Course>(
        r#"
        INSERT INTO courses (id, instructor_id, name, description, context, active, created_at, updated_at)
        VALUES (gen_random_uuid(), $1, $2, $3, $4, $5, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(instructor_id)
    .bind(name)
    .bind(description)
    .bind(context)
    .bind(active)
    .fetch_one(pool)
    .await?;

    Ok(course)
}

/// Replace the mutable fields of a course
pub async fn update_course(
    pool: &PgPool,
    course_id: Uuid,
    name: &str,
    description: &str,
    context: &str,
    active: bool,
) -> Result<Course> {
    let course = sqlx::query_as::<_, Course>(
        r#"
        UPDATE courses
        SET name = $2, description = $3, context = $4, active = $5, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(course_id)
    .bind(name)
    .bind(description)
    .bind(context)
    .bind(active)
    .fetch_one(pool)
    .await?;

    Ok(course)
}
