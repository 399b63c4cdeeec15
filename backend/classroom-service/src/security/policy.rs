/// Role and ownership checks for course operations.
///
/// Handlers translate a `false` here into a 403. The catalog is a student
/// surface: instructors manage their own courses through `/courses/mine`
/// and never browse the full catalog.
use uuid::Uuid;

use crate::models::{Course, Role};

/// Check if the role may browse the full catalog of active courses.
pub fn can_list_catalog(role: Role) -> bool {
    matches!(role, Role::Student)
}

/// Check if the role may create courses.
pub fn can_create_course(role: Role) -> bool {
    matches!(role, Role::Instructor)
}

/// Check if the role may list its own authored courses.
pub fn can_list_own_courses(role: Role) -> bool {
    matches!(role, Role::Instructor)
}

/// Check if the user owns the course and may modify it.
pub fn can_modify_course(user_id: Uuid, course: &Course) -> bool {
    course.instructor_id == user_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn course_owned_by(instructor_id: Uuid) -> Course {
        Course {
            id: Uuid::new_v4(),
            instructor_id,
            name: "Intro to Databases".to_string(),
            description: "Relational fundamentals".to_string(),
            context: "Covers SQL, normalization and transactions".to_string(),
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_only_students_browse_catalog() {
        assert!(can_list_catalog(Role::Student));
        assert!(!can_list_catalog(Role::Instructor));
    }

    #[test]
    fn test_only_instructors_create_courses() {
        assert!(can_create_course(Role::Instructor));
        assert!(!can_create_course(Role::Student));
    }

    #[test]
    fn test_only_instructors_list_own_courses() {
        assert!(can_list_own_courses(Role::Instructor));
        assert!(!can_list_own_courses(Role::Student));
    }

    #[test]
    fn test_only_owner_modifies_course() {
        let owner = Uuid::new_v4();
        let course = course_owned_by(owner);

        assert!(can_modify_course(owner, &course));
        assert!(!can_modify_course(Uuid::new_v4(), &course));
    }
}
