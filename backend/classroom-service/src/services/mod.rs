/// Service layer for the classroom service
///
/// Business logic on top of the db layer:
/// - Auth (registration, login, token refresh, logout)
/// - User profiles (retrieval, profile and password updates)
/// - Courses (catalog, authoring, ownership-checked updates)
/// - Course assistant (model collaborator behind the chat endpoint)
pub mod assistant;
pub mod auth;
pub mod courses;
pub mod users;

pub use assistant::{CourseAssistant, OfflineAssistant, OpenAiAssistant};
pub use auth::AuthService;
pub use courses::CourseService;
pub use users::UserService;
