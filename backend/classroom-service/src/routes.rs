use actix_web::{web, HttpResponse};

use crate::handlers::{auth, courses, health, users};
use crate::middleware::JwtAuthMiddleware;

// OpenAPI endpoint handler
async fn openapi_json() -> HttpResponse {
    use utoipa::OpenApi;
    HttpResponse::Ok().json(crate::openapi::ApiDoc::openapi())
}

// Swagger UI handler
async fn swagger_ui() -> HttpResponse {
    HttpResponse::Ok().content_type("text/html").body(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Campus Classroom Service API</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = function() {
            SwaggerUIBundle({
                url: "/openapi.json",
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                plugins: [
                    SwaggerUIBundle.plugins.DownloadUrl
                ],
                layout: "StandaloneLayout"
            });
        };
    </script>
</body>
</html>"#,
    )
}

// Documentation entry point
async fn docs() -> HttpResponse {
    HttpResponse::Ok().content_type("text/html").body(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Campus Classroom Service API</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 40px; background: #f5f5f5; }
        .container { max-width: 600px; margin: 0 auto; background: white; padding: 40px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        h1 { color: #333; }
        a { display: block; margin: 15px 0; padding: 15px; background: #2563eb; color: white; text-decoration: none; border-radius: 4px; }
        a:hover { background: #1d4ed8; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Campus Classroom Service API</h1>
        <p>Choose your preferred documentation viewer:</p>
        <a href="/swagger-ui">Swagger UI (Interactive)</a>
        <a href="/openapi.json">OpenAPI JSON (Raw)</a>
    </div>
</body>
</html>"#,
    )
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Service introspection endpoints (no API version prefix)
    cfg.route("/health", web::get().to(health::health_check))
        .route("/health/ready", web::get().to(health::readiness_check))
        .route("/health/live", web::get().to(health::liveness_check))
        .route("/openapi.json", web::get().to(openapi_json))
        .route("/swagger-ui", web::get().to(swagger_ui))
        .route("/docs", web::get().to(docs));

    // API v1 endpoints. The auth scope is public: refresh and logout
    // authenticate by the refresh token carried in the body.
    cfg.service(
        web::scope("/api/v1")
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/refresh", web::post().to(auth::refresh))
                    .route("/logout", web::post().to(auth::logout)),
            )
            .service(
                web::scope("/users")
                    .wrap(JwtAuthMiddleware)
                    .route("/{id}", web::get().to(users::get_user))
                    .route("/{id}", web::put().to(users::update_user))
                    .route("/{id}/password", web::put().to(users::update_password)),
            )
            .service(
                web::scope("/courses")
                    .wrap(JwtAuthMiddleware)
                    .route("", web::get().to(courses::list_courses))
                    .route("", web::post().to(courses::create_course))
                    .route("/mine", web::get().to(courses::list_own_courses))
                    .route("/{id}", web::put().to(courses::update_course))
                    .route("/{id}/chat", web::post().to(courses::chat_with_course)),
            ),
    );
}
