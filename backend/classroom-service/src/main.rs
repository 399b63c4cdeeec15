use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use classroom_service::config::Settings;
use classroom_service::db::{create_pool, run_migrations};
use classroom_service::routes::configure_routes;
use classroom_service::security::jwt;
use classroom_service::services::{assistant, AuthService, CourseService, UserService};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let settings = Settings::from_env().expect("Failed to load configuration");

    tracing::info!("Starting classroom-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", settings.app.env);

    // Initialize the JWT signing context before any token operation
    jwt::initialize(&settings.jwt).expect("Failed to initialize JWT signing context");
    tracing::info!("JWT signing context initialized");

    // Create database connection pool
    let db_pool = create_pool(&settings.database.url, settings.database.max_connections)
        .await
        .expect("Failed to create database pool");

    tracing::info!(
        "Database pool created with {} max connections",
        settings.database.max_connections
    );

    // Run embedded migrations unless disabled or in production
    let run_migrations_env = std::env::var("RUN_MIGRATIONS").unwrap_or_else(|_| "true".into());
    if !settings.is_production() && run_migrations_env != "false" {
        match run_migrations(&db_pool).await {
            Ok(_) => tracing::info!("Database migrations applied"),
            Err(e) => {
                tracing::error!("Failed to run migrations: {}", e);
                return Err(io::Error::other(e));
            }
        }
    } else {
        tracing::info!(
            "Skipping automatic migrations (RUN_MIGRATIONS={})",
            run_migrations_env
        );
    }

    // Services shared by every worker
    let course_assistant = assistant::from_settings(&settings.assistant);
    let auth_service = AuthService::new(db_pool.clone());
    let user_service = UserService::new(db_pool.clone());
    let course_service = CourseService::new(db_pool.clone(), course_assistant);

    let bind_address = format!("{}:{}", settings.server.host, settings.server.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let server_settings = settings.server.clone();

    HttpServer::new(move || {
        // Build CORS configuration from allowed_origins
        let mut cors = Cors::default();
        for origin in server_settings.cors_allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(course_service.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(configure_routes)
    })
    .bind(&bind_address)?
    .run()
    .await
}
