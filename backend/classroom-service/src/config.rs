//! Configuration management for the classroom service
//!
//! Everything is environment-driven; a local `.env` file is honored in
//! development (loaded from `main`).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub assistant: AssistantSettings,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Ok(Settings {
            app: AppSettings::from_env(),
            server: ServerSettings::from_env()?,
            database: DatabaseSettings::from_env()?,
            jwt: JwtSettings::from_env()?,
            assistant: AssistantSettings::from_env()?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app.env == "production"
    }
}

/// Deployment environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub env: String,
}

impl AppSettings {
    fn from_env() -> Self {
        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: String,
}

impl ServerSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid SERVER_PORT")?,
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "*".to_string()),
        })
    }
}

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("Invalid DATABASE_MAX_CONNECTIONS")?,
        })
    }
}

/// JWT authentication settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtSettings {
    pub secret: String,
    /// Access token lifetime in seconds
    pub access_token_expiry: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,
}

impl JwtSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            access_token_expiry: env::var("JWT_ACCESS_TOKEN_EXPIRY")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .context("Invalid JWT_ACCESS_TOKEN_EXPIRY")?,
            refresh_token_expiry: env::var("JWT_REFRESH_TOKEN_EXPIRY")
                .unwrap_or_else(|_| "2592000".to_string())
                .parse()
                .context("Invalid JWT_REFRESH_TOKEN_EXPIRY")?,
        })
    }
}

/// Course assistant (model collaborator) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantSettings {
    pub provider: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
}

impl AssistantSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            provider: env::var("ASSISTANT_PROVIDER").unwrap_or_else(|_| "openai".to_string()),
            api_key: env::var("ASSISTANT_API_KEY").ok(),
            model: env::var("ASSISTANT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            max_tokens: env::var("ASSISTANT_MAX_TOKENS")
                .unwrap_or_else(|_| "512".to_string())
                .parse()
                .context("Invalid ASSISTANT_MAX_TOKENS")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_jwt_settings_from_env() {
        env::set_var("JWT_SECRET", "test-secret-key");
        env::set_var("JWT_ACCESS_TOKEN_EXPIRY", "7200");

        let settings = JwtSettings::from_env().unwrap();

        assert_eq!(settings.secret, "test-secret-key");
        assert_eq!(settings.access_token_expiry, 7200);
        assert_eq!(settings.refresh_token_expiry, 2592000); // Default

        env::remove_var("JWT_SECRET");
        env::remove_var("JWT_ACCESS_TOKEN_EXPIRY");
    }

    #[test]
    #[serial]
    fn test_jwt_settings_require_secret() {
        env::remove_var("JWT_SECRET");
        assert!(JwtSettings::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_database_settings_from_env() {
        env::set_var("DATABASE_URL", "postgres://localhost/classroom");
        env::set_var("DATABASE_MAX_CONNECTIONS", "25");

        let settings = DatabaseSettings::from_env().unwrap();

        assert_eq!(settings.url, "postgres://localhost/classroom");
        assert_eq!(settings.max_connections, 25);

        env::remove_var("DATABASE_URL");
        env::remove_var("DATABASE_MAX_CONNECTIONS");
    }

    #[test]
    #[serial]
    fn test_server_settings_defaults() {
        env::remove_var("SERVER_HOST");
        env::remove_var("SERVER_PORT");

        let settings = ServerSettings::from_env().unwrap();

        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 8080);
    }

    #[test]
    #[serial]
    fn test_assistant_settings_defaults() {
        env::remove_var("ASSISTANT_PROVIDER");
        env::remove_var("ASSISTANT_API_KEY");
        env::remove_var("ASSISTANT_MODEL");
        env::remove_var("ASSISTANT_MAX_TOKENS");

        let settings = AssistantSettings::from_env().unwrap();

        assert_eq!(settings.provider, "openai");
        assert!(settings.api_key.is_none());
        assert_eq!(settings.model, "gpt-4o-mini");
        assert_eq!(settings.max_tokens, 512);
    }
}
