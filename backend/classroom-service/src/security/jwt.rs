/// JWT issuance and validation using HS256.
///
/// Access tokens are short-lived and validated statelessly on every request.
/// Refresh tokens are long-lived, carry a `jti` consulted against the
/// revocation registry, and are never rotated on refresh.
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, TokenData,
    Validation,
};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::JwtSettings;
use crate::error::{AppError, Result};
use crate::models::Role;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT claims carried by both token types
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Email address
    pub email: String,
    /// Role at issuance time
    pub role: Role,
    /// Token type: "access" or "refresh"
    pub token_type: String,
    /// Token identifier, used by the revocation registry
    pub jti: Uuid,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Parse the subject claim back into the user's UUID.
    pub fn user_id(&self) -> std::result::Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Token pair returned by register and login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Response for the refresh flow: a new access token only, the refresh
/// token presented by the client stays valid until expiry or revocation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

struct JwtContext {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

/// Signing context loaded once at startup, immutable thereafter.
static JWT_CONTEXT: OnceCell<JwtContext> = OnceCell::new();

/// Initialize the signing context from configuration.
///
/// Must be called during application startup before any token operation.
/// Can only be called once.
pub fn initialize(settings: &JwtSettings) -> Result<()> {
    let context = JwtContext {
        encoding_key: EncodingKey::from_secret(settings.secret.as_bytes()),
        decoding_key: DecodingKey::from_secret(settings.secret.as_bytes()),
        access_token_expiry: settings.access_token_expiry,
        refresh_token_expiry: settings.refresh_token_expiry,
    };

    JWT_CONTEXT
        .set(context)
        .map_err(|_| AppError::Internal("JWT context already initialized".to_string()))
}

fn context() -> Result<&'static JwtContext> {
    JWT_CONTEXT.get().ok_or_else(|| {
        AppError::Internal(
            "JWT context not initialized. Call jwt::initialize() during startup".to_string(),
        )
    })
}

fn generate_token(
    user_id: Uuid,
    email: &str,
    role: Role,
    token_type: &str,
    lifetime_secs: i64,
    encoding_key: &EncodingKey,
) -> Result<String> {
    let now = Utc::now();
    let expiry = now + Duration::seconds(lifetime_secs);

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role,
        token_type: token_type.to_string(),
        jti: Uuid::new_v4(),
        iat: now.timestamp(),
        exp: expiry.timestamp(),
    };

    encode(&Header::new(JWT_ALGORITHM), &claims, encoding_key)
        .map_err(|e| AppError::Internal(format!("Failed to generate {token_type} token: {e}")))
}

/// Generate a new access token.
pub fn generate_access_token(user_id: Uuid, email: &str, role: Role) -> Result<String> {
    let ctx = context()?;
    generate_token(
        user_id,
        email,
        role,
        "access",
        ctx.access_token_expiry,
        &ctx.encoding_key,
    )
}

/// Generate a new refresh token.
pub fn generate_refresh_token(user_id: Uuid, email: &str, role: Role) -> Result<String> {
    let ctx = context()?;
    generate_token(
        user_id,
        email,
        role,
        "refresh",
        ctx.refresh_token_expiry,
        &ctx.encoding_key,
    )
}

/// Generate both access and refresh tokens.
pub fn generate_token_pair(user_id: Uuid, email: &str, role: Role) -> Result<TokenPair> {
    let access_token = generate_access_token(user_id, email, role)?;
    let refresh_token = generate_refresh_token(user_id, email, role)?;

    Ok(TokenPair {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: context()?.access_token_expiry,
    })
}

/// Mint a fresh access token for a validated refresh flow.
pub fn renew_access_token(user_id: Uuid, email: &str, role: Role) -> Result<AccessTokenResponse> {
    let access_token = generate_access_token(user_id, email, role)?;

    Ok(AccessTokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: context()?.access_token_expiry,
    })
}

fn decode_token(
    token: &str,
    ctx: &JwtContext,
) -> std::result::Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
    let validation = Validation::new(JWT_ALGORITHM);
    decode::<Claims>(token, &ctx.decoding_key, &validation)
}

/// Validate an access token presented on a protected route.
///
/// Any failure (bad signature, expiry, wrong token type) is an
/// authentication failure. This check never touches the database.
pub fn validate_access_token(token: &str) -> Result<Claims> {
    let ctx = context()?;
    let token_data = decode_token(token, ctx).map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::Unauthenticated("access token expired".to_string()),
        _ => AppError::Unauthenticated(format!("invalid access token: {e}")),
    })?;

    if token_data.claims.token_type != "access" {
        return Err(AppError::Unauthenticated(
            "refresh token cannot be used for authentication".to_string(),
        ));
    }

    Ok(token_data.claims)
}

/// Validate a refresh token presented to the refresh or logout flow.
///
/// Expiry and structural failures are reported separately so clients can
/// tell a stale session from a corrupt one. Revocation is checked by the
/// caller against the registry.
pub fn validate_refresh_token(token: &str) -> Result<Claims> {
    let ctx = context()?;
    let token_data = decode_token(token, ctx).map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::ExpiredCredential,
        _ => AppError::MalformedCredential(e.to_string()),
    })?;

    if token_data.claims.token_type != "refresh" {
        return Err(AppError::MalformedCredential(
            "not a refresh token".to_string(),
        ));
    }

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_test_context() {
        static INIT: std::sync::Once = std::sync::Once::new();
        INIT.call_once(|| {
            let settings = JwtSettings {
                secret: "unit-test-signing-secret".to_string(),
                access_token_expiry: 3600,
                refresh_token_expiry: 2_592_000,
            };
            // First caller wins; other test modules share the same context.
            let _ = initialize(&settings);
        });
    }

    fn encode_with_past_expiry(user_id: Uuid, token_type: &str) -> String {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: "test@example.com".to_string(),
            role: Role::Student,
            token_type: token_type.to_string(),
            jti: Uuid::new_v4(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let ctx = JWT_CONTEXT.get().expect("context initialized");
        encode(&Header::new(JWT_ALGORITHM), &claims, &ctx.encoding_key)
            .expect("Failed to encode expired token")
    }

    #[test]
    fn test_generate_access_token() {
        init_test_context();

        let token = generate_access_token(Uuid::new_v4(), "test@example.com", Role::Student);
        assert!(token.is_ok());

        let token_str = token.unwrap();
        assert!(!token_str.is_empty());
        // JWT tokens have 3 parts separated by dots
        assert_eq!(token_str.matches('.').count(), 2);
    }

    #[test]
    fn test_generate_refresh_token() {
        init_test_context();

        let token = generate_refresh_token(Uuid::new_v4(), "test@example.com", Role::Instructor)
            .expect("Failed to generate refresh token");

        let claims = validate_refresh_token(&token).expect("Failed to validate refresh token");
        assert_eq!(claims.token_type, "refresh");
        assert_eq!(claims.role, Role::Instructor);
    }

    #[test]
    fn test_generate_token_pair() {
        init_test_context();

        let pair = generate_token_pair(Uuid::new_v4(), "test@example.com", Role::Student)
            .expect("Failed to generate token pair");

        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());
        assert_ne!(pair.access_token, pair.refresh_token);
        assert_eq!(pair.token_type, "Bearer");
        assert_eq!(pair.expires_in, 3600);
    }

    #[test]
    fn test_token_pair_has_distinct_jtis() {
        init_test_context();

        let pair = generate_token_pair(Uuid::new_v4(), "test@example.com", Role::Student)
            .expect("Failed to generate token pair");

        let access = validate_access_token(&pair.access_token).unwrap();
        let refresh = validate_refresh_token(&pair.refresh_token).unwrap();
        assert_ne!(access.jti, refresh.jti);
    }

    #[test]
    fn test_validate_access_token_roundtrip() {
        init_test_context();

        let user_id = Uuid::new_v4();
        let token = generate_access_token(user_id, "test@example.com", Role::Instructor)
            .expect("Failed to generate token");

        let claims = validate_access_token(&token).expect("Failed to validate token");
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.role, Role::Instructor);
        assert_eq!(claims.token_type, "access");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_validate_rejects_garbage() {
        init_test_context();

        let result = validate_access_token("not.a.valid.token");
        assert!(matches!(result, Err(AppError::Unauthenticated(_))));
    }

    #[test]
    fn test_validate_rejects_tampered_token() {
        init_test_context();

        let token = generate_access_token(Uuid::new_v4(), "test@example.com", Role::Student)
            .expect("Failed to generate token");

        let tampered = format!("{}x", token);
        assert!(validate_access_token(&tampered).is_err());
    }

    #[test]
    fn test_refresh_token_rejected_on_access_path() {
        init_test_context();

        let refresh = generate_refresh_token(Uuid::new_v4(), "test@example.com", Role::Student)
            .expect("Failed to generate refresh token");

        let result = validate_access_token(&refresh);
        assert!(matches!(result, Err(AppError::Unauthenticated(_))));
    }

    #[test]
    fn test_access_token_rejected_on_refresh_path() {
        init_test_context();

        let access = generate_access_token(Uuid::new_v4(), "test@example.com", Role::Student)
            .expect("Failed to generate access token");

        let result = validate_refresh_token(&access);
        assert!(matches!(result, Err(AppError::MalformedCredential(_))));
    }

    #[test]
    fn test_expired_refresh_token_maps_to_expired_credential() {
        init_test_context();

        let expired = encode_with_past_expiry(Uuid::new_v4(), "refresh");
        let result = validate_refresh_token(&expired);
        assert!(matches!(result, Err(AppError::ExpiredCredential)));
    }

    #[test]
    fn test_expired_access_token_is_unauthenticated() {
        init_test_context();

        let expired = encode_with_past_expiry(Uuid::new_v4(), "access");
        let result = validate_access_token(&expired);
        assert!(matches!(result, Err(AppError::Unauthenticated(_))));
    }

    #[test]
    fn test_refresh_token_outlives_access_token() {
        init_test_context();

        let user_id = Uuid::new_v4();
        let access = generate_access_token(user_id, "test@example.com", Role::Student)
            .expect("Failed to generate access token");
        let refresh = generate_refresh_token(user_id, "test@example.com", Role::Student)
            .expect("Failed to generate refresh token");

        let access_claims = validate_access_token(&access).unwrap();
        let refresh_claims = validate_refresh_token(&refresh).unwrap();
        assert!(refresh_claims.exp > access_claims.exp);
    }

    #[test]
    fn test_renew_access_token_keeps_bearer_shape() {
        init_test_context();

        let renewed = renew_access_token(Uuid::new_v4(), "test@example.com", Role::Student)
            .expect("Failed to renew access token");

        assert!(!renewed.access_token.is_empty());
        assert_eq!(renewed.token_type, "Bearer");
        assert_eq!(renewed.expires_in, 3600);
        assert!(validate_access_token(&renewed.access_token).is_ok());
    }
}
