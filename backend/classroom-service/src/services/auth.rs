/// Authentication service
///
/// Handles registration, login, token refresh and logout. Token refresh
/// never rotates the refresh token: the one presented stays valid until
/// it expires or is revoked through logout.
use chrono::DateTime;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::db;
use crate::error::{AppError, Result};
use crate::models::{LoginRequest, RegisterRequest, UserResponse};
use crate::security::jwt;
use crate::security::jwt::{AccessTokenResponse, TokenPair};
use crate::security::{hash_password, verify_password};

#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
}

impl AuthService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register a new account with the requested role.
    pub async fn register(&self, request: RegisterRequest) -> Result<UserResponse> {
        // Reject duplicate identities before hashing
        if db::users::email_exists(&self.db, &request.email).await? {
            warn!(
                email = %mask_email(&request.email),
                "Registration rejected: email already exists"
            );
            return Err(AppError::DuplicateIdentity);
        }

        let password_hash = hash_password(&request.password)?;

        let user = db::users::create_user(
            &self.db,
            &request.email,
            &password_hash,
            &request.first_name,
            &request.last_name,
            request.role,
        )
        .await?;

        info!(
            user_id = %user.id,
            role = %user.role.as_str(),
            email = %mask_email(&user.email),
            "User registered"
        );

        Ok(UserResponse::from(user))
    }

    /// Authenticate by email and password, issuing a fresh token pair.
    pub async fn login(&self, request: LoginRequest) -> Result<TokenPair> {
        let user = db::users::find_by_email(&self.db, &request.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        verify_password(&request.password, &user.password_hash)?;

        let tokens = jwt::generate_token_pair(user.id, &user.email, user.role)?;

        info!(
            user_id = %user.id,
            email = %mask_email(&user.email),
            "User logged in"
        );

        Ok(tokens)
    }

    /// Exchange a valid refresh token for a new access token.
    ///
    /// The refresh token itself is untouched; only its `jti` is checked
    /// against the revocation registry.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AccessTokenResponse> {
        let claims = jwt::validate_refresh_token(refresh_token)?;

        if db::token_revocation::is_jti_revoked(&self.db, claims.jti).await? {
            warn!(jti = %claims.jti, "Refresh rejected: token revoked");
            return Err(AppError::RevokedCredential);
        }

        let user_id = claims
            .user_id()
            .map_err(|_| AppError::MalformedCredential("invalid token subject".to_string()))?;

        jwt::renew_access_token(user_id, &claims.email, claims.role)
    }

    /// Revoke a refresh token. Idempotent: revoking an already-revoked
    /// token succeeds again.
    pub async fn logout(&self, refresh_token: &str) -> Result<()> {
        let claims = jwt::validate_refresh_token(refresh_token)?;

        let user_id = claims
            .user_id()
            .map_err(|_| AppError::MalformedCredential("invalid token subject".to_string()))?;

        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| AppError::MalformedCredential("invalid expiry claim".to_string()))?;

        db::token_revocation::revoke_token(&self.db, claims.jti, user_id, expires_at).await?;

        info!(user_id = %user_id, jti = %claims.jti, "Refresh token revoked");

        Ok(())
    }
}

/// Mask email for logging
pub(crate) fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let local = &email[..at_pos];
        let domain = &email[at_pos..];
        if local.len() <= 2 {
            format!("**{}", domain)
        } else {
            format!("{}***{}", &local[..1], domain)
        }
    } else {
        "***@***".to_string()
    }
}
