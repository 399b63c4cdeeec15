/// Profile management for the authenticated user.
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::db;
use crate::error::{AppError, Result};
use crate::models::{UpdatePasswordRequest, UpdateProfileRequest, UserResponse};
use crate::security::{hash_password, verify_password};
use crate::services::auth::mask_email;

#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

impl UserService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn get_profile(&self, user_id: Uuid) -> Result<UserResponse> {
        let user = db::users::find_by_id(&self.db, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

        Ok(UserResponse::from(user))
    }

    /// Update names and email. The role is immutable for the lifetime of
    /// the account.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<UserResponse> {
        let user = db::users::find_by_id(&self.db, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

        // Changing the email must not collide with another account
        if request.email != user.email && db::users::email_exists(&self.db, &request.email).await?
        {
            return Err(AppError::DuplicateIdentity);
        }

        let updated = db::users::update_profile(
            &self.db,
            user_id,
            &request.first_name,
            &request.last_name,
            &request.email,
        )
        .await?;

        info!(
            user_id = %user_id,
            email = %mask_email(&updated.email),
            "Profile updated"
        );

        Ok(UserResponse::from(updated))
    }

    /// Change the stored credential. Requires the current password and a
    /// matching confirmation of the new one.
    pub async fn update_password(
        &self,
        user_id: Uuid,
        request: UpdatePasswordRequest,
    ) -> Result<()> {
        if request.new_password != request.confirm_new_password {
            return Err(AppError::PasswordMismatch);
        }

        let user = db::users::find_by_id(&self.db, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

        verify_password(&request.current_password, &user.password_hash)?;

        let password_hash = hash_password(&request.new_password)?;
        db::users::update_password_hash(&self.db, user_id, &password_hash).await?;

        info!(user_id = %user_id, "Password updated");

        Ok(())
    }
}
