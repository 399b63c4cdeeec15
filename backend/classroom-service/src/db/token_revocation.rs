/// Refresh-token revocation registry operations
use crate::error::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Record a revoked refresh token by its jti. Idempotent: revoking an
/// already-revoked token is a no-op.
pub async fn revoke_token(
    pool: &PgPool,
    jti: Uuid,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO revoked_tokens (jti, user_id, expires_at, revoked_at)
        VALUES ($1, $2, $3, NOW())
        ON CONFLICT (jti) DO NOTHING
        "#,
    )
    .bind(jti)
    .bind(user_id)
    .bind(expires_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Check whether a refresh token (by jti) has been revoked
pub async fn is_jti_revoked(pool: &PgPool, jti: Uuid) -> Result<bool> {
    let revoked =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE jti = $1)")
            .bind(jti)
            .fetch_one(pool)
            .await?;

    Ok(revoked)
}

/// Delete revocation records whose underlying token has expired anyway
/// (maintenance operation; a pruned token fails refresh as expired)
pub async fn cleanup_expired_revocations(pool: &PgPool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at < NOW()")
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Count of revocation records still covering live tokens
pub async fn count_active_revocations(pool: &PgPool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM revoked_tokens WHERE expires_at > NOW()",
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}
