use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VerificationCode {
    pub id: i64,
    pub code: String,
}

#[derive(Debug, thiserror::Error)]
pub enum InsertError {
    #[error("code already issued")]
    Duplicate,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Create the `codes` table if it does not exist yet.
pub async fn ensure_schema(db: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS codes (
            id INTEGER PRIMARY KEY,
            code TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(db)
    .await?;
    Ok(())
}

/// Code with the highest id, if any has been issued.
pub async fn most_recent_code(db: &SqlitePool) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT code FROM codes ORDER BY id DESC LIMIT 1")
        .fetch_optional(db)
        .await
}

pub async fn code_exists(db: &SqlitePool, candidate: &str) -> Result<bool, sqlx::Error> {
    let row = sqlx::query_scalar::<_, i64>("SELECT 1 FROM codes WHERE code = ?")
        .bind(candidate)
        .fetch_optional(db)
        .await?;
    Ok(row.is_some())
}

/// Insert a new code. The unique constraint decides collisions, reported
/// as [`InsertError::Duplicate`].
pub async fn insert(db: &SqlitePool, code: &str) -> Result<VerificationCode, InsertError> {
    sqlx::query_as::<_, VerificationCode>(
        r#"
        INSERT INTO codes (code)
        VALUES (?)
        RETURNING id, code
        "#,
    )
    .bind(code)
    .fetch_one(db)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => InsertError::Duplicate,
        other => InsertError::Database(other),
    })
}
