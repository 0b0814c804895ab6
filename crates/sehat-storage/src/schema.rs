use sqlx::SqlitePool;
use tracing::info;

use crate::error::StorageError;

/// DDL for the single `screenings` table.
///
/// Every column except `id` is nullable; values are stored exactly as
/// submitted or as returned by the model. `created_at` is assigned by SQLite
/// as a UTC `YYYY-MM-DD HH:MM:SS` string.
pub const SCREENINGS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS screenings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_name TEXT,
    age INTEGER,
    gender TEXT,
    family_history TEXT,
    smoking_status TEXT,
    bmi REAL,
    wbc REAL,
    rbc REAL,
    hemoglobin REAL,
    tumor_marker REAL,
    risk_score INTEGER,
    risk_category TEXT,
    recommendations TEXT,
    image_analysis TEXT,
    created_at TEXT DEFAULT CURRENT_TIMESTAMP
)";

/// Index backing the newest-first listing and the per-date trend scan.
pub const CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_screenings_created_at ON screenings (created_at)";

/// Create the schema if it does not exist yet. Safe to run on every startup.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    for statement in [SCREENINGS_TABLE, CREATED_AT_INDEX] {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| StorageError::Schema(e.to_string()))?;
    }

    info!("screenings schema ready");

    Ok(())
}
