use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::{info, warn};

use sehat_core::models::screening::{NewScreening, ScreeningRecord, sqlite_timestamp};
use sehat_core::models::trend::TrendPoint;

use crate::error::StorageError;
use crate::schema;

const MAX_CONNECTIONS: u32 = 5;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// Rows written by older deployments can hold raw form strings (`''` for a
// blank field) or fractional scores, since SQLite only applies column
// affinity. Numeric columns are read back as NULL unless they hold a number,
// and whole-number columns are rounded.
const SELECT_COLUMNS: &str = "\
id, patient_name, \
CASE WHEN typeof(age) IN ('integer', 'real') THEN CAST(ROUND(age) AS INTEGER) END AS age, \
gender, family_history, smoking_status, \
CASE WHEN typeof(bmi) IN ('integer', 'real') THEN CAST(bmi AS REAL) END AS bmi, \
CASE WHEN typeof(wbc) IN ('integer', 'real') THEN CAST(wbc AS REAL) END AS wbc, \
CASE WHEN typeof(rbc) IN ('integer', 'real') THEN CAST(rbc AS REAL) END AS rbc, \
CASE WHEN typeof(hemoglobin) IN ('integer', 'real') THEN CAST(hemoglobin AS REAL) END AS hemoglobin, \
CASE WHEN typeof(tumor_marker) IN ('integer', 'real') THEN CAST(tumor_marker AS REAL) END AS tumor_marker, \
CASE WHEN typeof(risk_score) IN ('integer', 'real') THEN CAST(ROUND(risk_score) AS INTEGER) END AS risk_score, \
risk_category, recommendations, image_analysis, CAST(created_at AS TEXT) AS created_at";

/// Handle to the screenings database.
///
/// Opened once at startup and shared by cloning; clones share one pool.
/// Writes are serialized by SQLite itself (WAL journal, busy timeout), so no
/// in-process locking is needed.
#[derive(Debug, Clone)]
pub struct ScreeningStore {
    pool: SqlitePool,
}

impl ScreeningStore {
    /// Open the database at `url` (e.g. `sqlite://sehatmitra.db`), creating
    /// the file if missing, and ensure the schema exists.
    pub async fn open(url: &str) -> Result<Self, StorageError> {
        let in_memory = url.contains(":memory:");

        let mut options = SqliteConnectOptions::from_str(url)
            .map_err(|e| StorageError::Config(e.to_string()))?
            .create_if_missing(true)
            .busy_timeout(BUSY_TIMEOUT);
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        // An in-memory database lives and dies with its connection, so keep
        // exactly one open for the life of the pool.
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Open(e.to_string()))?;

        schema::ensure_schema(&pool).await?;

        info!(url, "screening store opened");

        Ok(Self { pool })
    }

    /// Underlying pool, for callers that need raw SQL.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Insert a screening and return its assigned id.
    pub async fn insert(&self, screening: &NewScreening) -> Result<i64, StorageError> {
        let inputs = &screening.inputs;

        let result = sqlx::query(
            "INSERT INTO screenings (
                patient_name, age, gender, family_history, smoking_status,
                bmi, wbc, rbc, hemoglobin, tumor_marker,
                risk_score, risk_category, recommendations, image_analysis
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&inputs.patient_name)
        .bind(inputs.age)
        .bind(&inputs.gender)
        .bind(&inputs.family_history)
        .bind(&inputs.smoking_status)
        .bind(inputs.bmi)
        .bind(inputs.wbc)
        .bind(inputs.rbc)
        .bind(inputs.hemoglobin)
        .bind(inputs.tumor_marker)
        .bind(screening.risk_score)
        .bind(&screening.risk_category)
        .bind(&screening.recommendations)
        .bind(&screening.image_analysis)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(screening_id = id, "screening stored");

        Ok(id)
    }

    /// All screenings, newest first. Rows sharing a timestamp are ordered by
    /// id, newest first.
    ///
    /// A row whose `created_at` cannot be read is logged and left out, the
    /// same way [`trends`](Self::trends) drops such a bucket.
    pub async fn list_all(&self) -> Result<Vec<ScreeningRecord>, StorageError> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM screenings ORDER BY created_at DESC, id DESC"
        );
        let rows: Vec<ScreeningRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        let records = rows
            .into_iter()
            .filter_map(|row| match ScreeningRecord::try_from(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(error = %e, "skipping screening with unreadable created_at");
                    None
                }
            })
            .collect();

        Ok(records)
    }

    /// Fetch a single screening by id. Unlike the listing paths, an
    /// unreadable `created_at` is reported as an error.
    pub async fn get(&self, id: i64) -> Result<Option<ScreeningRecord>, StorageError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM screenings WHERE id = ?");
        let row: Option<ScreeningRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ScreeningRecord::try_from).transpose()
    }

    /// Total number of stored screenings.
    pub async fn count(&self) -> Result<i64, StorageError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM screenings")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Daily trend buckets, oldest date first.
    ///
    /// `avg_risk` follows SQL `AVG` semantics: NULL scores are ignored and a
    /// date with no scored rows averages to `None`.
    pub async fn trends(&self) -> Result<Vec<TrendPoint>, StorageError> {
        let rows: Vec<TrendRow> = sqlx::query_as(
            "SELECT date(created_at) AS date,
                    AVG(CASE WHEN typeof(risk_score) IN ('integer', 'real') THEN risk_score END) AS avg_risk,
                    COUNT(*) AS count
             FROM screenings
             GROUP BY date(created_at)
             ORDER BY date ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let points = rows
            .into_iter()
            .filter_map(|row| {
                let parsed = row
                    .date
                    .as_deref()
                    .and_then(|d| d.parse::<jiff::civil::Date>().ok());
                match parsed {
                    Some(date) => Some(TrendPoint {
                        date,
                        avg_risk: row.avg_risk,
                        count: row.count,
                    }),
                    None => {
                        warn!(
                            date = ?row.date,
                            count = row.count,
                            "skipping trend bucket with unreadable created_at"
                        );
                        None
                    }
                }
            })
            .collect();

        Ok(points)
    }

    /// Close the pool, waiting for checked-out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("screening store closed");
    }
}

#[derive(sqlx::FromRow)]
struct ScreeningRow {
    id: i64,
    patient_name: Option<String>,
    age: Option<i64>,
    gender: Option<String>,
    family_history: Option<String>,
    smoking_status: Option<String>,
    bmi: Option<f64>,
    wbc: Option<f64>,
    rbc: Option<f64>,
    hemoglobin: Option<f64>,
    tumor_marker: Option<f64>,
    risk_score: Option<i64>,
    risk_category: Option<String>,
    recommendations: Option<String>,
    image_analysis: Option<String>,
    created_at: Option<String>,
}

#[derive(sqlx::FromRow)]
struct TrendRow {
    date: Option<String>,
    avg_risk: Option<f64>,
    count: i64,
}

impl TryFrom<ScreeningRow> for ScreeningRecord {
    type Error = StorageError;

    fn try_from(row: ScreeningRow) -> Result<Self, Self::Error> {
        let raw = row.created_at.unwrap_or_default();
        let created_at = sqlite_timestamp::parse(&raw).ok_or(StorageError::Timestamp {
            id: row.id,
            value: raw,
        })?;

        Ok(ScreeningRecord {
            id: row.id,
            patient_name: row.patient_name,
            age: row.age,
            gender: row.gender,
            family_history: row.family_history,
            smoking_status: row.smoking_status,
            bmi: row.bmi,
            wbc: row.wbc,
            rbc: row.rbc,
            hemoglobin: row.hemoglobin,
            tumor_marker: row.tumor_marker,
            risk_score: row.risk_score,
            risk_category: row.risk_category,
            recommendations: row.recommendations,
            image_analysis: row.image_analysis,
            created_at,
        })
    }
}
