use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::assessment::{Assessment, AssessmentOutcome};

/// Name stored when the form leaves `patientName` blank.
pub const ANONYMOUS_PATIENT: &str = "Anonymous";

/// Structured patient fields submitted with a screening.
///
/// Everything except the name is optional: missing or unparsable form values
/// are carried as `None` and stored as NULL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientInputs {
    pub patient_name: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub family_history: Option<String>,
    pub smoking_status: Option<String>,
    pub bmi: Option<f64>,
    pub wbc: Option<f64>,
    pub rbc: Option<f64>,
    pub hemoglobin: Option<f64>,
    pub tumor_marker: Option<f64>,
}

impl Default for PatientInputs {
    fn default() -> Self {
        Self {
            patient_name: ANONYMOUS_PATIENT.to_string(),
            age: None,
            gender: None,
            family_history: None,
            smoking_status: None,
            bmi: None,
            wbc: None,
            rbc: None,
            hemoglobin: None,
            tumor_marker: None,
        }
    }
}

impl PatientInputs {
    /// Resolve a submitted name, falling back to [`ANONYMOUS_PATIENT`] when
    /// it is missing or blank.
    pub fn resolve_name(raw: Option<&str>) -> String {
        match raw {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => ANONYMOUS_PATIENT.to_string(),
        }
    }
}

/// A screening ready to be inserted: patient inputs plus the persisted
/// subset of the model's assessment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewScreening {
    pub inputs: PatientInputs,
    pub risk_score: Option<i64>,
    pub risk_category: Option<String>,
    pub recommendations: Option<String>,
    pub image_analysis: Option<String>,
}

impl NewScreening {
    pub fn new(inputs: PatientInputs, outcome: &AssessmentOutcome) -> Self {
        let mut screening = Self {
            inputs,
            ..Self::default()
        };
        if let Some(assessment) = outcome.assessment() {
            screening.risk_score = assessment.risk_score;
            screening.risk_category = assessment.risk_category.clone();
            screening.recommendations = assessment.recommendations.clone();
            screening.image_analysis = assessment.image_analysis.clone();
        }
        screening
    }
}

/// One stored row of the `screenings` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScreeningRecord {
    pub id: i64,
    pub patient_name: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub family_history: Option<String>,
    pub smoking_status: Option<String>,
    pub bmi: Option<f64>,
    pub wbc: Option<f64>,
    pub rbc: Option<f64>,
    pub hemoglobin: Option<f64>,
    pub tumor_marker: Option<f64>,
    pub risk_score: Option<i64>,
    pub risk_category: Option<String>,
    pub recommendations: Option<String>,
    pub image_analysis: Option<String>,
    /// Assigned by the store at insert, UTC. Serialized in SQLite's
    /// `YYYY-MM-DD HH:MM:SS` form.
    #[serde(with = "sqlite_timestamp")]
    #[ts(type = "string")]
    pub created_at: jiff::civil::DateTime,
}

/// Body returned by create-screening: the model's fields plus the new row id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScreeningReceipt {
    #[serde(flatten)]
    pub assessment: Assessment,
    pub id: i64,
}

/// Serde adapter for timestamps in SQLite's `CURRENT_TIMESTAMP` format.
pub mod sqlite_timestamp {
    use jiff::civil::DateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// Parse SQLite's format, or ISO 8601 with a `T` separator and optional
    /// fractional seconds.
    pub fn parse(value: &str) -> Option<DateTime> {
        DateTime::strptime(FORMAT, value)
            .ok()
            .or_else(|| value.parse().ok())
    }

    pub fn serialize<S>(value: &DateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.strftime(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp {raw:?}")))
    }
}
