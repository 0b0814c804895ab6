use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Coarse risk bucket the model is asked to assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
}

impl RiskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Moderate => "Moderate",
            RiskCategory::High => "High",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskCategory {
    type Err = CoreError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskCategory::Low),
            "moderate" => Ok(RiskCategory::Moderate),
            "high" => Ok(RiskCategory::High),
            _ => Err(CoreError::InvalidRiskCategory(s.to_string())),
        }
    }
}

/// Inclusive range the model is asked to keep `risk_score` in.
pub const RISK_SCORE_RANGE: std::ops::RangeInclusive<i64> = 0..=100;

/// A risk assessment as returned by the model.
///
/// Every field is optional: the model may omit any of them, and a field whose
/// JSON shape is wrong is dropped instead of failing the whole response.
/// `risk_category` is kept as the model's raw string so unexpected values are
/// persisted as-is; use [`Assessment::category`] for the typed view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Assessment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub risk_score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub risk_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub recommendations: Option<String>,
    /// Advisory only, never persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub consultation_doctor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image_analysis: Option<String>,
    /// Factor name → weight in `[0, 1]`. Advisory only, never persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub feature_importance: Option<BTreeMap<String, f64>>,
}

impl Assessment {
    /// True when the model supplied none of the fields.
    pub fn is_empty(&self) -> bool {
        self.risk_score.is_none()
            && self.risk_category.is_none()
            && self.recommendations.is_none()
            && self.consultation_doctor.is_none()
            && self.image_analysis.is_none()
            && self.feature_importance.is_none()
    }

    /// Typed risk category, or `None` if absent or not one of Low/Moderate/High.
    pub fn category(&self) -> Option<RiskCategory> {
        self.risk_category.as_deref().and_then(|c| c.parse().ok())
    }

    /// Whether `risk_score` is present and within [`RISK_SCORE_RANGE`].
    pub fn score_in_range(&self) -> bool {
        self.risk_score
            .is_some_and(|score| RISK_SCORE_RANGE.contains(&score))
    }
}

/// Result of asking the model for an assessment.
///
/// `Unavailable` means the model answered but the body could not be read as a
/// JSON object (empty, malformed, or a non-object value). The screening is
/// still stored, just without AI-derived fields.
#[derive(Debug, Clone, PartialEq)]
pub enum AssessmentOutcome {
    Assessed(Assessment),
    Unavailable { reason: String },
}

impl AssessmentOutcome {
    pub fn is_available(&self) -> bool {
        matches!(self, AssessmentOutcome::Assessed(_))
    }

    pub fn assessment(&self) -> Option<&Assessment> {
        match self {
            AssessmentOutcome::Assessed(a) => Some(a),
            AssessmentOutcome::Unavailable { .. } => None,
        }
    }

    /// Collapse to a plain assessment; `Unavailable` becomes an empty one.
    pub fn into_assessment(self) -> Assessment {
        match self {
            AssessmentOutcome::Assessed(a) => a,
            AssessmentOutcome::Unavailable { .. } => Assessment::default(),
        }
    }
}
