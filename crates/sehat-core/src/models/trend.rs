use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Screenings aggregated over one calendar date (UTC).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TrendPoint {
    pub date: jiff::civil::Date,
    /// Mean `risk_score` over the date's rows; `None` when no row was scored.
    pub avg_risk: Option<f64>,
    pub count: i64,
}
