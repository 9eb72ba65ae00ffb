//! Request DTOs for report endpoints.

use serde::Deserialize;

/// Query parameters shared by the monthly report endpoints
#[derive(Debug, Deserialize)]
pub struct MonthlyReportQuery {
    /// Strict `YYYY-MM`; omitted means the current UTC month
    pub month: Option<String>,
    #[serde(default)]
    pub include_zero: bool,
}
