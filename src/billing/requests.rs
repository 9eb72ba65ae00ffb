//! Request DTOs for billing API endpoints.

use chrono::NaiveDate;
use serde::Deserialize;

/// Request to generate weekly payments over a date range
#[derive(Debug, Deserialize)]
pub struct GenerateWeeklyRequest {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Query parameters for the debt ledger
#[derive(Debug, Deserialize)]
pub struct DebtQuery {
    #[serde(default)]
    pub overdue_only: bool,
}
