use serde::{Deserialize, Serialize};
use types::position::PositionSummary;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlpTotalResponse {
    pub total: f64,
    pub count: usize,
    pub open_interest: f64,
    pub source: String,
    pub account_index: u64,
}

impl LlpTotalResponse {
    pub fn new(summary: PositionSummary, account_index: u64) -> Self {
        Self {
            total: summary.total,
            count: summary.count,
            open_interest: summary.open_interest,
            source: "LLP".to_string(),
            account_index,
        }
    }
}
