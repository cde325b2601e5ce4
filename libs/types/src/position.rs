//! Position summary types
//!
//! The numeric aggregator folds an account-query response into a
//! [`PositionSummary`]. It never fails: malformed input yields zeros or a
//! partial sum over the positions that could be read.

use crate::account::{account_positions, first_account, POSITION_VALUE_FIELD};
use crate::numeric::{finite, parse_decimal_str};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Aggregate over the positions of a single account
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionSummary {
    /// Signed sum of position values.
    pub total: f64,
    /// Number of positions that contributed.
    pub count: usize,
    /// Sum of absolute position values.
    pub open_interest: f64,
}

impl PositionSummary {
    /// Fold one accepted position value into the summary.
    pub fn accumulate(&mut self, value: f64) {
        self.total += value;
        self.open_interest += value.abs();
        self.count += 1;
    }
}

/// Summarize the positions of the first account in `response`.
///
/// Returns the zero summary when the response is absent, has no `accounts`
/// list, or the list is empty.
pub fn summarize_positions(response: Option<&Value>) -> PositionSummary {
    let mut summary = PositionSummary::default();

    let Some(account) = response.and_then(first_account) else {
        return summary;
    };

    for position in account_positions(account) {
        if let Some(value) = position_value(position) {
            summary.accumulate(value);
        }
    }

    summary
}

/// Read a position's value.
///
/// Strings are parsed, numbers taken directly, and a missing or non-numeric
/// field counts as zero. Non-finite results are rejected.
fn position_value(position: &Value) -> Option<f64> {
    let value = match position.get(POSITION_VALUE_FIELD) {
        Some(Value::String(s)) => parse_decimal_str(s)?,
        Some(Value::Number(n)) => n.as_f64()?,
        _ => 0.0,
    };
    finite(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_zero_summary_for_empty_inputs() {
        let zero = PositionSummary::default();
        assert_eq!(summarize_positions(None), zero);
        assert_eq!(summarize_positions(Some(&Value::Null)), zero);
        assert_eq!(summarize_positions(Some(&json!({}))), zero);
        assert_eq!(summarize_positions(Some(&json!({"accounts": []}))), zero);
        assert_eq!(summarize_positions(Some(&json!({"accounts": 3}))), zero);
    }

    #[test]
    fn test_mixed_encodings_skip_garbage() {
        let response = json!({
            "accounts": [{
                "positions": [
                    {"position_value": "100.5"},
                    {"position_value": -50},
                    {"position_value": "abc"}
                ]
            }]
        });

        let summary = summarize_positions(Some(&response));
        assert_eq!(summary.count, 2);
        assert!((summary.total - 50.5).abs() < 1e-9);
        assert!((summary.open_interest - 150.5).abs() < 1e-9);
    }

    #[test]
    fn test_only_first_account_is_used() {
        let response = json!({
            "accounts": [
                {"positions": [{"position_value": "10"}]},
                {"positions": [{"position_value": "1000"}]}
            ]
        });

        let summary = summarize_positions(Some(&response));
        assert_eq!(summary.count, 1);
        assert_eq!(summary.total, 10.0);
    }

    #[test]
    fn test_missing_positions_is_empty() {
        let response = json!({"accounts": [{"index": 281474976710654u64}]});
        assert_eq!(summarize_positions(Some(&response)), PositionSummary::default());
    }

    #[test]
    fn test_missing_position_value_counts_as_zero() {
        let response = json!({
            "accounts": [{"positions": [{"symbol": "BTC"}, {"position_value": "5"}]}]
        });

        let summary = summarize_positions(Some(&response));
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total, 5.0);
        assert_eq!(summary.open_interest, 5.0);
    }

    #[test]
    fn test_summary_serialization() {
        let summary = PositionSummary {
            total: 1.5,
            count: 1,
            open_interest: 1.5,
        };
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json, json!({"total": 1.5, "count": 1, "open_interest": 1.5}));
    }

    fn position(value: f64, as_string: bool) -> Value {
        if as_string {
            json!({"position_value": value.to_string()})
        } else {
            json!({"position_value": value})
        }
    }

    proptest! {
        #[test]
        fn prop_sums_match_accepted_values(
            values in prop::collection::vec((-1.0e9f64..1.0e9, any::<bool>()), 0..40),
            garbage in 0usize..5,
        ) {
            let mut positions: Vec<Value> = values
                .iter()
                .map(|(v, as_string)| position(*v, *as_string))
                .collect();
            for _ in 0..garbage {
                positions.push(json!({"position_value": "not-a-number"}));
            }
            let response = json!({"accounts": [{"positions": positions}]});

            let summary = summarize_positions(Some(&response));
            let expected_total: f64 = values.iter().map(|(v, _)| *v).sum();
            let expected_oi: f64 = values.iter().map(|(v, _)| v.abs()).sum();

            prop_assert_eq!(summary.count, values.len());
            prop_assert!((summary.total - expected_total).abs() <= 1e-6 * expected_oi.max(1.0));
            prop_assert!((summary.open_interest - expected_oi).abs() <= 1e-6 * expected_oi.max(1.0));
            prop_assert!(summary.open_interest >= summary.total.abs() - 1e-6 * expected_oi.max(1.0));
        }
    }
}
