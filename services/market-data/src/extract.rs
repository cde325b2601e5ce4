//! Open-interest extraction from feed messages
//!
//! The market-stats channel has no pinned schema, so extraction runs a
//! prioritized list of independent shape matchers. A matcher returns `None`
//! when the message does not have its shape and `Some(pairs)` when it does;
//! the first matcher to recognize the message wins, even if it yields no
//! pairs.
//!
//! Recognized shapes, in order:
//! 1. `[{market_id, open_interest}, ...]`
//! 2. `{stats: {"<market>": {open_interest}, ...}}`
//! 3. `{market_stats: [{market_id, open_interest}, ...]}`
//! 4. `{type: "...market_stats...", market_id, open_interest}`
//! 5. `{channel: "market_stats...", data | body: {market_id, open_interest}}`

use serde_json::{Map, Value};
use types::ids::MarketKey;
use types::numeric::lenient_f64;

/// Accepted spellings of the open-interest field, by priority.
const OI_FIELDS: [&str; 3] = ["open_interest", "openInterest", "oi"];

/// Accepted spellings of the market identifier field, by priority.
const MARKET_FIELDS: [&str; 3] = ["market_id", "marketIndex", "market"];

/// Channel name shared by the wildcard and per-market subscriptions.
pub const MARKET_STATS_CHANNEL: &str = "market_stats";

/// An extracted `(market, open interest)` observation.
pub type OiPair = (MarketKey, f64);

/// A shape matcher.
pub type Matcher = fn(&Value) -> Option<Vec<OiPair>>;

/// All matchers in the order they are tried.
pub const MATCHERS: [(&str, Matcher); 5] = [
    ("list", match_list),
    ("stats_map", match_stats_map),
    ("market_stats_list", match_market_stats_list),
    ("typed_update", match_typed_update),
    ("channel_envelope", match_channel_envelope),
];

/// Extract every OI observation from a parsed message.
///
/// Unrecognized messages yield an empty vector.
pub fn extract_open_interest(message: &Value) -> Vec<OiPair> {
    MATCHERS
        .iter()
        .find_map(|(_, matcher)| matcher(message))
        .unwrap_or_default()
}

/// Name of the matcher that recognizes `message`, if any.
#[cfg(test)]
fn matched_shape(message: &Value) -> Option<&'static str> {
    MATCHERS
        .iter()
        .find(|(_, matcher)| matcher(message).is_some())
        .map(|(name, _)| *name)
}

fn match_list(message: &Value) -> Option<Vec<OiPair>> {
    let items = message.as_array()?;
    Some(items.iter().filter_map(extract_pair).collect())
}

fn match_stats_map(message: &Value) -> Option<Vec<OiPair>> {
    let stats = message.as_object()?.get("stats")?;
    let pairs = match stats {
        Value::Object(by_market) => by_market
            .iter()
            .filter_map(|(key, stat)| Some((MarketKey::new(key.as_str()), extract_oi(stat)?)))
            .collect(),
        Value::Array(by_index) => by_index
            .iter()
            .enumerate()
            .filter_map(|(idx, stat)| Some((MarketKey::new(idx.to_string()), extract_oi(stat)?)))
            .collect(),
        _ => return None,
    };
    Some(pairs)
}

fn match_market_stats_list(message: &Value) -> Option<Vec<OiPair>> {
    let items = message.as_object()?.get("market_stats")?.as_array()?;
    Some(items.iter().filter_map(extract_pair).collect())
}

fn match_typed_update(message: &Value) -> Option<Vec<OiPair>> {
    let kind = message.as_object()?.get("type")?.as_str()?;
    if !kind.contains(MARKET_STATS_CHANNEL) {
        return None;
    }
    Some(extract_pair(message).into_iter().collect())
}

fn match_channel_envelope(message: &Value) -> Option<Vec<OiPair>> {
    let obj = message.as_object()?;
    let channel = obj.get("channel")?.as_str()?;
    if !channel.starts_with(MARKET_STATS_CHANNEL) {
        return None;
    }
    let payload = first_present(obj, &["data", "body"]).unwrap_or(message);
    Some(extract_pair(payload).into_iter().collect())
}

/// Market and OI from a single stats object; both must be present.
fn extract_pair(item: &Value) -> Option<OiPair> {
    let open_interest = extract_oi(item)?;
    let obj = item.as_object()?;
    let market = MarketKey::from_json(first_present(obj, &MARKET_FIELDS)?)?;
    Some((market, open_interest))
}

/// OI from the first non-null OI field, if it is a finite number.
fn extract_oi(item: &Value) -> Option<f64> {
    let obj = item.as_object()?;
    lenient_f64(first_present(obj, &OI_FIELDS)?)
}

/// First field in `fields` that is present and not `null`.
fn first_present<'a>(obj: &'a Map<String, Value>, fields: &[&str]) -> Option<&'a Value> {
    fields
        .iter()
        .filter_map(|field| obj.get(*field))
        .find(|value| !value.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs(message: Value) -> Vec<(String, f64)> {
        extract_open_interest(&message)
            .into_iter()
            .map(|(k, v)| (k.as_str().to_string(), v))
            .collect()
    }

    #[test]
    fn test_list_shape() {
        let message = json!([
            {"market_id": 0, "open_interest": "1500.5"},
            {"marketIndex": 1, "openInterest": 20},
            {"market": "ETH", "oi": 3},
            {"market_id": 2},
            {"open_interest": 9}
        ]);

        assert_eq!(
            pairs(message),
            vec![
                ("0".to_string(), 1500.5),
                ("1".to_string(), 20.0),
                ("ETH".to_string(), 3.0),
            ]
        );
    }

    #[test]
    fn test_stats_map_shape() {
        let message = json!({
            "stats": {
                "0": {"open_interest": "100"},
                "7": {"oi": 5.5},
                "9": {"volume": 1}
            }
        });

        let mut got = pairs(message);
        got.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(got, vec![("0".to_string(), 100.0), ("7".to_string(), 5.5)]);
    }

    #[test]
    fn test_stats_list_keyed_by_index() {
        let message = json!({"stats": [{"open_interest": 1}, {"open_interest": 2}]});
        assert_eq!(pairs(message), vec![("0".to_string(), 1.0), ("1".to_string(), 2.0)]);
    }

    #[test]
    fn test_market_stats_list_shape() {
        let message = json!({
            "market_stats": [
                {"market_id": 3, "open_interest": "42"},
                {"market_id": 4, "open_interest": "oops"}
            ]
        });

        assert_eq!(pairs(message), vec![("3".to_string(), 42.0)]);
    }

    #[test]
    fn test_typed_update_shape() {
        let message = json!({
            "type": "update/market_stats",
            "market_id": 12,
            "open_interest": "987.25"
        });

        assert_eq!(matched_shape(&message), Some("typed_update"));
        assert_eq!(pairs(message), vec![("12".to_string(), 987.25)]);
    }

    #[test]
    fn test_channel_envelope_with_data() {
        let message = json!({
            "channel": "market_stats/5",
            "data": {"market_id": 5, "open_interest": 77}
        });

        assert_eq!(matched_shape(&message), Some("channel_envelope"));
        assert_eq!(pairs(message), vec![("5".to_string(), 77.0)]);
    }

    #[test]
    fn test_channel_envelope_with_body_or_inline() {
        let body = json!({
            "channel": "market_stats:6",
            "data": null,
            "body": {"marketIndex": 6, "oi": "8"}
        });
        assert_eq!(pairs(body), vec![("6".to_string(), 8.0)]);

        let inline = json!({"channel": "market_stats", "market": "BTC", "openInterest": 1});
        assert_eq!(pairs(inline), vec![("BTC".to_string(), 1.0)]);
    }

    #[test]
    fn test_unrecognized_shapes_yield_nothing() {
        for message in [
            json!({"type": "connected", "session_id": "abc"}),
            json!({"channel": "order_book/1", "data": {"market_id": 1, "open_interest": 5}}),
            json!({"type": 5, "market_id": 1, "open_interest": 5}),
            json!("market_stats"),
            json!(42),
            Value::Null,
        ] {
            assert_eq!(matched_shape(&message), None);
            assert!(extract_open_interest(&message).is_empty());
        }
    }

    #[test]
    fn test_first_matching_shape_wins() {
        // `stats` is checked before `type`, so the typed fields are ignored.
        let message = json!({
            "stats": {"1": {"volume": 3}},
            "type": "update/market_stats",
            "market_id": 9,
            "open_interest": 100
        });

        assert_eq!(matched_shape(&message), Some("stats_map"));
        assert!(extract_open_interest(&message).is_empty());
    }

    #[test]
    fn test_null_fields_fall_through_to_next_spelling() {
        let message = json!([{"market_id": null, "marketIndex": 2, "open_interest": null, "oi": 4}]);
        assert_eq!(pairs(message), vec![("2".to_string(), 4.0)]);
    }

    #[test]
    fn test_present_but_invalid_oi_does_not_fall_through() {
        let message = json!([{"market_id": 1, "open_interest": "n/a", "oi": 4}]);
        assert!(pairs(message).is_empty());
    }
}
