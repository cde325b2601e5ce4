//! Upstream account-query accessors
//!
//! The account endpoint returns `{ accounts: [{ positions: [...] , ...}], ... }`.
//! The payload is read as untyped JSON so that missing or mistyped fields
//! degrade to "no data" instead of failing deserialization.

use serde_json::Value;

/// Field holding the position notional on each position object.
pub const POSITION_VALUE_FIELD: &str = "position_value";

/// First account of an account-query response, if any.
pub fn first_account(response: &Value) -> Option<&Value> {
    response.get("accounts")?.as_array()?.first()
}

/// Positions of an account. Absent or non-list `positions` reads as empty.
pub fn account_positions(account: &Value) -> &[Value] {
    account
        .get("positions")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
