use types::position::PositionSummary;

const TEMPLATE: &str = include_str!("../templates/dashboard.html");

/// How often the page polls `/api/llp-total`.
pub const REFRESH_INTERVAL_MS: u64 = 30_000;

/// Render the dashboard for a freshly fetched summary.
pub fn render_dashboard(summary: &PositionSummary, account_index: u64) -> String {
    let total_raw = serde_json::to_string(&summary.total).unwrap_or_else(|_| "0".to_string());

    TEMPLATE
        .replace("{{ACCOUNT_INDEX}}", &account_index.to_string())
        .replace("{{TOTAL_FORMATTED}}", &format_usd(summary.total))
        .replace("{{COUNT}}", &summary.count.to_string())
        .replace("{{TOTAL_RAW}}", &total_raw)
        .replace("{{REFRESH_MS}}", &REFRESH_INTERVAL_MS.to_string())
}

/// Format as en-US with two decimals and thousands separators, e.g. `-1,234.50`.
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // A value that rounds to zero prints without a sign.
    let sign = if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, frac_part)
}
