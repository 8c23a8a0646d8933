// Utility functions: dollar and date formatting
use chrono::NaiveDate;

/// `$12.99`
pub fn usd(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${fixed}")
}

/// `$12.99`, or `$—` when the price is missing.
pub fn usd_or_dash(value: Option<f64>) -> String {
    value.map(usd).unwrap_or_else(|| "$—".to_string())
}

/// `$1,234.56`, with thousands separators.
pub fn usd_grouped(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// `+$1.20 vs Walmart` / `-$0.75 vs Walmart`. Zero counts as `+`.
pub fn delta_label(delta: f64, against: &str) -> String {
    let sign = if delta >= 0.0 { '+' } else { '-' };
    format!("{sign}{} vs {against}", usd_grouped(delta.abs()))
}

/// `Updated January 12, 2025`
pub fn updated_banner(date: NaiveDate) -> String {
    format!("Updated {}", date.format("%B %-d, %Y"))
}
