// Cell-level normalization shared by both tables

/// Turns a price cell into a number. Everything except digits, `.` and `-` is
/// dropped first, so `"$1,234.50"` reads as `1234.5`. Absent input, an empty
/// remainder, or a remainder that still isn't a number (`"-"`, `"."`,
/// `"1.2.3"`) all yield `None`.
pub fn price_to_float<T: ToString + ?Sized>(value: Option<&T>) -> Option<f64> {
    let text = value?.to_string();
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Keeps a link only if it is an http(s) URL.
pub fn safe_url(value: Option<&str>) -> Option<String> {
    let url = value?.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        Some(url.to_string())
    } else {
        None
    }
}

/// Trimmed text, or `None` when nothing is left.
pub fn clean_text(value: Option<&str>) -> Option<String> {
    let text = value?.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Canonical form of a column header: trimmed, inner whitespace collapsed,
/// lowercase.
pub fn normalize_header(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_currency_strings() {
        assert_eq!(price_to_float(Some("$12.99")), Some(12.99));
        assert_eq!(price_to_float(Some("$1,234.50")), Some(1234.5));
        assert_eq!(price_to_float(Some(" 3 ")), Some(3.0));
        assert_eq!(price_to_float(Some("USD 4.10 each")), Some(4.1));
        assert_eq!(price_to_float(Some("-$2.00")), Some(-2.0));
    }

    #[test]
    fn absent_when_nothing_numeric_survives() {
        assert_eq!(price_to_float::<str>(None), None);
        assert_eq!(price_to_float(Some("")), None);
        assert_eq!(price_to_float(Some("—")), None);
        assert_eq!(price_to_float(Some("$-")), None);
        assert_eq!(price_to_float(Some("-")), None);
        assert_eq!(price_to_float(Some(".")), None);
        assert_eq!(price_to_float(Some("n/a")), None);
    }

    #[test]
    fn absent_when_remainder_is_not_a_number() {
        assert_eq!(price_to_float(Some("1.2.3")), None);
        assert_eq!(price_to_float(Some("5-10")), None);
    }

    #[test]
    fn coerces_non_string_values() {
        assert_eq!(price_to_float(Some(&7.5_f64)), Some(7.5));
        assert_eq!(price_to_float(Some(&42_i64)), Some(42.0));
    }

    #[test]
    fn symbols_do_not_change_the_value() {
        for (decorated, plain) in [("$12.99", "12.99"), ("$$ 0.5", "0.5"), ("1,000", "1000")] {
            assert_eq!(price_to_float(Some(decorated)), price_to_float(Some(plain)));
        }
    }

    #[test]
    fn safe_url_keeps_http_only() {
        assert_eq!(safe_url(Some(" https://a.example/x ")).as_deref(), Some("https://a.example/x"));
        assert_eq!(safe_url(Some("http://b.example")).as_deref(), Some("http://b.example"));
        assert_eq!(safe_url(Some("ftp://c.example")), None);
        assert_eq!(safe_url(Some("www.example.com")), None);
        assert_eq!(safe_url(Some("")), None);
        assert_eq!(safe_url(None), None);
    }

    #[test]
    fn headers_are_case_and_space_insensitive() {
        assert_eq!(normalize_header("  Walmart   Price "), "walmart price");
        assert_eq!(normalize_header("ITEM"), "item");
    }

    #[test]
    fn clean_text_drops_blank() {
        assert_eq!(clean_text(Some("   ")), None);
        assert_eq!(clean_text(Some(" size differs ")).as_deref(), Some("size differs"));
    }
}
