//! Text helpers for rendering CMS content.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;

/// Shown when a date string cannot be parsed
pub const UNKNOWN_DATE: &str = "未知日期";

fn dangerous_tags() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"(?is)<script\b.*?</script\s*>",
            r"(?i)<iframe\b[^>]*>",
            r"(?i)<object\b[^>]*>",
            r"(?i)<embed\b[^>]*>",
        ]
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
    })
}

/// Strip script blocks and iframe/object/embed opening tags
pub fn sanitize_html(html: &str) -> String {
    dangerous_tags()
        .iter()
        .fold(html.to_string(), |acc, re| re.replace_all(&acc, "").into_owned())
}

/// Cut `text` to `max_chars` characters, adding `...` when cut
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim())
}

/// Format an RFC 3339 timestamp or `YYYY-MM-DD` date as `2024年1月5日`
pub fn format_date(value: &str) -> String {
    let value = value.trim();
    let date = DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"));

    match date {
        Ok(date) => date.format("%Y年%-m月%-d日").to_string(),
        Err(_) => UNKNOWN_DATE.to_string(),
    }
}
