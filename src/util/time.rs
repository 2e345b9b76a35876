use chrono::{DateTime, Utc};

/// Formats a timestamp the way the `Date` response header wants it:
/// RFC 1123 in GMT, e.g. `Sun, 13 Jul 2025 11:57:50 GMT`.
pub fn http_date(t: DateTime<Utc>) -> String {
    t.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
