//! Timestamps stamped into generated files.
//!
//! Both helpers take the instant explicitly so callers can fix it once per
//! run (every sitemap entry shares one `lastmod`) and tests can pin it.

use chrono::{DateTime, SecondsFormat, Utc};

/// Calendar date as used by `<lastmod>`: `YYYY-MM-DD`.
pub fn to_ymd(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// ISO-8601 timestamp with a `Z` suffix, never the `+00:00` form.
pub fn to_iso_utc(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
