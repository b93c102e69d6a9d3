// SPDX-License-Identifier: MIT

//! Timestamp formatting shared by records and responses.

use chrono::{DateTime, SecondsFormat, Utc};

/// RFC 3339, whole seconds, `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Current time via [`format_utc_rfc3339`].
pub fn now_rfc3339() -> String {
    format_utc_rfc3339(Utc::now())
}
