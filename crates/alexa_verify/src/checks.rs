// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! Checks on the decoded envelope that do not involve the certificate.

use crate::AuthError;
use chrono::NaiveDateTime;

/// Format of the `request.timestamp` field.
pub const REQUEST_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

// Same as above, also taking optional fractional seconds before the `Z`.
const REQUEST_TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Rejects a request whose timestamp is more than `max_age_secs` before
/// `now_secs`. Timestamps in the future are accepted. Fractional seconds are
/// accepted and truncated.
///
/// # Errors
///
/// Returns [`AuthError::RequestExpired`] if the request is too old or the
/// timestamp does not parse.
pub fn check_request_timestamp(
    timestamp: &str,
    now_secs: u64,
    max_age_secs: u64,
) -> Result<(), AuthError> {
    let issued_at = NaiveDateTime::parse_from_str(timestamp, REQUEST_TIMESTAMP_PARSE_FORMAT)
        .map_err(|e| {
            log::debug!("unparseable request timestamp '{timestamp}': {e}");
            AuthError::RequestExpired
        })?
        .and_utc()
        .timestamp();
    let age = i128::from(now_secs) - i128::from(issued_at);
    if age > i128::from(max_age_secs) {
        return Err(AuthError::RequestExpired);
    }
    Ok(())
}

/// Rejects a request addressed to another skill. An empty `expected` id turns
/// the check off.
///
/// # Errors
///
/// Returns [`AuthError::ApplicationIDMismatch`] if `expected` is set and
/// differs from `actual`.
pub fn check_application_id(expected: &str, actual: &str) -> Result<(), AuthError> {
    if expected.is_empty() || expected == actual {
        Ok(())
    } else {
        Err(AuthError::ApplicationIDMismatch)
    }
}
