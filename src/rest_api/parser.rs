//! # Query Parameter Parser
//!
//! Parses the query parameters the REST routes accept.

use std::collections::HashMap;

use super::errors::{RestError, RestResult};

/// Default number of users returned by the top-rated listing
pub const DEFAULT_TOP_RATED_LIMIT: usize = 5;

/// Top-rated `limit`: the leading decimal integer of the parameter.
///
/// Absent, unparseable, zero and negative values fall back to
/// [`DEFAULT_TOP_RATED_LIMIT`].
pub fn parse_top_rated_limit(params: &HashMap<String, String>) -> usize {
    params
        .get("limit")
        .and_then(|raw| leading_integer(raw))
        .filter(|limit| *limit > 0)
        .unwrap_or(DEFAULT_TOP_RATED_LIMIT)
}

/// Leading non-negative integer, saturating on overflow. `None` for negatives.
fn leading_integer(raw: &str) -> Option<usize> {
    let raw = raw.trim_start();
    if raw.starts_with('-') {
        return None;
    }

    let digits = raw.strip_prefix('+').unwrap_or(raw);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Only overflow can fail here
    Some(digits[..end].parse().unwrap_or(usize::MAX))
}

/// Required `userEmail` query parameter
pub fn parse_user_email(params: &HashMap<String, String>) -> RestResult<String> {
    params
        .get("userEmail")
        .filter(|email| !email.is_empty())
        .cloned()
        .ok_or(RestError::MissingParam("userEmail"))
}
