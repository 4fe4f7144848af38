//! Lenient parsing of dashboard query and form parameters.
//!
//! Malformed paging input falls back to defaults rather than failing the
//! whole page.

use super::ApiError;

pub fn parse_page(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// Zero is passed through; the listing treats it as a single empty page.
pub fn parse_per_page(raw: Option<&str>, default: u64, max: u64) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .map_or(default, |per_page| per_page.min(max))
}

/// Blank means "create". Anything else must be a positive integer id.
pub fn parse_student_id(raw: Option<&str>) -> Result<Option<i32>, ApiError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(Some(id)),
        _ => Err(ApiError::validation(format!("Invalid student id: {raw}"))),
    }
}
