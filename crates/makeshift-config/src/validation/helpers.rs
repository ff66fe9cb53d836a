//! Shared validation helpers.

/// Push an error if `value` is outside `[min, max]`.
pub(crate) fn validate_range(errors: &mut Vec<String>, name: &str, value: u64, min: u64, max: u64) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error if an id is zero.
pub(crate) fn require_id(errors: &mut Vec<String>, name: &str, raw: u64) {
    if raw == 0 {
        errors.push(format!("{name} must be set"));
    }
}
