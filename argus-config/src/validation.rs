//! Custom validation functions shared by the configuration sections.

use validator::ValidationError;

/// Validate that a given value is a power of two.
pub fn validate_power_of_two(value: usize) -> Result<(), ValidationError> {
    if value.is_power_of_two() {
        Ok(())
    } else {
        Err(ValidationError::new("must_be_power_of_two"))
    }
}

/// Validate the event record layout name.
pub fn validate_record_layout(layout: &str) -> Result<(), ValidationError> {
    let re = regex::Regex::new("^(extended|legacy)$")
        .map_err(|_| ValidationError::new("invalid_regex"))?;
    if re.is_match(layout) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_record_layout"))
    }
}

/// Validate a tracing filter directive list such as `info,argus_engine=debug`.
pub fn validate_log_filter(filter: &str) -> Result<(), ValidationError> {
    let re = regex::Regex::new(r"^[A-Za-z0-9_:=,.\-\[\]{}]+$")
        .map_err(|_| ValidationError::new("invalid_regex"))?;
    if re.is_match(filter) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_filter"))
    }
}
