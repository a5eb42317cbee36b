use chrono::{DateTime, NaiveDateTime, Utc};

use super::ApiError;
use crate::constants::START_TIME_FORMAT;
use crate::models::{ArtistForm, VenueForm};

pub fn validate_required<'a>(field: &str, value: &'a str) -> Result<&'a str, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{} cannot be empty", field)));
    }
    Ok(trimmed)
}

pub fn validate_venue_form(form: &VenueForm) -> Result<(), ApiError> {
    validate_required("Name", &form.name)?;
    validate_required("City", &form.city)?;
    validate_required("State", &form.state)?;
    Ok(())
}

pub fn validate_artist_form(form: &ArtistForm) -> Result<(), ApiError> {
    validate_required("Name", &form.name)?;
    validate_required("City", &form.city)?;
    validate_required("State", &form.state)?;
    Ok(())
}

/// Accepts RFC 3339 or `YYYY-MM-DD HH:MM:SS`, the latter read as UTC.
pub fn parse_start_time(value: &str) -> Result<DateTime<Utc>, ApiError> {
    let value = validate_required("Start time", value)?;

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, START_TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| {
            ApiError::validation(format!(
                "Invalid start time: {}. Use RFC 3339 or YYYY-MM-DD HH:MM:SS",
                value
            ))
        })
}
