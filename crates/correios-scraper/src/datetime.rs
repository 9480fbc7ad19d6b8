//! Normalization of the `"Data: DD/MM/YYYY | Hora: HH:MM"` status line.

use chrono::{NaiveDate, NaiveTime};
use correios_core::LastMovement;

use crate::error::ExtractionError;
use crate::extract::strip_label;
use crate::markup::{DATE_FORMAT, DATE_LABEL, DATE_TIME_SEPARATOR, TIME_FORMAT, TIME_LABEL};

/// Splits the status line into its raw date and time tokens.
///
/// # Errors
///
/// Returns [`ExtractionError::DateTimeFormat`] if the separator is missing.
pub fn split_date_time(line: &str) -> Result<(&str, &str), ExtractionError> {
    line.split_once(DATE_TIME_SEPARATOR)
        .ok_or_else(|| ExtractionError::DateTimeFormat {
            token: line.trim().to_owned(),
            reason: format!("missing \"{}\" separator", DATE_TIME_SEPARATOR.trim()),
        })
}

/// Parses raw date and time tokens, labels included, into a [`LastMovement`].
///
/// `"Data: 05/03/2024"` and `"Hora:14:07"` give `05/03` and `14:07`.
///
/// # Errors
///
/// Returns [`ExtractionError::DateTimeFormat`] naming the offending token if
/// either does not parse.
pub fn normalize_date_time(
    date_token: &str,
    time_token: &str,
) -> Result<LastMovement, ExtractionError> {
    let date_text = strip_label(date_token, DATE_LABEL);
    if !has_four_digit_year(date_text) {
        return Err(ExtractionError::DateTimeFormat {
            token: date_token.trim().to_owned(),
            reason: "year must be four digits".to_owned(),
        });
    }
    let date = NaiveDate::parse_from_str(date_text, DATE_FORMAT).map_err(|e| {
        ExtractionError::DateTimeFormat {
            token: date_token.trim().to_owned(),
            reason: e.to_string(),
        }
    })?;

    let time = NaiveTime::parse_from_str(strip_label(time_token, TIME_LABEL), TIME_FORMAT)
        .map_err(|e| ExtractionError::DateTimeFormat {
            token: time_token.trim().to_owned(),
            reason: e.to_string(),
        })?;

    Ok(LastMovement::new(date, time))
}

/// chrono's `%Y` also takes signed and short years.
fn has_four_digit_year(date: &str) -> bool {
    date.rsplit_once('/').is_some_and(|(_, year)| {
        year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit())
    })
}
