//! Tracking page extractor.
//!
//! Turns the body of a carrier tracking page into a [`TrackingRecord`]. Pure
//! and synchronous: no I/O, no shared state, and the same body always gives
//! the same result.

use std::sync::LazyLock;

use correios_core::{Place, TrackingRecord};
use scraper::{ElementRef, Html, Selector};

use crate::datetime::{normalize_date_time, split_date_time};
use crate::error::{ExtractionError, StructureProblem};
use crate::markup::{
    CONTAINER_SELECTOR, DATE_TIME_ITEM, DESTINATION_ITEM, DESTINATION_LABEL, ITEM_SELECTOR,
    LOCATION_ITEM, LOCATION_LABEL, ORIGIN_ITEM, ORIGIN_LABEL, STATUS_LABEL_SELECTOR,
    STATUS_LIST_SELECTOR, TRANSIT_PHRASE,
};

static CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(CONTAINER_SELECTOR).expect("valid container selector"));
static STATUS_LIST: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(STATUS_LIST_SELECTOR).expect("valid status list selector"));
static STATUS_LABEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(STATUS_LABEL_SELECTOR).expect("valid status label selector"));
static ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(ITEM_SELECTOR).expect("valid item selector"));

/// Extracts the latest tracking event from a tracking page body.
///
/// # Errors
///
/// - [`ExtractionError::ContainerNotFound`] — no tracking block on the page
///   (markup changed, or the code has no history yet).
/// - [`ExtractionError::StatusListNotFound`] — block present, status list absent.
/// - [`ExtractionError::UnexpectedStructure`] — status label missing, too few
///   list items for the record shape, or an empty place field.
/// - [`ExtractionError::DateTimeFormat`] — the date or time does not parse.
pub fn extract(html: &str) -> Result<TrackingRecord, ExtractionError> {
    let document = Html::parse_document(html);

    let container = document
        .select(&CONTAINER)
        .next()
        .ok_or(ExtractionError::ContainerNotFound)?;

    let list = container
        .select(&STATUS_LIST)
        .next()
        .ok_or(ExtractionError::StatusListNotFound)?;

    let status = list
        .select(&STATUS_LABEL)
        .next()
        .map(|b| b.text().collect::<String>().trim().to_owned())
        .filter(|s| !s.is_empty())
        .ok_or(ExtractionError::UnexpectedStructure(
            StructureProblem::MissingStatusLabel,
        ))?;

    let items: Vec<String> = list.select(&ITEM).map(element_text).collect();

    let in_transit = status.contains(TRANSIT_PHRASE);
    let expected = if in_transit {
        DESTINATION_ITEM + 1
    } else {
        LOCATION_ITEM + 1
    };
    let date_time_line = item(&items, DATE_TIME_ITEM, expected)?;

    let place = if in_transit {
        Place::InTransit {
            origin: labeled_field(item(&items, ORIGIN_ITEM, expected)?, ORIGIN_LABEL, "origin")?,
            destination: labeled_field(
                item(&items, DESTINATION_ITEM, expected)?,
                DESTINATION_LABEL,
                "destination",
            )?,
        }
    } else {
        Place::AtLocation {
            place: labeled_field(
                item(&items, LOCATION_ITEM, expected)?,
                LOCATION_LABEL,
                "location",
            )?,
        }
    };

    let (date_token, time_token) = split_date_time(date_time_line)?;
    let when = normalize_date_time(date_token, time_token)?;

    Ok(TrackingRecord::new(status, when, place))
}

/// Text content of `el` with whitespace runs collapsed to single spaces.
fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn item(items: &[String], index: usize, expected: usize) -> Result<&str, ExtractionError> {
    items
        .get(index)
        .map(String::as_str)
        .ok_or(ExtractionError::UnexpectedStructure(
            StructureProblem::TooFewItems {
                expected,
                found: items.len(),
            },
        ))
}

fn labeled_field(
    text: &str,
    label: &str,
    field: &'static str,
) -> Result<String, ExtractionError> {
    let value = strip_label(text, label);
    if value.is_empty() {
        return Err(ExtractionError::UnexpectedStructure(
            StructureProblem::EmptyField { field },
        ));
    }
    Ok(value.to_owned())
}

/// Removes a leading `label`, an optional colon, and surrounding whitespace.
///
/// The label only matches as a whole word, so `"Localidade"` is left alone
/// when stripping `"Local"`. Text without the label is returned trimmed.
pub(crate) fn strip_label<'a>(text: &'a str, label: &str) -> &'a str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix(label) else {
        return text;
    };
    if rest.chars().next().is_some_and(char::is_alphanumeric) {
        return text;
    }
    let rest = rest.trim_start();
    rest.strip_prefix(':').unwrap_or(rest).trim()
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
