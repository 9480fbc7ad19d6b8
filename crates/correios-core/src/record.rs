//! Normalized tracking data produced by the page extractor.
//!
//! A [`TrackingRecord`] is only ever built fully populated; the "nothing to
//! show" case is the separate [`TrackingOutcome::NotFound`] variant rather
//! than a record with empty fields.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Status label shown when a shipment cannot be tracked.
pub const NOT_FOUND_STATUS: &str = "Objeto não encontrado";

/// Day, month and time of the most recent status change.
///
/// The carrier's page carries a year, but its own display drops it, so only
/// `DD/MM` and `HH:MM` are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastMovement {
    day: u32,
    month: u32,
    hour: u32,
    minute: u32,
}

impl LastMovement {
    #[must_use]
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            day: date.day(),
            month: date.month(),
            hour: time.hour(),
            minute: time.minute(),
        }
    }

    /// `DD/MM`, zero padded.
    #[must_use]
    pub fn date_label(&self) -> String {
        format!("{:02}/{:02}", self.day, self.month)
    }

    /// `HH:MM`, zero padded.
    #[must_use]
    pub fn time_label(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }

    /// `"05/03 às 14:07"`, the form the display entity shows.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} às {}", self.date_label(), self.time_label())
    }
}

impl Serialize for LastMovement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LastMovement", 2)?;
        state.serialize_field("date", &self.date_label())?;
        state.serialize_field("time", &self.time_label())?;
        state.end()
    }
}

/// Where the shipment is: a single facility, or moving between two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Place {
    AtLocation { place: String },
    InTransit { origin: String, destination: String },
}

impl Place {
    #[must_use]
    pub fn is_in_transit(&self) -> bool {
        matches!(self, Place::InTransit { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackingRecord {
    status: String,
    when: LastMovement,
    place: Place,
}

impl TrackingRecord {
    #[must_use]
    pub fn new(status: impl Into<String>, when: LastMovement, place: Place) -> Self {
        Self {
            status: status.into(),
            when,
            place,
        }
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn when(&self) -> &LastMovement {
        &self.when
    }

    #[must_use]
    pub fn place(&self) -> &Place {
        &self.place
    }
}

/// Result of one refresh as seen by the display layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "record", rename_all = "snake_case")]
pub enum TrackingOutcome {
    Tracked(TrackingRecord),
    NotFound,
}

impl TrackingOutcome {
    /// The status phrase to display, or [`NOT_FOUND_STATUS`].
    #[must_use]
    pub fn status_label(&self) -> &str {
        match self {
            TrackingOutcome::Tracked(record) => record.status(),
            TrackingOutcome::NotFound => NOT_FOUND_STATUS,
        }
    }

    #[must_use]
    pub fn record(&self) -> Option<&TrackingRecord> {
        match self {
            TrackingOutcome::Tracked(record) => Some(record),
            TrackingOutcome::NotFound => None,
        }
    }
}

impl From<TrackingRecord> for TrackingOutcome {
    fn from(record: TrackingRecord) -> Self {
        TrackingOutcome::Tracked(record)
    }
}
