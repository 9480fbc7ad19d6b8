//! Display entity for one tracked shipment.
//!
//! Holds the last applied [`TrackingOutcome`] in display form: a state label,
//! an icon, and the labeled attributes a dashboard shows next to it.

use chrono::{DateTime, Utc};

use crate::icons::IconTable;
use crate::record::{Place, TrackingOutcome};

pub const ATTR_DESCRIPTION: &str = "Descrição";
pub const ATTR_CODE: &str = "Código Objeto";
pub const ATTR_ORIGIN: &str = "Origem";
pub const ATTR_DESTINATION: &str = "Destino";
pub const ATTR_LOCATION: &str = "Local";
pub const ATTR_LAST_MOVEMENT: &str = "Última Movimentação";

#[derive(Debug, Clone)]
pub struct ShipmentSensor {
    code: String,
    description: String,
    state: Option<String>,
    icon: Option<String>,
    color: Option<String>,
    origin: Option<String>,
    destination: Option<String>,
    location: Option<String>,
    last_movement: Option<String>,
    last_refreshed: Option<DateTime<Utc>>,
}

impl ShipmentSensor {
    #[must_use]
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            state: None,
            icon: None,
            color: None,
            origin: None,
            destination: None,
            location: None,
            last_movement: None,
            last_refreshed: None,
        }
    }

    /// `"<description> (<code>)"`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{} ({})", self.description, self.code)
    }

    #[must_use]
    pub fn unique_id(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// `None` until the first refresh has been applied.
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    #[must_use]
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    #[must_use]
    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    #[must_use]
    pub fn last_movement(&self) -> Option<&str> {
        self.last_movement.as_deref()
    }

    #[must_use]
    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed
    }

    /// Replace the displayed fields with those of `outcome`.
    ///
    /// Fields belonging to the other place shape are cleared, so a sensor that
    /// moves from "at location" to "in transit" never keeps the old location.
    pub fn apply(&mut self, outcome: &TrackingOutcome, icons: &IconTable) {
        let status = outcome.status_label();
        let spec = icons.lookup(status);

        self.state = Some(status.to_string());
        self.icon = Some(spec.icon.clone());
        self.color = Some(spec.color.clone());
        self.origin = None;
        self.destination = None;
        self.location = None;
        self.last_movement = None;

        if let Some(record) = outcome.record() {
            self.last_movement = Some(record.when().display());
            match record.place() {
                Place::AtLocation { place } => {
                    self.location = Some(place.clone());
                }
                Place::InTransit {
                    origin,
                    destination,
                } => {
                    self.origin = Some(origin.clone());
                    self.destination = Some(destination.clone());
                }
            }
        }

        self.last_refreshed = Some(Utc::now());
    }

    /// Labeled attributes in display order. Missing values render as `""`.
    #[must_use]
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let text = |v: Option<&str>| v.unwrap_or_default().to_owned();
        vec![
            (ATTR_DESCRIPTION, self.description.clone()),
            (ATTR_CODE, self.code.clone()),
            (ATTR_ORIGIN, text(self.origin.as_deref())),
            (ATTR_DESTINATION, text(self.destination.as_deref())),
            (ATTR_LOCATION, text(self.location.as_deref())),
            (ATTR_LAST_MOVEMENT, text(self.last_movement.as_deref())),
        ]
    }
}
