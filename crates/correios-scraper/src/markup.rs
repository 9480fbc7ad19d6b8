//! Everything that ties the extractor to the carrier's page layout.
//!
//! The tracking page is hand-maintained HTML with no versioning. When the
//! carrier changes it, this is the file to edit.

/// Block holding the tracking history.
pub const CONTAINER_SELECTOR: &str = "div.accordion_2";

/// List describing the most recent event. The first match is the latest.
pub const STATUS_LIST_SELECTOR: &str = "ul.linha_status";

/// Emphasized element inside the status list carrying the status label.
pub const STATUS_LABEL_SELECTOR: &str = "b";

pub const ITEM_SELECTOR: &str = "li";

/// `"Data: 05/03/2024 | Hora: 14:07"`
pub const DATE_TIME_ITEM: usize = 1;
/// `"Local: <place>"`
pub const LOCATION_ITEM: usize = 2;
/// `"Origem: <place>"`
pub const ORIGIN_ITEM: usize = 2;
/// `"Destino: <place>"`
pub const DESTINATION_ITEM: usize = 3;

/// Status substring marking a shipment moving between two facilities.
pub const TRANSIT_PHRASE: &str = "Objeto em transferência";

pub const DATE_TIME_SEPARATOR: &str = " | ";

pub const DATE_LABEL: &str = "Data";
pub const TIME_LABEL: &str = "Hora";
pub const LOCATION_LABEL: &str = "Local";
pub const ORIGIN_LABEL: &str = "Origem";
pub const DESTINATION_LABEL: &str = "Destino";

pub const DATE_FORMAT: &str = "%d/%m/%Y";
pub const TIME_FORMAT: &str = "%H:%M";
