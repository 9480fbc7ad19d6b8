pub mod client;
pub mod datetime;
pub mod error;
pub mod extract;
pub mod markup;
mod rate_limit;
pub mod url;

pub use client::TrackingClient;
pub use error::{ExtractionError, ScraperError, StructureProblem};
pub use extract::extract;
pub use url::tracking_url;
