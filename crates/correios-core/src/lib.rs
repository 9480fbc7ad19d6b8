pub mod app_config;
pub mod config;
pub mod icons;
pub mod record;
pub mod sensor;
pub mod shipments;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use icons::{IconSpec, IconTable};
pub use record::{LastMovement, Place, TrackingOutcome, TrackingRecord, NOT_FOUND_STATUS};
pub use sensor::ShipmentSensor;
pub use shipments::{load_shipments, ShipmentConfig, ShipmentsFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    FileParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("validation error: {0}")]
    Validation(String),
}
