use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

pub const DEFAULT_DESCRIPTION: &str = "Encomenda";

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentConfig {
    pub code: String,
    #[serde(default = "default_description")]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ShipmentsFile {
    pub shipments: Vec<ShipmentConfig>,
}

/// Load and validate the tracked shipments from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_shipments(path: &Path) -> Result<ShipmentsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_shipments(&content, path)
}

fn parse_shipments(content: &str, path: &Path) -> Result<ShipmentsFile, ConfigError> {
    let mut file: ShipmentsFile =
        serde_yaml::from_str(content).map_err(|e| ConfigError::FileParse {
            path: path.display().to_string(),
            source: e,
        })?;

    for shipment in &mut file.shipments {
        shipment.code = shipment.code.trim().to_string();
    }

    validate_shipments(&file)?;

    Ok(file)
}

fn validate_shipments(file: &ShipmentsFile) -> Result<(), ConfigError> {
    let mut seen_codes = HashSet::new();

    for shipment in &file.shipments {
        if shipment.code.is_empty() {
            return Err(ConfigError::Validation(
                "shipment code must be non-empty".to_string(),
            ));
        }

        if !seen_codes.insert(shipment.code.to_uppercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate shipment code: '{}'",
                shipment.code
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Result<ShipmentsFile, ConfigError> {
        parse_shipments(yaml, Path::new("shipments.yaml"))
    }

    #[test]
    fn parses_shipments_with_default_description() {
        let file = parse(
            r"
shipments:
  - code: QB123456789BR
    description: Livros
  - code: ' NL987654321BR '
",
        )
        .unwrap();
        assert_eq!(file.shipments.len(), 2);
        assert_eq!(file.shipments[0].description, "Livros");
        assert_eq!(file.shipments[1].code, "NL987654321BR");
        assert_eq!(file.shipments[1].description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn rejects_empty_code() {
        let err = parse("shipments:\n  - code: '   '\n").unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn rejects_duplicate_codes_case_insensitively() {
        let err = parse("shipments:\n  - code: QB123456789BR\n  - code: qb123456789br\n")
            .unwrap_err();
        assert!(err.to_string().contains("duplicate shipment code"));
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let err = parse("shipments: [code: ").unwrap_err();
        assert!(matches!(err, ConfigError::FileParse { ref path, .. } if path == "shipments.yaml"));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load_shipments(Path::new("/nonexistent/shipments.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileIo { ref path, .. } if path.contains("shipments.yaml")));
    }
}
