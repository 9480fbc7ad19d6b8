//! Status → icon lookup used by the display entity.
//!
//! Keys are the carrier's status phrases and must match byte for byte; any
//! status without an entry falls back to the table's `default`.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconSpec {
    pub icon: String,
    pub color: String,
}

impl IconSpec {
    #[must_use]
    pub fn new(icon: &str, color: &str) -> Self {
        Self {
            icon: icon.to_string(),
            color: color.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IconTable {
    default: IconSpec,
    #[serde(default)]
    statuses: HashMap<String, IconSpec>,
}

impl IconTable {
    /// An empty table where every status maps to `default`.
    #[must_use]
    pub fn new(default: IconSpec) -> Self {
        Self {
            default,
            statuses: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: &str, spec: IconSpec) -> Self {
        self.statuses.insert(status.to_string(), spec);
        self
    }

    /// Exact-match lookup, falling back to the default entry.
    #[must_use]
    pub fn lookup(&self, status: &str) -> &IconSpec {
        self.statuses.get(status).unwrap_or(&self.default)
    }

    /// Whether `status` has its own entry.
    #[must_use]
    pub fn knows(&self, status: &str) -> bool {
        self.statuses.contains_key(status)
    }

    #[must_use]
    pub fn default_spec(&self) -> &IconSpec {
        &self.default
    }

    /// Load an icon table from a YAML file.
    ///
    /// ```yaml
    /// default: { icon: "mdi:package-variant-closed", color: orange }
    /// statuses:
    ///   "Objeto postado": { icon: "mdi:store-outline", color: green }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
            path: path.display().to_string(),
            source: e,
        })?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::FileParse {
            path: path.display().to_string(),
            source: e,
        })
    }
}

impl Default for IconTable {
    fn default() -> Self {
        IconTable::new(IconSpec::new("mdi:package-variant-closed", "orange"))
            .with_status("Objeto postado", IconSpec::new("mdi:store-outline", "green"))
            .with_status(
                "Objeto postado após o horário limite da unidade",
                IconSpec::new("mdi:store-clock-outline", "green"),
            )
            .with_status(
                "Objeto em transferência - por favor aguarde",
                IconSpec::new("mdi:truck-fast-outline", "blue"),
            )
            .with_status(
                "Sua entrega ou retirada nos Correios pode levar mais tempo do que o previsto",
                IconSpec::new("mdi:clock-alert-outline", "yellow"),
            )
            .with_status(
                "Objeto saiu para entrega ao destinatário",
                IconSpec::new("mdi:truck-check-outline", "green"),
            )
            .with_status(
                "Objeto entregue ao destinatário",
                IconSpec::new("mdi:package-variant-closed-check", "purple"),
            )
            .with_status(
                "Objeto aguardando retirada no endereço indicado",
                IconSpec::new("mdi:package-variant-closed-minus", "yellow"),
            )
            .with_status(
                "Objeto não entregue - prazo de retirada encerrado",
                IconSpec::new("mdi:package-variant-closed-remove", "red"),
            )
            .with_status(
                "Informações enviadas para análise da autoridade aduaneira/órgãos anuentes",
                IconSpec::new("mdi:file-arrow-up-down-outline", "blue"),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_status_resolves_to_its_icon() {
        let table = IconTable::default();
        let spec = table.lookup("Objeto entregue ao destinatário");
        assert_eq!(spec.icon, "mdi:package-variant-closed-check");
        assert_eq!(spec.color, "purple");
    }

    #[test]
    fn unknown_status_falls_back_to_default() {
        let table = IconTable::default();
        let spec = table.lookup("Objeto recebido pelos Correios do Brasil");
        assert_eq!(spec, table.default_spec());
        assert_eq!(spec.icon, "mdi:package-variant-closed");
    }

    #[test]
    fn lookup_is_exact_match() {
        let table = IconTable::default();
        assert!(table.knows("Objeto postado"));
        assert!(!table.knows("objeto postado"));
        assert!(!table.knows("Objeto postado "));
    }

    #[test]
    fn parses_yaml_table() {
        let yaml = r#"
default: { icon: "mdi:help", color: grey }
statuses:
  "Objeto postado": { icon: "mdi:store", color: green }
"#;
        let table: IconTable = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(table.lookup("Objeto postado").icon, "mdi:store");
        assert_eq!(table.lookup("anything else").icon, "mdi:help");
    }

    #[test]
    fn yaml_without_statuses_is_default_only() {
        let table: IconTable =
            serde_yaml::from_str("default: { icon: \"mdi:help\", color: grey }").unwrap();
        assert!(!table.knows("Objeto postado"));
        assert_eq!(table.lookup("Objeto postado").color, "grey");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = IconTable::load(Path::new("/nonexistent/icons.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileIo { .. }));
    }
}
