use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Tracking page URL with a single `{}` placeholder for the code.
    pub tracking_url_template: String,
    pub shipments_path: PathBuf,
    /// Optional YAML icon table; the built-in table is used when unset.
    pub icons_path: Option<PathBuf>,
    pub request_timeout_secs: u64,
    pub refresh_interval_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
}
