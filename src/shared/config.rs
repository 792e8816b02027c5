//! Application configuration. Data location and log filter.

use serde::Deserialize;

/// Directory used when neither the CLI nor the environment names one.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Log filter used when RUST_LOG and PROJMAN_LOG_FILTER are both unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Directory holding users.json, projects.json and tasks.json. Read from PROJMAN_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// tracing-subscriber EnvFilter directive. Read from PROJMAN_LOG_FILTER.
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl AppConfig {
    /// Environment (PROJMAN_*) plus an optional file named by PROJMAN_CONFIG.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("PROJMAN_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c = c.add_source(config::Environment::with_prefix("PROJMAN"));
        c.build()?.try_deserialize()
    }

    /// Returns the data directory. Defaults to ./data.
    pub fn data_dir_or_default(&self) -> String {
        self.data_dir
            .clone()
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())
    }

    /// Returns the log filter. Defaults to "warn" so tables stay readable.
    pub fn log_filter_or_default(&self) -> String {
        self.log_filter
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
    }
}
