//! Dashboard configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! command-line flags (applied by `main`). Every key is optional.
//!
//! ```toml
//! [forecast]
//! baseline_revenue = 840432
//! window_start = 2019
//! cutover_year = 2023
//! company_count = 320
//!
//! [login]
//! endpoint = "http://localhost:3000"
//!
//! [logging]
//! level = "info"
//! file = "dashboard.log"
//! console = true
//! ```

use std::path::{Path, PathBuf};

use pl_core::calculations::{DEFAULT_COMPANY_COUNT, ForecastConfig, HistoricalConstants};
use pl_core::{ForecastConfigError, ForecastWindow};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid forecast settings: {0}")]
    Forecast(#[from] ForecastConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastSection {
    pub baseline_revenue: Decimal,
    pub window_start: i32,
    pub cutover_year: i32,
    pub company_count: u32,
}

impl Default for ForecastSection {
    fn default() -> Self {
        let defaults = ForecastConfig::default();
        Self {
            baseline_revenue: defaults.baseline_revenue,
            window_start: defaults.window.start,
            cutover_year: defaults.window.cutover_year,
            company_count: DEFAULT_COMPANY_COUNT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoginSection {
    /// Base URL the login path is appended to.
    pub endpoint: String,
}

impl Default for LoginSection {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    /// Bare level or full `EnvFilter` directive. `RUST_LOG` wins when set.
    pub level: String,
    /// Append log records to this file as well.
    pub file: Option<PathBuf>,
    /// Write log records to stderr.
    pub console: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            console: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub forecast: ForecastSection,
    pub login: LoginSection,
    pub logging: LoggingSection,
}

impl DashboardConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.forecast_config().validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Engine configuration. Historical constants are fixed fixtures.
    pub fn forecast_config(&self) -> ForecastConfig {
        ForecastConfig {
            baseline_revenue: self.forecast.baseline_revenue,
            window: ForecastWindow::new(self.forecast.window_start, self.forecast.cutover_year),
            historical: HistoricalConstants::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn defaults_match_observed_dashboard() {
        let config = DashboardConfig::default();

        assert_eq!(config.forecast.baseline_revenue, dec!(840432));
        assert_eq!(config.forecast.window_start, 2019);
        assert_eq!(config.forecast.cutover_year, 2023);
        assert_eq!(config.forecast.company_count, 320);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.console);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let config = DashboardConfig::from_toml_str("").unwrap();

        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn toml_overrides_selected_keys() {
        let config = DashboardConfig::from_toml_str(
            r#"
            [forecast]
            baseline_revenue = 1000000
            cutover_year = 2024

            [logging]
            level = "debug"
            file = "dash.log"
            console = false
            "#,
        )
        .unwrap();

        assert_eq!(config.forecast.baseline_revenue, dec!(1000000));
        assert_eq!(config.forecast.cutover_year, 2024);
        assert_eq!(config.forecast.window_start, 2019);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("dash.log")));
        assert!(!config.logging.console);
    }

    #[test]
    fn cutover_outside_window_is_rejected() {
        let result = DashboardConfig::from_toml_str("[forecast]\ncutover_year = 2040\n");

        assert!(matches!(result, Err(ConfigError::Forecast(_))));
    }

    #[test]
    fn window_start_near_i32_max_is_rejected() {
        let result = DashboardConfig::from_toml_str(
            "[forecast]\nwindow_start = 2147483645\ncutover_year = 2147483645\n",
        );

        assert!(matches!(
            result,
            Err(ConfigError::Forecast(ForecastConfigError::WindowOutOfRange { .. }))
        ));
    }

    #[test]
    fn oversized_baseline_is_rejected() {
        let result = DashboardConfig::from_toml_str(
            "[forecast]\nbaseline_revenue = \"10000000000000000000000000000\"\n",
        );

        assert!(matches!(
            result,
            Err(ConfigError::Forecast(ForecastConfigError::BaselineTooLarge(_)))
        ));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = DashboardConfig::from_toml_str("[forecast]\nbaseline = 5\n");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = DashboardConfig::load(Path::new("/no/such/dashboard.toml")).unwrap_err();

        assert!(err.to_string().contains("/no/such/dashboard.toml"));
    }

    #[test]
    fn forecast_config_uses_section_values() {
        let mut config = DashboardConfig::default();
        config.forecast.window_start = 2020;
        config.forecast.cutover_year = 2025;

        let forecast = config.forecast_config();

        assert_eq!(forecast.window, ForecastWindow::new(2020, 2025));
        assert_eq!(forecast.historical, HistoricalConstants::default());
    }
}
