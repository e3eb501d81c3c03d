use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::projection::HistogramSettings;

/// Env var naming an optional JSON config file.
pub const CONFIG_ENV: &str = "STUDENT_DASHBOARD_CONFIG";
/// Env var overriding the dataset path.
pub const DATA_ENV: &str = "STUDENT_DASHBOARD_DATA";

pub const DEFAULT_DATA_PATH: &str = "StudentPerformanceFactors.csv";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Settings read once at startup.  Every field has a default, so an empty
/// `{}` config is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    /// Initial position of the exam score slider.
    pub default_score_range: (f64, f64),
    pub histogram: HistogramSettings,
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            default_score_range: (50.0, 100.0),
            histogram: HistogramSettings::default(),
            window_size: [1400.0, 900.0],
        }
    }
}

impl DashboardConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the configuration for this launch.
    ///
    /// Data path precedence: command-line argument, `STUDENT_DASHBOARD_DATA`,
    /// config file, built-in default.
    pub fn resolve(
        config_file: Option<PathBuf>,
        data_env: Option<PathBuf>,
        data_arg: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_file {
            Some(path) => {
                log::info!("Reading config from {}", path.display());
                Self::from_file(&path)?
            }
            None => Self::default(),
        };
        if let Some(path) = data_arg.or(data_env) {
            config.data_path = path;
        }
        Ok(config)
    }

    /// [`resolve`](Self::resolve) from the process environment and arguments.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(
            std::env::var_os(CONFIG_ENV).map(PathBuf::from),
            std::env::var_os(DATA_ENV).map(PathBuf::from),
            std::env::args_os().nth(1).map(PathBuf::from),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::histogram::BinCount;
    use std::io::Write;

    fn config_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn empty_object_gives_defaults() {
        let file = config_file("{}");
        assert_eq!(
            DashboardConfig::from_file(file.path()).unwrap(),
            DashboardConfig::default()
        );
    }

    #[test]
    fn reads_partial_config() {
        let file = config_file(
            r#"{ "default_score_range": [60, 90], "histogram": { "bins": { "fixed": 12 } } }"#,
        );
        let config = DashboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.default_score_range, (60.0, 90.0));
        assert_eq!(config.histogram.bins, BinCount::Fixed(12));
        assert_eq!(config.histogram.density_points, 200);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
    }

    #[test]
    fn unknown_key_is_an_error() {
        let file = config_file(r#"{ "colour": "blue" }"#);
        let err = DashboardConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = DashboardConfig::from_file(Path::new("/no/such/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn argument_beats_environment_beats_file() {
        let file = config_file(r#"{ "data_path": "from_file.csv" }"#);

        let config = DashboardConfig::resolve(Some(file.path().into()), None, None).unwrap();
        assert_eq!(config.data_path, PathBuf::from("from_file.csv"));

        let config = DashboardConfig::resolve(
            Some(file.path().into()),
            Some("from_env.csv".into()),
            None,
        )
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("from_env.csv"));

        let config = DashboardConfig::resolve(
            Some(file.path().into()),
            Some("from_env.csv".into()),
            Some("from_arg.csv".into()),
        )
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("from_arg.csv"));
    }
}
