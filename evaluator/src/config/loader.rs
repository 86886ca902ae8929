use std::path::{Path, PathBuf};

use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::config::error::{ConfigError, Result};
use crate::config::validator::SchemaValidator;

/// Merged configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Catalog file locations
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Question flow settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Log filter settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Schema validation toggle
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Catalog file locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Norm catalog JSON (norms + shared requirement library)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,

    /// Use-case area catalog JSON
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_cases_path: Option<PathBuf>,
}

/// Question flow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Shared requirements asked up front, in this order
    #[serde(default = "default_fundamental_requirements")]
    pub fundamental_requirements: Vec<String>,

    /// Any of these answered yes runs the high-risk pathway
    #[serde(default = "default_high_risk_triggers")]
    pub high_risk_triggers: Vec<String>,

    /// Any of these answered yes runs the systemic-risk pathway
    #[serde(default = "default_systemic_risk_triggers")]
    pub systemic_risk_triggers: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Validate the merged configuration against the embedded schema
    #[serde(default = "default_schema_validation")]
    pub schema_validation: bool,
}

fn default_fundamental_requirements() -> Vec<String> {
    [
        "SR-001", "SR-002", "SR-003", "SR-006", "SR-007", "SR-008", "SR-009",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
fn default_high_risk_triggers() -> Vec<String> {
    vec!["SR-002".to_string(), "SR-003".to_string()]
}
fn default_systemic_risk_triggers() -> Vec<String> {
    vec!["SR-006".to_string()]
}
fn default_log_filter() -> String {
    "info".to_string()
}
fn default_schema_validation() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fundamental_requirements: default_fundamental_requirements(),
            high_risk_triggers: default_high_risk_triggers(),
            systemic_risk_triggers: default_systemic_risk_triggers(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            schema_validation: default_schema_validation(),
        }
    }
}

impl CatalogConfig {
    /// Norm catalog path, or an error naming the missing setting
    pub fn require_catalog_path(&self) -> Result<&Path> {
        self.catalog_path
            .as_deref()
            .ok_or_else(|| ConfigError::MissingSetting("catalog.catalog_path".to_string()))
    }

    /// Use-case catalog path, or an error naming the missing setting
    pub fn require_use_cases_path(&self) -> Result<&Path> {
        self.use_cases_path
            .as_deref()
            .ok_or_else(|| ConfigError::MissingSetting("catalog.use_cases_path".to_string()))
    }
}

/// Environment keys parsed as comma-separated lists
const LIST_KEYS: &[&str] = &[
    "session.fundamental_requirements",
    "session.high_risk_triggers",
    "session.systemic_risk_triggers",
];

const ENV_PREFIX: &str = "NORMCHECK";

/// Builds an [`AppConfig`] from defaults, an optional TOML file and the
/// environment.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `path` over the defaults. The file must exist.
    pub fn with_file<P: AsRef<Path>>(self, path: P) -> Self {
        Self {
            file: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Merge all layers, then validate unless `validation.schema_validation`
    /// is off.
    pub fn load(&self) -> Result<AppConfig> {
        let merged = self.sources()?.build()?;
        let app_config: AppConfig = merged.try_deserialize()?;

        if app_config.validation.schema_validation {
            SchemaValidator::new()?.validate(&app_config)?;
        }

        tracing::debug!(file = ?self.file, "configuration loaded");
        Ok(app_config)
    }

    fn sources(&self) -> Result<ConfigBuilder<DefaultState>> {
        let defaults = serde_json::to_string(&AppConfig::default())?;
        let mut builder =
            Config::builder().add_source(File::from_str(&defaults, FileFormat::Json));

        if let Some(path) = &self.file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }
            builder = builder.add_source(File::from(path.as_path()));
        }

        Ok(builder.add_source(environment()))
    }

    /// First existing file among `./normcheck.toml`,
    /// `<config dir>/normcheck/config.toml` and `~/.normcheck.toml`.
    pub fn find_config_file() -> Option<PathBuf> {
        let candidates = [
            Some(PathBuf::from("normcheck.toml")),
            dirs::config_dir().map(|dir| dir.join("normcheck").join("config.toml")),
            dirs::home_dir().map(|dir| dir.join(".normcheck.toml")),
        ];
        candidates.into_iter().flatten().find(|path| path.is_file())
    }

    /// [`load`](Self::load) with whatever [`find_config_file`](Self::find_config_file)
    /// returns, or defaults plus environment when nothing is found.
    pub fn load_default() -> Result<AppConfig> {
        match Self::find_config_file() {
            Some(path) => Self::new().with_file(path).load(),
            None => Self::new().load(),
        }
    }
}

/// `NORMCHECK_<SECTION>__<KEY>`, e.g. `NORMCHECK_LOGGING__FILTER=debug`.
fn environment() -> Environment {
    LIST_KEYS.iter().fold(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(","),
        |env, key| env.with_list_parse_key(key),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("normcheck.toml");
        std::fs::write(&path, content).expect("write config");
        (dir, path)
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = AppConfig::default();
        assert_eq!(config.session.fundamental_requirements.len(), 7);
        assert_eq!(config.session.fundamental_requirements[0], "SR-001");
        assert_eq!(config.session.high_risk_triggers, vec!["SR-002", "SR-003"]);
        assert_eq!(config.session.systemic_risk_triggers, vec!["SR-006"]);
        assert_eq!(config.logging.filter, "info");
        assert!(config.validation.schema_validation);
        assert!(config.catalog.catalog_path.is_none());
    }

    #[test]
    #[serial]
    fn loads_without_file() {
        let config = ConfigLoader::new()
            .load()
            .expect("Failed to load default config");
        assert_eq!(config.logging.filter, "info");
        assert_eq!(config.session.fundamental_requirements.len(), 7);
    }

    #[test]
    #[serial]
    fn toml_file_overrides_defaults() {
        let (_dir, config_path) = write_config(
            r#"
[catalog]
catalog_path = "catalog/norms.json"
use_cases_path = "catalog/use-cases.json"

[session]
fundamental_requirements = ["SR-002", "SR-006"]

[logging]
filter = "normcheck_evaluator=debug"
"#,
        );

        let config = ConfigLoader::new()
            .with_file(&config_path)
            .load()
            .expect("Failed to load config");

        assert_eq!(
            config.catalog.catalog_path,
            Some(PathBuf::from("catalog/norms.json"))
        );
        assert_eq!(
            config.session.fundamental_requirements,
            vec!["SR-002", "SR-006"]
        );
        // Untouched keys keep their defaults
        assert_eq!(config.session.high_risk_triggers, vec!["SR-002", "SR-003"]);
        assert_eq!(config.logging.filter, "normcheck_evaluator=debug");
    }

    #[test]
    #[serial]
    fn environment_overrides_file() {
        let (_dir, config_path) = write_config(
            r#"
[logging]
filter = "warn"
"#,
        );

        unsafe {
            env::set_var("NORMCHECK_LOGGING__FILTER", "debug");
            env::set_var("NORMCHECK_SESSION__SYSTEMIC_RISK_TRIGGERS", "SR-006,SR-012");
        }

        let result = ConfigLoader::new().with_file(&config_path).load();

        unsafe {
            env::remove_var("NORMCHECK_LOGGING__FILTER");
            env::remove_var("NORMCHECK_SESSION__SYSTEMIC_RISK_TRIGGERS");
        }

        let config = result.expect("Failed to load config");
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(
            config.session.systemic_risk_triggers,
            vec!["SR-006", "SR-012"]
        );
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = ConfigLoader::new()
            .with_file("/nonexistent/normcheck.toml")
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    #[serial]
    fn schema_rejects_malformed_ids() {
        let (_dir, config_path) = write_config(
            r#"
[session]
fundamental_requirements = ["SR-001", "SR 002"]
"#,
        );

        let err = ConfigLoader::new()
            .with_file(&config_path)
            .load()
            .unwrap_err();
        assert!(
            matches!(err, ConfigError::Schema(_)),
            "Expected Schema error, got: {err:?}"
        );
        assert!(err.to_string().contains("fundamental_requirements"), "{err}");
    }

    #[test]
    #[serial]
    fn schema_validation_can_be_disabled() {
        let (_dir, config_path) = write_config(
            r#"
[logging]
filter = ""

[validation]
schema_validation = false
"#,
        );

        let config = ConfigLoader::new()
            .with_file(&config_path)
            .load()
            .expect("Config should load when validation is disabled");
        assert_eq!(config.logging.filter, "");
    }

    #[test]
    fn require_paths_name_missing_setting() {
        let catalog = CatalogConfig::default();
        let err = catalog.require_use_cases_path().unwrap_err();
        assert!(err.to_string().contains("catalog.use_cases_path"));
    }
}
