use crate::config::error::{ConfigError, Result};
use crate::config::loader::AppConfig;
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

/// Draft-07 schema the merged configuration must satisfy
const APP_CONFIG_SCHEMA: &str = include_str!("schemas/app_config.schema.json");

/// Checks a merged [`AppConfig`] against the embedded schema.
pub struct SchemaValidator {
    schema: JSONSchema,
}

impl SchemaValidator {
    pub fn new() -> Result<Self> {
        let schema_value: Value = serde_json::from_str(APP_CONFIG_SCHEMA)
            .map_err(|e| ConfigError::Schema(format!("Failed to parse config schema: {e}")))?;

        let schema = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema_value)
            .map_err(|e| ConfigError::Schema(format!("Failed to compile config schema: {e}")))?;

        Ok(Self { schema })
    }

    /// Validate `config`, reporting every violation with its JSON pointer.
    ///
    /// ```no_run
    /// use normcheck_evaluator::config::{AppConfig, SchemaValidator};
    ///
    /// let validator = SchemaValidator::new()?;
    /// validator.validate(&AppConfig::default())?;
    /// # Ok::<(), normcheck_evaluator::config::ConfigError>(())
    /// ```
    pub fn validate(&self, config: &AppConfig) -> Result<()> {
        let instance = serde_json::to_value(config)
            .map_err(|e| ConfigError::Schema(format!("Failed to serialize config: {e}")))?;

        let violations: Vec<String> = match self.schema.validate(&instance) {
            Ok(()) => return Ok(()),
            Err(errors) => errors
                .map(|e| {
                    let pointer = e.instance_path.to_string();
                    let location = if pointer.is_empty() {
                        "root".to_string()
                    } else {
                        pointer
                    };
                    format!("{e} at '{location}'")
                })
                .collect(),
        };

        Err(ConfigError::Schema(format!(
            "Configuration validation failed ({} error{}):\n  - {}",
            violations.len(),
            if violations.len() == 1 { "" } else { "s" },
            violations.join("\n  - ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn validator() -> SchemaValidator {
        SchemaValidator::new().expect("Failed to create validator")
    }

    #[test]
    fn default_config_is_valid() {
        let result = validator().validate(&AppConfig::default());
        assert!(result.is_ok(), "Default config should be valid: {result:?}");
    }

    #[test]
    fn catalog_paths_are_accepted() {
        let mut config = AppConfig::default();
        config.catalog.catalog_path = Some(PathBuf::from("norms.json"));
        config.catalog.use_cases_path = Some(PathBuf::from("use-cases.json"));
        assert!(validator().validate(&config).is_ok());
    }

    #[test]
    fn duplicate_trigger_ids_are_rejected() {
        let mut config = AppConfig::default();
        config.session.high_risk_triggers = vec!["SR-002".into(), "SR-002".into()];

        let err = validator().validate(&config).unwrap_err();
        assert!(matches!(err, ConfigError::Schema(_)));
        assert!(err.to_string().contains("high_risk_triggers"), "{err}");
    }

    #[test]
    fn blank_requirement_id_is_rejected() {
        let mut config = AppConfig::default();
        config.session.fundamental_requirements.push(String::new());

        let err = validator().validate(&config).unwrap_err();
        assert!(
            err.to_string().contains("/session/fundamental_requirements/7"),
            "{err}"
        );
    }

    #[test]
    fn every_violation_is_listed() {
        let mut config = AppConfig::default();
        config.logging.filter = String::new();
        config.session.systemic_risk_triggers = vec!["SR 006".into()];

        let err = validator().validate(&config).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("2 errors"), "{message}");
        assert!(message.contains("/logging/filter"), "{message}");
        assert!(message.contains("/session/systemic_risk_triggers/0"), "{message}");
    }
}
