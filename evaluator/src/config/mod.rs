//! Runtime configuration.
//!
//! Three layers, later ones winning:
//!
//! 1. built-in defaults
//! 2. a TOML file (`--config`, `./normcheck.toml`, `~/.config/normcheck/config.toml`
//!    or `~/.normcheck.toml`)
//! 3. `NORMCHECK_*` environment variables, `__` between section and key,
//!    e.g. `NORMCHECK_CATALOG__CATALOG_PATH=catalog.json`
//!
//! The merged result is checked against an embedded JSON schema.
//!
//! ```no_run
//! use normcheck_evaluator::config::ConfigLoader;
//!
//! let config = ConfigLoader::new().with_file("normcheck.toml").load()?;
//! println!("{:?}", config.session.fundamental_requirements);
//! # Ok::<(), normcheck_evaluator::config::ConfigError>(())
//! ```

pub mod error;
pub mod loader;
pub mod validator;

pub use error::{ConfigError, Result};
pub use loader::{
    AppConfig, CatalogConfig, ConfigLoader, LoggingConfig, SessionConfig, ValidationConfig,
};
pub use validator::SchemaValidator;
