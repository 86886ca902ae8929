//! Norm and use-case catalogs.
//!
//! Catalogs are parsed once and immutable afterwards. Norm metadata is
//! carried for reporting only; evaluation looks at `requirements` alone.

mod loader;
mod schema;

pub use loader::{load_catalog, load_use_cases};
pub use schema::{
    Catalog, Norm, NormMetadata, SharedRequirement, UseCase, UseCaseArea, UseCaseCatalog,
};

use std::path::PathBuf;

use crate::condition::ConditionError;

/// Errors from catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog file not found at expected path.
    #[error("Catalog not found at {path}")]
    NotFound { path: PathBuf },

    /// Filesystem I/O error.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File exists but is not a valid catalog document.
    #[error("Failed to parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// In-memory document is not valid catalog JSON.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A norm's requirement tree contains a broken node.
    #[error("Norm {norm} has an invalid requirement: {source}")]
    InvalidCondition {
        norm: String,
        source: ConditionError,
    },
}

impl CatalogError {
    pub fn is_authoring_defect(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. } | Self::Serde(_) | Self::InvalidCondition { .. }
        )
    }
}
