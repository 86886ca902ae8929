//! Catalog file loading.
//!
//! Read path gives a deterministic error for missing or unparsable files.

use std::path::Path;

use super::CatalogError;
use super::schema::{Catalog, UseCaseCatalog};

/// Load the norm catalog JSON from disk.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = read_document(path)?;
    let catalog = content.parse::<Catalog>().map_err(|err| with_path(err, path))?;
    tracing::debug!(
        path = %path.display(),
        norms = catalog.len(),
        "loaded norm catalog"
    );
    Ok(catalog)
}

/// Load the use-case area catalog JSON from disk.
pub fn load_use_cases(path: &Path) -> Result<UseCaseCatalog, CatalogError> {
    let content = read_document(path)?;
    let catalog = content
        .parse::<UseCaseCatalog>()
        .map_err(|err| with_path(err, path))?;
    tracing::debug!(
        path = %path.display(),
        areas = catalog.areas.len(),
        "loaded use-case catalog"
    );
    Ok(catalog)
}

fn read_document(path: &Path) -> Result<String, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::NotFound {
            path: path.to_path_buf(),
        });
    }

    std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn with_path(err: CatalogError, path: &Path) -> CatalogError {
    match err {
        CatalogError::Serde(source) => CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    }
}
