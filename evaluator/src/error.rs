//! Error types for norm evaluation sessions

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::condition::ConditionError;
use crate::config::ConfigError;

/// Crate result type alias
pub type Result<T> = std::result::Result<T, NormcheckError>;

/// Error taxonomy
///
/// Missing answers are not errors; they evaluate to `Unknown`. Errors are
/// reserved for broken inputs (catalog, config) and for a questioner that
/// cannot produce an answer at all.
#[derive(Debug, Error)]
pub enum NormcheckError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid condition: {0}")]
    Condition(#[from] ConditionError),

    #[error("No answer available for {id}: {reason}")]
    AnswerUnavailable { id: String, reason: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl NormcheckError {
    pub fn answer_unavailable(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AnswerUnavailable {
            id: id.into(),
            reason: reason.into(),
        }
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Whether the error points at a defect in catalog or configuration
    /// content rather than at the runtime environment.
    pub fn is_authoring_defect(&self) -> bool {
        match self {
            Self::Condition(_) | Self::Config(_) => true,
            Self::Catalog(err) => err.is_authoring_defect(),
            Self::AnswerUnavailable { .. } | Self::Io { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_errors_are_authoring_defects() {
        let err = NormcheckError::from(ConditionError::UnknownOperator {
            operator: "XOR".into(),
        });
        assert!(err.is_authoring_defect());
        assert!(err.to_string().contains("XOR"));
    }

    #[test]
    fn unavailable_answer_is_not_a_defect() {
        let err = NormcheckError::answer_unavailable("SR-004a", "input closed");
        assert!(!err.is_authoring_defect());
        assert_eq!(err.to_string(), "No answer available for SR-004a: input closed");
    }
}
