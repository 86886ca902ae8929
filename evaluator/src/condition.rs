//! Requirement condition trees.
//!
//! Catalog JSON distinguishes node kinds by which keys are present
//! (`ref`, `question`, `operator`, `description`). That shape is decided once
//! when a [`RawCondition`] is converted into a [`Condition`]; evaluation then
//! dispatches on the variant tag. A node with none of those keys loads as
//! [`Condition::Unresolved`] and always evaluates as unknown.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Logical operator of a composite node.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Operator {
    /// All children must hold.
    And,
    /// At least one child must hold.
    Or,
    /// Negation of the conjunction of the children.
    AndNot,
}

impl Operator {
    /// Catalog tag for this operator.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::AndNot => "AND_NOT",
        }
    }
}

impl FromStr for Operator {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            "AND_NOT" => Ok(Self::AndNot),
            other => Err(ConditionError::UnknownOperator {
                operator: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Catalog authoring defects found while building a condition tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConditionError {
    /// Composite node carries an operator tag other than AND, OR, AND_NOT.
    #[error("unknown operator `{operator}` (expected AND, OR or AND_NOT)")]
    UnknownOperator { operator: String },
}

/// One node of a requirement tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCondition", into = "RawCondition")]
pub enum Condition {
    /// Points at a shared requirement answered elsewhere in the session.
    Reference { target: String },

    /// Leaf question. Answered under `id`, or under `description` when no
    /// id is given.
    Question {
        id: Option<String>,
        description: Option<String>,
        text: String,
    },

    /// Logical combination of child conditions.
    Composite {
        operator: Operator,
        conditions: Vec<Condition>,
    },

    /// Plain condition without a question; resolves like a leaf question.
    Description {
        id: Option<String>,
        description: String,
    },

    /// Node without `ref`, `question`, `operator` or `description`. Never
    /// has an answer.
    Unresolved { id: Option<String> },
}

impl Condition {
    pub fn reference(target: impl Into<String>) -> Self {
        Self::Reference {
            target: target.into(),
        }
    }

    pub fn question(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Question {
            id: Some(id.into()),
            description: None,
            text: text.into(),
        }
    }

    pub fn description(description: impl Into<String>) -> Self {
        Self::Description {
            id: None,
            description: description.into(),
        }
    }

    pub fn composite(operator: Operator, conditions: Vec<Condition>) -> Self {
        Self::Composite {
            operator,
            conditions,
        }
    }

    pub fn all(conditions: Vec<Condition>) -> Self {
        Self::composite(Operator::And, conditions)
    }

    pub fn any(conditions: Vec<Condition>) -> Self {
        Self::composite(Operator::Or, conditions)
    }

    pub fn not(condition: Condition) -> Self {
        Self::composite(Operator::AndNot, vec![condition])
    }

    /// Identifier under which this node's answer is stored.
    ///
    /// Leaf and description nodes fall back to their description text when
    /// no id is present, so two nodes sharing a description share an answer.
    /// Composites have no key.
    pub fn answer_key(&self) -> Option<&str> {
        match self {
            Self::Reference { target } => Some(target.as_str()),
            Self::Question {
                id, description, ..
            } => fallback_key(id.as_deref(), description.as_deref()),
            Self::Description { id, description } => {
                fallback_key(id.as_deref(), Some(description.as_str()))
            }
            Self::Composite { .. } | Self::Unresolved { .. } => None,
        }
    }

    /// Every answer key reachable from this node, depth-first.
    pub fn answer_keys(&self) -> Vec<&str> {
        let mut keys = Vec::new();
        self.collect_keys(&mut keys);
        keys
    }

    fn collect_keys<'a>(&'a self, keys: &mut Vec<&'a str>) {
        match self {
            Self::Composite { conditions, .. } => {
                for child in conditions {
                    child.collect_keys(keys);
                }
            }
            leaf => {
                if let Some(key) = leaf.answer_key() {
                    keys.push(key);
                }
            }
        }
    }
}

fn fallback_key<'a>(id: Option<&'a str>, description: Option<&'a str>) -> Option<&'a str> {
    id.filter(|s| !s.is_empty())
        .or_else(|| description.filter(|s| !s.is_empty()))
}

/// Condition node as it appears in catalog JSON.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawCondition {
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<RawCondition>,
}

impl RawCondition {
    /// `{}` in the catalog.
    pub fn is_empty(&self) -> bool {
        self.reference.is_none()
            && self.id.is_none()
            && self.description.is_none()
            && self.question.is_none()
            && self.operator.is_none()
            && self.conditions.is_empty()
    }
}

impl TryFrom<RawCondition> for Condition {
    type Error = ConditionError;

    fn try_from(raw: RawCondition) -> Result<Self, Self::Error> {
        if let Some(target) = raw.reference {
            return Ok(Self::Reference { target });
        }

        if let Some(text) = raw.question {
            return Ok(Self::Question {
                id: raw.id,
                description: raw.description,
                text,
            });
        }

        if let Some(tag) = raw.operator {
            let operator = tag.parse::<Operator>()?;
            let conditions = raw
                .conditions
                .into_iter()
                .map(Condition::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Self::Composite {
                operator,
                conditions,
            });
        }

        if let Some(description) = raw.description {
            return Ok(Self::Description {
                id: raw.id,
                description,
            });
        }

        tracing::warn!(
            id = raw.id.as_deref().unwrap_or_default(),
            "condition node has no ref, question, operator or description; it evaluates as unknown"
        );
        Ok(Self::Unresolved { id: raw.id })
    }
}

impl From<Condition> for RawCondition {
    fn from(condition: Condition) -> Self {
        match condition {
            Condition::Reference { target } => Self {
                reference: Some(target),
                ..Default::default()
            },
            Condition::Question {
                id,
                description,
                text,
            } => Self {
                id,
                description,
                question: Some(text),
                ..Default::default()
            },
            Condition::Composite {
                operator,
                conditions,
            } => Self {
                operator: Some(operator.tag().to_string()),
                conditions: conditions.into_iter().map(RawCondition::from).collect(),
                ..Default::default()
            },
            Condition::Description { id, description } => Self {
                id,
                description: Some(description),
                ..Default::default()
            },
            Condition::Unresolved { id } => Self {
                id,
                ..Default::default()
            },
        }
    }
}
