use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use super::CatalogError;
use crate::condition::{Condition, RawCondition};

/// Shared requirement asked once per session and referenced by id from
/// many norms.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedRequirement {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
}

impl SharedRequirement {
    /// Prompt text: `"{name}: {question}"`, using the description when the
    /// requirement has no explicit question.
    pub fn prompt(&self) -> String {
        let question = self.question.as_deref().unwrap_or(&self.description);
        format!("{}: {question}", self.name)
    }
}

/// Descriptive payload of a norm. Never inspected during evaluation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NormMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub article: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub actors: Vec<String>,
    #[serde(default)]
    pub consequence: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty_tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicable_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obligations: Option<serde_json::Value>,
}

/// One legal obligation and the condition under which it applies.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Norm {
    pub id: String,
    #[serde(flatten)]
    pub metadata: NormMetadata,
    /// Root applicability condition. A norm without one never applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Condition>,
}

impl Norm {
    pub fn new(id: impl Into<String>, name: impl Into<String>, requirements: Condition) -> Self {
        Self {
            id: id.into(),
            metadata: NormMetadata {
                name: name.into(),
                ..Default::default()
            },
            requirements: Some(requirements),
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

/// Immutable norm catalog plus the shared requirement library.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    norms: BTreeMap<String, Norm>,
    shared_requirements: BTreeMap<String, SharedRequirement>,
}

impl Catalog {
    pub fn new(norms: impl IntoIterator<Item = Norm>) -> Self {
        Self {
            norms: norms.into_iter().map(|n| (n.id.clone(), n)).collect(),
            shared_requirements: BTreeMap::new(),
        }
    }

    pub fn with_shared_requirement(
        mut self,
        id: impl Into<String>,
        requirement: SharedRequirement,
    ) -> Self {
        self.shared_requirements.insert(id.into(), requirement);
        self
    }

    pub fn norm(&self, id: &str) -> Option<&Norm> {
        self.norms.get(id)
    }

    /// Norms in identifier order.
    pub fn norms(&self) -> impl Iterator<Item = &Norm> {
        self.norms.values()
    }

    pub fn len(&self) -> usize {
        self.norms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.norms.is_empty()
    }

    pub fn shared_requirement(&self, id: &str) -> Option<&SharedRequirement> {
        self.shared_requirements.get(id)
    }

}

#[derive(Deserialize)]
struct CatalogDocument {
    #[serde(default, alias = "shared_requirements_library")]
    shared_requirements: BTreeMap<String, SharedRequirement>,
    #[serde(default, alias = "wirknormen")]
    norms: BTreeMap<String, NormDocument>,
}

#[derive(Deserialize)]
struct NormDocument {
    #[serde(flatten)]
    metadata: NormMetadata,
    #[serde(default)]
    requirements: Option<RawCondition>,
}

impl TryFrom<CatalogDocument> for Catalog {
    type Error = CatalogError;

    fn try_from(doc: CatalogDocument) -> Result<Self, Self::Error> {
        let mut norms = BTreeMap::new();
        for (id, norm) in doc.norms {
            let requirements = norm
                .requirements
                .filter(|raw| !raw.is_empty())
                .map(Condition::try_from)
                .transpose()
                .map_err(|source| CatalogError::InvalidCondition {
                    norm: id.clone(),
                    source,
                })?;
            norms.insert(
                id.clone(),
                Norm {
                    id,
                    metadata: norm.metadata,
                    requirements,
                },
            );
        }

        Ok(Self {
            norms,
            shared_requirements: doc.shared_requirements,
        })
    }
}

impl FromStr for Catalog {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let doc: CatalogDocument = serde_json::from_str(s)?;
        Self::try_from(doc)
    }
}

/// A specific high-risk use case inside an area.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCase {
    pub id: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_registration: Option<String>,
}

impl UseCase {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            special_registration: None,
        }
    }
}

/// A use-case area with its use cases in declared order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UseCaseArea {
    /// Area key as declared in the catalog (e.g. `"1"`).
    pub number: String,
    pub name: String,
    pub use_cases: Vec<UseCase>,
}

impl UseCaseArea {
    pub fn new(
        number: impl Into<String>,
        name: impl Into<String>,
        use_cases: Vec<UseCase>,
    ) -> Self {
        Self {
            number: number.into(),
            name: name.into(),
            use_cases,
        }
    }
}

/// Enumeration of use-case areas, scanned in declared order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UseCaseCatalog {
    pub areas: Vec<UseCaseArea>,
}

impl UseCaseCatalog {
    pub fn new(areas: Vec<UseCaseArea>) -> Self {
        Self { areas }
    }
}

#[derive(Deserialize)]
struct UseCaseDocument {
    #[serde(default, deserialize_with = "ordered_entries")]
    areas: Vec<(String, AreaDocument)>,
}

#[derive(Deserialize)]
struct AreaDocument {
    area_name: String,
    #[serde(default, deserialize_with = "ordered_entries")]
    use_cases: Vec<(String, UseCase)>,
}

impl From<UseCaseDocument> for UseCaseCatalog {
    fn from(doc: UseCaseDocument) -> Self {
        let areas = doc
            .areas
            .into_iter()
            .map(|(number, area)| UseCaseArea {
                number,
                name: area.area_name,
                use_cases: area.use_cases.into_iter().map(|(_, uc)| uc).collect(),
            })
            .collect();
        Self { areas }
    }
}

impl FromStr for UseCaseCatalog {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let doc: UseCaseDocument = serde_json::from_str(s)?;
        Ok(doc.into())
    }
}

/// Deserialize a JSON object into its entries, keeping document order.
fn ordered_entries<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct EntriesVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
        type Value = Vec<(String, V)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a JSON object")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, V>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor(PhantomData))
}
