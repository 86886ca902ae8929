//! Answer store for one classification session.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::tri_state::TriState;

/// Resolved answers keyed by requirement identifier.
///
/// A missing key is the unknown state; the store never holds an explicit
/// unknown. Entries are only added or overwritten during a session.
///
/// Serializes as a flat `{"id": bool}` object, which is also the answer
/// snapshot format handed to persistence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerStore {
    answers: BTreeMap<String, bool>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, overwriting any previous value for `id`.
    pub fn record(&mut self, id: impl Into<String>, value: bool) {
        self.answers.insert(id.into(), value);
    }

    /// Look up an answer. Identifiers never recorded are `Unknown`.
    pub fn lookup(&self, id: &str) -> TriState {
        TriState::from(self.get(id))
    }

    pub fn get(&self, id: &str) -> Option<bool> {
        self.answers.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.answers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Answers in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.answers.iter().map(|(id, value)| (id.as_str(), *value))
    }
}

impl<K: Into<String>> Extend<(K, bool)> for AnswerStore {
    fn extend<I: IntoIterator<Item = (K, bool)>>(&mut self, iter: I) {
        for (id, value) in iter {
            self.record(id, value);
        }
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for AnswerStore {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_key_is_unknown_not_false() {
        let store = AnswerStore::from_iter([("SR-001", false)]);
        assert_eq!(store.lookup("SR-001"), TriState::False);
        assert_eq!(store.lookup("SR-999"), TriState::Unknown);
        assert!(!store.contains("SR-999"));
    }

    #[test]
    fn record_overwrites() {
        let mut store = AnswerStore::new();
        store.record("SR-004", false);
        store.record("SR-004", true);
        assert_eq!(store.lookup("SR-004"), TriState::True);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn snapshot_is_flat_json_object() {
        let store = AnswerStore::from_iter([("SR-002", true), ("SR-001", false)]);
        let json = serde_json::to_string(&store).expect("serialize");
        assert_eq!(json, r#"{"SR-001":false,"SR-002":true}"#);

        let parsed: AnswerStore = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, store);
    }
}
