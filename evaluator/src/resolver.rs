//! Applicability resolution over the whole catalog.

use std::collections::BTreeSet;

use crate::answers::AnswerStore;
use crate::catalog::{Catalog, Norm};
use crate::evaluator::evaluate;
use crate::tri_state::TriState;

/// Whether `norm` definitely applies. `Unknown` does not count, and a norm
/// without a requirement never applies.
pub fn is_applicable(norm: &Norm, answers: &AnswerStore) -> bool {
    norm.requirements
        .as_ref()
        .is_some_and(|condition| evaluate(condition, answers) == TriState::True)
}

/// Identifiers of every norm whose requirement evaluates to exactly `True`.
///
/// Reads the store without writing it; call only after the classification
/// pathways have finished recording answers.
pub fn resolve(catalog: &Catalog, answers: &AnswerStore) -> BTreeSet<String> {
    let applicable: BTreeSet<String> = catalog
        .norms()
        .filter(|norm| is_applicable(norm, answers))
        .map(|norm| norm.id.clone())
        .collect();
    tracing::info!(
        applicable = applicable.len(),
        total = catalog.len(),
        "resolved applicable norms"
    );
    applicable
}

/// Answer ids the catalog's conditions refer to that the store has no answer
/// for. Conditions over these ids can only evaluate as unknown.
pub fn unanswered_ids(catalog: &Catalog, answers: &AnswerStore) -> BTreeSet<String> {
    catalog
        .norms()
        .filter_map(|norm| norm.requirements.as_ref())
        .flat_map(|condition| condition.answer_keys())
        .filter(|key| !answers.contains(key))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NormMetadata;
    use crate::condition::Condition;

    fn catalog() -> Catalog {
        Catalog::new([
            Norm::new(
                "W-001",
                "Literacy",
                Condition::any(vec![
                    Condition::reference("SR-002"),
                    Condition::reference("SR-003"),
                ]),
            ),
            Norm::new(
                "W-002",
                "Risk management",
                Condition::all(vec![
                    Condition::reference("SR-002"),
                    Condition::reference("SR-004"),
                ]),
            ),
            Norm::new(
                "W-003",
                "Not high-risk notice",
                Condition::not(Condition::reference("SR-004")),
            ),
            Norm {
                id: "W-004".into(),
                metadata: NormMetadata::default(),
                requirements: None,
            },
        ])
    }

    #[test]
    fn only_true_norms_are_applicable() {
        let answers = AnswerStore::from_iter([("SR-002", true)]);
        let applicable = resolve(&catalog(), &answers);
        assert_eq!(applicable, BTreeSet::from(["W-001".to_string()]));
    }

    #[test]
    fn verdict_ids_unlock_dependent_norms() {
        let answers = AnswerStore::from_iter([("SR-002", true), ("SR-004", true)]);
        let applicable: Vec<String> = resolve(&catalog(), &answers).into_iter().collect();
        assert_eq!(applicable, vec!["W-001", "W-002"]);

        let answers = AnswerStore::from_iter([("SR-002", true), ("SR-004", false)]);
        let applicable: Vec<String> = resolve(&catalog(), &answers).into_iter().collect();
        assert_eq!(applicable, vec!["W-001", "W-003"]);
    }

    #[test]
    fn norm_without_requirement_never_applies() {
        let catalog = catalog();
        let norm = catalog.norm("W-004").expect("norm");
        assert!(!is_applicable(norm, &AnswerStore::new()));
    }

    #[test]
    fn unanswered_ids_lists_referenced_gaps() {
        let answers = AnswerStore::from_iter([("SR-002", true), ("SR-009", false)]);
        assert_eq!(
            unanswered_ids(&catalog(), &answers),
            BTreeSet::from(["SR-003".to_string(), "SR-004".to_string()])
        );
    }

    #[test]
    fn resolve_does_not_change_the_store() {
        let answers = AnswerStore::from_iter([("SR-003", true)]);
        let before = answers.clone();
        let _ = resolve(&catalog(), &answers);
        assert_eq!(answers, before);
    }
}
