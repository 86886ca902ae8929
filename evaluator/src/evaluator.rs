//! Three-valued requirement evaluation.
//!
//! Pure function of a condition tree and the answer store: no I/O, no
//! mutation, no errors. Every input maps to one of the three outcomes.
//!
//! | operator  | result                                                   |
//! |-----------|----------------------------------------------------------|
//! | `AND`     | `false` if any child is false, else `unknown` if any child is unknown, else `true` |
//! | `OR`      | `true` if any child is true, else `false` if all children are false, else `unknown` |
//! | `AND_NOT` | negation of the single child, or of `AND` over several children |
//!
//! A composite with no children is always `unknown`.

use crate::answers::AnswerStore;
use crate::condition::{Condition, Operator};
use crate::tri_state::TriState;

/// Evaluate `condition` against the answers recorded so far.
pub fn evaluate(condition: &Condition, answers: &AnswerStore) -> TriState {
    match condition {
        Condition::Composite {
            operator,
            conditions,
        } => evaluate_composite(*operator, conditions, answers),
        leaf => leaf
            .answer_key()
            .map_or(TriState::Unknown, |key| answers.lookup(key)),
    }
}

fn evaluate_composite(
    operator: Operator,
    conditions: &[Condition],
    answers: &AnswerStore,
) -> TriState {
    if conditions.is_empty() {
        return TriState::Unknown;
    }

    let results: Vec<TriState> = conditions
        .iter()
        .map(|child| evaluate(child, answers))
        .collect();

    match operator {
        Operator::And => conjunction(&results),
        Operator::Or => disjunction(&results),
        Operator::AndNot => match results.as_slice() {
            [single] => single.negate(),
            _ => conjunction(&results).negate(),
        },
    }
}

fn conjunction(results: &[TriState]) -> TriState {
    if results.contains(&TriState::False) {
        TriState::False
    } else if results.contains(&TriState::Unknown) {
        TriState::Unknown
    } else {
        TriState::True
    }
}

fn disjunction(results: &[TriState]) -> TriState {
    if results.contains(&TriState::True) {
        TriState::True
    } else if results.iter().all(|r| *r == TriState::False) {
        TriState::False
    } else {
        TriState::Unknown
    }
}
