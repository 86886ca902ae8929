//! Classification pathway scenarios driven through a scripted questioner.

use normcheck_evaluator::catalog::{UseCase, UseCaseArea, UseCaseCatalog};
use normcheck_evaluator::classify::{
    HighRiskOutcome, SystemicRiskOutcome, determine_high_risk, determine_systemic_risk, ids,
};
use normcheck_evaluator::questioner::ScriptedQuestioner;
use normcheck_evaluator::{AnswerStore, Interview, TriState};
use pretty_assertions::assert_eq;

fn annex_iii() -> UseCaseCatalog {
    UseCaseCatalog::new(vec![
        UseCaseArea::new(
            "1",
            "Biometrics",
            vec![UseCase::new("ANNEX-III-1a", "Remote biometric identification")],
        ),
        UseCaseArea::new(
            "2",
            "Critical infrastructure",
            vec![
                UseCase::new("X", "Safety component in digital infrastructure"),
                UseCase::new("ANNEX-III-2b", "Supply of water, gas or heating"),
            ],
        ),
        UseCaseArea::new(
            "3",
            "Education and vocational training",
            vec![UseCase::new("ANNEX-III-3a", "Admission to institutions")],
        ),
    ])
}

#[test]
fn use_case_pathway_stops_scanning_after_first_match() {
    let mut questioner = ScriptedQuestioner::new([
        ("SR-004a", false),
        ("ANNEX-III-1", false),
        ("ANNEX-III-2", true),
        ("X", true),
        ("SR-004b-profiling", false),
        ("SR-004b-opt-out", false),
        // Would flip the outcome if asked
        ("ANNEX-III-2b", false),
        ("ANNEX-III-3", true),
        ("ANNEX-III-3a", true),
    ]);
    let mut answers = AnswerStore::new();

    let outcome = {
        let mut interview = Interview::new(&mut questioner, &mut answers);
        determine_high_risk(&mut interview, &annex_iii()).expect("high-risk outcome")
    };

    assert!(matches!(outcome, HighRiskOutcome::UseCase { .. }));
    assert_eq!(
        outcome.matched_use_case().map(|uc| uc.id.as_str()),
        Some("X")
    );
    assert_eq!(
        questioner.asked(),
        [
            "SR-004a",
            "ANNEX-III-1",
            "ANNEX-III-2",
            "X",
            "SR-004b-profiling",
            "SR-004b-opt-out",
        ]
    );
    assert_eq!(answers.lookup(ids::HIGH_RISK), TriState::True);
    assert_eq!(answers.lookup(ids::USE_CASE_MATCH), TriState::True);
}

#[test]
fn product_safety_skips_use_case_scan() {
    let mut questioner =
        ScriptedQuestioner::new([("SR-004a", true), ("SR-004a-third-party", true)]);
    let mut answers = AnswerStore::new();

    let outcome = {
        let mut interview = Interview::new(&mut questioner, &mut answers);
        determine_high_risk(&mut interview, &annex_iii()).expect("high-risk outcome")
    };

    assert_eq!(outcome, HighRiskOutcome::ProductSafety);
    assert!(!questioner.asked().iter().any(|id| id.starts_with("ANNEX-III")));
}

#[test]
fn no_area_match_is_not_high_risk() {
    let mut questioner = ScriptedQuestioner::new([
        ("SR-004a", false),
        ("ANNEX-III-1", false),
        ("ANNEX-III-2", false),
        ("ANNEX-III-3", false),
    ]);
    let mut answers = AnswerStore::new();

    let outcome = {
        let mut interview = Interview::new(&mut questioner, &mut answers);
        determine_high_risk(&mut interview, &annex_iii()).expect("high-risk outcome")
    };

    assert_eq!(outcome, HighRiskOutcome::NotHighRisk);
    assert_eq!(answers.lookup(ids::HIGH_RISK), TriState::False);
    assert!(!questioner.asked().iter().any(|id| id == ids::PROFILING));
}

#[test]
fn designation_pathway_asks_compute_first_and_once() {
    let mut questioner = ScriptedQuestioner::new([("SR-010a", false), ("SR-010b", true)]);
    let mut answers = AnswerStore::new();

    let outcome = {
        let mut interview = Interview::new(&mut questioner, &mut answers);
        determine_systemic_risk(&mut interview).expect("systemic-risk outcome")
    };

    assert_eq!(outcome, SystemicRiskOutcome::Designation);
    assert_eq!(questioner.asked(), ["SR-010a", "SR-010b"]);
    assert_eq!(answers.lookup(ids::SYSTEMIC_RISK), TriState::True);
}

#[test]
fn compute_presumption_skips_designation() {
    let mut questioner = ScriptedQuestioner::new([("SR-010a", true)]);
    let mut answers = AnswerStore::new();

    let outcome = {
        let mut interview = Interview::new(&mut questioner, &mut answers);
        determine_systemic_risk(&mut interview).expect("systemic-risk outcome")
    };

    assert_eq!(outcome, SystemicRiskOutcome::ComputeThreshold);
    assert_eq!(questioner.asked(), ["SR-010a"]);
}
