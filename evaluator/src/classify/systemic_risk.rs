//! Systemic-risk determination for general-purpose models.

use serde::{Deserialize, Serialize};

use super::ids;
use crate::error::Result;
use crate::questioner::Interview;

/// Cumulative training compute above which systemic risk is presumed.
pub const TRAINING_COMPUTE_THRESHOLD_FLOPS: f64 = 1e25;

const COMPUTE_PROMPT: &str =
    "Does the model have cumulative training computation > 10^25 FLOPs?";
const DESIGNATION_PROMPT: &str = "Has the Commission designated this model as systemic risk (ex officio or scientific panel alert)?";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemicRiskOutcome {
    /// Presumed from training compute; the provider may rebut.
    ComputeThreshold,
    /// Explicitly designated by the authority.
    Designation,
    NoSystemicRisk,
}

impl SystemicRiskOutcome {
    pub fn has_systemic_risk(&self) -> bool {
        !matches!(self, Self::NoSystemicRisk)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ComputeThreshold => "systemic risk (compute presumption)",
            Self::Designation => "systemic risk (designation)",
            Self::NoSystemicRisk => "no systemic risk",
        }
    }
}

impl std::fmt::Display for SystemicRiskOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Run the systemic-risk pathway and record the verdict under
/// [`ids::SYSTEMIC_RISK`]. The compute question always comes first; the
/// designation question is only asked when the threshold is not exceeded.
pub fn determine_systemic_risk(interview: &mut Interview<'_>) -> Result<SystemicRiskOutcome> {
    let outcome = if interview.ask(COMPUTE_PROMPT, ids::COMPUTE_THRESHOLD)? {
        tracing::info!(
            threshold_flops = TRAINING_COMPUTE_THRESHOLD_FLOPS,
            "systemic risk presumed; provider may present arguments against classification"
        );
        SystemicRiskOutcome::ComputeThreshold
    } else if interview.ask(DESIGNATION_PROMPT, ids::DESIGNATION)? {
        SystemicRiskOutcome::Designation
    } else {
        SystemicRiskOutcome::NoSystemicRisk
    };

    interview.record(ids::SYSTEMIC_RISK, outcome.has_systemic_risk());
    tracing::info!(verdict = outcome.label(), "systemic-risk determination complete");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::AnswerStore;
    use crate::questioner::ScriptedQuestioner;
    use crate::tri_state::TriState;

    fn run(script: &[(&str, bool)]) -> (SystemicRiskOutcome, AnswerStore, Vec<String>) {
        let mut questioner = ScriptedQuestioner::new(script.iter().copied());
        let mut answers = AnswerStore::new();
        let outcome = {
            let mut interview = Interview::new(&mut questioner, &mut answers);
            determine_systemic_risk(&mut interview).expect("outcome")
        };
        (outcome, answers, questioner.asked().to_vec())
    }

    #[test]
    fn compute_threshold_skips_designation() {
        let (outcome, answers, asked) = run(&[("SR-010a", true)]);
        assert_eq!(outcome, SystemicRiskOutcome::ComputeThreshold);
        assert_eq!(asked, vec!["SR-010a"]);
        assert_eq!(answers.lookup("SR-010"), TriState::True);
    }

    #[test]
    fn designation_asked_after_compute() {
        let (outcome, answers, asked) = run(&[("SR-010a", false), ("SR-010b", true)]);
        assert_eq!(outcome, SystemicRiskOutcome::Designation);
        assert_eq!(asked, vec!["SR-010a", "SR-010b"]);
        assert_eq!(answers.lookup("SR-010"), TriState::True);
    }

    #[test]
    fn neither_pathway_means_no_systemic_risk() {
        let (outcome, answers, _) = run(&[("SR-010a", false), ("SR-010b", false)]);
        assert_eq!(outcome, SystemicRiskOutcome::NoSystemicRisk);
        assert_eq!(answers.lookup("SR-010"), TriState::False);
    }
}
