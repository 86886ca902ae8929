//! High-risk determination.
//!
//! Pathways, in order:
//!
//! 1. Product safety: safety component under harmonisation legislation that
//!    needs third-party conformity assessment.
//! 2. Listed use case: first matching use case in area/use-case order.
//!    - profiling of natural persons always makes the system high-risk;
//!    - otherwise a claimed opt-out makes it not high-risk.
//! 3. Nothing matched: not high-risk.

use serde::{Deserialize, Serialize};

use super::ids;
use crate::catalog::{UseCase, UseCaseArea, UseCaseCatalog};
use crate::error::Result;
use crate::questioner::Interview;

const SAFETY_COMPONENT_PROMPT: &str = "Is the system a safety component of a product covered by Annex I EU harmonisation legislation?";
const THIRD_PARTY_PROMPT: &str = "Does the product require third-party conformity assessment?";
const PROFILING_PROMPT: &str = "Does the system perform profiling of natural persons?";
const OPT_OUT_PROMPT: &str =
    "Has the provider concluded the system is NOT high-risk per Article 6(3)?";

/// Use case that triggered the use-case pathway.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedUseCase {
    /// Area key the use case was found in.
    pub area: String,
    pub id: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_registration: Option<String>,
}

impl MatchedUseCase {
    fn new(area: &UseCaseArea, use_case: &UseCase) -> Self {
        Self {
            area: area.number.clone(),
            id: use_case.id.clone(),
            description: use_case.description.clone(),
            special_registration: use_case.special_registration.clone(),
        }
    }
}

/// Verdict of the high-risk pathway together with the route that led to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "pathway", rename_all = "snake_case")]
pub enum HighRiskOutcome {
    /// High-risk as a safety component needing third-party assessment.
    ProductSafety,
    /// High-risk because a matched use case involves profiling.
    ProfilingOverride { use_case: MatchedUseCase },
    /// High-risk through a matched use case without opt-out.
    UseCase { use_case: MatchedUseCase },
    /// Not high-risk by the provider's own opt-out; registration and
    /// justification are still owed.
    OptOutClaimed { use_case: MatchedUseCase },
    NotHighRisk,
}

impl HighRiskOutcome {
    pub fn is_high_risk(&self) -> bool {
        matches!(
            self,
            Self::ProductSafety | Self::ProfilingOverride { .. } | Self::UseCase { .. }
        )
    }

    pub fn matched_use_case(&self) -> Option<&MatchedUseCase> {
        match self {
            Self::ProfilingOverride { use_case }
            | Self::UseCase { use_case }
            | Self::OptOutClaimed { use_case } => Some(use_case),
            Self::ProductSafety | Self::NotHighRisk => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ProductSafety => "high-risk (product safety)",
            Self::ProfilingOverride { .. } => "high-risk (profiling override)",
            Self::UseCase { .. } => "high-risk (listed use case)",
            Self::OptOutClaimed { .. } => "not high-risk (opt-out claimed)",
            Self::NotHighRisk => "not high-risk",
        }
    }
}

impl std::fmt::Display for HighRiskOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Question id for "does the system fall under this area".
pub fn area_question_id(area: &UseCaseArea) -> String {
    format!("{}{}", ids::USE_CASE_AREA_PREFIX, area.number)
}

/// Run the high-risk pathway and record the verdict under [`ids::HIGH_RISK`].
pub fn determine_high_risk(
    interview: &mut Interview<'_>,
    use_cases: &UseCaseCatalog,
) -> Result<HighRiskOutcome> {
    if interview.ask(SAFETY_COMPONENT_PROMPT, ids::SAFETY_COMPONENT)?
        && interview.ask(THIRD_PARTY_PROMPT, ids::THIRD_PARTY_ASSESSMENT)?
    {
        return Ok(conclude(interview, HighRiskOutcome::ProductSafety));
    }

    let Some(use_case) = match_use_case(interview, use_cases)? else {
        return Ok(conclude(interview, HighRiskOutcome::NotHighRisk));
    };

    if interview.ask(PROFILING_PROMPT, ids::PROFILING)? {
        return Ok(conclude(
            interview,
            HighRiskOutcome::ProfilingOverride { use_case },
        ));
    }

    let outcome = if interview.ask(OPT_OUT_PROMPT, ids::OPT_OUT)? {
        HighRiskOutcome::OptOutClaimed { use_case }
    } else {
        HighRiskOutcome::UseCase { use_case }
    };
    Ok(conclude(interview, outcome))
}

/// Scan areas and their use cases in declared order; the first use case
/// answered yes wins and nothing further is asked.
fn match_use_case(
    interview: &mut Interview<'_>,
    use_cases: &UseCaseCatalog,
) -> Result<Option<MatchedUseCase>> {
    for area in &use_cases.areas {
        let prompt = format!("Does your system fall under {}?", area.name);
        if !interview.ask(&prompt, &area_question_id(area))? {
            continue;
        }

        for use_case in &area.use_cases {
            let prompt = format!("Specifically: {}?", use_case.description);
            if interview.ask(&prompt, &use_case.id)? {
                interview.record(ids::USE_CASE_MATCH, true);
                if let Some(note) = &use_case.special_registration {
                    tracing::info!(
                        use_case = %use_case.id,
                        note = %note,
                        "special registration applies"
                    );
                }
                return Ok(Some(MatchedUseCase::new(area, use_case)));
            }
        }
    }

    Ok(None)
}

fn conclude(interview: &mut Interview<'_>, outcome: HighRiskOutcome) -> HighRiskOutcome {
    interview.record(ids::HIGH_RISK, outcome.is_high_risk());
    tracing::info!(
        verdict = outcome.label(),
        use_case = outcome.matched_use_case().map(|uc| uc.id.as_str()),
        "high-risk determination complete"
    );
    outcome
}
