//! Risk classification pathways.
//!
//! Two ordered, question-driven procedures that settle a risk tier and write
//! the verdict into the answer store, so that norm conditions referencing
//! the verdict id resolve afterwards. Each step asks only what can still
//! change the outcome and stops as soon as a verdict is reached.

pub mod high_risk;
pub mod systemic_risk;

pub use high_risk::{HighRiskOutcome, MatchedUseCase, determine_high_risk};
pub use systemic_risk::{SystemicRiskOutcome, determine_systemic_risk};

/// Well-known answer identifiers used by the pathways and by catalog
/// conditions that reference their verdicts.
pub mod ids {
    /// Verdict: system is high-risk.
    pub const HIGH_RISK: &str = "SR-004";
    pub const SAFETY_COMPONENT: &str = "SR-004a";
    pub const THIRD_PARTY_ASSESSMENT: &str = "SR-004a-third-party";
    /// Set when any listed use case matched.
    pub const USE_CASE_MATCH: &str = "SR-004b-1";
    pub const PROFILING: &str = "SR-004b-profiling";
    pub const OPT_OUT: &str = "SR-004b-opt-out";

    /// Verdict: general-purpose model has systemic risk.
    pub const SYSTEMIC_RISK: &str = "SR-010";
    pub const COMPUTE_THRESHOLD: &str = "SR-010a";
    pub const DESIGNATION: &str = "SR-010b";

    pub const PROVIDER: &str = "SR-002";
    pub const DEPLOYER: &str = "SR-003";
    pub const GENERAL_PURPOSE_PROVIDER: &str = "SR-006";

    /// Prefix of the per-area question id (`ANNEX-III-{area}`).
    pub const USE_CASE_AREA_PREFIX: &str = "ANNEX-III-";
}
