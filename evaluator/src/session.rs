//! Full classification session.
//!
//! Asks the fundamental shared requirements, runs whichever risk pathways
//! those answers trigger, and finally resolves the catalog. [`Session::run`]
//! consumes the session, so the store cannot be written once resolution has
//! started.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::answers::AnswerStore;
use crate::catalog::{Catalog, UseCaseCatalog};
use crate::classify::{
    HighRiskOutcome, SystemicRiskOutcome, determine_high_risk, determine_systemic_risk,
};
use crate::config::SessionConfig;
use crate::error::Result;
use crate::questioner::{Interview, Questioner};
use crate::resolver::{resolve, unanswered_ids};

/// Answer snapshot plus everything the session concluded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionOutcome {
    pub answers: AnswerStore,
    /// Ids asked during this run, in order.
    pub asked: Vec<String>,
    /// `None` when the high-risk pathway was not triggered.
    pub high_risk: Option<HighRiskOutcome>,
    /// `None` when the systemic-risk pathway was not triggered.
    pub systemic_risk: Option<SystemicRiskOutcome>,
    pub applicable: BTreeSet<String>,
    /// Ids referenced by catalog conditions that were never answered.
    pub unanswered: BTreeSet<String>,
}

pub struct Session<'a> {
    catalog: &'a Catalog,
    use_cases: &'a UseCaseCatalog,
    config: &'a SessionConfig,
    answers: AnswerStore,
}

impl<'a> Session<'a> {
    pub fn new(
        catalog: &'a Catalog,
        use_cases: &'a UseCaseCatalog,
        config: &'a SessionConfig,
    ) -> Self {
        Self {
            catalog,
            use_cases,
            config,
            answers: AnswerStore::new(),
        }
    }

    /// Seed the store from a saved snapshot. Seeded answers are visible to
    /// resolution even when no question asks for them again.
    pub fn with_answers(mut self, answers: AnswerStore) -> Self {
        self.answers = answers;
        self
    }

    pub fn run(self, questioner: &mut dyn Questioner) -> Result<SessionOutcome> {
        let Self {
            catalog,
            use_cases,
            config,
            mut answers,
        } = self;

        let (asked, high_risk, systemic_risk) = {
            let mut interview = Interview::new(questioner, &mut answers);
            ask_fundamentals(&mut interview, catalog, &config.fundamental_requirements)?;

            let high_risk = if any_true(&interview, &config.high_risk_triggers) {
                Some(determine_high_risk(&mut interview, use_cases)?)
            } else {
                tracing::debug!("high-risk pathway not triggered");
                None
            };

            let systemic_risk = if any_true(&interview, &config.systemic_risk_triggers) {
                Some(determine_systemic_risk(&mut interview)?)
            } else {
                tracing::debug!("systemic-risk pathway not triggered");
                None
            };

            (interview.into_asked(), high_risk, systemic_risk)
        };

        let applicable = resolve(catalog, &answers);
        let unanswered = unanswered_ids(catalog, &answers);
        if !unanswered.is_empty() {
            tracing::debug!(
                count = unanswered.len(),
                ids = ?unanswered,
                "catalog conditions reference unanswered ids"
            );
        }

        Ok(SessionOutcome {
            answers,
            asked,
            high_risk,
            systemic_risk,
            applicable,
            unanswered,
        })
    }
}

/// Ask each fundamental requirement the catalog defines, in configured order.
fn ask_fundamentals(
    interview: &mut Interview<'_>,
    catalog: &Catalog,
    ids: &[String],
) -> Result<()> {
    for id in ids {
        match catalog.shared_requirement(id) {
            Some(requirement) => {
                interview.ask(&requirement.prompt(), id)?;
            }
            None => {
                tracing::warn!(id = %id, "fundamental requirement missing from catalog; skipped");
            }
        }
    }
    Ok(())
}

fn any_true(interview: &Interview<'_>, triggers: &[String]) -> bool {
    triggers
        .iter()
        .any(|id| interview.answers().lookup(id).is_true())
}
