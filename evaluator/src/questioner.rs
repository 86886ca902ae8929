//! Question-asking capability.
//!
//! The core never talks to a terminal. Whatever collects answers (an
//! interactive prompt, a saved snapshot, a test script) implements
//! [`Questioner`]; an [`Interview`] couples it to the session's
//! [`AnswerStore`] so every answer is recorded as soon as it is given.

use std::collections::HashMap;

use crate::answers::AnswerStore;
use crate::error::{NormcheckError, Result};

/// Supplies a yes/no answer for a question.
///
/// Implementations block until an answer is available. An error means no
/// answer can ever be produced (input closed, answer missing from a script),
/// not that the answer is "no".
pub trait Questioner {
    fn ask(&mut self, prompt: &str, id: &str) -> Result<bool>;
}

impl<Q: Questioner + ?Sized> Questioner for &mut Q {
    fn ask(&mut self, prompt: &str, id: &str) -> Result<bool> {
        (**self).ask(prompt, id)
    }
}

/// Asks questions and records the answers in the session store.
pub struct Interview<'a> {
    questioner: &'a mut dyn Questioner,
    answers: &'a mut AnswerStore,
    asked: Vec<String>,
}

impl<'a> Interview<'a> {
    pub fn new(questioner: &'a mut dyn Questioner, answers: &'a mut AnswerStore) -> Self {
        Self {
            questioner,
            answers,
            asked: Vec::new(),
        }
    }

    /// Ask `prompt`, store the answer under `id` and return it.
    ///
    /// Asking an id that already has an answer overwrites it.
    pub fn ask(&mut self, prompt: &str, id: &str) -> Result<bool> {
        let answer = self.questioner.ask(prompt, id)?;
        tracing::debug!(id, answer, "question answered");
        self.answers.record(id, answer);
        self.asked.push(id.to_string());
        Ok(answer)
    }

    /// Record a derived value (e.g. a classification verdict) without asking.
    pub fn record(&mut self, id: &str, value: bool) {
        self.answers.record(id, value);
    }

    pub fn answers(&self) -> &AnswerStore {
        &*self.answers
    }

    /// Ids asked through this interview, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    pub fn into_asked(self) -> Vec<String> {
        self.asked
    }
}

/// Answers from a fixed script.
///
/// Keeps the order in which ids were asked. Asking an id that is not in the
/// script fails with [`NormcheckError::AnswerUnavailable`].
#[derive(Debug, Default, Clone)]
pub struct ScriptedQuestioner {
    script: HashMap<String, bool>,
    asked: Vec<String>,
}

impl ScriptedQuestioner {
    pub fn new<K: Into<String>>(script: impl IntoIterator<Item = (K, bool)>) -> Self {
        Self {
            script: script.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            asked: Vec::new(),
        }
    }

    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Questioner for ScriptedQuestioner {
    fn ask(&mut self, _prompt: &str, id: &str) -> Result<bool> {
        self.asked.push(id.to_string());
        self.script
            .get(id)
            .copied()
            .ok_or_else(|| NormcheckError::answer_unavailable(id, "not answered in script"))
    }
}

/// Serves known answers first and delegates the rest.
pub struct PrefilledQuestioner<Q> {
    prefilled: AnswerStore,
    inner: Q,
}

impl<Q: Questioner> PrefilledQuestioner<Q> {
    pub fn new(prefilled: AnswerStore, inner: Q) -> Self {
        Self { prefilled, inner }
    }

    pub fn into_inner(self) -> Q {
        self.inner
    }
}

impl<Q: Questioner> Questioner for PrefilledQuestioner<Q> {
    fn ask(&mut self, prompt: &str, id: &str) -> Result<bool> {
        match self.prefilled.get(id) {
            Some(answer) => {
                tracing::debug!(id, answer, "answered from prefilled snapshot");
                Ok(answer)
            }
            None => self.inner.ask(prompt, id),
        }
    }
}
