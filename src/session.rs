//! Wizard session state machine
//!
//! Owns every mutable selection the wizard makes: the industry → segment →
//! use-case hierarchy, scope answers, the model and pack registries, and the
//! deployment environment. All transitions are synchronous; an ancestor
//! change runs its descendant resets to completion before the setter returns,
//! so the cascade is deterministic without any reactive framework.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::types::{
    AnswerValue, Answers, DeploymentEnvironment, Industry, PackDomain, PackKey, QuestionKind,
    ScopeQuestion, Segment, SelectedPack, UseCase,
};

// ============================================================================
// Errors
// ============================================================================

/// Rejected answer write
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnswerError {
    /// The question id is not part of the active question set
    #[error("no active question with id: {0}")]
    UnknownQuestion(String),

    /// The value's shape does not match the question's declared type
    #[error("question {question} expects {expected}, got {got}")]
    TypeMismatch {
        question: String,
        expected: QuestionKind,
        got: &'static str,
    },

    /// Raw input for a number question did not parse
    #[error("question {0}: not a number")]
    InvalidNumber(String),

    /// Raw input for a boolean question was neither true nor false
    #[error("question {0}: expected true or false")]
    InvalidBoolean(String),
}

// ============================================================================
// Readiness
// ============================================================================

/// Breakdown of the submission gate, one leg per requirement
#[derive(Debug, Clone, Serialize)]
pub struct Readiness {
    pub industry: bool,
    pub segment: bool,
    pub use_case: bool,
    pub deployment_environment: bool,
    pub model_count: usize,
    pub pack_count: usize,
}

impl Readiness {
    /// Whether every leg is satisfied
    pub fn is_ready(&self) -> bool {
        self.industry
            && self.segment
            && self.use_case
            && self.deployment_environment
            && self.model_count >= 1
            && self.pack_count >= 1
    }

    /// Names of the unsatisfied legs
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.industry {
            missing.push("industry");
        }
        if !self.segment {
            missing.push("segment");
        }
        if !self.use_case {
            missing.push("use case");
        }
        if !self.deployment_environment {
            missing.push("deployment environment");
        }
        if self.model_count == 0 {
            missing.push("at least one model");
        }
        if self.pack_count == 0 {
            missing.push("at least one pack");
        }
        missing
    }
}

// ============================================================================
// Session
// ============================================================================

/// A single wizard run over a loaded industry hierarchy
#[derive(Debug, Clone, Default)]
pub struct WizardSession {
    industries: Vec<Industry>,
    industry_id: Option<String>,
    segment_id: Option<String>,
    use_case_id: Option<String>,
    answers: Answers,
    deployment_environment: Option<DeploymentEnvironment>,
    selected_models: IndexSet<String>,
    selected_packs: IndexMap<PackKey, SelectedPack>,
}

impl WizardSession {
    /// Start a fresh session over the given hierarchy
    pub fn new(industries: Vec<Industry>) -> Self {
        Self {
            industries,
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------
    // Hierarchy selection
    // ------------------------------------------------------------------

    /// Select an industry, cascading a reset of segment, use case, and
    /// answers. An id with no match selects none; re-selecting the current
    /// id still cascades.
    pub fn select_industry(&mut self, id: &str) {
        let resolved = self.industries.iter().find(|i| i.id == id).map(|i| i.id.clone());
        debug!(industry = id, found = resolved.is_some(), "Industry selected");
        self.industry_id = resolved;
        self.reset_segment();
    }

    /// Select a segment under the current industry; industry stays put,
    /// use case and answers reset.
    pub fn select_segment(&mut self, id: &str) {
        let resolved = self
            .current_industry()
            .and_then(|i| i.segment(id))
            .map(|s| s.id.clone());
        debug!(segment = id, found = resolved.is_some(), "Segment selected");
        self.segment_id = resolved;
        self.reset_use_case();
    }

    /// Select a use case under the current segment and synthesize its
    /// question defaults. Ancestors are untouched.
    pub fn select_use_case(&mut self, id: &str) {
        let resolved = self
            .current_segment()
            .and_then(|s| s.use_case(id))
            .map(|u| u.id.clone());
        debug!(use_case = id, found = resolved.is_some(), "Use case selected");
        self.use_case_id = resolved;
        self.synthesize_defaults();
    }

    fn reset_segment(&mut self) {
        self.segment_id = None;
        self.reset_use_case();
    }

    fn reset_use_case(&mut self) {
        self.use_case_id = None;
        self.synthesize_defaults();
    }

    /// Replace the answers map wholesale with the active questions'
    /// declared defaults
    ///
    /// Runs on every use-case change; previous answers are discarded, not
    /// merged. Questions without a default are omitted, not materialized
    /// as placeholders.
    pub fn synthesize_defaults(&mut self) {
        let mut answers = Answers::new();
        for question in self.active_questions() {
            if let Some(default) = &question.default {
                answers.insert(question.id.clone(), default.clone());
            }
        }
        self.answers = answers;
    }

    /// Currently selected industry id
    pub fn industry_id(&self) -> Option<&str> {
        self.industry_id.as_deref()
    }

    /// Currently selected segment id
    pub fn segment_id(&self) -> Option<&str> {
        self.segment_id.as_deref()
    }

    /// Currently selected use case id
    pub fn use_case_id(&self) -> Option<&str> {
        self.use_case_id.as_deref()
    }

    fn current_industry(&self) -> Option<&Industry> {
        let id = self.industry_id.as_deref()?;
        self.industries.iter().find(|i| i.id == id)
    }

    fn current_segment(&self) -> Option<&Segment> {
        let id = self.segment_id.as_deref()?;
        self.current_industry()?.segment(id)
    }

    fn current_use_case(&self) -> Option<&UseCase> {
        let id = self.use_case_id.as_deref()?;
        self.current_segment()?.use_case(id)
    }

    /// Segments under the current industry, empty when none is selected
    pub fn segments(&self) -> &[Segment] {
        self.current_industry().map(|i| i.segments.as_slice()).unwrap_or(&[])
    }

    /// Use cases under the current segment
    pub fn use_cases(&self) -> &[UseCase] {
        self.current_segment().map(|s| s.use_cases.as_slice()).unwrap_or(&[])
    }

    /// Whether the segment selector is actionable
    pub fn can_select_segment(&self) -> bool {
        self.industry_id.is_some()
    }

    /// Whether the use-case selector is actionable
    pub fn can_select_use_case(&self) -> bool {
        self.segment_id.is_some()
    }

    // ------------------------------------------------------------------
    // Scope questions and answers
    // ------------------------------------------------------------------

    /// The selected use case's questions, empty when none is selected
    pub fn active_questions(&self) -> &[ScopeQuestion] {
        self.current_use_case()
            .map(|u| u.scope_questions.as_slice())
            .unwrap_or(&[])
    }

    /// Current answers, in write order
    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    /// Write one answer, type-checked against the owning question
    ///
    /// Rejections leave the map untouched: an unknown question id or a
    /// shape mismatch reports an error and writes nothing, so stale or
    /// ill-typed keys can never enter the map.
    pub fn set_answer(&mut self, question_id: &str, value: AnswerValue) -> Result<(), AnswerError> {
        let question = self
            .active_questions()
            .iter()
            .find(|q| q.id == question_id)
            .ok_or_else(|| AnswerError::UnknownQuestion(question_id.to_string()))?;

        if !value.matches(question.kind) {
            return Err(AnswerError::TypeMismatch {
                question: question_id.to_string(),
                expected: question.kind,
                got: value.shape(),
            });
        }

        let value = match (question.kind, value) {
            // Multiselect options form a set; collapse duplicates, first
            // occurrence wins the position.
            (QuestionKind::Multiselect, AnswerValue::List(choices)) => {
                let mut seen = IndexSet::new();
                for choice in choices {
                    seen.insert(choice);
                }
                AnswerValue::List(seen.into_iter().collect())
            }
            (_, value) => value,
        };

        self.answers.insert(question_id.to_string(), value);
        Ok(())
    }

    /// Write one answer from raw text input, parsed per the question kind
    ///
    /// Multiselect input is comma-separated. An unparseable number or
    /// boolean is rejected and the prior answer survives.
    pub fn set_answer_raw(&mut self, question_id: &str, raw: &str) -> Result<(), AnswerError> {
        let kind = self
            .active_questions()
            .iter()
            .find(|q| q.id == question_id)
            .map(|q| q.kind)
            .ok_or_else(|| AnswerError::UnknownQuestion(question_id.to_string()))?;

        let value = match kind {
            QuestionKind::Boolean => AnswerValue::Bool(
                raw.trim()
                    .parse::<bool>()
                    .map_err(|_| AnswerError::InvalidBoolean(question_id.to_string()))?,
            ),
            QuestionKind::Number => AnswerValue::Number(
                raw.trim()
                    .parse::<f64>()
                    .map_err(|_| AnswerError::InvalidNumber(question_id.to_string()))?,
            ),
            QuestionKind::Multiselect => AnswerValue::List(
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            ),
            QuestionKind::Select | QuestionKind::Text => AnswerValue::Text(raw.to_string()),
        };

        self.set_answer(question_id, value)
    }

    // ------------------------------------------------------------------
    // Deployment environment
    // ------------------------------------------------------------------

    /// Choose the deployment environment
    pub fn set_deployment_environment(&mut self, env: DeploymentEnvironment) {
        self.deployment_environment = Some(env);
    }

    /// Currently chosen deployment environment
    pub fn deployment_environment(&self) -> Option<DeploymentEnvironment> {
        self.deployment_environment
    }

    // ------------------------------------------------------------------
    // Model registry
    // ------------------------------------------------------------------

    /// Toggle a model in or out of the selection set
    ///
    /// Adds when absent, removes when present; toggling twice restores the
    /// prior state. Selection order is preserved for the remaining entries.
    pub fn toggle_model(&mut self, model_id: &str) {
        if !self.selected_models.shift_remove(model_id) {
            self.selected_models.insert(model_id.to_string());
        }
    }

    /// Selected model ids, in selection order
    pub fn selected_models(&self) -> Vec<&str> {
        self.selected_models.iter().map(String::as_str).collect()
    }

    /// Whether the given model is currently selected
    pub fn is_model_selected(&self, model_id: &str) -> bool {
        self.selected_models.contains(model_id)
    }

    // ------------------------------------------------------------------
    // Pack registry
    // ------------------------------------------------------------------

    /// Toggle a pack selection by composite key
    ///
    /// Deselects when the key is present. Selects otherwise, pinning the
    /// lexicographic maximum of `versions` — the behavior the platform has
    /// always had, so `["9", "10"]` pins `"9"`. Not a semver comparison.
    pub fn toggle_pack(&mut self, domain: PackDomain, pack_id: &str, versions: &[String]) {
        let key = PackKey::new(domain, pack_id);
        if self.selected_packs.shift_remove(&key).is_some() {
            debug!(pack = %key, "Pack deselected");
            return;
        }
        let version = versions.iter().max().cloned().unwrap_or_default();
        debug!(pack = %key, version = %version, "Pack selected");
        self.selected_packs.insert(
            key,
            SelectedPack {
                domain,
                pack_id: pack_id.to_string(),
                version,
            },
        );
    }

    /// Overwrite the pinned version for an already-selected pack
    ///
    /// The version is accepted as-is, without membership checks against the
    /// pack's published list. No-op when the key is not selected.
    pub fn set_pack_version(&mut self, domain: PackDomain, pack_id: &str, version: &str) {
        let key = PackKey::new(domain, pack_id);
        if let Some(selected) = self.selected_packs.get_mut(&key) {
            selected.version = version.to_string();
        }
    }

    /// Selected packs, in insertion order of their keys
    pub fn selected_packs(&self) -> Vec<&SelectedPack> {
        self.selected_packs.values().collect()
    }

    /// Whether the given pack key is currently selected
    pub fn is_pack_selected(&self, domain: PackDomain, pack_id: &str) -> bool {
        self.selected_packs.contains_key(&PackKey::new(domain, pack_id))
    }

    // ------------------------------------------------------------------
    // Readiness
    // ------------------------------------------------------------------

    /// Readiness breakdown, recomputed from current state
    pub fn readiness(&self) -> Readiness {
        Readiness {
            industry: self.industry_id.is_some(),
            segment: self.segment_id.is_some(),
            use_case: self.use_case_id.is_some(),
            deployment_environment: self.deployment_environment.is_some(),
            model_count: self.selected_models.len(),
            pack_count: self.selected_packs.len(),
        }
    }

    /// Whether submission is permitted
    pub fn is_ready(&self) -> bool {
        self.readiness().is_ready()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
