//! Session snapshot persistence
//!
//! A half-finished wizard run can be parked in a JSON state file and picked
//! up later. Restore re-applies the snapshot through the normal session
//! setters, so ids that no longer resolve against the freshly loaded
//! catalogs degrade to "none" instead of resurrecting stale state.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::session::WizardSession;
use crate::types::{Answers, DeploymentEnvironment, Industry, SelectedPack};

/// Default state file name, relative to the working directory
pub const STATE_FILE: &str = ".truststack-wizard.json";

/// The session state file path
pub fn state_file_path() -> PathBuf {
    PathBuf::from(STATE_FILE)
}

/// Serializable image of a session's mutable state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default)]
    pub industry_id: Option<String>,
    #[serde(default)]
    pub segment_id: Option<String>,
    #[serde(default)]
    pub use_case_id: Option<String>,
    #[serde(default)]
    pub scope_answers: Answers,
    #[serde(default)]
    pub deployment_environment: Option<DeploymentEnvironment>,
    #[serde(default)]
    pub selected_llms: Vec<String>,
    #[serde(default)]
    pub selected_packs: Vec<SelectedPack>,
}

impl SessionSnapshot {
    /// Capture the mutable state of a session
    pub fn capture(session: &WizardSession) -> Self {
        Self {
            industry_id: session.industry_id().map(String::from),
            segment_id: session.segment_id().map(String::from),
            use_case_id: session.use_case_id().map(String::from),
            scope_answers: session.answers().clone(),
            deployment_environment: session.deployment_environment(),
            selected_llms: session
                .selected_models()
                .into_iter()
                .map(String::from)
                .collect(),
            selected_packs: session.selected_packs().into_iter().cloned().collect(),
        }
    }

    /// Rebuild a session over freshly loaded industries
    ///
    /// Hierarchy ids re-resolve through the selection setters; answers are
    /// then re-applied one by one, and any key that no longer names an
    /// active question (or no longer type-checks) is dropped. Registries
    /// restore verbatim, including versions outside the current catalog.
    pub fn restore(&self, industries: Vec<Industry>) -> WizardSession {
        let mut session = WizardSession::new(industries);

        if let Some(id) = &self.industry_id {
            session.select_industry(id);
        }
        if let Some(id) = &self.segment_id {
            session.select_segment(id);
        }
        if let Some(id) = &self.use_case_id {
            session.select_use_case(id);
        }

        for (question_id, value) in &self.scope_answers {
            if let Err(err) = session.set_answer(question_id, value.clone()) {
                debug!(question = %question_id, error = %err, "Dropped stale answer on restore");
            }
        }

        if let Some(env) = self.deployment_environment {
            session.set_deployment_environment(env);
        }
        for model in &self.selected_llms {
            session.toggle_model(model);
        }
        for pack in &self.selected_packs {
            session.toggle_pack(pack.domain, &pack.pack_id, &[pack.version.clone()]);
        }

        session
    }

    /// Load a snapshot from a JSON state file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot = serde_json::from_str(&content)?;
        Ok(snapshot)
    }

    /// Save this snapshot to a JSON state file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
