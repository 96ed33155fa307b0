//! Submission payload assembly
//!
//! Builds the creation request from a ready session and interprets the
//! collaborator's response. Assembly copies the registries verbatim; any
//! normalization (LLM dedup, cross-checking the hierarchy against the use
//! case) is the backend's job.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::client::{CreationResponse, ProjectCreator, SubmitError};
use crate::session::WizardSession;
use crate::types::{Answers, DeploymentEnvironment, SelectedPack};

/// Name and optional description entered on the final step
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub name: String,
    pub description: Option<String>,
}

impl ProjectDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The creation request, field names exactly as the backend reads them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectPayload {
    pub name: String,
    pub description: Option<String>,
    pub industry_id: String,
    pub segment_id: String,
    pub use_case_id: String,
    pub scope_answers: Answers,
    pub deployment_environment: DeploymentEnvironment,
    pub selected_llms: Vec<String>,
    pub selected_packs: Vec<SelectedPack>,
}

/// Assembly refused because the session gate is not satisfied
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("session not ready for submission; missing: {0}")]
pub struct NotReady(pub String);

/// Build the creation payload from a ready session
///
/// The readiness predicate is the single gate; once it holds, every field
/// below is present and the defaults never fire.
pub fn assemble(draft: &ProjectDraft, session: &WizardSession) -> Result<ProjectPayload, NotReady> {
    let readiness = session.readiness();
    if !readiness.is_ready() {
        return Err(NotReady(readiness.missing().join(", ")));
    }

    Ok(ProjectPayload {
        name: draft.name.clone(),
        description: draft.description.clone(),
        industry_id: session.industry_id().unwrap_or_default().to_string(),
        segment_id: session.segment_id().unwrap_or_default().to_string(),
        use_case_id: session.use_case_id().unwrap_or_default().to_string(),
        scope_answers: session.answers().clone(),
        deployment_environment: session
            .deployment_environment()
            .unwrap_or(DeploymentEnvironment::CustomStack),
        selected_llms: session
            .selected_models()
            .into_iter()
            .map(String::from)
            .collect(),
        selected_packs: session.selected_packs().into_iter().cloned().collect(),
    })
}

/// Submit an assembled payload through the creation collaborator
///
/// On success the response's `project_id` is the navigation target. On
/// failure the error carries the collaborator's message and nothing else
/// changes; the caller's session is untouched and ready for retry.
pub fn submit(
    payload: &ProjectPayload,
    creator: &dyn ProjectCreator,
) -> Result<CreationResponse, SubmitError> {
    let response = creator.create_project(payload)?;
    info!(project_id = %response.project_id, "Project created");
    Ok(response)
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
