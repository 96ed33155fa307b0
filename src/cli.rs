//! CLI command logic - extracted for testability
//!
//! Display lives in main.rs; everything here returns data and
//! `anyhow::Result`, so commands can be exercised without a terminal.

use anyhow::Context;
use std::path::Path;

use crate::catalog::sort_packs;
use crate::payload::{assemble, ProjectDraft, ProjectPayload};
use crate::session::WizardSession;
use crate::state::SessionSnapshot;
use crate::types::{IndustryCatalog, Pack, PackCatalog};

/// Read an industry hierarchy document from a JSON file
pub fn load_industries(path: &Path) -> anyhow::Result<IndustryCatalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading industry catalog {}", path.display()))?;
    let catalog: IndustryCatalog = serde_json::from_str(&content)
        .with_context(|| format!("parsing industry catalog {}", path.display()))?;
    Ok(catalog)
}

/// Read a pack catalog from a JSON file, already in canonical order
pub fn load_packs(path: &Path) -> anyhow::Result<Vec<Pack>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading pack catalog {}", path.display()))?;
    let catalog: PackCatalog = serde_json::from_str(&content)
        .with_context(|| format!("parsing pack catalog {}", path.display()))?;
    let mut packs = catalog.packs;
    sort_packs(&mut packs);
    Ok(packs)
}

/// Rebuild the session from the state file, or start fresh when absent
pub fn load_session(state_path: &Path, industries_path: &Path) -> anyhow::Result<WizardSession> {
    let catalog = load_industries(industries_path)?;
    let snapshot = if state_path.exists() {
        SessionSnapshot::load(state_path)?
    } else {
        SessionSnapshot::default()
    };
    Ok(snapshot.restore(catalog.industries))
}

/// Assemble a creation payload from the saved session
pub fn assemble_from_state(
    state_path: &Path,
    industries_path: &Path,
    name: &str,
    description: Option<&str>,
) -> anyhow::Result<ProjectPayload> {
    let session = load_session(state_path, industries_path)?;
    let mut draft = ProjectDraft::new(name);
    if let Some(description) = description {
        draft = draft.with_description(description);
    }
    let payload = assemble(&draft, &session)?;
    Ok(payload)
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
