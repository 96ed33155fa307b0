//! Collaborator contracts
//!
//! The engine never talks to a network itself; catalogs, project creation,
//! and document preview are traits the host wires up. `StaticProvider` is
//! the in-memory implementation used by tests and the demo path.

use thiserror::Error;
use tracing::{debug, warn};

use crate::payload::ProjectPayload;
use crate::types::{Industry, IndustryCatalog, Pack, PackCatalog};

// ============================================================================
// Errors
// ============================================================================

/// Catalog fetch failure
///
/// Non-fatal: the session stays interactive with whatever catalogs loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The collaborator could not produce the document
    #[error("catalog fetch failed: {0}")]
    Fetch(String),

    /// The document arrived but did not parse
    #[error("catalog document malformed: {0}")]
    Malformed(String),
}

/// Project creation failure
///
/// The session state is preserved so the user can retry without re-entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("project creation failed: {0}")]
pub struct SubmitError(pub String);

// ============================================================================
// Collaborator traits
// ============================================================================

/// Supplies the industry hierarchy and pack catalog
pub trait CatalogProvider {
    fn fetch_industries(&self) -> Result<IndustryCatalog, LoadError>;
    fn fetch_packs(&self) -> Result<PackCatalog, LoadError>;
}

/// Creates the project record from an assembled payload
pub trait ProjectCreator {
    fn create_project(&self, payload: &ProjectPayload) -> Result<CreationResponse, SubmitError>;
}

/// Creation endpoint response
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreationResponse {
    pub project_id: String,
}

/// Opens a source document for a pack
pub trait DocumentPreview {
    fn open(&self, title: &str, url: &str);
}

/// Preview a pack's source document, if it declares one
///
/// An absent or empty URL is a no-op.
pub fn preview_pack_source(pack: &Pack, viewer: &dyn DocumentPreview) {
    match pack.source_url.as_deref() {
        Some(url) if !url.is_empty() => viewer.open(pack.display_name(), url),
        _ => debug!(pack = %pack.key(), "No source document to preview"),
    }
}

// ============================================================================
// Catalog loading
// ============================================================================

/// Catalogs after the initial load, plus the first error if any fetch failed
///
/// Both fetches run; a failure surfaces as one session-level error and
/// leaves the catalogs as whatever did load (possibly empty).
#[derive(Debug, Clone, Default)]
pub struct LoadedCatalogs {
    pub industries: Vec<Industry>,
    pub packs: Vec<Pack>,
    pub error: Option<LoadError>,
}

/// Fetch both catalogs from the provider
pub fn load_catalogs(provider: &dyn CatalogProvider) -> LoadedCatalogs {
    let mut loaded = LoadedCatalogs::default();

    match provider.fetch_industries() {
        Ok(catalog) => loaded.industries = catalog.industries,
        Err(err) => {
            warn!(error = %err, "Industry catalog fetch failed");
            loaded.error.get_or_insert(err);
        }
    }

    match provider.fetch_packs() {
        Ok(catalog) => loaded.packs = catalog.packs,
        Err(err) => {
            warn!(error = %err, "Pack catalog fetch failed");
            loaded.error.get_or_insert(err);
        }
    }

    debug!(
        industries = loaded.industries.len(),
        packs = loaded.packs.len(),
        failed = loaded.error.is_some(),
        "Catalog load completed"
    );
    loaded
}

// ============================================================================
// In-memory provider
// ============================================================================

/// Provider over pre-built catalogs, for tests and the demo path
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    industries: IndustryCatalog,
    packs: PackCatalog,
}

impl StaticProvider {
    pub fn new(industries: IndustryCatalog, packs: PackCatalog) -> Self {
        Self { industries, packs }
    }
}

impl CatalogProvider for StaticProvider {
    fn fetch_industries(&self) -> Result<IndustryCatalog, LoadError> {
        Ok(self.industries.clone())
    }

    fn fetch_packs(&self) -> Result<PackCatalog, LoadError> {
        Ok(self.packs.clone())
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
