//! truststack-wizard — selection-state engine for the TrustStack project wizard
//!
//! Keeps a guided configuration session internally consistent: the
//! industry → segment → use-case hierarchy with cascading resets, typed
//! scope answers with default synthesis, insertion-ordered model and pack
//! registries, a derived readiness gate, and assembly of the creation
//! payload. Rendering, transport, and persistence of the created project
//! live behind the collaborator traits in [`client`].

pub mod catalog;
pub mod cli;
pub mod client;
pub mod payload;
pub mod session;
pub mod state;
pub mod types;

// Re-export the types most callers touch
pub use catalog::{domain_counts, filter_packs, sort_packs, DomainFilter, LlmCatalog};
pub use client::{
    load_catalogs, preview_pack_source, CatalogProvider, CreationResponse, DocumentPreview,
    LoadError, LoadedCatalogs, ProjectCreator, StaticProvider, SubmitError,
};
pub use payload::{assemble, submit, NotReady, ProjectDraft, ProjectPayload};
pub use session::{AnswerError, Readiness, WizardSession};
pub use state::{SessionSnapshot, STATE_FILE};
pub use types::{
    AnswerValue, Answers, DeploymentEnvironment, Industry, IndustryCatalog, LlmModel, Pack,
    PackCatalog, PackDomain, PackKey, QuestionKind, ScopeQuestion, Segment, SelectedPack, UseCase,
};
