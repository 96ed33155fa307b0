//! Core wizard data model
//!
//! Catalog types (industry hierarchy, pack catalog, LLM models) are loaded
//! once and never mutated by the wizard. Session values carry their type in
//! the `AnswerValue` tag so mismatches surface at the write boundary instead
//! of at submission time.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Industry hierarchy
// ============================================================================

/// Top level of the selection hierarchy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Industry {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Child segments, in catalog order
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl Industry {
    /// Look up a child segment by id
    pub fn segment(&self, id: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }
}

/// Industry segment, owned by exactly one industry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub id: String,
    pub name: String,
    /// Child use cases, in catalog order
    #[serde(default)]
    pub use_cases: Vec<UseCase>,
}

impl Segment {
    /// Look up a child use case by id
    pub fn use_case(&self, id: &str) -> Option<&UseCase> {
        self.use_cases.iter().find(|u| u.id == id)
    }
}

/// A concrete use case within a segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UseCase {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Scoping questions presented once this use case is selected
    #[serde(default)]
    pub scope_questions: Vec<ScopeQuestion>,
}

// ============================================================================
// Scope questions and answers
// ============================================================================

/// Declared type of a scope question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Boolean,
    Select,
    Multiselect,
    #[serde(rename = "string")]
    Text,
    Number,
}

impl QuestionKind {
    /// Wire name, as it appears in catalog documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Select => "select",
            Self::Multiselect => "multiselect",
            Self::Text => "string",
            Self::Number => "number",
        }
    }
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A use-case-specific, typed scoping question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeQuestion {
    pub id: String,
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    /// Choices for select/multiselect questions
    #[serde(default)]
    pub options: Vec<String>,
    /// Optional default whose shape matches `kind`
    #[serde(default)]
    pub default: Option<AnswerValue>,
}

/// A typed answer to a scope question
///
/// The wire shape is the bare JSON value (bool, string, string array, or
/// number), so serde is untagged. Select and text answers share the string
/// shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Number(f64),
    List(Vec<String>),
    Text(String),
}

impl AnswerValue {
    /// Whether this value's shape satisfies the given question kind
    pub fn matches(&self, kind: QuestionKind) -> bool {
        matches!(
            (self, kind),
            (Self::Bool(_), QuestionKind::Boolean)
                | (Self::Text(_), QuestionKind::Select)
                | (Self::Text(_), QuestionKind::Text)
                | (Self::List(_), QuestionKind::Multiselect)
                | (Self::Number(_), QuestionKind::Number)
        )
    }

    /// Shape name for error messages
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::List(_) => "string list",
            Self::Text(_) => "string",
        }
    }
}

/// Answers keyed by question id, in write order
///
/// Only meaningful in the context of the currently selected use case; the
/// full-replace policy on use-case change keeps stale keys out.
pub type Answers = IndexMap<String, AnswerValue>;

// ============================================================================
// Packs
// ============================================================================

/// Compliance domain classifying a pack
///
/// Variant order matches the lexicographic order of the wire names, so the
/// derived `Ord` sorts the same way the strings do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackDomain {
    Governance,
    Safety,
    Security,
}

impl PackDomain {
    /// All domains, in canonical order
    pub fn all() -> &'static [Self] {
        &[Self::Governance, Self::Safety, Self::Security]
    }

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Governance => "governance",
            Self::Safety => "safety",
            Self::Security => "security",
        }
    }
}

impl std::fmt::Display for PackDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unknown pack domain string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pack domain: {0}")]
pub struct UnknownDomain(pub String);

impl FromStr for PackDomain {
    type Err = UnknownDomain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "governance" => Ok(Self::Governance),
            "safety" => Ok(Self::Safety),
            "security" => Ok(Self::Security),
            other => Err(UnknownDomain(other.to_string())),
        }
    }
}

/// A versioned, domain-tagged policy/compliance bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pack {
    pub domain: PackDomain,
    pub pack_id: String,
    /// Display name; catalogs may omit it
    #[serde(default)]
    pub name: String,
    /// Display ordering within a domain; missing means last
    #[serde(default)]
    pub order: Option<u32>,
    /// Published versions, in catalog order
    #[serde(default)]
    pub versions: Vec<String>,
    /// Link to the authoritative source document, when one exists
    #[serde(default)]
    pub source_url: Option<String>,
}

/// Display ordering weight for packs that do not declare one
pub const PACK_ORDER_DEFAULT: u32 = 9999;

impl Pack {
    /// Effective sort weight
    pub fn sort_order(&self) -> u32 {
        self.order.unwrap_or(PACK_ORDER_DEFAULT)
    }

    /// Name to display and sort by, falling back to the pack id
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.pack_id
        } else {
            &self.name
        }
    }

    /// Composite identity of this pack
    pub fn key(&self) -> PackKey {
        PackKey::new(self.domain, &self.pack_id)
    }
}

/// Composite pack identity: domain plus pack id
///
/// A real key type rather than `"domain/pack_id"` concatenation, so ids that
/// happen to contain the separator cannot collide.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PackKey {
    pub domain: PackDomain,
    pub pack_id: String,
}

impl PackKey {
    pub fn new(domain: PackDomain, pack_id: impl Into<String>) -> Self {
        Self {
            domain,
            pack_id: pack_id.into(),
        }
    }
}

impl std::fmt::Display for PackKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.domain, self.pack_id)
    }
}

/// A pack chosen for the project, pinned to one version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedPack {
    pub domain: PackDomain,
    pub pack_id: String,
    pub version: String,
}

impl SelectedPack {
    /// Composite identity of this selection
    pub fn key(&self) -> PackKey {
        PackKey::new(self.domain, &self.pack_id)
    }
}

// ============================================================================
// LLM model catalog entries
// ============================================================================

/// Static catalog entry for a selectable LLM
///
/// Field names stay camelCase on the wire; the catalog document predates this
/// engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmModel {
    /// Unique model identity (e.g. "claude-opus-4")
    pub model: String,
    /// Developer / vendor
    pub developer: String,
    /// Adoption tier label
    pub popularity_tier: String,
    /// Primary driver for choosing this model
    pub main_driver: String,
    /// Catalog rank, ascending
    pub rank: u32,
}

impl LlmModel {
    pub fn new(model: impl Into<String>, developer: impl Into<String>, rank: u32) -> Self {
        Self {
            model: model.into(),
            developer: developer.into(),
            popularity_tier: String::new(),
            main_driver: String::new(),
            rank,
        }
    }

    pub fn with_tier(mut self, tier: impl Into<String>) -> Self {
        self.popularity_tier = tier.into();
        self
    }

    pub fn with_driver(mut self, driver: impl Into<String>) -> Self {
        self.main_driver = driver.into();
        self
    }
}

// ============================================================================
// Deployment environments
// ============================================================================

/// Where the project's workloads will run
///
/// The closed set the backend accepts; display strings are the wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentEnvironment {
    #[serde(rename = "AWS Native")]
    AwsNative,
    #[serde(rename = "GCP Native")]
    GcpNative,
    #[serde(rename = "Azure Native")]
    AzureNative,
    #[serde(rename = "Custom Stack")]
    CustomStack,
}

impl DeploymentEnvironment {
    /// All environments, in display order
    pub fn all() -> &'static [Self] {
        &[
            Self::AwsNative,
            Self::GcpNative,
            Self::AzureNative,
            Self::CustomStack,
        ]
    }

    /// Display and wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwsNative => "AWS Native",
            Self::GcpNative => "GCP Native",
            Self::AzureNative => "Azure Native",
            Self::CustomStack => "Custom Stack",
        }
    }
}

impl std::fmt::Display for DeploymentEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unsupported deployment environment string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported deployment environment: {0}")]
pub struct UnknownEnvironment(pub String);

impl FromStr for DeploymentEnvironment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|e| e.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownEnvironment(s.to_string()))
    }
}

// ============================================================================
// Catalog documents
// ============================================================================

/// Industry hierarchy document, as served by the catalog endpoint
///
/// An absent `industries` key reads as an empty catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndustryCatalog {
    #[serde(default)]
    pub industries: Vec<Industry>,
}

impl IndustryCatalog {
    /// Look up an industry by id
    pub fn industry(&self, id: &str) -> Option<&Industry> {
        self.industries.iter().find(|i| i.id == id)
    }
}

/// Pack catalog document, as served by the catalog endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackCatalog {
    #[serde(default)]
    pub packs: Vec<Pack>,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
