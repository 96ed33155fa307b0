//! Model and pack catalog shaping
//!
//! Provides:
//! - The builtin LLM model catalog with free-text search
//! - Canonical pack ordering for display and domain counts
//! - Domain filtering over a pre-sorted pack list
//!
//! All queries are pure and order-preserving relative to their input.

use indexmap::IndexMap;
use std::cmp::Ordering;
use std::str::FromStr;
use tracing::{debug, instrument};

use crate::types::{LlmModel, Pack, PackDomain, UnknownDomain};

// ============================================================================
// LLM model catalog
// ============================================================================

/// The selectable LLM model catalog, in rank order
#[derive(Debug, Clone, Default)]
pub struct LlmCatalog {
    models: Vec<LlmModel>,
}

impl LlmCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The builtin catalog shipped with the wizard
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for model in [
            LlmModel::new("gpt-5", "OpenAI", 1)
                .with_tier("frontier")
                .with_driver("general reasoning"),
            LlmModel::new("claude-opus-4", "Anthropic", 2)
                .with_tier("frontier")
                .with_driver("complex reasoning"),
            LlmModel::new("gemini-2.5-pro", "Google", 3)
                .with_tier("frontier")
                .with_driver("long context"),
            LlmModel::new("claude-sonnet-4", "Anthropic", 4)
                .with_tier("mainstream")
                .with_driver("balanced cost/quality"),
            LlmModel::new("gpt-4o", "OpenAI", 5)
                .with_tier("mainstream")
                .with_driver("multimodal"),
            LlmModel::new("llama-4-maverick", "Meta", 6)
                .with_tier("mainstream")
                .with_driver("open weights"),
            LlmModel::new("deepseek-r1", "DeepSeek", 7)
                .with_tier("mainstream")
                .with_driver("cost-efficient reasoning"),
            LlmModel::new("mistral-large", "Mistral AI", 8)
                .with_tier("mainstream")
                .with_driver("EU data residency"),
            LlmModel::new("qwen-2.5-max", "Alibaba", 9)
                .with_tier("emerging")
                .with_driver("multilingual"),
            LlmModel::new("command-r-plus", "Cohere", 10)
                .with_tier("emerging")
                .with_driver("enterprise RAG"),
            LlmModel::new("grok-3", "xAI", 11)
                .with_tier("emerging")
                .with_driver("realtime data"),
            LlmModel::new("nova-pro", "Amazon", 12)
                .with_tier("emerging")
                .with_driver("AWS integration"),
        ] {
            catalog.add(model);
        }
        catalog
    }

    /// Add a model to the catalog
    pub fn add(&mut self, model: LlmModel) {
        self.models.push(model);
    }

    /// All models, in rank order
    pub fn all(&self) -> &[LlmModel] {
        &self.models
    }

    /// Look up a model by identity
    pub fn get(&self, model_id: &str) -> Option<&LlmModel> {
        self.models.iter().find(|m| m.model == model_id)
    }

    /// Total model count
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Free-text search over model, developer, tier, and driver fields
    ///
    /// Case-insensitive substring match; an empty or whitespace-only query
    /// returns the whole catalog in rank order.
    #[instrument(name = "catalog.models.search", skip(self), fields(result_count = tracing::field::Empty))]
    pub fn search(&self, query: &str) -> Vec<&LlmModel> {
        let query = query.trim().to_lowercase();
        let results: Vec<_> = if query.is_empty() {
            self.models.iter().collect()
        } else {
            self.models
                .iter()
                .filter(|m| {
                    m.model.to_lowercase().contains(&query)
                        || m.developer.to_lowercase().contains(&query)
                        || m.popularity_tier.to_lowercase().contains(&query)
                        || m.main_driver.to_lowercase().contains(&query)
                })
                .collect()
        };
        tracing::Span::current().record("result_count", results.len());
        debug!(count = results.len(), "Model search completed");
        results
    }
}

// ============================================================================
// Pack ordering and filtering
// ============================================================================

/// Sort packs into canonical display order
///
/// Ascending by domain, then declared order (missing sorts last), then
/// display name. Applied once, before any filtering; domain counts and the
/// submission flow both enumerate this ordering.
pub fn sort_packs(packs: &mut [Pack]) {
    packs.sort_by(|a, b| {
        a.domain
            .cmp(&b.domain)
            .then_with(|| a.sort_order().cmp(&b.sort_order()))
            .then_with(|| compare_names(a, b))
    });
}

fn compare_names(a: &Pack, b: &Pack) -> Ordering {
    a.display_name().cmp(b.display_name())
}

/// Domain selector for the pack list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DomainFilter {
    /// Pass every pack through
    #[default]
    All,
    /// Only packs in the given domain
    Domain(PackDomain),
}

impl DomainFilter {
    /// Whether the given pack passes this filter
    pub fn matches(&self, pack: &Pack) -> bool {
        match self {
            Self::All => true,
            Self::Domain(domain) => pack.domain == *domain,
        }
    }
}

impl std::fmt::Display for DomainFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Domain(domain) => write!(f, "{domain}"),
        }
    }
}

impl FromStr for DomainFilter {
    type Err = UnknownDomain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(Self::All)
        } else {
            s.parse::<PackDomain>().map(Self::Domain)
        }
    }
}

/// Filter a pre-sorted pack list by domain, preserving order
#[instrument(name = "catalog.packs.filter", skip(packs), fields(result_count = tracing::field::Empty))]
pub fn filter_packs<'a>(packs: &'a [Pack], filter: DomainFilter) -> Vec<&'a Pack> {
    let results: Vec<_> = packs.iter().filter(|p| filter.matches(p)).collect();
    tracing::Span::current().record("result_count", results.len());
    debug!(filter = %filter, count = results.len(), "Pack filter completed");
    results
}

/// Pack count per domain, every domain present even when zero
pub fn domain_counts(packs: &[Pack]) -> IndexMap<PackDomain, usize> {
    let mut counts: IndexMap<PackDomain, usize> =
        PackDomain::all().iter().map(|d| (*d, 0)).collect();
    for pack in packs {
        *counts.entry(pack.domain).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
