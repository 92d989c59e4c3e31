//! Known AI services and the domain index used to match destinations.
//!
//! A catalog file is JSON:
//!
//! ```json
//! { "services": [ { "name": "Anthropic Claude", "category": "Chatbot", "domains": ["claude.ai"] } ] }
//! ```
//!
//! Every domain is owned by exactly one service. Loading or merging a file
//! whose domain is already indexed replaces the previous owner without
//! warning, so a custom catalog merged after the base one wins collisions.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use sh_log_tools::normalize_domain;

use crate::error::{CatalogError, CatalogResult};

/// Catalog shipped with the crate, used when no services file is found.
pub const BUNDLED_SERVICES: &str = include_str!("../data/ai_services.json");

/// A tracked AI service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiService {
    /// Display name (e.g., "OpenAI ChatGPT").
    pub name: String,
    /// Category label (e.g., "Chatbot", "LLM API").
    pub category: String,
    /// Domains owned by the service.
    #[serde(default)]
    pub domains: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ServicesFile {
    #[serde(default)]
    services: Vec<AiService>,
}

/// Domain index built from one or more services files.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    index: HashMap<String, Arc<AiService>>,
}

impl Catalog {
    /// Empty catalog; nothing matches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a services JSON file.
    pub fn load(path: &str) -> CatalogResult<Self> {
        let mut catalog = Self::new();
        catalog.merge_file(path)?;
        Ok(catalog)
    }

    /// Build a catalog from services JSON text.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let mut catalog = Self::new();
        catalog.merge_json(json)?;
        Ok(catalog)
    }

    /// The catalog embedded at compile time.
    pub fn bundled() -> CatalogResult<Self> {
        let mut catalog = Self::new();
        catalog.merge_str(BUNDLED_SERVICES, "<bundled>")?;
        Ok(catalog)
    }

    /// Merge another services file; its domains overwrite existing owners.
    pub fn merge_file(&mut self, path: &str) -> CatalogResult<()> {
        let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        self.merge_str(&contents, path)
    }

    /// Merge services JSON text; its domains overwrite existing owners.
    pub fn merge_json(&mut self, json: &str) -> CatalogResult<()> {
        self.merge_str(json, "<inline>")
    }

    fn merge_str(&mut self, json: &str, origin: &str) -> CatalogResult<()> {
        let file: ServicesFile = serde_json::from_str(json).map_err(|e| CatalogError::Format {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

        let before = self.index.len();
        for service in file.services {
            self.insert_service(service);
        }
        tracing::debug!(
            origin,
            new_domains = self.index.len() - before,
            total_domains = self.index.len(),
            "services merged"
        );
        Ok(())
    }

    /// Index every domain of `service`, replacing any previous owner.
    pub fn insert_service(&mut self, service: AiService) {
        let service = Arc::new(service);
        for domain in &service.domains {
            let key = normalize_domain(domain);
            if key.is_empty() {
                continue;
            }
            self.index.insert(key, Arc::clone(&service));
        }
    }

    /// Resolve a destination to the service owning it or one of its parents.
    ///
    /// Exact match first, then progressively shorter suffixes obtained by
    /// dropping leading labels. The bare last label (the TLD) is never tried,
    /// so a catalog key such as `com` cannot swallow every `.com` host.
    pub fn match_domain(&self, domain: &str) -> Option<&AiService> {
        let domain = normalize_domain(domain);

        if let Some(service) = self.index.get(&domain) {
            return Some(service.as_ref());
        }

        let labels: Vec<&str> = domain.split('.').collect();
        (1..labels.len().saturating_sub(1))
            .map(|i| labels[i..].join("."))
            .find_map(|parent| self.index.get(&parent))
            .map(|s| s.as_ref())
    }

    /// Number of distinct services that still own at least one domain.
    pub fn service_count(&self) -> usize {
        self.index
            .values()
            .map(|s| s.name.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Number of indexed domains.
    pub fn domain_count(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
