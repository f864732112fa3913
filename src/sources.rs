//! College data sources used to fill in missing statistics

use crate::types::CollegeCandidate;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

/// Trait for pluggable college lookups
#[async_trait]
pub trait CollegeSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Look up a college by name. `Ok(None)` means the source does not know it.
    async fn lookup(&self, name: &str) -> Result<Option<CollegeCandidate>>;
}

fn catalog_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// In-memory catalog keyed by case-insensitive college name
pub struct StaticCatalogSource {
    colleges: HashMap<String, CollegeCandidate>,
}

impl StaticCatalogSource {
    pub fn new(colleges: Vec<CollegeCandidate>) -> Self {
        let colleges = colleges
            .into_iter()
            .map(|c| (catalog_key(&c.name), c))
            .collect();
        Self { colleges }
    }

    /// Load a JSON array of colleges
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read college catalog {}", path.display()))?;
        let colleges: Vec<CollegeCandidate> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse college catalog {}", path.display()))?;
        tracing::info!("Loaded {} colleges from {}", colleges.len(), path.display());
        Ok(Self::new(colleges))
    }

    pub fn len(&self) -> usize {
        self.colleges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colleges.is_empty()
    }
}

#[async_trait]
impl CollegeSource for StaticCatalogSource {
    fn name(&self) -> &'static str {
        "static_catalog"
    }

    async fn lookup(&self, name: &str) -> Result<Option<CollegeCandidate>> {
        Ok(self.colleges.get(&catalog_key(name)).cloned())
    }
}
