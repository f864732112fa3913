//! MatchEngine: enrich candidate colleges from sources, then rank them

use crate::config::ServiceConfig;
use crate::error::MatchError;
use crate::predictor::CollegePredictor;
use crate::sources::CollegeSource;
use crate::types::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Main match engine (thread-safe via Arc)
pub struct MatchEngine {
    pub sources: Vec<Box<dyn CollegeSource>>,
    pub max_colleges: usize,
    pub default_top_n: usize,
}

pub type SharedMatchEngine = Arc<MatchEngine>;

/// Result of enriching one college
struct Enriched {
    college: CollegeCandidate,
    enriched: bool,
    failures: usize,
}

impl MatchEngine {
    pub fn new(sources: Vec<Box<dyn CollegeSource>>, config: &ServiceConfig) -> SharedMatchEngine {
        Arc::new(Self {
            sources,
            max_colleges: config.max_colleges,
            default_top_n: config.default_top_n,
        })
    }

    /// Engine with default limits
    pub fn new_simple(sources: Vec<Box<dyn CollegeSource>>) -> SharedMatchEngine {
        Self::new(sources, &ServiceConfig::default())
    }

    /// Main entry point: score a student against the requested colleges
    pub async fn match_colleges(&self, req: MatchRequest) -> Result<MatchResponse, MatchError> {
        let start = Instant::now();

        info!(
            "Matching student: major='{}', colleges={}, strategy={:?}",
            req.student.intended_major,
            req.colleges.len(),
            req.options.strategy
        );

        req.student.validate()?;

        let mut options = req.options;
        if options.top_n.is_none() {
            options.top_n = Some(self.default_top_n);
        }
        let predictor = CollegePredictor::new(&options)?;

        let colleges_received = req.colleges.len();

        // Step 1: Dedup and cap
        let mut colleges = dedup_colleges(req.colleges);
        if colleges.len() > self.max_colleges {
            warn!(
                "Capping {} colleges to {} for this request",
                colleges.len(),
                self.max_colleges
            );
            colleges.truncate(self.max_colleges);
        }

        // Step 2: Fill missing statistics from sources
        let enriched = self.enrich_colleges(colleges).await;
        let colleges_enriched = enriched.iter().filter(|e| e.enriched).count();
        let source_failures = enriched.iter().map(|e| e.failures).sum();
        let colleges: Vec<CollegeCandidate> = enriched.into_iter().map(|e| e.college).collect();

        // Step 3: Rank
        let results = predictor.rank(&req.student, &colleges);

        let stats = MatchStats {
            colleges_received,
            colleges_scored: colleges.len(),
            colleges_enriched,
            source_failures,
            elapsed_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            "Match complete: {} scored, {} returned, {} enriched, {} source failures",
            stats.colleges_scored,
            results.len(),
            stats.colleges_enriched,
            stats.source_failures
        );

        Ok(MatchResponse {
            results,
            strategy: predictor.strategy(),
            stats,
        })
    }

    /// Run lookups for all colleges concurrently
    async fn enrich_colleges(&self, colleges: Vec<CollegeCandidate>) -> Vec<Enriched> {
        let tasks = colleges
            .into_iter()
            .map(|college| self.enrich_one(college));
        futures::future::join_all(tasks).await
    }

    /// Consult sources in order until the college has no missing fields.
    /// Lookup failures are logged and skipped.
    async fn enrich_one(&self, mut college: CollegeCandidate) -> Enriched {
        let mut enriched = false;
        let mut failures = 0;

        for source in &self.sources {
            if !college.has_missing_data() {
                break;
            }
            match source.lookup(&college.name).await {
                Ok(Some(found)) => {
                    debug!("Source {} supplied data for '{}'", source.name(), college.name);
                    college.merge_missing(&found);
                    enriched = true;
                }
                Ok(None) => {
                    debug!("Source {} has no entry for '{}'", source.name(), college.name);
                }
                Err(e) => {
                    warn!(
                        "Source {} failed for '{}': {:?}. Continuing with available data.",
                        source.name(),
                        college.name,
                        e
                    );
                    failures += 1;
                }
            }
        }

        Enriched {
            college,
            enriched,
            failures,
        }
    }
}

/// Collapse case-insensitive duplicate names, keeping first position and
/// filling its gaps from later duplicates. Blank names are dropped.
fn dedup_colleges(colleges: Vec<CollegeCandidate>) -> Vec<CollegeCandidate> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<CollegeCandidate> = Vec::new();

    for college in colleges {
        let key = college.name.trim().to_lowercase();
        if key.is_empty() {
            warn!("Dropping college with blank name");
            continue;
        }
        match index.get(&key) {
            Some(&idx) => unique[idx].merge_missing(&college),
            None => {
                index.insert(key, unique.len());
                unique.push(college);
            }
        }
    }

    unique
}
