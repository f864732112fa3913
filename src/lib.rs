//! admitfit - college matching engine
//!
//! Scores a student's academic profile against candidate colleges:
//! - Normalization of heterogeneous attributes (bounded + batch z-score)
//! - Nine-factor weighted scoring across academic, profile and fit categories
//! - Alternative cosine-similarity scoring
//! - Stable top-N ranking, with optional enrichment from college data sources

pub mod types;
pub mod normalizer;
pub mod weights;
pub mod scoring;
pub mod ranking;
pub mod predictor;
pub mod sources;
pub mod stats_client;
pub mod engine;
pub mod config;
pub mod error;
pub mod server;

pub use types::*;
pub use config::{ConfigError, ServiceConfig};
pub use engine::{MatchEngine, SharedMatchEngine};
pub use error::MatchError;
pub use predictor::CollegePredictor;
pub use sources::{CollegeSource, StaticCatalogSource};
pub use stats_client::CollegeStatsClient;
pub use weights::{CategoryWeights, FactorWeights, WeightError, WeightVector};
