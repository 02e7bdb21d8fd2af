//! costwise-engine - Recommendation Engine
//!
//! Evaluates static threshold rules over the resource inventory and reduces
//! the result to a cost summary. Everything here is a pure function of its
//! input: nothing is cached and the store is never written.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// Rule evaluation over a resource list
pub mod engine;
/// Recommendation values and rounding helpers
pub mod recommendation;
/// The threshold rules
pub mod rules;
/// Inventory cost summary
pub mod summary;

pub use engine::{generate_recommendations, RecommendationEngine};
pub use recommendation::{round2, Confidence, Recommendation, RecommendationKind};
pub use rules::{DownsizeUnderutilizedCompute, Rule, ShrinkOversizedStorage};
pub use summary::Summary;
