//! Rule evaluation over a resource list

use costwise_store::Resource;
use tracing::debug;

use crate::recommendation::Recommendation;
use crate::rules::{DownsizeUnderutilizedCompute, Rule, ShrinkOversizedStorage};

/// Ordered set of rules applied to every resource
pub struct RecommendationEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::with_rules(vec![
            Box::new(DownsizeUnderutilizedCompute),
            Box::new(ShrinkOversizedStorage),
        ])
    }
}

impl RecommendationEngine {
    /// Engine evaluating `rules` in the given order
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Evaluate every rule against every resource.
    ///
    /// Output follows input order; a resource matched by several rules yields
    /// one entry per rule, in rule order.
    pub fn generate(&self, resources: &[Resource]) -> Vec<Recommendation> {
        let recommendations: Vec<Recommendation> = resources
            .iter()
            .flat_map(|resource| {
                self.rules.iter().filter_map(move |rule| {
                    let recommendation = rule.evaluate(resource)?;
                    debug!("Rule {} matched resource {}", rule.name(), resource.id);
                    Some(recommendation)
                })
            })
            .collect();

        debug!(
            "Evaluated {} rules over {} resources: {} recommendations",
            self.rules.len(),
            resources.len(),
            recommendations.len()
        );

        recommendations
    }
}

/// Evaluate the default rule set.
pub fn generate_recommendations(resources: &[Resource]) -> Vec<Recommendation> {
    RecommendationEngine::default().generate(resources)
}
