use costwise_store::Resource;
use serde::{Deserialize, Serialize};

use crate::recommendation::{round2, Recommendation};

/// Inventory totals and optimization potential
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of tracked resources
    pub total_resources: usize,
    /// Sum of monthly costs, rounded to cents
    pub total_monthly_cost: f64,
    /// Sum of projected savings, rounded to cents
    pub total_potential_savings: f64,
    /// Number of recommendations
    pub optimization_opportunities: usize,
}

impl Summary {
    /// Reduce a resource set and its recommendations to the four totals.
    pub fn compute(resources: &[Resource], recommendations: &[Recommendation]) -> Self {
        let total_monthly_cost: f64 = resources.iter().map(|r| r.monthly_cost).sum();
        let total_potential_savings: f64 =
            recommendations.iter().map(|r| r.monthly_savings).sum();

        Self {
            total_resources: resources.len(),
            total_monthly_cost: round2(total_monthly_cost),
            total_potential_savings: round2(total_potential_savings),
            optimization_opportunities: recommendations.len(),
        }
    }
}
