use serde::{Deserialize, Serialize};

/// What a recommendation asks the operator to do
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    /// Move a compute instance to a smaller SKU
    DownsizeInstance,
    /// Reduce provisioned storage capacity
    OptimizeStorage,
}

/// Qualitative confidence attached to a recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Confidence {
    /// Large projected savings
    High,
    /// Modest savings, or fixed by rule
    Medium,
}

/// A cost-optimization suggestion derived from one resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Id of the resource this applies to
    pub resource_id: i64,
    /// Name of the resource this applies to
    pub resource_name: String,
    /// Suggested action
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    /// Human-readable description of the current provisioning
    pub current_config: String,
    /// Human-readable description of the suggested provisioning
    pub recommended_config: String,
    /// Why the rule fired
    pub reasoning: String,
    /// Projected monthly savings, rounded to cents
    pub monthly_savings: f64,
    /// Confidence label
    pub confidence: Confidence,
}

/// Round to two decimal places.
///
/// Rounds the exact binary value, so `2.675` (stored just below the half
/// cent) becomes `2.67`. Exact ties go to even. Scaling by 100 first would
/// lift such values onto a tie and round them up.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Render a metric for display text.
///
/// Shortest round-trip digits. Whole values keep their decimal point
/// (`15.0`, `1000.0`); magnitudes at or above `1e16` or below `1e-4` switch
/// to a signed two-digit exponent (`1e+16`, `1.5e-05`).
pub(crate) fn metric(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if (-4..16).contains(&exponent) {
        let fixed = value.to_string();
        if fixed.contains('.') {
            fixed
        } else {
            format!("{}.0", fixed)
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(75.0), 75.0);
        assert_eq!(round2(22.5), 22.5);
        assert_eq!(round2(10.004), 10.0);
        assert_eq!(round2(10.006), 10.01);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_round2_uses_stored_value() {
        // Both literals sit just below the half cent in binary.
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(1.005), 1.0);
        assert_eq!(round2(5.35 * 0.5), 2.67);
        assert_eq!(round2(-2.675), -2.67);
    }

    #[test]
    fn test_metric_keeps_decimal_point() {
        assert_eq!(metric(15.0), "15.0");
        assert_eq!(metric(1000.0), "1000.0");
        assert_eq!(metric(12.5), "12.5");
        assert_eq!(metric(0.0), "0.0");
        assert_eq!(metric(0.0001), "0.0001");
        assert_eq!(metric(1e15), "1000000000000000.0");
    }

    #[test]
    fn test_metric_exponent_form() {
        assert_eq!(metric(1e16), "1e+16");
        assert_eq!(metric(2.5e20), "2.5e+20");
        assert_eq!(metric(0.00001), "1e-05");
        assert_eq!(metric(1.5e-7), "1.5e-07");
    }

    #[test]
    fn test_recommendation_wire_format() {
        let rec = Recommendation {
            resource_id: 3,
            resource_name: "worker-3".to_string(),
            kind: RecommendationKind::DownsizeInstance,
            current_config: "x".to_string(),
            recommended_config: "y".to_string(),
            reasoning: "z".to_string(),
            monthly_savings: 35.0,
            confidence: Confidence::Medium,
        };

        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["type"], "downsize_instance");
        assert_eq!(json["confidence"], "Medium");
        assert_eq!(json["monthly_savings"], 35.0);
        assert!(json.get("kind").is_none());
    }
}
