//! Pattern detectors
//!
//! Four independent detectors over one metric's chronologically ordered point
//! series: trend, seasonality, anomaly, and cross-metric correlation. Each is
//! a pure function; `detect_patterns` rebuilds the per-metric result map on
//! every analysis call.
//!
//! Seasonality, anomaly, and correlation are currently fixed heuristic stubs.
//! They sit behind their own named functions so a real statistical model can
//! replace any of them without touching the insight generator's contract.

use crate::history::DataPoint;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Trend direction over the filtered window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

/// First-to-last trend over a metric's window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendResult {
    pub direction: TrendDirection,
    pub significance: f64,
}

/// Seasonal signature of a metric
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalityResult {
    pub strength: f64,
    pub pattern: String,
}

/// A single anomalous observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyResult {
    pub point: DataPoint,
    pub severity: f64,
}

/// Relationship between this metric and another
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub metric: String,
    pub coefficient: f64,
}

/// All detector outputs for one metric
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSet {
    pub trend: TrendResult,
    pub seasonality: SeasonalityResult,
    pub anomalies: Vec<AnomalyResult>,
    pub correlations: Vec<CorrelationResult>,
}

/// Compare the last point's value against the first: a relative change with
/// magnitude above 0.05 is a trend, anything smaller is stable.
pub fn detect_trend(points: &[DataPoint]) -> TrendResult {
    if points.len() < 2 {
        return TrendResult {
            direction: TrendDirection::Stable,
            significance: 0.0,
        };
    }

    let first = points[0].value;
    let last = points[points.len() - 1].value;
    let change = (last - first) / first;

    let direction = if change > 0.05 {
        TrendDirection::Up
    } else if change < -0.05 {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    };

    TrendResult {
        direction,
        significance: change.abs(),
    }
}

/// Simplified seasonality heuristic. Placeholder pending a real seasonal
/// decomposition; always reports a moderate weekly pattern.
pub fn detect_seasonality(_points: &[DataPoint]) -> SeasonalityResult {
    SeasonalityResult {
        strength: 0.5,
        pattern: "weekly".to_string(),
    }
}

/// Simplified anomaly detection. Placeholder pending a real outlier model;
/// currently reports no anomalies.
pub fn detect_anomalies(_points: &[DataPoint]) -> Vec<AnomalyResult> {
    Vec::new()
}

/// Simplified cross-metric correlation. Placeholder pending a real
/// correlation model; currently reports no correlations.
pub fn detect_correlations(
    _metric: &str,
    _grouped: &IndexMap<String, Vec<DataPoint>>,
) -> Vec<CorrelationResult> {
    Vec::new()
}

/// Run all detectors for every metric in the grouped window.
pub fn detect_patterns(
    grouped: &IndexMap<String, Vec<DataPoint>>,
) -> IndexMap<String, PatternSet> {
    let mut patterns = IndexMap::new();
    for (metric, points) in grouped {
        patterns.insert(
            metric.clone(),
            PatternSet {
                trend: detect_trend(points),
                seasonality: detect_seasonality(points),
                anomalies: detect_anomalies(points),
                correlations: detect_correlations(metric, grouped),
            },
        );
    }
    patterns
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn series(values: &[f64]) -> Vec<DataPoint> {
        let base = Utc::now() - Duration::days(values.len() as i64);
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| DataPoint {
                timestamp: base + Duration::days(i as i64),
                metric: "sales".to_string(),
                value,
                category: "operations".to_string(),
                metadata: None,
            })
            .collect()
    }

    #[test]
    fn test_upward_trend_detection() {
        let trend = detect_trend(&series(&[100.0, 130.0]));
        assert_eq!(trend.direction, TrendDirection::Up);
        assert!((trend.significance - 0.30).abs() < 1e-9);
    }

    #[test]
    fn test_downward_trend_detection() {
        let trend = detect_trend(&series(&[100.0, 80.0]));
        assert_eq!(trend.direction, TrendDirection::Down);
        assert!((trend.significance - 0.20).abs() < 1e-9);
    }

    #[test]
    fn test_stable_trend_boundary() {
        // |delta| = 0.04 < 0.05, so this is stable
        let trend = detect_trend(&series(&[100.0, 104.0]));
        assert_eq!(trend.direction, TrendDirection::Stable);
        assert!((trend.significance - 0.04).abs() < 1e-9);
    }

    #[test]
    fn test_trend_with_insufficient_points() {
        let trend = detect_trend(&series(&[100.0]));
        assert_eq!(trend.direction, TrendDirection::Stable);
        assert_eq!(trend.significance, 0.0);
    }

    #[test]
    fn test_seasonality_stub_is_constant() {
        let seasonality = detect_seasonality(&series(&[1.0, 2.0, 3.0]));
        assert_eq!(seasonality.strength, 0.5);
        assert_eq!(seasonality.pattern, "weekly");
    }

    #[test]
    fn test_anomaly_and_correlation_stubs_are_empty() {
        let points = series(&[1.0, 200.0, 1.0]);
        assert!(detect_anomalies(&points).is_empty());

        let mut grouped = IndexMap::new();
        grouped.insert("sales".to_string(), points);
        assert!(detect_correlations("sales", &grouped).is_empty());
    }

    #[test]
    fn test_detect_patterns_covers_every_metric() {
        let mut grouped = IndexMap::new();
        grouped.insert("sales".to_string(), series(&[100.0, 160.0]));
        grouped.insert("customers".to_string(), series(&[40.0, 41.0]));

        let patterns = detect_patterns(&grouped);
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns["sales"].trend.direction, TrendDirection::Up);
        assert_eq!(patterns["customers"].trend.direction, TrendDirection::Stable);
    }
}
