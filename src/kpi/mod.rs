//! KPI calculator
//!
//! Aggregates per-metric performance ratios (latest value vs. context
//! baseline) and week-over-week trend deltas into three scalar judgments:
//! a performance tier, a trend direction, and a predicted-outcome string.

use crate::context::BusinessContext;
use crate::history::DataPoint;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Coarse performance grade derived from averaged performance ratios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    Excellent,
    Good,
    Average,
    Poor,
    Critical,
}

impl PerformanceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceTier::Excellent => "excellent",
            PerformanceTier::Good => "good",
            PerformanceTier::Average => "average",
            PerformanceTier::Poor => "poor",
            PerformanceTier::Critical => "critical",
        }
    }
}

/// Week-over-week movement of the averaged metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Improving => "improving",
            TrendDirection::Stable => "stable",
            TrendDirection::Declining => "declining",
        }
    }
}

/// The three KPI judgments for one analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiBlock {
    pub performance: PerformanceTier,
    pub trend: TrendDirection,
    pub predicted_outcome: String,
}

/// Compute the KPI block from the grouped, filtered window. Metrics with
/// fewer than 2 points or a non-positive baseline do not contribute.
pub fn calculate_kpis(
    grouped: &IndexMap<String, Vec<DataPoint>>,
    context: &BusinessContext,
) -> KpiBlock {
    let mut performance_score = 0.0;
    let mut trend_score = 0.0;
    let mut qualifying_metrics = 0;

    for (metric, points) in grouped {
        if points.len() < 2 {
            continue;
        }

        let latest = points[points.len() - 1].value;
        let baseline = context.baseline_for_metric(metric);
        if baseline <= 0.0 {
            continue;
        }

        performance_score += latest / baseline;
        qualifying_metrics += 1;

        // Last 7 points vs. the 7 before them
        let recent_avg = average(tail(points, 7));
        let previous_avg = average(prior_window(points));
        if previous_avg > 0.0 {
            trend_score += (recent_avg - previous_avg) / previous_avg;
        }
    }

    let (avg_performance, avg_trend) = if qualifying_metrics > 0 {
        let n = qualifying_metrics as f64;
        (performance_score / n, trend_score / n)
    } else {
        (1.0, 0.0)
    };

    KpiBlock {
        performance: tier_for(avg_performance),
        trend: direction_for(avg_trend),
        predicted_outcome: predict(avg_trend).to_string(),
    }
}

fn tail(points: &[DataPoint], n: usize) -> &[DataPoint] {
    &points[points.len().saturating_sub(n)..]
}

/// Points [len-14, len-7), clamped at the start for short series.
fn prior_window(points: &[DataPoint]) -> &[DataPoint] {
    let end = points.len().saturating_sub(7);
    let start = points.len().saturating_sub(14);
    &points[start..end]
}

fn average(points: &[DataPoint]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    points.iter().map(|p| p.value).sum::<f64>() / points.len() as f64
}

fn tier_for(avg_performance: f64) -> PerformanceTier {
    if avg_performance >= 1.2 {
        PerformanceTier::Excellent
    } else if avg_performance >= 1.1 {
        PerformanceTier::Good
    } else if avg_performance >= 0.9 {
        PerformanceTier::Average
    } else if avg_performance >= 0.7 {
        PerformanceTier::Poor
    } else {
        PerformanceTier::Critical
    }
}

fn direction_for(avg_trend: f64) -> TrendDirection {
    if avg_trend > 0.05 {
        TrendDirection::Improving
    } else if avg_trend > -0.05 {
        TrendDirection::Stable
    } else {
        TrendDirection::Declining
    }
}

fn predict(avg_trend: f64) -> &'static str {
    if avg_trend > 0.1 {
        "Optimistic projection for the next period"
    } else if avg_trend < -0.1 {
        "Attention needed to reverse the negative trend"
    } else {
        "Stability expected for the next period"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{
        CurrentPeriod, HistoricalBaseline, PeakHours, Season, VenueCategory, VenueProfile,
    };
    use chrono::{Duration, NaiveDate, Utc};
    use std::collections::HashMap;

    fn context_with_sales_baseline(baseline: f64) -> BusinessContext {
        BusinessContext {
            venue: VenueProfile {
                id: "venue-1".to_string(),
                name: "Dockside".to_string(),
                category: VenueCategory::Pub,
                location: "Faro".to_string(),
                capacity: 80,
                opening_days: vec!["friday".to_string()],
                peak_hours: PeakHours {
                    start: "18:00".to_string(),
                    end: "23:00".to_string(),
                },
            },
            current_period: CurrentPeriod {
                date: NaiveDate::from_ymd_opt(2025, 3, 3).expect("valid date"),
                day_of_week: "monday".to_string(),
                is_weekend: false,
                is_holiday: false,
                season: Season::Spring,
                is_event_day: false,
            },
            historical_baseline: HistoricalBaseline {
                average_daily_sales: baseline,
                average_customer_count: 0.0,
                average_ticket: 0.0,
                seasonality_factors: HashMap::new(),
                event_impact_factors: HashMap::new(),
            },
        }
    }

    fn series(metric: &str, values: &[f64]) -> Vec<DataPoint> {
        let base = Utc::now() - Duration::days(values.len() as i64);
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| DataPoint {
                timestamp: base + Duration::days(i as i64),
                metric: metric.to_string(),
                value,
                category: "operations".to_string(),
                metadata: None,
            })
            .collect()
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(tier_for(1.2), PerformanceTier::Excellent);
        assert_eq!(tier_for(1.10), PerformanceTier::Good);
        assert_eq!(tier_for(1.09999), PerformanceTier::Average);
        assert_eq!(tier_for(0.9), PerformanceTier::Average);
        assert_eq!(tier_for(0.7), PerformanceTier::Poor);
        assert_eq!(tier_for(0.69), PerformanceTier::Critical);
    }

    #[test]
    fn test_direction_boundaries() {
        assert_eq!(direction_for(0.06), TrendDirection::Improving);
        assert_eq!(direction_for(0.0), TrendDirection::Stable);
        assert_eq!(direction_for(-0.05), TrendDirection::Stable);
        assert_eq!(direction_for(-0.051), TrendDirection::Declining);
    }

    #[test]
    fn test_prediction_templates() {
        assert_eq!(predict(0.2), "Optimistic projection for the next period");
        assert_eq!(
            predict(-0.2),
            "Attention needed to reverse the negative trend"
        );
        assert_eq!(predict(0.0), "Stability expected for the next period");
    }

    #[test]
    fn test_performance_ratio_against_baseline() {
        let ctx = context_with_sales_baseline(100.0);
        let mut grouped = IndexMap::new();
        // latest 110 / baseline 100 = 1.1 exactly => good
        grouped.insert("sales".to_string(), series("sales", &[100.0, 110.0]));

        let kpis = calculate_kpis(&grouped, &ctx);
        assert_eq!(kpis.performance, PerformanceTier::Good);
    }

    #[test]
    fn test_metrics_without_baseline_do_not_count() {
        // customers baseline is 0, so only it being present leaves defaults
        let ctx = context_with_sales_baseline(100.0);
        let mut grouped = IndexMap::new();
        grouped.insert("customers".to_string(), series("customers", &[10.0, 20.0]));

        let kpis = calculate_kpis(&grouped, &ctx);
        assert_eq!(kpis.performance, PerformanceTier::Average); // default 1.0
        assert_eq!(kpis.trend, TrendDirection::Stable);
    }

    #[test]
    fn test_single_point_metrics_are_skipped() {
        let ctx = context_with_sales_baseline(100.0);
        let mut grouped = IndexMap::new();
        grouped.insert("sales".to_string(), series("sales", &[500.0]));

        let kpis = calculate_kpis(&grouped, &ctx);
        assert_eq!(kpis.performance, PerformanceTier::Average);
    }

    #[test]
    fn test_week_over_week_trend_detection() {
        let ctx = context_with_sales_baseline(100.0);
        // 7 flat days then 7 much stronger days: trend delta = 0.5
        let mut values = vec![100.0; 7];
        values.extend(vec![150.0; 7]);
        let mut grouped = IndexMap::new();
        grouped.insert("sales".to_string(), series("sales", &values));

        let kpis = calculate_kpis(&grouped, &ctx);
        assert_eq!(kpis.trend, TrendDirection::Improving);
        assert_eq!(
            kpis.predicted_outcome,
            "Optimistic projection for the next period"
        );
    }

    #[test]
    fn test_prior_window_clamps_on_short_series() {
        let points = series("sales", &[1.0, 2.0, 3.0, 4.0, 5.0]);
        // len 5 <= 7, so the prior window is empty
        assert!(prior_window(&points).is_empty());

        let values: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let points = series("sales", &values);
        assert_eq!(prior_window(&points).len(), 3);
    }
}
