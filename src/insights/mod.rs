//! Insight model and generator
//!
//! Converts detector outputs plus business-specific heuristics into scored
//! `Insight` records, ranked by confidence x severity weight and truncated to
//! the top N.

use crate::context::{BusinessContext, VenueCategory};
use crate::history::DataPoint;
use crate::patterns::{
    AnomalyResult, CorrelationResult, PatternSet, SeasonalityResult, TrendDirection, TrendResult,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Kind of observation an insight captures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    Trend,
    Anomaly,
    Pattern,
    Correlation,
    Forecast,
}

/// How urgent an insight is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Fixed ranking multiplier: critical 4, high 3, medium 2, low 1
    pub fn weight(&self) -> f64 {
        match self {
            Severity::Critical => 4.0,
            Severity::High => 3.0,
            Severity::Medium => 2.0,
            Severity::Low => 1.0,
        }
    }
}

/// Whether the observation helps or hurts the business
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Negative,
    Neutral,
}

/// Numeric context backing an insight
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightData {
    pub current: f64,
    pub baseline: f64,
    pub change: f64,
    pub change_percent: f64,
}

impl InsightData {
    fn zero() -> Self {
        Self {
            current: 0.0,
            baseline: 0.0,
            change: 0.0,
            change_percent: 0.0,
        }
    }
}

/// A single scored observation about a metric
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightType,
    pub severity: Severity,
    pub confidence: f64,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    pub data: InsightData,
    pub timeframe: String,
}

impl Insight {
    /// Composite ranking score
    pub fn score(&self) -> f64 {
        self.confidence * self.severity.weight()
    }
}

/// Build and rank insights for every metric with a detected pattern, plus
/// business-specific insights keyed on the venue category and current period.
pub fn generate_insights(
    grouped: &IndexMap<String, Vec<DataPoint>>,
    patterns: &IndexMap<String, PatternSet>,
    context: &BusinessContext,
    max_insights: usize,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    for (metric, points) in grouped {
        let Some(pattern) = patterns.get(metric) else {
            continue;
        };

        if pattern.trend.significance > 0.5 {
            insights.push(trend_insight(metric, points, &pattern.trend, context));
        }

        for anomaly in &pattern.anomalies {
            insights.push(anomaly_insight(metric, anomaly));
        }

        if pattern.seasonality.strength > 0.3 {
            insights.push(seasonality_insight(metric, &pattern.seasonality));
        }

        for correlation in &pattern.correlations {
            if correlation.coefficient.abs() > 0.6 {
                insights.push(correlation_insight(metric, correlation));
            }
        }
    }

    insights.extend(business_specific_insights(context));

    rank(insights, max_insights)
}

/// Sort descending by composite score and keep the top `max` entries.
fn rank(mut insights: Vec<Insight>, max: usize) -> Vec<Insight> {
    insights.sort_by(|a, b| b.score().total_cmp(&a.score()));
    insights.truncate(max);
    insights
}

fn trend_insight(
    metric: &str,
    points: &[DataPoint],
    trend: &TrendResult,
    context: &BusinessContext,
) -> Insight {
    let current = points.last().map(|p| p.value).unwrap_or(0.0);
    let baseline = context.baseline_for_metric(metric);
    let change = current - baseline;
    let change_percent = change / baseline * 100.0;

    let (direction_label, impact) = match trend.direction {
        TrendDirection::Up => ("rising", Impact::Positive),
        TrendDirection::Down => ("falling", Impact::Negative),
        TrendDirection::Stable => ("stable", Impact::Neutral),
    };

    let severity = if change_percent.abs() > 20.0 {
        Severity::High
    } else {
        Severity::Medium
    };

    let recommendation = match trend.direction {
        TrendDirection::Down => Some(format!("Investigate the decline in {metric}")),
        _ => None,
    };

    Insight {
        kind: InsightType::Trend,
        severity,
        confidence: trend.significance,
        title: format!("{} trend in {metric}", capitalize(direction_label)),
        description: format!(
            "{metric} shows a {direction_label} trend with {change_percent:.1}% variation"
        ),
        impact,
        recommendation,
        data: InsightData {
            current,
            baseline,
            change,
            change_percent,
        },
        timeframe: "last 30 days".to_string(),
    }
}

fn anomaly_insight(metric: &str, _anomaly: &AnomalyResult) -> Insight {
    Insight {
        kind: InsightType::Anomaly,
        severity: Severity::High,
        confidence: 0.8,
        title: format!("Anomaly detected in {metric}"),
        description: "Anomalous value identified".to_string(),
        impact: Impact::Negative,
        recommendation: None,
        data: InsightData::zero(),
        timeframe: "single-point detection".to_string(),
    }
}

fn seasonality_insight(metric: &str, seasonality: &SeasonalityResult) -> Insight {
    Insight {
        kind: InsightType::Pattern,
        severity: Severity::Medium,
        confidence: seasonality.strength,
        title: format!("Seasonal pattern in {metric}"),
        description: format!("{} pattern identified", capitalize(&seasonality.pattern)),
        impact: Impact::Neutral,
        recommendation: None,
        data: InsightData::zero(),
        timeframe: "historical pattern".to_string(),
    }
}

fn correlation_insight(metric: &str, correlation: &CorrelationResult) -> Insight {
    let polarity = if correlation.coefficient > 0.0 {
        "Positive"
    } else {
        "Negative"
    };

    Insight {
        kind: InsightType::Correlation,
        severity: Severity::Medium,
        confidence: correlation.coefficient.abs(),
        title: format!("Correlation between {metric} and {}", correlation.metric),
        description: format!("{polarity} correlation detected"),
        impact: Impact::Neutral,
        recommendation: None,
        data: InsightData::zero(),
        timeframe: "correlation analysis".to_string(),
    }
}

/// Fixed rules keyed on venue category and the current period's flags.
fn business_specific_insights(context: &BusinessContext) -> Vec<Insight> {
    let mut insights = Vec::new();

    if context.venue.category == VenueCategory::Nightclub && context.current_period.is_weekend {
        insights.push(Insight {
            kind: InsightType::Pattern,
            severity: Severity::Medium,
            confidence: 0.8,
            title: "Weekend pattern for nightclub".to_string(),
            description: "Typical nightclub traffic for a weekend".to_string(),
            impact: Impact::Positive,
            recommendation: None,
            data: InsightData::zero(),
            timeframe: "weekend".to_string(),
        });
    }

    insights
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
