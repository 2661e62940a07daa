//! Analysis orchestrator
//!
//! `ContextAnalyzer` is the engine's single public entry point: set the
//! business context once, stream data points in, then call
//! `analyze_with_context` to get one immutable `ContextualAnalysis` back.

use crate::config::AnalyzerConfig;
use crate::context::BusinessContext;
use crate::errors::{AnalysisError, AnalysisResult};
use crate::history::{group_by_metric, DataPoint, MetricHistoryStore, TimeRange};
use crate::insights::{generate_insights, Impact, Insight, Severity};
use crate::kpi::{calculate_kpis, KpiBlock};
use crate::patterns::detect_patterns;
use crate::recommendations::{
    identify_opportunities, identify_risk_factors, synthesize, Recommendations,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// The engine's sole output: ranked insights, a narrative summary, the KPI
/// block, tiered recommendations, and risk/opportunity summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextualAnalysis {
    pub insights: Vec<Insight>,
    pub summary: String,
    pub kpis: KpiBlock,
    pub recommendations: Recommendations,
    pub risk_factors: Vec<String>,
    pub opportunities: Vec<String>,
}

/// Contextual business analytics engine.
///
/// Holds the process-wide mutable state (active context + rolling metric
/// history) behind read/write locks: appends and context swaps serialize
/// against each other, while analyses run under read locks and never observe
/// a partially sorted history.
#[derive(Debug)]
pub struct ContextAnalyzer {
    config: AnalyzerConfig,
    context: RwLock<Option<BusinessContext>>,
    history: MetricHistoryStore,
}

impl ContextAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        let history = MetricHistoryStore::new(config.retention_days);
        Self {
            config,
            context: RwLock::new(None),
            history,
        }
    }

    /// Replace the active business context wholesale.
    pub fn set_business_context(&self, context: BusinessContext) {
        info!(venue = %context.venue.name, "business context configured");
        *self.context.write() = Some(context);
    }

    /// Append a batch of data points to the rolling history. Returns the
    /// number of points accepted after validation.
    pub fn add_data_points(&self, points: Vec<DataPoint>) -> usize {
        self.history.append(points)
    }

    /// Number of points currently retained in the history.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Run the full analysis pipeline over the filtered history.
    ///
    /// The `query` string is part of the public contract but does not alter
    /// the computation today; it is recorded in the debug log only.
    pub fn analyze_with_context(
        &self,
        query: &str,
        metrics: &[String],
        time_range: Option<TimeRange>,
    ) -> AnalysisResult<ContextualAnalysis> {
        let context = {
            let guard = self.context.read();
            guard.as_ref().cloned().ok_or(AnalysisError::ContextMissing)?
        };

        debug!(query, metrics = ?metrics, "starting contextual analysis");

        let relevant = self.history.query(metrics, time_range.as_ref());
        let grouped = group_by_metric(relevant);

        let patterns = detect_patterns(&grouped);
        let insights = generate_insights(&grouped, &patterns, &context, self.config.max_insights);
        let kpis = calculate_kpis(&grouped, &context);
        let recommendations = synthesize(
            &insights,
            &kpis,
            &context,
            self.config.max_recommendations,
        );
        let risk_factors =
            identify_risk_factors(&insights, &context, self.config.max_risk_factors);
        let opportunities =
            identify_opportunities(&insights, &context, self.config.max_opportunities);
        let summary = build_summary(&insights, &kpis, &context);

        info!(
            insights = insights.len(),
            performance = kpis.performance.as_str(),
            trend = kpis.trend.as_str(),
            "analysis complete"
        );

        Ok(ContextualAnalysis {
            insights,
            summary,
            kpis,
            recommendations,
            risk_factors,
            opportunities,
        })
    }
}

impl Default for ContextAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

/// One-paragraph narrative: venue, KPI tier and direction, critical and
/// positive insight counts, then the predicted outcome, in that fixed order.
fn build_summary(insights: &[Insight], kpis: &KpiBlock, context: &BusinessContext) -> String {
    let critical_count = insights
        .iter()
        .filter(|i| i.severity == Severity::Critical)
        .count();
    let positive_count = insights
        .iter()
        .filter(|i| i.impact == Impact::Positive)
        .count();

    let mut summary = format!(
        "Analysis for {}: Performance {} with {} trend. ",
        context.venue.name,
        kpis.performance.as_str(),
        kpis.trend.as_str()
    );

    if critical_count > 0 {
        summary.push_str(&format!("{critical_count} critical points identified. "));
    }

    if positive_count > 0 {
        summary.push_str(&format!(
            "{positive_count} improvement opportunities detected. "
        ));
    }

    summary.push_str(&kpis.predicted_outcome);
    summary
}
