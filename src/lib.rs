// VenuePulse - Contextual Business Analytics Engine
// Ingests time-stamped operational metrics (sales, customer counts, ticket size),
// keeps a bounded rolling history, detects per-metric patterns, and turns them
// into ranked insights, KPIs, and tiered recommendations for venue operators.

#![deny(clippy::unwrap_used)]

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod context;
pub mod errors;
pub mod history;
pub mod insights;
pub mod kpi;
pub mod patterns;
pub mod recommendations;

// Re-export commonly used items
pub use analyzer::{ContextAnalyzer, ContextualAnalysis};
pub use config::AnalyzerConfig;
pub use context::{BusinessContext, Season, VenueCategory};
pub use errors::{AnalysisError, AnalysisResult};
pub use history::{DataPoint, MetricHistoryStore, TimeRange};
pub use insights::{Impact, Insight, InsightType, Severity};
pub use kpi::{KpiBlock, PerformanceTier, TrendDirection};
pub use recommendations::Recommendations;
