//! Metric history store
//!
//! Append-only, time-ordered collection of data points with a fixed retention
//! window. All mutation goes through `append`, which re-sorts and prunes under
//! a write lock so readers never see a partially sorted sequence.

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A single observed metric value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPoint {
    pub timestamp: DateTime<Utc>,
    pub metric: String,
    pub value: f64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl DataPoint {
    /// Points with no metric name or a non-finite value are skipped on append.
    fn is_valid(&self) -> bool {
        !self.metric.is_empty() && self.value.is_finite()
    }
}

/// Inclusive [start, end] timestamp filter
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts <= self.end
    }
}

/// Rolling history of data points, sorted ascending by timestamp and pruned
/// to the retention window on every append.
#[derive(Debug)]
pub struct MetricHistoryStore {
    points: RwLock<Vec<DataPoint>>,
    retention_days: i64,
}

impl MetricHistoryStore {
    pub fn new(retention_days: i64) -> Self {
        Self {
            points: RwLock::new(Vec::new()),
            retention_days,
        }
    }

    /// Insert a batch of points. Invalid points (empty metric name or
    /// non-finite value) are skipped with a warning rather than failing the
    /// batch. Returns the number of points accepted.
    pub fn append(&self, batch: Vec<DataPoint>) -> usize {
        let batch_size = batch.len();
        let mut accepted = 0;

        let mut points = self.points.write();
        for point in batch {
            if !point.is_valid() {
                warn!(
                    metric = %point.metric,
                    value = point.value,
                    "skipping malformed data point"
                );
                continue;
            }
            points.push(point);
            accepted += 1;
        }

        // Keep the sequence time-sorted, then enforce the retention window.
        points.sort_by_key(|p| p.timestamp);
        let cutoff = Utc::now() - Duration::days(self.retention_days);
        points.retain(|p| p.timestamp >= cutoff);

        info!(
            accepted,
            batch_size,
            total = points.len(),
            "data points appended"
        );
        accepted
    }

    /// Return the points matching an optional metric allow-list (empty means
    /// all metrics) and an optional inclusive time range. Read-only.
    pub fn query(&self, metrics: &[String], time_range: Option<&TimeRange>) -> Vec<DataPoint> {
        let points = self.points.read();
        points
            .iter()
            .filter(|p| match time_range {
                Some(range) => range.contains(p.timestamp),
                None => true,
            })
            .filter(|p| metrics.is_empty() || metrics.iter().any(|m| m == &p.metric))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.points.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.read().is_empty()
    }
}

/// Group a time-sorted point list by metric name, preserving first-seen
/// metric order and chronological order within each metric.
pub fn group_by_metric(points: Vec<DataPoint>) -> IndexMap<String, Vec<DataPoint>> {
    let mut grouped: IndexMap<String, Vec<DataPoint>> = IndexMap::new();
    for point in points {
        grouped.entry(point.metric.clone()).or_default().push(point);
    }
    grouped
}
