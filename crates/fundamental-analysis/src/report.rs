use analysis_core::{Metric, MetricUnit};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::judgment::JudgmentView;

/// A computed ratio together with its judgment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub metric: Metric,
    pub unit: MetricUnit,
    pub value: f64,
    pub judgment: JudgmentView,
}

/// One line of a company report. A metric whose inputs were invalid has no
/// value and no judgment, only the reason it was skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub metric: Metric,
    pub name: &'static str,
    pub unit: MetricUnit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judgment: Option<JudgmentView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioReport {
    pub company_code: String,
    pub fiscal_year: i32,
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<ReportEntry>,
}

impl RatioReport {
    pub fn entry(&self, metric: Metric) -> Option<&ReportEntry> {
        self.entries.iter().find(|e| e.metric == metric)
    }

    /// Number of metrics that produced a judgment
    pub fn judged_count(&self) -> usize {
        self.entries.iter().filter(|e| e.judgment.is_some()).count()
    }
}
