//! Ratio engine: pure calculation and judgment of financial ratios.
//!
//! `ratios` turns two operands into a ratio (or an `InvalidPrecondition`
//! error), `judgment` maps a ratio onto its family's bands, and
//! `RatioEngine` ties the two together for a full set of company figures.

pub mod judgment;
pub mod ratios;
pub mod report;

pub use judgment::*;
pub use ratios::*;
pub use report::{Evaluation, RatioReport, ReportEntry};

use analysis_core::{AnalysisError, FinancialFigures, Metric};
use chrono::Utc;

pub struct RatioEngine;

impl RatioEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute one metric and classify it
    pub fn evaluate(
        &self,
        metric: Metric,
        value: f64,
        base: f64,
    ) -> Result<Evaluation, AnalysisError> {
        let ratio = compute(metric, value, base)?;
        Ok(Evaluation {
            metric,
            unit: metric.unit(),
            value: ratio,
            judgment: judge(metric, ratio),
        })
    }

    /// Evaluate every metric for a company. Failed metrics are kept in the
    /// report without a judgment.
    pub fn report(&self, figures: &FinancialFigures) -> RatioReport {
        let entries = Metric::ALL
            .iter()
            .map(|&metric| {
                let (value, base) = figures.operands(metric);
                match self.evaluate(metric, value, base) {
                    Ok(evaluation) => ReportEntry {
                        metric,
                        name: metric.name(),
                        unit: evaluation.unit,
                        value: Some(evaluation.value),
                        judgment: Some(evaluation.judgment),
                        error: None,
                    },
                    Err(e) => {
                        tracing::debug!(
                            company = %figures.company_code,
                            metric = %metric,
                            "Omitting judgment: {}",
                            e
                        );
                        ReportEntry {
                            metric,
                            name: metric.name(),
                            unit: metric.unit(),
                            value: None,
                            judgment: None,
                            error: Some(e.to_string()),
                        }
                    }
                }
            })
            .collect();

        RatioReport {
            company_code: figures.company_code.clone(),
            fiscal_year: figures.fiscal_year,
            generated_at: Utc::now(),
            entries,
        }
    }
}

impl Default for RatioEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn figures() -> FinancialFigures {
        FinancialFigures {
            company_code: "7203".to_string(),
            fiscal_year: 2024,
            fetched_at: Utc::now(),
            market_cap: 500_000.0,
            revenue: 100_000.0,
            past_revenue: 80_000.0,
            operating_income: 15_000.0,
            net_income: 10_000.0,
            equity: 200_000.0,
            total_assets: 400_000.0,
            current_assets: 150_000.0,
            current_liabilities: 50_000.0,
            capex: 12_000.0,
            depreciation: 10_000.0,
            stock_price: 2_500.0,
            annual_dividend: 100.0,
        }
    }

    #[test]
    fn test_evaluate() {
        let engine = RatioEngine::new();
        let eval = engine.evaluate(Metric::Per, 500_000.0, 10_000.0).unwrap();
        assert_eq!(eval.value, 50.0);
        assert_eq!(eval.judgment.level, "very-overvalued");
    }

    #[test]
    fn test_evaluate_propagates_precondition() {
        let engine = RatioEngine::new();
        let err = engine.evaluate(Metric::Psr, 500_000.0, 0.0).unwrap_err();
        assert!(err.is_invalid_precondition());
    }

    #[test]
    fn test_full_report() {
        let report = RatioEngine::new().report(&figures());
        assert_eq!(report.entries.len(), Metric::ALL.len());
        assert_eq!(report.judged_count(), 11);
        assert_eq!(report.company_code, "7203");

        let psr = report.entry(Metric::Psr).unwrap();
        assert_eq!(psr.value, Some(5.0));
        assert_eq!(psr.judgment.unwrap().level, "very-high");

        let growth = report.entry(Metric::RevenueGrowth).unwrap();
        assert_eq!(growth.judgment.unwrap().level, "moderate");

        let margin = report.entry(Metric::OperatingMargin).unwrap();
        assert_eq!(margin.judgment.unwrap().level, "good");
    }

    #[test]
    fn test_report_omits_judgment_for_loss_maker() {
        let mut f = figures();
        f.net_income = -2_000.0;
        let report = RatioEngine::new().report(&f);

        let per = report.entry(Metric::Per).unwrap();
        assert!(per.value.is_none());
        assert!(per.judgment.is_none());
        assert!(per.error.as_deref().unwrap().contains("net_income"));

        // negative income is still a valid ROE
        let roe = report.entry(Metric::Roe).unwrap();
        assert_eq!(roe.judgment.unwrap().level, "poor");
        assert_eq!(report.judged_count(), 10);
    }

    #[test]
    fn test_report_serialization_skips_missing_fields() {
        let mut f = figures();
        f.stock_price = 0.0;
        let report = RatioEngine::new().report(&f);
        let json = serde_json::to_value(&report).unwrap();
        let entries = json["entries"].as_array().unwrap();
        let dividend = entries
            .iter()
            .find(|e| e["metric"] == "dividend-yield")
            .unwrap();
        assert!(dividend.get("judgment").is_none());
        assert!(dividend.get("error").is_some());
    }
}
