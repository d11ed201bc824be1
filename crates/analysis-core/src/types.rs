use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::AnalysisError;

/// The eleven ratios the engine knows how to compute and judge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    Psr,
    CurrentRatio,
    EquityRatio,
    CapexRatio,
    RevenueGrowth,
    Roe,
    Roa,
    OperatingMargin,
    Per,
    Pbr,
    DividendYield,
}

impl Metric {
    pub const ALL: [Metric; 11] = [
        Metric::Psr,
        Metric::CurrentRatio,
        Metric::EquityRatio,
        Metric::CapexRatio,
        Metric::RevenueGrowth,
        Metric::Roe,
        Metric::Roa,
        Metric::OperatingMargin,
        Metric::Per,
        Metric::Pbr,
        Metric::DividendYield,
    ];

    /// Stable key used in URLs and JSON
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Psr => "psr",
            Metric::CurrentRatio => "current-ratio",
            Metric::EquityRatio => "equity-ratio",
            Metric::CapexRatio => "capex-ratio",
            Metric::RevenueGrowth => "revenue-growth",
            Metric::Roe => "roe",
            Metric::Roa => "roa",
            Metric::OperatingMargin => "operating-margin",
            Metric::Per => "per",
            Metric::Pbr => "pbr",
            Metric::DividendYield => "dividend-yield",
        }
    }

    /// Human-readable label for the metric
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Psr => "Price-to-Sales Ratio",
            Metric::CurrentRatio => "Current Ratio",
            Metric::EquityRatio => "Equity Ratio",
            Metric::CapexRatio => "CapEx Ratio",
            Metric::RevenueGrowth => "Revenue Growth",
            Metric::Roe => "Return on Equity",
            Metric::Roa => "Return on Assets",
            Metric::OperatingMargin => "Operating Margin",
            Metric::Per => "Price-to-Earnings Ratio",
            Metric::Pbr => "Price-to-Book Ratio",
            Metric::DividendYield => "Dividend Yield",
        }
    }

    pub fn unit(&self) -> MetricUnit {
        match self {
            Metric::Psr | Metric::CapexRatio | Metric::Per | Metric::Pbr => MetricUnit::Multiple,
            _ => MetricUnit::Percent,
        }
    }

    /// Names of the (value, base) operands, base being the one that must stay positive
    pub fn operand_names(&self) -> (&'static str, &'static str) {
        match self {
            Metric::Psr => ("market_cap", "revenue"),
            Metric::CurrentRatio => ("current_assets", "current_liabilities"),
            Metric::EquityRatio => ("equity", "total_assets"),
            Metric::CapexRatio => ("capex", "depreciation"),
            Metric::RevenueGrowth => ("current_revenue", "past_revenue"),
            Metric::Roe => ("net_income", "equity"),
            Metric::Roa => ("net_income", "total_assets"),
            Metric::OperatingMargin => ("operating_income", "revenue"),
            Metric::Per => ("market_cap", "net_income"),
            Metric::Pbr => ("market_cap", "equity"),
            Metric::DividendYield => ("annual_dividend", "stock_price"),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Metric {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Metric::ALL
            .iter()
            .copied()
            .find(|m| m.key() == normalized)
            .ok_or_else(|| AnalysisError::UnknownMetric(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricUnit {
    /// Plain multiple, e.g. PER 12.5x
    Multiple,
    /// Already scaled by 100
    Percent,
}

/// Company figures as reported in filings.
///
/// Flow and balance-sheet amounts are in millions of the reporting currency;
/// `stock_price` and `annual_dividend` are per share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialFigures {
    pub company_code: String,
    pub fiscal_year: i32,
    pub fetched_at: DateTime<Utc>,
    pub market_cap: f64,
    pub revenue: f64,
    pub past_revenue: f64,
    pub operating_income: f64,
    pub net_income: f64,
    pub equity: f64,
    pub total_assets: f64,
    pub current_assets: f64,
    pub current_liabilities: f64,
    pub capex: f64,
    pub depreciation: f64,
    pub stock_price: f64,
    pub annual_dividend: f64,
}

impl FinancialFigures {
    /// The (value, base) pair a metric consumes, in the order of `Metric::operand_names`
    pub fn operands(&self, metric: Metric) -> (f64, f64) {
        match metric {
            Metric::Psr => (self.market_cap, self.revenue),
            Metric::CurrentRatio => (self.current_assets, self.current_liabilities),
            Metric::EquityRatio => (self.equity, self.total_assets),
            Metric::CapexRatio => (self.capex, self.depreciation),
            Metric::RevenueGrowth => (self.revenue, self.past_revenue),
            Metric::Roe => (self.net_income, self.equity),
            Metric::Roa => (self.net_income, self.total_assets),
            Metric::OperatingMargin => (self.operating_income, self.revenue),
            Metric::Per => (self.market_cap, self.net_income),
            Metric::Pbr => (self.market_cap, self.equity),
            Metric::DividendYield => (self.annual_dividend, self.stock_price),
        }
    }
}
