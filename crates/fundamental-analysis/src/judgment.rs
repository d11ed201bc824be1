//! Qualitative judgments for each ratio.
//!
//! Each metric family has its own level enum so a threshold table can only
//! ever produce levels that belong to it. Tables are ordered from the most
//! favorable band to the least favorable; the first matching band wins and
//! anything left over lands in the fallback band.

use analysis_core::Metric;
use serde::Serialize;

/// A level enum that can be reduced to a stable string tag
pub trait Level: Copy + std::fmt::Debug + 'static {
    fn tag(&self) -> &'static str;
}

/// PSR bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValuationLevel {
    Undervalued,
    Fair,
    High,
    VeryHigh,
}

/// Price multiples and dividend yield bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingLevel {
    Undervalued,
    Fair,
    Overvalued,
    VeryOvervalued,
}

/// Liquidity and solvency bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SafetyLevel {
    Excellent,
    Good,
    Fair,
    Warning,
}

/// Investment and growth bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MomentumLevel {
    Strong,
    Moderate,
    Stable,
    Declining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfitabilityLevel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Level for ValuationLevel {
    fn tag(&self) -> &'static str {
        match self {
            ValuationLevel::Undervalued => "undervalued",
            ValuationLevel::Fair => "fair",
            ValuationLevel::High => "high",
            ValuationLevel::VeryHigh => "very-high",
        }
    }
}

impl Level for PricingLevel {
    fn tag(&self) -> &'static str {
        match self {
            PricingLevel::Undervalued => "undervalued",
            PricingLevel::Fair => "fair",
            PricingLevel::Overvalued => "overvalued",
            PricingLevel::VeryOvervalued => "very-overvalued",
        }
    }
}

impl Level for SafetyLevel {
    fn tag(&self) -> &'static str {
        match self {
            SafetyLevel::Excellent => "excellent",
            SafetyLevel::Good => "good",
            SafetyLevel::Fair => "fair",
            SafetyLevel::Warning => "warning",
        }
    }
}

impl Level for MomentumLevel {
    fn tag(&self) -> &'static str {
        match self {
            MomentumLevel::Strong => "strong",
            MomentumLevel::Moderate => "moderate",
            MomentumLevel::Stable => "stable",
            MomentumLevel::Declining => "declining",
        }
    }
}

impl Level for ProfitabilityLevel {
    fn tag(&self) -> &'static str {
        match self {
            ProfitabilityLevel::Excellent => "excellent",
            ProfitabilityLevel::Good => "good",
            ProfitabilityLevel::Fair => "fair",
            ProfitabilityLevel::Poor => "poor",
        }
    }
}

/// Classification of one ratio value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Judgment<L> {
    pub level: L,
    /// Usually the level tag; dividend yield uses its own wording
    pub label: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

impl<L: Level> Judgment<L> {
    pub fn view(&self) -> JudgmentView {
        JudgmentView {
            level: self.level.tag(),
            label: self.label,
            title: self.title,
            description: self.description,
        }
    }
}

/// Family-independent form of a judgment, for reports and the HTTP layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JudgmentView {
    pub level: &'static str,
    pub label: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cutoff {
    /// value >= bound
    AtLeast(f64),
    /// value < bound
    Below(f64),
}

impl Cutoff {
    pub fn matches(&self, value: f64) -> bool {
        match *self {
            Cutoff::AtLeast(bound) => value >= bound,
            Cutoff::Below(bound) => value < bound,
        }
    }
}

#[derive(Debug)]
pub struct ThresholdTable<L: 'static> {
    pub bands: &'static [(Cutoff, Judgment<L>)],
    pub fallback: Judgment<L>,
}

impl<L: Level> ThresholdTable<L> {
    pub fn classify(&self, value: f64) -> Judgment<L> {
        self.bands
            .iter()
            .find(|(cutoff, _)| cutoff.matches(value))
            .map(|(_, judgment)| *judgment)
            .unwrap_or(self.fallback)
    }
}

const fn judgment<L>(
    level: L,
    label: &'static str,
    title: &'static str,
    description: &'static str,
) -> Judgment<L> {
    Judgment {
        level,
        label,
        title,
        description,
    }
}

#[rustfmt::skip]
pub const PSR_TABLE: ThresholdTable<ValuationLevel> = ThresholdTable {
    bands: &[
        (Cutoff::Below(1.0), judgment(ValuationLevel::Undervalued, "undervalued", "Undervalued",
            "The market values the company below one year of sales.")),
        (Cutoff::Below(2.0), judgment(ValuationLevel::Fair, "fair", "Fair",
            "Market cap sits between one and two years of sales, a typical level.")),
        (Cutoff::Below(5.0), judgment(ValuationLevel::High, "high", "High",
            "The price already assumes strong future sales growth.")),
    ],
    fallback: judgment(ValuationLevel::VeryHigh, "very-high", "Very high",
        "Market cap is five or more years of sales; expectations are very demanding."),
};

#[rustfmt::skip]
pub const CURRENT_RATIO_TABLE: ThresholdTable<SafetyLevel> = ThresholdTable {
    bands: &[
        (Cutoff::AtLeast(200.0), judgment(SafetyLevel::Excellent, "excellent", "Excellent",
            "Current assets cover short-term liabilities at least twice over.")),
        (Cutoff::AtLeast(150.0), judgment(SafetyLevel::Good, "good", "Good",
            "Short-term obligations are comfortably covered.")),
        (Cutoff::AtLeast(100.0), judgment(SafetyLevel::Fair, "fair", "Fair",
            "Current assets just cover short-term liabilities.")),
    ],
    fallback: judgment(SafetyLevel::Warning, "warning", "Warning",
        "Short-term liabilities exceed current assets; watch liquidity closely."),
};

#[rustfmt::skip]
pub const EQUITY_RATIO_TABLE: ThresholdTable<SafetyLevel> = ThresholdTable {
    bands: &[
        (Cutoff::AtLeast(50.0), judgment(SafetyLevel::Excellent, "excellent", "Excellent",
            "At least half of total assets are financed by equity.")),
        (Cutoff::AtLeast(40.0), judgment(SafetyLevel::Good, "good", "Good",
            "The balance sheet is solidly capitalized.")),
        (Cutoff::AtLeast(20.0), judgment(SafetyLevel::Fair, "fair", "Fair",
            "Leverage is noticeable but within a common range.")),
    ],
    fallback: judgment(SafetyLevel::Warning, "warning", "Warning",
        "The company relies heavily on debt financing."),
};

#[rustfmt::skip]
pub const CAPEX_RATIO_TABLE: ThresholdTable<MomentumLevel> = ThresholdTable {
    bands: &[
        (Cutoff::AtLeast(1.5), judgment(MomentumLevel::Strong, "strong", "Strong investment",
            "Capital spending far exceeds depreciation; the asset base is expanding fast.")),
        (Cutoff::AtLeast(1.0), judgment(MomentumLevel::Moderate, "moderate", "Moderate investment",
            "Capital spending exceeds depreciation, so the asset base is growing.")),
        (Cutoff::AtLeast(0.7), judgment(MomentumLevel::Stable, "stable", "Maintenance level",
            "Spending roughly maintains the existing asset base.")),
    ],
    fallback: judgment(MomentumLevel::Declining, "declining", "Under-investing",
        "Capital spending lags depreciation and the asset base is shrinking."),
};

#[rustfmt::skip]
pub const REVENUE_GROWTH_TABLE: ThresholdTable<MomentumLevel> = ThresholdTable {
    bands: &[
        (Cutoff::AtLeast(50.0), judgment(MomentumLevel::Strong, "strong", "High growth",
            "Revenue grew by half or more over the prior period.")),
        (Cutoff::AtLeast(20.0), judgment(MomentumLevel::Moderate, "moderate", "Solid growth",
            "Revenue is growing at a healthy pace.")),
        (Cutoff::AtLeast(0.0), judgment(MomentumLevel::Stable, "stable", "Flat",
            "Revenue is holding steady or growing slowly.")),
    ],
    fallback: judgment(MomentumLevel::Declining, "declining", "Declining",
        "Revenue fell compared with the prior period."),
};

#[rustfmt::skip]
pub const ROE_TABLE: ThresholdTable<ProfitabilityLevel> = ThresholdTable {
    bands: &[
        (Cutoff::AtLeast(15.0), judgment(ProfitabilityLevel::Excellent, "excellent", "Excellent",
            "Shareholder capital is being used very efficiently.")),
        (Cutoff::AtLeast(10.0), judgment(ProfitabilityLevel::Good, "good", "Good",
            "Returns on equity are above the typical cost of capital.")),
        (Cutoff::AtLeast(5.0), judgment(ProfitabilityLevel::Fair, "fair", "Fair",
            "Returns on equity are modest.")),
    ],
    fallback: judgment(ProfitabilityLevel::Poor, "poor", "Poor",
        "Shareholder capital earns little or is losing money."),
};

#[rustfmt::skip]
pub const ROA_TABLE: ThresholdTable<ProfitabilityLevel> = ThresholdTable {
    bands: &[
        (Cutoff::AtLeast(10.0), judgment(ProfitabilityLevel::Excellent, "excellent", "Excellent",
            "Total assets generate very strong profits.")),
        (Cutoff::AtLeast(5.0), judgment(ProfitabilityLevel::Good, "good", "Good",
            "Assets are employed profitably.")),
        (Cutoff::AtLeast(2.0), judgment(ProfitabilityLevel::Fair, "fair", "Fair",
            "Asset returns are in an ordinary range.")),
    ],
    fallback: judgment(ProfitabilityLevel::Poor, "poor", "Poor",
        "Assets produce little profit for their size."),
};

#[rustfmt::skip]
pub const OPERATING_MARGIN_TABLE: ThresholdTable<ProfitabilityLevel> = ThresholdTable {
    bands: &[
        (Cutoff::AtLeast(20.0), judgment(ProfitabilityLevel::Excellent, "excellent", "Excellent",
            "Core operations are highly profitable.")),
        (Cutoff::AtLeast(10.0), judgment(ProfitabilityLevel::Good, "good", "Good",
            "The business keeps a healthy share of each sale as operating profit.")),
        (Cutoff::AtLeast(5.0), judgment(ProfitabilityLevel::Fair, "fair", "Fair",
            "Operating margins are thin but positive.")),
    ],
    fallback: judgment(ProfitabilityLevel::Poor, "poor", "Poor",
        "Operations earn little or lose money on each sale."),
};

#[rustfmt::skip]
pub const PER_TABLE: ThresholdTable<PricingLevel> = ThresholdTable {
    bands: &[
        (Cutoff::Below(10.0), judgment(PricingLevel::Undervalued, "undervalued", "Undervalued",
            "The share price is low relative to earnings.")),
        (Cutoff::Below(20.0), judgment(PricingLevel::Fair, "fair", "Fair",
            "The price is in line with typical earnings multiples.")),
        (Cutoff::Below(30.0), judgment(PricingLevel::Overvalued, "overvalued", "Overvalued",
            "The price reflects high expectations for earnings growth.")),
    ],
    fallback: judgment(PricingLevel::VeryOvervalued, "very-overvalued", "Very overvalued",
        "The price is far ahead of current earnings."),
};

#[rustfmt::skip]
pub const PBR_TABLE: ThresholdTable<PricingLevel> = ThresholdTable {
    bands: &[
        (Cutoff::Below(1.0), judgment(PricingLevel::Undervalued, "undervalued", "Undervalued",
            "The company trades below its book value.")),
        (Cutoff::Below(2.0), judgment(PricingLevel::Fair, "fair", "Fair",
            "The price carries a modest premium over book value.")),
        (Cutoff::Below(3.0), judgment(PricingLevel::Overvalued, "overvalued", "Overvalued",
            "The market pays a notable premium over net assets.")),
    ],
    fallback: judgment(PricingLevel::VeryOvervalued, "very-overvalued", "Very overvalued",
        "The price is three or more times book value."),
};

#[rustfmt::skip]
pub const DIVIDEND_YIELD_TABLE: ThresholdTable<PricingLevel> = ThresholdTable {
    bands: &[
        (Cutoff::AtLeast(4.0), judgment(PricingLevel::Undervalued, "high-yield", "High yield",
            "The dividend returns 4% or more of the share price each year.")),
        (Cutoff::AtLeast(2.0), judgment(PricingLevel::Fair, "fair", "Fair",
            "The dividend yield is in a typical range.")),
        (Cutoff::AtLeast(1.0), judgment(PricingLevel::Overvalued, "low-yield", "Low yield",
            "Shareholders receive a small cash return relative to the price.")),
    ],
    fallback: judgment(PricingLevel::VeryOvervalued, "no-dividend", "Little or no dividend",
        "The company pays almost no dividend."),
};

pub fn classify_psr(psr: f64) -> Judgment<ValuationLevel> {
    PSR_TABLE.classify(psr)
}

pub fn classify_current_ratio(current_ratio: f64) -> Judgment<SafetyLevel> {
    CURRENT_RATIO_TABLE.classify(current_ratio)
}

pub fn classify_equity_ratio(equity_ratio: f64) -> Judgment<SafetyLevel> {
    EQUITY_RATIO_TABLE.classify(equity_ratio)
}

pub fn classify_capex_ratio(capex_ratio: f64) -> Judgment<MomentumLevel> {
    CAPEX_RATIO_TABLE.classify(capex_ratio)
}

pub fn classify_revenue_growth(growth: f64) -> Judgment<MomentumLevel> {
    REVENUE_GROWTH_TABLE.classify(growth)
}

pub fn classify_roe(roe: f64) -> Judgment<ProfitabilityLevel> {
    ROE_TABLE.classify(roe)
}

pub fn classify_roa(roa: f64) -> Judgment<ProfitabilityLevel> {
    ROA_TABLE.classify(roa)
}

pub fn classify_operating_margin(margin: f64) -> Judgment<ProfitabilityLevel> {
    OPERATING_MARGIN_TABLE.classify(margin)
}

pub fn classify_per(per: f64) -> Judgment<PricingLevel> {
    PER_TABLE.classify(per)
}

pub fn classify_pbr(pbr: f64) -> Judgment<PricingLevel> {
    PBR_TABLE.classify(pbr)
}

pub fn classify_dividend_yield(dividend_yield: f64) -> Judgment<PricingLevel> {
    DIVIDEND_YIELD_TABLE.classify(dividend_yield)
}

/// Classify a ratio for any metric
pub fn judge(metric: Metric, ratio: f64) -> JudgmentView {
    match metric {
        Metric::Psr => classify_psr(ratio).view(),
        Metric::CurrentRatio => classify_current_ratio(ratio).view(),
        Metric::EquityRatio => classify_equity_ratio(ratio).view(),
        Metric::CapexRatio => classify_capex_ratio(ratio).view(),
        Metric::RevenueGrowth => classify_revenue_growth(ratio).view(),
        Metric::Roe => classify_roe(ratio).view(),
        Metric::Roa => classify_roa(ratio).view(),
        Metric::OperatingMargin => classify_operating_margin(ratio).view(),
        Metric::Per => classify_per(ratio).view(),
        Metric::Pbr => classify_pbr(ratio).view(),
        Metric::DividendYield => classify_dividend_yield(ratio).view(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratios::*;

    fn evaluate(metric: Metric, value: f64, base: f64) -> JudgmentView {
        judge(metric, compute(metric, value, base).unwrap())
    }

    fn bound(cutoff: &Cutoff) -> f64 {
        match *cutoff {
            Cutoff::AtLeast(b) | Cutoff::Below(b) => b,
        }
    }

    #[test]
    fn test_boundaries_are_half_open() {
        assert_eq!(classify_psr(1.0).level, ValuationLevel::Fair);
        assert_eq!(classify_psr(0.999).level, ValuationLevel::Undervalued);
        assert_eq!(classify_current_ratio(200.0).level, SafetyLevel::Excellent);
        assert_eq!(classify_current_ratio(199.99).level, SafetyLevel::Good);
        assert_eq!(classify_per(10.0).level, PricingLevel::Fair);
        assert_eq!(classify_pbr(3.0).level, PricingLevel::VeryOvervalued);
        assert_eq!(classify_equity_ratio(20.0).level, SafetyLevel::Fair);
        assert_eq!(classify_capex_ratio(0.7).level, MomentumLevel::Stable);
        assert_eq!(classify_revenue_growth(0.0).level, MomentumLevel::Stable);
        assert_eq!(classify_roa(2.0).level, ProfitabilityLevel::Fair);
        assert_eq!(
            classify_operating_margin(20.0).level,
            ProfitabilityLevel::Excellent
        );
    }

    #[test]
    fn test_extremes_land_in_outer_bands() {
        assert_eq!(classify_psr(-3.0).level, ValuationLevel::Undervalued);
        assert_eq!(classify_psr(1e12).level, ValuationLevel::VeryHigh);
        assert_eq!(classify_roe(-80.0).level, ProfitabilityLevel::Poor);
        assert_eq!(classify_roe(1e9).level, ProfitabilityLevel::Excellent);
        assert_eq!(
            classify_revenue_growth(-100.0).level,
            MomentumLevel::Declining
        );
        assert_eq!(classify_dividend_yield(0.0).label, "no-dividend");
    }

    #[test]
    fn test_dividend_labels() {
        let high = classify_dividend_yield(4.0);
        assert_eq!(high.level, PricingLevel::Undervalued);
        assert_eq!(high.label, "high-yield");
        assert_eq!(classify_dividend_yield(3.999).label, "fair");
        assert_eq!(classify_dividend_yield(2.0).label, "fair");
        assert_eq!(classify_dividend_yield(1.999).label, "low-yield");

        let low = classify_dividend_yield(1.0);
        assert_eq!(low.level, PricingLevel::Overvalued);
        assert_eq!(low.label, "low-yield");

        let none = classify_dividend_yield(0.999);
        assert_eq!(none.level, PricingLevel::VeryOvervalued);
        assert_eq!(none.label, "no-dividend");
    }

    /// Rebuild the half-open intervals a table implies, each with its label
    fn intervals<L: Level>(table: &ThresholdTable<L>) -> Vec<(f64, f64, &'static str)> {
        let mut out = Vec::new();
        let mut edge = None;
        for (cutoff, judgment) in table.bands {
            let (lo, hi) = match *cutoff {
                Cutoff::AtLeast(b) => (b, edge.unwrap_or(f64::INFINITY)),
                Cutoff::Below(b) => (edge.unwrap_or(f64::NEG_INFINITY), b),
            };
            out.push((lo, hi, judgment.label));
            edge = Some(bound(cutoff));
        }

        let last = edge.unwrap();
        let (lo, hi) = match table.bands[0].0 {
            Cutoff::AtLeast(_) => (f64::NEG_INFINITY, last),
            Cutoff::Below(_) => (last, f64::INFINITY),
        };
        out.push((lo, hi, table.fallback.label));
        out
    }

    fn assert_partition<L: Level>(table: &ThresholdTable<L>, value: f64) {
        let containing: Vec<_> = intervals(table)
            .into_iter()
            .filter(|(lo, hi, _)| value >= *lo && value < *hi)
            .collect();
        assert_eq!(containing.len(), 1, "{value}");
        assert_eq!(containing[0].2, table.classify(value).label);
    }

    #[test]
    fn test_bands_are_exhaustive_and_exclusive() {
        let grid = (-300..=2500).map(|i| f64::from(i) / 10.0);
        for v in grid.chain([-1e6, 1e6]) {
            assert_partition(&PSR_TABLE, v);
            assert_partition(&CURRENT_RATIO_TABLE, v);
            assert_partition(&EQUITY_RATIO_TABLE, v);
            assert_partition(&CAPEX_RATIO_TABLE, v);
            assert_partition(&REVENUE_GROWTH_TABLE, v);
            assert_partition(&ROE_TABLE, v);
            assert_partition(&ROA_TABLE, v);
            assert_partition(&OPERATING_MARGIN_TABLE, v);
            assert_partition(&PER_TABLE, v);
            assert_partition(&PBR_TABLE, v);
            assert_partition(&DIVIDEND_YIELD_TABLE, v);
        }
    }

    #[test]
    fn test_cutoffs_are_monotonic() {
        fn bounds<L: 'static>(table: &ThresholdTable<L>) -> Vec<f64> {
            table.bands.iter().map(|(c, _)| bound(c)).collect()
        }

        for b in [bounds(&PSR_TABLE), bounds(&PER_TABLE), bounds(&PBR_TABLE)] {
            assert!(b.windows(2).all(|w| w[0] < w[1]));
        }

        let descending = [
            bounds(&CURRENT_RATIO_TABLE),
            bounds(&ROE_TABLE),
            bounds(&DIVIDEND_YIELD_TABLE),
            bounds(&REVENUE_GROWTH_TABLE),
            bounds(&CAPEX_RATIO_TABLE),
        ];
        for b in descending {
            assert!(b.windows(2).all(|w| w[0] > w[1]));
        }
    }

    #[test]
    fn test_end_to_end_scenarios() {
        let psr = evaluate(Metric::Psr, 500_000.0, 100_000.0);
        assert_eq!(psr.level, "very-high");

        let current = evaluate(Metric::CurrentRatio, 150_000.0, 50_000.0);
        assert_eq!(current.level, "excellent");

        let roe = evaluate(Metric::Roe, 10_000.0, 200_000.0);
        assert_eq!(roe.level, "fair");

        let per = evaluate(Metric::Per, 500_000.0, 10_000.0);
        assert_eq!(per.level, "very-overvalued");

        let dividend = evaluate(Metric::DividendYield, 100.0, 2_500.0);
        assert_eq!(dividend.label, "high-yield");

        let growth = evaluate(Metric::RevenueGrowth, 100_000.0, 80_000.0);
        assert_eq!(growth.level, "moderate");
    }

    #[test]
    fn test_view_serializes_level_tag() {
        let json = serde_json::to_value(classify_per(50.0).view()).unwrap();
        assert_eq!(json["level"], "very-overvalued");
        assert_eq!(json["title"], "Very overvalued");
    }
}
