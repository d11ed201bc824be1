//! Ratio calculations.
//!
//! Every function takes a (value, base) pair and refuses to divide by a base
//! that is not strictly positive. Non-finite operands are refused too, so a
//! successful result is always a finite number that can be handed to a
//! classifier.

use analysis_core::{AnalysisError, Metric};

const KEEPS_RATIO_FINITE: &str = "large enough to keep the ratio finite";

fn invalid(
    metric: Metric,
    operand: &'static str,
    requirement: &'static str,
    value: f64,
) -> AnalysisError {
    AnalysisError::InvalidPrecondition {
        metric,
        operand,
        requirement,
        value,
    }
}

fn checked_ratio(metric: Metric, value: f64, base: f64) -> Result<f64, AnalysisError> {
    let (value_name, base_name) = metric.operand_names();
    if !value.is_finite() {
        return Err(invalid(metric, value_name, "a finite number", value));
    }
    // NaN fails this comparison as well
    if !(base > 0.0) || base.is_infinite() {
        return Err(invalid(metric, base_name, "greater than zero", base));
    }

    let ratio = value / base;
    if !ratio.is_finite() {
        return Err(invalid(metric, base_name, KEEPS_RATIO_FINITE, base));
    }
    Ok(ratio)
}

fn checked_percent(metric: Metric, value: f64, base: f64) -> Result<f64, AnalysisError> {
    let pct = checked_ratio(metric, value, base)? * 100.0;
    if !pct.is_finite() {
        let (_, base_name) = metric.operand_names();
        return Err(invalid(metric, base_name, KEEPS_RATIO_FINITE, base));
    }
    Ok(pct)
}

/// PSR = market cap / revenue
pub fn calculate_psr(market_cap: f64, revenue: f64) -> Result<f64, AnalysisError> {
    checked_ratio(Metric::Psr, market_cap, revenue)
}

/// Current ratio in percent
pub fn calculate_current_ratio(
    current_assets: f64,
    current_liabilities: f64,
) -> Result<f64, AnalysisError> {
    checked_percent(Metric::CurrentRatio, current_assets, current_liabilities)
}

/// Equity ratio in percent
pub fn calculate_equity_ratio(equity: f64, total_assets: f64) -> Result<f64, AnalysisError> {
    checked_percent(Metric::EquityRatio, equity, total_assets)
}

/// CapEx / depreciation. Above 1.0 means the asset base is growing.
pub fn calculate_capex_ratio(capex: f64, depreciation: f64) -> Result<f64, AnalysisError> {
    checked_ratio(Metric::CapexRatio, capex, depreciation)
}

/// Year-over-year revenue growth in percent
pub fn calculate_revenue_growth(
    current_revenue: f64,
    past_revenue: f64,
) -> Result<f64, AnalysisError> {
    let metric = Metric::RevenueGrowth;
    // Guard the raw figures first so errors name past_revenue, not the difference
    checked_ratio(metric, current_revenue, past_revenue)?;
    checked_percent(metric, current_revenue - past_revenue, past_revenue)
}

/// ROE in percent
pub fn calculate_roe(net_income: f64, equity: f64) -> Result<f64, AnalysisError> {
    checked_percent(Metric::Roe, net_income, equity)
}

/// ROA in percent
pub fn calculate_roa(net_income: f64, total_assets: f64) -> Result<f64, AnalysisError> {
    checked_percent(Metric::Roa, net_income, total_assets)
}

pub fn calculate_operating_margin(
    operating_income: f64,
    revenue: f64,
) -> Result<f64, AnalysisError> {
    checked_percent(Metric::OperatingMargin, operating_income, revenue)
}

/// PER = market cap / net income. Loss-making companies have no PER.
pub fn calculate_per(market_cap: f64, net_income: f64) -> Result<f64, AnalysisError> {
    checked_ratio(Metric::Per, market_cap, net_income)
}

/// PBR = market cap / equity
pub fn calculate_pbr(market_cap: f64, equity: f64) -> Result<f64, AnalysisError> {
    checked_ratio(Metric::Pbr, market_cap, equity)
}

/// Dividend yield in percent. A zero dividend is valid and yields 0%.
pub fn calculate_dividend_yield(
    annual_dividend: f64,
    stock_price: f64,
) -> Result<f64, AnalysisError> {
    checked_percent(Metric::DividendYield, annual_dividend, stock_price)
}

/// Dispatch to the calculation for `metric`
pub fn compute(metric: Metric, value: f64, base: f64) -> Result<f64, AnalysisError> {
    match metric {
        Metric::Psr => calculate_psr(value, base),
        Metric::CurrentRatio => calculate_current_ratio(value, base),
        Metric::EquityRatio => calculate_equity_ratio(value, base),
        Metric::CapexRatio => calculate_capex_ratio(value, base),
        Metric::RevenueGrowth => calculate_revenue_growth(value, base),
        Metric::Roe => calculate_roe(value, base),
        Metric::Roa => calculate_roa(value, base),
        Metric::OperatingMargin => calculate_operating_margin(value, base),
        Metric::Per => calculate_per(value, base),
        Metric::Pbr => calculate_pbr(value, base),
        Metric::DividendYield => calculate_dividend_yield(value, base),
    }
}
