//! Placeholder filings source.
//!
//! Returns the same figures for every well-formed company code. There is no
//! real disclosure-system integration behind it.

use analysis_core::{AnalysisError, FilingsSource, FinancialFigures};
use async_trait::async_trait;
use chrono::Utc;

const MAX_CODE_LEN: usize = 12;
pub const DEFAULT_FISCAL_YEAR: i32 = 2024;

#[derive(Clone, Debug)]
pub struct MockFilingsClient {
    fiscal_year: i32,
}

impl MockFilingsClient {
    pub fn new(fiscal_year: i32) -> Self {
        Self { fiscal_year }
    }
}

impl Default for MockFilingsClient {
    fn default() -> Self {
        Self::new(DEFAULT_FISCAL_YEAR)
    }
}

/// Trim and check a company code: 1 to 12 ASCII letters or digits
pub fn normalize_company_code(code: &str) -> Result<String, AnalysisError> {
    let trimmed = code.trim();
    if trimmed.is_empty()
        || trimmed.len() > MAX_CODE_LEN
        || !trimmed.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(AnalysisError::InvalidCompanyCode(code.to_string()));
    }
    Ok(trimmed.to_ascii_uppercase())
}

#[async_trait]
impl FilingsSource for MockFilingsClient {
    async fn fetch_figures(&self, company_code: &str) -> Result<FinancialFigures, AnalysisError> {
        let code = normalize_company_code(company_code)?;
        tracing::info!(
            company = %code,
            fiscal_year = self.fiscal_year,
            "Serving placeholder filings figures"
        );

        // Millions of currency units, except the per-share price and dividend
        Ok(FinancialFigures {
            company_code: code,
            fiscal_year: self.fiscal_year,
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
        })
    }
}
