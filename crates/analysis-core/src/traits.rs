use async_trait::async_trait;
use crate::{AnalysisError, FinancialFigures};

/// Trait for anything that can supply a company's financial figures
#[async_trait]
pub trait FilingsSource: Send + Sync {
    async fn fetch_figures(&self, company_code: &str) -> Result<FinancialFigures, AnalysisError>;
}
