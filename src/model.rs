//! Wire types for the risk-analysis backend plus the derived classifications
//! the dashboard computes from them.
//!
//! Field names on the wire are the backend's Indonesian column names; they are
//! the API contract and stay as serde renames.

use anyhow::{bail, Result};
use serde::Deserialize;

/// Aggregate snapshot for the summary tiles. Replaced wholesale on each fetch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SummaryStats {
    #[serde(rename = "total_transaksi")]
    pub total_transactions: u64,
    #[serde(rename = "total_outlet")]
    pub total_outlets: u64,
    #[serde(rename = "transaksi_berisiko")]
    pub at_risk_transactions: u64,
    #[serde(rename = "persen_berisiko")]
    pub at_risk_percent: f64,
    /// Opaque display string, rendered as-is.
    pub last_updated: String,
}

/// One row of the outlet summary. The name is the display key; the backend
/// does not guarantee uniqueness but the dashboard treats it as one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutletRecord {
    #[serde(rename = "outlet")]
    pub name: String,
    #[serde(rename = "total_transaksi")]
    pub total_transactions: u64,
    #[serde(rename = "total_pinjaman")]
    pub total_loan: f64,
    /// Absent in older outlet summaries; absent means no flagged transactions.
    #[serde(rename = "persen_berisiko", default)]
    pub risk_percent: f64,
}

/// Index-aligned label/value pair feeding one chart.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    /// The alignment invariant: label[i] belongs to value[i]. A payload that
    /// breaks it is rejected rather than rendered off-by-one.
    pub fn validate(&self) -> Result<()> {
        if self.labels.len() != self.values.len() {
            bail!(
                "chart series misaligned: {} labels vs {} values",
                self.labels.len(),
                self.values.len()
            );
        }
        Ok(())
    }
}

/// Response of the re-analysis mutation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Risk classification derived from an outlet's at-risk percentage.
/// Boundaries are half-open: [0,10) / [10,30) / everything above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskTier {
    Safe,
    Attention,
    AtRisk,
}

impl RiskTier {
    pub fn classify(risk_percent: f64) -> Self {
        if risk_percent < 10.0 {
            RiskTier::Safe
        } else if risk_percent < 30.0 {
            RiskTier::Attention
        } else {
            RiskTier::AtRisk
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Safe => "Safe",
            RiskTier::Attention => "Attention",
            RiskTier::AtRisk => "At-Risk",
        }
    }

    /// Whole-row highlight class.
    pub fn row_class(self) -> &'static str {
        match self {
            RiskTier::Safe => "risk-low",
            RiskTier::Attention => "risk-medium",
            RiskTier::AtRisk => "risk-high",
        }
    }

    /// Badge variant class.
    pub fn badge_class(self) -> &'static str {
        match self {
            RiskTier::Safe => "badge-success",
            RiskTier::Attention => "badge-warning",
            RiskTier::AtRisk => "badge-danger",
        }
    }
}

/// Sortable numeric columns of the outlet table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    TotalTransactions,
    TotalLoan,
    RiskPercent,
}

impl SortKey {
    pub fn value(self, outlet: &OutletRecord) -> f64 {
        match self {
            SortKey::TotalTransactions => outlet.total_transactions as f64,
            SortKey::TotalLoan => outlet.total_loan,
            SortKey::RiskPercent => outlet.risk_percent,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::TotalTransactions => "transactions",
            SortKey::TotalLoan => "loan total",
            SortKey::RiskPercent => "% at-risk",
        }
    }

    /// Cycle order used by the sort key binding.
    pub fn next(self) -> Self {
        match self {
            SortKey::TotalTransactions => SortKey::TotalLoan,
            SortKey::TotalLoan => SortKey::RiskPercent,
            SortKey::RiskPercent => SortKey::TotalTransactions,
        }
    }
}
