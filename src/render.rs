//! Pure builders turning fetched records into view input. Same input, same
//! output; filtering and sorting happen in the caller.

use crate::format::{format_currency, format_number, format_percent};
use crate::model::{OutletRecord, RiskTier, SummaryStats};
use crate::view::{SummaryTiles, TableRow};

pub fn build_summary_tiles(summary: &SummaryStats) -> SummaryTiles {
    SummaryTiles {
        total_transactions: format_number(summary.total_transactions as f64),
        total_outlets: format_number(summary.total_outlets as f64),
        at_risk_transactions: format_number(summary.at_risk_transactions as f64),
        at_risk_percent: format_percent(summary.at_risk_percent),
        last_updated: summary.last_updated.clone(),
    }
}

/// Maps outlets to table rows in input order with 1-based display indices.
pub fn build_table_rows(outlets: &[OutletRecord]) -> Vec<TableRow> {
    outlets
        .iter()
        .enumerate()
        .map(|(i, outlet)| TableRow {
            index: i + 1,
            name: outlet.name.clone(),
            transactions: format_number(outlet.total_transactions as f64),
            loan_total: format_currency(outlet.total_loan),
            risk_percent: format_percent(outlet.risk_percent),
            tier: RiskTier::classify(outlet.risk_percent),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outlet(name: &str, risk: f64) -> OutletRecord {
        OutletRecord {
            name: name.to_string(),
            total_transactions: 10,
            total_loan: 250_000.0,
            risk_percent: risk,
        }
    }

    #[test]
    fn test_rows_order_preserving_and_one_based() {
        let rows = build_table_rows(&[outlet("A", 5.0), outlet("B", 50.0)]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[0].name, "A");
        assert_eq!(rows[0].tier, RiskTier::Safe);
        assert_eq!(rows[1].index, 2);
        assert_eq!(rows[1].name, "B");
        assert_eq!(rows[1].tier, RiskTier::AtRisk);
    }

    #[test]
    fn test_row_formatting() {
        let rows = build_table_rows(&[outlet("KEDIRI", 12.34)]);
        assert_eq!(rows[0].transactions, "10");
        assert_eq!(rows[0].loan_total, "Rp 250.000");
        assert_eq!(rows[0].risk_percent, "12.3%");
        assert_eq!(rows[0].tier, RiskTier::Attention);
    }

    #[test]
    fn test_empty_input_renders_no_rows() {
        assert!(build_table_rows(&[]).is_empty());
    }

    #[test]
    fn test_summary_tiles() {
        let tiles = build_summary_tiles(&SummaryStats {
            total_transactions: 12_500,
            total_outlets: 42,
            at_risk_transactions: 375,
            at_risk_percent: 3.0,
            last_updated: "2026-08-30 10:00:00".to_string(),
        });
        assert_eq!(tiles.total_transactions, "12.500");
        assert_eq!(tiles.total_outlets, "42");
        assert_eq!(tiles.at_risk_transactions, "375");
        assert_eq!(tiles.at_risk_percent, "3.0%");
        assert_eq!(tiles.last_updated, "2026-08-30 10:00:00");
    }
}
