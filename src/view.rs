//! The display seam. The refresh pipeline talks to an injected
//! [`DashboardView`] with typed setters, so none of the core logic needs a
//! real terminal (or any display surface at all) to run under test.

use crate::charts::ChartConfig;
use crate::model::RiskTier;

/// Preformatted strings for the five summary tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTiles {
    pub total_transactions: String,
    pub total_outlets: String,
    pub at_risk_transactions: String,
    pub at_risk_percent: String,
    pub last_updated: String,
}

/// One fully formatted table row. `index` is the 1-based display position.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub index: usize,
    pub name: String,
    pub transactions: String,
    pub loan_total: String,
    pub risk_percent: String,
    pub tier: RiskTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartSlot {
    Status,
    OutletRisk,
}

/// Independently refreshed regions of the dashboard, for per-panel errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Summary,
    Outlets,
    StatusChart,
    OutletRiskChart,
}

impl Panel {
    pub fn as_str(self) -> &'static str {
        match self {
            Panel::Summary => "summary",
            Panel::Outlets => "outlets",
            Panel::StatusChart => "status_chart",
            Panel::OutletRiskChart => "outlet_risk_chart",
        }
    }
}

pub trait DashboardView {
    /// Busy toggle. Must tolerate redundant calls.
    fn set_loading(&mut self, active: bool);
    fn set_summary(&mut self, tiles: SummaryTiles);
    /// Wholesale row replacement, in the order given.
    fn set_table_rows(&mut self, rows: Vec<TableRow>);
    fn set_chart(&mut self, slot: ChartSlot, config: ChartConfig);
    fn set_panel_error(&mut self, panel: Panel, message: &str);
    fn clear_panel_error(&mut self, panel: Panel);
    /// Gate for the re-analysis mutation. `false` means the user declined.
    fn confirm(&mut self, message: &str) -> bool;
    /// Success feedback after a confirmed re-analysis.
    fn notify(&mut self, message: &str);
    /// Failure feedback not tied to a single panel.
    fn show_error(&mut self, message: &str);
}

/// Owned chart mount. Replacing always disposes the previous instance before
/// the new one is installed, so two charts can never overlap on one slot.
#[derive(Debug)]
pub struct ChartHandle<T> {
    mounted: Option<T>,
}

impl<T> Default for ChartHandle<T> {
    fn default() -> Self {
        Self { mounted: None }
    }
}

impl<T> ChartHandle<T> {
    pub fn replace(&mut self, next: T) {
        // Drop the old mount first, then install.
        self.mounted = None;
        self.mounted = Some(next);
    }

    pub fn clear(&mut self) {
        self.mounted = None;
    }

    pub fn mounted(&self) -> Option<&T> {
        self.mounted.as_ref()
    }
}
