//! The refresh pipeline: fetch all four backend slices concurrently, cache
//! the outlet list, and push derived views through the injected display.
//!
//! The fan-out is best-effort: every fetch settles, every panel applies or
//! reports on its own, and a failed panel keeps its previous contents behind
//! an error marker. The loading indicator is set and cleared with no fallible
//! path in between, so it cannot stick on.

use std::time::Instant;

use anyhow::Result;

use crate::api::Api;
use crate::charts::{build_outlet_risk_chart, build_status_chart};
use crate::logging::{json_log, obj, v_bool, v_num, v_str};
use crate::model::{ChartSeries, OutletRecord, SortKey, SummaryStats};
use crate::render::{build_summary_tiles, build_table_rows};
use crate::state::{Config, DashboardState};
use crate::view::{ChartSlot, DashboardView, Panel};

pub struct Dashboard<A, V> {
    api: A,
    view: V,
    cfg: Config,
    state: DashboardState,
}

impl<A: Api, V: DashboardView> Dashboard<A, V> {
    pub fn new(api: A, view: V, cfg: Config) -> Self {
        Self {
            api,
            view,
            cfg,
            state: DashboardState::default(),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Full reload: all four fetches in flight at once, loading indicator
    /// held for the whole group and always released.
    pub async fn reload_all(&mut self) {
        self.view.set_loading(true);
        let started = Instant::now();

        let (summary, outlets, status, risk) = tokio::join!(
            self.api.fetch_summary(),
            self.api.fetch_outlets(),
            self.api.fetch_status_series(),
            self.api.fetch_outlet_risk_series(self.cfg.chart_limit),
        );

        let failures = [
            summary.is_err(),
            outlets.is_err(),
            status.is_err(),
            risk.is_err(),
        ]
        .iter()
        .filter(|f| **f)
        .count();

        self.apply_summary(summary);
        self.apply_outlets(outlets);
        self.apply_status_series(status);
        self.apply_outlet_risk_series(risk);

        self.view.set_loading(false);
        json_log(
            "reload",
            obj(&[
                ("elapsed_ms", v_num(started.elapsed().as_millis() as f64)),
                ("outlets", v_num(self.state.all_outlets.len() as f64)),
                ("failed_panels", v_num(failures as f64)),
            ]),
        );
    }

    fn apply_summary(&mut self, result: Result<SummaryStats>) {
        match result {
            Ok(summary) => {
                self.view.set_summary(build_summary_tiles(&summary));
                self.view.clear_panel_error(Panel::Summary);
                self.state.summary = Some(summary);
            }
            Err(err) => self.panel_failed(Panel::Summary, &err),
        }
    }

    fn apply_outlets(&mut self, result: Result<Vec<OutletRecord>>) {
        match result {
            Ok(outlets) => {
                self.view.set_table_rows(build_table_rows(&outlets));
                self.view.clear_panel_error(Panel::Outlets);
                self.state.all_outlets = outlets;
            }
            Err(err) => self.panel_failed(Panel::Outlets, &err),
        }
    }

    fn apply_status_series(&mut self, result: Result<ChartSeries>) {
        match result {
            Ok(series) => {
                self.view.set_chart(ChartSlot::Status, build_status_chart(&series));
                self.view.clear_panel_error(Panel::StatusChart);
                self.state.status_series = Some(series);
            }
            Err(err) => self.panel_failed(Panel::StatusChart, &err),
        }
    }

    fn apply_outlet_risk_series(&mut self, result: Result<ChartSeries>) {
        match result {
            Ok(series) => {
                self.view
                    .set_chart(ChartSlot::OutletRisk, build_outlet_risk_chart(&series));
                self.view.clear_panel_error(Panel::OutletRiskChart);
                self.state.outlet_risk_series = Some(series);
            }
            Err(err) => self.panel_failed(Panel::OutletRiskChart, &err),
        }
    }

    fn panel_failed(&mut self, panel: Panel, err: &anyhow::Error) {
        json_log(
            "fetch",
            obj(&[
                ("panel", v_str(panel.as_str())),
                ("result", v_str("fail")),
                ("error", v_str(&err.to_string())),
            ]),
        );
        self.view.set_panel_error(panel, &err.to_string());
    }

    /// Case-insensitive substring filter over cached outlet names. Empty
    /// query renders the full cache. Reads the cache, never writes it.
    pub fn filter(&mut self, query: &str) {
        let needle = query.to_lowercase();
        let filtered: Vec<OutletRecord> = self
            .state
            .all_outlets
            .iter()
            .filter(|o| o.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        self.view.set_table_rows(build_table_rows(&filtered));
    }

    /// Renders a copy of the cache sorted descending by the given column.
    pub fn sort(&mut self, key: SortKey) {
        let mut sorted = self.state.all_outlets.clone();
        sorted.sort_by(|a, b| key.value(b).total_cmp(&key.value(a)));
        self.view.set_table_rows(build_table_rows(&sorted));
    }

    /// Confirmation-gated server-side re-analysis. Declining is a clean
    /// no-op; success reports and reloads everything; failure is surfaced
    /// and leaves the current panels alone.
    pub async fn run_analysis(&mut self) {
        if !self.view.confirm("Re-run the risk analysis?") {
            return;
        }

        self.view.set_loading(true);
        let result = self.api.run_analysis().await;
        self.view.set_loading(false);

        match result {
            Ok(resp) if resp.success => {
                json_log(
                    "analyze",
                    obj(&[
                        ("success", v_bool(true)),
                        ("timestamp", v_str(resp.timestamp.as_deref().unwrap_or(""))),
                    ]),
                );
                self.view
                    .notify(resp.message.as_deref().unwrap_or("Analysis complete"));
                self.reload_all().await;
            }
            Ok(resp) => {
                let msg = resp
                    .error
                    .unwrap_or_else(|| "analysis failed on the server".to_string());
                json_log(
                    "analyze",
                    obj(&[("success", v_bool(false)), ("error", v_str(&msg))]),
                );
                self.view.show_error(&msg);
            }
            Err(err) => {
                json_log(
                    "analyze",
                    obj(&[
                        ("success", v_bool(false)),
                        ("error", v_str(&err.to_string())),
                    ]),
                );
                self.view.show_error(&err.to_string());
            }
        }
    }
}
