use crate::model::{ChartSeries, OutletRecord, SummaryStats};

#[derive(Clone)]
pub struct Config {
    /// Base URL of the risk-analysis backend.
    pub api_base: String,
    /// How many outlets the risk bar chart asks the backend for.
    pub chart_limit: u32,
    pub http_timeout_secs: u64,
    /// UI poll cadence in milliseconds.
    pub tick_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_base: std::env::var("API_BASE").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string()),
            chart_limit: std::env::var("CHART_LIMIT").ok().and_then(|v| v.parse().ok()).unwrap_or(10),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(30),
            tick_ms: std::env::var("TICK_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(200),
        }
    }
}

/// Single-writer cache of the last successful fetches. Replaced wholesale on
/// reload; filter/sort read it and derive fresh sequences, never mutate it.
#[derive(Debug, Default, Clone)]
pub struct DashboardState {
    pub summary: Option<SummaryStats>,
    pub all_outlets: Vec<OutletRecord>,
    pub status_series: Option<ChartSeries>,
    pub outlet_risk_series: Option<ChartSeries>,
}

pub fn now_ts() -> u64 {
    chrono::Utc::now().timestamp() as u64
}
