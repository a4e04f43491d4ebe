//! HTTP client for the risk-analysis backend.
//!
//! Everything the dashboard knows about the network sits behind the [`Api`]
//! trait so the refresh pipeline can be driven by a scripted implementation
//! in tests.

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::model::{AnalyzeResponse, ChartSeries, OutletRecord, SummaryStats};
use crate::state::Config;

#[async_trait]
pub trait Api {
    async fn fetch_summary(&self) -> Result<SummaryStats>;
    async fn fetch_outlets(&self) -> Result<Vec<OutletRecord>>;
    async fn fetch_status_series(&self) -> Result<ChartSeries>;
    async fn fetch_outlet_risk_series(&self, limit: u32) -> Result<ChartSeries>;
    /// Triggers a server-side re-analysis. The response body is decoded even
    /// on error statuses; the backend reports failures as `success: false`
    /// with an `error` field.
    async fn run_analysis(&self) -> Result<AnalyzeResponse>;
}

pub struct HttpApi {
    client: Client,
    base: String,
}

impl HttpApi {
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.http_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base: cfg.api_base.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base, path);
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("GET {} failed: {} {}", path, status, body));
        }
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl Api for HttpApi {
    async fn fetch_summary(&self) -> Result<SummaryStats> {
        self.get_json("/api/summary").await
    }

    async fn fetch_outlets(&self) -> Result<Vec<OutletRecord>> {
        self.get_json("/api/outlets").await
    }

    async fn fetch_status_series(&self) -> Result<ChartSeries> {
        let series: ChartSeries = self.get_json("/api/charts/status").await?;
        series.validate()?;
        Ok(series)
    }

    async fn fetch_outlet_risk_series(&self, limit: u32) -> Result<ChartSeries> {
        let path = format!("/api/charts/outlet-risk?limit={}", limit);
        let series: ChartSeries = self.get_json(&path).await?;
        series.validate()?;
        Ok(series)
    }

    async fn run_analysis(&self) -> Result<AnalyzeResponse> {
        let url = format!("{}/api/analyze", self.base);
        let resp = self.client.post(&url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        match serde_json::from_str::<AnalyzeResponse>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => {
                Err(anyhow!("POST /api/analyze failed: {} {}", status, body))
            }
            Err(err) => Err(anyhow!("POST /api/analyze: malformed response: {}", err)),
        }
    }
}
