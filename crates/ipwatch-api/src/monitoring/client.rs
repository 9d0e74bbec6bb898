// Async HTTP client for the admin monitoring API.
//
// Base path: /api/admin/monitoring/
// Auth: Authorization: Bearer <token>, resolved per request

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderValue};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::models::{
    ActivityStats, Chart, MonitoringSnapshot, PatentTrends, SystemHealth, TrafficSnapshot,
};
use super::payload::Payload;
use super::query::MonitoringQuery;
use super::series::{ChartKind, Series};
use crate::auth::TokenSource;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Path of the monitoring API below the backend root.
pub const MONITORING_PREFIX: &str = "/api/admin/monitoring";

/// Async client for the admin monitoring endpoints.
///
/// Every call is a single GET with no retry. A 2xx body that is valid JSON
/// is returned verbatim with a leniently decoded view; only transport
/// errors, non-2xx statuses and JSON syntax errors come back as `Err`.
/// Substituting data is left to the caller.
#[derive(Debug, Clone)]
pub struct MonitoringClient {
    http: reqwest::Client,
    base_url: Url,
    token: Arc<dyn TokenSource>,
}

impl MonitoringClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a backend root URL, token source, and transport config.
    ///
    /// `base_url` may be the backend root (`http://localhost:8081`) or the
    /// monitoring base itself (`http://localhost:8081/api/admin/monitoring`).
    pub fn new(
        base_url: &str,
        token: Arc<dyn TokenSource>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http, token)
    }

    /// Wrap an existing `reqwest::Client` (caller manages default headers).
    pub fn from_reqwest(
        base_url: &str,
        http: reqwest::Client,
        token: Arc<dyn TokenSource>,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// Append `/api/admin/monitoring/` unless the URL already ends with it.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;

        // Strip trailing slash for uniform handling
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with(MONITORING_PREFIX) {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}{MONITORING_PREFIX}/"));
        }

        Ok(url)
    }

    /// The normalized monitoring base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Transport ────────────────────────────────────────────────────

    fn url(&self, series: Series) -> Result<Url, Error> {
        Ok(self.base_url.join(&series.path())?)
    }

    async fn get<T: DeserializeOwned + Default>(
        &self,
        series: Series,
        params: &[(&str, &str)],
    ) -> Result<Payload<T>, Error> {
        Ok(Payload::from_raw(self.get_json(series, params).await?))
    }

    /// Parse a 2xx body as JSON without imposing a shape on it.
    async fn get_json(&self, series: Series, params: &[(&str, &str)]) -> Result<Value, Error> {
        let body = self.get_text(series, params).await?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    /// Issue the GET and return the raw body of a 2xx response.
    async fn get_text(&self, series: Series, params: &[(&str, &str)]) -> Result<String, Error> {
        let url = self.url(series)?;
        debug!(%series, "GET {url}");

        let mut request = self.http.get(url);
        if !params.is_empty() {
            request = request.query(params);
        }
        if let Some(token) = self.token.bearer_token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|e| Error::InvalidToken {
                    message: e.to_string(),
                })?;
            value.set_sensitive(true);
            request = request.header(AUTHORIZATION, value);
        }

        let resp = request.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if status.is_success() {
            Ok(body)
        } else {
            debug!(%series, status = status.as_u16(), "monitoring request rejected");
            Err(Error::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    // ── Series ───────────────────────────────────────────────────────

    /// `GET /health`
    pub async fn fetch_system_health(&self) -> Result<Payload<SystemHealth>, Error> {
        self.get(Series::Health, &[]).await
    }

    /// `GET /activity`
    pub async fn fetch_activity_stats(&self) -> Result<Payload<ActivityStats>, Error> {
        self.get(Series::Activity, &[]).await
    }

    /// `GET /traffic`
    pub async fn fetch_traffic(&self) -> Result<Payload<TrafficSnapshot>, Error> {
        self.get(Series::Traffic, &[]).await
    }

    /// `GET /trends`
    pub async fn fetch_patent_trends(&self) -> Result<Payload<PatentTrends>, Error> {
        self.get(Series::Trends, &[]).await
    }

    /// `GET /charts/{kind}`
    pub async fn fetch_chart(&self, kind: ChartKind) -> Result<Payload<Chart>, Error> {
        let raw = self.get_json(Series::Chart(kind), &[]).await?;
        let view = Chart::from_value(kind, &raw);
        Ok(Payload::new(raw, view))
    }

    /// `GET /all-data`, with optional `timeRange` / `category` filters.
    pub async fn fetch_all_data(
        &self,
        query: &MonitoringQuery,
    ) -> Result<Payload<MonitoringSnapshot>, Error> {
        self.get(Series::AllData, &query.params()).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::auth::StaticToken;

    fn client(base: &str) -> MonitoringClient {
        MonitoringClient::from_reqwest(
            base,
            reqwest::Client::new(),
            Arc::new(StaticToken::none()),
        )
        .unwrap()
    }

    #[test]
    fn root_url_gets_monitoring_prefix() {
        let c = client("http://localhost:8081");
        assert_eq!(
            c.base_url().as_str(),
            "http://localhost:8081/api/admin/monitoring/"
        );
    }

    #[test]
    fn existing_prefix_is_kept() {
        let c = client("https://admin.example.com/api/admin/monitoring/");
        assert_eq!(
            c.base_url().as_str(),
            "https://admin.example.com/api/admin/monitoring/"
        );
    }

    #[test]
    fn sub_path_deployments_are_preserved() {
        let c = client("https://example.com/patents");
        assert_eq!(
            c.url(Series::Chart(ChartKind::GrantRates)).unwrap().as_str(),
            "https://example.com/patents/api/admin/monitoring/charts/grant-rates"
        );
    }

    #[test]
    fn garbage_url_is_rejected() {
        let err = MonitoringClient::from_reqwest(
            "not a url",
            reqwest::Client::new(),
            Arc::new(StaticToken::none()),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
