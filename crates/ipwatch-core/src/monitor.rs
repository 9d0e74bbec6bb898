// ── Monitoring facade ──
//
// One wrapper per series. Each issues exactly one request and, on any
// failure, logs it and substitutes the matching fallback payload. Live
// bodies pass through verbatim. The
// aggregate wrapper never fans out to the per-series endpoints: once
// `/all-data` fails, everything is synthesized locally.

use std::sync::Arc;
use std::time::Duration;

use async_stream::stream;
use chrono::Local;
use futures_util::Stream;
use serde::Serialize;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use ipwatch_api::{
    ActivityStats, Chart, ChartKind, MonitoringClient, MonitoringQuery, MonitoringSnapshot,
    PatentTrends, Payload, Series, SystemHealth, TrafficSnapshot,
};

use crate::config::MonitorConfig;
use crate::error::{CoreError, FetchFailure};
use crate::fallback;
use crate::fetched::Fetched;

/// Shortest accepted polling period for [`Monitor::watch`].
pub const MIN_WATCH_INTERVAL: Duration = Duration::from_millis(100);

/// Entry point for monitoring data.
///
/// Cheap to clone; clones share the underlying connection pool and token
/// source.
#[derive(Debug, Clone)]
pub struct Monitor {
    client: Arc<MonitoringClient>,
}

impl Monitor {
    pub fn new(config: &MonitorConfig) -> Result<Self, CoreError> {
        let client = MonitoringClient::new(
            config.url.as_str(),
            Arc::clone(&config.token),
            &config.transport(),
        )?;
        debug!(base_url = %client.base_url(), "monitor configured");
        Ok(Self::from_client(client))
    }

    pub fn from_client(client: MonitoringClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// The raw client, for callers that want `Result`s instead of fallbacks.
    pub fn client(&self) -> &MonitoringClient {
        &self.client
    }

    // ── Series wrappers ──────────────────────────────────────────────

    pub async fn system_health(&self) -> Fetched<Payload<SystemHealth>> {
        let result = self.client.fetch_system_health().await;
        resolve(Series::Health, result, || {
            fallback::system_health(&mut rand::thread_rng())
        })
    }

    pub async fn activity_stats(&self) -> Fetched<Payload<ActivityStats>> {
        let result = self.client.fetch_activity_stats().await;
        resolve(Series::Activity, result, || {
            fallback::activity_stats(&mut rand::thread_rng())
        })
    }

    pub async fn traffic(&self) -> Fetched<Payload<TrafficSnapshot>> {
        let result = self.client.fetch_traffic().await;
        resolve(Series::Traffic, result, || {
            fallback::traffic(&mut rand::thread_rng(), &Local::now())
        })
    }

    pub async fn patent_trends(&self) -> Fetched<Payload<PatentTrends>> {
        let result = self.client.fetch_patent_trends().await;
        resolve(Series::Trends, result, || {
            fallback::patent_trends(&mut rand::thread_rng())
        })
    }

    pub async fn chart(&self, kind: ChartKind) -> Fetched<Payload<Chart>> {
        let result = self.client.fetch_chart(kind).await;
        resolve(Series::Chart(kind), result, || {
            fallback::chart(kind, &mut rand::thread_rng(), &Local::now())
        })
    }

    // ── Aggregate ────────────────────────────────────────────────────

    /// Every series in one round trip.
    pub async fn all_data(&self) -> Fetched<Payload<MonitoringSnapshot>> {
        self.all_data_filtered(&MonitoringQuery::default()).await
    }

    /// [`all_data`](Self::all_data) with `timeRange` / `category` filters.
    pub async fn all_data_filtered(
        &self,
        query: &MonitoringQuery,
    ) -> Fetched<Payload<MonitoringSnapshot>> {
        let result = self.client.fetch_all_data(query).await;
        resolve(Series::AllData, result, || {
            fallback::snapshot(&mut rand::thread_rng(), &Local::now())
        })
    }

    /// Poll the aggregate endpoint every `every`, first tick immediately.
    ///
    /// Ticks that fall behind a slow request are delayed, not bunched, so
    /// at most one request is in flight. Dropping the stream stops polling.
    pub fn watch(
        &self,
        query: MonitoringQuery,
        every: Duration,
    ) -> impl Stream<Item = Fetched<Payload<MonitoringSnapshot>>> + Send + '_ {
        let every = every.max(MIN_WATCH_INTERVAL);
        stream! {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                yield self.all_data_filtered(&query).await;
            }
        }
    }
}

/// Turn a fetch result into a `Fetched`, synthesizing on failure.
fn resolve<T: Serialize>(
    series: Series,
    result: Result<Payload<T>, ipwatch_api::Error>,
    fallback: impl FnOnce() -> T,
) -> Fetched<Payload<T>> {
    match result {
        Ok(data) => Fetched::Live(data),
        Err(err) => {
            let failure = FetchFailure::new(series, &err);
            warn!(
                %series,
                reason = %failure.reason,
                transient = err.is_transient(),
                error = %err,
                "failed to fetch {}, serving fallback data",
                series.label()
            );
            Fetched::Fallback {
                data: Payload::from_view(fallback()),
                failure,
            }
        }
    }
}
