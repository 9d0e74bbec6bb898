// Monitoring payload types.
//
// Field names follow the backend's camelCase JSON. Decoding is lenient: a
// field that is missing or has an unexpected type takes its default, and
// unknown keys are ignored. The untouched body travels alongside in
// `Payload`, so nothing the backend sends is lost.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::series::ChartKind;

// ── Lenient field decoding ───────────────────────────────────────────

mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Non-negative integer from a JSON number or numeric string, else 0.
    pub fn count<'de, D, N>(d: D) -> Result<N, D::Error>
    where
        D: Deserializer<'de>,
        N: TryFrom<u64> + Default,
    {
        let n = match Value::deserialize(d)? {
            Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(whole)),
            Value::String(s) => s.trim().parse::<f64>().ok().and_then(whole),
            _ => None,
        };
        Ok(n.and_then(|n| N::try_from(n).ok()).unwrap_or_default())
    }

    #[allow(
        clippy::as_conversions,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn whole(f: f64) -> Option<u64> {
        (f.is_finite() && f >= 0.0).then(|| f.round() as u64)
    }

    /// Float from a JSON number or numeric string, else 0.0.
    pub fn decimal<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64().unwrap_or_default(),
            Value::String(s) => s.trim().parse().unwrap_or_default(),
            _ => 0.0,
        })
    }

    /// Any scalar as text, else empty.
    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => String::new(),
        })
    }

    pub fn list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(items(&Value::deserialize(d)?))
    }

    /// Elements of an array, or the values of an object, that decode as `T`.
    pub fn items<T: DeserializeOwned>(value: &Value) -> Vec<T> {
        let decode = |item: &Value| T::deserialize(item).ok();
        match value {
            Value::Array(items) => items.iter().filter_map(decode).collect(),
            Value::Object(map) => map.values().filter_map(decode).collect(),
            _ => Vec::new(),
        }
    }

    /// A nested object, defaulted when it is missing or not an object.
    pub fn nested<'de, D, T>(d: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(T::deserialize(&Value::deserialize(d)?).unwrap_or_default())
    }
}

// ── Scalar series ────────────────────────────────────────────────────

/// Host resource usage and responsiveness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemHealth {
    /// Percent, 0–100.
    #[serde(deserialize_with = "lenient::count")]
    pub cpu_usage: u32,
    /// Percent, 0–100.
    #[serde(deserialize_with = "lenient::count")]
    pub memory_usage: u32,
    /// Percent, 0–100.
    #[serde(deserialize_with = "lenient::count")]
    pub disk_usage: u32,
    /// Free-text duration, e.g. `"2 days, 14 hours"`.
    #[serde(deserialize_with = "lenient::text")]
    pub uptime: String,
    #[serde(deserialize_with = "lenient::count")]
    pub active_threads: u32,
    /// Milliseconds.
    #[serde(deserialize_with = "lenient::count")]
    pub response_time: u32,
}

/// Platform usage counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivityStats {
    #[serde(deserialize_with = "lenient::count")]
    pub total_users: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub active_users: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub total_sessions: u64,
    /// Minutes.
    #[serde(deserialize_with = "lenient::count")]
    pub average_session_duration: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub page_views: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub unique_visitors: u64,
}

/// Patent pipeline totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatentTrends {
    #[serde(deserialize_with = "lenient::count")]
    pub total_patents: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub pending_applications: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub granted_patents: u64,
    /// Hours.
    #[serde(deserialize_with = "lenient::count")]
    pub average_processing_time: u32,
    /// Percent, 0–100.
    #[serde(deserialize_with = "lenient::count")]
    pub success_rate: u32,
}

// ── Traffic ──────────────────────────────────────────────────────────

/// One second of request traffic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrafficPoint {
    #[serde(deserialize_with = "lenient::text")]
    pub time: String,
    #[serde(deserialize_with = "lenient::count")]
    pub requests: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub users: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub errors: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RealtimeStats {
    #[serde(deserialize_with = "lenient::count")]
    pub current_users: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub requests_per_second: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub active_connections: u32,
    /// MB/s.
    #[serde(deserialize_with = "lenient::count")]
    pub bandwidth: u32,
}

/// The last minute of traffic, oldest point first, plus current counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrafficSnapshot {
    #[serde(deserialize_with = "lenient::list")]
    pub traffic_data: Vec<TrafficPoint>,
    #[serde(deserialize_with = "lenient::nested")]
    pub realtime_stats: RealtimeStats,
}

// ── Chart series ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserActivityPoint {
    #[serde(deserialize_with = "lenient::text")]
    pub date: String,
    #[serde(deserialize_with = "lenient::count")]
    pub active_users: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub new_users: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub returning_users: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureUsage {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::count")]
    pub usage: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub percentage: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionDurationBucket {
    #[serde(deserialize_with = "lenient::text")]
    pub duration: String,
    #[serde(deserialize_with = "lenient::count")]
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilingTrendPoint {
    #[serde(deserialize_with = "lenient::text")]
    pub month: String,
    #[serde(deserialize_with = "lenient::count")]
    pub filings: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub grants: u32,
}

/// Share of filings in a technology category. `color` is a hex swatch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryShare {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::count")]
    pub value: u32,
    #[serde(deserialize_with = "lenient::text")]
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrantRatePoint {
    #[serde(deserialize_with = "lenient::text")]
    pub month: String,
    #[serde(deserialize_with = "lenient::count")]
    pub grant_rate: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub approval_rate: u32,
}

/// Average latency of one backend endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EndpointPerformance {
    #[serde(deserialize_with = "lenient::text")]
    pub endpoint: String,
    /// Milliseconds.
    #[serde(deserialize_with = "lenient::decimal")]
    pub avg_response: f64,
    #[serde(deserialize_with = "lenient::count")]
    pub requests: u64,
}

/// Average examination time for one technology field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldProcessingTime {
    #[serde(deserialize_with = "lenient::text")]
    pub field: String,
    #[serde(deserialize_with = "lenient::decimal")]
    pub avg_days: f64,
}

/// One chart series payload. Serializes as the bare array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Chart {
    UserActivity(Vec<UserActivityPoint>),
    FeatureUsage(Vec<FeatureUsage>),
    SessionDuration(Vec<SessionDurationBucket>),
    FilingTrends(Vec<FilingTrendPoint>),
    Categories(Vec<CategoryShare>),
    GrantRates(Vec<GrantRatePoint>),
    Traffic(Vec<TrafficPoint>),
    ResponsePerformance(Vec<EndpointPerformance>),
    ProcessingTimes(Vec<FieldProcessingTime>),
}

impl Chart {
    /// Typed view of a chart body. The kind selects the element type, since
    /// the arrays are not self-describing. Elements that are not objects are
    /// skipped.
    pub fn from_value(kind: ChartKind, body: &Value) -> Self {
        use lenient::items;

        match kind {
            ChartKind::UserActivity => Self::UserActivity(items(body)),
            ChartKind::FeatureUsage => Self::FeatureUsage(items(body)),
            ChartKind::SessionDuration => Self::SessionDuration(items(body)),
            ChartKind::FilingTrends => Self::FilingTrends(items(body)),
            ChartKind::Categories => Self::Categories(items(body)),
            ChartKind::GrantRates => Self::GrantRates(items(body)),
            ChartKind::Traffic => Self::Traffic(items(body)),
            ChartKind::ResponsePerformance => Self::ResponsePerformance(items(body)),
            ChartKind::ProcessingTimes => Self::ProcessingTimes(items(body)),
        }
    }

    pub fn kind(&self) -> ChartKind {
        match self {
            Self::UserActivity(_) => ChartKind::UserActivity,
            Self::FeatureUsage(_) => ChartKind::FeatureUsage,
            Self::SessionDuration(_) => ChartKind::SessionDuration,
            Self::FilingTrends(_) => ChartKind::FilingTrends,
            Self::Categories(_) => ChartKind::Categories,
            Self::GrantRates(_) => ChartKind::GrantRates,
            Self::Traffic(_) => ChartKind::Traffic,
            Self::ResponsePerformance(_) => ChartKind::ResponsePerformance,
            Self::ProcessingTimes(_) => ChartKind::ProcessingTimes,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::UserActivity(v) => v.len(),
            Self::FeatureUsage(v) => v.len(),
            Self::SessionDuration(v) => v.len(),
            Self::FilingTrends(v) => v.len(),
            Self::Categories(v) => v.len(),
            Self::GrantRates(v) => v.len(),
            Self::Traffic(v) => v.len(),
            Self::ResponsePerformance(v) => v.len(),
            Self::ProcessingTimes(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The six chart series nested in the aggregate payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartData {
    #[serde(deserialize_with = "lenient::list")]
    pub user_activity: Vec<UserActivityPoint>,
    #[serde(deserialize_with = "lenient::list")]
    pub feature_usage: Vec<FeatureUsage>,
    #[serde(deserialize_with = "lenient::list")]
    pub session_duration: Vec<SessionDurationBucket>,
    #[serde(deserialize_with = "lenient::list")]
    pub filing_trends: Vec<FilingTrendPoint>,
    #[serde(deserialize_with = "lenient::list")]
    pub categories: Vec<CategoryShare>,
    #[serde(deserialize_with = "lenient::list")]
    pub grant_rates: Vec<GrantRatePoint>,
}

impl ChartData {
    /// Clone one series out as a standalone [`Chart`]. `None` for kinds the
    /// aggregate does not carry.
    pub fn chart(&self, kind: ChartKind) -> Option<Chart> {
        Some(match kind {
            ChartKind::UserActivity => Chart::UserActivity(self.user_activity.clone()),
            ChartKind::FeatureUsage => Chart::FeatureUsage(self.feature_usage.clone()),
            ChartKind::SessionDuration => Chart::SessionDuration(self.session_duration.clone()),
            ChartKind::FilingTrends => Chart::FilingTrends(self.filing_trends.clone()),
            ChartKind::Categories => Chart::Categories(self.categories.clone()),
            ChartKind::GrantRates => Chart::GrantRates(self.grant_rates.clone()),
            ChartKind::Traffic | ChartKind::ResponsePerformance | ChartKind::ProcessingTimes => {
                return None;
            }
        })
    }
}

// ── Aggregate ────────────────────────────────────────────────────────

/// Everything the `/all-data` endpoint returns in one round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MonitoringSnapshot {
    #[serde(deserialize_with = "lenient::nested")]
    pub system_health: SystemHealth,
    #[serde(deserialize_with = "lenient::nested")]
    pub activity_stats: ActivityStats,
    #[serde(deserialize_with = "lenient::nested")]
    pub patent_trends: PatentTrends,
    #[serde(deserialize_with = "lenient::nested")]
    pub traffic_data: TrafficSnapshot,
    #[serde(deserialize_with = "lenient::nested")]
    pub chart_data: ChartData,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn system_health_uses_camel_case() {
        let health = SystemHealth {
            cpu_usage: 12,
            memory_usage: 40,
            disk_usage: 71,
            uptime: "2 days, 14 hours".into(),
            active_threads: 33,
            response_time: 120,
        };
        assert_eq!(
            serde_json::to_value(&health).unwrap(),
            json!({
                "cpuUsage": 12,
                "memoryUsage": 40,
                "diskUsage": 71,
                "uptime": "2 days, 14 hours",
                "activeThreads": 33,
                "responseTime": 120
            })
        );
    }

    #[test]
    fn missing_fields_take_defaults() {
        let body = json!({"cpuUsage": 1, "memoryUsage": 2, "diskUsage": 3});
        let health = SystemHealth::deserialize(&body).unwrap();
        assert_eq!(health.cpu_usage, 1);
        assert_eq!(health.uptime, "");
        assert_eq!(health.response_time, 0);
    }

    #[test]
    fn mistyped_fields_are_coerced_or_defaulted() {
        let body = json!({
            "cpuUsage": 41.6,
            "memoryUsage": "55",
            "diskUsage": -3,
            "uptime": 3600,
            "activeThreads": {"nested": true},
            "responseTime": null
        });
        let health = SystemHealth::deserialize(&body).unwrap();
        assert_eq!(health.cpu_usage, 42);
        assert_eq!(health.memory_usage, 55);
        assert_eq!(health.disk_usage, 0);
        assert_eq!(health.uptime, "3600");
        assert_eq!(health.active_threads, 0);
        assert_eq!(health.response_time, 0);
    }

    #[test]
    fn traffic_points_may_arrive_keyed_by_time() {
        let body = json!({
            "trafficData": {
                "10:00:01": {"time": "10:00:01", "requests": 4, "users": 2, "errors": 0},
                "10:00:02": {"time": "10:00:02", "requests": 7, "users": 3, "errors": 1}
            },
            "realtimeStats": "unavailable"
        });
        let traffic = TrafficSnapshot::deserialize(&body).unwrap();
        assert_eq!(traffic.traffic_data.len(), 2);
        assert_eq!(traffic.traffic_data[1].requests, 7);
        assert_eq!(traffic.realtime_stats, RealtimeStats::default());
    }

    #[test]
    fn chart_view_follows_kind() {
        let body = json!([{"duration": "0-5 min", "count": 140}, 17]);
        let chart = Chart::from_value(ChartKind::SessionDuration, &body);
        assert_eq!(chart.kind(), ChartKind::SessionDuration);
        assert_eq!(chart.len(), 1);

        let none = Chart::from_value(ChartKind::Categories, &json!({"error": "nope"}));
        assert!(none.is_empty());
    }

    #[test]
    fn response_performance_keeps_fractional_latency() {
        let body = json!([{"endpoint": "/api/patents", "avgResponse": 123.5, "requests": 9}]);
        let Chart::ResponsePerformance(rows) =
            Chart::from_value(ChartKind::ResponsePerformance, &body)
        else {
            panic!("wrong chart variant");
        };
        assert_eq!(rows[0].endpoint, "/api/patents");
        assert!((rows[0].avg_response - 123.5).abs() < f64::EPSILON);
        assert_eq!(rows[0].requests, 9);
    }

    #[test]
    fn chart_serializes_as_bare_array() {
        let chart = Chart::GrantRates(vec![GrantRatePoint {
            month: "Oct 2026".into(),
            grant_rate: 81,
            approval_rate: 77,
        }]);
        assert_eq!(
            serde_json::to_value(&chart).unwrap(),
            json!([{"month": "Oct 2026", "grantRate": 81, "approvalRate": 77}])
        );
    }

    #[test]
    fn aggregate_only_carries_six_charts() {
        let data = ChartData::default();
        assert!(data.chart(ChartKind::Categories).is_some());
        assert!(data.chart(ChartKind::ProcessingTimes).is_none());
    }
}
