// Admin monitoring API
//
// One GET endpoint per monitoring series plus the combined `/all-data`
// endpoint. Bodies are kept verbatim in `Payload`; the typed models are
// shared with the fallback generators in ipwatch-core.

pub mod client;
pub mod models;
pub mod payload;
pub mod query;
pub mod series;

pub use client::{MONITORING_PREFIX, MonitoringClient};
pub use models::{
    ActivityStats, CategoryShare, Chart, ChartData, EndpointPerformance, FeatureUsage,
    FieldProcessingTime, FilingTrendPoint, GrantRatePoint, MonitoringSnapshot, PatentTrends,
    RealtimeStats, SessionDurationBucket, SystemHealth, TrafficPoint, TrafficSnapshot,
    UserActivityPoint,
};
pub use payload::Payload;
pub use query::{MonitoringQuery, PatentCategory, TimeRange};
pub use series::{ChartKind, Series};
