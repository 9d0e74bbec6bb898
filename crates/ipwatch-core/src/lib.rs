// ipwatch-core: Monitoring facade between ipwatch-api and the CLI.

pub mod config;
pub mod error;
pub mod fallback;
pub mod fetched;
pub mod monitor;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_API_URL, MonitorConfig};
pub use error::{CoreError, FailureReason, FetchFailure};
pub use fetched::Fetched;
pub use monitor::{MIN_WATCH_INTERVAL, Monitor};

// Re-export the wire types so consumers rarely need ipwatch-api directly.
pub use ipwatch_api::{
    ActivityStats, CategoryShare, Chart, ChartData, ChartKind, EndpointPerformance, FeatureUsage,
    FieldProcessingTime, FilingTrendPoint, GrantRatePoint, MonitoringQuery, MonitoringSnapshot,
    PatentCategory, PatentTrends, Payload, RealtimeStats, Series, SessionDurationBucket,
    SystemHealth, TimeRange, TrafficPoint, TrafficSnapshot, UserActivityPoint,
};
