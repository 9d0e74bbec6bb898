// Monitoring series and their endpoint paths.
//
// Every series maps to exactly one GET path under the monitoring base URL.
// Chart series share the `charts/` prefix. Six of them are also nested in
// the `/all-data` aggregate; the rest are only served standalone.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// A chart data series.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ChartKind {
    UserActivity,
    FeatureUsage,
    SessionDuration,
    FilingTrends,
    Categories,
    GrantRates,
    Traffic,
    ResponsePerformance,
    ProcessingTimes,
}

impl ChartKind {
    /// The charts carried under `chartData` in the aggregate payload.
    pub const AGGREGATED: [ChartKind; 6] = [
        ChartKind::UserActivity,
        ChartKind::FeatureUsage,
        ChartKind::SessionDuration,
        ChartKind::FilingTrends,
        ChartKind::Categories,
        ChartKind::GrantRates,
    ];

    pub fn is_aggregated(self) -> bool {
        Self::AGGREGATED.contains(&self)
    }
}

/// A named monitoring metric group with its own endpoint.
///
/// `Display` yields the endpoint name (`health`, `user-activity`, `all-data`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Series {
    Health,
    Activity,
    Traffic,
    Trends,
    Chart(ChartKind),
    AllData,
}

impl Series {
    /// Every series, charts expanded, in endpoint-table order.
    pub const ALL: [Series; 14] = [
        Series::AllData,
        Series::Health,
        Series::Activity,
        Series::Traffic,
        Series::Trends,
        Series::Chart(ChartKind::UserActivity),
        Series::Chart(ChartKind::FeatureUsage),
        Series::Chart(ChartKind::SessionDuration),
        Series::Chart(ChartKind::FilingTrends),
        Series::Chart(ChartKind::Categories),
        Series::Chart(ChartKind::GrantRates),
        Series::Chart(ChartKind::Traffic),
        Series::Chart(ChartKind::ResponsePerformance),
        Series::Chart(ChartKind::ProcessingTimes),
    ];

    /// Path relative to the monitoring base URL (no leading slash).
    pub fn path(self) -> String {
        match self {
            Self::Chart(kind) => format!("charts/{kind}"),
            other => other.as_ref().to_owned(),
        }
    }

    /// Human-readable label for log lines and warnings.
    pub fn label(self) -> String {
        match self {
            Self::Health => "system health".into(),
            Self::Activity => "activity stats".into(),
            Self::Traffic => "traffic data".into(),
            Self::Trends => "patent trends".into(),
            Self::Chart(kind) => format!("{} chart", kind.as_ref().replace('-', " ")),
            Self::AllData => "all monitoring data".into(),
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chart(kind) => fmt::Display::fmt(kind, f),
            other => f.write_str(other.as_ref()),
        }
    }
}

impl From<ChartKind> for Series {
    fn from(kind: ChartKind) -> Self {
        Self::Chart(kind)
    }
}
