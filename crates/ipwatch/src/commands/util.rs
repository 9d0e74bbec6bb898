//! Shared helpers for command handlers.

use ipwatch_core::{ChartKind, Fetched, MonitoringQuery, PatentCategory, TimeRange};

use crate::cli::{CategoryArg, ChartKindArg, FilterArgs, GlobalOpts, TimeRangeArg};
use crate::error::CliError;
use crate::output;

/// Unwrap a fetch result for display.
///
/// Placeholder data is passed through with a stderr warning, or turned into
/// an error under `--strict`.
pub fn settle<T>(fetched: Fetched<T>, global: &GlobalOpts) -> Result<T, CliError> {
    match fetched {
        Fetched::Live(data) => Ok(data),
        Fetched::Fallback { data, failure } => {
            if global.strict {
                return Err(failure.into());
            }
            output::warn_fallback(&failure, &global.color);
            Ok(data)
        }
    }
}

/// Build the aggregate query from `--time-range` / `--category`.
pub fn query(filter: &FilterArgs) -> MonitoringQuery {
    let mut query = MonitoringQuery::default();
    if let Some(range) = filter.time_range {
        query = query.time_range(range.into());
    }
    if let Some(category) = filter.category {
        query = query.category(category.into());
    }
    query
}

// ── Arg → API enum conversions ───────────────────────────────────────

impl From<ChartKindArg> for ChartKind {
    fn from(arg: ChartKindArg) -> Self {
        match arg {
            ChartKindArg::UserActivity => Self::UserActivity,
            ChartKindArg::FeatureUsage => Self::FeatureUsage,
            ChartKindArg::SessionDuration => Self::SessionDuration,
            ChartKindArg::FilingTrends => Self::FilingTrends,
            ChartKindArg::Categories => Self::Categories,
            ChartKindArg::GrantRates => Self::GrantRates,
            ChartKindArg::Traffic => Self::Traffic,
            ChartKindArg::ResponsePerformance => Self::ResponsePerformance,
            ChartKindArg::ProcessingTimes => Self::ProcessingTimes,
        }
    }
}

impl From<TimeRangeArg> for TimeRange {
    fn from(arg: TimeRangeArg) -> Self {
        match arg {
            TimeRangeArg::Week => Self::Week,
            TimeRangeArg::Month => Self::Month,
            TimeRangeArg::Quarter => Self::Quarter,
            TimeRangeArg::Year => Self::Year,
        }
    }
}

impl From<CategoryArg> for PatentCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::All => Self::All,
            CategoryArg::Ai => Self::Ai,
            CategoryArg::Biotech => Self::Biotech,
            CategoryArg::Energy => Self::Energy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_become_query_params() {
        let filter = FilterArgs {
            time_range: Some(TimeRangeArg::Year),
            category: Some(CategoryArg::Biotech),
        };
        assert_eq!(
            query(&filter).params(),
            vec![("timeRange", "1y"), ("category", "biotech")]
        );
    }

    #[test]
    fn no_filters_means_no_params() {
        let filter = FilterArgs {
            time_range: None,
            category: None,
        };
        assert!(query(&filter).is_empty());
    }
}
