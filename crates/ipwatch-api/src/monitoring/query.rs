// Optional filters for the combined `/all-data` endpoint.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Reporting window for the aggregate trends.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
pub enum TimeRange {
    #[serde(rename = "7d")]
    #[strum(serialize = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    #[strum(serialize = "30d")]
    Month,
    #[serde(rename = "90d")]
    #[strum(serialize = "90d")]
    Quarter,
    #[serde(rename = "1y")]
    #[strum(serialize = "1y")]
    Year,
}

/// Technology category filter.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PatentCategory {
    #[default]
    All,
    Ai,
    Biotech,
    Energy,
}

/// Query parameters for `/all-data`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<PatentCategory>,
}

impl MonitoringQuery {
    pub fn time_range(mut self, range: TimeRange) -> Self {
        self.time_range = Some(range);
        self
    }

    pub fn category(mut self, category: PatentCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.time_range.is_none() && self.category.is_none()
    }

    /// Query pairs in wire order.
    pub fn params(&self) -> Vec<(&'static str, &'static str)> {
        let mut params: Vec<(&'static str, &'static str)> = Vec::with_capacity(2);
        if let Some(range) = self.time_range {
            params.push(("timeRange", range.into()));
        }
        if let Some(category) = self.category {
            params.push(("category", category.into()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::str::FromStr;

    use super::*;

    #[test]
    fn empty_query_sends_nothing() {
        let query = MonitoringQuery::default();
        assert!(query.is_empty());
        assert!(query.params().is_empty());
    }

    #[test]
    fn params_use_wire_names() {
        let query = MonitoringQuery::default()
            .time_range(TimeRange::Quarter)
            .category(PatentCategory::Biotech);
        assert_eq!(
            query.params(),
            vec![("timeRange", "90d"), ("category", "biotech")]
        );
    }

    #[test]
    fn strum_and_wire_names_agree() {
        assert_eq!(TimeRange::from_str("1y").unwrap(), TimeRange::Year);
        assert_eq!(TimeRange::Week.to_string(), "7d");
        assert_eq!(PatentCategory::from_str("ai").unwrap(), PatentCategory::Ai);
        assert_eq!(PatentCategory::Energy.as_ref(), "energy");
    }
}
