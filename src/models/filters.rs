use serde::Deserialize;

/// Query value meaning "no unit restriction".
pub const ALL_UNITS: &str = "All ICU Units";

/// Trailing date window, anchored on the latest date in the data set
/// rather than on the wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    Last7Days,
    #[default]
    Last30Days,
    All,
}

impl DateRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Last7Days => "Last 7 Days",
            Self::Last30Days => "Last 30 Days",
            Self::All => "All",
        }
    }

    /// Unrecognized labels mean no date restriction.
    pub fn parse(s: &str) -> Self {
        match s {
            "Last 7 Days" => Self::Last7Days,
            "Last 30 Days" => Self::Last30Days,
            _ => Self::All,
        }
    }

    /// Days to look back from the anchor date, inclusive of the anchor.
    pub fn lookback_days(&self) -> Option<i64> {
        match self {
            Self::Last7Days => Some(6),
            Self::Last30Days => Some(29),
            Self::All => None,
        }
    }
}

/// Raw `/api/data` query string.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub unit: Option<String>,
    pub date_range: Option<String>,
    pub acuity_level: Option<String>,
    pub admission_source: Option<String>,
}

/// Constraints applied to the record set. `None` passes everything through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub date_range: DateRange,
    pub unit: Option<String>,
    pub acuity_level: Option<String>,
    pub admission_source: Option<String>,
}

impl From<DashboardQuery> for FilterCriteria {
    fn from(query: DashboardQuery) -> Self {
        let date_range = query
            .date_range
            .as_deref()
            .map(DateRange::parse)
            .unwrap_or_default();

        Self {
            date_range,
            unit: query.unit.filter(|u| u != ALL_UNITS),
            acuity_level: query.acuity_level.filter(|v| !v.is_empty()),
            admission_source: query.admission_source.filter(|v| !v.is_empty()),
        }
    }
}
