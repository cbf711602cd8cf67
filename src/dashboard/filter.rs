use chrono::Duration;

use crate::models::{FilterCriteria, IcuRecord};

/// Applies the date window, then unit, acuity and admission-source
/// equality filters. Surviving records keep their input order.
///
/// The date window is anchored on the latest date in `records`, not on
/// today's date.
pub fn filter_records(records: &[IcuRecord], criteria: &FilterCriteria) -> Vec<IcuRecord> {
    let Some(latest) = records.iter().map(|r| r.date).max() else {
        return Vec::new();
    };

    // A window reaching past the earliest representable date has no lower bound.
    let window_start = criteria
        .date_range
        .lookback_days()
        .and_then(|days| latest.checked_sub_signed(Duration::days(days)));

    records
        .iter()
        .filter(|r| window_start.map_or(true, |start| r.date >= start))
        .filter(|r| matches(&criteria.unit, &r.unit))
        .filter(|r| matches(&criteria.acuity_level, &r.acuity_level))
        .filter(|r| matches(&criteria.admission_source, &r.admission_source))
        .cloned()
        .collect()
}

fn matches(constraint: &Option<String>, value: &str) -> bool {
    constraint.as_deref().map_or(true, |wanted| wanted == value)
}
