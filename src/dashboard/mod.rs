//! ICU dashboard pipeline: filters the full record set and derives the
//! KPI cards, three chart series and the recent-records table.
//!
//! Pure and synchronous: callers pass the complete record set in, nothing is
//! read from storage here. The filter runs first; KPIs, charts and details
//! each consume its output independently.

mod charts;
mod details;
mod filter;
mod kpis;
mod types;

pub use charts::*;
pub use details::*;
pub use filter::*;
pub use kpis::compute_kpis;
pub use types::*;

use crate::models::{FilterCriteria, IcuRecord};

/// Top-level assembly: the whole dashboard payload in a single call.
///
/// A filter that matches nothing returns `DashboardData::empty()` before any
/// aggregation runs. That shape has empty category charts too, unlike
/// `build_series`, which zero-fills categories for an empty filtered set.
pub fn build_dashboard(
    full: &[IcuRecord],
    criteria: &FilterCriteria,
) -> Result<DashboardData, DashboardError> {
    let filtered = filter_records(full, criteria);
    tracing::debug!(
        total = full.len(),
        matched = filtered.len(),
        date_range = criteria.date_range.as_str(),
        "Filtered ICU records"
    );

    if filtered.is_empty() {
        tracing::debug!("No records matched, returning empty dashboard");
        return Ok(DashboardData::empty());
    }

    let kpis = compute_kpis(&filtered)?;
    let charts = build_series(full, &filtered);
    let patient_details = project_details(&filtered);

    Ok(DashboardData {
        kpis,
        charts,
        patient_details,
    })
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::fixtures::{day, record};
    use crate::models::DateRange;

    /// 40 days cycling ICU-A Low, ICU-A Medium, ICU-B High, ICU-B High.
    fn sample() -> Vec<IcuRecord> {
        (1..=40)
            .map(|d| {
                let (unit, acuity) = match d % 4 {
                    1 => ("ICU-A", "Low"),
                    2 => ("ICU-A", "Medium"),
                    _ => ("ICU-B", "High"),
                };
                let source = if d % 3 == 0 { "Transfer" } else { "ER" };
                record(day(d), unit, acuity, source, d as f64, Some(2.0 + (d % 5) as f64))
            })
            .collect()
    }

    #[test]
    fn zero_matches_return_exact_empty_shape() {
        let full = sample();
        let criteria = FilterCriteria {
            unit: Some("ICU-A".into()),
            acuity_level: Some("High".into()),
            ..Default::default()
        };

        let data = build_dashboard(&full, &criteria).unwrap();
        assert_eq!(data, DashboardData::empty());

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kpis": {
                    "bed_occupancy": 0.0,
                    "patient_census": 0.0,
                    "ventilator_utilization": 0.0,
                    "avg_los": 0.0
                },
                "charts": {
                    "census_over_time": {"labels": [], "datasets": []},
                    "acuity_levels": {"labels": [], "datasets": []},
                    "admission_source": {"labels": [], "datasets": []}
                },
                "patient_details": []
            })
        );
    }

    #[test]
    fn empty_full_set_returns_empty_shape() {
        let data = build_dashboard(&[], &FilterCriteria::default()).unwrap();
        assert_eq!(data, DashboardData::empty());
    }

    #[test]
    fn unit_filter_keeps_full_acuity_axis() {
        let full = sample();
        let criteria = FilterCriteria {
            date_range: DateRange::All,
            unit: Some("ICU-B".into()),
            ..Default::default()
        };

        let data = build_dashboard(&full, &criteria).unwrap();
        assert_eq!(data.charts.acuity_levels.labels, vec!["Low", "Medium", "High"]);
        assert_eq!(data.charts.acuity_levels.datasets[0].data, vec![0.0, 0.0, 20.0]);
    }

    #[test]
    fn category_labels_independent_of_criteria() {
        let full = sample();
        let all = build_dashboard(&full, &FilterCriteria {
            date_range: DateRange::All,
            ..Default::default()
        })
        .unwrap();

        for criteria in [
            FilterCriteria::default(),
            FilterCriteria {
                date_range: DateRange::Last7Days,
                ..Default::default()
            },
            FilterCriteria {
                admission_source: Some("Transfer".into()),
                ..Default::default()
            },
        ] {
            let data = build_dashboard(&full, &criteria).unwrap();
            assert_eq!(data.charts.acuity_levels.labels, all.charts.acuity_levels.labels);
            assert_eq!(
                data.charts.admission_source.labels,
                all.charts.admission_source.labels
            );
        }
    }

    #[test]
    fn last_7_days_feeds_every_section() {
        let full = sample();
        let criteria = FilterCriteria {
            date_range: DateRange::Last7Days,
            ..Default::default()
        };

        let data = build_dashboard(&full, &criteria).unwrap();

        assert_eq!(data.kpis.patient_census, 40.0);
        assert_eq!(data.charts.census_over_time.labels.len(), 7);
        assert_eq!(data.charts.census_over_time.labels[0], "Feb 03");
        assert_eq!(data.patient_details.len(), 7);
        assert_eq!(data.patient_details[0].date, day(40));
        let counted: f64 = data.charts.acuity_levels.datasets[0].data.iter().sum();
        assert_eq!(counted, 7.0);
    }

    #[test]
    fn kpi_snapshot_matches_latest_filtered_record() {
        let full = sample();
        let criteria = FilterCriteria {
            unit: Some("ICU-A".into()),
            ..Default::default()
        };

        let data = build_dashboard(&full, &criteria).unwrap();
        // Latest ICU-A day is 38.
        assert_eq!(data.kpis.patient_census, 38.0);
        assert_eq!(data.patient_details[0].date, day(38));
        assert!(data.patient_details.iter().all(|r| r.unit == "ICU-A"));
    }

    #[test]
    fn detail_listing_is_bounded() {
        let full = sample();
        let data = build_dashboard(&full, &FilterCriteria::default()).unwrap();
        assert_eq!(data.patient_details.len(), DETAIL_LIMIT);
        assert!(data
            .patient_details
            .windows(2)
            .all(|w| w[0].date >= w[1].date));
    }

    #[test]
    fn missing_length_of_stay_everywhere_gives_zero_average() {
        let full: Vec<IcuRecord> = (1..=5)
            .map(|d| record(day(d), "ICU-A", "Low", "ER", 3.0, None))
            .collect();
        let data = build_dashboard(&full, &FilterCriteria::default()).unwrap();
        assert_eq!(data.kpis.avg_los, 0.0);
    }

    #[test]
    fn malformed_latest_record_fails_whole_request() {
        let mut full = sample();
        full.last_mut().unwrap().patient_census = f64::INFINITY;

        let err = build_dashboard(&full, &FilterCriteria::default()).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::NonFiniteMetric {
                field: "patient_census",
                ..
            }
        ));
    }
}
