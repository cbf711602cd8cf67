use super::types::{DashboardError, KpiSet};
use crate::models::IcuRecord;

/// Snapshot KPIs come from the latest record; `avg_los` averages the whole
/// filtered set. An empty set yields all zeros.
///
/// When several records share the latest date, the last of them in input
/// order wins (the same record a stable ascending date sort leaves last).
pub fn compute_kpis(filtered: &[IcuRecord]) -> Result<KpiSet, DashboardError> {
    let Some(latest) = latest_record(filtered) else {
        return Ok(KpiSet::default());
    };

    Ok(KpiSet {
        bed_occupancy: finite(latest, "bed_occupancy", latest.bed_occupancy)?,
        patient_census: finite(latest, "patient_census", latest.patient_census)?,
        ventilator_utilization: finite(
            latest,
            "ventilator_utilization",
            latest.ventilator_utilization,
        )?,
        avg_los: round_one_decimal(mean_length_of_stay(filtered).unwrap_or(0.0)),
    })
}

/// `max_by_key` returns the last of equal maxima.
pub(crate) fn latest_record(records: &[IcuRecord]) -> Option<&IcuRecord> {
    records.iter().max_by_key(|r| r.date)
}

/// Mean over known values; `None` when there are none.
fn mean_length_of_stay(records: &[IcuRecord]) -> Option<f64> {
    let (sum, count) = records
        .iter()
        .filter_map(IcuRecord::known_length_of_stay)
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));

    (count > 0).then(|| sum / count as f64)
}

/// Half away from zero.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn finite(record: &IcuRecord, field: &'static str, value: f64) -> Result<f64, DashboardError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DashboardError::NonFiniteMetric {
            field,
            date: record.date,
        })
    }
}
