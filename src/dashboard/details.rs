use crate::models::IcuRecord;

/// Rows shown in the recent-records table.
pub const DETAIL_LIMIT: usize = 10;

/// Most recent records first, at most `DETAIL_LIMIT`. Records sharing a
/// date keep their input order.
pub fn project_details(filtered: &[IcuRecord]) -> Vec<IcuRecord> {
    let mut sorted: Vec<&IcuRecord> = filtered.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.into_iter().take(DETAIL_LIMIT).cloned().collect()
}
