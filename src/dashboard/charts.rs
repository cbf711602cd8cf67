use std::collections::HashMap;

use super::types::{ChartColor, ChartData, ChartDataset, Charts};
use crate::models::IcuRecord;

/// Points shown on the census time series.
pub const TIME_SERIES_POINTS: usize = 30;

/// Static bed-availability reference line drawn under the census series.
pub const BED_AVAILABILITY_BASELINE: f64 = 50.0;

const CENSUS_COLOR: &str = "#4A90E2";
const BASELINE_FILL: &str = "rgba(74, 144, 226, 0.1)";
const ACUITY_PALETTE: [&str; 3] = ["#4A90E2", "#F5A623", "#D0021B"];
const ADMISSION_PALETTE: [&str; 3] = ["#4A90E2", "#50E3C2", "#B8E986"];

/// Builds the census time series and the two categorical distributions.
///
/// Category axes always list every category seen in `full`, so they stay
/// stable while filters change; categories missing from `filtered` count 0.
pub fn build_series(full: &[IcuRecord], filtered: &[IcuRecord]) -> Charts {
    Charts {
        census_over_time: census_over_time(filtered),
        acuity_levels: acuity_levels(full, filtered),
        admission_source: admission_sources(full, filtered),
    }
}

fn census_over_time(filtered: &[IcuRecord]) -> ChartData {
    let mut sorted: Vec<&IcuRecord> = filtered.iter().collect();
    sorted.sort_by_key(|r| r.date);
    let recent = &sorted[sorted.len().saturating_sub(TIME_SERIES_POINTS)..];

    let labels: Vec<String> = recent
        .iter()
        .map(|r| r.date.format("%b %d").to_string())
        .collect();

    ChartData {
        datasets: vec![
            ChartDataset {
                label: Some("Patient Census".into()),
                data: recent.iter().map(|r| r.patient_census).collect(),
                border_color: Some(CENSUS_COLOR.into()),
                tension: Some(0.1),
                ..Default::default()
            },
            ChartDataset {
                label: Some("Bed Availability".into()),
                data: vec![BED_AVAILABILITY_BASELINE; labels.len()],
                background_color: Some(ChartColor::Single(BASELINE_FILL.into())),
                fill: Some(true),
                border_color: Some(CENSUS_COLOR.into()),
                border_dash: Some(vec![5, 5]),
                ..Default::default()
            },
        ],
        labels,
    }
}

fn acuity_levels(full: &[IcuRecord], filtered: &[IcuRecord]) -> ChartData {
    let universe = CategoryUniverse::from_records(full, |r| &r.acuity_level);
    ChartData {
        datasets: vec![ChartDataset {
            label: Some("Patient Count".into()),
            data: universe.tabulate(filtered, |r| &r.acuity_level),
            background_color: Some(palette(&ACUITY_PALETTE)),
            ..Default::default()
        }],
        labels: universe.labels(),
    }
}

fn admission_sources(full: &[IcuRecord], filtered: &[IcuRecord]) -> ChartData {
    let universe = CategoryUniverse::from_records(full, |r| &r.admission_source);
    ChartData {
        datasets: vec![ChartDataset {
            data: universe.tabulate(filtered, |r| &r.admission_source),
            background_color: Some(palette(&ADMISSION_PALETTE)),
            ..Default::default()
        }],
        labels: universe.labels(),
    }
}

fn palette(colors: &[&str]) -> ChartColor {
    ChartColor::Palette(colors.iter().map(|c| c.to_string()).collect())
}

/// Distinct values of one categorical field, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryUniverse<'a> {
    categories: Vec<&'a str>,
}

impl<'a> CategoryUniverse<'a> {
    pub fn from_records<F>(records: &'a [IcuRecord], field: F) -> Self
    where
        F: Fn(&'a IcuRecord) -> &'a String,
    {
        let mut categories: Vec<&'a str> = Vec::new();
        for record in records {
            let value = field(record).as_str();
            if !categories.contains(&value) {
                categories.push(value);
            }
        }
        Self { categories }
    }

    pub fn labels(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.to_string()).collect()
    }

    /// Counts `records` per category, in universe order, 0 for absent ones.
    pub fn tabulate<F>(&self, records: &[IcuRecord], field: F) -> Vec<f64>
    where
        F: Fn(&IcuRecord) -> &String,
    {
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for record in records {
            *counts.entry(field(record).as_str()).or_default() += 1;
        }
        self.categories
            .iter()
            .map(|c| f64::from(counts.get(c).copied().unwrap_or(0)))
            .collect()
    }
}
