use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::models::IcuRecord;

/// Headline metrics for the KPI cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct KpiSet {
    pub bed_occupancy: f64,
    pub patient_census: f64,
    pub ventilator_utilization: f64,
    pub avg_los: f64,
}

/// A colour or a per-point palette, as Chart.js accepts either.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartColor {
    Single(String),
    Palette(Vec<String>),
}

/// One dataset of a Chart.js chart. Styling keys are omitted when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<ChartColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_dash: Option<Vec<u32>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

/// The three dashboard charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Charts {
    pub census_over_time: ChartData,
    pub acuity_levels: ChartData,
    pub admission_source: ChartData,
}

/// Complete dashboard payload: single response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardData {
    pub kpis: KpiSet,
    pub charts: Charts,
    pub patient_details: Vec<IcuRecord>,
}

impl DashboardData {
    /// The response for a filter that matched nothing: zero KPIs, charts
    /// with no labels or datasets, no detail rows.
    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum DashboardError {
    #[error("Non-finite {field} on latest record dated {date}")]
    NonFiniteMetric { field: &'static str, date: NaiveDate },
}
