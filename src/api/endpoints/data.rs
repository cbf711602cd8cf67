//! Dashboard data endpoint.
//!
//! `GET /api/data`: KPIs, chart series and recent records for the
//! current filter selection.

use axum::extract::{Query, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::dashboard::{self, DashboardData};
use crate::models::{DashboardQuery, FilterCriteria};

/// `GET /api/data?date_range=&unit=&acuity_level=&admission_source=`
///
/// Loading and aggregation run together on a blocking thread; any failure
/// (including a panic) aborts the request with no partial payload.
pub async fn dashboard_data(
    State(ctx): State<ApiContext>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardData>, ApiError> {
    let criteria = FilterCriteria::from(query);
    let source = ctx.source.clone();

    let data = tokio::task::spawn_blocking(move || -> Result<DashboardData, ApiError> {
        let records = source.load()?;
        Ok(dashboard::build_dashboard(&records, &criteria)?)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("dashboard task failed: {e}")))??;

    Ok(Json(data))
}
