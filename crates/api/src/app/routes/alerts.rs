use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    response::{IntoResponse, Response},
    Json,
};

use medstock_inventory::group_alerts;

use crate::app::dto::AnalyticsQuery;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub async fn get_alerts(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Response, ApiError> {
    let ctx = services.context(query.today.as_deref(), query.horizon_days.as_deref())?;
    let snapshot = services.store().list_all();

    let buckets = group_alerts(&snapshot, ctx.today(), ctx.horizon())?;
    tracing::debug!(alerts = buckets.total(), today = %ctx.today(), "alerts computed");
    Ok(Json(buckets).into_response())
}
