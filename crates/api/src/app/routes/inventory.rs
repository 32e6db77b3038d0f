use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};

use medstock_core::DomainError;
use medstock_inventory::{
    ClassifiedItem, InventoryItem, ItemDraft, ItemFilter, ItemPatch, classify, search,
};

use crate::app::dto::{self, AdjustStockRequest, ItemQuery, ListQuery, SearchQuery};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/api/inventory", get(list_items).post(create_item))
        .route("/api/inventory/search", get(search_items))
        .route(
            "/api/inventory/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/api/inventory/:id/adjust", post(adjust_stock))
}

/// Render one record with the status it has on `today`.
fn classified_response(
    status: StatusCode,
    item: &InventoryItem,
    today: NaiveDate,
) -> Result<Response, ApiError> {
    let classified = ClassifiedItem {
        item,
        status: classify(item, today)?,
    };
    Ok((status, Json(classified)).into_response())
}

pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let ctx = services.context(query.today.as_deref(), None)?;
    let category = dto::parse_category(query.category.as_deref())?;
    let filter = ItemFilter {
        search: query.q,
        category,
        status: dto::parse_status(query.status.as_deref())?,
    };

    let snapshot = match category {
        Some(category) => services.store().list_by_category(category),
        None => services.store().list_all(),
    };

    let items = filter.apply(&snapshot, ctx.today())?;
    Ok(Json(items).into_response())
}

pub async fn search_items(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, ApiError> {
    let ctx = services.context(query.today.as_deref(), None)?;
    let snapshot = services.store().list_all();

    let matches = search(&snapshot, query.q.as_deref().unwrap_or_default())
        .into_iter()
        .map(|item| -> Result<ClassifiedItem<'_>, ApiError> {
            Ok(ClassifiedItem {
                item,
                status: classify(item, ctx.today())?,
            })
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    Ok(Json(matches).into_response())
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<ItemQuery>,
    body: Result<Json<ItemDraft>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(draft) = body?;
    let ctx = services.context(query.today.as_deref(), None)?;

    let item = services.create_item(draft, Utc::now())?;
    classified_response(StatusCode::CREATED, &item, ctx.today())
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Query(query): Query<ItemQuery>,
) -> Result<Response, ApiError> {
    let id = dto::parse_item_id(&id)?;
    let ctx = services.context(query.today.as_deref(), None)?;

    let item = services
        .store()
        .find_by_id(&id)
        .ok_or(DomainError::NotFound)?;
    classified_response(StatusCode::OK, &item, ctx.today())
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Query(query): Query<ItemQuery>,
    body: Result<Json<ItemPatch>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = dto::parse_item_id(&id)?;
    let Json(patch) = body?;
    if patch.is_empty() {
        return Err(ApiError::bad_request("empty_update", "update contains no fields"));
    }
    let ctx = services.context(query.today.as_deref(), None)?;

    let item = services.store().update(&id, &patch, Utc::now())?;
    classified_response(StatusCode::OK, &item, ctx.today())
}

pub async fn adjust_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Query(query): Query<ItemQuery>,
    body: Result<Json<AdjustStockRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = dto::parse_item_id(&id)?;
    let Json(body) = body?;
    let ctx = services.context(query.today.as_deref(), None)?;

    let item = services.store().adjust_quantity(&id, body.delta, Utc::now())?;
    classified_response(StatusCode::OK, &item, ctx.today())
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = dto::parse_item_id(&id)?;
    services.store().delete(&id)?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "id": id.to_string(),
            "message": "item deleted",
        })),
    )
        .into_response())
}
