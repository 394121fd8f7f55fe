//! `/dates` endpoints.
//!
//! Each collection gets the same four verbs on its own path. Handlers are
//! generic over a `CollectionKind` marker so the request body schema and the
//! JSON field names follow the collection.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, put, MethodRouter},
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use service::{Collection, StoreDocument};
use tracing::info;

use crate::errors::JsonApiError;
use crate::state::AppState;

/// Binds a route to one collection and to the body that replaces/merges it.
pub trait CollectionKind: Send + Sync + 'static {
    const COLLECTION: Collection;
    type Payload: DeserializeOwned + Send + 'static;

    fn into_dates(payload: Self::Payload) -> Vec<String>;
}

pub struct Available;
pub struct Occupied;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableDatesPayload {
    pub available_dates: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupiedDatesPayload {
    pub occupied_dates: Vec<String>,
}

impl CollectionKind for Available {
    const COLLECTION: Collection = Collection::Available;
    type Payload = AvailableDatesPayload;

    fn into_dates(payload: Self::Payload) -> Vec<String> {
        payload.available_dates
    }
}

impl CollectionKind for Occupied {
    const COLLECTION: Collection = Collection::Occupied;
    type Payload = OccupiedDatesPayload;

    fn into_dates(payload: Self::Payload) -> Vec<String> {
        payload.occupied_dates
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangePayload {
    pub from_date: String,
    pub to_date: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dates", get(get_all_dates))
        .route("/dates/available", collection_routes::<Available>())
        .route("/dates/occupied", collection_routes::<Occupied>())
}

fn collection_routes<K: CollectionKind>() -> MethodRouter<AppState> {
    put(replace_dates::<K>)
        .patch(merge_dates::<K>)
        .delete(clear_dates::<K>)
        .post(add_date_range::<K>)
}

fn invalid_payload(collection: Collection) -> String {
    format!("Invalid {} data", collection.field())
}

fn update_failed(collection: Collection) -> String {
    format!("Error updating {}", collection.field())
}

fn updated_message(collection: Collection) -> String {
    format!("{} dates updated successfully", collection.label())
}

/// `{message, <field>: dates}`
fn dates_response(collection: Collection, dates: Vec<String>) -> Json<Value> {
    let mut body = Map::new();
    body.insert("message".into(), Value::String(updated_message(collection)));
    body.insert(collection.field().into(), Value::from(dates));
    Json(Value::Object(body))
}

/// Unwrap an extracted body, turning any shape/syntax rejection into a 400.
fn require_body<T>(payload: Result<Json<T>, JsonRejection>, invalid: &str) -> Result<T, JsonApiError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        info!(event = "invalid_body", reason = %rejection.body_text(), "rejected request body");
        JsonApiError::bad_request(invalid)
    })
}

pub async fn get_all_dates(State(state): State<AppState>) -> Result<Json<StoreDocument>, JsonApiError> {
    state
        .dates
        .get_all()
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service(e, "Invalid request", "Error reading data"))
}

pub async fn replace_dates<K: CollectionKind>(
    State(state): State<AppState>,
    payload: Result<Json<K::Payload>, JsonRejection>,
) -> Result<Json<MessageResponse>, JsonApiError> {
    let collection = K::COLLECTION;
    let dates = K::into_dates(require_body(payload, &invalid_payload(collection))?);
    state
        .dates
        .replace(collection, dates)
        .await
        .map_err(|e| JsonApiError::from_service(e, &invalid_payload(collection), &update_failed(collection)))?;
    Ok(Json(MessageResponse { message: updated_message(collection) }))
}

pub async fn merge_dates<K: CollectionKind>(
    State(state): State<AppState>,
    payload: Result<Json<K::Payload>, JsonRejection>,
) -> Result<Json<Value>, JsonApiError> {
    let collection = K::COLLECTION;
    let dates = K::into_dates(require_body(payload, &invalid_payload(collection))?);
    let merged = state
        .dates
        .merge(collection, dates)
        .await
        .map_err(|e| JsonApiError::from_service(e, &invalid_payload(collection), &update_failed(collection)))?;
    Ok(dates_response(collection, merged))
}

pub async fn clear_dates<K: CollectionKind>(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, JsonApiError> {
    let collection = K::COLLECTION;
    state.dates.clear(collection).await.map_err(|e| {
        JsonApiError::from_service(e, "Invalid request", &format!("Error deleting {}", collection.field()))
    })?;
    Ok(Json(MessageResponse { message: format!("{} dates deleted successfully", collection.label()) }))
}

pub async fn add_date_range<K: CollectionKind>(
    State(state): State<AppState>,
    payload: Result<Json<DateRangePayload>, JsonRejection>,
) -> Result<Json<Value>, JsonApiError> {
    const INVALID_RANGE: &str = "Invalid fromDate or toDate data";
    let collection = K::COLLECTION;
    let range = require_body(payload, INVALID_RANGE)?;
    if range.from_date.trim().is_empty() || range.to_date.trim().is_empty() {
        return Err(JsonApiError::bad_request(INVALID_RANGE));
    }
    let dates = state
        .dates
        .add_range(collection, &range.from_date, &range.to_date)
        .await
        .map_err(|e| JsonApiError::from_service(e, INVALID_RANGE, &update_failed(collection)))?;
    Ok(dates_response(collection, dates))
}
