use axum::{extract::State, Json};
use futures::TryStreamExt;
use mongodb::bson::Document;
use serde_json::Value;

use crate::db::{self, Store};
use crate::error::ApiResult;

/// GET /gallery
pub async fn list_get(State(store): State<Store>) -> ApiResult<Vec<Document>> {
    let items: Vec<Document> = store.gallery().find(None, None).await?.try_collect().await?;
    Ok(Json(items))
}

/// POST /gallery
pub async fn create_post(
    State(store): State<Store>,
    Json(item): Json<Document>,
) -> ApiResult<Value> {
    let result = store.gallery().insert_one(item, None).await?;
    Ok(Json(db::insert_ack(result)))
}
