use axum::{extract::State, Json};
use futures::TryStreamExt;
use mongodb::bson::Document;
use serde_json::Value;

use crate::db::{self, Store};
use crate::error::ApiResult;

/// GET /users - every registered user, natural store order
pub async fn list_get(State(store): State<Store>) -> ApiResult<Vec<Document>> {
    let users: Vec<Document> = store.users().find(None, None).await?.try_collect().await?;
    Ok(Json(users))
}

/// POST /users - insert the signup document verbatim. Duplicate emails are
/// not prevented here.
pub async fn create_post(
    State(store): State<Store>,
    Json(user): Json<Document>,
) -> ApiResult<Value> {
    let result = store.users().insert_one(user, None).await?;
    Ok(Json(db::insert_ack(result)))
}
