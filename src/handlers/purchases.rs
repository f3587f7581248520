use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use serde::Deserialize;
use serde_json::Value;

use crate::db::{self, Store};
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;

/// GET /purchase-food/:email - order history for the caller. Identity must
/// match the requested email, whether or not that email exists.
pub async fn list_get(
    Path(email): Path<String>,
    Extension(user): Extension<AuthUser>,
    State(store): State<Store>,
) -> ApiResult<Vec<Document>> {
    if user.email != email {
        return Err(ApiError::forbidden("forbidden access"));
    }

    let docs: Vec<Document> = store
        .purchases()
        .find(doc! { "email": { "$eq": &email } }, None)
        .await?
        .try_collect()
        .await?;
    Ok(Json(docs))
}

#[derive(Debug, Deserialize)]
pub struct PurchaseParams {
    /// Identifier of the food item being bought
    pub id: String,
}

/// The counter pair moves in lockstep: stock down, purchase count up.
/// Relies on the store's field-level atomic increment.
fn stock_adjustment(quantity: i64) -> Document {
    doc! {
        "$inc": {
            "foodQuantity": -quantity,
            "purchase": quantity,
        }
    }
}

fn purchased_quantity(purchase: &Document) -> Option<i64> {
    match purchase.get("quantity") {
        Some(Bson::Int32(n)) => Some(*n as i64),
        Some(Bson::Int64(n)) => Some(*n),
        Some(Bson::Double(f)) => Some(*f as i64),
        _ => None,
    }
}

/// POST /purchase-food?id= - record a purchase and adjust the food's
/// counters. The adjustment runs first; if the purchase insert then fails,
/// the adjustment is reverted and the caller is told which step failed.
pub async fn create_post(
    State(store): State<Store>,
    Query(params): Query<PurchaseParams>,
    Json(purchase): Json<Document>,
) -> ApiResult<Value> {
    let food_id = db::parse_object_id(&params.id)?;
    let quantity = purchased_quantity(&purchase)
        .ok_or_else(|| ApiError::bad_request("quantity must be a number"))?;

    store
        .foods()
        .update_one(doc! { "_id": food_id }, stock_adjustment(quantity), None)
        .await
        .map_err(|e| {
            tracing::error!("stock adjustment failed for food {}: {}", food_id, e);
            ApiError::internal_server_error("stock could not be adjusted")
        })?;

    match store.purchases().insert_one(purchase, None).await {
        Ok(result) => Ok(Json(db::insert_ack(result))),
        Err(e) => {
            tracing::error!("purchase insert failed for food {}: {}", food_id, e);
            // Walk the already-applied adjustment back
            if let Err(revert) = store
                .foods()
                .update_one(doc! { "_id": food_id }, stock_adjustment(-quantity), None)
                .await
            {
                tracing::error!(
                    "stock compensation failed for food {}: {} (counters are inconsistent)",
                    food_id,
                    revert
                );
            }
            Err(ApiError::internal_server_error("purchase record could not be saved"))
        }
    }
}
