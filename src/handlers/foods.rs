use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::{FindOptions, UpdateOptions};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config;
use crate::db::{self, Store};
use crate::error::{ApiError, ApiResult};
use crate::filter::{paging, text};
use crate::middleware::AuthUser;

/// Fields a food owner is allowed to change through the update form.
/// Anything else in the request body is dropped.
const UPDATE_FIELDS: [&str; 7] = [
    "url",
    "foodName",
    "foodCategory",
    "foodPrice",
    "foodQuantity",
    "about",
    "description",
];

#[derive(Debug, Deserialize)]
pub struct FoodsQuery {
    pub id: Option<String>,
    /// Presence signal: any value means "tell me the total count"
    pub page: Option<String>,
    #[serde(rename = "activePage", alias = "pageNo")]
    pub active_page: Option<u64>,
    pub email: Option<String>,
    pub search: Option<String>,
}

/// GET /foods - multiplexed listing; the first recognized parameter wins
pub async fn foods_get(
    State(store): State<Store>,
    Query(query): Query<FoodsQuery>,
) -> ApiResult<Value> {
    let foods = store.foods();

    if let Some(id) = &query.id {
        let id = db::parse_object_id(id)?;
        let docs: Vec<Document> = foods.find(doc! { "_id": id }, None).await?.try_collect().await?;
        return Ok(Json(json!(docs)));
    }

    if query.page.is_some() {
        // Raw document count, which the storefront treats as the page total
        let pages = foods.count_documents(None, None).await?;
        return Ok(Json(json!({ "pages": pages })));
    }

    if let Some(page) = query.active_page {
        let (skip, limit) = paging::window(page, config::config().api.page_size as u64);
        let options = FindOptions::builder().skip(skip).limit(limit).build();
        let docs: Vec<Document> = foods.find(None, options).await?.try_collect().await?;
        return Ok(Json(json!(docs)));
    }

    if let Some(email) = &query.email {
        let docs: Vec<Document> = foods.find(doc! { "email": email }, None).await?.try_collect().await?;
        return Ok(Json(json!(docs)));
    }

    if let Some(search) = &query.search {
        // Exact match against capitalized category or name
        let term = text::capitalize_first(search);
        let filter = doc! {
            "$or": [
                { "foodCategory": &term },
                { "foodName": &term },
            ]
        };
        let docs: Vec<Document> = foods.find(filter, None).await?.try_collect().await?;
        return Ok(Json(json!(docs)));
    }

    let docs: Vec<Document> = foods.find(None, None).await?.try_collect().await?;
    Ok(Json(json!(docs)))
}

/// GET /myFood/:email - foods owned by the caller. The guard verified the
/// cookie; this handler verifies the caller is asking about themselves.
pub async fn my_food_get(
    Path(email): Path<String>,
    Extension(user): Extension<AuthUser>,
    State(store): State<Store>,
) -> ApiResult<Vec<Document>> {
    if user.email != email {
        return Err(ApiError::forbidden("forbidden access"));
    }

    let docs: Vec<Document> = store
        .foods()
        .find(doc! { "email": &email }, None)
        .await?
        .try_collect()
        .await?;
    Ok(Json(docs))
}

/// POST /foods - create a food item. The purchase counter always starts at
/// zero, whatever the caller sent.
pub async fn foods_post(
    State(store): State<Store>,
    Json(mut food): Json<Document>,
) -> ApiResult<Value> {
    food.insert("purchase", 0_i32);
    let result = store.foods().insert_one(food, None).await?;
    Ok(Json(db::insert_ack(result)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateParams {
    pub id: String,
}

fn whitelisted_set(body: &Document) -> Document {
    let mut set = Document::new();
    for field in UPDATE_FIELDS {
        if let Some(value) = body.get(field) {
            set.insert(field, value.clone());
        }
    }
    set
}

/// PUT /update?id= - upsert the whitelisted fields of a food item
pub async fn update_put(
    State(store): State<Store>,
    Query(params): Query<UpdateParams>,
    Json(body): Json<Document>,
) -> ApiResult<Value> {
    let id = db::parse_object_id(&params.id)?;
    let update = doc! { "$set": whitelisted_set(&body) };
    let options = UpdateOptions::builder().upsert(true).build();

    let result = store
        .foods()
        .update_one(doc! { "_id": id }, update, options)
        .await?;
    Ok(Json(db::update_ack(result)))
}

/// Deletable collections, resolved from the `db` query tag at extraction
/// time so handlers never compare raw strings
#[derive(Debug, Clone, Copy, Deserialize)]
pub enum DeleteTarget {
    #[serde(rename = "foodDB")]
    Food,
    #[serde(rename = "purchaseDB")]
    Purchase,
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: String,
    pub db: DeleteTarget,
}

/// DELETE /delete?id=&db= - remove one document from the tagged collection
pub async fn delete_delete(
    State(store): State<Store>,
    Query(params): Query<DeleteParams>,
) -> ApiResult<Value> {
    let id = db::parse_object_id(&params.id)?;
    let collection = match params.db {
        DeleteTarget::Food => store.foods(),
        DeleteTarget::Purchase => store.purchases(),
    };

    let result = collection.delete_one(doc! { "_id": id }, None).await?;
    Ok(Json(db::delete_ack(result)))
}
