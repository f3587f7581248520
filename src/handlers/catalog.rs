use axum::{
    extract::{Query, State},
    Json,
};
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::FindOptions;
use serde::Deserialize;

use crate::config;
use crate::error::ApiResult;
use crate::filter::{categories, FilterPlan, SearchTerm};
use crate::db::Store;

/// How many items the landing page showcases
const TOP_FOOD_LIMIT: i64 = 6;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: String,
}

/// GET /search?search= - "all" returns the first page unfiltered; anything
/// else goes through the store's text index, which owns ranking.
pub async fn search_get(
    State(store): State<Store>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<Document>> {
    let docs: Vec<Document> = match SearchTerm::parse(&query.search) {
        SearchTerm::All => {
            let options = FindOptions::builder()
                .limit(config::config().api.page_size as i64)
                .build();
            store.foods().find(None, options).await?.try_collect().await?
        }
        SearchTerm::Fuzzy(term) => {
            let pipeline = vec![doc! {
                "$search": {
                    "index": "search",
                    "text": {
                        "query": term,
                        "path": { "wildcard": "*" },
                        "fuzzy": {},
                    }
                }
            }];
            store.foods().aggregate(pipeline, None).await?.try_collect().await?
        }
    };
    Ok(Json(docs))
}

#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    pub price: Option<String>,
    pub category: Option<String>,
}

/// GET /filter?price=&category= - table-driven sort/filter combination
pub async fn filter_get(
    State(store): State<Store>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<Vec<Document>> {
    let plan = FilterPlan::from_params(query.price.as_deref(), query.category.as_deref());

    let options = FindOptions::builder().sort(plan.sort).build();
    let docs: Vec<Document> = store
        .foods()
        .find(plan.filter, options)
        .await?
        .try_collect()
        .await?;
    Ok(Json(docs))
}

/// GET /category - distinct categories in first-seen order
pub async fn category_get(State(store): State<Store>) -> ApiResult<Vec<String>> {
    let docs: Vec<Document> = store.foods().find(None, None).await?.try_collect().await?;
    Ok(Json(categories::distinct_first_seen(&docs)))
}

/// GET /top-food - best sellers by purchase count
pub async fn top_food_get(State(store): State<Store>) -> ApiResult<Vec<Document>> {
    let options = FindOptions::builder()
        .sort(doc! { "purchase": -1 })
        .limit(TOP_FOOD_LIMIT)
        .build();
    let docs: Vec<Document> = store.foods().find(None, options).await?.try_collect().await?;
    Ok(Json(docs))
}
