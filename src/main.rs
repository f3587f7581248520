use axum::{
    http::{header, Method},
    routing::{delete, get, post, put},
    Router,
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod auth;
mod config;
mod db;
mod error;
mod filter;
mod handlers;
mod middleware;

use db::Store;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up SECRET_KEY, DB_USER, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = crate::config::config();
    tracing::info!("Starting DishDash API in {:?} mode", config.environment);

    let store = Store::connect(&config.database)
        .await
        .unwrap_or_else(|e| panic!("failed to initialize store: {}", e));

    // The driver connects lazily; a failed ping is worth knowing about but
    // not fatal, requests will surface store errors individually.
    match store.ping().await {
        Ok(()) => tracing::info!("Pinged the deployment, document store is reachable"),
        Err(e) => tracing::warn!("store ping failed at startup: {}", e),
    }

    let app = app(store);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(config.api.port);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 DishDash API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(store: Store) -> Router {
    let config = crate::config::config();

    // Parse configured origins into header values; credentials are required
    // for the session cookie to travel
    let origins: Vec<axum::http::HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Session cookie lifecycle
        .merge(session_routes())
        // Open collections
        .merge(collection_routes())
        // Food catalog and management
        .merge(food_routes())
        .merge(catalog_routes())
        .merge(purchase_routes())
        // Ownership-scoped routes behind the cookie guard
        .merge(guarded_routes())
        .with_state(store)
        // Global middleware
        .layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE])
                .allow_credentials(true),
        )
        .layer(TraceLayer::new_for_http())
}

fn session_routes() -> Router<Store> {
    use handlers::auth;

    Router::new()
        .route("/token", post(auth::token_post))
        .route("/logout", get(auth::logout_get))
}

fn collection_routes() -> Router<Store> {
    use handlers::{gallery, users};

    Router::new()
        .route("/users", get(users::list_get).post(users::create_post))
        .route("/gallery", get(gallery::list_get).post(gallery::create_post))
}

fn food_routes() -> Router<Store> {
    use handlers::foods;

    Router::new()
        .route("/foods", get(foods::foods_get).post(foods::foods_post))
        .route("/update", put(foods::update_put))
        .route("/delete", delete(foods::delete_delete))
}

fn purchase_routes() -> Router<Store> {
    use handlers::purchases;

    Router::new().route("/purchase-food", post(purchases::create_post))
}

fn catalog_routes() -> Router<Store> {
    use handlers::catalog;

    Router::new()
        .route("/search", get(catalog::search_get))
        .route("/filter", get(catalog::filter_get))
        .route("/category", get(catalog::category_get))
        .route("/top-food", get(catalog::top_food_get))
}

fn guarded_routes() -> Router<Store> {
    use handlers::{foods, purchases};

    Router::new()
        .route("/myFood/:email", get(foods::my_food_get))
        .route("/purchase-food/:email", get(purchases::list_get))
        .route_layer(axum::middleware::from_fn(middleware::cookie_auth))
}

async fn root() -> &'static str {
    "Server is running..."
}

async fn health(
    axum::extract::State(store): axum::extract::State<Store>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match store.ping().await {
        Ok(()) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("health check ping failed: {}", e);
            (
                axum::http::StatusCode::SERVICE_UNAVAILABLE,
                axum::response::Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now,
                        "database": "unreachable"
                    }
                })),
            )
        }
    }
}
