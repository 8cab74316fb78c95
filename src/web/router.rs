use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::web::handlers::{
    api_explore_report, api_restaurant_report, api_restaurants, explore_page, health, index,
    metrics, restaurant_page,
};
use crate::web::state::AppState;

pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/restaurant", get(restaurant_page))
        .route("/explore", get(explore_page))
        .route("/api/restaurants", get(api_restaurants))
        .route("/api/report/restaurant", get(api_restaurant_report))
        .route("/api/report/explore", get(api_explore_report))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .nest_service("/static", ServeDir::new("static"))
        .layer(cors)
        .with_state(state)
}
