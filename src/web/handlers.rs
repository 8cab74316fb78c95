use askama::Template;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::dashboard::{build_report, Selection};
use crate::error::DashboardError;
use crate::observability::metrics as metric_registry;
use crate::pipeline::filter::{observed_cities, observed_cuisines, restaurant_names};
use crate::web::models::{facet_selection_from_pairs, DashboardView, RestaurantQuery, SelectOption};
use crate::web::state::AppState;
use crate::web::templates::{ExploreTemplate, RestaurantTemplate};

/// Render a template, turning a rendering failure into a 500 page
fn render<T: Template>(template: &T) -> Response {
    match template.render().map_err(DashboardError::from) {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            error!("{}", e);
            let body = Html("<h1>Error rendering dashboard</h1>".to_string());
            (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
        }
    }
}

pub async fn index() -> Redirect {
    Redirect::to("/restaurant")
}

/// Single-restaurant dashboard. Without a name the first restaurant in the
/// dataset is shown.
pub async fn restaurant_page(
    State(state): State<AppState>,
    Query(query): Query<RestaurantQuery>,
) -> Response {
    let names = restaurant_names(state.dataset);
    let restaurant = query
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .or_else(|| names.first().cloned())
        .unwrap_or_default();

    let selection = Selection::restaurant(restaurant.clone());
    let report = build_report(state.dataset, &selection, &state.insights);
    let template = RestaurantTemplate {
        restaurants: SelectOption::list(&names, |n| n == restaurant),
        restaurant,
        view: DashboardView::from_report(&report),
    };
    render(&template)
}

/// City and cuisine dashboard
pub async fn explore_page(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let facets = facet_selection_from_pairs(&pairs);
    let report = build_report(state.dataset, &Selection::Facets(facets.clone()), &state.insights);

    let template = ExploreTemplate {
        cities: SelectOption::list(&observed_cities(state.dataset), |c| {
            facets.cities.admits(c)
        }),
        cuisines: SelectOption::list(&observed_cuisines(state.dataset), |c| {
            facets.cuisines.admits(c)
        }),
        view: DashboardView::from_report(&report),
    };
    render(&template)
}

pub async fn api_restaurants(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(restaurant_names(state.dataset))
}

pub async fn api_restaurant_report(
    State(state): State<AppState>,
    Query(query): Query<RestaurantQuery>,
) -> Response {
    let Some(name) = query.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) else {
        warn!("Restaurant report requested without a name");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "query parameter `name` is required" })),
        )
            .into_response();
    };
    let report = build_report(state.dataset, &Selection::restaurant(name), &state.insights);
    Json(report).into_response()
}

pub async fn api_explore_report(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let selection = Selection::Facets(facet_selection_from_pairs(&pairs));
    Json(build_report(state.dataset, &selection, &state.insights)).into_response()
}

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "voice_of_dine",
        "version": env!("CARGO_PKG_VERSION"),
        "records": state.dataset.len(),
        "loaded_at": state.dataset.loaded_at.to_rfc3339(),
    }))
}

/// Prometheus exposition, or 404 when no recorder is installed
pub async fn metrics() -> Response {
    match metric_registry::render() {
        Some(body) => {
            ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body).into_response()
        }
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed").into_response(),
    }
}
