use askama::Template;

use crate::web::models::{DashboardView, SelectOption};

#[derive(Template)]
#[template(path = "restaurant.html")]
pub struct RestaurantTemplate {
    pub restaurant: String,
    pub restaurants: Vec<SelectOption>,
    pub view: DashboardView,
}

#[derive(Template)]
#[template(path = "explore.html")]
pub struct ExploreTemplate {
    pub cities: Vec<SelectOption>,
    pub cuisines: Vec<SelectOption>,
    pub view: DashboardView,
}
