//! Selection layer: narrows the dataset to the working view for one interaction.

use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

use crate::domain::{Dataset, WorkingView};

/// Allowed values for one categorical facet.
///
/// `All` is the default and admits every observed value. `Only` admits exactly
/// the listed values, so `Only` of an empty set admits nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum FacetFilter {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl FacetFilter {
    pub fn only<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FacetFilter::Only(values.into_iter().map(Into::into).collect())
    }

    pub fn none() -> Self {
        FacetFilter::Only(BTreeSet::new())
    }

    pub fn admits(&self, value: &str) -> bool {
        match self {
            FacetFilter::All => true,
            FacetFilter::Only(values) => values.contains(value),
        }
    }
}

/// City and cuisine facets for the multi-facet dashboard. Both default to all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetSelection {
    pub cities: FacetFilter,
    pub cuisines: FacetFilter,
}

impl FacetSelection {
    pub fn new(cities: FacetFilter, cuisines: FacetFilter) -> Self {
        Self { cities, cuisines }
    }
}

/// Every record whose restaurant name equals `name` exactly. An unknown name
/// gives an empty view.
pub fn select_restaurant<'a>(dataset: &'a Dataset, name: &str) -> WorkingView<'a> {
    let view: WorkingView<'a> = dataset
        .records()
        .iter()
        .filter(|r| r.restaurant_name == name)
        .collect();
    debug!(restaurant = %name, matched = view.len(), "Selected restaurant");
    view
}

/// Every record whose city and cuisine are both admitted by the selection.
pub fn select_facets<'a>(dataset: &'a Dataset, selection: &FacetSelection) -> WorkingView<'a> {
    let view: WorkingView<'a> = dataset
        .records()
        .iter()
        .filter(|r| selection.cities.admits(&r.city) && selection.cuisines.admits(&r.cuisine))
        .collect();
    debug!(matched = view.len(), "Selected by city and cuisine");
    view
}

/// Distinct restaurant names in first-seen order
pub fn restaurant_names(dataset: &Dataset) -> Vec<String> {
    let mut seen = HashSet::new();
    dataset
        .records()
        .iter()
        .filter(|r| seen.insert(r.restaurant_name.as_str()))
        .map(|r| r.restaurant_name.clone())
        .collect()
}

/// Distinct cities, sorted
pub fn observed_cities(dataset: &Dataset) -> Vec<String> {
    sorted_distinct(dataset.records().iter().map(|r| r.city.as_str()))
}

/// Distinct cuisines, sorted
pub fn observed_cuisines(dataset: &Dataset) -> Vec<String> {
    sorted_distinct(dataset.records().iter().map(|r| r.cuisine.as_str()))
}

fn sorted_distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
