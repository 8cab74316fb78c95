pub mod config;
pub mod constants;
pub mod dashboard;
pub mod dataset;
pub mod domain;
pub mod error;
pub mod logging;
pub mod observability;
pub mod pipeline;
pub mod web;
