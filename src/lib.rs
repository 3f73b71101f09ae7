//! Grade-range filtered charts over student survey data: a study time vs.
//! final grade heatmap and a social-support prevalence bar chart, served
//! over HTTP.

pub mod analytics;
pub mod api;
pub mod config;
pub mod data;
pub mod error;
mod page;
