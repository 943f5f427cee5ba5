//! Weekly DOT fleet compliance snapshot generator.
//!
//! The crate collects fleet-safety metrics and company metadata, submits
//! them to a remote text-generation endpoint, and renders the returned
//! narrative sections alongside rasterized charts into a PDF report.

pub mod app;
pub mod charts;
pub mod client;
pub mod elements;
pub mod export;
pub mod fonts;
pub mod form;
pub mod markdown;
pub mod model;
pub mod projections;
pub mod render;
