//! Node Atlas
//!
//! Turns a crawled node list into `nodes.json` and presents it as a map with
//! hover tooltips and a chart ranking autonomous systems by node count.

pub mod api;
pub mod cli;
pub mod config;
pub mod dao;
pub mod error;
pub mod metrics;
pub mod model;
pub mod render;
pub mod service;
