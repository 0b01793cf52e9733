//! Library exports for vinoserve, shared between the binary and tests.

pub mod config;
pub mod metrics;
pub mod model;
pub mod routes;
pub mod startup;
pub mod state;
pub mod utils;
