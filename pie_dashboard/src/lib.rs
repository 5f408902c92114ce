//! The dashboard application: config, terminal rendering, and the polling
//! loop that ties fetching and animation together.

pub mod config;
pub mod render;
pub mod runner;
