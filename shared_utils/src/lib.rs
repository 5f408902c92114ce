//! Small utilities shared across the dashboard workspace.

pub mod env;
