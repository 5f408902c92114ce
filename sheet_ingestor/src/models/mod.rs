pub mod entry;
pub mod snapshot;
