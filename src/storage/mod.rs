// Table loading and the process-wide read-only caches

pub mod snapshot;

pub use snapshot::{DataStore, Snapshot, TableCache};
