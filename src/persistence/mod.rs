pub mod files;
pub mod snapshot;
pub mod store;

pub use files::{atomic_write, ensure_data_dir, init_local_data_dir};
pub use snapshot::{export_snapshot, Snapshot};
pub use store::{FileStore, KeyValueStore, Storage};

#[cfg(test)]
pub use store::MemoryStore;
