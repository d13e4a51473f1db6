pub mod models;
pub mod path;
mod store;

pub use models::{DiskFormat, DiskRecord, DiskSize, UNKNOWN_SIZE};
pub use path::normalize_path;
pub use store::{AddOutcome, CatalogStore};
