//! Officer profile persistence (JSON) and report export.
//!
//! The profile is a single small JSON record, rewritten in full on every
//! save. Generated reports are written out as plain text files.

mod error;
mod export;
mod profile;

pub use error::StorageError;
pub use export::{default_export_path, export_report};
pub use profile::{PROFILE_FILE, ProfileStore, StoredProfile, default_data_dir};
