//! Tag group persistence
//!
//! Decides between insert and update, tracks the saved version, and
//! resolves store keys back to tag groups on load.
//!
//! Records live in the namespace `<database>.<collection>` from
//! `StoreConfig`. See `record` for their layout.

mod capability;
mod config;
mod errors;
pub mod record;
mod report;
mod store;

pub use capability::TagGroupPersistence;
pub use config::StoreConfig;
pub use errors::{ConfigError, ConfigResult, PersistenceError, PersistenceResult};
pub use report::{LoadReport, LoadedTagGroup, SaveOutcome};
pub use store::TagGroupStore;
