//! # Data Loader Crate
//!
//! Record types and the document store behind the recommendation engine.
//!
//! ## Main Components
//!
//! - **types**: User and event records, the tag-or-list field union, `DataIndex`
//! - **parser**: Decode JSON / newline-delimited JSON record dumps
//! - **index**: Build a `DataIndex` from a dump directory
//! - **store**: The `DocumentStore` trait the engine queries
//! - **error**: Error types for loading and querying
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{DataIndex, DocumentStore};
//! use std::path::Path;
//!
//! let index = DataIndex::load_from_files(Path::new("data"))?;
//! let user = index.find_user("65f0c0ffee")?;
//! let events = index.active_events(Some(&user.id))?;
//! ```

// Public modules
pub mod error;
pub mod index;
pub mod parser;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use store::DocumentStore;
pub use types::{CreatorRef, DataIndex, EventId, EventRecord, TagField, UserId, UserRecord};
