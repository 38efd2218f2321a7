// src/reference/mod.rs
pub mod context;
pub mod dataset;
pub mod entry;
pub mod error;
pub mod location;
pub mod lookup_table;
pub mod org;

// Re-export the resolver surface for a clean API
pub use context::ReferenceContext;
pub use entry::{LocationEntry, OrgEntry, ReferenceRecord};
pub use error::ReferenceError;
pub use location::LocationResolver;
pub use lookup_table::LookupTable;
pub use org::OrgResolver;
