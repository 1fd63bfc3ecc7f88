//! # Document Store
//!
//! Backend-neutral access to schema-less document collections.
//!
//! - `MongoStore`: MongoDB driver, used in production
//! - `InMemoryStore`: process-local, used for development and tests

pub mod errors;
pub mod memory;
pub mod mongo;
pub mod query;
pub mod traits;

pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use mongo::MongoStore;
pub use query::{FindOptions, SortKey};
pub use traits::DocumentStore;
