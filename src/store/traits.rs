use async_trait::async_trait;
use mongodb::bson::{Bson, Document};

use super::errors::StoreResult;
use super::query::FindOptions;

/// Document store operations used by the REST layer.
///
/// Filters are documents of top-level field equalities. Every call is a
/// single store operation; nothing spans more than one document write.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Round-trip to the backend
    async fn ping(&self) -> StoreResult<()>;

    /// All documents matching `filter`
    async fn find(
        &self,
        collection: &str,
        filter: Document,
        options: FindOptions,
    ) -> StoreResult<Vec<Document>>;

    /// First document matching `filter`
    async fn find_one(&self, collection: &str, filter: Document) -> StoreResult<Option<Document>>;

    /// Insert a document, returning its `_id`
    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<Bson>;

    /// Merge `set` into the first matching document and return it after the update
    async fn find_one_and_update(
        &self,
        collection: &str,
        filter: Document,
        set: Document,
    ) -> StoreResult<Option<Document>>;

    /// Delete the first matching document, returning how many were deleted
    async fn delete_one(&self, collection: &str, filter: Document) -> StoreResult<u64>;
}
