//! # In-Memory Store
//!
//! Process-local `DocumentStore` for development and tests. Documents are
//! kept per collection in insertion order, which stands in for the natural
//! order of a real backend.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};

use super::errors::{StoreError, StoreResult};
use super::query::{matches_filter, project_document, sort_documents, FindOptions};
use super::traits::DocumentStore;

/// In-memory document store
#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// Data store: collection -> documents
    data: RwLock<HashMap<String, Vec<Document>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    pub fn count(&self, collection: &str) -> StoreResult<usize> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(data.get(collection).map_or(0, Vec::len))
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(())
    }

    async fn find(
        &self,
        collection: &str,
        filter: Document,
        options: FindOptions,
    ) -> StoreResult<Vec<Document>> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;

        let mut documents: Vec<Document> = data
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| matches_filter(d, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        drop(data);

        sort_documents(&mut documents, &options.sort);

        if let Some(limit) = options.limit {
            documents.truncate(limit);
        }

        if let Some(fields) = &options.projection {
            documents = documents
                .into_iter()
                .map(|d| project_document(d, fields))
                .collect();
        }

        Ok(documents)
    }

    async fn find_one(&self, collection: &str, filter: Document) -> StoreResult<Option<Document>> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;

        Ok(data
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| matches_filter(d, &filter)))
            .cloned())
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> StoreResult<Bson> {
        let id = match document.get("_id") {
            Some(id) => id.clone(),
            None => {
                // `_id` leads the document, as a real backend stores it
                let id = Bson::ObjectId(ObjectId::new());
                let mut with_id = Document::new();
                with_id.insert("_id", id.clone());
                for (key, value) in document {
                    with_id.insert(key, value);
                }
                document = with_id;
                id
            }
        };

        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;
        let documents = data.entry(collection.to_string()).or_default();

        if documents.iter().any(|d| d.get("_id") == Some(&id)) {
            return Err(StoreError::DuplicateKey(format!(
                "{} already contains _id {}",
                collection, id
            )));
        }

        documents.push(document);
        Ok(id)
    }

    async fn find_one_and_update(
        &self,
        collection: &str,
        filter: Document,
        set: Document,
    ) -> StoreResult<Option<Document>> {
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;

        let Some(document) = data
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| matches_filter(d, &filter)))
        else {
            return Ok(None);
        };

        validate_set(document, &set)?;

        // Applied to a copy so a failing path leaves the stored document untouched
        let mut updated = document.clone();
        for (path, value) in set {
            let segments: Vec<&str> = path.split('.').collect();
            set_field(&mut updated, &segments, value)?;
        }

        *document = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> StoreResult<u64> {
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;

        let Some(documents) = data.get_mut(collection) else {
            return Ok(0);
        };

        match documents.iter().position(|d| matches_filter(d, &filter)) {
            Some(idx) => {
                documents.remove(idx);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

/// Reject `$set` paths that a MongoDB server would refuse before touching the document
fn validate_set(document: &Document, set: &Document) -> StoreResult<()> {
    let paths: Vec<&String> = set.keys().collect();

    for (i, path) in paths.iter().enumerate() {
        for segment in path.split('.') {
            if segment.is_empty() {
                return Err(StoreError::InvalidUpdate(format!(
                    "The update path '{path}' contains an empty field name, which is not allowed."
                )));
            }
            if segment.starts_with('$') {
                return Err(StoreError::InvalidUpdate(format!(
                    "The dollar ($) prefixed field '{segment}' in '{path}' is not valid for storage."
                )));
            }
        }

        if path.as_str() == "_id" {
            if set.get("_id") != document.get("_id") {
                return Err(StoreError::ImmutableField(path.to_string()));
            }
        } else if path.starts_with("_id.") {
            return Err(StoreError::ImmutableField(path.to_string()));
        }

        for other in &paths[i + 1..] {
            let (shorter, longer) = if path.len() <= other.len() {
                (path, other)
            } else {
                (other, path)
            };
            if longer.starts_with(shorter.as_str())
                && longer.as_bytes().get(shorter.len()) == Some(&b'.')
            {
                return Err(StoreError::InvalidUpdate(format!(
                    "Updating the path '{longer}' would create a conflict at '{shorter}'"
                )));
            }
        }
    }

    Ok(())
}

/// Set `value` at a dotted path, creating embedded documents along the way
fn set_field(document: &mut Document, segments: &[&str], value: Bson) -> StoreResult<()> {
    let Some((field, rest)) = segments.split_first() else {
        return Ok(());
    };

    if !rest.is_empty() {
        if let Some(child) = document.get_mut(*field) {
            return set_nested(child, field, rest, value);
        }
    }

    document.insert(*field, nest(rest, value));
    Ok(())
}

/// Continue a path into an existing value named `parent`
fn set_nested(target: &mut Bson, parent: &str, segments: &[&str], value: Bson) -> StoreResult<()> {
    match target {
        Bson::Document(document) => set_field(document, segments, value),
        Bson::Array(items) => {
            let Some((field, rest)) = segments.split_first() else {
                return Ok(());
            };
            let Ok(index) = field.parse::<usize>() else {
                return Err(cannot_create(field, parent, &Bson::Array(items.clone())));
            };

            if index < items.len() {
                if rest.is_empty() {
                    items[index] = value;
                    return Ok(());
                }
                return set_nested(&mut items[index], field, rest, value);
            }

            // Writing past the end pads with nulls
            items.resize(index, Bson::Null);
            items.push(nest(rest, value));
            Ok(())
        }
        other => {
            let field = segments.first().copied().unwrap_or_default();
            Err(cannot_create(field, parent, other))
        }
    }
}

/// Wrap `value` in one embedded document per remaining segment
fn nest(segments: &[&str], value: Bson) -> Bson {
    segments.iter().rev().fold(value, |inner, segment| {
        let mut document = Document::new();
        document.insert(*segment, inner);
        Bson::Document(document)
    })
}

fn cannot_create(field: &str, parent: &str, existing: &Bson) -> StoreError {
    StoreError::InvalidUpdate(format!(
        "Cannot create field '{field}' in element {{{parent}: {existing}}}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::query::SortKey;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn test_insert_assigns_object_id_first() {
        let store = InMemoryStore::new();

        let id = store
            .insert_one("user", doc! { "name": "Alice" })
            .await
            .unwrap();
        let oid = id.as_object_id().unwrap();

        let found = store
            .find_one("user", doc! { "_id": oid })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.keys().next().map(String::as_str), Some("_id"));
        assert_eq!(found.get_str("name").unwrap(), "Alice");
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let store = InMemoryStore::new();
        let oid = ObjectId::new();

        store.insert_one("user", doc! { "_id": oid }).await.unwrap();
        let result = store.insert_one("user", doc! { "_id": oid }).await;

        assert!(matches!(result, Err(StoreError::DuplicateKey(_))));
        assert_eq!(store.count("user").unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_sort_limit_project() {
        let store = InMemoryStore::new();
        for (name, rating) in [("a", 3.0), ("b", 5.0), ("c", 4.0)] {
            store
                .insert_one("user", doc! { "name": name, "rating": rating, "email": "x" })
                .await
                .unwrap();
        }

        let options = FindOptions::new()
            .projection(["name", "rating"])
            .sort(SortKey::desc("rating"))
            .limit(2);
        let docs = store.find("user", doc! {}, options).await.unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].get_str("name").unwrap(), "b");
        assert_eq!(docs[1].get_str("name").unwrap(), "c");
        assert!(docs[0].get("email").is_none());
        assert!(docs[0].get("_id").is_some());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = InMemoryStore::new();
        let id = store
            .insert_one("req", doc! { "userEmail": "a@x.com", "partnerName": "Bob" })
            .await
            .unwrap();

        let updated = store
            .find_one_and_update(
                "req",
                doc! { "_id": id.clone() },
                doc! { "partnerName": "Carol" },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.get_str("partnerName").unwrap(), "Carol");
        assert_eq!(updated.get_str("userEmail").unwrap(), "a@x.com");
    }

    #[tokio::test]
    async fn test_update_cannot_change_id() {
        let store = InMemoryStore::new();
        let id = store.insert_one("req", doc! { "a": 1 }).await.unwrap();

        let result = store
            .find_one_and_update("req", doc! { "_id": id }, doc! { "_id": ObjectId::new() })
            .await;

        assert!(matches!(result, Err(StoreError::ImmutableField(_))));
    }

    async fn store_with_schedule() -> (InMemoryStore, Bson) {
        let store = InMemoryStore::new();
        let id = store
            .insert_one(
                "req",
                doc! {
                    "userEmail": "a@x.com",
                    "schedule": { "day": "Tue", "time": "9" },
                    "topics": ["graphs", "trees"],
                    "partnerName": "Bob",
                },
            )
            .await
            .unwrap();
        (store, id)
    }

    #[tokio::test]
    async fn test_update_dotted_path_sets_nested_field() {
        let (store, id) = store_with_schedule().await;

        let updated = store
            .find_one_and_update(
                "req",
                doc! { "_id": id },
                doc! { "schedule.day": "Mon", "location.room.number": 12 },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            updated.get_document("schedule").unwrap(),
            &doc! { "day": "Mon", "time": "9" }
        );
        assert_eq!(
            updated.get_document("location").unwrap(),
            &doc! { "room": { "number": 12 } }
        );
        assert!(updated.get("schedule.day").is_none());
    }

    #[tokio::test]
    async fn test_update_dotted_path_indexes_arrays() {
        let (store, id) = store_with_schedule().await;

        let updated = store
            .find_one_and_update(
                "req",
                doc! { "_id": id },
                doc! { "topics.1": "heaps", "topics.3": "tries" },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            updated.get_array("topics").unwrap(),
            &vec![
                Bson::String("graphs".into()),
                Bson::String("heaps".into()),
                Bson::Null,
                Bson::String("tries".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_paths() {
        let (store, id) = store_with_schedule().await;

        let cases = [
            (doc! { "$where": 1 }, "dollar ($) prefixed field '$where'"),
            (doc! { "schedule.$day": 1 }, "dollar ($) prefixed field '$day'"),
            (doc! { "schedule..day": 1 }, "empty field name"),
            (doc! { "partnerName.first": "Bo" }, "Cannot create field 'first' in element"),
            (doc! { "topics.first": "Bo" }, "Cannot create field 'first' in element"),
            (
                doc! { "schedule": {}, "schedule.day": "Mon" },
                "would create a conflict at 'schedule'",
            ),
        ];

        for (set, expected) in cases {
            let err = store
                .find_one_and_update("req", doc! { "_id": id.clone() }, set)
                .await
                .unwrap_err();
            assert!(matches!(err, StoreError::InvalidUpdate(_)));
            assert!(err.to_string().contains(expected), "{err}");
        }

        let unchanged = store.find_one("req", doc! { "_id": id }).await.unwrap().unwrap();
        assert_eq!(unchanged.get_str("partnerName").unwrap(), "Bob");
        assert_eq!(unchanged.get_document("schedule").unwrap().get_str("day").unwrap(), "Tue");
    }

    #[tokio::test]
    async fn test_failed_update_leaves_document_unchanged() {
        let (store, id) = store_with_schedule().await;

        // Earlier paths apply to the working copy before the last one fails
        let result = store
            .find_one_and_update(
                "req",
                doc! { "_id": id.clone() },
                doc! { "partnerName": "Carol", "partnerName2.x": 1, "userEmail.x": 1 },
            )
            .await;
        assert!(result.is_err());

        let stored = store.find_one("req", doc! { "_id": id }).await.unwrap().unwrap();
        assert_eq!(stored.get_str("partnerName").unwrap(), "Bob");
        assert!(stored.get("partnerName2").is_none());
    }

    #[tokio::test]
    async fn test_update_cannot_change_nested_id() {
        let (store, id) = store_with_schedule().await;

        let result = store
            .find_one_and_update("req", doc! { "_id": id.clone() }, doc! { "_id.x": 1 })
            .await;
        assert!(matches!(result, Err(StoreError::ImmutableField(path)) if path == "_id.x"));

        // Setting `_id` to its current value is allowed
        let result = store
            .find_one_and_update("req", doc! { "_id": id.clone() }, doc! { "_id": id })
            .await;
        assert!(result.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_then_missing() {
        let store = InMemoryStore::new();
        let id = store.insert_one("req", doc! { "a": 1 }).await.unwrap();

        assert_eq!(store.delete_one("req", doc! { "_id": id.clone() }).await.unwrap(), 1);
        assert_eq!(store.delete_one("req", doc! { "_id": id }).await.unwrap(), 0);
        assert_eq!(store.delete_one("missing", doc! {}).await.unwrap(), 0);
    }
}
