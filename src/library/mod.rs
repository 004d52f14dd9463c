//! The library of saved documents and its persistence

mod store;

pub use store::{KeyValueStore, MemoryStore};

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::document::{Document, DocumentId, MAX_SAFE_ID};
use crate::{OfficeError, Result};

/// Listing entry for a saved document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub id: DocumentId,
    pub title: String,
    pub image_count: usize,
    pub timestamp: DateTime<Utc>,
}

/// Ordered collection of saved documents, unique by id.
///
/// The whole collection is written back on every mutation; there is no
/// incremental format.
#[derive(Debug, Clone, Default)]
pub struct Library {
    documents: Vec<Document>,
    /// Position of each document in `documents`
    index: FxHashMap<DocumentId, usize>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a library from stored documents.
    ///
    /// Entries without an id, or with one a page cannot address, are
    /// skipped; for duplicate ids the first entry wins.
    pub fn from_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let mut library = Self::new();
        for doc in documents {
            let Some(id) = doc.id else {
                tracing::warn!(title = %doc.title, "skipping stored document without id");
                continue;
            };
            if id.0 > MAX_SAFE_ID {
                tracing::warn!(%id, title = %doc.title, "skipping stored document with out-of-range id");
                continue;
            }
            if library.index.contains_key(&id) {
                tracing::warn!(%id, "skipping duplicate stored document");
                continue;
            }
            library.index.insert(id, library.documents.len());
            library.documents.push(doc);
        }
        library
    }

    /// Read the library stored under `key`.
    ///
    /// A missing key is an empty library; a payload that does not parse is
    /// an error.
    pub fn load(store: &impl KeyValueStore, key: &str) -> Result<Self> {
        match store.get(key)? {
            Some(payload) => {
                let documents: Vec<Document> = serde_json::from_str(&payload)?;
                Ok(Self::from_documents(documents))
            }
            None => Ok(Self::new()),
        }
    }

    /// Write the entire library under `key`
    pub fn persist(&self, store: &mut impl KeyValueStore, key: &str) -> Result<()> {
        let payload = serde_json::to_string(&self.documents)?;
        store.set(key, &payload)?;
        tracing::debug!(documents = self.documents.len(), bytes = payload.len(), "library persisted");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn contains(&self, id: DocumentId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: DocumentId) -> Option<&Document> {
        self.index.get(&id).map(|&i| &self.documents[i])
    }

    /// Documents in library order
    pub fn iter(&self) -> impl Iterator<Item = &Document> + '_ {
        self.documents.iter()
    }

    /// Insert or replace a document in place.
    ///
    /// Returns `true` when the document was appended as new.
    pub fn upsert(&mut self, doc: Document) -> Result<bool> {
        let id = doc.id.ok_or_else(|| {
            OfficeError::Storage("cannot store a document without an id".to_string())
        })?;
        match self.index.get(&id) {
            Some(&i) => {
                self.documents[i] = doc;
                Ok(false)
            }
            None => {
                self.index.insert(id, self.documents.len());
                self.documents.push(doc);
                Ok(true)
            }
        }
    }

    /// Remove a document, keeping the order of the rest
    pub fn remove(&mut self, id: DocumentId) -> Option<Document> {
        let position = self.index.remove(&id)?;
        let doc = self.documents.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Some(doc)
    }

    pub fn summaries(&self) -> Vec<DocumentSummary> {
        self.documents
            .iter()
            .filter_map(|doc| {
                Some(DocumentSummary {
                    id: doc.id?,
                    title: doc.title.clone(),
                    image_count: doc.images.len(),
                    timestamp: doc.timestamp,
                })
            })
            .collect()
    }
}
