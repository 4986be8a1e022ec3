use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;

use crate::document::{Document, Pos};
use crate::protocol::SourceUri;

/// The current version of every open document.
///
/// Every call to [`DocumentStore::open`] hands out a fresh block of global
/// positions, so positions taken from a superseded version no longer resolve.
pub struct DocumentStore {
    documents: DashMap<SourceUri, Arc<Document>>,
    /// Index of the next unused `Pos`
    next_index: AtomicUsize,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self {
            documents: DashMap::new(),
            next_index: AtomicUsize::new(0),
        }
    }
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new version of `uri`, replacing any previous one.
    pub fn open(&self, uri: SourceUri, bytes: impl Into<Vec<u8>>) -> Arc<Document> {
        let bytes = bytes.into();
        // One extra position so that end of file is addressable
        let index = self.next_index.fetch_add(bytes.len() + 1, Ordering::Relaxed);
        let document = Arc::new(Document::with_base(
            uri.clone(),
            bytes,
            Pos::from_index(index),
        ));

        if let Some(previous) = self.documents.insert(uri, Arc::clone(&document)) {
            log::debug!(
                target: "posbridge::store",
                "Replaced {} (base {} -> {})",
                previous.uri(),
                previous.base(),
                document.base()
            );
        }
        document
    }

    pub fn get(&self, uri: &SourceUri) -> Option<Arc<Document>> {
        self.documents.get(uri).map(|entry| Arc::clone(entry.value()))
    }

    pub fn close(&self, uri: &SourceUri) -> Option<Arc<Document>> {
        self.documents.remove(uri).map(|(_, document)| document)
    }

    /// Find the open document owning `pos` and the byte offset it maps to.
    pub fn resolve(&self, pos: Pos) -> Option<(Arc<Document>, usize)> {
        self.documents.iter().find_map(|entry| {
            entry
                .value()
                .offset(pos)
                .map(|offset| (Arc::clone(entry.value()), offset))
        })
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
