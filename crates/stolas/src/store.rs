//! Passage storage backends.

use std::collections::HashMap;
use std::sync::Arc;

use paimon_core::{Error, Passage, Result};
use parking_lot::RwLock;

/// Trait for passage storage backends.
///
/// Stores are append-only: passages are never updated or removed once added,
/// and `list` returns them in insertion order.
pub trait PassageStore: Send + Sync {
    /// Adds a passage, assigning it a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `text` is empty or whitespace.
    fn add(&self, text: &str, source: &str) -> Result<Arc<Passage>>;

    /// Adds several passages at once.
    ///
    /// Every entry is validated before any is inserted, so a rejected batch
    /// leaves the store unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if any entry has empty text.
    fn extend(&self, entries: Vec<(String, String)>) -> Result<Vec<Arc<Passage>>>;

    /// Returns a snapshot of every passage in insertion order.
    fn list(&self) -> Vec<Arc<Passage>>;

    /// Gets a passage by identifier.
    fn get(&self, id: &str) -> Option<Arc<Passage>>;

    /// Returns the number of stored passages.
    fn len(&self) -> usize;

    /// Returns `true` if the store holds no passages.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Default)]
struct Corpus {
    passages: Vec<Arc<Passage>>,
    by_id: HashMap<String, usize>,
}

impl Corpus {
    fn push(&mut self, passage: Passage) -> Arc<Passage> {
        let passage = Arc::new(passage);
        self.by_id.insert(passage.id.clone(), self.passages.len());
        self.passages.push(Arc::clone(&passage));
        passage
    }
}

/// In-memory passage store.
///
/// Writers serialize on the write lock; readers clone `Arc`s out under the
/// read lock and never see a half-inserted passage.
pub struct InMemoryStore {
    corpus: RwLock<Corpus>,
}

impl InMemoryStore {
    /// Creates a new, empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            corpus: RwLock::new(Corpus::default()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(text: &str, source: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(Error::invalid_input(format!(
            "passage text must not be empty (source: {source})"
        )));
    }
    Ok(())
}

impl PassageStore for InMemoryStore {
    fn add(&self, text: &str, source: &str) -> Result<Arc<Passage>> {
        validate(text, source)?;

        let passage = self.corpus.write().push(Passage::new(text, source));
        tracing::debug!(id = %passage.id, source = %passage.source, "Passage added");
        Ok(passage)
    }

    fn extend(&self, entries: Vec<(String, String)>) -> Result<Vec<Arc<Passage>>> {
        for (text, source) in &entries {
            validate(text, source)?;
        }

        let mut corpus = self.corpus.write();
        let added: Vec<_> = entries
            .into_iter()
            .map(|(text, source)| corpus.push(Passage::new(text, source)))
            .collect();
        drop(corpus);

        tracing::debug!(count = added.len(), "Passages added");
        Ok(added)
    }

    fn list(&self) -> Vec<Arc<Passage>> {
        self.corpus.read().passages.clone()
    }

    fn get(&self, id: &str) -> Option<Arc<Passage>> {
        let corpus = self.corpus.read();
        corpus
            .by_id
            .get(id)
            .and_then(|&idx| corpus.passages.get(idx))
            .cloned()
    }

    fn len(&self) -> usize {
        self.corpus.read().passages.len()
    }
}
