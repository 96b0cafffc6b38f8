//! Version-keyed cache of parsed documents.
//!
//! Each document id maps to the last version parsed for it. A request with
//! the same version returns the stored [`ParsedDocument`] without lexing;
//! any other version re-parses the whole text and replaces the entry.
//! Entries are evicted least-recently-used first once the capacity is hit.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use indexmap::IndexMap;

use crate::document::ParsedDocument;
use crate::parser::ParseOptions;
use crate::{Error, Result};

pub const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of live documents.
    pub capacity: usize,
    pub options: ParseOptions,
}

impl CacheConfig {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        Ok(Self {
            capacity,
            options: ParseOptions::default(),
        })
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            options: ParseOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    /// Documents currently held.
    pub len: usize,
}

/// One document version. The parse runs outside the map lock; callers
/// asking for the same version wait on the cell.
#[derive(Debug)]
struct Slot {
    version: i32,
    doc: OnceLock<Arc<ParsedDocument>>,
}

#[derive(Debug, Default)]
struct Inner {
    /// Ordered from least to most recently used.
    entries: IndexMap<String, Arc<Slot>>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

/// Shared by all callers of one service.
///
/// The map lock only guards lookups and bookkeeping. Requests for one
/// document are serialized on its slot, so concurrent callers never parse
/// the same version twice, while different documents parse in parallel.
#[derive(Debug, Default)]
pub struct ParseCache {
    config: CacheConfig,
    inner: Mutex<Inner>,
}

impl ParseCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Entries are replaced whole, so a panic elsewhere cannot leave one
        // half-written.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[tracing::instrument(skip(self, text), fields(len = text.len()))]
    pub fn get_or_parse(&self, doc_id: &str, version: i32, text: &str) -> Arc<ParsedDocument> {
        let options = self.config.options;
        self.get_or_parse_with(doc_id, version, || {
            ParsedDocument::parse(version, text, options)
        })
    }

    pub(crate) fn get_or_parse_with(
        &self,
        doc_id: &str,
        version: i32,
        parse: impl FnOnce() -> ParsedDocument,
    ) -> Arc<ParsedDocument> {
        let slot = self.slot(doc_id, version);
        Arc::clone(slot.doc.get_or_init(|| Arc::new(parse())))
    }

    /// Finds or installs the slot for `doc_id` at `version`, marking it most
    /// recently used.
    fn slot(&self, doc_id: &str, version: i32) -> Arc<Slot> {
        let mut inner = self.lock();

        if let Some(index) = inner.entries.get_index_of(doc_id) {
            let last = inner.entries.len() - 1;
            inner.entries.move_index(index, last);
            if let Some((_, slot)) = inner.entries.get_index(last)
                && slot.version == version
            {
                let slot = Arc::clone(slot);
                inner.hits += 1;
                tracing::debug!("cache hit");
                return slot;
            }
        }

        inner.misses += 1;
        tracing::debug!("cache miss");
        let slot = Arc::new(Slot {
            version,
            doc: OnceLock::new(),
        });
        inner
            .entries
            .insert(doc_id.to_string(), Arc::clone(&slot));

        while inner.entries.len() > self.config.capacity {
            if let Some((evicted, _)) = inner.entries.shift_remove_index(0) {
                inner.evictions += 1;
                tracing::debug!(%evicted, "evicted");
            }
        }

        slot
    }

    /// Cached document for `doc_id`, whatever its version. `None` while its
    /// first parse is still running.
    pub fn get(&self, doc_id: &str) -> Option<Arc<ParsedDocument>> {
        let slot = self.lock().entries.get(doc_id).cloned()?;
        slot.doc.get().cloned()
    }

    /// Drops the entry for a closed document.
    pub fn invalidate(&self, doc_id: &str) -> bool {
        let removed = self.lock().entries.shift_remove(doc_id).is_some();
        if removed {
            tracing::debug!(doc_id, "invalidated");
        }
        removed
    }

    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            evictions: inner.evictions,
            len: inner.entries.len(),
        }
    }
}
