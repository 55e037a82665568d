use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;
use tracing::debug;

use crate::core::RawTable;
use crate::error::DashboardResult;

use super::loader::load_table;

/// Runtime metrics of a [`TableCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

#[derive(Debug, Default)]
struct CacheState {
    tables: HashMap<PathBuf, Arc<RawTable>>,
    hits: u64,
    misses: u64,
}

/// Memoizes loaded tables by file path. Failed loads are not cached.
#[derive(Debug, Default)]
pub struct TableCache {
    state: Mutex<CacheState>,
}

static SHARED_TABLE_CACHE: Lazy<TableCache> = Lazy::new(TableCache::default);

/// Process-wide cache used by [`super::Dashboard::open`].
#[must_use]
pub fn shared_table_cache() -> &'static TableCache {
    &SHARED_TABLE_CACHE
}

impl TableCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&self, path: impl AsRef<Path>) -> DashboardResult<Arc<RawTable>> {
        self.get_or_load_with(path, |path| load_table(path))
    }

    /// Like [`Self::get_or_load`] with a custom loader for cache misses.
    pub fn get_or_load_with(
        &self,
        path: impl AsRef<Path>,
        loader: impl FnOnce(&Path) -> DashboardResult<RawTable>,
    ) -> DashboardResult<Arc<RawTable>> {
        let path = path.as_ref();
        {
            let mut state = self.lock();
            if let Some(table) = state.tables.get(path).cloned() {
                state.hits += 1;
                debug!(path = %path.display(), "table cache hit");
                return Ok(table);
            }
            state.misses += 1;
        }

        debug!(path = %path.display(), "table cache miss");
        let table = Arc::new(loader(path)?);
        let mut state = self.lock();
        let entry = state
            .tables
            .entry(path.to_path_buf())
            .or_insert_with(|| Arc::clone(&table));
        Ok(Arc::clone(entry))
    }

    pub fn clear(&self) {
        let mut state = self.lock();
        state.tables.clear();
        state.hits = 0;
        state.misses = 0;
    }

    #[must_use]
    pub fn stats(&self) -> TableCacheStats {
        let state = self.lock();
        TableCacheStats {
            hits: state.hits,
            misses: state.misses,
            size: state.tables.len(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
