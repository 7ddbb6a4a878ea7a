//! The embedding-runtime handle.
//!
//! Dispatch needs three collaborators beyond the set being called: the
//! scripting frontend that fingerprints values, the conversion table,
//! and the process-wide resolution cache. [`Runtime`] bundles them into
//! one handle threaded through calls.

use std::cell::RefCell;
use std::rc::Rc;

use crate::conversion::ConversionTable;
use crate::dispatch::{CacheOutcome, CacheStats, ResolutionCache, SetId};
use crate::host::{Frontend, MemoryManager};
use crate::insight::Insight;
use crate::types::TypeHandle;

/// Everything a dispatch call needs from its surroundings.
///
/// Dispatch is strictly synchronous and single-threaded with respect to
/// the scripting host: a call runs to completion on the thread that
/// initiates it, so the cache sits behind a `RefCell`.
///
/// The conversion table is populated during a registration phase that
/// precedes all calls and is read-only afterwards.
pub struct Runtime {
    frontend: Rc<dyn Frontend>,
    memory: Rc<dyn MemoryManager>,
    conversions: ConversionTable,
    cache: RefCell<ResolutionCache>,
}

impl Runtime {
    /// A runtime with an empty conversion table and the default cache
    /// capacity.
    pub fn new(frontend: Rc<dyn Frontend>, memory: Rc<dyn MemoryManager>) -> Self {
        Runtime {
            frontend,
            memory,
            conversions: ConversionTable::new(),
            cache: RefCell::new(ResolutionCache::new()),
        }
    }

    /// Replace the resolution cache with one bounded at `capacity`
    /// fingerprints.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = RefCell::new(ResolutionCache::with_capacity(capacity));
        self
    }

    /// The active scripting frontend.
    pub fn frontend(&self) -> &dyn Frontend {
        self.frontend.as_ref()
    }

    /// The memory manager transient values are released to.
    pub fn memory(&self) -> &dyn MemoryManager {
        self.memory.as_ref()
    }

    /// The conversion table, read side.
    pub fn conversions(&self) -> &ConversionTable {
        &self.conversions
    }

    /// The conversion table, for registration-phase mutation.
    pub fn conversions_mut(&mut self) -> &mut ConversionTable {
        &mut self.conversions
    }

    /// Flush the resolution cache. The next call on any set performs a
    /// full tournament.
    pub fn force_recompute(&self) {
        self.cache.borrow_mut().flush();
    }

    /// Resolution-cache instrumentation counters.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.borrow().stats()
    }

    pub(crate) fn recall(
        &self,
        set: SetId,
        types: &[TypeHandle],
        insights: &[Insight],
    ) -> CacheOutcome {
        self.cache.borrow_mut().recall(set, types, insights)
    }

    pub(crate) fn remember(
        &self,
        set: SetId,
        types: &[TypeHandle],
        insights: &[Insight],
        chosen: usize,
    ) {
        self.cache.borrow_mut().remember(set, types, insights, chosen);
    }

    pub(crate) fn remember_impossible(
        &self,
        set: SetId,
        types: &[TypeHandle],
        insights: &[Insight],
    ) {
        self.cache
            .borrow_mut()
            .remember_impossible(set, types, insights);
    }
}
