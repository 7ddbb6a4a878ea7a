//! Resolution memoisation.
//!
//! Once a call shape has been resolved, the winning alternative index is
//! remembered under its fingerprint: the set identity plus the actual
//! type and insight vectors. Subsequent identical calls skip the
//! tournament entirely. A known no-match may also be memoised, so
//! repeated failing calls stay cheap.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::insight::Insight;
use crate::types::{TypeHandle, TypeKey};

use super::set::SetId;

/// Default number of fingerprints held before the cache sheds its
/// contents.
pub const DEFAULT_CACHE_CAPACITY: usize = 16 * 1024;

/// Cache fingerprint.
///
/// Owns cloned type-handle and insight vectors; a key never aliases the
/// caller's transient buffers. Arity is implied by the vector lengths.
/// Type equality follows handle identity, insight equality follows
/// value.
#[derive(Clone, PartialEq, Eq, Hash)]
struct Fingerprint {
    set: SetId,
    types: Vec<TypeKey>,
    insights: Vec<Insight>,
}

/// A remembered resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CachedAlternative {
    /// Index of the winning candidate within the set.
    Chosen(usize),
    /// The shape is known to have no match.
    Impossible,
}

/// Outcome of a cache probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// No entry for the fingerprint.
    Missed,
    /// The fingerprint is memoised as unresolvable.
    Impossible,
    /// The fingerprint resolves to the candidate at this index.
    Chosen(usize),
}

/// Hit and miss counters, plus the current entry count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Memo from call fingerprints to chosen alternatives.
pub struct ResolutionCache {
    entries: HashMap<Fingerprint, CachedAlternative>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// A cache that sheds its contents once `capacity` fingerprints are
    /// held.
    pub fn with_capacity(capacity: usize) -> Self {
        ResolutionCache {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    fn fingerprint(set: SetId, types: &[TypeHandle], insights: &[Insight]) -> Fingerprint {
        Fingerprint {
            set,
            types: types.iter().map(TypeKey::new).collect(),
            insights: insights.to_vec(),
        }
    }

    /// Probe for a previous resolution of this call shape.
    pub fn recall(
        &mut self,
        set: SetId,
        types: &[TypeHandle],
        insights: &[Insight],
    ) -> CacheOutcome {
        let key = Self::fingerprint(set, types, insights);
        match self.entries.get(&key) {
            Some(CachedAlternative::Chosen(index)) => {
                self.hits += 1;
                trace!(?set, index, "resolution cache hit");
                CacheOutcome::Chosen(*index)
            }
            Some(CachedAlternative::Impossible) => {
                self.hits += 1;
                trace!(?set, "resolution cache hit: known no-match");
                CacheOutcome::Impossible
            }
            None => {
                self.misses += 1;
                CacheOutcome::Missed
            }
        }
    }

    /// Remember a winning resolution.
    pub fn remember(
        &mut self,
        set: SetId,
        types: &[TypeHandle],
        insights: &[Insight],
        chosen: usize,
    ) {
        self.insert(
            Self::fingerprint(set, types, insights),
            CachedAlternative::Chosen(chosen),
        );
    }

    /// Memoise a known no-match.
    pub fn remember_impossible(&mut self, set: SetId, types: &[TypeHandle], insights: &[Insight]) {
        self.insert(
            Self::fingerprint(set, types, insights),
            CachedAlternative::Impossible,
        );
    }

    fn insert(&mut self, key: Fingerprint, value: CachedAlternative) {
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            debug!(entries = self.entries.len(), "resolution cache full, shedding");
            self.entries.clear();
        }
        self.entries.insert(key, value);
    }

    /// Drop every entry. Counters survive a flush.
    pub fn flush(&mut self) {
        debug!(entries = self.entries.len(), "flushing resolution cache");
        self.entries.clear();
    }

    /// Instrumentation counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::types::TypeDescriptor;

    use super::*;

    fn set_id() -> SetId {
        SetId::fresh()
    }

    #[test]
    fn test_miss_then_hit() {
        let mut cache = ResolutionCache::new();
        let set = set_id();
        let int = TypeDescriptor::new("int");
        let types = vec![int.clone()];
        let insights = vec![Insight::NONE];

        assert_eq!(cache.recall(set, &types, &insights), CacheOutcome::Missed);
        cache.remember(set, &types, &insights, 3);
        assert_eq!(cache.recall(set, &types, &insights), CacheOutcome::Chosen(3));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn test_key_distinguishes_sets() {
        let mut cache = ResolutionCache::new();
        let a = set_id();
        let b = set_id();
        let int = TypeDescriptor::new("int");
        let types = vec![int.clone()];
        let insights = vec![Insight::NONE];

        cache.remember(a, &types, &insights, 0);
        assert_eq!(cache.recall(b, &types, &insights), CacheOutcome::Missed);
    }

    #[test]
    fn test_key_distinguishes_type_identity() {
        let mut cache = ResolutionCache::new();
        let set = set_id();
        // Same display name, different descriptors.
        let int1 = TypeDescriptor::new("int");
        let int2 = TypeDescriptor::new("int");
        let insights = vec![Insight::NONE];

        cache.remember(set, &[int1.clone()], &insights, 0);
        assert_eq!(
            cache.recall(set, &[int2.clone()], &insights),
            CacheOutcome::Missed
        );
        assert_eq!(
            cache.recall(set, &[int1.clone()], &insights),
            CacheOutcome::Chosen(0)
        );
    }

    #[test]
    fn test_key_distinguishes_insights() {
        let mut cache = ResolutionCache::new();
        let set = set_id();
        let base = TypeDescriptor::new("base");
        let types = vec![base.clone()];

        cache.remember(set, &types, &[Insight::refined(1)], 1);
        assert_eq!(
            cache.recall(set, &types, &[Insight::NONE]),
            CacheOutcome::Missed
        );
        assert_eq!(
            cache.recall(set, &types, &[Insight::refined(1)]),
            CacheOutcome::Chosen(1)
        );
    }

    #[test]
    fn test_impossible_sentinel() {
        let mut cache = ResolutionCache::new();
        let set = set_id();
        let int = TypeDescriptor::new("int");
        let types = vec![int.clone()];
        let insights = vec![Insight::NONE];

        cache.remember_impossible(set, &types, &insights);
        assert_eq!(
            cache.recall(set, &types, &insights),
            CacheOutcome::Impossible
        );
    }

    #[test]
    fn test_flush_forgets_everything() {
        let mut cache = ResolutionCache::new();
        let set = set_id();
        let int = TypeDescriptor::new("int");
        let types = vec![int.clone()];
        let insights = vec![Insight::NONE];

        cache.remember(set, &types, &insights, 0);
        cache.flush();
        assert_eq!(cache.recall(set, &types, &insights), CacheOutcome::Missed);
        assert_eq!(cache.stats().entries, 0);
    }

    #[test]
    fn test_sheds_under_insertion_pressure() {
        let mut cache = ResolutionCache::with_capacity(2);
        let set = set_id();
        let a = TypeDescriptor::new("a");
        let b = TypeDescriptor::new("b");
        let c = TypeDescriptor::new("c");
        let insights = vec![Insight::NONE];

        cache.remember(set, &[a.clone()], &insights, 0);
        cache.remember(set, &[b.clone()], &insights, 1);
        assert_eq!(cache.stats().entries, 2);

        // The third insert trips the bound; the survivors are shed.
        cache.remember(set, &[c.clone()], &insights, 2);
        assert_eq!(cache.stats().entries, 1);
        assert_eq!(cache.recall(set, &[c], &insights), CacheOutcome::Chosen(2));
        assert_eq!(cache.recall(set, &[a], &insights), CacheOutcome::Missed);
    }

    #[test]
    fn test_overwriting_an_entry_does_not_shed() {
        let mut cache = ResolutionCache::with_capacity(1);
        let set = set_id();
        let a = TypeDescriptor::new("a");
        let insights = vec![Insight::NONE];

        cache.remember(set, &[a.clone()], &insights, 0);
        cache.remember(set, &[a.clone()], &insights, 0);
        assert_eq!(cache.stats().entries, 1);
        assert_eq!(cache.recall(set, &[a], &insights), CacheOutcome::Chosen(0));
    }
}
