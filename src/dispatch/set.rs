//! Overloaded candidate sets and the selection tournament.

use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, trace};

use crate::conversion::{ConversionRoute, Weight};
use crate::error::CallError;
use crate::gc::GarbageSink;
use crate::host::ScriptValue;
use crate::insight::Insight;
use crate::runtime::Runtime;
use crate::types::TypeHandle;

use super::cache::CacheOutcome;
use super::candidate::CandidateFunction;
use super::compare::{
    compare_alternatives, conversion_possible, remember_weights, OverloadRank,
};

/// Most arguments a call site may pass.
pub const ARGUMENT_ARRAY_LIMIT: usize = 12;

/// Stable identity of an [`OverloadedSet`], usable as a cache-key
/// component. Issued once per set and never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SetId(u64);

impl SetId {
    pub(crate) fn fresh() -> SetId {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        SetId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Ordered collection of candidate functions sharing a symbolic name.
///
/// Alternatives are appended during a registration phase and never
/// reordered or removed afterwards; the set's identity is stable for
/// the life of the process.
pub struct OverloadedSet {
    name: String,
    id: SetId,
    alternatives: Vec<Rc<CandidateFunction>>,
}

impl OverloadedSet {
    /// An empty set. Populate with
    /// [`add_alternative`](Self::add_alternative).
    pub fn new(name: impl Into<String>) -> Self {
        OverloadedSet {
            name: name.into(),
            id: SetId::fresh(),
            alternatives: Vec::new(),
        }
    }

    /// The set's symbolic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The set's stable identity.
    pub fn id(&self) -> SetId {
        self.id
    }

    /// Number of registered alternatives.
    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    /// Declare an additional alternative for overloading. Upon call, it
    /// is considered among the others. Registration-phase only; once
    /// declared, an alternative cannot be removed.
    pub fn add_alternative(&mut self, alternative: Rc<CandidateFunction>) {
        self.alternatives.push(alternative);
    }

    /// Copy every alternative of `other` into this set, preserving
    /// registration order. `other` is left intact and usable.
    pub fn add_alternatives(&mut self, other: &OverloadedSet) {
        self.alternatives.extend(other.alternatives.iter().cloned());
    }

    /// First alternative whose signature matches `prototype` exactly,
    /// without conversions.
    pub fn seek_alternative(&self, prototype: &[TypeHandle]) -> Option<Rc<CandidateFunction>> {
        self.alternatives
            .iter()
            .find(|alt| alt.matches_prototype(prototype))
            .cloned()
    }

    /// Call the overloaded function with the given actual arguments.
    ///
    /// Each alternative with a matching arity is weighed by the
    /// conversions its signature demands, and the lightest one receives
    /// the call. Resolved shapes are memoised, so repeated calls with
    /// the same type and insight fingerprint skip the tournament.
    ///
    /// Fails with [`CallError::OverloadingNoMatch`] when no alternative
    /// offers a possible conversion for every argument, and with
    /// [`CallError::OverloadingAmbiguity`] when the lightest weight
    /// vector is shared by non-identical alternatives.
    pub fn call(&self, runtime: &Runtime, args: &[ScriptValue]) -> Result<ScriptValue, CallError> {
        // The gate precedes type detection: the frontend may have
        // per-call side effects.
        if args.len() > ARGUMENT_ARRAY_LIMIT {
            return Err(CallError::ArgumentArrayLimitExceeded);
        }

        let mut sink = GarbageSink::new(runtime.memory());

        // Fingerprint the actuals.
        let frontend = runtime.frontend();
        let actual_types: Vec<TypeHandle> =
            args.iter().map(|arg| frontend.detect_type(arg)).collect();
        let actual_insights: Vec<Insight> =
            args.iter().map(|arg| frontend.detect_insight(arg)).collect();

        let table = runtime.conversions();

        // Look in the cache first; only a missed shape pays for a full
        // resolution.
        let (chosen, routes) = match runtime.recall(self.id, &actual_types, &actual_insights) {
            CacheOutcome::Impossible => return Err(CallError::OverloadingNoMatch),
            CacheOutcome::Chosen(index) => {
                trace!(set = self.name.as_str(), index, "running cached alternative");
                let alternative = &self.alternatives[index];
                match table.best_sequence_route(
                    &actual_types,
                    &actual_insights,
                    alternative.signature(),
                ) {
                    Ok(routes) => (alternative.clone(), routes),
                    // The table no longer yields the memoised routes;
                    // treat the entry as stale and resolve afresh.
                    Err(_) => self.resolve(runtime, &actual_types, &actual_insights)?,
                }
            }
            CacheOutcome::Missed => self.resolve(runtime, &actual_types, &actual_insights)?,
        };

        // Convert each actual in positional order.
        let converted: Vec<ScriptValue> = args
            .iter()
            .zip(&routes)
            .map(|(arg, route)| route.apply(arg, &mut sink))
            .collect();

        // At last, the call is possible.
        let mut result = chosen.call(&converted)?;

        // Values leaving the native world may carry an edge conversion;
        // the replaced original goes to the sink.
        if let Some(exit) = table.get_edge_conversion(chosen.return_type()) {
            let replaced = exit.apply(&result, &mut sink);
            sink.collect(result);
            result = replaced;
        }

        Ok(result)
    }

    /// Full tournament over the alternatives, in registration order.
    fn resolve(
        &self,
        runtime: &Runtime,
        actual_types: &[TypeHandle],
        actual_insights: &[Insight],
    ) -> Result<(Rc<CandidateFunction>, Vec<ConversionRoute>), CallError> {
        let nargs = actual_types.len();
        let table = runtime.conversions();

        let mut champion: Option<(usize, Rc<CandidateFunction>)> = None;
        let mut champion_routes: Vec<ConversionRoute> = Vec::new();
        let mut champion_weights: Vec<Weight> = vec![Weight::INFINITE; nargs];
        let mut ambiguity_alert = false;

        for (index, alternative) in self.alternatives.iter().enumerate() {
            if alternative.arity() != nargs {
                continue;
            }
            trace!(set = self.name.as_str(), index, "trying alternative");

            let routes = match table.best_sequence_route(
                actual_types,
                actual_insights,
                alternative.signature(),
            ) {
                Ok(routes) => routes,
                Err(_) => {
                    trace!(set = self.name.as_str(), index, "impossible");
                    continue;
                }
            };

            match compare_alternatives(&champion_weights, &routes, actual_insights) {
                OverloadRank::Better => {
                    trace!(set = self.name.as_str(), index, "better");
                    champion_weights = remember_weights(&routes, actual_insights);
                    champion_routes = routes;
                    champion = Some((index, alternative.clone()));
                    ambiguity_alert = false;
                }
                OverloadRank::Equivalent | OverloadRank::Ambiguous => {
                    let identical = champion
                        .as_ref()
                        .is_some_and(|(_, best)| best.identical_signature(alternative));
                    if !identical {
                        ambiguity_alert = true;
                    }
                }
                OverloadRank::Worse => {}
            }
        }

        match champion {
            Some((index, winner)) if conversion_possible(&champion_weights) => {
                if ambiguity_alert {
                    debug!(set = self.name.as_str(), "call is ambiguous");
                    return Err(CallError::OverloadingAmbiguity);
                }
                debug!(set = self.name.as_str(), index, "resolved");
                runtime.remember(self.id, actual_types, actual_insights, index);
                Ok((winner, champion_routes))
            }
            _ => {
                debug!(set = self.name.as_str(), "no overloaded member matches");
                runtime.remember_impossible(self.id, actual_types, actual_insights);
                Err(CallError::OverloadingNoMatch)
            }
        }
    }
}

impl std::fmt::Debug for OverloadedSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverloadedSet")
            .field("name", &self.name)
            .field("alternatives", &self.alternatives.len())
            .finish()
    }
}
