//! The conversion-table registry.
//!
//! Vertices are argument types; edges are registered [`Conversion`]s.
//! [`ConversionTable::best_sequence_route`] answers "cheapest route from
//! each actual type, under its insight, to the corresponding formal
//! type" one position at a time. Positions are never jointly optimised.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::rc::Rc;

use thiserror::Error;
use tracing::trace;

use crate::insight::Insight;
use crate::types::{same_type, TypeHandle, TypeKey};

use super::{Conversion, ConversionRoute, Weight};

/// Failure of one argument position to reach its formal type.
///
/// Recoverable: the overload tournament disqualifies the candidate that
/// demanded the route and moves on.
#[derive(Debug, Clone, Error)]
#[error("no applicable conversion from {from} to {to} at argument {position}")]
pub struct NoApplicableConversion {
    /// Index of the failing argument position.
    pub position: usize,
    /// Name of the actual (source) type.
    pub from: String,
    /// Name of the formal (target) type.
    pub to: String,
}

/// Registry of conversion edges and return-path edge conversions.
///
/// Populated during the registration phase; read-only once calls begin.
#[derive(Default)]
pub struct ConversionTable {
    /// Adjacency by source type.
    edges: HashMap<TypeKey, Vec<Rc<dyn Conversion>>>,
    /// Conversions applied to values leaving the native world, keyed by
    /// return type.
    exits: HashMap<TypeKey, Rc<dyn Conversion>>,
}

impl ConversionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a conversion edge.
    pub fn add_conversion(&mut self, conversion: Rc<dyn Conversion>) {
        self.edges
            .entry(TypeKey::new(conversion.source()))
            .or_default()
            .push(conversion);
    }

    /// Register the edge conversion applied to native results of `ty`.
    pub fn set_edge_conversion(&mut self, ty: &TypeHandle, conversion: Rc<dyn Conversion>) {
        self.exits.insert(TypeKey::new(ty), conversion);
    }

    /// The edge conversion for native results of `ty`, if any.
    pub fn get_edge_conversion(&self, ty: &TypeHandle) -> Option<Rc<dyn Conversion>> {
        self.exits.get(&TypeKey::new(ty)).cloned()
    }

    /// Cheapest route from `actual` (carrying `insight`) to `formal`,
    /// or `None` when no possible route exists.
    pub fn best_route(
        &self,
        actual: &TypeHandle,
        insight: Insight,
        formal: &TypeHandle,
    ) -> Option<ConversionRoute> {
        if same_type(actual, formal) {
            return Some(ConversionRoute::identity());
        }
        self.search(actual, insight, formal)
    }

    /// Per-position cheapest routes from the actual types to a formal
    /// signature. Fails on the first position with no possible route.
    pub fn best_sequence_route(
        &self,
        actual_types: &[TypeHandle],
        insights: &[Insight],
        formal_types: &[TypeHandle],
    ) -> Result<Vec<ConversionRoute>, NoApplicableConversion> {
        debug_assert_eq!(actual_types.len(), insights.len());
        debug_assert_eq!(actual_types.len(), formal_types.len());

        let mut routes = Vec::with_capacity(actual_types.len());
        for (position, (actual, formal)) in actual_types.iter().zip(formal_types).enumerate() {
            match self.best_route(actual, insights[position], formal) {
                Some(route) => routes.push(route),
                None => {
                    trace!(
                        position,
                        from = actual.name(),
                        to = formal.name(),
                        "no applicable conversion"
                    );
                    return Err(NoApplicableConversion {
                        position,
                        from: actual.name().to_string(),
                        to: formal.name().to_string(),
                    });
                }
            }
        }
        Ok(routes)
    }

    /// Uniform-cost search over the typed edges, minimising the route's
    /// total weight under `insight`.
    fn search(
        &self,
        actual: &TypeHandle,
        insight: Insight,
        formal: &TypeHandle,
    ) -> Option<ConversionRoute> {
        let start = TypeKey::new(actual);
        let goal = TypeKey::new(formal);

        let mut best: HashMap<TypeKey, Weight> = HashMap::new();
        let mut via: HashMap<TypeKey, Rc<dyn Conversion>> = HashMap::new();
        let mut frontier = BinaryHeap::new();

        best.insert(start.clone(), Weight::ZERO);
        frontier.push(Reverse((Weight::ZERO, start.clone())));

        while let Some(Reverse((weight, node))) = frontier.pop() {
            if best.get(&node).is_some_and(|known| *known < weight) {
                continue; // stale frontier entry
            }
            if node == goal {
                let route = reconstruct(&via, &start, &goal);
                trace!(
                    from = actual.name(),
                    to = formal.name(),
                    steps = route.len(),
                    "route found"
                );
                return Some(route);
            }
            let Some(outgoing) = self.edges.get(&node) else {
                continue;
            };
            // The insight describes the incoming value, so only edges
            // leaving the actual type observe it.
            let step_insight = if node == start { insight } else { Insight::NONE };
            for edge in outgoing {
                let stepped = weight + edge.weight(step_insight);
                if !stepped.is_possible() {
                    continue;
                }
                let next = TypeKey::new(edge.target());
                if best.get(&next).map_or(true, |known| stepped < *known) {
                    best.insert(next.clone(), stepped);
                    via.insert(next.clone(), edge.clone());
                    frontier.push(Reverse((stepped, next)));
                }
            }
        }

        None
    }
}

/// Walk the predecessor edges back from the goal and flip them into a
/// route.
fn reconstruct(
    via: &HashMap<TypeKey, Rc<dyn Conversion>>,
    start: &TypeKey,
    goal: &TypeKey,
) -> ConversionRoute {
    let mut chain = Vec::new();
    let mut cursor = goal.clone();
    while cursor != *start {
        let edge = via
            .get(&cursor)
            .expect("every settled node has a predecessor edge")
            .clone();
        cursor = TypeKey::new(edge.source());
        chain.push(edge);
    }
    chain.reverse();
    ConversionRoute::from_edges(chain)
}
