//! Composed conversion chains.

use std::fmt;
use std::rc::Rc;

use crate::gc::GarbageSink;
use crate::host::ScriptValue;
use crate::insight::Insight;

use super::{Conversion, Weight};

/// A finite ordered chain of conversion edges.
///
/// The empty route is the identity: weight zero, value passed through
/// untouched.
#[derive(Clone, Default)]
pub struct ConversionRoute {
    edges: Vec<Rc<dyn Conversion>>,
}

impl ConversionRoute {
    /// The identity route.
    pub fn identity() -> ConversionRoute {
        ConversionRoute { edges: Vec::new() }
    }

    /// A route along the given edge chain. Callers keep the chain
    /// well-typed: each edge's target is the next edge's source.
    pub fn from_edges(edges: Vec<Rc<dyn Conversion>>) -> ConversionRoute {
        ConversionRoute { edges }
    }

    /// Number of edges in the route.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether this is the identity route.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Total cost of the route for a value carrying `insight`.
    ///
    /// The insight refines the incoming value, so only the first edge
    /// observes it; converted intermediates carry no refinement.
    pub fn total_weight(&self, insight: Insight) -> Weight {
        let mut total = Weight::ZERO;
        for (index, edge) in self.edges.iter().enumerate() {
            let step = if index == 0 { insight } else { Insight::NONE };
            total = total + edge.weight(step);
        }
        total
    }

    /// Apply the route to `value`.
    ///
    /// Every edge product is a transient and is collected into `sink`;
    /// the returned value is the final product, or `value` itself for
    /// the identity route.
    pub fn apply(&self, value: &ScriptValue, sink: &mut GarbageSink<'_>) -> ScriptValue {
        let mut current = value.clone();
        for edge in &self.edges {
            let next = edge.apply(&current, sink);
            sink.collect(next.clone());
            current = next;
        }
        current
    }
}

impl fmt::Debug for ConversionRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.edges.is_empty() {
            return write!(f, "ConversionRoute(identity)");
        }
        write!(f, "ConversionRoute(")?;
        write!(f, "{}", self.edges[0].source().name())?;
        for edge in &self.edges {
            write!(f, " -> {}", edge.target().name())?;
        }
        write!(f, ")")
    }
}
