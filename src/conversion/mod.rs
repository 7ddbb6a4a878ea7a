//! The implicit-conversion algebra.
//!
//! Conversions are weighted, composable edges between argument types.
//! [`ConversionRoute`]s chain edges into paths; the [`ConversionTable`]
//! registers edges and derives minimum-cost routes from actual to formal
//! types, one argument position at a time.
//!
//! # Module Structure
//!
//! - [`weight`] - the lexicographic cost algebra
//! - [`route`] - composed edge chains
//! - [`table`] - the edge registry and best-route search

mod route;
mod table;
mod weight;

pub use route::ConversionRoute;
pub use table::{ConversionTable, NoApplicableConversion};
pub use weight::{Cost, Weight};

use crate::gc::GarbageSink;
use crate::host::ScriptValue;
use crate::insight::Insight;
use crate::types::TypeHandle;

/// One edge of the conversion graph: a weighted value transformation
/// from one argument type to another.
///
/// Implementations may inspect the insight when weighing themselves, so
/// a single registered edge can cost differently for different runtime
/// shapes of its source type.
pub trait Conversion {
    /// The type this edge departs from.
    fn source(&self) -> &TypeHandle;

    /// The type this edge arrives at.
    fn target(&self) -> &TypeHandle;

    /// Cost of taking this edge for a value carrying `insight`.
    fn weight(&self, insight: Insight) -> Weight;

    /// Convert `value`. Anything the edge allocates beyond its return
    /// value goes into `sink`.
    fn apply(&self, value: &ScriptValue, sink: &mut GarbageSink<'_>) -> ScriptValue;
}

type WeightFn = dyn Fn(Insight) -> Weight;
type ApplyFn = dyn Fn(&ScriptValue, &mut GarbageSink<'_>) -> ScriptValue;

/// Closure-backed [`Conversion`].
///
/// The stock implementation for hosts that register conversions as plain
/// functions; anything fancier can implement the trait directly.
pub struct FnConversion {
    source: TypeHandle,
    target: TypeHandle,
    weight: Box<WeightFn>,
    apply: Box<ApplyFn>,
}

impl FnConversion {
    /// An edge with a fixed weight.
    pub fn new(
        source: &TypeHandle,
        target: &TypeHandle,
        weight: Weight,
        apply: impl Fn(&ScriptValue, &mut GarbageSink<'_>) -> ScriptValue + 'static,
    ) -> FnConversion {
        Self::insight_sensitive(source, target, move |_| weight, apply)
    }

    /// An edge whose weight depends on the caller-supplied insight.
    pub fn insight_sensitive(
        source: &TypeHandle,
        target: &TypeHandle,
        weight: impl Fn(Insight) -> Weight + 'static,
        apply: impl Fn(&ScriptValue, &mut GarbageSink<'_>) -> ScriptValue + 'static,
    ) -> FnConversion {
        FnConversion {
            source: source.clone(),
            target: target.clone(),
            weight: Box::new(weight),
            apply: Box::new(apply),
        }
    }
}

impl Conversion for FnConversion {
    fn source(&self) -> &TypeHandle {
        &self.source
    }

    fn target(&self) -> &TypeHandle {
        &self.target
    }

    fn weight(&self, insight: Insight) -> Weight {
        (self.weight)(insight)
    }

    fn apply(&self, value: &ScriptValue, sink: &mut GarbageSink<'_>) -> ScriptValue {
        (self.apply)(value, sink)
    }
}
