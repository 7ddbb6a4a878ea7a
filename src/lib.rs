//! Overload resolution and dispatch core for cross-language binding
//! runtimes.
//!
//! `ferrule` sits between a dynamically typed scripting host and a
//! group of native functions sharing a symbolic name. Given a call site
//! carrying runtime-typed actual arguments, it selects the candidate
//! whose formal signature is cheapest to reach under an
//! implicit-conversion algebra, converts the arguments, invokes the
//! native function, and hands the result back to the host.
//!
//! Three pieces carry the load:
//!
//! - the **conversion algebra** ([`conversion`]): weighted, composable
//!   conversions between argument types, from which minimum-cost routes
//!   are derived;
//! - the **overload selector** ([`dispatch`]): a tournament over
//!   candidates using lexicographic weight-vector comparison with an
//!   explicit ambiguity lattice (better, worse, equivalent, ambiguous);
//! - the **resolution cache** ([`dispatch::ResolutionCache`]): a memo
//!   from call fingerprints (set identity, actual types, insights) to
//!   previously chosen alternatives.
//!
//! The scripting host plugs in through [`Frontend`] (type and insight
//! detection) and [`MemoryManager`] (release of transient converted
//! values); a [`Runtime`] bundles the collaborators into one handle.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use ferrule::{
//!     CandidateFunction, FnConversion, Frontend, Insight, MemoryManager, OverloadedSet,
//!     Runtime, ScriptValue, TypeDescriptor, TypeHandle, Weight,
//! };
//!
//! struct Host {
//!     int: TypeHandle,
//!     double: TypeHandle,
//! }
//!
//! impl Frontend for Host {
//!     fn detect_type(&self, value: &ScriptValue) -> TypeHandle {
//!         if value.is::<i64>() {
//!             self.int.clone()
//!         } else {
//!             self.double.clone()
//!         }
//!     }
//! }
//!
//! impl MemoryManager for Host {
//!     fn release(&self, _value: ScriptValue) {}
//! }
//!
//! let int = TypeDescriptor::new("int");
//! let double = TypeDescriptor::new("double");
//! let host = Rc::new(Host { int: int.clone(), double: double.clone() });
//!
//! let mut runtime = Runtime::new(host.clone(), host.clone());
//! runtime.conversions_mut().add_conversion(Rc::new(FnConversion::new(
//!     &int,
//!     &double,
//!     Weight::promotion(),
//!     |value, _sink| {
//!         let n = *value.downcast_ref::<i64>().unwrap();
//!         Rc::new(n as f64) as ScriptValue
//!     },
//! )));
//!
//! let mut set = OverloadedSet::new("sqrt");
//! set.add_alternative(Rc::new(CandidateFunction::new(
//!     vec![double.clone()],
//!     double.clone(),
//!     |args| {
//!         let x = *args[0].downcast_ref::<f64>().unwrap();
//!         Ok(Rc::new(x.sqrt()) as ScriptValue)
//!     },
//! )));
//!
//! // The i64 actual reaches the f64 formal through the registered
//! // promotion.
//! let result = set.call(&runtime, &[Rc::new(4i64) as ScriptValue]).unwrap();
//! assert_eq!(*result.downcast_ref::<f64>().unwrap(), 2.0);
//! ```

pub mod conversion;
pub mod dispatch;
pub mod error;
pub mod gc;
pub mod host;
pub mod insight;
pub mod runtime;
pub mod types;

pub use conversion::{
    Conversion, ConversionRoute, ConversionTable, Cost, FnConversion, NoApplicableConversion,
    Weight,
};
pub use dispatch::{
    CacheStats, CandidateFunction, OverloadRank, OverloadedSet, ResolutionCache, SetId,
    ARGUMENT_ARRAY_LIMIT,
};
pub use error::{CallError, NativeError};
pub use gc::GarbageSink;
pub use host::{Frontend, MemoryManager, ScriptValue};
pub use insight::Insight;
pub use runtime::Runtime;
pub use types::{same_type, TypeDescriptor, TypeHandle, TypeKey};
