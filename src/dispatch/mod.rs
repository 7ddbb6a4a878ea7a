//! Overload selection and dispatch.
//!
//! This module selects which native alternative receives a call, based
//! on the runtime types of all arguments under the implicit-conversion
//! algebra of [`crate::conversion`].
//!
//! # Algorithm Overview
//!
//! 1. **Gate**: refuse calls beyond the argument limit
//! 2. **Fingerprint**: detect each actual's type and insight
//! 3. **Probe**: short-circuit through the resolution cache
//! 4. **Tournament**: weigh each arity-matching candidate's conversion
//!    routes against the running champion's
//! 5. **Verdict**: unique winner, no match, or ambiguity
//! 6. **Invoke**: convert the actuals, call, post-process the return
//!
//! # Module Structure
//!
//! - `candidate` - native callables and their signatures
//! - `compare` - the four-valued ambiguity lattice
//! - `cache` - resolution memoisation
//! - `set` - the overloaded set and its tournament

mod cache;
mod candidate;
mod compare;
mod set;


pub use cache::{CacheOutcome, CacheStats, ResolutionCache, DEFAULT_CACHE_CAPACITY};
pub use candidate::{CandidateFunction, NativeInvoker};
pub use compare::{compare_alternatives, conversion_possible, remember_weights, OverloadRank};
pub use set::{OverloadedSet, SetId, ARGUMENT_ARRAY_LIMIT};
