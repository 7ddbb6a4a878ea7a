//! Scoped accumulation of transient conversion products.

use crate::host::{MemoryManager, ScriptValue};

/// Scoped bag of transient values produced by conversions during one
/// call.
///
/// The sink's lifetime brackets a single `call`: every collected value
/// is released to the memory manager exactly once when the sink goes out
/// of scope, and the drop runs on success, selection failure, and
/// native-error paths alike.
pub struct GarbageSink<'a> {
    manager: &'a dyn MemoryManager,
    transients: Vec<ScriptValue>,
}

impl<'a> GarbageSink<'a> {
    pub fn new(manager: &'a dyn MemoryManager) -> Self {
        GarbageSink {
            manager,
            transients: Vec::new(),
        }
    }

    /// Hand a transient value to the sink. It stays alive until the
    /// enclosing call finishes.
    pub fn collect(&mut self, value: ScriptValue) {
        self.transients.push(value);
    }

    /// Number of values currently held.
    pub fn len(&self) -> usize {
        self.transients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transients.is_empty()
    }
}

impl Drop for GarbageSink<'_> {
    fn drop(&mut self) {
        for value in self.transients.drain(..) {
            self.manager.release(value);
        }
    }
}
