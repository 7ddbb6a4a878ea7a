//! Argument type identity.
//!
//! A [`TypeDescriptor`] is the identity token for one native argument
//! type. Descriptors are created once during the registration phase and
//! never mutated; two actuals have the same type iff their handles point
//! at the same descriptor. Every identity comparison in the crate
//! reduces to pointer equality on the handle.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Identity token for a native argument type.
///
/// Descriptors carry no structure beyond a display name: the conversion
/// table supplies all relationships between types, and the frontend is
/// responsible for mapping scripting values onto handles.
pub struct TypeDescriptor {
    /// Display name, used in traces and error messages.
    name: String,
}

impl TypeDescriptor {
    /// Create a descriptor. The returned handle is the type's identity
    /// for the rest of the process lifetime.
    pub fn new(name: impl Into<String>) -> TypeHandle {
        Rc::new(TypeDescriptor { name: name.into() })
    }

    /// The type's display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDescriptor({})", self.name)
    }
}

/// Shared handle to a [`TypeDescriptor`].
pub type TypeHandle = Rc<TypeDescriptor>;

/// Whether two handles denote the same type.
pub fn same_type(a: &TypeHandle, b: &TypeHandle) -> bool {
    Rc::ptr_eq(a, b)
}

/// Map and ordering key wrapping a [`TypeHandle`].
///
/// `Eq`, `Hash` and `Ord` all follow pointer identity, so two
/// descriptors that happen to share a name remain distinct keys.
#[derive(Clone)]
pub struct TypeKey(TypeHandle);

impl TypeKey {
    pub fn new(handle: &TypeHandle) -> Self {
        TypeKey(handle.clone())
    }

    /// The wrapped handle.
    pub fn handle(&self) -> &TypeHandle {
        &self.0
    }

    fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.addr());
    }
}

impl PartialOrd for TypeKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.addr().cmp(&other.addr())
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.0.name())
    }
}
