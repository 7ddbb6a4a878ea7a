//! Native callables and their formal signatures.

use std::fmt;

use crate::error::NativeError;
use crate::host::ScriptValue;
use crate::types::{same_type, TypeHandle};

/// The native-invoker shape: marshal a vector of already-converted
/// scripting values into the native call's ABI and wrap the native
/// return.
pub type NativeInvoker = dyn Fn(&[ScriptValue]) -> Result<ScriptValue, NativeError>;

/// One native function in an overloaded set: formal signature, return
/// type, and the opaque invoker.
pub struct CandidateFunction {
    signature: Vec<TypeHandle>,
    return_type: TypeHandle,
    invoker: Box<NativeInvoker>,
}

impl CandidateFunction {
    pub fn new(
        signature: Vec<TypeHandle>,
        return_type: TypeHandle,
        invoker: impl Fn(&[ScriptValue]) -> Result<ScriptValue, NativeError> + 'static,
    ) -> CandidateFunction {
        CandidateFunction {
            signature,
            return_type,
            invoker: Box::new(invoker),
        }
    }

    /// Formal parameter types, in positional order.
    pub fn signature(&self) -> &[TypeHandle] {
        &self.signature
    }

    /// Declared return type.
    pub fn return_type(&self) -> &TypeHandle {
        &self.return_type
    }

    /// Number of formal parameters.
    pub fn arity(&self) -> usize {
        self.signature.len()
    }

    /// Invoke the native function with already-converted arguments.
    ///
    /// A failure here propagates verbatim out of the enclosing call.
    pub fn call(&self, converted: &[ScriptValue]) -> Result<ScriptValue, NativeError> {
        (self.invoker)(converted)
    }

    /// Element-wise signature identity with another candidate.
    ///
    /// Keeps const and non-const versions of the same member, which
    /// share a signature, from reading as an ambiguity.
    pub fn identical_signature(&self, other: &CandidateFunction) -> bool {
        self.matches_prototype(&other.signature)
    }

    /// Element-wise signature identity against a bare prototype.
    pub fn matches_prototype(&self, prototype: &[TypeHandle]) -> bool {
        self.signature.len() == prototype.len()
            && self
                .signature
                .iter()
                .zip(prototype)
                .all(|(a, b)| same_type(a, b))
    }
}

impl fmt::Debug for CandidateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn(")?;
        for (i, ty) in self.signature.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", ty.name())?;
        }
        write!(f, ") -> {}", self.return_type.name())
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::types::TypeDescriptor;

    use super::*;

    fn unit_candidate(signature: Vec<TypeHandle>, ret: &TypeHandle) -> CandidateFunction {
        CandidateFunction::new(signature, ret.clone(), |_| {
            Ok(Rc::new(()) as ScriptValue)
        })
    }

    #[test]
    fn test_identical_signature_is_reflexive_and_symmetric() {
        let int = TypeDescriptor::new("int");
        let double = TypeDescriptor::new("double");
        let a = unit_candidate(vec![int.clone(), double.clone()], &int);
        let b = unit_candidate(vec![int.clone(), double.clone()], &double);
        let c = unit_candidate(vec![double.clone(), int.clone()], &int);

        assert!(a.identical_signature(&a));
        assert!(a.identical_signature(&b));
        assert!(b.identical_signature(&a));
        assert!(!a.identical_signature(&c));
    }

    #[test]
    fn test_signature_identity_is_structural_on_handles() {
        // Same name, different descriptor: not the same type.
        let int1 = TypeDescriptor::new("int");
        let int2 = TypeDescriptor::new("int");
        let a = unit_candidate(vec![int1.clone()], &int1);
        let b = unit_candidate(vec![int2.clone()], &int2);
        assert!(!a.identical_signature(&b));
    }

    #[test]
    fn test_arity_mismatch_never_matches() {
        let int = TypeDescriptor::new("int");
        let a = unit_candidate(vec![int.clone()], &int);
        assert!(!a.matches_prototype(&[]));
        assert!(!a.matches_prototype(&[int.clone(), int.clone()]));
        assert!(a.matches_prototype(&[int.clone()]));
    }
}
