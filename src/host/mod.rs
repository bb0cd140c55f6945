//! Opaque host object model
//!
//! Terminal surfaces live inside a host application whose API is neither
//! documented nor stable. Everything the dispatcher knows about a surface is
//! reached through [`HostObject`]: a type chain, nested components, and
//! members looked up by name at call time. Every member is absent unless an
//! implementation says otherwise.

pub mod scripted;

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

pub use scripted::{ScriptedObject, ScriptedObjectBuilder};

/// Shared handle to a host-owned object. Also serves as the delivery target.
pub type ObjectRef = Arc<dyn HostObject>;

/// Member visibility as declared by the host type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    /// Reachable only with an explicit visibility override
    Hidden,
}

/// Kind of a parameter in a member signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    Bool,
    Int,
    Text,
    Object,
}

/// A value passed to or returned from a host member
#[derive(Clone)]
pub enum Value {
    Unit,
    Bool(bool),
    Int(i64),
    Text(String),
    Object(ObjectRef),
}

impl Value {
    /// Parameter kind this value satisfies; `None` for `Unit`.
    pub fn kind(&self) -> Option<ArgKind> {
        match self {
            Value::Unit => None,
            Value::Bool(_) => Some(ArgKind::Bool),
            Value::Int(_) => Some(ArgKind::Int),
            Value::Text(_) => Some(ArgKind::Text),
            Value::Object(_) => Some(ArgKind::Object),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_object(self) -> Option<ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "Unit"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Int(i) => write!(f, "Int({})", i),
            Value::Text(s) => write!(f, "Text({:?})", s),
            Value::Object(obj) => write!(f, "Object({:?})", obj),
        }
    }
}

/// Signature used to look a method up: name plus parameter kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSig<'a> {
    pub name: &'a str,
    pub params: &'a [ArgKind],
}

impl MethodSig<'_> {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// A matched member failed while running
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{member} failed: {message}")]
pub struct HostFault {
    pub member: String,
    pub message: String,
}

impl HostFault {
    pub fn new(member: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            member: member.into(),
            message: message.into(),
        }
    }
}

/// An object owned by the host application.
///
/// `level` indexes [`HostObject::type_chain`]: `0` is the concrete type,
/// higher levels are ancestors. Returning `None` from a lookup means the
/// member does not exist there, which is never an error.
pub trait HostObject: Send + Sync {
    /// Fully-qualified type names, concrete type first.
    fn type_chain(&self) -> &[String];

    /// Nested visual components
    fn children(&self) -> Vec<ObjectRef> {
        Vec::new()
    }

    /// Invoke a method declared at `level` with the given visibility.
    fn call(
        &self,
        level: usize,
        visibility: Visibility,
        sig: &MethodSig<'_>,
        args: &[Value],
    ) -> Option<Result<Value, HostFault>> {
        let _ = (level, visibility, sig, args);
        None
    }

    /// Read internal state declared at `level`.
    fn field(&self, level: usize, name: &str) -> Option<Value> {
        let _ = (level, name);
        None
    }
}

impl fmt::Debug for dyn HostObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.type_chain().first() {
            Some(name) => write!(f, "<{}>", name),
            None => write!(f, "<anonymous>"),
        }
    }
}

/// Identity of an object, for cycle guards.
pub fn identity(obj: &ObjectRef) -> usize {
    Arc::as_ptr(obj) as *const () as usize
}
