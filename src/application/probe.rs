//! Capability prober
//!
//! "Try this named member on this opaque object" without any compile-time
//! contract. Absence is silent; a member that exists but fails is logged and
//! reported as [`Probed::Faulted`], which callers treat as not applicable.
//! Panics raised inside host code are contained here as well.

use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::host::{identity, ArgKind, HostFault, HostObject, MethodSig, ObjectRef, Value, Visibility};

/// Outcome of a single capability probe
#[derive(Debug, Clone)]
pub enum Probed {
    /// A matching member ran and returned a value
    Invoked(Value),
    /// No member with this name and signature exists
    Absent,
    /// A matching member exists but failed
    Faulted(HostFault),
}

impl Probed {
    pub fn is_invoked(&self) -> bool {
        matches!(self, Probed::Invoked(_))
    }

    /// The returned value, treating faults as absence
    pub fn value(self) -> Option<Value> {
        match self {
            Probed::Invoked(value) => Some(value),
            Probed::Absent | Probed::Faulted(_) => None,
        }
    }
}

/// Traversal bounds shared by every graph walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeLimits {
    /// Maximum nesting depth (component tree) or descent depth (related objects)
    pub max_depth: usize,
    /// Maximum number of nodes visited by one tree walk
    pub max_nodes: usize,
}

impl Default for ProbeLimits {
    fn default() -> Self {
        Self {
            max_depth: crate::domain::config::DEFAULT_MAX_DEPTH,
            max_nodes: crate::domain::config::DEFAULT_MAX_NODES,
        }
    }
}

/// Invoke `name` with `args` on `obj`.
///
/// Lookup order: a public method anywhere up the type chain, then a
/// non-public method declared on the concrete type.
pub fn try_invoke(obj: &dyn HostObject, name: &str, args: &[Value]) -> Probed {
    let params = match args.iter().map(Value::kind).collect::<Option<Vec<ArgKind>>>() {
        Some(params) => params,
        None => return Probed::Absent,
    };
    let sig = MethodSig {
        name,
        params: &params,
    };
    let levels = chain_len(obj);

    let public = (0..levels).map(|level| (level, Visibility::Public));
    let hidden = std::iter::once((0, Visibility::Hidden));

    for (level, visibility) in public.chain(hidden) {
        match shielded(name, || obj.call(level, visibility, &sig, args)) {
            Ok(None) => continue,
            Ok(Some(Ok(value))) => {
                debug!(member = name, arity = sig.arity(), ?visibility, level, "capability invoked");
                return Probed::Invoked(value);
            }
            Ok(Some(Err(fault))) | Err(fault) => {
                warn!(member = name, arity = sig.arity(), error = %fault, "capability present but failed");
                return Probed::Faulted(fault);
            }
        }
    }

    Probed::Absent
}

/// Try each name in order and return the first successful invocation.
pub fn try_invoke_any(obj: &dyn HostObject, names: &[&str], args: &[Value]) -> Option<Value> {
    names
        .iter()
        .find_map(|name| try_invoke(obj, name, args).value())
}

/// First boolean answer from a list of zero-argument predicates
pub fn probe_flag(obj: &dyn HostObject, names: &[&str]) -> Option<bool> {
    names
        .iter()
        .find_map(|name| try_invoke(obj, name, &[]).value().and_then(|v| v.as_bool()))
}

/// Descend one level into the object graph.
///
/// For each candidate name in order: a zero-argument accessor (public, then
/// non-public, walking up the type chain), then a field walking up the chain.
/// Only object-valued results count.
pub fn try_get_related(obj: &dyn HostObject, names: &[&str]) -> Option<ObjectRef> {
    let levels = chain_len(obj);

    for name in names {
        let sig = MethodSig {
            name: *name,
            params: &[],
        };
        for visibility in [Visibility::Public, Visibility::Hidden] {
            for level in 0..levels {
                match shielded(name, || obj.call(level, visibility, &sig, &[])) {
                    Ok(Some(Ok(Value::Object(related)))) => {
                        debug!(member = *name, ?visibility, level, "related object via accessor");
                        return Some(related);
                    }
                    Ok(Some(Ok(_))) | Ok(None) => {}
                    Ok(Some(Err(fault))) | Err(fault) => {
                        warn!(member = *name, error = %fault, "accessor present but failed");
                    }
                }
            }
        }

        for level in 0..levels {
            if let Ok(Some(Value::Object(related))) = shielded(name, || obj.field(level, name)) {
                debug!(member = *name, level, "related object via field");
                return Some(related);
            }
        }
    }

    None
}

/// Walk `names` as a chain of accessors, e.g. content manager → selection → component.
pub fn try_get_path(obj: &dyn HostObject, path: &[&[&str]]) -> Option<ObjectRef> {
    let (first, rest) = path.split_first()?;
    let mut current = try_get_related(obj, first)?;
    for names in rest {
        current = try_get_related(current.as_ref(), names)?;
    }
    Some(current)
}

/// Nested components of `obj`, empty if the host panics while listing them.
pub fn children_of(obj: &dyn HostObject) -> Vec<ObjectRef> {
    shielded("children", || obj.children()).unwrap_or_default()
}

/// Concrete type name of `obj`
pub fn type_name_of(obj: &dyn HostObject) -> Option<String> {
    shielded("type_chain", || obj.type_chain().first().cloned())
        .ok()
        .flatten()
}

/// A node met during a bounded depth-first walk
#[derive(Clone)]
pub struct Visited {
    pub node: ObjectRef,
    /// Index of the parent in the walk order, `None` for the root
    pub parent: Option<usize>,
    pub depth: usize,
}

/// Depth-first walk of the component tree starting at `root` (pre-order).
///
/// Stops descending below `limits.max_depth` nesting levels, stops entirely
/// after `limits.max_nodes` nodes, and never visits an object twice.
pub fn walk(root: &ObjectRef, limits: ProbeLimits) -> Vec<Visited> {
    let mut visited = Vec::new();
    let mut seen = HashSet::new();
    let mut stack = vec![(root.clone(), None, 0usize)];

    while let Some((node, parent, depth)) = stack.pop() {
        if visited.len() >= limits.max_nodes {
            debug!(max_nodes = limits.max_nodes, "tree walk truncated");
            break;
        }
        if !seen.insert(identity(&node)) {
            continue;
        }

        let index = visited.len();
        if depth < limits.max_depth {
            let children = children_of(node.as_ref());
            // Reverse so the first child is popped first
            for child in children.into_iter().rev() {
                stack.push((child, Some(index), depth + 1));
            }
        }
        visited.push(Visited {
            node,
            parent,
            depth,
        });
    }

    visited
}

fn chain_len(obj: &dyn HostObject) -> usize {
    shielded("type_chain", || obj.type_chain().len())
        .unwrap_or(0)
        .max(1)
}

/// Run host code, converting a panic into a [`HostFault`].
fn shielded<T>(member: &str, f: impl FnOnce() -> T) -> Result<T, HostFault> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panicked".to_string());
        HostFault::new(member, message)
    })
}
