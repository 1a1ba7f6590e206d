//! Path identities: structural identifiers for navigable paths.
//!
//! A `PathId` names a path through the object graph (`User.todo.owner`)
//! independently of where the path appears in the IR. Query rewrites may
//! duplicate or move subexpressions freely; two IR sets denote the same
//! real-world path exactly when their path identities compare equal.
//!
//! Structurally identical paths minted in unrelated rewrite contexts
//! (e.g. two inlined views) are kept apart by tagging one side with a
//! [`WeakNamespace`]. The tag participates in equality but does not mint
//! a new global identity: stripping it recovers the underlying path.

use std::fmt;

use crate::{Interner, PointerHandle, TypeHandle};

/// Traversal direction of a pointer step.
///
/// `Inbound` traverses against the pointer's declared direction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    Outbound,
    Inbound,
}

/// Disambiguation tag for paths originating in unrelated rewrite contexts.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct WeakNamespace(u32);

impl WeakNamespace {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Mints fresh weak namespaces. One minter per compilation.
#[derive(Debug, Clone, Default)]
pub struct NamespaceMinter {
    next: u32,
}

impl NamespaceMinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh(&mut self) -> WeakNamespace {
        let ns = WeakNamespace(self.next);
        self.next += 1;
        ns
    }
}

/// One pointer traversal in a path.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PathStep {
    pub ptrcls: PointerHandle,
    pub direction: Direction,
}

/// Structural identifier for a navigable path, stable under rewriting.
///
/// Composed of a root type reference and zero or more pointer steps.
/// Immutable: [`extend`](Self::extend) and the namespace operations
/// return new values.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct PathId {
    root: TypeHandle,
    steps: Vec<PathStep>,
    namespace: Option<WeakNamespace>,
}

impl PathId {
    /// Path consisting of a bare type reference.
    pub fn from_type(root: TypeHandle) -> Self {
        Self {
            root,
            steps: Vec::new(),
            namespace: None,
        }
    }

    /// Compose this path with one more pointer traversal.
    pub fn extend(&self, ptrcls: PointerHandle, direction: Direction) -> Self {
        let mut steps = self.steps.clone();
        steps.push(PathStep { ptrcls, direction });
        Self {
            root: self.root,
            steps,
            namespace: self.namespace,
        }
    }

    pub fn root(&self) -> TypeHandle {
        self.root
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// The final traversal, if this path is not a bare type reference.
    pub fn rptr(&self) -> Option<PathStep> {
        self.steps.last().copied()
    }

    /// True when the path is a bare type reference.
    pub fn is_type_root(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn namespace(&self) -> Option<WeakNamespace> {
        self.namespace
    }

    /// Tag the path with a weak namespace.
    pub fn with_namespace(&self, namespace: WeakNamespace) -> Self {
        Self {
            namespace: Some(namespace),
            ..self.clone()
        }
    }

    /// Drop the weak namespace tag, recovering the underlying identity.
    pub fn strip_namespace(&self) -> Self {
        Self {
            namespace: None,
            ..self.clone()
        }
    }

    /// True when `prefix` denotes a leading portion of this path, under
    /// the same namespace.
    pub fn starts_with(&self, prefix: &PathId) -> bool {
        self.namespace == prefix.namespace
            && self.root == prefix.root
            && self.steps.len() >= prefix.steps.len()
            && self.steps[..prefix.steps.len()] == prefix.steps[..]
    }

    /// Human-readable rendering, resolving names through `interner`.
    pub fn display<'a>(&'a self, interner: &'a Interner) -> PathDisplay<'a> {
        PathDisplay {
            path: self,
            interner,
        }
    }
}

/// Display adapter for [`PathId`]; inbound steps render as `.<name`.
pub struct PathDisplay<'a> {
    path: &'a PathId,
    interner: &'a Interner,
}

impl fmt::Display for PathDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ns) = self.path.namespace {
            write!(f, "{}@", ns.as_u32())?;
        }
        f.write_str(self.path.root.name(self.interner))?;
        for step in &self.path.steps {
            match step.direction {
                Direction::Outbound => write!(f, ".{}", step.ptrcls.name(self.interner))?,
                Direction::Inbound => write!(f, ".<{}", step.ptrcls.name(self.interner))?,
            }
        }
        Ok(())
    }
}
