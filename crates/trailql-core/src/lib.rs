#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for the TrailQL query compiler.
//!
//! This crate holds the leaf values the typed IR is built from:
//! - `interner` - string interning for schema and anchor names
//! - `schema` - opaque handles into the schema catalog
//! - `cardinality` - result-set multiplicity lattice
//! - `path` - path identities for navigable paths through the object graph
//! - `scope` - the scope tree of fenced/unfenced regions
//! - `span` - diagnostic source locations
//!
//! None of these own IR nodes; the node algebra lives in `trailql-ir`.

mod cardinality;
mod interner;
mod path;
mod schema;
mod scope;
mod span;

#[cfg(test)]
mod interner_tests;

pub use cardinality::Cardinality;
pub use interner::{Interner, Symbol};
pub use path::{Direction, NamespaceMinter, PathDisplay, PathId, PathStep, WeakNamespace};
pub use schema::{ModuleHandle, PointerHandle, TypeHandle};
pub use scope::{RegionId, ScopeError, ScopeTree};
pub use span::SourceSpan;
