//! Opaque handles into the schema catalog.
//!
//! The IR never inspects schema objects. It only needs stable identity
//! for `stype`/`ptrcls` references and a name for display, so a handle is
//! an interned full name (`default::User`, `default::User.todo`). The
//! catalog itself lives in the schema subsystem.

use crate::{Interner, Symbol};

/// Handle to a schema type (object type, scalar, collection).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TypeHandle(Symbol);

impl TypeHandle {
    pub fn new(name: Symbol) -> Self {
        Self(name)
    }

    pub fn name_sym(self) -> Symbol {
        self.0
    }

    pub fn name(self, interner: &Interner) -> &str {
        interner.resolve(self.0)
    }
}

/// Handle to a schema pointer (link or property).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PointerHandle(Symbol);

impl PointerHandle {
    pub fn new(name: Symbol) -> Self {
        Self(name)
    }

    pub fn name_sym(self) -> Symbol {
        self.0
    }

    pub fn name(self, interner: &Interner) -> &str {
        interner.resolve(self.0)
    }
}

/// Handle to a schema module, used by session state commands.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ModuleHandle(Symbol);

impl ModuleHandle {
    pub fn new(name: Symbol) -> Self {
        Self(name)
    }

    pub fn name_sym(self) -> Symbol {
        self.0
    }

    pub fn name(self, interner: &Interner) -> &str {
        interner.resolve(self.0)
    }
}
