//! Two-scope symbol table: class scope (`Static`, `Field`) and subroutine
//! scope (`Argument`, `Local`), each a plain map keyed by name with indices
//! assigned densely per kind in insertion order.

use std::collections::HashMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Static,
    Field,
    Argument,
    Local,
}

/// A Jack type: one of the three primitives, or a class name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarType {
    Int,
    Char,
    Boolean,
    Class(String),
}

impl VarType {
    pub fn of(name: &str) -> VarType {
        match name {
            "int" => VarType::Int,
            "char" => VarType::Char,
            "boolean" => VarType::Boolean,
            other => VarType::Class(other.to_string()),
        }
    }
}

impl Display for VarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VarType::Int => f.write_str("int"),
            VarType::Char => f.write_str("char"),
            VarType::Boolean => f.write_str("boolean"),
            VarType::Class(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    var_type: VarType,
    kind: Kind,
    index: u16,
}

/// Class-scope entries persist for the lifetime of one class compilation;
/// subroutine-scope entries are cleared by every [`SymbolTable::start_subroutine`].
#[derive(Debug, Default)]
pub struct SymbolTable {
    class_scope: HashMap<String, Entry>,
    subroutine_scope: HashMap<String, Entry>,
    static_count: u16,
    field_count: u16,
    arg_count: u16,
    local_count: u16,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears subroutine-scope entries and resets `#arg`/`#local`. Class
    /// scope is untouched.
    pub fn start_subroutine(&mut self) {
        self.subroutine_scope.clear();
        self.arg_count = 0;
        self.local_count = 0;
    }

    /// Inserts `name` into the scope implied by `kind`, assigning the
    /// current per-kind counter as its index. Redefining a name already
    /// bound in the same scope overwrites the previous binding; the source
    /// this is grounded on leaves that case undefined, and this
    /// implementation documents "last definition wins" as its choice.
    pub fn define(&mut self, name: impl Into<String>, var_type: VarType, kind: Kind) {
        let name = name.into();
        let index = match kind {
            Kind::Static => {
                let i = self.static_count;
                self.static_count += 1;
                i
            }
            Kind::Field => {
                let i = self.field_count;
                self.field_count += 1;
                i
            }
            Kind::Argument => {
                let i = self.arg_count;
                self.arg_count += 1;
                i
            }
            Kind::Local => {
                let i = self.local_count;
                self.local_count += 1;
                i
            }
        };

        let entry = Entry {
            var_type,
            kind,
            index,
        };

        match kind {
            Kind::Static | Kind::Field => {
                self.class_scope.insert(name, entry);
            }
            Kind::Argument | Kind::Local => {
                self.subroutine_scope.insert(name, entry);
            }
        }
    }

    pub fn var_count(&self, kind: Kind) -> u16 {
        match kind {
            Kind::Static => self.static_count,
            Kind::Field => self.field_count,
            Kind::Argument => self.arg_count,
            Kind::Local => self.local_count,
        }
    }

    fn lookup(&self, name: &str) -> Option<&Entry> {
        self.subroutine_scope
            .get(name)
            .or_else(|| self.class_scope.get(name))
    }

    pub fn kind_of(&self, name: &str) -> Option<Kind> {
        self.lookup(name).map(|entry| entry.kind)
    }

    pub fn type_of(&self, name: &str) -> Option<&VarType> {
        self.lookup(name).map(|entry| &entry.var_type)
    }

    pub fn index_of(&self, name: &str) -> Option<u16> {
        self.lookup(name).map(|entry| entry.index)
    }
}
