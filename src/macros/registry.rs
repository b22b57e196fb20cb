//! Macro registry for storage and lookup of macro functions.
//!
//! Names are case-sensitive. Registering under an existing name replaces the
//! old macro, which is how callers shadow builtins; use
//! [`MacroRegistry::register_or_error`] to refuse that instead.
//!
//! # Summary Table
//! | Method            | Overwrites | Error on Duplicate |
//! |-------------------|------------|--------------------|
//! | register          | Yes        | No                 |
//! | register_or_error | No         | Yes                |
//! | unregister        | N/A        | N/A                |
//! | get/contains      | N/A        | N/A                |

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::ast::Node;
use crate::err_msg;
use crate::errors::Result;
use crate::macros::{std_macros, Expansion, MacroFn};

static BUILTINS: Lazy<MacroRegistry> = Lazy::new(MacroRegistry::builtins);

/// The shared builtin registry, used whenever no other registry is given.
pub fn builtins() -> &'static MacroRegistry {
    &BUILTINS
}

/// Lookup table from macro name to macro function.
///
/// # Example
/// ```rust
/// use sigil::ast::Node;
/// use sigil::macros::MacroRegistry;
/// let mut reg = MacroRegistry::builtins();
/// reg.register("nil", |_: &[Node]| Ok(Node::identifier("null").into()));
/// assert!(reg.contains("quote"));
/// assert!(reg.contains("nil"));
/// ```
#[derive(Clone, Default)]
pub struct MacroRegistry {
    macros: HashMap<String, MacroFn>,
}

impl MacroRegistry {
    /// Creates a new, empty macro registry.
    ///
    /// ```rust
    /// use sigil::macros::MacroRegistry;
    /// assert!(MacroRegistry::new().is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the standard macros.
    pub fn builtins() -> Self {
        let mut registry = Self::new();
        std_macros::register_std_macros(&mut registry);
        registry
    }

    /// Registers a macro, returning the one it replaced.
    pub fn register<F>(&mut self, name: &str, func: F) -> Option<MacroFn>
    where
        F: Fn(&[Node]) -> Result<Expansion> + Send + Sync + 'static,
    {
        self.macros.insert(name.to_string(), Arc::new(func))
    }

    /// Registers a macro, failing if the name is taken.
    pub fn register_or_error<F>(&mut self, name: &str, func: F) -> Result<()>
    where
        F: Fn(&[Node]) -> Result<Expansion> + Send + Sync + 'static,
    {
        if self.macros.contains_key(name) {
            return Err(err_msg!(Expansion, "Macro '{}' is already registered", name));
        }
        self.macros.insert(name.to_string(), Arc::new(func));
        Ok(())
    }

    pub fn unregister(&mut self, name: &str) -> Option<MacroFn> {
        self.macros.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&MacroFn> {
        self.macros.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }

    /// Macro names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.macros.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }
}

impl fmt::Debug for MacroRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MacroRegistry")
            .field("macros", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nil(_: &[Node]) -> Result<Expansion> {
        Ok(Node::identifier("null").into())
    }

    #[test]
    fn builtins_hold_exactly_quote() {
        assert_eq!(builtins().names(), vec!["quote"]);
    }

    #[test]
    fn register_replaces_and_returns_old() {
        let mut reg = MacroRegistry::new();
        assert!(reg.register("nil", nil).is_none());
        assert!(reg.register("nil", nil).is_some());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn register_or_error_refuses_duplicates() {
        let mut reg = MacroRegistry::builtins();
        let err = reg.register_or_error("quote", nil).unwrap_err();
        assert!(err.to_string().contains("already registered"));
    }

    #[test]
    fn unregister_removes() {
        let mut reg = MacroRegistry::builtins();
        assert!(reg.unregister("quote").is_some());
        assert!(reg.is_empty());
        assert!(reg.get("quote").is_none());
    }
}
