//! Standard macros.
//!
//! The standard set is deliberately tiny: `quote` is the only form that
//! needs expander support, since it is the one way to stop a list from
//! being read as a call.

use crate::ast::Node;
use crate::err_msg;
use crate::errors::Result;
use crate::macros::{Expansion, MacroRegistry};

// ===================================================================================================
// REGISTRY: Standard Macro Registration
// ===================================================================================================

/// Registers all standard macros in the given registry.
pub fn register_std_macros(registry: &mut MacroRegistry) {
    registry.register("quote", expand_quote);
}

// ===================================================================================================
// QUOTE
// ===================================================================================================

/// `(quote x)` expands to `x` exactly, and marks it final so a quoted
/// macro call stays a list.
pub fn expand_quote(args: &[Node]) -> Result<Expansion> {
    match args {
        [value] => Ok(Expansion::final_node(value.clone())),
        _ => Err(err_msg!(
            Expansion,
            "macro 'quote' expects exactly 1 argument, got {}",
            args.len()
        )
        .with_help("write (quote form) with a single form")),
    }
}
