//! # Sigil Macro Expansion System
//!
//! Macros are the purely syntactic stage between reading and rendering. A
//! macro receives the argument nodes of a list form and returns a
//! replacement node, optionally asking the expander not to rewrite the
//! result any further.
//!
//! ## Core Principles
//!
//! - **Syntactic Only**: macros see nodes, never evaluated values.
//! - **Lazy**: the expander rewrites one list form to a fixed point; nested
//!   list forms are expanded when the renderer reaches them.
//! - **Open Dispatch**: a [`MacroRegistry`] maps names to closures. A list
//!   whose head names no macro is a call, not an error.
//!
//! ## Modular Architecture
//!
//! - **`registry`**: name to macro lookup table
//! - **`std_macros`**: the builtin `quote`
//! - **`expander`**: the rewrite loop and its trace

use std::sync::Arc;

use crate::ast::Node;
use crate::errors::Result;

mod expander;
mod registry;
pub mod std_macros;

pub use expander::{expand, expand_traced, ExpandOptions, ExpansionStep};
pub use registry::{builtins, MacroRegistry};

// ============================================================================
// CORE TYPES AND CONSTANTS
// ============================================================================

/// Maximum number of successive rewrites of one list form.
pub const MAX_MACRO_RECURSION_DEPTH: usize = 128;

/// A macro is a shared closure from argument nodes to an [`Expansion`].
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use sigil::ast::Node;
/// use sigil::macros::{Expansion, MacroFn};
/// // (first a b c) => a
/// let first: MacroFn = Arc::new(|args: &[Node]| -> sigil::Result<Expansion> {
///     Ok(args.first().cloned().unwrap_or_else(|| Node::array(vec![])).into())
/// });
/// ```
pub type MacroFn = Arc<dyn Fn(&[Node]) -> Result<Expansion> + Send + Sync>;

/// Controls how the expander treats a macro's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExpansionOptions {
    /// Return the output as-is even if it is another macro call.
    pub prevent_expansion: bool,
}

/// What a macro produces: the replacement node plus expansion options.
#[derive(Debug, Clone, PartialEq)]
pub struct Expansion {
    pub node: Node,
    pub options: ExpansionOptions,
}

impl Expansion {
    /// An expansion the expander will not rewrite further.
    pub fn final_node(node: Node) -> Self {
        Self {
            node,
            options: ExpansionOptions {
                prevent_expansion: true,
            },
        }
    }
}

impl From<Node> for Expansion {
    fn from(node: Node) -> Self {
        Self {
            node,
            options: ExpansionOptions::default(),
        }
    }
}

impl From<(Node, ExpansionOptions)> for Expansion {
    fn from((node, options): (Node, ExpansionOptions)) -> Self {
        Self { node, options }
    }
}
