//! The expansion loop.
//!
//! [`expand`] rewrites a single list form until it reaches a fixed point:
//! a list that is not a macro call, a call synthesized for an unknown head,
//! a non-list macro output, or an output the macro marked final. Children
//! are never visited here; the renderer expands nested lists as it meets
//! them.
//!
//! Rewriting is bounded by [`ExpandOptions::max_depth`] so a macro that
//! keeps producing calls to itself fails instead of looping forever.

use crate::ast::{ListExpression, Node};
use crate::err_msg;
use crate::errors::Result;
use crate::macros::{builtins, Expansion, MacroRegistry, MAX_MACRO_RECURSION_DEPTH};

// =============================
// Options and trace records
// =============================

/// Expansion settings.
#[derive(Debug, Clone, Copy)]
pub struct ExpandOptions<'a> {
    pub macros: &'a MacroRegistry,
    /// Keep rewriting while a macro returns another list form.
    pub recursive: bool,
    pub max_depth: usize,
}

impl Default for ExpandOptions<'static> {
    fn default() -> Self {
        Self {
            macros: builtins(),
            recursive: true,
            max_depth: MAX_MACRO_RECURSION_DEPTH,
        }
    }
}

impl<'a> ExpandOptions<'a> {
    pub fn with_macros(macros: &'a MacroRegistry) -> Self {
        Self {
            macros,
            recursive: true,
            max_depth: MAX_MACRO_RECURSION_DEPTH,
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// A single macro invocation, for traceability.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpansionStep {
    pub macro_name: String,
    /// The list form before this step
    pub input: Node,
    /// What the macro returned
    pub output: Node,
}

// =============================
// Public API for macro expansion
// =============================

/// Expands one list form.
///
/// ```rust
/// use sigil::ast::{ListExpression, Node};
/// use sigil::macros::{expand, ExpandOptions};
/// let list = ListExpression {
///     elements: vec![Node::identifier("foo"), Node::number(1.0)],
/// };
/// let node = expand(list, &ExpandOptions::default()).unwrap();
/// assert_eq!(node, Node::call(Node::identifier("foo"), vec![Node::number(1.0)]));
/// ```
pub fn expand(list: ListExpression, options: &ExpandOptions<'_>) -> Result<Node> {
    expand_with_trace(list, options, None)
}

/// Expands one list form and records every macro invocation on the way.
pub fn expand_traced(
    list: ListExpression,
    options: &ExpandOptions<'_>,
) -> Result<(Node, Vec<ExpansionStep>)> {
    let mut trace = Vec::new();
    let node = expand_with_trace(list, options, Some(&mut trace))?;
    Ok((node, trace))
}

// =============================
// Internal expansion helpers
// =============================

fn expand_with_trace(
    mut list: ListExpression,
    options: &ExpandOptions<'_>,
    mut trace: Option<&mut Vec<ExpansionStep>>,
) -> Result<Node> {
    let mut depth = 0;
    loop {
        let Some(name) = list.head_name() else {
            return Ok(list.into());
        };
        let Some(macro_fn) = options.macros.get(name) else {
            let mut elements = list.elements;
            let callee = elements.remove(0);
            return Ok(Node::call(callee, elements));
        };

        if depth >= options.max_depth {
            return Err(err_msg!(
                Expansion,
                "recursion limit of {} exceeded while expanding '{}'",
                options.max_depth,
                name
            ));
        }
        depth += 1;

        let Expansion {
            node,
            options: expansion,
        } = macro_fn(&list.elements[1..])?;

        if let Some(trace) = trace.as_deref_mut() {
            trace.push(ExpansionStep {
                macro_name: name.to_string(),
                input: Node::ListExpression(list.clone()),
                output: node.clone(),
            });
        }

        match node {
            Node::ListExpression(next) if options.recursive && !expansion.prevent_expansion => {
                list = next;
            }
            node => return Ok(node),
        }
    }
}
