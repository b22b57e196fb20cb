//! Tree to text: renders nodes as JavaScript expressions.
//!
//! The generator is one exhaustive `match` over [`Node`]. Every standard
//! variant renders the way `astring` prints the matching ESTree node; the
//! only addition is the `ListExpression` arm, which expands the list first
//! and renders whatever comes back. A list that is still a list after
//! expansion is a plain collection and prints as an array literal.

mod number;

use crate::ast::{CallExpression, Identifier, ListExpression, Literal, LiteralValue, Node, ObjectExpression, Property};
use crate::errors::Result;
use crate::macros::{builtins, expand, ExpandOptions, MacroRegistry, MAX_MACRO_RECURSION_DEPTH};
use crate::syntax::read_all;

pub use number::format_number;

// ============================================================================
// OPTIONS
// ============================================================================

/// Renderer settings.
#[derive(Debug, Clone)]
pub struct CompileOptions<'a> {
    /// Registry used to expand list forms.
    pub macros: &'a MacroRegistry,
    /// One level of indentation inside object literals.
    pub indent: String,
    pub line_end: String,
    /// Bound on successive rewrites of one list form.
    pub max_depth: usize,
}

impl Default for CompileOptions<'static> {
    fn default() -> Self {
        Self::with_macros(builtins())
    }
}

impl<'a> CompileOptions<'a> {
    pub fn with_macros(macros: &'a MacroRegistry) -> Self {
        Self {
            macros,
            indent: "  ".to_string(),
            line_end: "\n".to_string(),
            max_depth: MAX_MACRO_RECURSION_DEPTH,
        }
    }

    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn line_end(mut self, line_end: impl Into<String>) -> Self {
        self.line_end = line_end.into();
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn expand_options(&self) -> ExpandOptions<'a> {
        ExpandOptions::with_macros(self.macros).max_depth(self.max_depth)
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Renders one node with the builtin macros and default formatting.
///
/// ```rust
/// use sigil::{compile, read};
/// let node = read("(foo 1 :bar)").unwrap().unwrap();
/// assert_eq!(compile(&node).unwrap(), r#"foo(1, "bar")"#);
/// ```
pub fn compile(root: &Node) -> Result<String> {
    compile_with(root, &CompileOptions::default())
}

pub fn compile_with(root: &Node, options: &CompileOptions<'_>) -> Result<String> {
    let mut generator = Generator::new(options);
    generator.node(root)?;
    Ok(generator.out)
}

/// Reads every top-level form of `source` and renders each one, joined by
/// the line terminator.
pub fn compile_source(source: &str) -> Result<String> {
    compile_source_with(source, &CompileOptions::default())
}

pub fn compile_source_with(source: &str, options: &CompileOptions<'_>) -> Result<String> {
    let rendered = read_all(source)?
        .iter()
        .map(|form| compile_with(form, options))
        .collect::<Result<Vec<_>>>()?;
    Ok(rendered.join(&options.line_end))
}

// ============================================================================
// GENERATOR
// ============================================================================

/// `astring` expression precedences for the node kinds we emit.
const CALL_PRECEDENCE: u8 = 19;
const NEEDS_PARENTHESES: u8 = 17;

fn precedence(node: &Node) -> u8 {
    match node {
        Node::Identifier(_) | Node::ArrayExpression(_) | Node::ListExpression(_) => 20,
        Node::CallExpression(_) => CALL_PRECEDENCE,
        Node::Literal(_) => 18,
        Node::ObjectExpression(_) => NEEDS_PARENTHESES,
    }
}

struct Generator<'o, 'm> {
    out: String,
    indent_level: usize,
    options: &'o CompileOptions<'m>,
}

impl<'o, 'm> Generator<'o, 'm> {
    fn new(options: &'o CompileOptions<'m>) -> Self {
        Self {
            out: String::new(),
            indent_level: 0,
            options,
        }
    }

    fn node(&mut self, node: &Node) -> Result<()> {
        match node {
            Node::Identifier(ident) => {
                self.identifier(ident);
                Ok(())
            }
            Node::Literal(literal) => {
                self.literal(literal);
                Ok(())
            }
            Node::ArrayExpression(array) => self.array_expression(&array.elements),
            Node::ObjectExpression(object) => self.object_expression(object),
            Node::CallExpression(call) => self.call_expression(call),
            Node::ListExpression(list) => self.list_expression(list),
        }
    }

    // ------------------------------------------------------------------------
    // The custom node
    // ------------------------------------------------------------------------

    fn list_expression(&mut self, list: &ListExpression) -> Result<()> {
        let expanded = self.expand(list)?;
        self.expanded(&expanded)
    }

    fn expand(&self, list: &ListExpression) -> Result<Node> {
        expand(list.clone(), &self.options.expand_options())
    }

    /// Renders an expansion result. A list here is final and is never
    /// handed back to the expander.
    fn expanded(&mut self, node: &Node) -> Result<()> {
        match node {
            Node::ListExpression(list) => self.array_expression(&list.elements),
            node => self.node(node),
        }
    }

    // ------------------------------------------------------------------------
    // Standard nodes
    // ------------------------------------------------------------------------

    fn identifier(&mut self, ident: &Identifier) {
        self.out.push_str(&ident.name);
    }

    fn literal(&mut self, literal: &Literal) {
        match &literal.value {
            LiteralValue::String(s) => {
                let quoted = serde_json::Value::from(s.as_str()).to_string();
                self.out.push_str(&quoted);
            }
            LiteralValue::Number(n) => self.out.push_str(&format_number(*n)),
        }
    }

    fn array_expression(&mut self, elements: &[Node]) -> Result<()> {
        self.out.push('[');
        self.sequence(elements)?;
        self.out.push(']');
        Ok(())
    }

    fn object_expression(&mut self, object: &ObjectExpression) -> Result<()> {
        let options = self.options;
        let indent = options.indent.repeat(self.indent_level);
        self.indent_level += 1;
        self.out.push('{');
        if !object.properties.is_empty() {
            let property_indent = format!("{}{}", indent, options.indent);
            self.out.push_str(&options.line_end);
            for (i, property) in object.properties.iter().enumerate() {
                if i > 0 {
                    self.out.push(',');
                    self.out.push_str(&options.line_end);
                }
                self.out.push_str(&property_indent);
                self.property(property)?;
            }
            self.out.push_str(&options.line_end);
            self.out.push_str(&indent);
        }
        self.out.push('}');
        self.indent_level -= 1;
        Ok(())
    }

    fn property(&mut self, property: &Property) -> Result<()> {
        if property.computed {
            self.out.push('[');
            self.node(&property.key)?;
            self.out.push(']');
        } else {
            self.node(&property.key)?;
        }
        self.out.push_str(": ");
        self.node(&property.value)
    }

    fn call_expression(&mut self, call: &CallExpression) -> Result<()> {
        // A list callee is resolved first so the parenthesization decision
        // sees what will actually be printed.
        let callee = match call.callee.as_ref() {
            Node::ListExpression(list) => self.expand(list)?,
            callee => callee.clone(),
        };
        if precedence(&callee) < CALL_PRECEDENCE {
            self.out.push('(');
            self.expanded(&callee)?;
            self.out.push(')');
        } else {
            self.expanded(&callee)?;
        }
        if call.optional {
            self.out.push_str("?.");
        }
        self.out.push('(');
        self.sequence(&call.arguments)?;
        self.out.push(')');
        Ok(())
    }

    fn sequence(&mut self, nodes: &[Node]) -> Result<()> {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.node(node)?;
        }
        Ok(())
    }
}
