//! AST module for the Sigil language
//!
//! Nodes follow the ESTree shapes for the handful of JavaScript expressions
//! the compiler emits, plus one custom node, [`ListExpression`], which is the
//! reader's parenthesized form before macro resolution.
//!
//! All node types serialize to ESTree-shaped JSON, tagged by `"type"`.

// ============================================================================
// IMPORTS
// ============================================================================

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Represents a span in the source code, as byte offsets.
///
/// Spans are only carried by diagnostics; nodes do not track positions.
///
/// # Examples
///
/// ```rust
/// use sigil::ast::Span;
/// let span = Span::new(0, 5);
/// assert_eq!(span.len(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A zero-width span at `offset`.
    pub fn point(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The node family exchanged by the reader, the expander and the renderer.
///
/// Every standard variant is rendered directly; `ListExpression` must be
/// expanded first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    Identifier(Identifier),
    Literal(Literal),
    ArrayExpression(ArrayExpression),
    ObjectExpression(ObjectExpression),
    CallExpression(CallExpression),
    ListExpression(ListExpression),
}

/// A bare symbolic token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
}

/// A quoted string or a numeric constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub value: LiteralValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    String(String),
    Number(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayExpression {
    pub elements: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectExpression {
    pub properties: Vec<Property>,
}

/// One entry of an [`ObjectExpression`].
///
/// `computed` is false exactly when `key` is a plain identifier, in which
/// case the key renders as that identifier rather than as `[key]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Property")]
pub struct Property {
    pub key: Node,
    pub value: Node,
    pub computed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpression {
    pub callee: Box<Node>,
    pub arguments: Vec<Node>,
    #[serde(default)]
    pub optional: bool,
}

/// The reader's parenthesized form. Not renderable until expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListExpression {
    pub elements: Vec<Node>,
}

// ============================================================================
// PUBLIC API IMPLEMENTATION
// ============================================================================

impl Node {
    pub fn identifier(name: impl Into<String>) -> Self {
        Node::Identifier(Identifier { name: name.into() })
    }

    pub fn string(value: impl Into<String>) -> Self {
        Node::Literal(Literal {
            value: LiteralValue::String(value.into()),
        })
    }

    pub fn number(value: f64) -> Self {
        Node::Literal(Literal {
            value: LiteralValue::Number(value),
        })
    }

    pub fn array(elements: Vec<Node>) -> Self {
        Node::ArrayExpression(ArrayExpression { elements })
    }

    pub fn object(properties: Vec<Property>) -> Self {
        Node::ObjectExpression(ObjectExpression { properties })
    }

    pub fn list(elements: Vec<Node>) -> Self {
        Node::ListExpression(ListExpression { elements })
    }

    /// Builds a non-optional call, the shape the expander synthesizes for
    /// list forms whose head names no macro.
    pub fn call(callee: Node, arguments: Vec<Node>) -> Self {
        Node::CallExpression(CallExpression {
            callee: Box::new(callee),
            arguments,
            optional: false,
        })
    }

    /// Returns the ESTree `type` tag of this node.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sigil::ast::Node;
    /// assert_eq!(Node::list(vec![]).type_name(), "ListExpression");
    /// assert_eq!(Node::number(1.0).type_name(), "Literal");
    /// ```
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Identifier(_) => "Identifier",
            Node::Literal(_) => "Literal",
            Node::ArrayExpression(_) => "ArrayExpression",
            Node::ObjectExpression(_) => "ObjectExpression",
            Node::CallExpression(_) => "CallExpression",
            Node::ListExpression(_) => "ListExpression",
        }
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Node::Identifier(ident) => Some(&ident.name),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Node::ListExpression(_))
    }

    /// Pretty-prints the node back in reader notation.
    ///
    /// Calls have no reader syntax of their own and print as the list form
    /// they were expanded from.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sigil::ast::Node;
    /// let node = Node::list(vec![Node::identifier("foo"), Node::string("bar")]);
    /// assert_eq!(node.pretty(), r#"(foo "bar")"#);
    /// ```
    pub fn pretty(&self) -> String {
        match self {
            Node::Identifier(ident) => ident.name.clone(),
            Node::Literal(lit) => lit.value.pretty(),
            Node::ArrayExpression(array) => format!("[{}]", Self::pretty_seq(&array.elements)),
            Node::ObjectExpression(object) => Self::pretty_object(&object.properties),
            Node::CallExpression(call) => {
                let mut items = Vec::with_capacity(call.arguments.len() + 1);
                items.push(call.callee.pretty());
                items.extend(call.arguments.iter().map(Node::pretty));
                format!("({})", items.join(" "))
            }
            Node::ListExpression(list) => format!("({})", Self::pretty_seq(&list.elements)),
        }
    }

    // ------------------------------------------------------------------------
    // Pretty-printing helpers
    // ------------------------------------------------------------------------

    fn pretty_seq(nodes: &[Node]) -> String {
        nodes.iter().map(Node::pretty).collect::<Vec<_>>().join(" ")
    }

    fn pretty_object(properties: &[Property]) -> String {
        let inner = properties
            .iter()
            .map(|prop| {
                let key = match (&prop.key, prop.computed) {
                    (Node::Identifier(ident), false) => format!(":{}", ident.name),
                    (key, _) => key.pretty(),
                };
                format!("{} {}", key, prop.value.pretty())
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{{}}}", inner)
    }
}

impl LiteralValue {
    fn pretty(&self) -> String {
        match self {
            LiteralValue::String(s) => format!("\"{}\"", s),
            LiteralValue::Number(n) => n.to_string(),
        }
    }
}

impl ListExpression {
    /// The head identifier's name, if this list is shaped like a macro call.
    pub fn head_name(&self) -> Option<&str> {
        self.elements.first().and_then(Node::as_identifier)
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<ListExpression> for Node {
    fn from(list: ListExpression) -> Self {
        Node::ListExpression(list)
    }
}

impl From<ArrayExpression> for Node {
    fn from(array: ArrayExpression) -> Self {
        Node::ArrayExpression(array)
    }
}

impl From<ListExpression> for ArrayExpression {
    fn from(list: ListExpression) -> Self {
        ArrayExpression {
            elements: list.elements,
        }
    }
}

// ============================================================================
// IDENTIFIER CHARACTER CLASSES
// ============================================================================

// Letters are general category L only; combining marks are not letters.
static IDENT_CHAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L}_$0-9]$").unwrap_or_else(|e| panic!("invalid identifier pattern: {e}"))
});

/// Characters allowed in an identifier run: Unicode letters, `_`, `$` and
/// ASCII digits.
///
/// ```rust
/// use sigil::ast::is_ident_char;
/// assert!(is_ident_char('λ'));
/// assert!(!is_ident_char('\u{345}'));
/// ```
pub fn is_ident_char(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_alphanumeric() || c == '_' || c == '$';
    }
    let mut buf = [0u8; 4];
    IDENT_CHAR.is_match(c.encode_utf8(&mut buf))
}

/// Whether `s` can be written as a bare JavaScript property key.
///
/// # Examples
///
/// ```rust
/// use sigil::ast::is_bare_identifier;
/// assert!(is_bare_identifier("name"));
/// assert!(!is_bare_identifier("1st"));
/// assert!(!is_bare_identifier("two words"));
/// ```
pub fn is_bare_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if is_ident_char(first) && !first.is_ascii_digit() => {
            chars.all(is_ident_char)
        }
        _ => false,
    }
}
