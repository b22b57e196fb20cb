//! Sigil Reader
//!
//! A single-pass recursive-descent reader. One [`Reader`] owns one cursor;
//! every routine takes `&mut self` and consumes characters strictly forward,
//! so no form is ever re-scanned.
//!
//! Dispatch is on the first character after whitespace (Unicode whitespace
//! and commas):
//!
//! | lookahead    | form                                   |
//! |--------------|----------------------------------------|
//! | `(`          | `ListExpression`                       |
//! | `[`          | `ArrayExpression`                      |
//! | `{`          | `ObjectExpression`                     |
//! | `"`          | string `Literal`, no escapes           |
//! | `:`          | string `Literal` from the identifier   |
//! | ASCII digit  | number `Literal`                       |
//! | ident char   | `Identifier`                           |

use crate::ast::{is_bare_identifier, is_ident_char, Literal, LiteralValue, Node, Property, Span};
use crate::errors::{to_error_source, Construct, Result, SigilError, SourceArc, SyntaxErrorKind};

const DEFAULT_SOURCE_NAME: &str = "input";

// ============================================================================
// PUBLIC API
// ============================================================================

/// Reads the first top-level form of `input`.
///
/// Returns `Ok(None)` when the input holds nothing but whitespace and commas.
///
/// ```rust
/// use sigil::{read, ast::Node};
/// assert_eq!(read(":foo").unwrap(), Some(Node::string("foo")));
/// assert_eq!(read(" ,, ").unwrap(), None);
/// ```
pub fn read(input: &str) -> Result<Option<Node>> {
    Reader::new(input).read_form()
}

/// Reads every top-level form of `input`, in source order.
pub fn read_all(input: &str) -> Result<Vec<Node>> {
    Reader::new(input).collect()
}

/// Cursor-owning reader over one input buffer.
///
/// As an iterator it yields each top-level form and stops for good after the
/// input is exhausted or the first error.
pub struct Reader<'a> {
    input: &'a str,
    pos: usize,
    name: &'a str,
    failed: bool,
}

impl<'a> Reader<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::named(DEFAULT_SOURCE_NAME, input)
    }

    /// Creates a reader whose diagnostics name the source `name`.
    pub fn named(name: &'a str, input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            name,
            failed: false,
        }
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Reads the next top-level form, or `None` at the end of input.
    pub fn read_form(&mut self) -> Result<Option<Node>> {
        self.skip_whitespace();
        let Some(c) = self.peek() else {
            return Ok(None);
        };
        let node = match c {
            '(' => Node::list(self.read_delimited(')')?),
            '[' => Node::array(self.read_delimited(']')?),
            '{' => self.read_object()?,
            '"' => self.read_string()?,
            ':' => {
                self.advance();
                Node::string(self.read_ident_run())
            }
            c if c.is_ascii_digit() => self.read_number(),
            c if is_ident_char(c) => Node::identifier(self.read_ident_run()),
            c => return Err(self.error(SyntaxErrorKind::UnexpectedCharacter(c), self.char_span())),
        };
        Ok(Some(node))
    }

    // ------------------------------------------------------------------------
    // Compound forms
    // ------------------------------------------------------------------------

    /// Reads elements up to `close`, consuming both delimiters. Shared by
    /// lists and arrays.
    fn read_delimited(&mut self, close: char) -> Result<Vec<Node>> {
        self.advance();
        let mut elements = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(self.end_error(Construct::Expression)),
                Some(c) if c == close => {
                    self.advance();
                    return Ok(elements);
                }
                Some(_) => {
                    let element = self
                        .read_form()?
                        .ok_or_else(|| self.end_error(Construct::Expression))?;
                    elements.push(element);
                }
            }
        }
    }

    fn read_object(&mut self) -> Result<Node> {
        self.advance();
        let mut properties = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(self.end_error(Construct::Object)),
                Some('}') => {
                    self.advance();
                    return Ok(Node::object(properties));
                }
                Some(_) => {
                    let key = self
                        .read_form()?
                        .ok_or_else(|| self.end_error(Construct::Object))?;
                    let value = self.read_form()?.ok_or_else(|| {
                        self.error(
                            SyntaxErrorKind::MissingElement("property value"),
                            Span::point(self.pos),
                        )
                    })?;
                    properties.push(make_property(key, value));
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Atoms
    // ------------------------------------------------------------------------

    fn read_string(&mut self) -> Result<Node> {
        self.advance();
        let start = self.pos;
        match self.input[start..].find('"') {
            Some(offset) => {
                let end = start + offset;
                self.pos = end + 1;
                Ok(Node::string(&self.input[start..end]))
            }
            None => {
                self.pos = self.input.len();
                Err(self.end_error(Construct::String))
            }
        }
    }

    fn read_number(&mut self) -> Node {
        let start = self.pos;
        self.skip_while(|c| c.is_ascii_digit());
        let digits = &self.input[start..self.pos];
        // Digit runs always parse; overlong ones saturate to infinity.
        let value = digits.parse::<f64>().unwrap_or(f64::INFINITY);
        Node::number(value)
    }

    fn read_ident_run(&mut self) -> &'a str {
        let input = self.input;
        let start = self.pos;
        self.skip_while(is_ident_char);
        &input[start..self.pos]
    }

    // ------------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------------

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        self.skip_while(|c| c.is_whitespace() || c == ',');
    }

    // ------------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------------

    fn char_span(&self) -> Span {
        let len = self.peek().map_or(0, char::len_utf8);
        Span::new(self.pos, self.pos + len)
    }

    fn source(&self) -> SourceArc {
        to_error_source(self.name, self.input)
    }

    fn error(&self, kind: SyntaxErrorKind, span: Span) -> SigilError {
        SigilError::syntax(kind, self.source(), span)
    }

    fn end_error(&self, construct: Construct) -> SigilError {
        self.error(
            SyntaxErrorKind::UnexpectedEnd(construct),
            Span::point(self.input.len()),
        )
    }
}

impl Iterator for Reader<'_> {
    type Item = Result<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.read_form() {
            Ok(node) => node.map(Ok),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

impl std::iter::FusedIterator for Reader<'_> {}

// ============================================================================
// PROPERTY KEYS
// ============================================================================

/// Builds an object entry from a key form and a value form.
///
/// Identifier keys and identifier-shaped string keys become plain keys;
/// every other key form is computed.
fn make_property(key: Node, value: Node) -> Property {
    match key {
        Node::Identifier(_) => Property {
            key,
            value,
            computed: false,
        },
        Node::Literal(Literal {
            value: LiteralValue::String(ref s),
        }) if is_bare_identifier(s) => Property {
            key: Node::identifier(s.as_str()),
            value,
            computed: false,
        },
        key => Property {
            key,
            value,
            computed: true,
        },
    }
}
