//! # Sigil
//!
//! A small Lisp-like notation compiled to JavaScript expressions in three
//! stages:
//!
//! - **read**: text to [`Node`](ast::Node) trees ([`read`], [`read_all`])
//! - **expand**: macro-aware rewriting of list forms ([`macros::expand`])
//! - **compile**: trees to JavaScript text ([`compile`], [`compile_source`])
//!
//! ```rust
//! let js = sigil::compile_source("(log :hi) (quote (a b))").unwrap();
//! assert_eq!(js, "log(\"hi\")\n[a, b]");
//! ```

pub use crate::codegen::{compile, compile_source, compile_source_with, compile_with, CompileOptions};
pub use crate::errors::{ErrorContext, ErrorType, Result, SigilError};
pub use crate::syntax::{read, read_all, Reader};

pub mod ast;
pub mod cli;
pub mod codegen;
pub mod errors;
pub mod macros;
pub mod syntax;
