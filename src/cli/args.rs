//! Defines the command-line arguments for the Sigil CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "sigil",
    version,
    about = "Compile Sigil forms to JavaScript expressions."
)]
pub struct SigilArgs {
    /// The path to the Sigil source file.
    #[arg(required = true)]
    pub file: PathBuf,

    /// What to print for the file's top-level forms.
    #[arg(long, value_enum, default_value_t = Emit::Js)]
    pub emit: Emit,

    /// Indentation unit used inside object literals.
    #[arg(long, default_value = "  ")]
    pub indent: String,
}

/// Output modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    /// Compiled JavaScript, one top-level form per line.
    Js,
    /// The read syntax tree as ESTree-shaped JSON.
    Ast,
    /// A stepwise macro expansion trace with diffs.
    Trace,
}
