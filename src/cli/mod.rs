//! The Sigil Command-Line Interface.
//!
//! Reads one file, runs the pipeline, and prints the result. Any failure is
//! reported as a `miette` diagnostic and exits with status 1.

use std::{fs, path::Path, process};

use clap::Parser;

use crate::cli::args::{Emit, SigilArgs};
use crate::errors::{print_error, Result};
use crate::macros::{expand_traced, ExpandOptions};
use crate::{ast::Node, compile_with, CompileOptions, Reader, SigilError};

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = SigilArgs::parse();
    if let Err(e) = execute(&args) {
        print_error(e);
        process::exit(1);
    }
}

/// Runs the pipeline selected by `args`, writing to stdout.
pub fn execute(args: &SigilArgs) -> Result<()> {
    let source = read_source(&args.file)?;
    let name = args.file.display().to_string();
    let forms = Reader::named(&name, &source).collect::<Result<Vec<_>>>()?;
    let options = CompileOptions::default().indent(args.indent.as_str());

    match args.emit {
        Emit::Js => {
            let compiled = forms
                .iter()
                .map(|form| compile_with(form, &options))
                .collect::<Result<Vec<_>>>()?;
            for line in compiled {
                println!("{}", line);
            }
        }
        Emit::Ast => output::print_ast(&forms)?,
        Emit::Trace => {
            for (i, form) in forms.iter().enumerate() {
                let trace = match form {
                    Node::ListExpression(list) => {
                        expand_traced(list.clone(), &ExpandOptions::default())?.1
                    }
                    _ => Vec::new(),
                };
                let compiled = compile_with(form, &options)?;
                output::print_trace(i, form, &trace, &compiled)?;
            }
        }
    }
    Ok(())
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| SigilError::io(format!("cannot read '{}'", path.display()), e))
}
