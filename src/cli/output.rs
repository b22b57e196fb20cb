//! Handles all user-facing output for the CLI.
//!
//! Trace output is colorized with `termcolor` and diffed with `difference`;
//! the AST is printed as pretty JSON. The `write_*` functions take any
//! [`WriteColor`] so they can be exercised against a buffer.

use std::io;

use difference::{Changeset, Difference};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::ast::Node;
use crate::errors::Result;
use crate::macros::ExpansionStep;
use crate::SigilError;

// ============================================================================
// AST OUTPUT
// ============================================================================

/// Prints the read forms as ESTree-shaped JSON.
pub fn print_ast(forms: &[Node]) -> Result<()> {
    let json = serde_json::to_string_pretty(forms)
        .map_err(|e| SigilError::io("cannot serialize syntax tree", e))?;
    println!("{}", json);
    Ok(())
}

// ============================================================================
// TRACE OUTPUT
// ============================================================================

/// Prints one form's macro expansion trace to stdout.
pub fn print_trace(
    index: usize,
    form: &Node,
    trace: &[ExpansionStep],
    compiled: &str,
) -> Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    write_trace(&mut stdout, index, form, trace, compiled)
        .map_err(|e| SigilError::io("cannot write trace", e))
}

/// Writes the form, each expansion step as a diff against the previous
/// step, and the compiled JavaScript.
pub fn write_trace<W: WriteColor>(
    out: &mut W,
    index: usize,
    form: &Node,
    trace: &[ExpansionStep],
    compiled: &str,
) -> io::Result<()> {
    header(out, &format!("=== Form {} ===", index))?;
    let mut last = form.pretty();
    writeln!(out, "{}", last)?;

    for (i, step) in trace.iter().enumerate() {
        header(out, &format!("--- Step {}: {} ---", i, step.macro_name))?;
        let current = step.output.pretty();
        let changeset = Changeset::new(&last, &current, "\n");
        write_diff(out, &changeset.diffs)?;
        last = current;
    }

    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
    write!(out, "=>")?;
    out.reset()?;
    writeln!(out, " {}", compiled)?;
    writeln!(out)
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn header<W: WriteColor>(out: &mut W, text: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
    writeln!(out, "{}", text)?;
    out.reset()
}

fn write_diff<W: WriteColor>(out: &mut W, diffs: &[Difference]) -> io::Result<()> {
    for diff in diffs {
        match diff {
            Difference::Same(x) => {
                out.reset()?;
                writeln!(out, " {}", x)?;
            }
            Difference::Add(x) => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                writeln!(out, "+{}", x)?;
            }
            Difference::Rem(x) => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
                writeln!(out, "-{}", x)?;
            }
        }
    }
    out.reset()
}
