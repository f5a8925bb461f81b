//! Two-pass front end: scan then parse, diagnostics merged.
//!
//! This is a thin orchestrator over the pass modules. Execution must
//! only start when the returned diagnostics are empty.

use std::io::{self, BufRead};

use crate::error::Diagnostic;
use crate::lexer::{self, Source};
use crate::parser::{self, Instr};

/// Run the full front end over `input`.
///
/// Both passes are exhaustive; the diagnostics come back unsorted (the
/// reporter orders them by line). Only an I/O failure on the reader is
/// an early return.
pub fn compile(input: impl BufRead, source: Source) -> io::Result<(Vec<Instr>, Vec<Diagnostic>)> {
    let (tokens, mut diags) = lexer::lex(input, source)?;
    let (instrs, parse_diags) = parser::parse(&tokens);
    diags.extend(parse_diags);
    Ok((instrs, diags))
}
