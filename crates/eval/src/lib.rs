//! cairn-eval: the execution engine for validated cairn programs.
//!
//! Consumes the instruction stream `cairn-core` produces (only ever run
//! it when compilation reported zero diagnostics) and interprets it
//! against a single stack, writing `dump`/`print` output through a
//! caller-supplied sink.

pub mod machine;

pub use machine::{Machine, RunError};

use std::io::Write;

use cairn_core::parser::Instr;

/// Execute a validated program, writing its output to `out`.
///
/// Convenience over [`Machine`] for the common run-once case.
pub fn execute(program: &[Instr], out: impl Write) -> Result<(), RunError> {
    Machine::new(out).run(program)
}
