//! cairn-core: front end and operand model for the cairn stack language.
//!
//! Turns program text into a validated instruction stream:
//!
//! - [`lexer`] -- one raw token per instruction line
//! - [`parser`] -- tokens to instructions, exhaustively collecting
//!   static defects
//! - [`factory`] -- literal validation and operand construction
//! - [`operand`] -- the five-kind numeric model with promotion-checked
//!   arithmetic
//! - [`error`] -- line-tagged diagnostics and their report order
//!
//! [`compile()`] runs the whole front end. Execution (in `cairn-eval`)
//! only starts when the returned diagnostics are empty.

pub mod compile;
pub mod error;
pub mod factory;
pub mod lexer;
pub mod operand;
pub mod parser;

// ── Convenience re-exports: key types ────────────────────────────────

pub use error::{sort_for_report, Diagnostic, ErrorKind, ValueError};
pub use lexer::{RawToken, Source};
pub use operand::{ArithOp, Kind, Operand};
pub use parser::{Instr, Op};

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use compile::compile;
pub use factory::create as create_operand;
pub use lexer::lex;
pub use parser::parse;
