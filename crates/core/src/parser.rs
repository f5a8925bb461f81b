//! Token validation: raw tokens -> executable instructions.
//!
//! The parse is exhaustive: every failure is recorded at its token's
//! line and the pass always continues to the next token, so one run
//! surfaces every static defect. Any diagnostic suppresses execution,
//! so only fully-valid tokens need to produce instructions.

use crate::error::{Diagnostic, ErrorKind};
use crate::factory;
use crate::lexer::RawToken;
use crate::operand::{Kind, Operand};

/// A validated operation, with the operand embedded for the two
/// value-taking instructions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    Push(Operand),
    Assert(Operand),
    Pop,
    Swap,
    Dump,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Print,
    Sort,
    Exit,
}

/// One executable instruction with its source line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instr {
    pub op: Op,
    pub line: u32,
}

enum Resolved {
    /// `push` / `assert`: needs a type and literal.
    Value(fn(Operand) -> Op),
    /// Everything else: complete as-is.
    Plain(Op),
}

fn resolve(name: &str) -> Option<Resolved> {
    Some(match name {
        "push" => Resolved::Value(Op::Push),
        "assert" => Resolved::Value(Op::Assert),
        "pop" => Resolved::Plain(Op::Pop),
        "swap" => Resolved::Plain(Op::Swap),
        "dump" => Resolved::Plain(Op::Dump),
        "add" => Resolved::Plain(Op::Add),
        "sub" => Resolved::Plain(Op::Sub),
        "mul" => Resolved::Plain(Op::Mul),
        "div" => Resolved::Plain(Op::Div),
        "mod" => Resolved::Plain(Op::Mod),
        "print" => Resolved::Plain(Op::Print),
        "sort" => Resolved::Plain(Op::Sort),
        "exit" => Resolved::Plain(Op::Exit),
        _ => return None,
    })
}

/// Validate the full token sequence into instructions plus diagnostics.
pub fn parse(tokens: &[RawToken]) -> (Vec<Instr>, Vec<Diagnostic>) {
    let mut instrs = Vec::new();
    let mut diags = Vec::new();
    for token in tokens {
        parse_token(token, &mut instrs, &mut diags);
    }
    (instrs, diags)
}

fn parse_token(token: &RawToken, instrs: &mut Vec<Instr>, diags: &mut Vec<Diagnostic>) {
    let line = token.line;
    let has_value_part = token.type_name.is_some() || token.literal.is_some();

    match resolve(&token.instruction) {
        None => {
            diags.push(Diagnostic::new(
                line,
                ErrorKind::UnknownInstruction,
                token.instruction.clone(),
            ));
            // An unresolvable name is treated as value-free, so a value
            // part on it is flagged too.
            if has_value_part {
                diags.push(Diagnostic::new(line, ErrorKind::NoValueExpected, ""));
            }
        }
        Some(Resolved::Plain(op)) => {
            if has_value_part {
                diags.push(Diagnostic::new(line, ErrorKind::NoValueExpected, ""));
            } else {
                instrs.push(Instr { op, line });
            }
        }
        Some(Resolved::Value(make)) => {
            let type_name = token.type_name.as_deref().unwrap_or("");
            let kind = match Kind::from_name(type_name) {
                Some(k) => Some(k),
                None => {
                    diags.push(Diagnostic::new(line, ErrorKind::InvalidType, type_name));
                    None
                }
            };
            let literal = token.literal.as_deref().unwrap_or("");
            match kind {
                Some(kind) => match factory::create(kind, literal) {
                    Ok(value) => instrs.push(Instr {
                        op: make(value),
                        line,
                    }),
                    Err(e) => diags.push(e.at(line)),
                },
                // The kind is unknown but the literal still gets its
                // format checks, so this run reports them as well.
                None => {
                    if let Err(e) = factory::check_literal(None, literal) {
                        diags.push(e.at(line));
                    }
                }
            }
        }
    }
}
