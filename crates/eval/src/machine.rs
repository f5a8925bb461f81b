//! The stack execution engine.
//!
//! One machine interprets one validated program against one stack,
//! strictly in order. `exit` halts it; exhaustion without `exit` and
//! every runtime fault are terminal -- at most one fault occurs per run
//! because nothing executes past it.

use std::io::{self, Write};

use cairn_core::error::{Diagnostic, ErrorKind};
use cairn_core::operand::{ArithOp, Operand};
use cairn_core::parser::{Instr, Op};

/// Terminal failure of a program run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// A language-level fault, tagged with the faulting instruction's
    /// line and reported in diagnostic form.
    #[error("{0}")]
    Fault(#[from] Diagnostic),
    /// The output stream failed; there is nothing language-level to
    /// report.
    #[error("output error: {0}")]
    Io(#[from] io::Error),
}

/// The engine: one stack, one exit flag, one output sink.
pub struct Machine<W> {
    stack: Vec<Operand>,
    exited: bool,
    out: W,
}

impl<W: Write> Machine<W> {
    pub fn new(out: W) -> Self {
        Machine {
            stack: Vec::new(),
            exited: false,
            out,
        }
    }

    /// The live stack, bottom first. Exposed for inspection only; the
    /// machine is the sole mutator.
    pub fn stack(&self) -> &[Operand] {
        &self.stack
    }

    /// Interpret the program. Returns on `exit`, on the first runtime
    /// fault, or -- as the NoExit fault -- on exhaustion. Instructions
    /// after a halt are never observed.
    pub fn run(&mut self, program: &[Instr]) -> Result<(), RunError> {
        let mut line = 0;
        for instr in program {
            line = instr.line;
            self.step(instr)?;
            if self.exited {
                return Ok(());
            }
        }
        Err(Diagnostic::new(line, ErrorKind::NoExit, "").into())
    }

    fn step(&mut self, instr: &Instr) -> Result<(), RunError> {
        let line = instr.line;
        match instr.op {
            Op::Push(v) => {
                self.stack.push(v);
                Ok(())
            }
            Op::Assert(v) => self.assert_top(v, line),
            Op::Pop => match self.stack.pop() {
                Some(_) => Ok(()),
                None => Err(Diagnostic::new(line, ErrorKind::EmptyStack, "").into()),
            },
            Op::Swap => self.swap(line),
            Op::Dump => self.dump(),
            Op::Add => self.arith(ArithOp::Add, "add", line),
            Op::Sub => self.arith(ArithOp::Sub, "sub", line),
            Op::Mul => self.arith(ArithOp::Mul, "mul", line),
            Op::Div => self.arith(ArithOp::Div, "div", line),
            Op::Mod => self.arith(ArithOp::Mod, "mod", line),
            Op::Print => self.print(line),
            Op::Sort => {
                // Stable, ascending bottom-to-top.
                self.stack.sort_by(Operand::value_cmp);
                Ok(())
            }
            Op::Exit => {
                self.exited = true;
                Ok(())
            }
        }
    }

    /// `assert` checks the top against its operand without touching the
    /// stack; the expected value itself is consumed either way.
    fn assert_top(&mut self, expected: Operand, line: u32) -> Result<(), RunError> {
        match self.stack.last() {
            None => Err(Diagnostic::new(line, ErrorKind::EmptyStack, "").into()),
            Some(top) if *top != expected => {
                Err(Diagnostic::new(line, ErrorKind::FalseAssert, "").into())
            }
            Some(_) => Ok(()),
        }
    }

    fn swap(&mut self, line: u32) -> Result<(), RunError> {
        let n = self.stack.len();
        if n < 2 {
            return Err(Diagnostic::new(line, ErrorKind::ImpossibleInstruction, "swap").into());
        }
        self.stack.swap(n - 1, n - 2);
        Ok(())
    }

    /// Write every element top-to-bottom; non-destructive.
    fn dump(&mut self) -> Result<(), RunError> {
        for v in self.stack.iter().rev() {
            writeln!(self.out, "{v}")?;
        }
        Ok(())
    }

    /// Pop right then left (right was pushed last), compute
    /// `left ⊕ right`, push the result.
    fn arith(&mut self, op: ArithOp, name: &'static str, line: u32) -> Result<(), RunError> {
        let (Some(right), Some(left)) = (self.stack.pop(), self.stack.pop()) else {
            return Err(Diagnostic::new(line, ErrorKind::ImpossibleInstruction, name).into());
        };
        let result = left.apply(op, right).map_err(|e| e.at(line))?;
        self.stack.push(result);
        Ok(())
    }

    /// `print` requires an Int8 top whose value is a printable ASCII
    /// character (control characters and DEL excluded).
    fn print(&mut self, line: u32) -> Result<(), RunError> {
        let Some(top) = self.stack.last() else {
            return Err(Diagnostic::new(line, ErrorKind::EmptyStack, "").into());
        };
        let value = match top {
            Operand::Int8(v) => *v,
            _ => return Err(Diagnostic::new(line, ErrorKind::InvalidPrint, "not an int8").into()),
        };
        if !(32..=126).contains(&value) {
            return Err(Diagnostic::new(
                line,
                ErrorKind::InvalidPrint,
                format!("{value} is not printable"),
            )
            .into());
        }
        writeln!(self.out, "{}", value as u8 as char)?;
        Ok(())
    }
}
