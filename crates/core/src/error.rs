use serde::Serialize;

/// The closed set of failure classes a program can report.
///
/// The first seven arise during scanning and parsing and accumulate; the
/// rest arise during execution, where at most one occurs per run. The
/// `#[error]` text is the explanation printed after `Error line <n>: `.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum ErrorKind {
    #[error("syntax error : missing parenthesis")]
    MissingParenthesis,
    #[error("unknown instruction")]
    UnknownInstruction,
    #[error("syntax error : unknown type")]
    InvalidType,
    #[error("invalid value format for the given type")]
    InvalidValueFormat,
    #[error("overflow")]
    Overflow,
    #[error("underflow")]
    Underflow,
    #[error("no value expected for this instruction")]
    NoValueExpected,
    #[error("impossible instruction, the stack is empty")]
    EmptyStack,
    #[error("the stack is composed of strictly less than two values when an arithmetic instruction is executed")]
    ImpossibleInstruction,
    #[error("division or modulo by 0")]
    DivisionByZero,
    #[error("the execution stopped because of a false assertion")]
    FalseAssert,
    #[error("impossible to print")]
    InvalidPrint,
    #[error("no exit instruction at the end of the program")]
    NoExit,
}

/// A single line-tagged defect.
///
/// Scan and parse diagnostics are collected into a `Vec<Diagnostic>` and
/// reported in one batch; a runtime fault is a lone `Diagnostic` returned
/// by the engine. Both render the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: u32,
    pub kind: ErrorKind,
    /// Offending source fragment, empty when the explanation stands alone.
    pub context: String,
}

impl Diagnostic {
    pub fn new(line: u32, kind: ErrorKind, context: impl Into<String>) -> Self {
        Diagnostic {
            line,
            kind,
            context: context.into(),
        }
    }

    /// JSON form for machine-readable output: the structured fields plus
    /// the rendered message.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "line":    self.line,
            "kind":    self.kind,
            "context": if self.context.is_empty() { None } else { Some(self.context.as_str()) },
            "message": self.to_string(),
        })
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error line {}: {}", self.line, self.kind)?;
        if !self.context.is_empty() {
            write!(f, " --> {}", self.context)?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

/// Order diagnostics for reporting: ascending by line, stable so that
/// same-line defects keep their discovery order.
pub fn sort_for_report(diags: &mut [Diagnostic]) {
    diags.sort_by_key(|d| d.line);
}

/// A failure produced where no line number is known yet (the operand
/// model and factory); the scanner, parser, or engine attaches the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueError {
    pub kind: ErrorKind,
    pub context: String,
}

impl ValueError {
    pub fn new(kind: ErrorKind, context: impl Into<String>) -> Self {
        ValueError {
            kind,
            context: context.into(),
        }
    }

    pub fn at(self, line: u32) -> Diagnostic {
        Diagnostic::new(line, self.kind, self.context)
    }
}
