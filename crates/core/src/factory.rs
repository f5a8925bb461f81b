//! Literal validation and operand construction.
//!
//! A literal goes through three gates: non-empty, lexical shape, then a
//! wide-intermediate parse range-checked against the requested kind.
//! Integer literals parse into `i128` so that even values far outside
//! `i64` classify correctly by sign; floating literals parse into `f64`,
//! where an overflowing literal becomes an infinity the range check
//! rejects.

use std::num::IntErrorKind;

use crate::error::{ErrorKind, ValueError};
use crate::operand::{Kind, Operand};

/// Validate and parse `literal` into a new operand of `kind`.
pub fn create(kind: Kind, literal: &str) -> Result<Operand, ValueError> {
    check_literal(Some(kind), literal)?;
    match kind {
        Kind::Int8 => int_operand(kind, literal, i8::MIN as i64, i8::MAX as i64, |n| {
            Operand::Int8(n as i8)
        }),
        Kind::Int16 => int_operand(kind, literal, i16::MIN as i64, i16::MAX as i64, |n| {
            Operand::Int16(n as i16)
        }),
        Kind::Int32 => int_operand(kind, literal, i32::MIN as i64, i32::MAX as i64, |n| {
            Operand::Int32(n as i32)
        }),
        Kind::Float | Kind::Double => float_operand(kind, literal),
    }
}

/// Shape-only validation: empty check plus lexical form.
///
/// The parser calls this with `kind: None` when the type name itself did
/// not resolve, so a malformed literal on the same line is still
/// reported; an unknown kind uses the permissive floating rules.
pub fn check_literal(kind: Option<Kind>, literal: &str) -> Result<(), ValueError> {
    if literal.is_empty() {
        return Err(ValueError::new(
            ErrorKind::InvalidValueFormat,
            "cannot be empty",
        ));
    }
    if !valid_shape(kind, literal) {
        return Err(ValueError::new(ErrorKind::InvalidValueFormat, literal));
    }
    Ok(())
}

/// Optional leading sign, then digits; floating kinds additionally allow
/// at most one `.` and at most one `e` (the `.` not after the `e`). No
/// signed exponents: `1e-5` is malformed.
fn valid_shape(kind: Option<Kind>, literal: &str) -> bool {
    let allow_fractional = kind.map_or(true, Kind::is_float);
    let bytes = literal.as_bytes();
    let digits = match bytes.first() {
        Some(b'+') | Some(b'-') => &bytes[1..],
        _ => bytes,
    };
    if digits.is_empty() {
        return false;
    }
    let mut seen_dot = false;
    let mut seen_exp = false;
    for &c in digits {
        match c {
            b'.' if allow_fractional && !seen_dot && !seen_exp => seen_dot = true,
            b'e' if allow_fractional && !seen_exp => seen_exp = true,
            c if c.is_ascii_digit() => {}
            _ => return false,
        }
    }
    true
}

fn int_operand(
    kind: Kind,
    literal: &str,
    min: i64,
    max: i64,
    make: fn(i64) -> Operand,
) -> Result<Operand, ValueError> {
    let out_of_range = |k: ErrorKind| ValueError::new(k, format!("{literal} is not {kind} type"));
    let wide: i128 = match literal.parse() {
        Ok(n) => n,
        Err(e) => {
            // Shape admits only sign+digits, so the wide parse can only
            // fail on range; the sign picks the direction.
            return Err(match e.kind() {
                IntErrorKind::PosOverflow => out_of_range(ErrorKind::Overflow),
                IntErrorKind::NegOverflow => out_of_range(ErrorKind::Underflow),
                _ => ValueError::new(ErrorKind::InvalidValueFormat, literal),
            });
        }
    };
    if wide > max as i128 {
        Err(out_of_range(ErrorKind::Overflow))
    } else if wide < min as i128 {
        Err(out_of_range(ErrorKind::Underflow))
    } else {
        Ok(make(wide as i64))
    }
}

fn float_operand(kind: Kind, literal: &str) -> Result<Operand, ValueError> {
    // Shape-valid text the numeric parser still rejects (".", "5e", "e5")
    // is a format defect, not a range one. An out-of-range literal parses
    // to an infinity the narrowing step rejects.
    let wide: f64 = literal
        .parse()
        .map_err(|_| ValueError::new(ErrorKind::InvalidValueFormat, literal))?;
    Operand::from_wide_float(kind, wide)
        .map_err(|e| ValueError::new(e.kind, format!("{literal} is not {kind} type")))
}
