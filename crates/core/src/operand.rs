//! Typed numeric operands and their promotion-checked arithmetic.
//!
//! Every stack value is an [`Operand`]: a closed set of five kinds, each
//! carrying its native representation. Binary operations promote both
//! sides to the higher-precision kind, compute in a wide intermediate
//! (`i64` for the integer kinds, `f64` for the floating kinds), and
//! range-check the result against the destination kind before narrowing.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{ErrorKind, ValueError};

/// The five operand kinds, in ascending precision order.
///
/// The derived `Ord` is the promotion order: a binary operation's result
/// kind is the `max` of its operands' kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    Int8,
    Int16,
    Int32,
    Float,
    Double,
}

impl Kind {
    /// Resolve a source-level type name (`int8`, `float`, ...).
    pub fn from_name(name: &str) -> Option<Kind> {
        match name {
            "int8" => Some(Kind::Int8),
            "int16" => Some(Kind::Int16),
            "int32" => Some(Kind::Int32),
            "float" => Some(Kind::Float),
            "double" => Some(Kind::Double),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::Int8 => "int8",
            Kind::Int16 => "int16",
            Kind::Int32 => "int32",
            Kind::Float => "float",
            Kind::Double => "double",
        }
    }

    /// Precision rank: Int8 < Int16 < Int32 < Float < Double.
    pub fn precision(self) -> u8 {
        self as u8
    }

    pub fn is_float(self) -> bool {
        matches!(self, Kind::Float | Kind::Double)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The five binary arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl ArithOp {
    fn is_div_or_mod(self) -> bool {
        matches!(self, ArithOp::Div | ArithOp::Mod)
    }
}

/// A typed numeric value. Immutable, `Copy`, always within its kind's
/// representable range (floating values are always finite).
///
/// Equality is kind AND value: `Int8(4)` never equals `Int32(4)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Float(f32),
    Double(f64),
}

impl Operand {
    pub fn kind(&self) -> Kind {
        match self {
            Operand::Int8(_) => Kind::Int8,
            Operand::Int16(_) => Kind::Int16,
            Operand::Int32(_) => Kind::Int32,
            Operand::Float(_) => Kind::Float,
            Operand::Double(_) => Kind::Double,
        }
    }

    pub fn precision(&self) -> u8 {
        self.kind().precision()
    }

    /// Widen into the integer intermediate. Exact for the integer kinds;
    /// truncating for the floating kinds (the arithmetic path only takes
    /// it when both operands are integral).
    fn to_i64(self) -> i64 {
        match self {
            Operand::Int8(v) => v as i64,
            Operand::Int16(v) => v as i64,
            Operand::Int32(v) => v as i64,
            Operand::Float(v) => v as i64,
            Operand::Double(v) => v as i64,
        }
    }

    /// Widen into the floating intermediate. Exact for every kind: all
    /// integer values and every `f32` convert to `f64` losslessly.
    fn to_f64(self) -> f64 {
        match self {
            Operand::Int8(v) => v as f64,
            Operand::Int16(v) => v as f64,
            Operand::Int32(v) => v as f64,
            Operand::Float(v) => v as f64,
            Operand::Double(v) => v,
        }
    }

    /// Narrow a wide integer result into `kind`, range-checking the
    /// integer destinations. Overflow context carries the wide value.
    fn from_wide_int(kind: Kind, wide: i64) -> Result<Operand, ValueError> {
        let out_of_range = |k: ErrorKind| ValueError::new(k, format!("{wide} is not {kind} type"));
        match kind {
            Kind::Int8 => {
                if wide > i8::MAX as i64 {
                    Err(out_of_range(ErrorKind::Overflow))
                } else if wide < i8::MIN as i64 {
                    Err(out_of_range(ErrorKind::Underflow))
                } else {
                    Ok(Operand::Int8(wide as i8))
                }
            }
            Kind::Int16 => {
                if wide > i16::MAX as i64 {
                    Err(out_of_range(ErrorKind::Overflow))
                } else if wide < i16::MIN as i64 {
                    Err(out_of_range(ErrorKind::Underflow))
                } else {
                    Ok(Operand::Int16(wide as i16))
                }
            }
            Kind::Int32 => {
                if wide > i32::MAX as i64 {
                    Err(out_of_range(ErrorKind::Overflow))
                } else if wide < i32::MIN as i64 {
                    Err(out_of_range(ErrorKind::Underflow))
                } else {
                    Ok(Operand::Int32(wide as i32))
                }
            }
            // Every i64 is within the finite range of both float widths.
            Kind::Float => Ok(Operand::Float(wide as f32)),
            Kind::Double => Ok(Operand::Double(wide as f64)),
        }
    }

    /// Narrow a wide floating result into `kind`. "Underflow" here is
    /// magnitude-based: a result below the most-negative finite value of
    /// the destination width, NOT gradual underflow near zero.
    ///
    /// A value within half an ULP beyond the finite range still rounds
    /// to the extreme finite value and is accepted; without that, the
    /// canonical form of `f32::MAX` would not re-parse.
    pub(crate) fn from_wide_float(kind: Kind, wide: f64) -> Result<Operand, ValueError> {
        let out_of_range = |k: ErrorKind| ValueError::new(k, format!("{wide} is not {kind} type"));
        match kind {
            Kind::Float => {
                let narrowed = wide as f32;
                if narrowed == f32::INFINITY {
                    Err(out_of_range(ErrorKind::Overflow))
                } else if narrowed == f32::NEG_INFINITY {
                    Err(out_of_range(ErrorKind::Underflow))
                } else {
                    Ok(Operand::Float(narrowed))
                }
            }
            Kind::Double => {
                if wide > f64::MAX {
                    Err(out_of_range(ErrorKind::Overflow))
                } else if wide < f64::MIN {
                    Err(out_of_range(ErrorKind::Underflow))
                } else {
                    Ok(Operand::Double(wide))
                }
            }
            // Integer destinations never occur on the floating path
            // (promotion picks a floating kind whenever a side is one),
            // but narrowing is still well defined: range-check, truncate.
            _ => {
                let truncated = wide.trunc();
                Operand::from_wide_int(kind, truncated as i64)
            }
        }
    }

    /// Compute `self ⊕ rhs` with promotion: the result kind is the
    /// higher-precision of the two operand kinds.
    pub fn apply(self, op: ArithOp, rhs: Operand) -> Result<Operand, ValueError> {
        let kind = self.kind().max(rhs.kind());
        if kind.is_float() {
            let a = self.to_f64();
            let b = rhs.to_f64();
            if op.is_div_or_mod() && b == 0.0 {
                return Err(ValueError::new(ErrorKind::DivisionByZero, ""));
            }
            let wide = match op {
                ArithOp::Add => a + b,
                ArithOp::Sub => a - b,
                ArithOp::Mul => a * b,
                ArithOp::Div => a / b,
                ArithOp::Mod => a % b,
            };
            Operand::from_wide_float(kind, wide)
        } else {
            let a = self.to_i64();
            let b = rhs.to_i64();
            if op.is_div_or_mod() && b == 0 {
                return Err(ValueError::new(ErrorKind::DivisionByZero, ""));
            }
            // Operand values are bounded by the i32 range, so none of
            // these can overflow the i64 intermediate -- including
            // i32::MIN / -1, which the range check below rejects.
            let wide = match op {
                ArithOp::Add => a + b,
                ArithOp::Sub => a - b,
                ArithOp::Mul => a * b,
                ArithOp::Div => a / b,
                ArithOp::Mod => a % b,
            };
            Operand::from_wide_int(kind, wide)
        }
    }

    /// Numeric ordering across kinds: integer comparison when both sides
    /// are integral, `f64` comparison otherwise. Total, since operand
    /// values are always finite.
    pub fn value_cmp(&self, other: &Operand) -> Ordering {
        if self.kind().is_float() || other.kind().is_float() {
            self.to_f64().total_cmp(&other.to_f64())
        } else {
            self.to_i64().cmp(&other.to_i64())
        }
    }
}

/// Canonical text form. Floating values with nothing after the decimal
/// point render without one (`4.0` -> "4"), and insignificant trailing
/// zeros are suppressed -- Rust's shortest-roundtrip `Display` gives
/// exactly that.
impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Int8(v) => write!(f, "{v}"),
            Operand::Int16(v) => write!(f, "{v}"),
            Operand::Int32(v) => write!(f, "{v}"),
            Operand::Float(v) => write!(f, "{v}"),
            Operand::Double(v) => write!(f, "{v}"),
        }
    }
}
