//! Order-preserving byte encodings for numeric range bounds.
//!
//! The engine compares range bounds as raw bytes, so every encoding here
//! satisfies `a < b  =>  encode(a) < encode(b)` under lexicographic order.
//! Integers are written big-endian with the sign bit flipped. Floats use
//! the IEEE-754 total-order trick: positive values get the sign bit set,
//! negative values have every bit inverted.

use serde_json::{Number, Value};

use crate::error::{Error, Result};
use crate::schema::FieldType;

const SIGN_32: u32 = 0x8000_0000;
const SIGN_64: u64 = 0x8000_0000_0000_0000;

/// A numeric type with an order-preserving byte form.
pub trait OrderedBytes: Sized + Copy {
    /// Sentinel used for a missing lower bound.
    const LOWEST: Self;
    /// Sentinel used for a missing upper bound.
    const HIGHEST: Self;

    /// Encodes the value so byte order matches numeric order.
    fn to_ordered_bytes(self) -> Vec<u8>;

    /// Decodes bytes produced by [`OrderedBytes::to_ordered_bytes`].
    fn from_ordered_bytes(bytes: &[u8]) -> Option<Self>;
}

impl OrderedBytes for i32 {
    const LOWEST: Self = i32::MIN;
    const HIGHEST: Self = i32::MAX;

    fn to_ordered_bytes(self) -> Vec<u8> {
        ((self as u32) ^ SIGN_32).to_be_bytes().to_vec()
    }

    fn from_ordered_bytes(bytes: &[u8]) -> Option<Self> {
        let raw = u32::from_be_bytes(bytes.try_into().ok()?);
        Some((raw ^ SIGN_32) as i32)
    }
}

impl OrderedBytes for i64 {
    const LOWEST: Self = i64::MIN;
    const HIGHEST: Self = i64::MAX;

    fn to_ordered_bytes(self) -> Vec<u8> {
        ((self as u64) ^ SIGN_64).to_be_bytes().to_vec()
    }

    fn from_ordered_bytes(bytes: &[u8]) -> Option<Self> {
        let raw = u64::from_be_bytes(bytes.try_into().ok()?);
        Some((raw ^ SIGN_64) as i64)
    }
}

impl OrderedBytes for f32 {
    const LOWEST: Self = -f32::MAX;
    const HIGHEST: Self = f32::MAX;

    fn to_ordered_bytes(self) -> Vec<u8> {
        let bits = self.to_bits();
        let ordered = if bits & SIGN_32 != 0 { !bits } else { bits | SIGN_32 };
        ordered.to_be_bytes().to_vec()
    }

    fn from_ordered_bytes(bytes: &[u8]) -> Option<Self> {
        let ordered = u32::from_be_bytes(bytes.try_into().ok()?);
        let bits = if ordered & SIGN_32 != 0 {
            ordered & !SIGN_32
        } else {
            !ordered
        };
        Some(f32::from_bits(bits))
    }
}

impl OrderedBytes for f64 {
    const LOWEST: Self = -f64::MAX;
    const HIGHEST: Self = f64::MAX;

    fn to_ordered_bytes(self) -> Vec<u8> {
        let bits = self.to_bits();
        let ordered = if bits & SIGN_64 != 0 { !bits } else { bits | SIGN_64 };
        ordered.to_be_bytes().to_vec()
    }

    fn from_ordered_bytes(bytes: &[u8]) -> Option<Self> {
        let ordered = u64::from_be_bytes(bytes.try_into().ok()?);
        let bits = if ordered & SIGN_64 != 0 {
            ordered & !SIGN_64
        } else {
            !ordered
        };
        Some(f64::from_bits(bits))
    }
}

/// Which end of a range a bound sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSide {
    /// Lower end; a missing value becomes the type's lowest sentinel.
    Lower,
    /// Upper end; a missing value becomes the type's highest sentinel.
    Upper,
}

/// Numeric storage kinds that support range filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
}

impl NumericKind {
    /// Selects the kind for a declared field type.
    ///
    /// Returns `None` for types that have no range encoding.
    #[must_use]
    pub const fn for_field_type(field_type: FieldType) -> Option<Self> {
        match field_type {
            FieldType::Int => Some(Self::Int),
            FieldType::Long => Some(Self::Long),
            FieldType::Float => Some(Self::Float),
            FieldType::Double => Some(Self::Double),
            FieldType::String | FieldType::Date | FieldType::Vector => None,
        }
    }

    /// Parses one bound and returns its order-preserving bytes.
    ///
    /// `None` resolves to the sentinel for `side`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeBoundParseError`] if the bound is not a JSON
    /// number representable in this kind.
    pub fn encode_bound(self, field: &str, bound: Option<&Value>, side: BoundSide) -> Result<Vec<u8>> {
        match self {
            Self::Int => encode_with(field, bound, side, |n| {
                n.to_string().parse::<i32>().map_err(|e| e.to_string())
            }),
            Self::Long => encode_with(field, bound, side, |n| {
                n.to_string().parse::<i64>().map_err(|e| e.to_string())
            }),
            Self::Float => encode_with(field, bound, side, |n| {
                let v = n.as_f64().ok_or("not a finite number")? as f32;
                if v.is_finite() {
                    Ok(v)
                } else {
                    Err("out of range for FLOAT".to_string())
                }
            }),
            Self::Double => encode_with(field, bound, side, |n| {
                n.as_f64()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| "not a finite number".to_string())
            }),
        }
    }
}

fn encode_with<T, F>(field: &str, bound: Option<&Value>, side: BoundSide, parse: F) -> Result<Vec<u8>>
where
    T: OrderedBytes,
    F: Fn(&Number) -> std::result::Result<T, String>,
{
    let value = match bound {
        None => match side {
            BoundSide::Lower => T::LOWEST,
            BoundSide::Upper => T::HIGHEST,
        },
        Some(Value::Number(n)) => parse(n).map_err(|reason| Error::RangeBoundParseError {
            field: field.to_string(),
            value: n.to_string(),
            reason,
        })?,
        Some(other) => {
            return Err(Error::RangeBoundParseError {
                field: field.to_string(),
                value: other.to_string(),
                reason: "expected a JSON number".to_string(),
            })
        }
    };
    Ok(value.to_ordered_bytes())
}
