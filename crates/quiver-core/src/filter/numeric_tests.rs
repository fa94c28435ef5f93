//! Tests for order-preserving numeric encodings.

use super::numeric::*;
use crate::schema::FieldType;
use proptest::prelude::*;
use serde_json::json;

// =========================================================================
// Sentinels and layout
// =========================================================================

#[test]
fn test_i32_encoding_is_big_endian_sign_flipped() {
    assert_eq!(0i32.to_ordered_bytes(), vec![0x80, 0, 0, 0]);
    assert_eq!(i32::MIN.to_ordered_bytes(), vec![0, 0, 0, 0]);
    assert_eq!(i32::MAX.to_ordered_bytes(), vec![0xff, 0xff, 0xff, 0xff]);
    assert_eq!(18i32.to_ordered_bytes(), vec![0x80, 0, 0, 18]);
}

#[test]
fn test_float_sentinels_are_finite_extremes() {
    assert_eq!(<f32 as OrderedBytes>::LOWEST, -f32::MAX);
    assert_eq!(<f32 as OrderedBytes>::HIGHEST, f32::MAX);
    assert_eq!(<f64 as OrderedBytes>::LOWEST, -f64::MAX);
    assert_eq!(<f64 as OrderedBytes>::HIGHEST, f64::MAX);
}

#[test]
fn test_negative_floats_sort_below_positive() {
    assert!((-1.5f32).to_ordered_bytes() < (-0.5f32).to_ordered_bytes());
    assert!((-0.5f32).to_ordered_bytes() < 0.0f32.to_ordered_bytes());
    assert!((-2.0f64).to_ordered_bytes() < 1e-300f64.to_ordered_bytes());
}

#[test]
fn test_from_ordered_bytes_rejects_wrong_width() {
    assert_eq!(i32::from_ordered_bytes(&[1, 2, 3]), None);
    assert_eq!(f64::from_ordered_bytes(&[0; 4]), None);
}

// =========================================================================
// NumericKind
// =========================================================================

#[test]
fn test_kind_for_field_type() {
    assert_eq!(NumericKind::for_field_type(FieldType::Int), Some(NumericKind::Int));
    assert_eq!(NumericKind::for_field_type(FieldType::Long), Some(NumericKind::Long));
    assert_eq!(NumericKind::for_field_type(FieldType::Float), Some(NumericKind::Float));
    assert_eq!(NumericKind::for_field_type(FieldType::Double), Some(NumericKind::Double));
    assert_eq!(NumericKind::for_field_type(FieldType::String), None);
    assert_eq!(NumericKind::for_field_type(FieldType::Date), None);
    assert_eq!(NumericKind::for_field_type(FieldType::Vector), None);
}

#[test]
fn test_encode_bound_missing_uses_sentinels() {
    let lower = NumericKind::Long
        .encode_bound("views", None, BoundSide::Lower)
        .expect("lower");
    let upper = NumericKind::Long
        .encode_bound("views", None, BoundSide::Upper)
        .expect("upper");

    assert_eq!(i64::from_ordered_bytes(&lower), Some(i64::MIN));
    assert_eq!(i64::from_ordered_bytes(&upper), Some(i64::MAX));
}

#[test]
fn test_encode_bound_int_rejects_fraction() {
    let err = NumericKind::Int
        .encode_bound("age", Some(&json!(18.5)), BoundSide::Lower)
        .unwrap_err();

    assert_eq!(err.code(), "QUIVER-012");
    assert!(err.to_string().contains("18.5"));
}

#[test]
fn test_encode_bound_int_rejects_overflow() {
    let result = NumericKind::Int.encode_bound("age", Some(&json!(3_000_000_000i64)), BoundSide::Upper);

    assert!(result.is_err());
}

#[test]
fn test_encode_bound_rejects_strings() {
    let err = NumericKind::Double
        .encode_bound("rating", Some(&json!("4.5")), BoundSide::Lower)
        .unwrap_err();

    assert!(err.to_string().contains("expected a JSON number"));
}

#[test]
fn test_encode_bound_float_rejects_overflow_to_infinity() {
    let result = NumericKind::Float.encode_bound("price", Some(&json!(1e300)), BoundSide::Upper);

    assert!(result.is_err());
}

#[test]
fn test_encode_bound_float_accepts_integers() {
    let bytes = NumericKind::Float
        .encode_bound("price", Some(&json!(10)), BoundSide::Lower)
        .expect("encode");

    assert_eq!(f32::from_ordered_bytes(&bytes), Some(10.0));
}

// =========================================================================
// Properties
// =========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: byte order matches numeric order for i32
    #[test]
    fn prop_i32_order_preserved(a in any::<i32>(), b in any::<i32>()) {
        prop_assume!(a < b);
        prop_assert!(a.to_ordered_bytes() < b.to_ordered_bytes());
    }

    /// Property: byte order matches numeric order for i64
    #[test]
    fn prop_i64_order_preserved(a in any::<i64>(), b in any::<i64>()) {
        prop_assume!(a < b);
        prop_assert!(a.to_ordered_bytes() < b.to_ordered_bytes());
    }

    /// Property: byte order matches numeric order for finite f32
    #[test]
    fn prop_f32_order_preserved(
        a in proptest::num::f32::NORMAL | proptest::num::f32::ZERO | proptest::num::f32::SUBNORMAL,
        b in proptest::num::f32::NORMAL | proptest::num::f32::ZERO | proptest::num::f32::SUBNORMAL,
    ) {
        prop_assume!(a < b);
        prop_assert!(a.to_ordered_bytes() < b.to_ordered_bytes());
    }

    /// Property: byte order matches numeric order for finite f64
    #[test]
    fn prop_f64_order_preserved(
        a in proptest::num::f64::NORMAL | proptest::num::f64::ZERO | proptest::num::f64::SUBNORMAL,
        b in proptest::num::f64::NORMAL | proptest::num::f64::ZERO | proptest::num::f64::SUBNORMAL,
    ) {
        prop_assume!(a < b);
        prop_assert!(a.to_ordered_bytes() < b.to_ordered_bytes());
    }

    /// Property: decoding restores the exact bits
    #[test]
    fn prop_f64_decode_restores_bits(v in any::<f64>()) {
        let decoded = f64::from_ordered_bytes(&v.to_ordered_bytes()).expect("width");
        prop_assert_eq!(decoded.to_bits(), v.to_bits());
    }

    /// Property: decoding restores i64 values
    #[test]
    fn prop_i64_decode_restores_value(v in any::<i64>()) {
        prop_assert_eq!(i64::from_ordered_bytes(&v.to_ordered_bytes()), Some(v));
    }
}
