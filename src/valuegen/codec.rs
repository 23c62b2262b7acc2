//! Exact JSON intermediate representation for [`AbiValue`].
//!
//! | kind                 | representation                                   |
//! |----------------------|--------------------------------------------------|
//! | bool                 | JSON boolean                                     |
//! | address, bytesN, bytes | lowercase `0x`-prefixed hex string             |
//! | intN, uintN          | base-10 string (`"-128"`, `"255"`)               |
//! | string               | JSON string                                      |
//! | T[N], T[]            | JSON array                                       |
//! | tuple                | object keyed by field name, or array when names are missing or repeated |
//!
//! Decoding accepts a few lenient spellings (JSON numbers for integers,
//! `"true"`/`"false"` for booleans, arrays for named tuples) but rejects
//! anything that would not re-encode to an equivalent value.

use std::collections::HashSet;

use alloy_primitives::{Address, I256, U256};
use serde_json::{Map, Value};
use tracing::debug;

use abi_fuzz_types::{AbiParam, AbiType, ADDRESS_LEN};

use super::error::{field_path, index_path, DecodeError, ShapeMismatchError};
use super::value::AbiValue;
use super::word::{fits_uint, format_signed, signed_magnitude_limit};

const ROOT: &str = "value";
const ARGS: &str = "args";

/// Encode `value` as its intermediate representation.
pub fn encode_value(ty: &AbiType, value: &AbiValue) -> Result<Value, ShapeMismatchError> {
    value.check_shape(ty)?;
    encode_node(ty, value, ROOT)
}

/// Decode an intermediate representation produced by [`encode_value`] (or by
/// an external corpus file) back into a value of type `ty`.
pub fn decode_value(ty: &AbiType, ir: &Value) -> Result<AbiValue, DecodeError> {
    decode_node(ty, ir, ROOT).map_err(|err| {
        debug!(target: "abi_mutation", %ty, error = %err, "failed to decode value");
        err
    })
}

/// Encode a full argument list as one document.
///
/// The result is an object keyed by parameter name when every name is
/// present and distinct, and a positional array otherwise.
pub fn encode_arguments(params: &[AbiParam], values: &[AbiValue]) -> Result<Value, ShapeMismatchError> {
    if params.len() != values.len() {
        let (expected, found) = (params.len(), values.len());
        return Err(ShapeMismatchError::new(
            ARGS,
            format!("{expected} arguments"),
            format!("{found} arguments"),
        ));
    }
    for (i, (param, value)) in params.iter().zip(values).enumerate() {
        value.check_shape_at(&param.ty, &field_path(ARGS, &param.name, i))?;
    }
    encode_members(params, values.iter(), ARGS)
}

/// Decode an argument document in either the object or positional form.
pub fn decode_arguments(params: &[AbiParam], ir: &Value) -> Result<Vec<AbiValue>, DecodeError> {
    let members = decode_members(params, ir, ARGS, "arguments").map_err(|err| {
        debug!(target: "abi_mutation", error = %err, "failed to decode arguments");
        err
    })?;
    Ok(members.into_iter().map(|(_, value)| value).collect())
}

fn hex_string(bytes: &[u8]) -> String {
    let digits = hex::encode(bytes);
    format!("0x{digits}")
}

/// Whether every field carries a non-empty name distinct from the others.
fn has_unique_names(fields: &[AbiParam]) -> bool {
    let mut seen = HashSet::with_capacity(fields.len());
    fields
        .iter()
        .all(|field| !field.name.is_empty() && seen.insert(field.name.as_str()))
}

fn encode_node(ty: &AbiType, value: &AbiValue, path: &str) -> Result<Value, ShapeMismatchError> {
    let mismatch = || ShapeMismatchError::new(path, ty, value.kind_name());
    let encoded = match ty {
        AbiType::Bool => {
            let AbiValue::Bool(b) = value else { return Err(mismatch()) };
            Value::Bool(*b)
        }
        AbiType::Address => {
            let AbiValue::Address(addr) = value else { return Err(mismatch()) };
            Value::String(hex_string(addr.as_slice()))
        }
        AbiType::Int(_) => {
            let AbiValue::Int(v) = value else { return Err(mismatch()) };
            Value::String(format_signed(*v))
        }
        AbiType::Uint(_) => {
            let AbiValue::Uint(v) = value else { return Err(mismatch()) };
            Value::String(v.to_string())
        }
        AbiType::FixedBytes(_) => {
            let AbiValue::FixedBytes(bytes) = value else { return Err(mismatch()) };
            Value::String(hex_string(bytes))
        }
        AbiType::Bytes => {
            let AbiValue::Bytes(bytes) = value else { return Err(mismatch()) };
            Value::String(hex_string(bytes))
        }
        AbiType::String => {
            let AbiValue::String(s) = value else { return Err(mismatch()) };
            Value::String(s.clone())
        }
        AbiType::Array(elem, _) => {
            let AbiValue::Array(items) = value else { return Err(mismatch()) };
            encode_elements(elem, items, path)?
        }
        AbiType::Slice(elem) => {
            let AbiValue::Slice(items) = value else { return Err(mismatch()) };
            encode_elements(elem, items, path)?
        }
        AbiType::Tuple(fields) => {
            let AbiValue::Tuple(items) = value else { return Err(mismatch()) };
            if items.len() != fields.len() {
                return Err(ShapeMismatchError::new(
                    path,
                    ty,
                    format!("tuple of {} fields", items.len()),
                ));
            }
            encode_members(fields, items.iter().map(|(_, item)| item), path)?
        }
    };
    Ok(encoded)
}

fn encode_elements(elem: &AbiType, items: &[AbiValue], path: &str) -> Result<Value, ShapeMismatchError> {
    let encoded = items
        .iter()
        .enumerate()
        .map(|(i, item)| encode_node(elem, item, &index_path(path, i)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::Array(encoded))
}

fn encode_members<'v>(
    fields: &[AbiParam],
    members: impl Iterator<Item = &'v AbiValue>,
    path: &str,
) -> Result<Value, ShapeMismatchError> {
    let encoded = fields
        .iter()
        .zip(members)
        .enumerate()
        .map(|(i, (field, value))| encode_node(&field.ty, value, &field_path(path, &field.name, i)))
        .collect::<Result<Vec<_>, _>>()?;
    if has_unique_names(fields) {
        let map: Map<String, Value> = fields
            .iter()
            .map(|field| field.name.clone())
            .zip(encoded)
            .collect();
        Ok(Value::Object(map))
    } else {
        Ok(Value::Array(encoded))
    }
}

fn json_kind(ir: &Value) -> &'static str {
    match ir {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn unexpected(ty: &AbiType, ir: &Value, path: &str) -> DecodeError {
    DecodeError::UnexpectedNode {
        path: path.to_string(),
        ty: ty.to_string(),
        found: json_kind(ir),
    }
}

fn decode_node(ty: &AbiType, ir: &Value, path: &str) -> Result<AbiValue, DecodeError> {
    if !ty.has_valid_size() {
        return Err(DecodeError::UnsupportedType {
            path: path.to_string(),
            ty: ty.to_string(),
        });
    }

    match ty {
        AbiType::Bool => match ir {
            Value::Bool(b) => Ok(AbiValue::Bool(*b)),
            Value::String(s) if s == "true" => Ok(AbiValue::Bool(true)),
            Value::String(s) if s == "false" => Ok(AbiValue::Bool(false)),
            _ => Err(unexpected(ty, ir, path)),
        },
        AbiType::Address => {
            let bytes = decode_sized_hex(ty, ir, path, ADDRESS_LEN)?;
            Ok(AbiValue::Address(Address::from_slice(&bytes)))
        }
        AbiType::FixedBytes(size) => {
            let bytes = decode_sized_hex(ty, ir, path, *size)?;
            Ok(AbiValue::FixedBytes(bytes))
        }
        AbiType::Bytes => match ir {
            Value::String(s) => Ok(AbiValue::Bytes(decode_hex(s, path)?)),
            _ => Err(unexpected(ty, ir, path)),
        },
        AbiType::String => match ir {
            Value::String(s) => Ok(AbiValue::String(s.clone())),
            _ => Err(unexpected(ty, ir, path)),
        },
        AbiType::Uint(bits) => {
            let text = integer_text(ty, ir, path)?;
            parse_uint(&text, *bits, ty, path).map(AbiValue::Uint)
        }
        AbiType::Int(bits) => {
            let text = integer_text(ty, ir, path)?;
            parse_int(&text, *bits, ty, path).map(AbiValue::Int)
        }
        AbiType::Array(elem, len) => {
            let Value::Array(items) = ir else {
                return Err(unexpected(ty, ir, path));
            };
            if items.len() != *len {
                return Err(DecodeError::ArityMismatch {
                    path: path.to_string(),
                    ty: ty.to_string(),
                    expected: *len,
                    found: items.len(),
                });
            }
            decode_elements(elem, items, path).map(AbiValue::Array)
        }
        AbiType::Slice(elem) => {
            let Value::Array(items) = ir else {
                return Err(unexpected(ty, ir, path));
            };
            decode_elements(elem, items, path).map(AbiValue::Slice)
        }
        AbiType::Tuple(fields) => {
            decode_members(fields, ir, path, &ty.to_string()).map(AbiValue::Tuple)
        }
    }
}

fn decode_elements(elem: &AbiType, items: &[Value], path: &str) -> Result<Vec<AbiValue>, DecodeError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| decode_node(elem, item, &index_path(path, i)))
        .collect()
}

/// Decode tuple members or an argument list from an object or an array.
fn decode_members(
    fields: &[AbiParam],
    ir: &Value,
    path: &str,
    ty_name: &str,
) -> Result<Vec<(String, AbiValue)>, DecodeError> {
    let arity = |found: usize| DecodeError::ArityMismatch {
        path: path.to_string(),
        ty: ty_name.to_string(),
        expected: fields.len(),
        found,
    };

    match ir {
        Value::Array(items) => {
            if items.len() != fields.len() {
                return Err(arity(items.len()));
            }
            fields
                .iter()
                .zip(items)
                .enumerate()
                .map(|(i, (field, item))| {
                    let value = decode_node(&field.ty, item, &field_path(path, &field.name, i))?;
                    Ok((field.name.clone(), value))
                })
                .collect()
        }
        Value::Object(map) => {
            if map.len() != fields.len() {
                return Err(arity(map.len()));
            }
            fields
                .iter()
                .enumerate()
                .map(|(i, field)| {
                    let key = if field.name.is_empty() {
                        i.to_string()
                    } else {
                        field.name.clone()
                    };
                    let item = map.get(&key).ok_or_else(|| DecodeError::MissingField {
                        path: path.to_string(),
                        field: key.clone(),
                    })?;
                    let value = decode_node(&field.ty, item, &field_path(path, &field.name, i))?;
                    Ok((field.name.clone(), value))
                })
                .collect()
        }
        other => Err(DecodeError::UnexpectedNode {
            path: path.to_string(),
            ty: ty_name.to_string(),
            found: json_kind(other),
        }),
    }
}

fn decode_hex(input: &str, path: &str) -> Result<Vec<u8>, DecodeError> {
    let malformed = |reason: String| DecodeError::MalformedHex {
        path: path.to_string(),
        input: input.to_string(),
        reason,
    };
    let digits = input
        .strip_prefix("0x")
        .ok_or_else(|| malformed("missing 0x prefix".to_string()))?;
    hex::decode(digits).map_err(|err| malformed(err.to_string()))
}

fn decode_sized_hex(ty: &AbiType, ir: &Value, path: &str, size: usize) -> Result<Vec<u8>, DecodeError> {
    let Value::String(s) = ir else {
        return Err(unexpected(ty, ir, path));
    };
    let bytes = decode_hex(s, path)?;
    if bytes.len() != size {
        return Err(DecodeError::LengthMismatch {
            path: path.to_string(),
            ty: ty.to_string(),
            expected: size,
            found: bytes.len(),
        });
    }
    Ok(bytes)
}

/// Base-10 text of an integer node, accepting JSON integers as well as strings.
fn integer_text(ty: &AbiType, ir: &Value, path: &str) -> Result<String, DecodeError> {
    match ir {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Ok(u.to_string())
            } else if let Some(i) = n.as_i64() {
                Ok(i.to_string())
            } else {
                Err(DecodeError::MalformedInteger {
                    path: path.to_string(),
                    ty: ty.to_string(),
                    input: n.to_string(),
                })
            }
        }
        _ => Err(unexpected(ty, ir, path)),
    }
}

/// Parse an unsigned run of ASCII digits into a 256-bit magnitude.
fn parse_magnitude(digits: &str, input: &str, ty: &AbiType, path: &str) -> Result<U256, DecodeError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::MalformedInteger {
            path: path.to_string(),
            ty: ty.to_string(),
            input: input.to_string(),
        });
    }
    U256::from_str_radix(digits, 10).map_err(|_| out_of_range(input, ty, path))
}

fn out_of_range(input: &str, ty: &AbiType, path: &str) -> DecodeError {
    DecodeError::IntegerOutOfRange {
        path: path.to_string(),
        ty: ty.to_string(),
        input: input.to_string(),
    }
}

fn parse_uint(text: &str, bits: usize, ty: &AbiType, path: &str) -> Result<U256, DecodeError> {
    let value = parse_magnitude(text, text, ty, path)?;
    if !fits_uint(value, bits) {
        return Err(out_of_range(text, ty, path));
    }
    Ok(value)
}

fn parse_int(text: &str, bits: usize, ty: &AbiType, path: &str) -> Result<I256, DecodeError> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let magnitude = parse_magnitude(digits, text, ty, path)?;
    let limit = signed_magnitude_limit(bits);
    if negative {
        if magnitude > limit {
            return Err(out_of_range(text, ty, path));
        }
        Ok(I256::from_raw(magnitude.wrapping_neg()))
    } else {
        if magnitude >= limit {
            return Err(out_of_range(text, ty, path));
        }
        Ok(I256::from_raw(magnitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::valuegen::config::GeneratorConfig;
    use crate::valuegen::generate::generate_value;
    use crate::valuegen::generator::RandomGenerator;

    fn position() -> AbiType {
        AbiType::tuple([
            AbiParam::new("owner", AbiType::Address),
            AbiParam::new("amount", AbiType::Uint(96)),
            AbiParam::new("delta", AbiType::Int(16)),
        ])
    }

    #[test]
    fn test_encode_canonical_leaves() {
        let addr = Address::repeat_byte(0xAB);
        assert_eq!(
            encode_value(&AbiType::Address, &AbiValue::Address(addr)).unwrap(),
            json!("0xabababababababababababababababababababab")
        );
        assert_eq!(
            encode_value(&AbiType::Int(8), &AbiValue::Int(I256::try_from(-128i64).unwrap()))
                .unwrap(),
            json!("-128")
        );
        assert_eq!(
            encode_value(&AbiType::Uint(8), &AbiValue::Uint(U256::from(255u64))).unwrap(),
            json!("255")
        );
        assert_eq!(
            encode_value(&AbiType::FixedBytes(2), &AbiValue::FixedBytes(vec![0xDE, 0xAD]))
                .unwrap(),
            json!("0xdead")
        );
        assert_eq!(
            encode_value(&AbiType::Bytes, &AbiValue::Bytes(vec![])).unwrap(),
            json!("0x")
        );
        assert_eq!(
            encode_value(&AbiType::Bool, &AbiValue::Bool(true)).unwrap(),
            json!(true)
        );
    }

    #[test]
    fn test_encode_rejects_shape_mismatch() {
        let err = encode_value(&AbiType::Uint(8), &AbiValue::Uint(U256::from(256u64))).unwrap_err();
        assert_eq!(err.path, "value");
        assert!(encode_value(&AbiType::Address, &AbiValue::Bool(false)).is_err());
    }

    #[test]
    fn test_encode_node_reports_mismatch_path() {
        let value = AbiValue::Tuple(vec![
            ("owner".into(), AbiValue::Bool(true)),
            ("amount".into(), AbiValue::Uint(U256::from(7u64))),
            ("delta".into(), AbiValue::Int(I256::MINUS_ONE)),
        ]);
        let err = encode_node(&position(), &value, ROOT).unwrap_err();
        assert_eq!(err.path, "value.owner");
        assert_eq!(err.found, "bool");

        let short = AbiValue::Tuple(vec![("owner".into(), AbiValue::Address(Address::ZERO))]);
        let err = encode_node(&position(), &short, ROOT).unwrap_err();
        assert_eq!(err.path, "value");
        assert_eq!(err.found, "tuple of 1 fields");

        let slice = AbiType::slice(AbiType::Bool);
        let items = AbiValue::Slice(vec![AbiValue::Bool(true), AbiValue::String("no".into())]);
        let err = encode_node(&slice, &items, ROOT).unwrap_err();
        assert_eq!(err.path, "value[1]");
        assert_eq!(err.found, "string");
    }

    #[test]
    fn test_named_tuple_encodes_as_object() {
        let value = AbiValue::Tuple(vec![
            ("owner".into(), AbiValue::Address(Address::ZERO)),
            ("amount".into(), AbiValue::Uint(U256::from(7u64))),
            ("delta".into(), AbiValue::Int(I256::MINUS_ONE)),
        ]);
        let ir = encode_value(&position(), &value).unwrap();
        assert_eq!(
            ir,
            json!({
                "owner": "0x0000000000000000000000000000000000000000",
                "amount": "7",
                "delta": "-1",
            })
        );
        assert_eq!(decode_value(&position(), &ir).unwrap(), value);
    }

    #[test]
    fn test_unnamed_or_repeated_tuple_encodes_as_array() {
        let unnamed = AbiType::tuple([
            AbiParam::new("", AbiType::Bool),
            AbiParam::new("", AbiType::String),
        ]);
        let value = AbiValue::Tuple(vec![
            (String::new(), AbiValue::Bool(false)),
            (String::new(), AbiValue::String("hi".into())),
        ]);
        assert_eq!(encode_value(&unnamed, &value).unwrap(), json!([false, "hi"]));

        let repeated = AbiType::tuple([
            AbiParam::new("x", AbiType::Bool),
            AbiParam::new("x", AbiType::Bool),
        ]);
        let value = AbiValue::Tuple(vec![
            ("x".into(), AbiValue::Bool(true)),
            ("x".into(), AbiValue::Bool(false)),
        ]);
        let ir = encode_value(&repeated, &value).unwrap();
        assert_eq!(ir, json!([true, false]));
        assert_eq!(decode_value(&repeated, &ir).unwrap(), value);
    }

    #[test]
    fn test_named_tuple_decodes_from_array() {
        let ir = json!(["0x0000000000000000000000000000000000000001", "5", "-3"]);
        let AbiValue::Tuple(items) = decode_value(&position(), &ir).unwrap() else {
            panic!("expected tuple");
        };
        assert_eq!(items[0].0, "owner");
        assert_eq!(items[2].1, AbiValue::Int(I256::try_from(-3i64).unwrap()));
    }

    #[test]
    fn test_missing_field_reported() {
        let ir = json!({
            "owner": "0x0000000000000000000000000000000000000001",
            "amount": "5",
            "delta_typo": "1",
        });
        let err = decode_value(&position(), &ir).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField {
                path: "value".into(),
                field: "delta".into(),
            }
        );
    }

    #[test]
    fn test_hex_errors() {
        let err = decode_value(&AbiType::Bytes, &json!("0xabc")).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedHex { .. }));

        let err = decode_value(&AbiType::Bytes, &json!("abcd")).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedHex { .. }));

        let err = decode_value(&AbiType::Bytes, &json!("0xzz")).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedHex { .. }));

        let nineteen = format!("0x{}", "11".repeat(19));
        let err = decode_value(&AbiType::Address, &json!(nineteen)).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::LengthMismatch {
                expected: 20,
                found: 19,
                ..
            }
        ));
        let err = decode_value(&AbiType::FixedBytes(20), &json!(nineteen)).unwrap_err();
        assert!(matches!(err, DecodeError::LengthMismatch { .. }));
    }

    #[test]
    fn test_integer_range_errors() {
        let err = decode_value(&AbiType::Uint(8), &json!("256")).unwrap_err();
        assert!(matches!(err, DecodeError::IntegerOutOfRange { .. }));
        let err = decode_value(&AbiType::Int(8), &json!("-129")).unwrap_err();
        assert!(matches!(err, DecodeError::IntegerOutOfRange { .. }));
        let err = decode_value(&AbiType::Int(8), &json!("128")).unwrap_err();
        assert!(matches!(err, DecodeError::IntegerOutOfRange { .. }));
        let err = decode_value(&AbiType::Uint(8), &json!("-1")).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedInteger { .. }));
        let err = decode_value(&AbiType::Uint(256), &json!("1".repeat(80))).unwrap_err();
        assert!(matches!(err, DecodeError::IntegerOutOfRange { .. }));
        let err = decode_value(&AbiType::Uint(16), &json!("0x10")).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedInteger { .. }));
        let err = decode_value(&AbiType::Uint(16), &json!(1.5)).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedInteger { .. }));
    }

    #[test]
    fn test_integer_extremes_decode() {
        assert_eq!(
            decode_value(&AbiType::Int(8), &json!("-128")).unwrap(),
            AbiValue::Int(I256::try_from(-128i64).unwrap())
        );
        assert_eq!(
            decode_value(&AbiType::Int(8), &json!(127)).unwrap(),
            AbiValue::Int(I256::try_from(127i64).unwrap())
        );
        let min = "-57896044618658097711785492504343953926634992332820282019728792003956564819968";
        assert_eq!(
            decode_value(&AbiType::Int(256), &json!(min)).unwrap(),
            AbiValue::Int(I256::MIN)
        );
        let max = U256::MAX.to_string();
        assert_eq!(
            decode_value(&AbiType::Uint(256), &json!(max)).unwrap(),
            AbiValue::Uint(U256::MAX)
        );
    }

    #[test]
    fn test_bool_spellings() {
        assert_eq!(decode_value(&AbiType::Bool, &json!("true")).unwrap(), AbiValue::Bool(true));
        assert_eq!(decode_value(&AbiType::Bool, &json!(false)).unwrap(), AbiValue::Bool(false));
        assert!(decode_value(&AbiType::Bool, &json!(1)).is_err());
    }

    #[test]
    fn test_array_arity_and_paths() {
        let ty = AbiType::array(AbiType::Uint(8), 2);
        let err = decode_value(&ty, &json!(["1"])).unwrap_err();
        assert!(matches!(err, DecodeError::ArityMismatch { expected: 2, found: 1, .. }));

        let ty = AbiType::slice(position());
        let ir = json!([{ "owner": "0x00", "amount": "1", "delta": "1" }]);
        let err = decode_value(&ty, &ir).unwrap_err();
        assert_eq!(err.path(), "value[0].owner");
    }

    #[test]
    fn test_unsupported_width_rejected() {
        let err = decode_value(&AbiType::Uint(7), &json!("1")).unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedType { .. }));
        let err = decode_value(&AbiType::FixedBytes(33), &json!("0x00")).unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedType { .. }));
    }

    #[test]
    fn test_round_trip_generated_values() {
        let mut gen = RandomGenerator::with_seed(GeneratorConfig::default(), 77).unwrap();
        let types = [
            position(),
            AbiType::slice(AbiType::FixedBytes(32)),
            AbiType::array(AbiType::String, 3),
            AbiType::slice(AbiType::slice(AbiType::Int(256))),
        ];
        for ty in &types {
            for _ in 0..25 {
                let value = generate_value(&mut gen, ty);
                let ir = encode_value(ty, &value).unwrap();
                assert_eq!(decode_value(ty, &ir).unwrap(), value);
            }
        }
    }

    #[test]
    fn test_arguments_round_trip() {
        let params = vec![
            AbiParam::new("to", AbiType::Address),
            AbiParam::new("amount", AbiType::Uint(256)),
        ];
        let values = vec![
            AbiValue::Address(Address::repeat_byte(1)),
            AbiValue::Uint(U256::from(10u64)),
        ];
        let ir = encode_arguments(&params, &values).unwrap();
        assert!(ir.is_object());
        assert_eq!(decode_arguments(&params, &ir).unwrap(), values);

        let positional = json!(["0x0101010101010101010101010101010101010101", "10"]);
        assert_eq!(decode_arguments(&params, &positional).unwrap(), values);

        assert!(encode_arguments(&params, &values[..1]).is_err());
        let err = decode_arguments(&params, &json!(["0x00"])).unwrap_err();
        assert_eq!(err.path(), "args");
    }
}
