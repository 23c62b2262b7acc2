//! Runtime ABI values.

use std::fmt;

use alloy_primitives::{Address, I256, U256};

use abi_fuzz_types::{AbiParam, AbiType};

use super::error::{field_path, index_path, ShapeMismatchError};
use super::word::{fits_int, fits_uint, format_signed};

/// A value whose shape mirrors an [`AbiType`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AbiValue {
    Bool(bool),
    Address(Address),
    /// Signed integer, sign-extended to 256 bits.
    Int(I256),
    Uint(U256),
    /// Exactly as many bytes as the descriptor's size.
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    String(String),
    /// Length fixed by the descriptor.
    Array(Vec<AbiValue>),
    Slice(Vec<AbiValue>),
    /// Components in descriptor order, with their names.
    Tuple(Vec<(String, AbiValue)>),
}

impl AbiValue {
    /// Short description of the value's kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            AbiValue::Bool(_) => "bool",
            AbiValue::Address(_) => "address",
            AbiValue::Int(_) => "int",
            AbiValue::Uint(_) => "uint",
            AbiValue::FixedBytes(_) => "fixed bytes",
            AbiValue::Bytes(_) => "bytes",
            AbiValue::String(_) => "string",
            AbiValue::Array(_) => "array",
            AbiValue::Slice(_) => "slice",
            AbiValue::Tuple(_) => "tuple",
        }
    }

    /// Verify that this value's shape matches `ty` at every level.
    ///
    /// Shape covers the kind, fixed byte sizes, fixed array lengths, tuple
    /// arity, and integer range for the declared width.
    pub fn check_shape(&self, ty: &AbiType) -> Result<(), ShapeMismatchError> {
        self.check_shape_at(ty, "value")
    }

    pub(crate) fn check_shape_at(&self, ty: &AbiType, path: &str) -> Result<(), ShapeMismatchError> {
        let mismatch = |found: String| ShapeMismatchError {
            path: path.to_string(),
            expected: ty.to_string(),
            found,
        };

        match (ty, self) {
            (AbiType::Bool, AbiValue::Bool(_))
            | (AbiType::Address, AbiValue::Address(_))
            | (AbiType::String, AbiValue::String(_))
            | (AbiType::Bytes, AbiValue::Bytes(_)) => Ok(()),
            (AbiType::FixedBytes(size), AbiValue::FixedBytes(bytes)) => {
                if bytes.len() == *size {
                    Ok(())
                } else {
                    Err(mismatch(format!("{} bytes", bytes.len())))
                }
            }
            (AbiType::Int(bits), AbiValue::Int(v)) => {
                if fits_int(*v, *bits) {
                    Ok(())
                } else {
                    Err(mismatch(format!("out-of-range int {}", format_signed(*v))))
                }
            }
            (AbiType::Uint(bits), AbiValue::Uint(v)) => {
                if fits_uint(*v, *bits) {
                    Ok(())
                } else {
                    Err(mismatch(format!("out-of-range uint {v}")))
                }
            }
            (AbiType::Array(elem, len), AbiValue::Array(items)) => {
                if items.len() != *len {
                    return Err(mismatch(format!("array of {} elements", items.len())));
                }
                check_elements(elem, items, path)
            }
            (AbiType::Slice(elem), AbiValue::Slice(items)) => check_elements(elem, items, path),
            (AbiType::Tuple(fields), AbiValue::Tuple(items)) => {
                if items.len() != fields.len() {
                    return Err(mismatch(format!("tuple of {} fields", items.len())));
                }
                for (i, (field, (_, item))) in fields.iter().zip(items).enumerate() {
                    item.check_shape_at(&field.ty, &field_path(path, &field.name, i))?;
                }
                Ok(())
            }
            (_, other) => Err(mismatch(other.kind_name().to_string())),
        }
    }
}

fn check_elements(elem: &AbiType, items: &[AbiValue], path: &str) -> Result<(), ShapeMismatchError> {
    for (i, item) in items.iter().enumerate() {
        item.check_shape_at(elem, &index_path(path, i))?;
    }
    Ok(())
}

impl fmt::Display for AbiValue {
    /// Human-readable rendering for logs and reports.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiValue::Bool(b) => write!(f, "{b}"),
            AbiValue::Address(addr) => {
                let digits = hex::encode(addr.as_slice());
                write!(f, "0x{digits}")
            }
            AbiValue::Int(v) => f.write_str(&format_signed(*v)),
            AbiValue::Uint(v) => write!(f, "{v}"),
            AbiValue::FixedBytes(bytes) | AbiValue::Bytes(bytes) => {
                let digits = hex::encode(bytes);
                write!(f, "0x{digits}")
            }
            AbiValue::String(s) => write!(f, "{s:?}"),
            AbiValue::Array(items) | AbiValue::Slice(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            AbiValue::Tuple(items) => {
                write!(f, "{{")?;
                for (i, (name, item)) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    if name.is_empty() {
                        write!(f, "{item}")?;
                    } else {
                        write!(f, "{name}: {item}")?;
                    }
                }
                write!(f, "}}")
            }
        }
    }
}

/// Render a call as `name(arg0, arg1, ...)`.
///
/// Missing values render as `?` so a truncated argument list is still
/// printable.
pub fn format_call(name: &str, params: &[AbiParam], values: &[AbiValue]) -> String {
    let args: Vec<String> = (0..params.len().max(values.len()))
        .map(|i| match values.get(i) {
            Some(v) => v.to_string(),
            None => "?".to_string(),
        })
        .collect();
    let args = args.join(", ");
    format!("{name}({args})")
}
