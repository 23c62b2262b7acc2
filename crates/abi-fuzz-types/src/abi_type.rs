//! ABI type descriptors.
//!
//! An [`AbiType`] is an immutable tree. Container nodes hold their element
//! descriptors behind [`Arc`] so a single element node can be shared by many
//! parents without copying.

use std::fmt;
use std::sync::Arc;

use crate::{MAX_FIXED_BYTES, MAX_INT_BITS};

/// One node of an ABI type tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AbiType {
    Bool,
    Address,
    /// UTF-8 string of dynamic length.
    String,
    /// Byte sequence of dynamic length.
    Bytes,
    /// Byte sequence of the given fixed size (`bytes1`..`bytes32`).
    FixedBytes(usize),
    /// Two's-complement signed integer of the given bit width.
    Int(usize),
    /// Unsigned integer of the given bit width.
    Uint(usize),
    /// Fixed-length array: element type and exact length.
    Array(Arc<AbiType>, usize),
    /// Dynamic-length array of the element type.
    Slice(Arc<AbiType>),
    /// Ordered, named components.
    Tuple(Vec<AbiParam>),
}

/// A named component of a tuple, or a named function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AbiParam {
    pub name: String,
    pub ty: Arc<AbiType>,
}

impl AbiParam {
    pub fn new(name: impl Into<String>, ty: impl Into<Arc<AbiType>>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

impl AbiType {
    /// `T[len]`
    pub fn array(elem: impl Into<Arc<AbiType>>, len: usize) -> Self {
        AbiType::Array(elem.into(), len)
    }

    /// `T[]`
    pub fn slice(elem: impl Into<Arc<AbiType>>) -> Self {
        AbiType::Slice(elem.into())
    }

    /// Tuple with the given components, in order.
    pub fn tuple(fields: impl IntoIterator<Item = AbiParam>) -> Self {
        AbiType::Tuple(fields.into_iter().collect())
    }

    /// Whether this is a non-composite kind (bool, address, integer, bytes, string).
    pub fn is_leaf(&self) -> bool {
        !matches!(
            self,
            AbiType::Array(..) | AbiType::Slice(_) | AbiType::Tuple(_)
        )
    }

    /// Whether values of this type can grow or shrink (slice, dynamic bytes, string).
    pub fn is_dynamic_length(&self) -> bool {
        matches!(self, AbiType::Slice(_) | AbiType::Bytes | AbiType::String)
    }

    /// Whether the size parameters of this node are ones the ABI allows.
    ///
    /// Integer widths must be a multiple of 8 in `8..=256` and fixed byte
    /// sizes must lie in `1..=32`. Children are not inspected.
    pub fn has_valid_size(&self) -> bool {
        match self {
            AbiType::Int(bits) | AbiType::Uint(bits) => {
                *bits >= 8 && *bits <= MAX_INT_BITS && bits % 8 == 0
            }
            AbiType::FixedBytes(size) => *size >= 1 && *size <= MAX_FIXED_BYTES,
            _ => true,
        }
    }

    /// Validate the size parameters of every node in the tree.
    pub fn is_well_formed(&self) -> bool {
        if !self.has_valid_size() {
            return false;
        }
        match self {
            AbiType::Array(elem, _) | AbiType::Slice(elem) => elem.is_well_formed(),
            AbiType::Tuple(fields) => fields.iter().all(|f| f.ty.is_well_formed()),
            _ => true,
        }
    }
}

impl fmt::Display for AbiType {
    /// Canonical signature form, e.g. `uint256`, `bytes32[]`, `(address,bool)[3]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiType::Bool => write!(f, "bool"),
            AbiType::Address => write!(f, "address"),
            AbiType::String => write!(f, "string"),
            AbiType::Bytes => write!(f, "bytes"),
            AbiType::FixedBytes(size) => write!(f, "bytes{size}"),
            AbiType::Int(bits) => write!(f, "int{bits}"),
            AbiType::Uint(bits) => write!(f, "uint{bits}"),
            AbiType::Array(elem, len) => write!(f, "{elem}[{len}]"),
            AbiType::Slice(elem) => write!(f, "{elem}[]"),
            AbiType::Tuple(fields) => {
                write!(f, "(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", field.ty)?;
                }
                write!(f, ")")
            }
        }
    }
}
