//! Shared fixtures for the abi-fuzz integration tests.
//!
//! The cross-module tests live in `tests/`; this crate only provides the
//! descriptor sets they iterate over and a few tree-walking checks.

use abi_fuzz::{AbiValue, GeneratorConfig, LengthBounds};
use abi_fuzz_types::{AbiParam, AbiType, MAX_FIXED_BYTES, MAX_INT_BITS};

/// Every leaf kind at every legal size.
pub fn leaf_types() -> Vec<AbiType> {
    let mut types = vec![
        AbiType::Bool,
        AbiType::Address,
        AbiType::String,
        AbiType::Bytes,
    ];
    types.extend((1..=MAX_FIXED_BYTES).map(AbiType::FixedBytes));
    types.extend((8..=MAX_INT_BITS).step_by(8).map(AbiType::Int));
    types.extend((8..=MAX_INT_BITS).step_by(8).map(AbiType::Uint));
    types
}

/// Leaf kinds used as container elements, one per kind plus width extremes.
pub fn basic_types() -> Vec<AbiType> {
    vec![
        AbiType::Bool,
        AbiType::Address,
        AbiType::String,
        AbiType::Bytes,
        AbiType::FixedBytes(1),
        AbiType::FixedBytes(32),
        AbiType::Int(8),
        AbiType::Int(256),
        AbiType::Uint(8),
        AbiType::Uint(256),
    ]
}

/// A few struct-like tuples, including unnamed and nested ones.
pub fn tuple_types() -> Vec<AbiType> {
    let order = AbiType::tuple([
        AbiParam::new("maker", AbiType::Address),
        AbiParam::new("amount", AbiType::Uint(128)),
        AbiParam::new("price", AbiType::Int(64)),
        AbiParam::new("salt", AbiType::FixedBytes(32)),
    ]);
    let unnamed = AbiType::tuple([
        AbiParam::new("", AbiType::Bool),
        AbiParam::new("", AbiType::Bytes),
    ]);
    let nested = AbiType::tuple([
        AbiParam::new("orders", AbiType::slice(order.clone())),
        AbiParam::new("memo", AbiType::String),
        AbiParam::new("flags", AbiType::array(unnamed.clone(), 2)),
    ]);
    vec![order, unnamed, nested]
}

/// The full representative descriptor set: every leaf, a slice and a
/// five-element array of each basic kind, and the tuple fixtures.
pub fn representative_types() -> Vec<AbiType> {
    let mut types = leaf_types();
    for basic in basic_types() {
        types.push(AbiType::slice(basic.clone()));
        types.push(AbiType::array(basic, 5));
    }
    types.extend(tuple_types());
    types
}

/// Parameter list of a typical token transfer-and-call entry point.
pub fn transfer_params() -> Vec<AbiParam> {
    vec![
        AbiParam::new("to", AbiType::Address),
        AbiParam::new("amount", AbiType::Uint(256)),
        AbiParam::new("data", AbiType::Bytes),
        AbiParam::new("deadline", AbiType::Uint(64)),
    ]
}

/// Whether every dynamic-length node in `value` respects the configured bounds.
pub fn lengths_within(value: &AbiValue, config: &GeneratorConfig) -> bool {
    match value {
        AbiValue::String(s) => config.string_len.contains(s.chars().count()),
        AbiValue::Bytes(b) => config.bytes_len.contains(b.len()),
        AbiValue::Slice(items) => {
            config.array_len.contains(items.len())
                && items.iter().all(|item| lengths_within(item, config))
        }
        AbiValue::Array(items) => items.iter().all(|item| lengths_within(item, config)),
        AbiValue::Tuple(items) => items.iter().all(|(_, item)| lengths_within(item, config)),
        _ => true,
    }
}

/// Generator bounds small enough to keep nested fixtures cheap.
pub fn small_bounds() -> GeneratorConfig {
    GeneratorConfig {
        array_len: LengthBounds::new(1, 4),
        bytes_len: LengthBounds::new(0, 24),
        string_len: LengthBounds::new(0, 24),
    }
}
