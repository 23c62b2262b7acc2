//! Recursive value generation from a type descriptor.

use abi_fuzz_types::AbiType;

use super::generator::ValueGenerator;
use super::value::AbiValue;

/// Build a value of type `ty`, drawing every leaf from `gen`.
///
/// Reproducible for a fixed PRNG stream and corpus state: nothing outside
/// `gen` is consulted.
pub fn generate_value<G: ValueGenerator + ?Sized>(gen: &mut G, ty: &AbiType) -> AbiValue {
    match ty {
        AbiType::Bool => AbiValue::Bool(gen.generate_bool()),
        AbiType::Address => AbiValue::Address(gen.generate_address()),
        AbiType::String => AbiValue::String(gen.generate_string()),
        AbiType::Bytes => AbiValue::Bytes(gen.generate_bytes()),
        AbiType::FixedBytes(size) => AbiValue::FixedBytes(gen.generate_fixed_bytes(*size)),
        AbiType::Int(bits) => AbiValue::Int(gen.generate_int(*bits)),
        AbiType::Uint(bits) => AbiValue::Uint(gen.generate_uint(*bits)),
        AbiType::Array(elem, len) => {
            AbiValue::Array((0..*len).map(|_| generate_value(gen, elem)).collect())
        }
        AbiType::Slice(elem) => {
            let len = gen.generate_array_len();
            AbiValue::Slice((0..len).map(|_| generate_value(gen, elem)).collect())
        }
        AbiType::Tuple(fields) => AbiValue::Tuple(
            fields
                .iter()
                .map(|field| (field.name.clone(), generate_value(gen, &field.ty)))
                .collect(),
        ),
    }
}
