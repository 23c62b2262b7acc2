//! ABI value engine for smart-contract fuzzing
//!
//! Generates, mutates, and serializes argument values for contract calls
//! given their ABI type descriptors:
//!
//! - **Generation**: random or corpus-biased values of any ABI type
//! - **Mutation**: small, shape-preserving edits that feed a reusable corpus
//! - **Codec**: exact JSON round trip for persisting call sequences
//!
//! See [`valuegen`] for the engine and [`abi_fuzz_types`] for the descriptor
//! model.

pub mod valuegen;

pub use abi_fuzz_types::{AbiParam, AbiType};
pub use valuegen::{
    decode_arguments, decode_value, encode_arguments, encode_value, format_call, generate_value,
    mutate_value, AbiValue, ConfigError, DecodeError, GeneratorConfig, LengthBounds,
    MutatingGenerator, MutationConfig, RandomGenerator, ShapeMismatchError, TypeKey,
    ValueGenerator, ValueSet,
};
