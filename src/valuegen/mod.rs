//! Type-directed value generation and mutation for ABI call arguments.
//!
//! Produces fresh argument values for a function signature, evolves existing
//! ones in small shape-preserving steps, and converts both to and from a
//! JSON representation that round-trips exactly.
//!
//! # Architecture
//!
//! - [`generator`]: The [`ValueGenerator`] capability and its purely random
//!   implementation
//! - [`mutating`]: Corpus-backed generator that reuses previously seen leaves
//! - [`value_set`]: The corpus, keyed by leaf type
//! - [`generate`]: Recursive construction of a value from a descriptor
//! - [`mutate`]: Multi-round, per-node mutation of an existing value
//! - [`codec`]: JSON encode/decode with canonical integer and hex forms
//! - [`config`]: Length bounds, reuse biases, and mutation thresholds
//!
//! Nothing here is thread-safe by itself; give each worker its own generator
//! and merge corpora with [`ValueSet::merge`].

pub mod codec;
pub mod config;
pub mod error;
pub mod generate;
pub mod generator;
pub mod mutate;
pub mod mutating;
pub mod value;
pub mod value_set;

mod word;

pub use codec::{decode_arguments, decode_value, encode_arguments, encode_value};
pub use config::{GeneratorConfig, LengthBounds, MutationConfig, NodeAction};
pub use error::{ConfigError, DecodeError, ShapeMismatchError};
pub use generate::generate_value;
pub use generator::{RandomGenerator, ValueGenerator};
pub use mutate::mutate_value;
pub use mutating::MutatingGenerator;
pub use value::{format_call, AbiValue};
pub use value_set::{TypeKey, ValueSet};
