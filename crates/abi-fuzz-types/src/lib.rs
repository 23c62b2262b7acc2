//! Shared types for the abi-fuzz workspace.
//!
//! This crate models contract-interface (ABI) type descriptors as consumed by
//! the value engine in `abi-fuzz`. Descriptors are built by whatever ABI
//! metadata component the harness uses; this crate only gives them a shape.
//!
//! ## Descriptor Types
//!
//! - [`AbiType`](abi_type::AbiType) - one node of an ABI type tree
//! - [`AbiParam`](abi_type::AbiParam) - a named tuple component or function parameter
//!
//! The [`env_utils`] module holds the environment-variable helpers used for
//! configuration overrides.

pub mod abi_type;
pub mod env_utils;

pub use abi_type::{AbiParam, AbiType};

/// Size of an address value in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Largest integer width (in bits) an ABI integer type may declare.
pub const MAX_INT_BITS: usize = 256;

/// Largest size (in bytes) of a fixed byte sequence type.
pub const MAX_FIXED_BYTES: usize = 32;
