//! Deduplicated corpus of previously observed leaf values.
//!
//! Entries are grouped by [`TypeKey`], which captures the kind and size
//! parameters of a leaf type, so `uint8` and `uint16` values never share a
//! bucket. The set only grows; capping or eviction is left to the caller.

use std::collections::{HashMap, HashSet};
use std::fmt;

use rand::Rng;

use abi_fuzz_types::AbiType;

use super::value::AbiValue;
use super::word::{fits_int, fits_uint};

/// Identity of a corpus-relevant leaf type.
///
/// Booleans carry no interesting state and are not tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeKey {
    Address,
    String,
    Bytes,
    FixedBytes(usize),
    Int(usize),
    Uint(usize),
}

impl TypeKey {
    /// Key for a leaf descriptor, or `None` for containers and booleans.
    pub fn of(ty: &AbiType) -> Option<TypeKey> {
        match ty {
            AbiType::Address => Some(TypeKey::Address),
            AbiType::String => Some(TypeKey::String),
            AbiType::Bytes => Some(TypeKey::Bytes),
            AbiType::FixedBytes(size) => Some(TypeKey::FixedBytes(*size)),
            AbiType::Int(bits) => Some(TypeKey::Int(*bits)),
            AbiType::Uint(bits) => Some(TypeKey::Uint(*bits)),
            AbiType::Bool | AbiType::Array(..) | AbiType::Slice(_) | AbiType::Tuple(_) => None,
        }
    }

    /// Whether `value` is a well-formed leaf of this key's type.
    pub fn admits(&self, value: &AbiValue) -> bool {
        match self {
            TypeKey::Address => matches!(value, AbiValue::Address(_)),
            TypeKey::String => matches!(value, AbiValue::String(_)),
            TypeKey::Bytes => matches!(value, AbiValue::Bytes(_)),
            TypeKey::FixedBytes(size) => {
                matches!(value, AbiValue::FixedBytes(bytes) if bytes.len() == *size)
            }
            TypeKey::Int(bits) => matches!(value, AbiValue::Int(v) if fits_int(*v, *bits)),
            TypeKey::Uint(bits) => matches!(value, AbiValue::Uint(v) if fits_uint(*v, *bits)),
        }
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKey::Address => write!(f, "address"),
            TypeKey::String => write!(f, "string"),
            TypeKey::Bytes => write!(f, "bytes"),
            TypeKey::FixedBytes(size) => write!(f, "bytes{size}"),
            TypeKey::Int(bits) => write!(f, "int{bits}"),
            TypeKey::Uint(bits) => write!(f, "uint{bits}"),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Bucket {
    /// Insertion order, so sampling by index is reproducible.
    values: Vec<AbiValue>,
    seen: HashSet<AbiValue>,
}

/// Corpus of leaf values keyed by [`TypeKey`].
///
/// Not synchronized: share across workers only behind a caller-held lock.
#[derive(Debug, Clone, Default)]
pub struct ValueSet {
    buckets: HashMap<TypeKey, Bucket>,
}

impl ValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under `key` unless a structurally equal entry exists.
    ///
    /// Values the key does not admit (wrong kind, wrong fixed size, or out of
    /// range for the width) are refused. Returns whether the value was newly
    /// inserted.
    pub fn add(&mut self, key: TypeKey, value: AbiValue) -> bool {
        if !key.admits(&value) {
            return false;
        }
        let bucket = self.buckets.entry(key).or_default();
        if bucket.seen.contains(&value) {
            return false;
        }
        bucket.seen.insert(value.clone());
        bucket.values.push(value);
        true
    }

    /// A uniformly chosen entry for `key`, or `None` when the key has no entries.
    pub fn sample<R: Rng + ?Sized>(&self, key: &TypeKey, rng: &mut R) -> Option<&AbiValue> {
        let values = &self.buckets.get(key)?.values;
        if values.is_empty() {
            return None;
        }
        values.get(rng.gen_range(0..values.len()))
    }

    /// Add every corpus-relevant leaf of `value`, walking it alongside `ty`.
    ///
    /// Nodes whose shape disagrees with `ty` are skipped. Returns the number
    /// of newly inserted entries.
    pub fn add_value(&mut self, ty: &AbiType, value: &AbiValue) -> usize {
        match (ty, value) {
            (AbiType::Array(elem, _), AbiValue::Array(items))
            | (AbiType::Slice(elem), AbiValue::Slice(items)) => {
                items.iter().map(|item| self.add_value(elem, item)).sum()
            }
            (AbiType::Tuple(fields), AbiValue::Tuple(items)) => fields
                .iter()
                .zip(items)
                .map(|(field, (_, item))| self.add_value(&field.ty, item))
                .sum(),
            _ => TypeKey::of(ty).map_or(0, |key| usize::from(self.add(key, value.clone()))),
        }
    }

    /// Fold another corpus into this one, keeping the first-seen order.
    pub fn merge(&mut self, other: &ValueSet) {
        let mut keys: Vec<&TypeKey> = other.buckets.keys().collect();
        keys.sort();
        for key in keys {
            for value in other.values(key) {
                self.add(*key, value.clone());
            }
        }
    }

    /// Entries stored under `key`, in insertion order.
    pub fn values(&self, key: &TypeKey) -> &[AbiValue] {
        self.buckets
            .get(key)
            .map(|b| b.values.as_slice())
            .unwrap_or(&[])
    }

    /// Keys with at least one entry, sorted.
    pub fn keys(&self) -> Vec<TypeKey> {
        let mut keys: Vec<TypeKey> = self
            .buckets
            .iter()
            .filter(|(_, b)| !b.values.is_empty())
            .map(|(k, _)| *k)
            .collect();
        keys.sort();
        keys
    }

    pub fn len_for(&self, key: &TypeKey) -> usize {
        self.values(key).len()
    }

    /// Total number of entries across all keys.
    pub fn len(&self) -> usize {
        self.buckets.values().map(|b| b.values.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
