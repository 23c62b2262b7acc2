//! Shape-preserving mutation of existing values.
//!
//! A call runs a random number of rounds; each round walks the tree and picks
//! a [`NodeAction`] per node. Leaves are perturbed rather than replaced, so
//! mutated values stay close to their parents. Every leaf of the final value
//! is fed back into the generator's corpus.

use alloy_primitives::{Address, U256};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, trace};

use abi_fuzz_types::{AbiType, ADDRESS_LEN};

use super::config::{LengthBounds, NodeAction};
use super::error::{field_path, index_path, ShapeMismatchError};
use super::generate::generate_value;
use super::mutating::MutatingGenerator;
use super::value::AbiValue;
use super::value_set::TypeKey;
use super::word::{clamp_bits, sign_extend, truncate_signed, width_mask};

/// Largest additive delta applied to an integer in one step.
const MAX_INT_DELTA: u64 = 16;

/// Most elements, bytes, or characters inserted or removed by one resize.
const MAX_RESIZE_STEP: usize = 8;

/// Longest chunk inserted by a single byte/string splice.
const MAX_SPLICE_LEN: usize = 32;

const ROOT: &str = "value";

/// Mutate `value` into a new value of the same shape.
///
/// Fails only when `value` does not match `ty`, which can happen when the
/// value was decoded from an external corpus. With zero rounds the result
/// equals the input.
pub fn mutate_value(
    gen: &mut MutatingGenerator<'_>,
    ty: &AbiType,
    value: &AbiValue,
) -> Result<AbiValue, ShapeMismatchError> {
    if let Err(err) = value.check_shape(ty) {
        debug!(target: "abi_mutation", %ty, error = %err, "rejecting mutation target");
        return Err(err);
    }

    let rounds = gen.draw_rounds();
    let mut current = value.clone();
    for round in 0..rounds {
        current = mutate_node(gen, ty, current, ROOT)?;
        trace!(target: "abi_mutation", %ty, round, rounds, "mutation round complete");
    }

    let added = gen.corpus_mut().add_value(ty, &current);
    trace!(target: "abi_mutation", %ty, added, "fed mutated leaves back into corpus");
    Ok(current)
}

fn mutate_node(
    gen: &mut MutatingGenerator<'_>,
    ty: &AbiType,
    value: AbiValue,
    path: &str,
) -> Result<AbiValue, ShapeMismatchError> {
    match gen.draw_action(ty.is_dynamic_length()) {
        NodeAction::Keep => Ok(value),
        NodeAction::Regenerate => Ok(generate_value(gen, ty)),
        NodeAction::Resize => resize(gen, ty, value, path),
        NodeAction::Mutate => mutate_in_place(gen, ty, value, path),
    }
}

/// Perturb a leaf, or recurse into each child of a composite.
fn mutate_in_place(
    gen: &mut MutatingGenerator<'_>,
    ty: &AbiType,
    value: AbiValue,
    path: &str,
) -> Result<AbiValue, ShapeMismatchError> {
    let found = value.kind_name();
    let mismatch = || ShapeMismatchError::new(path, ty, found);
    let mutated = match ty {
        AbiType::Bool => {
            let AbiValue::Bool(b) = value else {
                return Err(mismatch());
            };
            AbiValue::Bool(!b)
        }
        AbiType::Address => {
            let AbiValue::Address(addr) = value else {
                return Err(mismatch());
            };
            AbiValue::Address(perturb_address(gen.rng(), addr))
        }
        AbiType::Int(bits) => {
            let AbiValue::Int(v) = value else {
                return Err(mismatch());
            };
            let raw = perturb_word(gen.rng(), truncate_signed(v, *bits), *bits);
            AbiValue::Int(sign_extend(raw, *bits))
        }
        AbiType::Uint(bits) => {
            let AbiValue::Uint(v) = value else {
                return Err(mismatch());
            };
            AbiValue::Uint(perturb_word(gen.rng(), v, *bits))
        }
        AbiType::FixedBytes(_) => {
            let AbiValue::FixedBytes(mut bytes) = value else {
                return Err(mismatch());
            };
            perturb_fixed_bytes(gen.rng(), &mut bytes);
            AbiValue::FixedBytes(bytes)
        }
        AbiType::Bytes => {
            let AbiValue::Bytes(bytes) = value else {
                return Err(mismatch());
            };
            AbiValue::Bytes(perturb_bytes(gen, bytes))
        }
        AbiType::String => {
            let AbiValue::String(s) = value else {
                return Err(mismatch());
            };
            AbiValue::String(perturb_string(gen, s))
        }
        AbiType::Array(elem, _) => {
            let AbiValue::Array(items) = value else {
                return Err(mismatch());
            };
            AbiValue::Array(mutate_elements(gen, elem, items, path)?)
        }
        AbiType::Slice(elem) => {
            let AbiValue::Slice(items) = value else {
                return Err(mismatch());
            };
            AbiValue::Slice(mutate_elements(gen, elem, items, path)?)
        }
        AbiType::Tuple(fields) => {
            let AbiValue::Tuple(items) = value else {
                return Err(mismatch());
            };
            if items.len() != fields.len() {
                let count = items.len();
                return Err(ShapeMismatchError::new(path, ty, format!("tuple of {count} fields")));
            }
            let mutated = fields
                .iter()
                .zip(items)
                .enumerate()
                .map(|(i, (field, (name, item)))| {
                    let item = mutate_node(gen, &field.ty, item, &field_path(path, &field.name, i))?;
                    Ok((name, item))
                })
                .collect::<Result<Vec<_>, ShapeMismatchError>>()?;
            AbiValue::Tuple(mutated)
        }
    };
    Ok(mutated)
}

fn mutate_elements(
    gen: &mut MutatingGenerator<'_>,
    elem: &AbiType,
    items: Vec<AbiValue>,
    path: &str,
) -> Result<Vec<AbiValue>, ShapeMismatchError> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| mutate_node(gen, elem, item, &index_path(path, i)))
        .collect()
}

/// Grow or shrink a dynamic-length container, regenerating inserted elements.
///
/// Fixed-size kinds, and containers already pinned at both bounds, are
/// mutated in place instead.
fn resize(
    gen: &mut MutatingGenerator<'_>,
    ty: &AbiType,
    value: AbiValue,
    path: &str,
) -> Result<AbiValue, ShapeMismatchError> {
    let bounds = gen.config().generator.clone();
    let found = value.kind_name();
    let resized = match ty {
        AbiType::Slice(elem) => {
            let AbiValue::Slice(mut items) = value else {
                return Err(ShapeMismatchError::new(path, ty, found));
            };
            match pick_resize(gen.rng(), items.len(), bounds.array_len) {
                Some(Resize::Grow { at, count }) => {
                    let fresh: Vec<AbiValue> =
                        (0..count).map(|_| generate_value(gen, elem)).collect();
                    items.splice(at..at, fresh);
                }
                Some(Resize::Shrink { at, count }) => {
                    items.drain(at..at + count);
                }
                None => return mutate_in_place(gen, ty, AbiValue::Slice(items), path),
            }
            AbiValue::Slice(items)
        }
        AbiType::Bytes => {
            let AbiValue::Bytes(mut bytes) = value else {
                return Err(ShapeMismatchError::new(path, ty, found));
            };
            match pick_resize(gen.rng(), bytes.len(), bounds.bytes_len) {
                Some(Resize::Grow { at, count }) => {
                    let fresh = gen.random().random_bytes(count);
                    bytes.splice(at..at, fresh);
                }
                Some(Resize::Shrink { at, count }) => {
                    bytes.drain(at..at + count);
                }
                None => return Ok(AbiValue::Bytes(perturb_bytes(gen, bytes))),
            }
            AbiValue::Bytes(bytes)
        }
        AbiType::String => {
            let AbiValue::String(s) = value else {
                return Err(ShapeMismatchError::new(path, ty, found));
            };
            let mut chars: Vec<char> = s.chars().collect();
            match pick_resize(gen.rng(), chars.len(), bounds.string_len) {
                Some(Resize::Grow { at, count }) => {
                    let fresh: Vec<char> = (0..count).map(|_| gen.random().random_char()).collect();
                    chars.splice(at..at, fresh);
                }
                Some(Resize::Shrink { at, count }) => {
                    chars.drain(at..at + count);
                }
                None => return Ok(AbiValue::String(perturb_string(gen, s))),
            }
            AbiValue::String(chars.into_iter().collect())
        }
        AbiType::Bool
        | AbiType::Address
        | AbiType::FixedBytes(_)
        | AbiType::Int(_)
        | AbiType::Uint(_)
        | AbiType::Array(..)
        | AbiType::Tuple(_) => return mutate_in_place(gen, ty, value, path),
    };
    Ok(resized)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resize {
    Grow { at: usize, count: usize },
    Shrink { at: usize, count: usize },
}

/// Choose a grow or shrink step that keeps `len` within `bounds`, if any exists.
fn pick_resize(rng: &mut StdRng, len: usize, bounds: LengthBounds) -> Option<Resize> {
    let can_grow = len < bounds.max;
    let can_shrink = len > bounds.min;
    let grow = match (can_grow, can_shrink) {
        (true, true) => rng.gen_bool(0.5),
        (true, false) => true,
        (false, true) => false,
        (false, false) => return None,
    };

    if grow {
        let count = rng.gen_range(1..=(bounds.max - len).min(MAX_RESIZE_STEP));
        let at = rng.gen_range(0..=len);
        Some(Resize::Grow { at, count })
    } else {
        let count = rng.gen_range(1..=(len - bounds.min).min(MAX_RESIZE_STEP));
        let at = rng.gen_range(0..=len - count);
        Some(Resize::Shrink { at, count })
    }
}

/// Small additive delta, single-bit flip, or sign flip, wrapped to `bits`.
fn perturb_word(rng: &mut StdRng, raw: U256, bits: usize) -> U256 {
    let bits = clamp_bits(bits);
    let mutated = match rng.gen_range(0..4) {
        0 => raw.wrapping_add(U256::from(rng.gen_range(1..=MAX_INT_DELTA))),
        1 => raw.wrapping_sub(U256::from(rng.gen_range(1..=MAX_INT_DELTA))),
        2 => raw ^ (U256::from(1u8) << rng.gen_range(0..bits)),
        _ => raw.wrapping_neg(),
    };
    mutated & width_mask(bits)
}

fn perturb_address(rng: &mut StdRng, addr: Address) -> Address {
    let mut bytes: [u8; ADDRESS_LEN] = addr.0 .0;
    if rng.gen_bool(0.5) {
        let bit = rng.gen_range(0..ADDRESS_LEN * 8);
        bytes[bit / 8] ^= 1 << (bit % 8);
    } else {
        let i = rng.gen_range(0..ADDRESS_LEN);
        bytes[i] = rng.gen();
    }
    Address::from(bytes)
}

fn perturb_fixed_bytes(rng: &mut StdRng, bytes: &mut [u8]) {
    if bytes.is_empty() {
        return;
    }
    if rng.gen_bool(0.5) {
        let bit = rng.gen_range(0..bytes.len() * 8);
        bytes[bit / 8] ^= 1 << (bit % 8);
    } else {
        let i = rng.gen_range(0..bytes.len());
        bytes[i] = rng.gen();
    }
}

/// Local edit of a byte or character sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edit {
    /// Replace the element at this index.
    Substitute(usize),
    /// Insert a chunk of at most `room` elements at `at`.
    Splice { at: usize, room: usize },
    /// Cut the sequence down to this length.
    Truncate(usize),
}

fn pick_edit(rng: &mut StdRng, len: usize, bounds: LengthBounds) -> Option<Edit> {
    let mut candidates = Vec::with_capacity(3);
    if len > 0 {
        candidates.push(Edit::Substitute(rng.gen_range(0..len)));
    }
    if len < bounds.max {
        let room = (bounds.max - len).min(MAX_SPLICE_LEN);
        candidates.push(Edit::Splice {
            at: rng.gen_range(0..=len),
            room,
        });
    }
    if len > bounds.min {
        candidates.push(Edit::Truncate(rng.gen_range(bounds.min..len)));
    }
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.gen_range(0..candidates.len())])
}

/// Uniform sub-slice of `src` holding between 1 and `room` elements.
fn donor_chunk<T: Clone>(rng: &mut StdRng, src: &[T], room: usize) -> Vec<T> {
    let start = rng.gen_range(0..src.len());
    let take = rng.gen_range(1..=(src.len() - start).min(room));
    src[start..start + take].to_vec()
}

fn perturb_bytes(gen: &mut MutatingGenerator<'_>, mut bytes: Vec<u8>) -> Vec<u8> {
    let bounds = gen.config().generator.bytes_len;
    match pick_edit(gen.rng(), bytes.len(), bounds) {
        Some(Edit::Substitute(i)) => bytes[i] = gen.rng().gen(),
        Some(Edit::Splice { at, room }) => {
            let bias = gen.config().bytes_bias;
            let donor = if gen.rng().gen_bool(bias) {
                match gen.sample(TypeKey::Bytes) {
                    Some(AbiValue::Bytes(src)) if !src.is_empty() => Some(src),
                    _ => None,
                }
            } else {
                None
            };
            let chunk = match donor {
                Some(src) => donor_chunk(gen.rng(), &src, room),
                None => {
                    let len = gen.rng().gen_range(1..=room);
                    gen.random().random_bytes(len)
                }
            };
            bytes.splice(at..at, chunk);
        }
        Some(Edit::Truncate(len)) => bytes.truncate(len),
        None => {}
    }
    bytes
}

fn perturb_string(gen: &mut MutatingGenerator<'_>, s: String) -> String {
    let bounds = gen.config().generator.string_len;
    let mut chars: Vec<char> = s.chars().collect();
    match pick_edit(gen.rng(), chars.len(), bounds) {
        Some(Edit::Substitute(i)) => chars[i] = gen.random().random_char(),
        Some(Edit::Splice { at, room }) => {
            let bias = gen.config().string_bias;
            let donor = if gen.rng().gen_bool(bias) {
                match gen.sample(TypeKey::String) {
                    Some(AbiValue::String(src)) if !src.is_empty() => {
                        Some(src.chars().collect::<Vec<char>>())
                    }
                    _ => None,
                }
            } else {
                None
            };
            let chunk = match donor {
                Some(src) => donor_chunk(gen.rng(), &src, room),
                None => {
                    let len = gen.rng().gen_range(1..=room);
                    (0..len).map(|_| gen.random().random_char()).collect()
                }
            };
            chars.splice(at..at, chunk);
        }
        Some(Edit::Truncate(len)) => chars.truncate(len),
        None => {}
    }
    chars.into_iter().collect()
}
