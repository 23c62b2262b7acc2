//! Fixed-width integer helpers over 256-bit words.
//!
//! ABI integers of width `bits` are stored as [`U256`] / [`I256`]. Signed
//! values are manipulated through their raw two's-complement word, masked to
//! the declared width and sign-extended back.

use alloy_primitives::{I256, U256};

use abi_fuzz_types::MAX_INT_BITS;

/// Clamp a declared width into `1..=256` so malformed descriptors cannot
/// trigger shift overflow.
pub(crate) fn clamp_bits(bits: usize) -> usize {
    bits.clamp(1, MAX_INT_BITS)
}

/// All-ones mask covering the low `bits` bits.
pub(crate) fn width_mask(bits: usize) -> U256 {
    let bits = clamp_bits(bits);
    if bits >= MAX_INT_BITS {
        U256::MAX
    } else {
        (U256::from(1u8) << bits) - U256::from(1u8)
    }
}

/// Interpret the low `bits` bits of `raw` as a signed integer.
pub(crate) fn sign_extend(raw: U256, bits: usize) -> I256 {
    let bits = clamp_bits(bits);
    let mask = width_mask(bits);
    let low = raw & mask;
    if bits < MAX_INT_BITS && low.bit(bits - 1) {
        I256::from_raw(low | !mask)
    } else {
        I256::from_raw(low)
    }
}

/// The low `bits` bits of a signed value's two's-complement form.
pub(crate) fn truncate_signed(value: I256, bits: usize) -> U256 {
    value.into_raw() & width_mask(bits)
}

pub(crate) fn fits_uint(value: U256, bits: usize) -> bool {
    value <= width_mask(bits)
}

pub(crate) fn fits_int(value: I256, bits: usize) -> bool {
    sign_extend(truncate_signed(value, bits), bits) == value
}

/// Magnitude limit for a signed width: `2^(bits-1)`.
///
/// Non-negative values must stay strictly below it; negative magnitudes may
/// reach it.
pub(crate) fn signed_magnitude_limit(bits: usize) -> U256 {
    U256::from(1u8) << (clamp_bits(bits) - 1)
}

/// Render a signed value in base 10 (`-128`, `0`, `42`).
pub(crate) fn format_signed(value: I256) -> String {
    if value.is_negative() {
        let magnitude = value.into_raw().wrapping_neg();
        format!("-{magnitude}")
    } else {
        value.into_raw().to_string()
    }
}
