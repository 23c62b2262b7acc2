//! The value generator capability and its pure-random implementation.

use alloy_primitives::{Address, I256, U256};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use abi_fuzz_types::ADDRESS_LEN;

use super::config::{GeneratorConfig, LengthBounds};
use super::error::ConfigError;
use super::word::{sign_extend, width_mask};

/// Leaf-level value source used by [`generate_value`](super::generate_value).
///
/// Lengths of dynamic values are chosen by the generator from its configured
/// bounds.
pub trait ValueGenerator {
    fn generate_bool(&mut self) -> bool;
    fn generate_address(&mut self) -> Address;
    fn generate_string(&mut self) -> String;
    fn generate_bytes(&mut self) -> Vec<u8>;
    fn generate_fixed_bytes(&mut self, size: usize) -> Vec<u8>;
    /// Signed integer uniformly spread over the two's-complement range of `bits`.
    fn generate_int(&mut self, bits: usize) -> I256;
    /// Unsigned integer uniformly spread over `[0, 2^bits)`.
    fn generate_uint(&mut self, bits: usize) -> U256;
    /// Length for a freshly generated slice.
    fn generate_array_len(&mut self) -> usize;
}

/// Generator drawing every value uniformly from its PRNG within configured bounds.
pub struct RandomGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl RandomGenerator {
    pub fn new(config: GeneratorConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    /// Create a generator whose PRNG is seeded for reproducible runs.
    pub fn with_seed(config: GeneratorConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Uniform length within `bounds`.
    pub fn random_len(&mut self, bounds: LengthBounds) -> usize {
        self.rng.gen_range(bounds.min..=bounds.max)
    }

    pub fn random_bytes(&mut self, len: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; len];
        self.rng.fill(&mut bytes[..]);
        bytes
    }

    /// `len` printable ASCII characters.
    pub fn random_string(&mut self, len: usize) -> String {
        (0..len).map(|_| self.random_char()).collect()
    }

    pub fn random_char(&mut self) -> char {
        self.rng.gen_range(0x20u8..=0x7E) as char
    }

    fn random_word(&mut self) -> U256 {
        let mut bytes = [0u8; 32];
        self.rng.fill(&mut bytes[..]);
        U256::from_be_bytes(bytes)
    }
}

impl ValueGenerator for RandomGenerator {
    fn generate_bool(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    fn generate_address(&mut self) -> Address {
        let mut bytes = [0u8; ADDRESS_LEN];
        self.rng.fill(&mut bytes[..]);
        Address::from(bytes)
    }

    fn generate_string(&mut self) -> String {
        let len = self.random_len(self.config.string_len);
        self.random_string(len)
    }

    fn generate_bytes(&mut self) -> Vec<u8> {
        let len = self.random_len(self.config.bytes_len);
        self.random_bytes(len)
    }

    fn generate_fixed_bytes(&mut self, size: usize) -> Vec<u8> {
        self.random_bytes(size)
    }

    fn generate_int(&mut self, bits: usize) -> I256 {
        let raw = self.random_word();
        sign_extend(raw, bits)
    }

    fn generate_uint(&mut self, bits: usize) -> U256 {
        self.random_word() & width_mask(bits)
    }

    fn generate_array_len(&mut self) -> usize {
        self.random_len(self.config.array_len)
    }
}
