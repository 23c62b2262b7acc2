//! Corpus-backed generator that mixes fresh values with reuse of seen ones.

use alloy_primitives::{Address, I256, U256};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use super::config::{MutationConfig, NodeAction};
use super::error::ConfigError;
use super::generator::{RandomGenerator, ValueGenerator};
use super::value::AbiValue;
use super::value_set::{TypeKey, ValueSet};
use super::word::{fits_int, fits_uint};

/// Generator that, per leaf, reuses a corpus entry with the kind's bias
/// probability and otherwise delegates to a [`RandomGenerator`].
///
/// Also carries the PRNG and thresholds that drive
/// [`mutate_value`](super::mutate_value).
pub struct MutatingGenerator<'a> {
    random: RandomGenerator,
    corpus: &'a mut ValueSet,
    config: MutationConfig,
}

impl<'a> MutatingGenerator<'a> {
    pub fn new(
        config: MutationConfig,
        corpus: &'a mut ValueSet,
        rng: StdRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let random = RandomGenerator::new(config.generator.clone(), rng)?;
        Ok(Self {
            random,
            corpus,
            config,
        })
    }

    pub fn with_seed(
        config: MutationConfig,
        corpus: &'a mut ValueSet,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::new(config, corpus, StdRng::seed_from_u64(seed))
    }

    pub fn config(&self) -> &MutationConfig {
        &self.config
    }

    pub fn corpus(&self) -> &ValueSet {
        &*self.corpus
    }

    pub fn corpus_mut(&mut self) -> &mut ValueSet {
        &mut *self.corpus
    }

    pub(crate) fn random(&mut self) -> &mut RandomGenerator {
        &mut self.random
    }

    pub(crate) fn rng(&mut self) -> &mut StdRng {
        self.random.rng_mut()
    }

    /// Number of rounds for one mutation call, uniform in `[min_rounds, max_rounds]`.
    pub(crate) fn draw_rounds(&mut self) -> usize {
        let (min, max) = (self.config.min_rounds, self.config.max_rounds);
        self.random.rng_mut().gen_range(min..=max)
    }

    pub(crate) fn draw_action(&mut self, resizable: bool) -> NodeAction {
        let roll: f64 = self.random.rng_mut().gen();
        self.config.action_for(roll, resizable)
    }

    /// A uniformly chosen corpus entry for `key`, if any.
    pub(crate) fn sample(&mut self, key: TypeKey) -> Option<AbiValue> {
        self.corpus.sample(&key, self.random.rng_mut()).cloned()
    }

    /// Weighted coin flip: reuse a corpus entry for `key` with probability `bias`.
    fn reuse(&mut self, key: TypeKey, bias: f64) -> Option<AbiValue> {
        if !self.random.rng_mut().gen_bool(bias) {
            return None;
        }
        let reused = self.sample(key);
        if reused.is_none() {
            trace!(target: "abi_mutation", %key, "corpus empty, falling back to random");
        }
        reused
    }
}

impl ValueGenerator for MutatingGenerator<'_> {
    fn generate_bool(&mut self) -> bool {
        self.random.generate_bool()
    }

    fn generate_address(&mut self) -> Address {
        match self.reuse(TypeKey::Address, self.config.address_bias) {
            Some(AbiValue::Address(addr)) => addr,
            _ => self.random.generate_address(),
        }
    }

    fn generate_string(&mut self) -> String {
        let bounds = self.config.generator.string_len;
        match self.reuse(TypeKey::String, self.config.string_bias) {
            Some(AbiValue::String(s)) if bounds.contains(s.chars().count()) => s,
            _ => self.random.generate_string(),
        }
    }

    fn generate_bytes(&mut self) -> Vec<u8> {
        let bounds = self.config.generator.bytes_len;
        match self.reuse(TypeKey::Bytes, self.config.bytes_bias) {
            Some(AbiValue::Bytes(b)) if bounds.contains(b.len()) => b,
            _ => self.random.generate_bytes(),
        }
    }

    fn generate_fixed_bytes(&mut self, size: usize) -> Vec<u8> {
        match self.reuse(TypeKey::FixedBytes(size), self.config.bytes_bias) {
            Some(AbiValue::FixedBytes(b)) if b.len() == size => b,
            _ => self.random.generate_fixed_bytes(size),
        }
    }

    fn generate_int(&mut self, bits: usize) -> I256 {
        match self.reuse(TypeKey::Int(bits), self.config.integer_bias) {
            Some(AbiValue::Int(v)) if fits_int(v, bits) => v,
            _ => self.random.generate_int(bits),
        }
    }

    fn generate_uint(&mut self, bits: usize) -> U256 {
        match self.reuse(TypeKey::Uint(bits), self.config.integer_bias) {
            Some(AbiValue::Uint(v)) if fits_uint(v, bits) => v,
            _ => self.random.generate_uint(bits),
        }
    }

    fn generate_array_len(&mut self) -> usize {
        self.random.generate_array_len()
    }
}
