//! Generator and mutator configuration.
//!
//! All structs deserialize from partial JSON documents (missing fields take
//! their defaults) and must be validated before use; both generator
//! constructors do so and surface [`ConfigError`].

use serde::{Deserialize, Serialize};

use abi_fuzz_types::env_utils::env_override;

use super::error::ConfigError;

/// Inclusive `[min, max]` length range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

impl LengthBounds {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, len: usize) -> bool {
        self.min <= len && len <= self.max
    }

    fn validate(&self, bound: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvalidBounds {
                bound,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Size bounds for randomly generated dynamic values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Length of generated slices.
    pub array_len: LengthBounds,
    /// Length of generated dynamic byte sequences.
    pub bytes_len: LengthBounds,
    /// Length (in characters) of generated strings.
    pub string_len: LengthBounds,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            array_len: LengthBounds::new(0, 100),
            bytes_len: LengthBounds::new(0, 100),
            string_len: LengthBounds::new(0, 100),
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.array_len.validate("array")?;
        self.bytes_len.validate("bytes")?;
        self.string_len.validate("string")?;
        Ok(())
    }
}

/// What a mutation round does at a single node of the value tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeAction {
    /// Leave the subtree untouched.
    Keep,
    /// Perturb a leaf, or recurse into the children of a composite.
    Mutate,
    /// Throw the subtree away and generate a fresh one.
    Regenerate,
    /// Insert or delete elements of a dynamic-length container.
    Resize,
}

/// Configuration of the mutating generator and the mutation rounds it drives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    #[serde(flatten)]
    pub generator: GeneratorConfig,

    /// Probability that an address is drawn from the corpus instead of generated.
    pub address_bias: f64,
    /// Probability that an integer is drawn from the corpus instead of generated.
    pub integer_bias: f64,
    /// Probability that a string is drawn from the corpus instead of generated.
    pub string_bias: f64,
    /// Probability that a byte sequence is drawn from the corpus instead of generated.
    pub bytes_bias: f64,

    /// Fewest mutation rounds applied per call (0 allows an unchanged result).
    pub min_rounds: usize,
    /// Most mutation rounds applied per call.
    pub max_rounds: usize,

    /// Probability that a node is left as is during a round.
    pub keep_probability: f64,
    /// Probability that a node is regenerated from scratch.
    pub regenerate_probability: f64,
    /// Probability that a dynamic-length node is resized. Non-resizable nodes
    /// fold this share into [`NodeAction::Mutate`].
    pub resize_probability: f64,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            address_bias: 0.5,
            integer_bias: 0.5,
            string_bias: 0.5,
            bytes_bias: 0.5,
            min_rounds: 0,
            max_rounds: 1,
            keep_probability: 0.3,
            regenerate_probability: 0.15,
            resize_probability: 0.2,
        }
    }
}

impl MutationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generator.validate()?;

        if self.min_rounds > self.max_rounds {
            return Err(ConfigError::InvalidRounds {
                min: self.min_rounds,
                max: self.max_rounds,
            });
        }

        let probabilities = [
            ("address_bias", self.address_bias),
            ("integer_bias", self.integer_bias),
            ("string_bias", self.string_bias),
            ("bytes_bias", self.bytes_bias),
            ("keep_probability", self.keep_probability),
            ("regenerate_probability", self.regenerate_probability),
            ("resize_probability", self.resize_probability),
        ];
        for (name, value) in probabilities {
            // NaN fails the range check too.
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }

        let total = self.keep_probability + self.regenerate_probability + self.resize_probability;
        if total > 1.0 {
            return Err(ConfigError::ActionProbabilitiesExceedOne { total });
        }
        Ok(())
    }

    /// Defaults overridden by `ABI_FUZZ_*` environment variables, validated.
    ///
    /// Recognized variables: `ABI_FUZZ_{ARRAY,BYTES,STRING}_{MIN,MAX}_LEN`,
    /// `ABI_FUZZ_{ADDRESS,INTEGER,STRING,BYTES}_BIAS`,
    /// `ABI_FUZZ_{MIN,MAX}_ROUNDS` and
    /// `ABI_FUZZ_{KEEP,REGENERATE,RESIZE}_PROBABILITY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let g = &mut config.generator;
        env_override("ABI_FUZZ_ARRAY_MIN_LEN", &mut g.array_len.min);
        env_override("ABI_FUZZ_ARRAY_MAX_LEN", &mut g.array_len.max);
        env_override("ABI_FUZZ_BYTES_MIN_LEN", &mut g.bytes_len.min);
        env_override("ABI_FUZZ_BYTES_MAX_LEN", &mut g.bytes_len.max);
        env_override("ABI_FUZZ_STRING_MIN_LEN", &mut g.string_len.min);
        env_override("ABI_FUZZ_STRING_MAX_LEN", &mut g.string_len.max);

        env_override("ABI_FUZZ_ADDRESS_BIAS", &mut config.address_bias);
        env_override("ABI_FUZZ_INTEGER_BIAS", &mut config.integer_bias);
        env_override("ABI_FUZZ_STRING_BIAS", &mut config.string_bias);
        env_override("ABI_FUZZ_BYTES_BIAS", &mut config.bytes_bias);

        env_override("ABI_FUZZ_MIN_ROUNDS", &mut config.min_rounds);
        env_override("ABI_FUZZ_MAX_ROUNDS", &mut config.max_rounds);

        env_override("ABI_FUZZ_KEEP_PROBABILITY", &mut config.keep_probability);
        env_override(
            "ABI_FUZZ_REGENERATE_PROBABILITY",
            &mut config.regenerate_probability,
        );
        env_override("ABI_FUZZ_RESIZE_PROBABILITY", &mut config.resize_probability);

        config.validate()?;
        Ok(config)
    }

    /// Map a uniform draw `roll ∈ [0, 1)` onto a node action.
    ///
    /// Thresholds are cumulative in the order keep, regenerate, resize; the
    /// remainder mutates. When `resizable` is false the resize share mutates.
    pub fn action_for(&self, roll: f64, resizable: bool) -> NodeAction {
        let keep = self.keep_probability;
        let regenerate = keep + self.regenerate_probability;
        let resize = regenerate + self.resize_probability;

        if roll < keep {
            NodeAction::Keep
        } else if roll < regenerate {
            NodeAction::Regenerate
        } else if roll < resize && resizable {
            NodeAction::Resize
        } else {
            NodeAction::Mutate
        }
    }
}
