//! Codec tests: exact round trip and strict rejection of malformed input
//!
//! Test coverage areas:
//! - Encode/decode/encode stability over generated and mutated values
//! - Canonical text for integers, hex, and tuples
//! - Malformed hex, wrong sizes, out-of-range integers, wrong arity
//! - Persisted argument documents seeding a corpus

use serde_json::{json, Value};

use abi_fuzz::{
    decode_arguments, decode_value, encode_arguments, encode_value, format_call, generate_value,
    mutate_value, AbiType, AbiValue, DecodeError, MutatingGenerator, MutationConfig,
    RandomGenerator, TypeKey, ValueSet,
};
use abi_fuzz_integration_tests::{representative_types, small_bounds, transfer_params};

fn assert_stable(ty: &AbiType, value: &AbiValue) -> anyhow::Result<()> {
    let first = encode_value(ty, value)?;
    let decoded = decode_value(ty, &first)?;
    let second = encode_value(ty, &decoded)?;
    assert_eq!(
        serde_json::to_string(&first)?,
        serde_json::to_string(&second)?,
        "unstable encoding for {}",
        ty
    );
    assert_eq!(&decoded, value);
    Ok(())
}

// =============================================================================
// Round Trip
// =============================================================================

mod round_trip_tests {
    use super::*;

    #[test]
    fn test_generated_values_round_trip() -> anyhow::Result<()> {
        let mut gen = RandomGenerator::with_seed(small_bounds(), 1)?;
        for ty in representative_types() {
            for _ in 0..10 {
                let value = generate_value(&mut gen, &ty);
                assert_stable(&ty, &value)?;
            }
        }
        Ok(())
    }

    #[test]
    fn test_mutated_values_round_trip() -> anyhow::Result<()> {
        let mut corpus = ValueSet::new();
        let config = MutationConfig {
            generator: small_bounds(),
            min_rounds: 1,
            max_rounds: 3,
            ..Default::default()
        };
        let mut gen = MutatingGenerator::with_seed(config, &mut corpus, 2)?;
        for ty in representative_types() {
            let mut value = generate_value(&mut gen, &ty);
            for _ in 0..10 {
                value = mutate_value(&mut gen, &ty, &value)?;
                assert_stable(&ty, &value)?;
            }
        }
        Ok(())
    }

    #[test]
    fn test_string_round_trip_survives_json_text() -> anyhow::Result<()> {
        let mut gen = RandomGenerator::with_seed(small_bounds(), 3)?;
        for ty in representative_types() {
            let value = generate_value(&mut gen, &ty);
            let text = serde_json::to_string(&encode_value(&ty, &value)?)?;
            let reparsed: Value = serde_json::from_str(&text)?;
            assert_eq!(decode_value(&ty, &reparsed)?, value);
        }
        Ok(())
    }
}

// =============================================================================
// Canonical Form
// =============================================================================

mod canonical_tests {
    use super::*;

    #[test]
    fn test_uppercase_hex_normalizes() -> anyhow::Result<()> {
        let ty = AbiType::FixedBytes(4);
        let decoded = decode_value(&ty, &json!("0xDEADBEEF"))?;
        assert_eq!(encode_value(&ty, &decoded)?, json!("0xdeadbeef"));
        Ok(())
    }

    #[test]
    fn test_integer_numbers_normalize_to_text() -> anyhow::Result<()> {
        let ty = AbiType::Int(32);
        let decoded = decode_value(&ty, &json!(-42))?;
        assert_eq!(encode_value(&ty, &decoded)?, json!("-42"));
        Ok(())
    }

    #[test]
    fn test_extreme_integers_render_exactly() -> anyhow::Result<()> {
        let cases = [
            (AbiType::Uint(256), "115792089237316195423570985008687907853269984665640564039457584007913129639935"),
            (AbiType::Int(256), "-57896044618658097711785492504343953926634992332820282019728792003956564819968"),
            (AbiType::Int(256), "57896044618658097711785492504343953926634992332820282019728792003956564819967"),
            (AbiType::Int(8), "-128"),
            (AbiType::Uint(8), "0"),
        ];
        for (ty, text) in cases {
            let value = decode_value(&ty, &json!(text))?;
            assert_eq!(encode_value(&ty, &value)?, json!(text));
        }
        Ok(())
    }
}

// =============================================================================
// Malformed Input
// =============================================================================

mod malformed_tests {
    use super::*;

    #[test]
    fn test_odd_hex_rejected() {
        for ty in [AbiType::Bytes, AbiType::FixedBytes(2), AbiType::Address] {
            let err = decode_value(&ty, &json!("0x123")).unwrap_err();
            assert!(matches!(err, DecodeError::MalformedHex { .. }), "{ty}: {err}");
        }
    }

    #[test]
    fn test_short_twenty_byte_values_rejected() {
        let nineteen = json!(format!("0x{}", "ab".repeat(19)));
        for ty in [AbiType::FixedBytes(20), AbiType::Address] {
            match decode_value(&ty, &nineteen) {
                Err(DecodeError::LengthMismatch { expected, found, .. }) => {
                    assert_eq!((expected, found), (20, 19));
                }
                other => panic!("{ty} accepted short input: {other:?}"),
            }
        }
    }

    #[test]
    fn test_out_of_range_integers_rejected() {
        let cases = [
            (AbiType::Uint(8), "256"),
            (AbiType::Int(8), "-129"),
            (AbiType::Int(8), "128"),
            (AbiType::Uint(64), "18446744073709551616"),
        ];
        for (ty, text) in cases {
            let err = decode_value(&ty, &json!(text)).unwrap_err();
            assert!(matches!(err, DecodeError::IntegerOutOfRange { .. }), "{ty} {text}");
        }
    }

    #[test]
    fn test_wrong_arity_rejected() {
        let ty = AbiType::array(AbiType::Bool, 5);
        let err = decode_value(&ty, &json!([true, false])).unwrap_err();
        assert!(matches!(err, DecodeError::ArityMismatch { expected: 5, found: 2, .. }));
    }

    #[test]
    fn test_wrong_node_kind_rejected() {
        let err = decode_value(&AbiType::slice(AbiType::Bool), &json!({"a": true})).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedNode { found: "object", .. }));
    }

    #[test]
    fn test_errors_point_at_offending_node() {
        let ty = AbiType::slice(AbiType::array(AbiType::Uint(8), 2));
        let err = decode_value(&ty, &json!([["1", "2"], ["3", "999"]])).unwrap_err();
        assert_eq!(err.path(), "value[1][1]");
    }
}

// =============================================================================
// Persisted Arguments
// =============================================================================

mod persistence_tests {
    use super::*;

    #[test]
    fn test_persisted_call_seeds_corpus() -> anyhow::Result<()> {
        let params = transfer_params();
        let mut gen = RandomGenerator::with_seed(small_bounds(), 40)?;
        let args: Vec<AbiValue> = params
            .iter()
            .map(|p| generate_value(&mut gen, &p.ty))
            .collect();

        let stored = serde_json::to_string(&encode_arguments(&params, &args)?)?;
        let parsed: Value = serde_json::from_str(&stored)?;
        let restored = decode_arguments(&params, &parsed)?;
        assert_eq!(restored, args);

        let mut corpus = ValueSet::new();
        for (param, value) in params.iter().zip(&restored) {
            corpus.add_value(&param.ty, value);
        }
        assert_eq!(corpus.len_for(&TypeKey::Address), 1);
        assert_eq!(corpus.len_for(&TypeKey::Bytes), 1);
        assert_eq!(corpus.len_for(&TypeKey::Uint(256)), 1);
        assert_eq!(corpus.len_for(&TypeKey::Uint(64)), 1);
        Ok(())
    }

    #[test]
    fn test_arguments_object_keyed_by_name() -> anyhow::Result<()> {
        let params = transfer_params();
        let ir = json!({
            "to": "0x00000000000000000000000000000000000000aa",
            "amount": "1000",
            "data": "0x",
            "deadline": 1700000000u64,
        });
        let args = decode_arguments(&params, &ir)?;
        assert_eq!(args.len(), 4);
        assert_eq!(
            format_call("transferAndCall", &params, &args),
            "transferAndCall(0x00000000000000000000000000000000000000aa, 1000, 0x, 1700000000)"
        );
        Ok(())
    }

    #[test]
    fn test_argument_count_mismatch_rejected() {
        let params = transfer_params();
        let err = decode_arguments(&params, &json!(["0x00", "1"])).unwrap_err();
        assert!(matches!(err, DecodeError::ArityMismatch { expected: 4, found: 2, .. }));
    }
}
