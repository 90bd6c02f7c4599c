//! Round-trip properties (spec.md §8).

use quickcheck_macros::quickcheck;

use magia::{Sign, SignedInt};

#[quickcheck]
fn decimal_string_roundtrips(a: i64) -> bool {
    let a = SignedInt::from_i64(a);
    SignedInt::from_decimal_str(&a.to_decimal_string()).unwrap() == a
}

#[quickcheck]
fn hex_string_roundtrips(a: i64) -> bool {
    let a = SignedInt::from_i64(a);
    SignedInt::from_hex_str(&a.to_hex_string()).unwrap() == a
}

#[quickcheck]
fn binary_bytes_roundtrip_big_endian(a: i64) -> bool {
    let a = SignedInt::from_i64(a);
    let bytes = a.to_binary_bytes(true);
    SignedInt::from_binary_bytes_twos_complement(&bytes, true) == a
}

#[quickcheck]
fn binary_bytes_roundtrip_little_endian(a: i64) -> bool {
    let a = SignedInt::from_i64(a);
    let bytes = a.to_binary_bytes(false);
    SignedInt::from_binary_bytes_twos_complement(&bytes, false) == a
}

#[quickcheck]
fn general_binary_roundtrip_for_every_tc_and_endian_combination(a: i64) -> bool {
    // Unsigned (`is_twos_complement = false`) encoding of a negative value is
    // a hard error (tested separately in serialize.rs), so this combination
    // is only exercised with two's-complement on.
    let value = SignedInt::from_i64(a);
    [true, false].iter().all(|&big_endian| {
        let is_twos_complement = true;
        let bytes = value.to_binary_bytes_sized(is_twos_complement, big_endian, None).unwrap();
        let back =
            SignedInt::from_binary_bytes(is_twos_complement, big_endian, &bytes, 0, bytes.len())
                .unwrap();
        back == value
    })
}

#[quickcheck]
fn unsigned_binary_roundtrip_for_non_negative_values(a: u64) -> bool {
    // Non-negative values can be encoded either way, so both
    // `is_twos_complement` values are exercised here, alongside both
    // endiannesses — the combination the two tests above never reach.
    let value = SignedInt::from_u64(a);
    [true, false].iter().all(|&is_twos_complement| {
        [true, false].iter().all(|&big_endian| {
            let bytes = value
                .to_binary_bytes_sized(is_twos_complement, big_endian, None)
                .unwrap();
            let back =
                SignedInt::from_binary_bytes(is_twos_complement, big_endian, &bytes, 0, bytes.len())
                    .unwrap();
            back == value
        })
    })
}

#[quickcheck]
fn little_endian_limb_array_roundtrips_up_to_normalization(a: u64) -> bool {
    let a = SignedInt::from_u64(a);
    let limbs = a.to_little_endian_limbs();
    SignedInt::from_little_endian_limbs(Sign::NonNegative, limbs) == a
}

#[quickcheck]
fn i64_exact_conversion_roundtrips(a: i64) -> bool {
    SignedInt::from_i64(a).to_i64_exact().unwrap() == a
}

#[quickcheck]
fn u64_exact_conversion_roundtrips(a: u64) -> bool {
    SignedInt::from_u64(a).to_u64_exact().unwrap() == a
}

#[quickcheck]
fn i32_exact_conversion_roundtrips(a: i32) -> bool {
    SignedInt::from_i32(a).to_i32_exact().unwrap() == a
}

#[quickcheck]
fn u32_exact_conversion_roundtrips(a: u32) -> bool {
    SignedInt::from_u32(a).to_u32_exact().unwrap() == a
}

#[test]
fn buffers_differing_only_in_trailing_zero_limbs_compare_and_hash_equal() {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let a = SignedInt::from_little_endian_limbs(Sign::NonNegative, vec![7, 0, 0, 0]);
    let b = SignedInt::from_little_endian_limbs(Sign::NonNegative, vec![7]);
    assert_eq!(a, b);

    let mut ha = DefaultHasher::new();
    a.hash(&mut ha);
    let mut hb = DefaultHasher::new();
    b.hash(&mut hb);
    assert_eq!(ha.finish(), hb.finish());
}

#[test]
fn zero_is_unique() {
    assert_eq!(SignedInt::zero(), SignedInt::from_i64(0));
    assert_eq!(SignedInt::from_decimal_str("0").unwrap(), SignedInt::zero());
    assert_eq!(
        SignedInt::from_little_endian_limbs(Sign::NonNegative, vec![]),
        SignedInt::zero()
    );
}
