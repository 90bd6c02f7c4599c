//! The concrete seed scenarios from spec.md §8 — literal values that must
//! match bit-for-bit, kept together here even though several are already
//! exercised as unit tests closer to the code they pin down.

use magia::{Barrett, SignedInt};

#[test]
fn decimal_parse_with_underscores_matches_the_plain_value() {
    let underscored =
        SignedInt::from_decimal_str("123_456_789_012_345_678_901_234_567_890").unwrap();
    let plain = SignedInt::from_decimal_str("123456789012345678901234567890").unwrap();
    assert_eq!(underscored, plain);
    assert_eq!(
        underscored.to_decimal_string(),
        "123456789012345678901234567890"
    );
}

#[test]
fn large_division_matches_seed_scenario() {
    let dividend =
        SignedInt::from_decimal_str("16943852051772892430707956759219").unwrap();
    let divisor = SignedInt::from_u64(16883797134507450982);
    let (q, r) = dividend.div_rem(&divisor).unwrap();
    assert_eq!(q, SignedInt::from_u64(1003555739));
    assert_eq!(q.mul(&divisor).add(&r), dividend);
}

#[test]
fn square_root_matches_seed_scenario() {
    let root = SignedInt::from_u64(89515880);
    let n = root.sqr();
    assert_eq!(n.isqrt().unwrap(), root);
    assert_eq!(
        n.sub(&SignedInt::one()).isqrt().unwrap(),
        SignedInt::from_u64(89515879)
    );
}

#[test]
fn power_matches_seed_scenario() {
    let result = SignedInt::from_u64(10).pow(20).unwrap();
    assert_eq!(result.to_decimal_string(), "100000000000000000000");
}

#[test]
fn barrett_reduction_matches_seed_scenario() {
    let m = SignedInt::from_decimal_str("12345678901234567890").unwrap();
    let x = SignedInt::from_decimal_str("123456789012345678901234567890").unwrap();
    let barrett = Barrett::new(&m).unwrap();
    let (_, expected) = x.div_rem(&m).unwrap();
    assert_eq!(barrett.remainder(&x).unwrap(), expected);
}

#[test]
fn twos_complement_bytes_match_seed_scenario() {
    assert_eq!(SignedInt::from_i64(-1).to_binary_bytes(true), vec![0xFF]);
    assert_eq!(SignedInt::from_i64(-128).to_binary_bytes(true), vec![0x80]);
    assert_eq!(
        SignedInt::from_i64(128).to_binary_bytes(true),
        vec![0x00, 0x80]
    );
}

#[test]
fn gcd_with_scaling_matches_seed_scenario() {
    let x = SignedInt::from_i64(-84);
    let y = SignedInt::from_i64(126);
    let k = SignedInt::from_i64(-5);
    let lhs = x.mul(&k).gcd(&y.mul(&k));
    let rhs = k.abs().mul(&x.gcd(&y));
    assert_eq!(lhs, rhs);
}

#[test]
fn factorial_boundary_matches_seed_scenario() {
    assert_eq!(
        SignedInt::factorial(0).unwrap(),
        SignedInt::factorial(1).unwrap()
    );
    assert_eq!(SignedInt::factorial(0).unwrap(), SignedInt::one());
    assert!(SignedInt::factorial(20).unwrap().to_u64_exact().is_ok());
    assert!(SignedInt::factorial(21).unwrap().to_u64_exact().is_err());
}
