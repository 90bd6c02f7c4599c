//! Decimal and hexadecimal text conversion (spec.md §4.1.8).
//!
//! Parsing accepts an optional leading sign, an optional `0x`/`0X` prefix for
//! hexadecimal, and underscores as digit-group separators — an underscore
//! must sit strictly between two digits, never leading, trailing, or
//! doubled.

use crate::charstream::CharStream;
use crate::error::{MagiaError, MagiaResult};
use crate::mul_hi::mul_hi;
use crate::sign::Sign;

use super::arith::{add, mul_scalar_u32, trim};

/// `floor(2^64 / 10^9)`, the fixed-point reciprocal used to replace the
/// per-limb hardware division in [`div_by_1e9_barrett`] with a widening
/// multiply plus a short correction (spec.md §4.1.8).
const BARRETT_MU_1E9: u64 = ((1u128 << 64) / 1_000_000_000u128) as u64;
const DECIMAL_CHUNK: u64 = 1_000_000_000;

/// Divides a magnitude by `10^9`, Barrett-style: each limb's 64-bit partial
/// dividend is reduced by multiplying against [`BARRETT_MU_1E9`] and taking
/// the high word, then corrected by at most a couple of subtractions, rather
/// than issuing a 64-by-32 hardware divide per limb.
pub(crate) fn div_by_1e9_barrett(x: &[u32]) -> (Vec<u32>, u32) {
    let mut q = vec![0u32; x.len()];
    let mut rem: u64 = 0;
    for i in (0..x.len()).rev() {
        let combined = (rem << 32) | x[i] as u64;
        let mut quotient = mul_hi(combined, BARRETT_MU_1E9);
        let mut r = combined - quotient * DECIMAL_CHUNK;
        while r >= DECIMAL_CHUNK {
            r -= DECIMAL_CHUNK;
            quotient += 1;
        }
        q[i] = quotient as u32;
        rem = r;
    }
    trim(&mut q);
    (q, rem as u32)
}

/// Folds a run of ASCII decimal digits into a magnitude by processing the
/// leading, possibly-short group first and then full nine-digit groups via
/// `magnitude = magnitude * 10^9 + chunk` (spec.md §4.1.8).
fn digits_to_magnitude(digits: &[u8]) -> Vec<u32> {
    let len = digits.len();
    if len == 0 {
        return Vec::new();
    }
    let first_len = if len % 9 == 0 { 9 } else { len % 9 };

    let mut magnitude = vec![parse_decimal_chunk(&digits[..first_len])];
    trim(&mut magnitude);

    let mut i = first_len;
    while i < len {
        let chunk = parse_decimal_chunk(&digits[i..i + 9]);
        magnitude = mul_scalar_u32(&magnitude, 1_000_000_000);
        magnitude = add(&magnitude, &[chunk]);
        i += 9;
    }
    magnitude
}

fn parse_decimal_chunk(chunk: &[u8]) -> u32 {
    let mut v: u32 = 0;
    for &b in chunk {
        v = v * 10 + (b - b'0') as u32;
    }
    v
}

/// Folds a run of ASCII hex digits into a magnitude, eight hex digits (32
/// bits) per limb, least-significant group first.
fn hex_digits_to_magnitude(digits: &[u8]) -> Vec<u32> {
    let mut limbs = Vec::with_capacity(digits.len().div_ceil(8));
    let mut end = digits.len();
    while end > 0 {
        let start = end.saturating_sub(8);
        let chunk = std::str::from_utf8(&digits[start..end]).expect("ASCII hex digits");
        limbs.push(u32::from_str_radix(chunk, 16).expect("validated hex digits"));
        end = start;
    }
    trim(&mut limbs);
    limbs
}

/// Walks an underscore-separated run of digits satisfying `is_digit`,
/// stripping the underscores out. An underscore is only valid strictly
/// between two digits.
fn collect_digits(
    stream: &mut CharStream,
    original: &str,
    is_digit: impl Fn(&u8) -> bool,
) -> MagiaResult<Vec<u8>> {
    let mut out = Vec::new();
    let mut last_was_digit = false;
    let mut last_was_underscore = false;

    while let Some(b) = stream.peek() {
        if b == b'_' {
            if !last_was_digit {
                return Err(MagiaError::parse(original, "underscore must follow a digit"));
            }
            stream.next();
            last_was_digit = false;
            last_was_underscore = true;
            continue;
        }
        if !is_digit(&b) {
            break;
        }
        out.push(b);
        stream.next();
        last_was_digit = true;
        last_was_underscore = false;
    }

    if last_was_underscore {
        return Err(MagiaError::parse(original, "trailing underscore"));
    }
    if out.is_empty() {
        return Err(MagiaError::parse(original, "expected at least one digit"));
    }
    Ok(out)
}

fn consume_sign(stream: &mut CharStream) -> Sign {
    match stream.peek() {
        Some(b'-') => {
            stream.next();
            Sign::Negative
        }
        Some(b'+') => {
            stream.next();
            Sign::NonNegative
        }
        _ => Sign::NonNegative,
    }
}

/// True if the stream is positioned at a `0x`/`0X` prefix (without consuming
/// it).
fn at_hex_prefix(stream: &CharStream) -> bool {
    matches!(stream.peek(), Some(b'0')) && matches!(stream.peek_at(1), Some(b'x') | Some(b'X'))
}

/// `[+|-]? ( '0' ('x'|'X') <hex-body> | <decimal-body> )` (spec.md §6): a
/// leading `0x`/`0X` re-dispatches to hex parsing with the sign already
/// consumed, exactly as spec.md §4.1.8 step 2 describes.
pub(crate) fn parse_decimal(s: &str) -> MagiaResult<(Sign, Vec<u32>)> {
    let bytes = s.as_bytes();
    let mut stream = CharStream::new(bytes);
    let sign = consume_sign(&mut stream);

    if at_hex_prefix(&stream) {
        stream.next();
        stream.next();
        return parse_hex_body(&mut stream, s, sign);
    }

    let digits = collect_digits(&mut stream, s, u8::is_ascii_digit)?;
    if !stream.is_empty() {
        return Err(MagiaError::parse(s, "unexpected trailing characters"));
    }

    let magnitude = digits_to_magnitude(&digits);
    let sign = if magnitude.is_empty() { Sign::NonNegative } else { sign };
    Ok((sign, magnitude))
}

/// `[+|-]? ('0' ('x'|'X'))? <hex-body>` (spec.md §6): the `0x`/`0X` prefix is
/// optional here, unlike in [`parse_decimal`]'s redispatch.
pub(crate) fn parse_hex(s: &str) -> MagiaResult<(Sign, Vec<u32>)> {
    let bytes = s.as_bytes();
    let mut stream = CharStream::new(bytes);
    let sign = consume_sign(&mut stream);

    if at_hex_prefix(&stream) {
        stream.next();
        stream.next();
    }

    parse_hex_body(&mut stream, s, sign)
}

fn parse_hex_body(stream: &mut CharStream, original: &str, sign: Sign) -> MagiaResult<(Sign, Vec<u32>)> {
    let digits = collect_digits(stream, original, u8::is_ascii_hexdigit)?;
    if !stream.is_empty() {
        return Err(MagiaError::parse(original, "unexpected trailing characters"));
    }

    let magnitude = hex_digits_to_magnitude(&digits);
    let sign = if magnitude.is_empty() { Sign::NonNegative } else { sign };
    Ok((sign, magnitude))
}

pub(crate) fn to_decimal_string(sign: Sign, magnitude: &[u32]) -> String {
    if magnitude.is_empty() {
        return "0".to_string();
    }

    let mut groups = Vec::new();
    let mut cur = magnitude.to_vec();
    while !cur.is_empty() {
        let (q, r) = div_by_1e9_barrett(&cur);
        groups.push(r);
        cur = q;
    }

    let mut s = String::new();
    if sign.is_negative() {
        s.push('-');
    }
    let mut groups = groups.into_iter().rev();
    if let Some(first) = groups.next() {
        s.push_str(&first.to_string());
    }
    for group in groups {
        s.push_str(&format!("{group:09}"));
    }
    s
}

pub(crate) fn to_hex_string(sign: Sign, magnitude: &[u32]) -> String {
    if magnitude.is_empty() {
        return "0x0".to_string();
    }

    let mut s = String::new();
    if sign.is_negative() {
        s.push('-');
    }
    s.push_str("0x");
    let mut limbs = magnitude.iter().rev();
    if let Some(&top) = limbs.next() {
        s.push_str(&format!("{top:X}"));
    }
    for &limb in limbs {
        s.push_str(&format!("{limb:08X}"));
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_underscore_separated_decimal() {
        let (sign, magnitude) = parse_decimal("123_456_789_012_345_678_901_234_567_890").unwrap();
        assert_eq!(sign, Sign::NonNegative);
        assert_eq!(
            to_decimal_string(sign, &magnitude),
            "123456789012345678901234567890"
        );
    }

    #[test]
    fn parses_negative_hex_with_underscores() {
        let (sign, magnitude) = parse_hex("-0xCAFE_BABE_FACE_DEAD_BEEF").unwrap();
        assert_eq!(sign, Sign::Negative);
        assert_eq!(to_hex_string(sign, &magnitude), "-0xCAFEBABEFACEDEADBEEF");
    }

    #[test]
    fn rejects_leading_trailing_and_doubled_underscores() {
        assert!(parse_decimal("_123").is_err());
        assert!(parse_decimal("123_").is_err());
        assert!(parse_decimal("1__23").is_err());
    }

    #[test]
    fn hex_prefix_is_optional_in_parse_hex() {
        let (sign, magnitude) = parse_hex("CAFEBABE").unwrap();
        assert_eq!(sign, Sign::NonNegative);
        assert_eq!(to_hex_string(sign, &magnitude), "0xCAFEBABE");
    }

    #[test]
    fn parse_decimal_redispatches_on_hex_prefix() {
        let (sign, magnitude) = parse_decimal("-0x1A").unwrap();
        assert_eq!(sign, Sign::Negative);
        assert_eq!(to_hex_string(sign, &magnitude), "-0x1A");
    }

    #[test]
    fn zero_roundtrips_without_sign() {
        let (sign, magnitude) = parse_decimal("0").unwrap();
        assert_eq!(sign, Sign::NonNegative);
        assert!(magnitude.is_empty());
        assert_eq!(to_decimal_string(sign, &magnitude), "0");
    }

    #[test]
    fn decimal_roundtrip_across_many_nine_digit_groups() {
        let s = "987654321123456789987654321123456789";
        let (sign, magnitude) = parse_decimal(s).unwrap();
        assert_eq!(to_decimal_string(sign, &magnitude), s);
    }

    #[test]
    fn barrett_division_matches_schoolbook_scalar_division() {
        let x = vec![0xFFFF_FFFFu32, 0x1234_5678, 7];
        let (q, r) = div_by_1e9_barrett(&x);
        let (q2, r2) = super::super::arith::div_scalar_u32(&x, 1_000_000_000);
        assert_eq!(q, q2);
        assert_eq!(r, r2);
    }
}
