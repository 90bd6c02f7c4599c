//! L2: the immutable signed integer, the public algebra callers use.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use rand::RngCore;

use crate::error::{MagiaError, MagiaResult};
use crate::magia::{Endian, Magia};
use crate::sign::Sign;

/// Extracts `(sign, magnitude as u64)` from a primitive operand without
/// heap allocation, so every arithmetic and comparison operation accepts
/// primitive operands through the same sign-handling path (spec.md §6,
/// §9 "Primitive-operand proliferation" — a single generic implementation
/// in place of the source's eight manually expanded overloads).
pub trait AsOperand: Copy {
    fn as_operand(self) -> (Sign, u64);
}

impl AsOperand for u32 {
    fn as_operand(self) -> (Sign, u64) {
        (Sign::NonNegative, self as u64)
    }
}

impl AsOperand for u64 {
    fn as_operand(self) -> (Sign, u64) {
        (Sign::NonNegative, self)
    }
}

impl AsOperand for i32 {
    fn as_operand(self) -> (Sign, u64) {
        (Sign::from_is_negative(self < 0), self.unsigned_abs() as u64)
    }
}

impl AsOperand for i64 {
    fn as_operand(self) -> (Sign, u64) {
        (Sign::from_is_negative(self < 0), self.unsigned_abs())
    }
}

/// Immutable sign-magnitude arbitrary-precision integer.
///
/// The magnitude buffer is reference-counted (spec.md §9 "Ownership of
/// magnitudes"): `abs()` and unary negation share the same buffer with
/// their source under the read-only contract described there.
#[derive(Clone, Eq)]
pub struct SignedInt {
    sign: Sign,
    magnitude: Rc<Magia>,
}

impl fmt::Debug for SignedInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SignedInt").field(&self.to_string()).finish()
    }
}

impl PartialEq for SignedInt {
    fn eq(&self, other: &Self) -> bool {
        self.sign == other.sign && self.magnitude.as_limbs() == other.magnitude.as_limbs()
    }
}

impl std::hash::Hash for SignedInt {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.sign.hash(state);
        self.magnitude.as_limbs().hash(state);
    }
}

impl PartialOrd for SignedInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SignedInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.sign, other.sign) {
            (Sign::NonNegative, Sign::Negative) => Ordering::Greater,
            (Sign::Negative, Sign::NonNegative) => Ordering::Less,
            (Sign::NonNegative, Sign::NonNegative) => self.magnitude.cmp_magnitude(&other.magnitude),
            (Sign::Negative, Sign::Negative) => other.magnitude.cmp_magnitude(&self.magnitude),
        }
    }
}

fn normalize_sign(sign: Sign, magnitude: &Magia) -> Sign {
    if magnitude.is_zero() {
        Sign::NonNegative
    } else {
        sign
    }
}

impl SignedInt {
    pub fn zero() -> Self {
        SignedInt {
            sign: Sign::NonNegative,
            magnitude: Rc::new(Magia::zero()),
        }
    }

    pub fn one() -> Self {
        Self::from_u64(1)
    }

    pub(crate) fn from_sign_and_magia(sign: Sign, magnitude: Magia) -> Self {
        let sign = normalize_sign(sign, &magnitude);
        SignedInt {
            sign,
            magnitude: Rc::new(magnitude),
        }
    }

    pub(crate) fn magia(&self) -> &Magia {
        &self.magnitude
    }

    pub(crate) fn sign(&self) -> Sign {
        self.sign
    }

    pub fn from_operand<T: AsOperand>(v: T) -> Self {
        let (sign, mag) = v.as_operand();
        Self::from_sign_and_magia(sign, Magia::from_u64(mag))
    }

    pub fn from_u32(v: u32) -> Self {
        Self::from_operand(v)
    }
    pub fn from_u64(v: u64) -> Self {
        Self::from_operand(v)
    }
    pub fn from_i32(v: i32) -> Self {
        Self::from_operand(v)
    }
    pub fn from_i64(v: i64) -> Self {
        Self::from_operand(v)
    }

    /// A legacy-compatible float import: non-finite values collapse to
    /// canonical zero, fractions truncate toward zero (spec.md §7).
    pub fn from_f64(v: f64) -> Self {
        if !v.is_finite() {
            return Self::zero();
        }
        let truncated = v.trunc();
        let sign = Sign::from_is_negative(truncated.is_sign_negative() && truncated != 0.0);
        let mut magnitude = Vec::new();
        let mut rest = truncated.abs();
        while rest >= 1.0 {
            let limb = (rest % 4294967296.0) as u32;
            magnitude.push(limb);
            rest = (rest / 4294967296.0).floor();
        }
        Self::from_sign_and_magia(sign, Magia::from_limbs(magnitude))
    }

    pub fn from_decimal_str(s: &str) -> MagiaResult<Self> {
        let (sign, magnitude) = Magia::parse_decimal(s)?;
        Ok(Self::from_sign_and_magia(sign, magnitude))
    }

    pub fn from_hex_str(s: &str) -> MagiaResult<Self> {
        let (sign, magnitude) = Magia::parse_hex(s)?;
        Ok(Self::from_sign_and_magia(sign, magnitude))
    }

    pub fn from_little_endian_limbs(sign: Sign, limbs: Vec<u32>) -> Self {
        Self::from_sign_and_magia(sign, Magia::from_limbs(limbs))
    }

    pub fn to_little_endian_limbs(&self) -> Vec<u32> {
        self.magnitude.as_limbs().to_vec()
    }

    pub fn from_binary_bytes_twos_complement(bytes: &[u8], big_endian: bool) -> Self {
        let endian = if big_endian { Endian::Big } else { Endian::Little };
        let (sign, magnitude) = Magia::from_binary_bytes(bytes, endian);
        Self::from_sign_and_magia(sign, magnitude)
    }

    pub fn from_binary_bytes_unsigned(bytes: &[u8], big_endian: bool) -> Self {
        let endian = if big_endian { Endian::Big } else { Endian::Little };
        let (sign, magnitude) = Magia::from_binary_bytes_general(bytes, false, endian);
        Self::from_sign_and_magia(sign, magnitude)
    }

    pub fn to_binary_bytes(&self, big_endian: bool) -> Vec<u8> {
        let endian = if big_endian { Endian::Big } else { Endian::Little };
        self.magnitude.to_binary_bytes(self.sign, endian)
    }

    /// The allocating general form of binary export (spec.md §6):
    /// `is_twos_complement` picks plain-unsigned vs. two's-complement
    /// encoding, and `requested_length` (when `Some`) sign-extends the
    /// minimal encoding up to that many bytes, erroring if it's shorter
    /// than the minimal length (spec.md §4.1.10).
    pub fn to_binary_bytes_sized(
        &self,
        is_twos_complement: bool,
        big_endian: bool,
        requested_length: Option<usize>,
    ) -> MagiaResult<Vec<u8>> {
        let endian = if big_endian { Endian::Big } else { Endian::Little };
        self.magnitude
            .to_binary_bytes_general(self.sign, is_twos_complement, endian, requested_length)
    }

    /// Writes the binary encoding into `dest[offset..]`, returning the
    /// number of bytes written (spec.md §6's
    /// `to_binary_bytes(..., dest, offset, requested_length) -> length_written`).
    /// `requested_length == 0` means "the minimal length."
    pub fn write_binary_bytes(
        &self,
        is_twos_complement: bool,
        big_endian: bool,
        dest: &mut [u8],
        offset: usize,
        requested_length: usize,
    ) -> MagiaResult<usize> {
        let requested = if requested_length == 0 { None } else { Some(requested_length) };
        let encoded = self.to_binary_bytes_sized(is_twos_complement, big_endian, requested)?;
        let end = offset
            .checked_add(encoded.len())
            .ok_or_else(|| MagiaError::invalid("offset + length overflows"))?;
        if end > dest.len() {
            return Err(MagiaError::invalid("dest is too short for offset + requested_length"));
        }
        dest[offset..end].copy_from_slice(&encoded);
        Ok(encoded.len())
    }

    /// The general binary import (spec.md §6): reads `length` bytes
    /// starting at `offset` out of `bytes`. An empty range yields canonical
    /// zero.
    pub fn from_binary_bytes(
        is_twos_complement: bool,
        big_endian: bool,
        bytes: &[u8],
        offset: usize,
        length: usize,
    ) -> MagiaResult<Self> {
        let end = offset
            .checked_add(length)
            .ok_or_else(|| MagiaError::invalid("offset + length overflows"))?;
        if end > bytes.len() {
            return Err(MagiaError::invalid("offset/length out of range for the byte slice"));
        }
        let endian = if big_endian { Endian::Big } else { Endian::Little };
        let (sign, magnitude) =
            Magia::from_binary_bytes_general(&bytes[offset..end], is_twos_complement, endian);
        Ok(Self::from_sign_and_magia(sign, magnitude))
    }

    pub fn with_set_bit(n: u64) -> Self {
        Self::from_sign_and_magia(Sign::NonNegative, Magia::with_set_bit(n))
    }

    pub fn with_bit_mask(w: u64) -> Self {
        Self::from_sign_and_magia(Sign::NonNegative, Magia::with_bit_mask(w))
    }

    pub fn with_indexed_bit_mask(i: u64, w: u64) -> Self {
        Self::from_sign_and_magia(Sign::NonNegative, Magia::with_indexed_bit_mask(i, w))
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.sign.is_negative()
    }

    pub fn abs(&self) -> Self {
        SignedInt {
            sign: Sign::NonNegative,
            magnitude: Rc::clone(&self.magnitude),
        }
    }

    pub fn negate(&self) -> Self {
        if self.is_zero() {
            return self.clone();
        }
        SignedInt {
            sign: !self.sign,
            magnitude: Rc::clone(&self.magnitude),
        }
    }

    fn add_signed(&self, other_sign: Sign, other_magnitude: &Magia) -> Self {
        if self.sign == other_sign {
            Self::from_sign_and_magia(self.sign, self.magnitude.add(other_magnitude))
        } else {
            match self.magnitude.cmp_magnitude(other_magnitude) {
                Ordering::Greater | Ordering::Equal => {
                    Self::from_sign_and_magia(self.sign, self.magnitude.sub(other_magnitude))
                }
                Ordering::Less => {
                    Self::from_sign_and_magia(other_sign, other_magnitude.sub(&self.magnitude))
                }
            }
        }
    }

    pub fn add(&self, other: &SignedInt) -> Self {
        self.add_signed(other.sign, &other.magnitude)
    }

    pub fn sub(&self, other: &SignedInt) -> Self {
        self.add_signed(!other.sign, &other.magnitude)
    }

    pub fn mul(&self, other: &SignedInt) -> Self {
        Self::from_sign_and_magia(self.sign.xor(other.sign), self.magnitude.mul(&other.magnitude))
    }

    pub fn sqr(&self) -> Self {
        Self::from_sign_and_magia(Sign::NonNegative, self.magnitude.square())
    }

    /// `(quotient, remainder)`, with `mod`'s sign equal to the dividend's
    /// (C/Java convention, spec.md §4.2).
    pub fn div_rem(&self, other: &SignedInt) -> MagiaResult<(Self, Self)> {
        let (q, r) = self.magnitude.div_rem(&other.magnitude)?;
        let quotient = Self::from_sign_and_magia(self.sign.xor(other.sign), q);
        let remainder = Self::from_sign_and_magia(self.sign, r);
        Ok((quotient, remainder))
    }

    pub fn divide(&self, other: &SignedInt) -> MagiaResult<Self> {
        Ok(self.div_rem(other)?.0)
    }

    pub fn modulo(&self, other: &SignedInt) -> MagiaResult<Self> {
        Ok(self.div_rem(other)?.1)
    }

    /// `(quotient, remainder)` against a primitive operand, without heap
    /// allocation for the operand (spec.md §6's primitive-operand interop).
    /// The remainder's sign depends only on the dividend, never on the
    /// operand's sign (spec.md §4.2's "Remainder sign policy").
    pub fn div_rem_operand<T: AsOperand>(&self, other: T) -> MagiaResult<(Self, Self)> {
        let (other_sign, mag) = other.as_operand();
        let other_magnitude = Magia::from_u64(mag);
        if other_magnitude.is_zero() {
            return Err(MagiaError::DivisionByZero);
        }
        let (q, r) = self.magnitude.div_rem(&other_magnitude)?;
        let quotient = Self::from_sign_and_magia(self.sign.xor(other_sign), q);
        let remainder = Self::from_sign_and_magia(self.sign, r);
        Ok((quotient, remainder))
    }

    pub fn divide_operand<T: AsOperand>(&self, other: T) -> MagiaResult<Self> {
        Ok(self.div_rem_operand(other)?.0)
    }

    pub fn modulo_operand<T: AsOperand>(&self, other: T) -> MagiaResult<Self> {
        Ok(self.div_rem_operand(other)?.1)
    }

    /// Equality against a primitive operand, through the same sign-handling
    /// path as same-type equality (spec.md §6).
    pub fn eq_operand<T: AsOperand>(&self, other: T) -> bool {
        let (other_sign, mag) = other.as_operand();
        let other_magnitude = Magia::from_u64(mag);
        let other_sign = normalize_sign(other_sign, &other_magnitude);
        self.sign == other_sign && self.magnitude.as_limbs() == other_magnitude.as_limbs()
    }

    /// Ordering against a primitive operand (spec.md §6).
    pub fn cmp_operand<T: AsOperand>(&self, other: T) -> Ordering {
        let (other_sign, mag) = other.as_operand();
        let other_magnitude = Magia::from_u64(mag);
        match (self.sign, normalize_sign(other_sign, &other_magnitude)) {
            (Sign::NonNegative, Sign::Negative) => Ordering::Greater,
            (Sign::Negative, Sign::NonNegative) => Ordering::Less,
            (Sign::NonNegative, Sign::NonNegative) => self.magnitude.cmp_magnitude(&other_magnitude),
            (Sign::Negative, Sign::Negative) => other_magnitude.cmp_magnitude(&self.magnitude),
        }
    }

    pub fn gcd(&self, other: &SignedInt) -> Self {
        Self::from_sign_and_magia(Sign::NonNegative, self.magnitude.gcd(&other.magnitude))
    }

    pub fn lcm(&self, other: &SignedInt) -> MagiaResult<Self> {
        if self.is_zero() || other.is_zero() {
            return Ok(Self::zero());
        }
        let g = self.gcd(other);
        let product = self.mul(other).abs();
        product.divide(&g)
    }

    pub fn pow(&self, n: i64) -> MagiaResult<Self> {
        if n < 0 {
            return Err(MagiaError::OutOfRange);
        }
        match n {
            0 => Ok(Self::one()),
            1 => Ok(self.clone()),
            2 => Ok(self.sqr()),
            _ => {
                let mut result = Self::one();
                let mut base = self.clone();
                let mut e = n as u64;
                while e > 0 {
                    if e & 1 == 1 {
                        result = result.mul(&base);
                    }
                    e >>= 1;
                    if e > 0 {
                        base = base.sqr_signed();
                    }
                }
                Ok(result)
            }
        }
    }

    /// Squares while retaining the correct sign: `(-a)^2` computed as a
    /// step of repeated squaring inside [`pow`], where the operand being
    /// squared may itself be negative raised to an even power along the
    /// way to the final (always non-negative, since `sqr` is always
    /// non-negative) base — kept distinct from `sqr` only so `pow`'s loop
    /// reads clearly.
    fn sqr_signed(&self) -> Self {
        self.sqr()
    }

    pub fn isqrt(&self) -> MagiaResult<Self> {
        if self.is_negative() {
            return Err(MagiaError::OutOfRange);
        }
        Ok(Self::from_sign_and_magia(Sign::NonNegative, self.magnitude.isqrt()))
    }

    pub fn factorial(n: i64) -> MagiaResult<Self> {
        if n < 0 {
            return Err(MagiaError::OutOfRange);
        }
        if n <= 1 {
            return Ok(Self::one());
        }

        let nf = n as f64;
        let ln_n_factorial =
            nf * nf.ln() - nf + 0.5 * (2.0 * std::f64::consts::PI * nf).ln() + 1.0 / (12.0 * nf);
        let estimated_bits = ln_n_factorial / std::f64::consts::LN_2;
        let estimated_limbs = (estimated_bits / 32.0).ceil();
        if estimated_limbs > u32::MAX as f64 {
            return Err(MagiaError::Overflow);
        }

        let mut acc = Magia::from_u64(1);
        for i in 2..=(n as u64) {
            acc = acc.mul_scalar_u64(i);
        }
        Ok(Self::from_sign_and_magia(Sign::NonNegative, acc))
    }

    pub fn band(&self, other: &SignedInt) -> Self {
        Self::from_sign_and_magia(Sign::NonNegative, self.magnitude.bitand(&other.magnitude))
    }

    pub fn bor(&self, other: &SignedInt) -> Self {
        Self::from_sign_and_magia(Sign::NonNegative, self.magnitude.bitor(&other.magnitude))
    }

    pub fn bxor(&self, other: &SignedInt) -> Self {
        Self::from_sign_and_magia(Sign::NonNegative, self.magnitude.bitxor(&other.magnitude))
    }

    pub fn shl(&self, n: u64) -> Self {
        Self::from_sign_and_magia(self.sign, self.magnitude.shift_left(n))
    }

    /// Arithmetic (floor) right shift: negative values round toward
    /// negative infinity when any discarded low bit was set (spec.md
    /// §4.2's two's-complement-style `-1` correction).
    pub fn shr(&self, n: u64) -> Self {
        let shifted = self.magnitude.shift_right(n);
        if self.is_negative() && self.magnitude.test_any_bit_in_lower_n(n) {
            Self::from_sign_and_magia(Sign::Negative, shifted.add(&Magia::from_u64(1)))
        } else {
            Self::from_sign_and_magia(self.sign, shifted)
        }
    }

    pub fn bit_len_bigint_style(&self) -> u64 {
        self.magnitude.bit_len_bigint_style(self.sign)
    }

    pub fn test_bit(&self, n: u64) -> bool {
        self.magnitude.test_bit(n)
    }

    pub fn to_decimal_string(&self) -> String {
        self.magnitude.to_decimal_string(self.sign)
    }

    pub fn to_hex_string(&self) -> String {
        self.magnitude.to_hex_string(self.sign)
    }

    fn low_u64(&self) -> u64 {
        let limbs = self.magnitude.as_limbs();
        let lo = limbs.first().copied().unwrap_or(0) as u64;
        let hi = limbs.get(1).copied().unwrap_or(0) as u64;
        lo | (hi << 32)
    }

    pub fn to_i64_truncating(&self) -> i64 {
        let v = self.low_u64() as i64;
        if self.is_negative() { v.wrapping_neg() } else { v }
    }

    pub fn to_i64_exact(&self) -> MagiaResult<i64> {
        let bound = Magia::with_set_bit(63);
        let fits = if self.is_negative() {
            self.magnitude.cmp_magnitude(&bound) != Ordering::Greater
        } else {
            self.magnitude.cmp_magnitude(&bound) == Ordering::Less
        };
        if !fits {
            return Err(MagiaError::OutOfRange);
        }
        Ok(self.to_i64_truncating())
    }

    pub fn to_i64_clamped(&self) -> i64 {
        self.to_i64_exact()
            .unwrap_or(if self.is_negative() { i64::MIN } else { i64::MAX })
    }

    pub fn to_u64_truncating(&self) -> u64 {
        if self.is_negative() { self.low_u64().wrapping_neg() } else { self.low_u64() }
    }

    pub fn to_u64_exact(&self) -> MagiaResult<u64> {
        if self.is_negative() && !self.is_zero() {
            return Err(MagiaError::OutOfRange);
        }
        if self.magnitude.bit_len() > 64 {
            return Err(MagiaError::OutOfRange);
        }
        Ok(self.low_u64())
    }

    pub fn to_u64_clamped(&self) -> u64 {
        if self.is_negative() {
            0
        } else {
            self.to_u64_exact().unwrap_or(u64::MAX)
        }
    }

    pub fn to_i32_truncating(&self) -> i32 {
        self.to_i64_truncating() as i32
    }

    pub fn to_i32_exact(&self) -> MagiaResult<i32> {
        let bound = Magia::with_set_bit(31);
        let fits = if self.is_negative() {
            self.magnitude.cmp_magnitude(&bound) != Ordering::Greater
        } else {
            self.magnitude.cmp_magnitude(&bound) == Ordering::Less
        };
        if !fits {
            return Err(MagiaError::OutOfRange);
        }
        Ok(self.to_i64_truncating() as i32)
    }

    pub fn to_i32_clamped(&self) -> i32 {
        self.to_i32_exact()
            .unwrap_or(if self.is_negative() { i32::MIN } else { i32::MAX })
    }

    pub fn to_u32_truncating(&self) -> u32 {
        self.to_u64_truncating() as u32
    }

    pub fn to_u32_exact(&self) -> MagiaResult<u32> {
        if self.is_negative() && !self.is_zero() {
            return Err(MagiaError::OutOfRange);
        }
        if self.magnitude.bit_len() > 32 {
            return Err(MagiaError::OutOfRange);
        }
        Ok(self.low_u64() as u32)
    }

    pub fn to_u32_clamped(&self) -> u32 {
        if self.is_negative() {
            0
        } else {
            self.to_u32_exact().unwrap_or(u32::MAX)
        }
    }

    pub fn random_with_max_bit_len<R: RngCore + ?Sized>(rng: &mut R, n: u64, with_random_sign: bool) -> Self {
        let magnitude = Magia::random_with_max_bit_len(rng, n);
        Self::finish_random(magnitude, rng, with_random_sign)
    }

    pub fn random_with_bit_len<R: RngCore + ?Sized>(rng: &mut R, n: u64, with_random_sign: bool) -> Self {
        let magnitude = Magia::random_with_bit_len(rng, n);
        Self::finish_random(magnitude, rng, with_random_sign)
    }

    pub fn random_with_random_bit_len<R: RngCore + ?Sized>(rng: &mut R, max_n: u64, with_random_sign: bool) -> Self {
        // `max_n + 1` would wrap to 0 (and then panic in `%`) when `max_n ==
        // u64::MAX`; widen to u128 so every u64 value is a valid bound.
        let n = (rng.next_u64() as u128 % (max_n as u128 + 1)) as u64;
        Self::random_with_max_bit_len(rng, n, with_random_sign)
    }

    pub fn random_below<R: RngCore + ?Sized>(rng: &mut R, bound: &SignedInt, with_random_sign: bool) -> Self {
        let magnitude = Magia::random_below(rng, &bound.magnitude);
        Self::finish_random(magnitude, rng, with_random_sign)
    }

    fn finish_random<R: RngCore + ?Sized>(magnitude: Magia, rng: &mut R, with_random_sign: bool) -> Self {
        if magnitude.is_zero() {
            return Self::zero();
        }
        let sign = if with_random_sign {
            Sign::from_is_negative(rng.next_u32() & 1 == 1)
        } else {
            Sign::NonNegative
        };
        Self::from_sign_and_magia(sign, magnitude)
    }
}

impl fmt::Display for SignedInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl FromStr for SignedInt {
    type Err = MagiaError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_decimal_str(s)
    }
}

impl From<i32> for SignedInt {
    fn from(v: i32) -> Self {
        Self::from_i32(v)
    }
}
impl From<u32> for SignedInt {
    fn from(v: u32) -> Self {
        Self::from_u32(v)
    }
}
impl From<i64> for SignedInt {
    fn from(v: i64) -> Self {
        Self::from_i64(v)
    }
}
impl From<u64> for SignedInt {
    fn from(v: u64) -> Self {
        Self::from_u64(v)
    }
}

impl std::ops::Neg for SignedInt {
    type Output = SignedInt;
    fn neg(self) -> SignedInt {
        self.negate()
    }
}

impl std::ops::Neg for &SignedInt {
    type Output = SignedInt;
    fn neg(self) -> SignedInt {
        self.negate()
    }
}

impl std::ops::Add<&SignedInt> for &SignedInt {
    type Output = SignedInt;
    fn add(self, rhs: &SignedInt) -> SignedInt {
        SignedInt::add(self, rhs)
    }
}
impl std::ops::Sub<&SignedInt> for &SignedInt {
    type Output = SignedInt;
    fn sub(self, rhs: &SignedInt) -> SignedInt {
        SignedInt::sub(self, rhs)
    }
}
impl std::ops::Mul<&SignedInt> for &SignedInt {
    type Output = SignedInt;
    fn mul(self, rhs: &SignedInt) -> SignedInt {
        SignedInt::mul(self, rhs)
    }
}

impl<T: AsOperand> std::ops::Add<T> for &SignedInt {
    type Output = SignedInt;
    fn add(self, rhs: T) -> SignedInt {
        let (sign, mag) = rhs.as_operand();
        self.add_signed(sign, &Magia::from_u64(mag))
    }
}
impl<T: AsOperand> std::ops::Sub<T> for &SignedInt {
    type Output = SignedInt;
    fn sub(self, rhs: T) -> SignedInt {
        let (sign, mag) = rhs.as_operand();
        self.add_signed(!sign, &Magia::from_u64(mag))
    }
}
impl<T: AsOperand> std::ops::Mul<T> for &SignedInt {
    type Output = SignedInt;
    fn mul(self, rhs: T) -> SignedInt {
        let (sign, mag) = rhs.as_operand();
        SignedInt::from_sign_and_magia(self.sign.xor(sign), self.magnitude.mul(&Magia::from_u64(mag)))
    }
}
