//! The multi-limb unsigned ALU (spec.md §4.1): `Magia` owns a normalized
//! `Vec<u32>` and dispatches to the free functions in the sibling modules,
//! the way the teacher crate's `Uint256`/`Uint64` dispatch to raw-limb
//! helpers (`sub_mul_limbs`, `div_u128_by_u64`, ...).

pub(crate) mod arith;
pub(crate) mod bits;
pub(crate) mod div;
pub(crate) mod gcd;
pub(crate) mod isqrt;
pub(crate) mod random;
pub(crate) mod serialize;
pub(crate) mod text;

use std::cmp::Ordering;

use rand::RngCore;

use crate::error::{MagiaError, MagiaResult};
use crate::sign::Sign;

pub(crate) use serialize::Endian;

/// An unsigned, arbitrary-precision magnitude: a little-endian sequence of
/// 32-bit limbs. `len` is the *active length* (spec.md §3's "Magnitude
/// buffer (Magia)... an active length distinct from the allocation
/// length"): the top active limb, if any, is non-zero, and every limb at or
/// beyond `len` is always zero (the zero-slop invariant every mutating
/// method below must preserve). `limbs.len() >= len` always; the gap is
/// reserved capacity, present only on `Accumulator`-owned instances that
/// have called `reserve_rounded`. Every value reachable from `SignedInt` has
/// `limbs.len() == len` exactly — `as_limbs()` is the only way to observe
/// the limbs, so the distinction is invisible to callers outside this
/// module.
#[derive(Clone, Default)]
pub(crate) struct Magia {
    limbs: Vec<u32>,
    len: usize,
}

impl std::fmt::Debug for Magia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Magia").field(&self.as_limbs()).finish()
    }
}

impl PartialEq for Magia {
    fn eq(&self, other: &Self) -> bool {
        self.as_limbs() == other.as_limbs()
    }
}

impl Eq for Magia {}

impl std::hash::Hash for Magia {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_limbs().hash(state);
    }
}

impl Magia {
    pub(crate) fn zero() -> Self {
        Magia {
            limbs: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn from_limbs(mut limbs: Vec<u32>) -> Self {
        arith::trim(&mut limbs);
        let len = limbs.len();
        Magia { limbs, len }
    }

    pub(crate) fn from_u64(v: u64) -> Self {
        Magia::from_limbs(vec![v as u32, (v >> 32) as u32])
    }

    pub(crate) fn as_limbs(&self) -> &[u32] {
        &self.limbs[..self.len]
    }

    pub(crate) fn into_limbs(mut self) -> Vec<u32> {
        self.limbs.truncate(self.len);
        self.limbs
    }

    /// Active length: the number of significant limbs, distinct from the
    /// backing store's own (possibly larger) length (spec.md §3).
    pub(crate) fn active_len(&self) -> usize {
        self.len
    }

    /// Grows the backing store, if needed, so it can hold `min_len` active
    /// limbs without reallocating, rounding up to a multiple of 4 limbs
    /// (spec.md §4.3's accumulator grow policy: capacity never shrinks and
    /// grows in round groups of 4). Never shrinks `len` or the backing
    /// store. New limbs are zero, preserving the zero-slop invariant.
    pub(crate) fn reserve_rounded(&mut self, min_len: usize) {
        let rounded = min_len.div_ceil(4) * 4;
        if self.limbs.len() < rounded {
            self.limbs.resize(rounded, 0);
        }
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.len == 0
    }

    /// Overwrites `self` with `other`'s active limbs, reusing `self`'s
    /// existing backing store when it is already large enough (spec.md
    /// §4.3's `set`/`adopt operand` path, generalized to reuse capacity).
    pub(crate) fn assign_in_place(&mut self, other: &Magia) {
        let other_limbs = other.as_limbs();
        if self.limbs.len() < other_limbs.len() {
            self.limbs.resize(other_limbs.len(), 0);
        } else {
            self.limbs[other_limbs.len()..].fill(0);
        }
        self.limbs[..other_limbs.len()].copy_from_slice(other_limbs);
        self.len = other_limbs.len();
    }

    /// Adds `other`'s active limbs into `self` in place, growing the
    /// backing store (rounded per `reserve_rounded`) only when the sum
    /// needs one more limb than `self` currently has active (spec.md
    /// §4.1.1's `mutate_add`).
    pub(crate) fn add_assign_in_place(&mut self, other: &Magia) {
        let other_limbs = other.as_limbs();
        let needed = self.len.max(other_limbs.len());
        self.reserve_rounded(needed + 1);
        let carry = arith::mutate_add(&mut self.limbs, needed, other_limbs);
        self.len = needed;
        if carry != 0 {
            self.limbs[needed] = carry;
            self.len += 1;
        }
        self.trim_active_len();
    }

    /// Subtracts `other`'s active limbs from `self` in place. Precondition:
    /// `self >= other` (spec.md §4.3's same-sign-disagreement subtract
    /// path, in-place form).
    pub(crate) fn sub_assign_in_place(&mut self, other: &Magia) {
        let other_limbs = other.as_limbs();
        debug_assert!(self.len >= other_limbs.len());
        arith::mutate_sub(&mut self.limbs, self.len, other_limbs);
        self.trim_active_len();
    }

    /// Replaces `self` with `other - self` in place (spec.md §4.3: "grow
    /// and zero-pad self up to operand length and use `mutate_reverse_sub`"
    /// for the case where the operand is larger and signs disagree).
    /// Precondition: `other >= self`.
    pub(crate) fn reverse_sub_assign_in_place(&mut self, other: &Magia) {
        self.limbs.truncate(self.len);
        div::reverse_sub_in_place(&mut self.limbs, other.as_limbs());
        self.len = self.limbs.len();
    }

    /// Multiplies `self * other` into `scratch`, then swaps `self` and
    /// `scratch` so `self` holds the product and `scratch` holds the old
    /// magnitude's buffer for reuse next time (spec.md §4.3: "multiply into
    /// scratch then swap scratch and primary buffer").
    pub(crate) fn mul_into_scratch_and_swap(&mut self, other: &Magia, scratch: &mut Magia) {
        arith::mul_into(&mut scratch.limbs, self.as_limbs(), other.as_limbs());
        scratch.len = scratch.limbs.len();
        std::mem::swap(self, scratch);
    }

    /// Squares `self` into `scratch`, then swaps (see
    /// `mul_into_scratch_and_swap`).
    pub(crate) fn square_into_scratch_and_swap(&mut self, scratch: &mut Magia) {
        arith::square_into(&mut scratch.limbs, self.as_limbs());
        scratch.len = scratch.limbs.len();
        std::mem::swap(self, scratch);
    }

    /// Squares `other` into `scratch` without disturbing `self` (spec.md
    /// §4.3's `add_square_of`: "square v into scratch first, then add into
    /// primary magnitude").
    pub(crate) fn square_other_into(other: &Magia, scratch: &mut Magia) {
        arith::square_into(&mut scratch.limbs, other.as_limbs());
        scratch.len = scratch.limbs.len();
    }

    /// Multiplies `self` by a 64-bit scalar via `scratch`, then swaps
    /// (spec.md §4.3: "grow by one or two limbs, multiply, trim").
    pub(crate) fn mul_assign_scalar_u64_in_place(&mut self, v: u64, scratch: &mut Magia) {
        arith::mul_scalar_u64_into(&mut scratch.limbs, self.as_limbs(), v);
        scratch.len = scratch.limbs.len();
        std::mem::swap(self, scratch);
    }

    fn trim_active_len(&mut self) {
        while self.len > 0 && self.limbs[self.len - 1] == 0 {
            self.len -= 1;
        }
    }

    pub(crate) fn bit_len(&self) -> u64 {
        bits::bit_len(self.as_limbs())
    }

    pub(crate) fn bit_len_bigint_style(&self, sign: Sign) -> u64 {
        bits::bit_len_bigint_style(sign, self.as_limbs())
    }

    pub(crate) fn trailing_zero_count(&self) -> i64 {
        bits::trailing_zero_count(self.as_limbs())
    }

    pub(crate) fn bit_population_count(&self) -> u64 {
        bits::bit_population_count(self.as_limbs())
    }

    pub(crate) fn test_bit(&self, n: u64) -> bool {
        bits::test_bit(self.as_limbs(), n)
    }

    /// Sets bit `n`, growing the buffer if needed (spec.md §4.1.3). Drops
    /// any reserved capacity beyond the active length first so the
    /// underlying grow-on-demand helper sees an exactly-trimmed buffer.
    pub(crate) fn set_bit(&mut self, n: u64) {
        self.limbs.truncate(self.len);
        bits::set_bit(&mut self.limbs, n);
        self.len = self.limbs.len();
    }

    pub(crate) fn test_any_bit_in_lower_n(&self, n: u64) -> bool {
        bits::test_any_bit_in_lower_n(self.as_limbs(), n)
    }

    pub(crate) fn with_set_bit(n: u64) -> Self {
        Magia::from_limbs(bits::with_set_bit(n))
    }

    pub(crate) fn with_bit_mask(w: u64) -> Self {
        Magia::from_limbs(bits::with_bit_mask(w))
    }

    pub(crate) fn with_indexed_bit_mask(i: u64, w: u64) -> Self {
        Magia::from_limbs(bits::with_indexed_bit_mask(i, w))
    }

    pub(crate) fn cmp_magnitude(&self, other: &Magia) -> Ordering {
        arith::cmp(self.as_limbs(), other.as_limbs())
    }

    pub(crate) fn add(&self, other: &Magia) -> Magia {
        Magia::from_limbs(arith::add(self.as_limbs(), other.as_limbs()))
    }

    /// Precondition: `self >= other`.
    pub(crate) fn sub(&self, other: &Magia) -> Magia {
        Magia::from_limbs(arith::sub(self.as_limbs(), other.as_limbs()))
    }

    pub(crate) fn mul(&self, other: &Magia) -> Magia {
        Magia::from_limbs(arith::mul(self.as_limbs(), other.as_limbs()))
    }

    pub(crate) fn square(&self) -> Magia {
        Magia::from_limbs(arith::square(self.as_limbs()))
    }

    pub(crate) fn mul_scalar_u64(&self, v: u64) -> Magia {
        Magia::from_limbs(arith::mul_scalar_u64(self.as_limbs(), v))
    }

    /// Long division; `other` must be non-zero. Returns `(quotient,
    /// remainder)`.
    pub(crate) fn div_rem(&self, other: &Magia) -> MagiaResult<(Magia, Magia)> {
        if other.is_zero() {
            return Err(MagiaError::DivisionByZero);
        }
        let (q, r) = div::divmod_knuth(self.as_limbs(), other.as_limbs());
        Ok((Magia::from_limbs(q), Magia::from_limbs(r)))
    }

    pub(crate) fn bitand(&self, other: &Magia) -> Magia {
        Magia::from_limbs(bits::bitand(self.as_limbs(), other.as_limbs()))
    }

    pub(crate) fn bitor(&self, other: &Magia) -> Magia {
        Magia::from_limbs(bits::bitor(self.as_limbs(), other.as_limbs()))
    }

    pub(crate) fn bitxor(&self, other: &Magia) -> Magia {
        Magia::from_limbs(bits::bitxor(self.as_limbs(), other.as_limbs()))
    }

    pub(crate) fn shift_left(&self, n: u64) -> Magia {
        Magia::from_limbs(bits::shift_left(self.as_limbs(), n))
    }

    pub(crate) fn shift_right(&self, n: u64) -> Magia {
        Magia::from_limbs(bits::shift_right(self.as_limbs(), n))
    }

    pub(crate) fn gcd(&self, other: &Magia) -> Magia {
        Magia::from_limbs(gcd::binary_gcd(self.as_limbs(), other.as_limbs()))
    }

    pub(crate) fn isqrt(&self) -> Magia {
        Magia::from_limbs(isqrt::isqrt(self.as_limbs()))
    }

    pub(crate) fn parse_decimal(s: &str) -> MagiaResult<(Sign, Magia)> {
        let (sign, limbs) = text::parse_decimal(s)?;
        Ok((sign, Magia::from_limbs(limbs)))
    }

    pub(crate) fn parse_hex(s: &str) -> MagiaResult<(Sign, Magia)> {
        let (sign, limbs) = text::parse_hex(s)?;
        Ok((sign, Magia::from_limbs(limbs)))
    }

    pub(crate) fn to_decimal_string(&self, sign: Sign) -> String {
        text::to_decimal_string(sign, self.as_limbs())
    }

    pub(crate) fn to_hex_string(&self, sign: Sign) -> String {
        text::to_hex_string(sign, self.as_limbs())
    }

    pub(crate) fn to_binary_bytes(&self, sign: Sign, endian: Endian) -> Vec<u8> {
        serialize::to_binary_bytes(sign, self.as_limbs(), endian)
    }

    pub(crate) fn from_binary_bytes(bytes: &[u8], endian: Endian) -> (Sign, Magia) {
        let (sign, limbs) = serialize::from_binary_bytes(bytes, endian);
        (sign, Magia::from_limbs(limbs))
    }

    /// The general binary encoder (spec.md §6): `is_twos_complement` and
    /// `requested_length` select between the plain/two's-complement and
    /// minimal/padded forms `to_binary_bytes` always takes the default of.
    pub(crate) fn to_binary_bytes_general(
        &self,
        sign: Sign,
        is_twos_complement: bool,
        endian: Endian,
        requested_length: Option<usize>,
    ) -> MagiaResult<Vec<u8>> {
        serialize::encode_binary(sign, self.as_limbs(), is_twos_complement, endian, requested_length)
    }

    pub(crate) fn from_binary_bytes_general(
        bytes: &[u8],
        is_twos_complement: bool,
        endian: Endian,
    ) -> (Sign, Magia) {
        let (sign, limbs) = serialize::decode_binary(bytes, is_twos_complement, endian);
        (sign, Magia::from_limbs(limbs))
    }

    pub(crate) fn random_with_max_bit_len<R: RngCore + ?Sized>(rng: &mut R, n: u64) -> Magia {
        Magia::from_limbs(random::random_with_max_bit_len(rng, n))
    }

    pub(crate) fn random_with_bit_len<R: RngCore + ?Sized>(rng: &mut R, n: u64) -> Magia {
        Magia::from_limbs(random::random_with_bit_len(rng, n))
    }

    pub(crate) fn random_below<R: RngCore + ?Sized>(rng: &mut R, bound: &Magia) -> Magia {
        Magia::from_limbs(random::random_below(rng, bound.as_limbs()))
    }
}
