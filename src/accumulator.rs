//! L2: the mutable accumulator for streaming aggregation (spec.md §4.3).
//!
//! Every mutating method takes `&mut self`, which makes concurrent mutation
//! a compile-time impossibility rather than a documented hazard (spec.md
//! §5). Self-aliasing multiplication (`a *= a`) is similarly ruled out by
//! the borrow checker for the two-accumulator form; [`Accumulator::square_in_place`]
//! is the dedicated, alias-free path for squaring an accumulator against
//! itself.

use crate::magia::Magia;
use crate::sign::Sign;
use crate::signed_int::SignedInt;

use std::cmp::Ordering;

/// Capacity is grown in round groups of 4 limbs and never shrinks (spec.md
/// §4.3).
pub struct Accumulator {
    sign: Sign,
    magnitude: Magia,
    /// Holds a multiplication/squaring result before it is swapped into
    /// `magnitude`, so a multi-limb `*=`/`square_in_place` never has both its
    /// read and write ends aliasing the same buffer (spec.md §4.3's `*=`
    /// contract: "multiply into scratch then swap scratch and primary
    /// buffer").
    scratch: Magia,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator {
    pub fn new() -> Self {
        Accumulator {
            sign: Sign::NonNegative,
            magnitude: Magia::zero(),
            scratch: Magia::zero(),
        }
    }

    pub fn set_zero(&mut self) {
        self.sign = Sign::NonNegative;
        self.magnitude.assign_in_place(&Magia::zero());
    }

    pub fn set(&mut self, v: &SignedInt) {
        self.sign = v.sign();
        self.magnitude.assign_in_place(v.magia());
        self.magnitude.reserve_rounded(self.magnitude.active_len());
    }

    pub fn set_from_accumulator(&mut self, other: &Accumulator) {
        self.sign = other.sign;
        self.magnitude.assign_in_place(&other.magnitude);
    }

    /// Copies out the active limbs (spec.md §4.3): the returned `SignedInt`
    /// never sees this accumulator's reserved slack.
    pub fn to_signed_int(&self) -> SignedInt {
        SignedInt::from_sign_and_magia(
            self.sign,
            Magia::from_limbs(self.magnitude.as_limbs().to_vec()),
        )
    }

    /// Merges `other_sign, other_magnitude` into `(sign, magnitude)` in
    /// place. A free function over split fields, rather than a `&mut self`
    /// method, so `add_square_of` can pass `&self.scratch` for
    /// `other_magnitude` while mutating `self.sign`/`self.magnitude` — the
    /// borrow checker accepts disjoint field borrows passed as separate
    /// arguments, but not the same split routed through a `&mut self`
    /// method call.
    fn mutate_add_fields(
        sign: &mut Sign,
        magnitude: &mut Magia,
        other_sign: Sign,
        other_magnitude: &Magia,
    ) {
        if magnitude.is_zero() {
            *sign = other_sign;
            magnitude.assign_in_place(other_magnitude);
        } else if *sign == other_sign {
            magnitude.add_assign_in_place(other_magnitude);
        } else {
            match magnitude.cmp_magnitude(other_magnitude) {
                Ordering::Greater | Ordering::Equal => {
                    magnitude.sub_assign_in_place(other_magnitude);
                }
                Ordering::Less => {
                    *sign = other_sign;
                    magnitude.reverse_sub_assign_in_place(other_magnitude);
                }
            }
        }
        if magnitude.is_zero() {
            *sign = Sign::NonNegative;
        }
    }

    fn mutate_add(&mut self, other_sign: Sign, other_magnitude: &Magia) {
        Self::mutate_add_fields(&mut self.sign, &mut self.magnitude, other_sign, other_magnitude);
    }

    pub fn add_assign_value(&mut self, v: &SignedInt) {
        self.mutate_add(v.sign(), v.magia());
    }

    pub fn sub_assign_value(&mut self, v: &SignedInt) {
        self.mutate_add(!v.sign(), v.magia());
    }

    pub fn add_assign_accumulator(&mut self, other: &Accumulator) {
        self.mutate_add(other.sign, &other.magnitude);
    }

    pub fn sub_assign_accumulator(&mut self, other: &Accumulator) {
        self.mutate_add(!other.sign, &other.magnitude);
    }

    fn mutate_mul(&mut self, other_sign: Sign, other_magnitude: &Magia) {
        self.magnitude
            .mul_into_scratch_and_swap(other_magnitude, &mut self.scratch);
        self.sign = if self.magnitude.is_zero() {
            Sign::NonNegative
        } else {
            self.sign.xor(other_sign)
        };
    }

    pub fn mul_assign_value(&mut self, v: &SignedInt) {
        self.mutate_mul(v.sign(), v.magia());
    }

    pub fn mul_assign_accumulator(&mut self, other: &Accumulator) {
        self.mutate_mul(other.sign, &other.magnitude);
    }

    pub fn mul_assign_scalar_u64(&mut self, v: u64) {
        self.magnitude
            .mul_assign_scalar_u64_in_place(v, &mut self.scratch);
        if self.magnitude.is_zero() {
            self.sign = Sign::NonNegative;
        }
    }

    /// Squares the accumulator's current value in place, via `scratch` so
    /// the read and write ends never alias.
    pub fn square_in_place(&mut self) {
        self.magnitude.square_into_scratch_and_swap(&mut self.scratch);
        self.sign = Sign::NonNegative;
    }

    /// Squares `v` into scratch first, then adds — safe even when `v`'s
    /// magnitude is the very one currently held by this accumulator, since
    /// the square is computed before `self.magnitude`/`self.sign` are
    /// touched.
    pub fn add_square_of(&mut self, v: &SignedInt) {
        Magia::square_other_into(v.magia(), &mut self.scratch);
        Self::mutate_add_fields(&mut self.sign, &mut self.magnitude, Sign::NonNegative, &self.scratch);
    }

    /// Adds `|v|`, ignoring `v`'s sign.
    pub fn add_abs_value_of(&mut self, v: &SignedInt) {
        self.mutate_add(Sign::NonNegative, v.magia());
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude.is_zero()
    }
}
