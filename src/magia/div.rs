//! Multi-limb division: Knuth's Algorithm D (TAOCP vol. 2, §4.3.1), plus the
//! single-limb-divisor fast path (spec.md §4.1.6).

use std::cmp::Ordering;

use super::arith::{cmp, mutate_add, mutate_reverse_sub, trim};
use super::bits::{shift_left_fixed, shift_right};

/// Divides `x` by the single limb `d`, returning `(quotient, remainder)`.
pub(crate) fn div_scalar_u32(x: &[u32], d: u32) -> (Vec<u32>, u32) {
    super::arith::div_scalar_u32(x, d)
}

/// Long division for a multi-limb divisor. Returns `(quotient, remainder)`.
///
/// `x` and `y` are little-endian, trimmed magnitudes with `y` nonempty.
/// `y.len() == 1` is delegated to the scalar fast path; everything else goes
/// through Algorithm D: normalize so the divisor's top limb has its high bit
/// set, estimate each quotient digit from the top two or three limbs of the
/// remaining dividend, then correct the estimate downward by at most 2 via
/// trial subtraction.
pub(crate) fn divmod_knuth(x: &[u32], y: &[u32]) -> (Vec<u32>, Vec<u32>) {
    debug_assert!(!y.is_empty(), "divmod_knuth requires a nonzero divisor");

    if y.len() == 1 {
        let (q, r) = div_scalar_u32(x, y[0]);
        return (q, if r == 0 { Vec::new() } else { vec![r] });
    }

    if cmp(x, y) == Ordering::Less {
        return (Vec::new(), x.to_vec());
    }

    let n = y.len();
    let m = x.len() - n;

    // Normalize: shift both operands left so the divisor's top limb has its
    // high bit set. This keeps each quotient-digit estimate within 2 of the
    // true value.
    let shift = y[n - 1].leading_zeros();
    let divisor = shift_left_fixed(y, shift, n);
    let mut remainder = shift_left_fixed(x, shift, x.len() + 1);
    if remainder.len() < m + n + 1 {
        remainder.resize(m + n + 1, 0);
    }

    let mut quotient = vec![0u32; m + 1];
    let v_top = divisor[n - 1] as u64;
    let v_second = divisor[n - 2] as u64;

    for j in (0..=m).rev() {
        let top = ((remainder[j + n] as u64) << 32) | remainder[j + n - 1] as u64;
        let mut qhat = top / v_top;
        let mut rhat = top % v_top;

        if qhat > u32::MAX as u64 {
            qhat = u32::MAX as u64;
            rhat = top - qhat * v_top;
        }

        while rhat <= u32::MAX as u64
            && qhat * v_second > (rhat << 32) + remainder[j + n - 2] as u64
        {
            qhat -= 1;
            rhat += v_top;
        }

        // Multiply-and-subtract: remainder[j..j+n+1] -= qhat * divisor.
        let mut borrow = 0i64;
        let mut carry = 0u64;
        for i in 0..n {
            let prod = qhat * divisor[i] as u64 + carry;
            carry = prod >> 32;
            let sub = remainder[j + i] as i64 - (prod as u32) as i64 - borrow;
            if sub < 0 {
                remainder[j + i] = (sub + (1i64 << 32)) as u32;
                borrow = 1;
            } else {
                remainder[j + i] = sub as u32;
                borrow = 0;
            }
        }
        let sub = remainder[j + n] as i64 - carry as i64 - borrow;
        let underflow = sub < 0;
        remainder[j + n] = if underflow {
            (sub + (1i64 << 32)) as u32
        } else {
            sub as u32
        };

        if underflow {
            // Estimate was one too high: add the divisor back once and
            // decrement.
            qhat -= 1;
            let carry_out = mutate_add(&mut remainder[j..j + n + 1], n + 1, &divisor);
            remainder[j + n] = remainder[j + n].wrapping_add(carry_out);
        }

        quotient[j] = qhat as u32;
    }

    trim(&mut quotient);
    let mut rem = remainder[..n].to_vec();
    trim(&mut rem);
    let rem = shift_right(&rem, shift as u64);
    (quotient, rem)
}

/// `x := y - x` in place, assuming `y >= x` (a thin wrapper kept here so
/// callers outside this module don't need to reach into `arith` directly
/// for the reverse form). Used by `Magia::reverse_sub_assign_in_place`,
/// spec.md §4.3's "grow and zero-pad self up to operand length and use
/// `mutate_reverse_sub`" path.
pub(crate) fn reverse_sub_in_place(x: &mut Vec<u32>, y: &[u32]) {
    mutate_reverse_sub(x, y);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(vals: &[u32]) -> Vec<u32> {
        vals.to_vec()
    }

    #[test]
    fn single_limb_divisor_matches_scalar_path() {
        let x = v(&[0xFFFF_FFFF, 0xFFFF_FFFF]);
        let (q, r) = divmod_knuth(&x, &[7]);
        let (q2, r2) = div_scalar_u32(&x, 7);
        assert_eq!(q, q2);
        assert_eq!(r, if r2 == 0 { Vec::new() } else { vec![r2] });
    }

    #[test]
    fn multi_limb_exact_division() {
        // (2^64 + 5) * (2^32 + 3) computed by hand via schoolbook mul.
        let divisor = v(&[3, 1]);
        let dividend = super::super::arith::mul(&v(&[5, 0, 1]), &divisor);
        let (q, r) = divmod_knuth(&dividend, &divisor);
        assert_eq!(q, v(&[5, 0, 1]));
        assert!(r.is_empty());
    }

    #[test]
    fn multi_limb_division_with_nonzero_remainder() {
        let divisor = v(&[0xABCD_1234, 0x1]);
        let quotient = v(&[0x1111_1111, 0x2222_2222, 3]);
        let remainder_in = v(&[0x55, 0]);
        let product = super::super::arith::mul(&quotient, &divisor);
        let dividend = super::super::arith::add(&product, &remainder_in);
        let (q, r) = divmod_knuth(&dividend, &divisor);
        assert_eq!(q, quotient);
        assert_eq!(r, v(&[0x55]));
    }

    #[test]
    fn dividend_smaller_than_divisor_yields_zero_quotient() {
        let x = v(&[1, 2]);
        let y = v(&[1, 2, 3]);
        let (q, r) = divmod_knuth(&x, &y);
        assert!(q.is_empty());
        assert_eq!(r, x);
    }
}
