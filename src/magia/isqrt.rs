//! Integer square root (spec.md §4.4): a float-seeded Newton iteration for
//! magnitudes too wide for exact `f64` conversion, and a direct `f64::sqrt`
//! plus a short correction loop for everything that fits.

use std::cmp::Ordering;

use super::arith::{add, cmp, square, sub};
use super::bits::{bit_len, extract_u64_at_bit_index, shift_left, shift_right};
use super::div::divmod_knuth;

const EXACT_F64_BITS: u64 = 53;

pub(crate) fn isqrt(n: &[u32]) -> Vec<u32> {
    if n.is_empty() {
        return Vec::new();
    }
    let bl = bit_len(n);
    if bl <= EXACT_F64_BITS {
        isqrt_small(n)
    } else {
        isqrt_large(n, bl)
    }
}

fn magnitude_to_f64(n: &[u32]) -> f64 {
    let mut acc = 0.0f64;
    for &limb in n.iter().rev() {
        acc = acc * 4294967296.0 + limb as f64;
    }
    acc
}

fn u64_to_magnitude(v: u64) -> Vec<u32> {
    let mut limbs = vec![v as u32, (v >> 32) as u32];
    super::arith::trim(&mut limbs);
    limbs
}

/// Corrects `candidate` so it satisfies `candidate^2 <= n < (candidate+1)^2`,
/// stepping by one in whichever direction the float seed overshot.
fn correct_to_floor_root(mut candidate: Vec<u32>, n: &[u32]) -> Vec<u32> {
    loop {
        if cmp(&square(&candidate), n) == Ordering::Greater {
            candidate = sub(&candidate, &[1]);
            continue;
        }
        let next = add(&candidate, &[1]);
        if cmp(&square(&next), n) != Ordering::Greater {
            candidate = next;
            continue;
        }
        return candidate;
    }
}

fn isqrt_small(n: &[u32]) -> Vec<u32> {
    let approx = magnitude_to_f64(n).sqrt().floor() as u64;
    correct_to_floor_root(u64_to_magnitude(approx), n)
}

/// Newton's method seeded from a float approximation of the top bits: take
/// the leading ~53 bits as a window, compute its `f64` square root, and
/// rescale by half the discarded bit count to get a first guess no smaller
/// than the true root, then iterate `x := floor((x + n/x) / 2)` until it
/// stops decreasing.
fn isqrt_large(n: &[u32], bl: u64) -> Vec<u32> {
    let shift = bl.saturating_sub(EXACT_F64_BITS);
    let window = extract_u64_at_bit_index(n, shift);
    let approx = (window as f64).sqrt();
    let scaled_approx = if shift % 2 == 1 {
        approx * std::f64::consts::SQRT_2
    } else {
        approx
    };
    let half_shift = shift / 2;
    let seed = scaled_approx.ceil() as u64 + 1;
    let mut x = shift_left(&u64_to_magnitude(seed), half_shift);
    if x.is_empty() {
        x = vec![1];
    }

    loop {
        let (q, _) = divmod_knuth(n, &x);
        let sum = add(&x, &q);
        let next = shift_right(&sum, 1);
        if cmp(&next, &x) == Ordering::Less {
            x = next;
        } else {
            break;
        }
    }

    correct_to_floor_root(x, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magia::arith::mul;

    fn v(vals: &[u32]) -> Vec<u32> {
        vals.to_vec()
    }

    #[test]
    fn isqrt_of_zero_and_one() {
        assert!(isqrt(&[]).is_empty());
        assert_eq!(isqrt(&[1]), v(&[1]));
    }

    #[test]
    fn isqrt_of_perfect_square_is_exact() {
        // 89515880^2 = 8013092212174400.
        let root = v(&[89_515_880]);
        let n = mul(&root, &root);
        assert_eq!(isqrt(&n), root);
    }

    #[test]
    fn isqrt_of_non_square_floors() {
        let n = v(&[26]); // floor(sqrt(26)) == 5
        assert_eq!(isqrt(&n), v(&[5]));
    }

    #[test]
    fn isqrt_of_large_magnitude_satisfies_the_bracket() {
        // A value with more than 53 bits, exercising the Newton path.
        let base = v(&[0x9ABC_DEF0, 0x1234_5678, 3]);
        let n = mul(&base, &base);
        let n = add(&n, &v(&[12345]));
        let root = isqrt(&n);
        assert!(cmp(&square(&root), &n) != Ordering::Greater);
        let next = add(&root, &[1]);
        assert_eq!(cmp(&square(&next), &n), Ordering::Greater);
    }
}
