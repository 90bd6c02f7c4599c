//! Uniform random magnitude generation (spec.md §4.1.10), built on the
//! caller-supplied generator via `rand`'s [`RngCore`] trait rather than a
//! crate-owned source of entropy.

use std::cmp::Ordering;

use rand::RngCore;

use super::arith::cmp;
use super::bits::bit_len;
use super::arith::trim;

fn fill_random_limbs<R: RngCore + ?Sized>(rng: &mut R, n: usize) -> Vec<u32> {
    let mut limbs = vec![0u32; n];
    for limb in limbs.iter_mut() {
        *limb = rng.next_u32();
    }
    limbs
}

/// A uniformly random magnitude in `[0, 2^max_bit_len)`.
pub(crate) fn random_with_max_bit_len<R: RngCore + ?Sized>(rng: &mut R, max_bit_len: u64) -> Vec<u32> {
    if max_bit_len == 0 {
        return Vec::new();
    }
    let n = max_bit_len.div_ceil(32) as usize;
    let mut limbs = fill_random_limbs(rng, n);
    let extra_bits = (n as u64 * 32) - max_bit_len;
    if extra_bits > 0 {
        let top = n - 1;
        limbs[top] &= u32::MAX >> extra_bits;
    }
    trim(&mut limbs);
    limbs
}

/// A uniformly random magnitude whose bit length is exactly `bit_len`
/// (the top bit is forced on).
pub(crate) fn random_with_bit_len<R: RngCore + ?Sized>(rng: &mut R, bit_len_target: u64) -> Vec<u32> {
    if bit_len_target == 0 {
        return Vec::new();
    }
    let needed = bit_len_target.div_ceil(32) as usize;
    let mut limbs = random_with_max_bit_len(rng, bit_len_target);
    limbs.resize(needed, 0);
    let top_idx = ((bit_len_target - 1) / 32) as usize;
    let top_bit = (bit_len_target - 1) % 32;
    limbs[top_idx] |= 1 << top_bit;
    limbs
}

/// A uniformly random magnitude strictly less than `bound`, via rejection
/// sampling over values the same bit length as `bound`.
pub(crate) fn random_below<R: RngCore + ?Sized>(rng: &mut R, bound: &[u32]) -> Vec<u32> {
    if bound.is_empty() {
        return Vec::new();
    }
    let bl = bit_len(bound);
    loop {
        let candidate = random_with_max_bit_len(rng, bl);
        if cmp(&candidate, bound) == Ordering::Less {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn random_with_bit_len_has_the_exact_bit_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for target in [1u64, 7, 32, 33, 64, 97] {
            let v = random_with_bit_len(&mut rng, target);
            assert_eq!(bit_len(&v), target);
        }
    }

    #[test]
    fn random_with_max_bit_len_never_exceeds_the_bound() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let v = random_with_max_bit_len(&mut rng, 50);
            assert!(bit_len(&v) <= 50);
        }
    }

    #[test]
    fn random_below_is_always_strictly_less() {
        let mut rng = StdRng::seed_from_u64(5);
        let bound = vec![0x1234_5678u32, 1];
        for _ in 0..50 {
            let v = random_below(&mut rng, &bound);
            assert_eq!(cmp(&v, &bound), Ordering::Less);
        }
    }

    #[test]
    fn random_below_empty_bound_yields_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(random_below(&mut rng, &[]).is_empty());
    }
}
