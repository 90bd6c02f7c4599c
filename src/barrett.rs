//! L3: Barrett reduction for repeated reductions against one fixed modulus
//! (spec.md §4.5).

use std::cmp::Ordering;

use crate::error::{MagiaError, MagiaResult};
use crate::magia::Magia;
use crate::sign::Sign;
use crate::signed_int::SignedInt;

/// A precomputed reciprocal of a fixed modulus `m > 1`. `remainder(x)` is
/// valid only for `0 <= x < m^2` — this is not a general `mod` operation
/// (spec.md §4.5's hard precondition).
pub struct Barrett {
    modulus: Magia,
    k_bits: u64,
    mu: Magia,
    m_squared: Magia,
}

impl Barrett {
    pub fn new(m: &SignedInt) -> MagiaResult<Self> {
        if m.is_negative() || m.magia().cmp_magnitude(&Magia::from_u64(1)) != Ordering::Greater {
            return Err(MagiaError::invalid("Barrett::new requires m > 1"));
        }
        let modulus = m.magia().clone();
        let k_bits = modulus.bit_len();
        let numerator = Magia::with_set_bit(2 * k_bits);
        let (mu, _) = numerator.div_rem(&modulus)?;
        let m_squared = modulus.mul(&modulus);

        Ok(Barrett {
            modulus,
            k_bits,
            mu,
            m_squared,
        })
    }

    pub fn remainder(&self, x: &SignedInt) -> MagiaResult<SignedInt> {
        if x.is_negative() {
            return Err(MagiaError::BarrettPreconditionViolated(
                "x must be non-negative".to_string(),
            ));
        }
        if x.magia().cmp_magnitude(&self.m_squared) != Ordering::Less {
            return Err(MagiaError::BarrettPreconditionViolated(
                "x must be less than m^2".to_string(),
            ));
        }

        if x.magia().cmp_magnitude(&self.modulus) == Ordering::Less {
            return Ok(x.clone());
        }

        let q = x.magia().mul(&self.mu).shift_right(2 * self.k_bits);
        let qm = q.mul(&self.modulus);
        let mut r = x.magia().sub(&qm);

        // The approximation error in `mu` guarantees at most one correction
        // is needed; a second is applied defensively.
        for _ in 0..2 {
            if r.cmp_magnitude(&self.modulus) == Ordering::Less {
                break;
            }
            r = r.sub(&self.modulus);
        }

        Ok(SignedInt::from_sign_and_magia(Sign::NonNegative, r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_modulus_not_greater_than_one() {
        assert!(Barrett::new(&SignedInt::from_u64(1)).is_err());
        assert!(Barrett::new(&SignedInt::from_i64(-5)).is_err());
    }

    #[test]
    fn remainder_matches_seed_scenario() {
        let m = SignedInt::from_decimal_str("12345678901234567890").unwrap();
        let x = SignedInt::from_decimal_str("123456789012345678901234567890").unwrap();
        let barrett = Barrett::new(&m).unwrap();
        let (_, expected) = x.div_rem(&m).unwrap();
        assert_eq!(barrett.remainder(&x).unwrap(), expected);
    }

    #[test]
    fn remainder_rejects_out_of_precondition_inputs() {
        let m = SignedInt::from_u64(1000);
        let barrett = Barrett::new(&m).unwrap();
        assert!(barrett.remainder(&SignedInt::from_i64(-1)).is_err());
        let m_squared = m.mul(&m);
        assert!(barrett.remainder(&m_squared).is_err());
    }

    #[test]
    fn boundary_values_match_expected_residues() {
        let m = SignedInt::from_u64(97);
        let barrett = Barrett::new(&m).unwrap();
        let m_minus_one = m.sub(&SignedInt::one());
        assert_eq!(barrett.remainder(&m_minus_one).unwrap(), m_minus_one);
        assert_eq!(barrett.remainder(&m).unwrap(), SignedInt::zero());
        let m_squared_minus_one = m.mul(&m).sub(&SignedInt::one());
        assert_eq!(barrett.remainder(&m_squared_minus_one).unwrap(), m_minus_one);
    }
}
