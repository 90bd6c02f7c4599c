//! Arbitrary-precision signed integer arithmetic.
//!
//! The core is a multi-limb unsigned magnitude engine (`magia`, kept
//! private), with three thin layers built on top of it:
//!
//! - [`SignedInt`] — the immutable sign-magnitude value callers use for the
//!   public algebra (the full `+ - * / %`, `pow`, `isqrt`, `gcd`/`lcm`,
//!   text and binary I/O).
//! - [`Accumulator`] — a mutable sign-magnitude value that reuses its
//!   backing buffer across a streaming aggregation loop.
//! - [`Barrett`] — a precomputed reciprocal of one fixed modulus, for fast
//!   repeated reduction.
//!
//! Non-goals: primality testing, modular inverse, sub-quadratic
//! multiplication (Karatsuba/Toom/FFT), constant-time arithmetic, and text
//! radices other than 10 and 16.

mod accumulator;
mod barrett;
mod charstream;
mod error;
mod magia;
mod mul_hi;
mod sign;
mod signed_int;

pub use accumulator::Accumulator;
pub use barrett::Barrett;
pub use error::{MagiaError, MagiaResult};
pub use mul_hi::mul_hi;
pub use sign::Sign;
pub use signed_int::{AsOperand, SignedInt};
