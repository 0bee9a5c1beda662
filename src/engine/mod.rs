//! Numeric engine — pure, synchronous computations over arbitrary-precision
//! integers.
//!
//! Every result leaves the engine as a [`SerializableInteger`], so values past
//! the JavaScript safe-integer range reach JSON clients as exact decimal
//! strings instead of rounded doubles.
//!
//! The list operations re-check their own preconditions (non-empty input)
//! and can be called safely without going through request validation.

mod divisors;
mod fibonacci;
mod primes;
mod serial;

use thiserror::Error;

pub use divisors::{gcd, hcf_of, lcm, lcm_of};
pub use fibonacci::{FIBONACCI_MAX, fibonacci};
pub use primes::{is_prime, prime_filter};
pub use serial::{MAX_SAFE_INTEGER, SerializableInteger};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("{field} must be a non-empty array of integers.")]
    EmptyInput { field: &'static str },

    #[error("fibonacci must be less than or equal to {max}, got {n}.")]
    FibonacciOutOfRange { n: u32, max: u32 },
}
