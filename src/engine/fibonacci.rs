use num_bigint::BigUint;
use num_traits::{One, Zero};

use super::{EngineError, SerializableInteger};

/// Upper bound on the number of terms a single request may ask for.
pub const FIBONACCI_MAX: u32 = 100_000;

/// The first `n` terms of 0, 1, 1, 2, 3, 5, …
///
/// Iterative with big-integer accumulation, so no term overflows and the
/// stack depth is constant.
pub fn fibonacci(n: u32) -> Result<Vec<SerializableInteger>, EngineError> {
    if n > FIBONACCI_MAX {
        return Err(EngineError::FibonacciOutOfRange { n, max: FIBONACCI_MAX });
    }

    let mut terms = Vec::with_capacity(n as usize);
    let mut a = BigUint::zero();
    let mut b = BigUint::one();

    for _ in 0..n {
        terms.push(SerializableInteger::from_biguint(&a));
        let next = &a + &b;
        a = std::mem::replace(&mut b, next);
    }

    Ok(terms)
}
