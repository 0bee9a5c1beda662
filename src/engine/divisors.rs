use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use super::{EngineError, SerializableInteger};

/// Greatest common divisor of `|a|` and `|b|`; `gcd(0, 0) == 0`.
pub fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    let mut x = a.abs();
    let mut y = b.abs();
    while !y.is_zero() {
        let r = &x % &y;
        x = std::mem::replace(&mut y, r);
    }
    x
}

/// Least common multiple, always non-negative; zero if either side is zero.
pub fn lcm(a: &BigInt, b: &BigInt) -> BigInt {
    if a.is_zero() || b.is_zero() {
        return BigInt::zero();
    }
    (a / gcd(a, b) * b).abs()
}

/// Left fold of [`lcm`] seeded with the first element. A one-element list
/// comes back unreduced, sign included.
pub fn lcm_of(values: &[BigInt]) -> Result<SerializableInteger, EngineError> {
    let result = fold(values, "lcm", lcm)?;
    Ok(SerializableInteger::from_bigint(&result))
}

/// Left fold of [`gcd`] seeded with the first element. Always non-negative.
pub fn hcf_of(values: &[BigInt]) -> Result<SerializableInteger, EngineError> {
    let result = fold(values, "hcf", gcd)?;
    Ok(SerializableInteger::from_bigint(&result.abs()))
}

fn fold(
    values: &[BigInt],
    field: &'static str,
    op: fn(&BigInt, &BigInt) -> BigInt,
) -> Result<BigInt, EngineError> {
    let (first, rest) = values.split_first().ok_or(EngineError::EmptyInput { field })?;
    Ok(rest.iter().fold(first.clone(), |acc, v| op(&acc, v)))
}
