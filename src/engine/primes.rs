use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

use super::{EngineError, SerializableInteger};

/// Witness set that makes Miller–Rabin exact for every `u64`.
const MR_WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Deterministic primality test.
///
/// Values up to `u32::MAX` are trial-divided by odd numbers up to the square
/// root. The rest of the `u64` range uses Miller–Rabin with a fixed witness
/// set, which returns the same answer in logarithmic time. Anything larger is
/// divided as a big integer; in practice those only arrive from JSON doubles
/// above 2^53, which are always even and exit on the parity check.
pub fn is_prime(value: &BigInt) -> bool {
    if value.sign() != Sign::Plus {
        return false;
    }
    if let Some(n) = value.to_u64() {
        return is_prime_u64(n);
    }
    if value.is_even() {
        return false;
    }

    let limit = value.sqrt();
    let mut divisor = BigInt::from(3u32);
    while divisor <= limit {
        if (value % &divisor).is_zero() {
            return false;
        }
        divisor += 2u32;
    }
    true
}

fn is_prime_u64(n: u64) -> bool {
    if n <= 1 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    if n <= u64::from(u32::MAX) {
        trial_division(n)
    } else {
        miller_rabin(n)
    }
}

/// `n` odd and > 2.
fn trial_division(n: u64) -> bool {
    let limit = n.isqrt();
    let mut divisor = 3u64;
    while divisor <= limit {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// `n` odd and larger than every witness.
fn miller_rabin(n: u64) -> bool {
    if MR_WITNESSES.iter().any(|p| n % p == 0) {
        return false;
    }

    let rounds = (n - 1).trailing_zeros();
    let odd_part = (n - 1) >> rounds;

    'witness: for &a in &MR_WITNESSES {
        let mut x = pow_mod(a, odd_part, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..rounds {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((u128::from(a) * u128::from(b)) % u128::from(m)) as u64
}

fn pow_mod(base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1u64;
    let mut base = base % m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    result
}

/// Keep the primes of `values`, preserving their order.
pub fn prime_filter(values: &[BigInt]) -> Result<Vec<SerializableInteger>, EngineError> {
    if values.is_empty() {
        return Err(EngineError::EmptyInput { field: "prime" });
    }

    Ok(values
        .iter()
        .filter(|v| is_prime(v))
        .map(SerializableInteger::from_bigint)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Vec<BigInt> {
        values.iter().copied().map(BigInt::from).collect()
    }

    fn ints_u64(values: &[u64]) -> Vec<BigInt> {
        values.iter().copied().map(BigInt::from).collect()
    }

    #[test]
    fn small_cases() {
        let primes: Vec<i64> = (-5..=30).filter(|n| is_prime(&BigInt::from(*n))).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn squares_of_primes_are_composite() {
        for p in [3i64, 5, 7, 11, 101, 65_521] {
            assert!(!is_prime(&BigInt::from(p * p)), "{} is composite", p * p);
        }
    }

    #[test]
    fn large_word_sized_prime() {
        // Largest prime below 2^32 and a prime past the safe-integer range.
        assert!(is_prime(&BigInt::from(4_294_967_291u64)));
        assert!(is_prime(&BigInt::from(9_007_199_254_740_997u64)));
        assert!(!is_prime(&BigInt::from(9_007_199_254_740_995u64)));
    }

    #[test]
    fn word_sized_values_are_fast() {
        // Largest prime below 2^64 and the Mersenne prime 2^61 - 1.
        let primes = ints_u64(&[18_446_744_073_709_551_557, 2_305_843_009_213_693_951]);
        let composites = ints_u64(&[
            // 4294967291 * 4294967279, both primes near 2^32.
            18_446_743_979_220_271_189,
            // Strong pseudoprime to every base up to 23.
            3_825_123_056_546_413_051,
            u64::MAX,
        ]);

        let started = std::time::Instant::now();
        let input: Vec<BigInt> = primes.iter().chain(&composites).cloned().collect();
        let out = prime_filter(&input).unwrap();
        let elapsed = started.elapsed();

        let expected: Vec<SerializableInteger> = primes.iter().map(SerializableInteger::from_bigint).collect();
        assert_eq!(out, expected);
        assert!(elapsed < std::time::Duration::from_millis(500), "took {elapsed:?}");
    }

    #[test]
    fn miller_rabin_agrees_with_trial_division() {
        let start = u64::from(u32::MAX) + 2;
        for n in (start..start + 4_000).step_by(2) {
            assert_eq!(miller_rabin(n), trial_division(n), "{n}");
        }
    }

    #[test]
    fn beyond_u64() {
        let even: BigInt = "100000000000000000000".parse().unwrap();
        assert!(!is_prime(&even));
        // 2^64 + 1 = 274177 * 67280421310721
        let composite: BigInt = "18446744073709551617".parse().unwrap();
        assert!(!is_prime(&composite));
    }

    #[test]
    fn filter_preserves_order() {
        let out = prime_filter(&ints(&[1, 2, 3, 4, 5, 6, 7])).unwrap();
        let expected: Vec<SerializableInteger> = [2, 3, 5, 7].into_iter().map(SerializableInteger::from).collect();
        assert_eq!(out, expected);

        let out = prime_filter(&ints(&[13, 4, -7, 2, 13, 0])).unwrap();
        let expected: Vec<SerializableInteger> = [13, 2, 13].into_iter().map(SerializableInteger::from).collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn filter_result_is_subsequence_of_primes() {
        let input = ints(&[97, 98, 99, 100, 101, 1, 0, -2, 103]);
        let out = prime_filter(&input).unwrap();
        let mut cursor = input.iter();
        for v in &out {
            let b = v.to_bigint().unwrap();
            assert!(is_prime(&b));
            assert!(cursor.any(|x| *x == b), "{b} out of order");
        }
    }

    #[test]
    fn filter_without_primes_is_empty() {
        assert!(prime_filter(&ints(&[0, 1, 4, 6, 8, 9])).unwrap().is_empty());
    }

    #[test]
    fn filter_rejects_empty_input() {
        assert_eq!(prime_filter(&[]), Err(EngineError::EmptyInput { field: "prime" }));
    }
}
