//! Exact integer arithmetic backing the principal ideal computations.
//!
//! All helpers work on `i64` values and modular products go through `u128`.
//! Inputs are expected to avoid `i64::MIN`, which lies outside every ring's
//! element domain.

use crate::errors::{AlgebraError, ErrorInfo};

fn overflow(op: &str, lhs: i64, rhs: i64) -> AlgebraError {
    AlgebraError::Domain(
        ErrorInfo::new("overflow", format!("{op} overflows the i64 element range"))
            .with_context("lhs", lhs.to_string())
            .with_context("rhs", rhs.to_string()),
    )
}

/// Returns the non-negative greatest common divisor, with `gcd(0, 0) = 0`.
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        let rem = a % b;
        a = b;
        b = rem;
    }
    a as i64
}

/// Returns the non-negative least common multiple, with `lcm(0, x) = 0`.
pub fn lcm(a: i64, b: i64) -> Result<i64, AlgebraError> {
    if a == 0 || b == 0 {
        return Ok(0);
    }
    let g = gcd(a, b);
    (a / g)
        .checked_mul(b)
        .map(i64::abs)
        .ok_or_else(|| overflow("lcm", a, b))
}

/// Multiplies two elements, failing instead of wrapping.
pub fn checked_mul(a: i64, b: i64) -> Result<i64, AlgebraError> {
    a.checked_mul(b).ok_or_else(|| overflow("product", a, b))
}

/// Returns whether `a` divides `b` in the integers (`0` divides only `0`).
pub fn divides(a: i64, b: i64) -> bool {
    if a == 0 {
        b == 0
    } else {
        b % a == 0
    }
}

const SMALL_PRIMES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((u128::from(a) * u128::from(b)) % u128::from(m)) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut acc = 1 % m;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = mul_mod(acc, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    acc
}

/// Miller-Rabin with the first twelve primes as bases, exact for every `u64`.
fn is_prime_u64(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for p in SMALL_PRIMES {
        if n % p == 0 {
            return n == p;
        }
    }
    let s = (n - 1).trailing_zeros();
    let d = (n - 1) >> s;
    'witness: for a in SMALL_PRIMES {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

fn gcd_u64(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let rem = a % b;
        a = b;
        b = rem;
    }
    a
}

/// Brent's variant of Pollard's rho; `n` must be odd and composite.
fn pollard_rho(n: u64) -> u64 {
    let mut c = 1;
    loop {
        let step = |x: u64| (mul_mod(x, x, n) + c) % n;
        let (mut x, mut y, mut g) = (2u64, 2u64, 1u64);
        while g == 1 {
            x = step(x);
            y = step(step(y));
            g = gcd_u64(x.abs_diff(y), n);
        }
        if g != n {
            return g;
        }
        c += 1;
    }
}

fn split_into(n: u64, primes: &mut Vec<u64>) {
    if n == 1 {
        return;
    }
    if is_prime_u64(n) {
        primes.push(n);
        return;
    }
    let d = pollard_rho(n);
    split_into(d, primes);
    split_into(n / d, primes);
}

/// Prime factorisation of `|n|`, ordered by prime.
///
/// Small factors are removed by trial division and the remaining cofactor is
/// split with Pollard's rho. Returns an empty list for `0`, `1` and `-1`.
pub fn factorize(n: i64) -> Vec<(i64, u32)> {
    let mut rest = n.unsigned_abs();
    let mut primes = Vec::new();
    if rest <= 1 {
        return Vec::new();
    }
    let mut p: u64 = 2;
    while p < 1_000 && p <= rest / p {
        while rest % p == 0 {
            rest /= p;
            primes.push(p);
        }
        p += if p == 2 { 1 } else { 2 };
    }
    split_into(rest, &mut primes);
    primes.sort_unstable();
    let mut factors: Vec<(i64, u32)> = Vec::new();
    for prime in primes {
        match factors.last_mut() {
            Some((last, exp)) if *last as u64 == prime => *exp += 1,
            _ => factors.push((prime as i64, 1)),
        }
    }
    factors
}

/// Distinct prime divisors of `|n|` in increasing order.
pub fn prime_divisors(n: i64) -> Vec<i64> {
    factorize(n).into_iter().map(|(p, _)| p).collect()
}

/// Product of the distinct primes dividing `n`; `0` maps to `0`.
pub fn squarefree_kernel(n: i64) -> i64 {
    if n == 0 {
        return 0;
    }
    prime_divisors(n).into_iter().product()
}

/// Exponent of `p` in `n`, or `None` when `n = 0` (infinite valuation).
pub fn valuation(p: i64, n: i64) -> Option<u32> {
    if n == 0 {
        return None;
    }
    if p.abs() < 2 {
        return Some(0);
    }
    let mut rest = n;
    let mut exp = 0;
    while rest % p == 0 {
        rest /= p;
        exp += 1;
    }
    Some(exp)
}

/// Returns whether `n` is a (positive) prime.
pub fn is_prime(n: i64) -> bool {
    n >= 2 && is_prime_u64(n as u64)
}

/// Least prime not contained in `excluded`.
pub fn least_prime_outside(excluded: &[i64]) -> i64 {
    let mut candidate = 2;
    loop {
        if is_prime(candidate) && !excluded.contains(&candidate) {
            return candidate;
        }
        candidate += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factorize_orders_primes() {
        assert_eq!(factorize(360), vec![(2, 3), (3, 2), (5, 1)]);
        assert_eq!(factorize(-49), vec![(7, 2)]);
        assert!(factorize(1).is_empty());
        assert!(factorize(0).is_empty());
    }

    #[test]
    fn kernel_and_valuation() {
        assert_eq!(squarefree_kernel(12), 6);
        assert_eq!(squarefree_kernel(0), 0);
        assert_eq!(squarefree_kernel(1), 1);
        assert_eq!(valuation(2, 12), Some(2));
        assert_eq!(valuation(5, 12), Some(0));
        assert_eq!(valuation(3, 0), None);
    }

    #[test]
    fn lcm_detects_overflow() {
        assert_eq!(lcm(4, 6).unwrap(), 12);
        assert_eq!(lcm(0, 6).unwrap(), 0);
        assert!(lcm(i64::MAX, i64::MAX - 1).is_err());
    }

    #[test]
    fn large_values_factor_quickly() {
        assert!(is_prime(999_999_999_999_999_989));
        assert!(!is_prime(3_215_031_751));
        assert_eq!(
            factorize(1_000_000_007 * 998_244_353),
            vec![(998_244_353, 1), (1_000_000_007, 1)]
        );
        assert_eq!(
            factorize(i64::MAX),
            vec![(7, 2), (73, 1), (127, 1), (337, 1), (92_737, 1), (649_657, 1)]
        );
        assert_eq!(squarefree_kernel(i64::MAX), i64::MAX / 7);
    }

    #[test]
    fn least_prime_skips_support() {
        assert_eq!(least_prime_outside(&[]), 2);
        assert_eq!(least_prime_outside(&[2, 3]), 5);
    }
}
