//! 256-bit intermediates for products of `u128` quantities.
//!
//! Every settlement formula has the shape `a × b / d` (or `√(a × b)`),
//! where `a` and `b` may each be close to `u128::MAX`.  Forming the
//! product in [`U256`] makes the multiplication total; only the final
//! quotient is narrowed back, and narrowing is checked.

use ethnum::U256;

use crate::error::{DexError, Result};

/// Computes `⌊a × b / d⌋` with a 256-bit intermediate product.
///
/// # Errors
///
/// - [`DexError::Overflow`] if `d` is zero or the quotient exceeds `u128`.
///
/// # Examples
///
/// ```
/// use hydra_dex::math::mul_div;
///
/// assert_eq!(mul_div(u128::MAX, 2, 4), Ok(u128::MAX / 2));
/// assert_eq!(mul_div(10, 1, 3), Ok(3));
/// ```
pub fn mul_div(a: u128, b: u128, d: u128) -> Result<u128> {
    if d == 0 {
        return Err(DexError::Overflow("mul_div division by zero"));
    }
    let product = U256::from(a) * U256::from(b);
    narrow(product / U256::from(d), "mul_div quotient exceeds u128")
}

/// Computes `⌊√(a × b)⌋` exactly, over the full 256-bit product.
///
/// Uses Newton's method on unsigned integers; the result always fits in
/// `u128` because `√((2¹²⁸)²) = 2¹²⁸`.
///
/// # Examples
///
/// ```
/// use hydra_dex::math::isqrt_product;
///
/// assert_eq!(isqrt_product(1_000, 1_000), 1_000);
/// assert_eq!(isqrt_product(2, 1), 1);
/// assert_eq!(isqrt_product(u128::MAX, u128::MAX), u128::MAX);
/// ```
#[must_use]
pub fn isqrt_product(a: u128, b: u128) -> u128 {
    let n = U256::from(a) * U256::from(b);
    let root = isqrt(n);
    // root <= u128::MAX for any product of two u128 values.
    let (_, lo) = root.into_words();
    lo
}

fn isqrt(n: U256) -> U256 {
    if n == U256::ZERO {
        return U256::ZERO;
    }
    let mut x = n;
    // ceil(n / 2) without the n + 1 overflow.
    let mut y = (n >> 1) + (n & U256::ONE);
    while y < x {
        x = y;
        y = (x + n / x) >> 1;
    }
    x
}

fn narrow(value: U256, context: &'static str) -> Result<u128> {
    let (hi, lo) = value.into_words();
    if hi != 0 {
        return Err(DexError::Overflow(context));
    }
    Ok(lo)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    // -- mul_div --------------------------------------------------------------

    #[test]
    fn mul_div_floor() {
        // 10000 * 997 / 10997 = 906.61 -> 906
        assert_eq!(mul_div(10_000, 997, 10_997), Ok(906));
        assert_eq!(mul_div(10, 5, 5), Ok(10));
    }

    #[test]
    fn mul_div_wide_intermediate() {
        // u128::MAX * u128::MAX / u128::MAX must not overflow on the product.
        assert_eq!(mul_div(u128::MAX, u128::MAX, u128::MAX), Ok(u128::MAX));
    }

    #[test]
    fn mul_div_quotient_overflow() {
        let Err(DexError::Overflow(_)) = mul_div(u128::MAX, 2, 1) else {
            panic!("expected Overflow");
        };
    }

    #[test]
    fn mul_div_zero_divisor() {
        assert!(mul_div(1, 1, 0).is_err());
    }

    // -- isqrt_product ---------------------------------------------------------

    #[test]
    fn isqrt_small_values() {
        assert_eq!(isqrt_product(0, 5), 0);
        assert_eq!(isqrt_product(1, 1), 1);
        assert_eq!(isqrt_product(3, 1), 1);
        assert_eq!(isqrt_product(4, 1), 2);
        assert_eq!(isqrt_product(8, 1), 2);
        assert_eq!(isqrt_product(9, 1), 3);
    }

    #[test]
    fn isqrt_geometric_mean() {
        assert_eq!(isqrt_product(1_000, 1_000), 1_000);
        assert_eq!(isqrt_product(100, 400), 200);
        // sqrt(2_000_000) = 1414.2
        assert_eq!(isqrt_product(1_000, 2_000), 1_414);
    }

    #[test]
    fn isqrt_beyond_u128_product() {
        let big = 1u128 << 100;
        assert_eq!(isqrt_product(big, big), big);
        assert_eq!(isqrt_product(u128::MAX, u128::MAX), u128::MAX);
    }

    #[test]
    fn isqrt_is_floor() {
        for (a, b) in [(7u128, 13u128), (999_999, 1_000_001), (u64::MAX as u128, 3)] {
            let r = U256::from(isqrt_product(a, b));
            let n = U256::from(a) * U256::from(b);
            assert!(r * r <= n);
            assert!((r + U256::ONE) * (r + U256::ONE) > n);
        }
    }
}
