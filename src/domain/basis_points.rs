//! Basis-point representation for fee rates.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Amount;
use crate::error::Result;
use crate::math::mul_div;

/// Denominator that represents 100%.
pub const BPS_DENOMINATOR: u128 = 10_000;

/// A rate expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// The protocol fee is stored as `BasisPoints`; the swap path applies it
/// to the gross input with [`apply`](Self::apply).
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::{Amount, BasisPoints};
///
/// let fee = BasisPoints::new(30);
/// let charged = fee.apply(Amount::new(1_000)).expect("no overflow");
/// assert_eq!(charged, Amount::new(3));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BasisPoints(u16);

impl BasisPoints {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// Creates a new `BasisPoints` from a raw `u16` value.
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Returns the underlying `u16` value.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }

    /// Computes `⌊amount × self / 10 000⌋`.
    ///
    /// The product is formed in 256 bits, so large amounts never overflow
    /// on the intermediate.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`](crate::error::DexError::Overflow) if
    /// the quotient does not fit in `u128` (only possible above 100%).
    pub fn apply(&self, amount: Amount) -> Result<Amount> {
        mul_div(amount.get(), u128::from(self.0), BPS_DENOMINATOR).map(Amount::new)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
