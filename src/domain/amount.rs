//! Raw token amount with checked arithmetic.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A raw token quantity in the token's smallest unit.
///
/// Reserves, deposits, swap inputs and outputs are all `Amount`s.  Every
/// helper is checked: overflow, underflow and division by zero produce
/// `None` rather than wrapping or panicking.  Products are formed with
/// [`mul_div`](crate::math::mul_div) instead.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::Amount;
///
/// let reserve = Amount::new(10_000);
/// let out = Amount::new(906);
/// assert_eq!(reserve.checked_sub(&out), Some(Amount::new(9_094)));
/// assert_eq!(reserve.checked_div(&Amount::new(3)), Some(Amount::new(3_333)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Creates a new `Amount` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked floor division. Returns `None` if `divisor` is zero.
    #[must_use]
    pub const fn checked_div(&self, divisor: &Self) -> Option<Self> {
        match self.0.checked_div(divisor.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
