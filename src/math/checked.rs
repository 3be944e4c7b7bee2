//! Checked arithmetic trait for domain wrapper types.
//!
//! [`CheckedArithmetic`] turns the `Option`-returning helpers on
//! [`Amount`] and [`Liquidity`] into `Result`s carrying a short context
//! string, so settlement code can chain reserve updates with `?`.
//!
//! # Examples
//!
//! ```
//! use hydra_dex::domain::Amount;
//! use hydra_dex::math::CheckedArithmetic;
//!
//! let reserve = Amount::new(10_000);
//! let next = reserve.safe_add(&Amount::new(1_000), "reserve_in overflow");
//! assert_eq!(next, Ok(Amount::new(11_000)));
//! ```

use crate::domain::{Amount, Liquidity};
use crate::error::{DexError, Result};

/// Fallible addition and subtraction for domain quantities.
///
/// # Contract
///
/// - **No panics**: overflow and underflow produce [`DexError::Overflow`].
/// - **No saturation**: results are exact or an error.
pub trait CheckedArithmetic: Sized {
    /// Checked addition; `context` names the quantity in the error.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the sum exceeds `u128::MAX`.
    fn safe_add(&self, other: &Self, context: &'static str) -> Result<Self>;

    /// Checked subtraction; `context` names the quantity in the error.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self, context: &'static str) -> Result<Self>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self, context: &'static str) -> Result<Self> {
        self.checked_add(other).ok_or(DexError::Overflow(context))
    }

    #[inline]
    fn safe_sub(&self, other: &Self, context: &'static str) -> Result<Self> {
        self.checked_sub(other).ok_or(DexError::Overflow(context))
    }
}

impl CheckedArithmetic for Liquidity {
    #[inline]
    fn safe_add(&self, other: &Self, context: &'static str) -> Result<Self> {
        self.checked_add(other).ok_or(DexError::Overflow(context))
    }

    #[inline]
    fn safe_sub(&self, other: &Self, context: &'static str) -> Result<Self> {
        self.checked_sub(other).ok_or(DexError::Overflow(context))
    }
}
