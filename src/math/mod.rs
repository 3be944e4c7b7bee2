//! Integer arithmetic for settlement.
//!
//! This module provides [`CheckedArithmetic`] for overflow-safe reserve
//! and liquidity updates, plus [`mul_div`] and [`isqrt_product`] which
//! form products in 256 bits before dividing or taking a root.
//!
//! There is no floating-point path: every result is an exact floor (or
//! explicitly requested ceiling) of the true rational value.

mod checked;
mod wide;

pub use checked::CheckedArithmetic;
pub use wide::{isqrt_product, mul_div};
