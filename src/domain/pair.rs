//! Pair reserve state and its read-only views.

use serde::{Deserialize, Serialize};

use super::{Amount, Liquidity};

/// Mutable reserve state of one pair.
///
/// Only the settlement engine writes to a `Pair`; the registry hands it
/// out by mutable reference for the duration of a single operation.
///
/// # State
///
/// - `reserve_a` / `reserve_b`: pool holdings of each token, fees included
/// - `liquidity_total`: outstanding liquidity units across all providers
///
/// Both reserves move together under normal use, so
/// `liquidity_total > 0` implies both reserves are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pair {
    pub(crate) reserve_a: Amount,
    pub(crate) reserve_b: Amount,
    pub(crate) liquidity_total: Liquidity,
}

impl Pair {
    /// Creates an empty pair with zero reserves and liquidity.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            reserve_a: Amount::ZERO,
            reserve_b: Amount::ZERO,
            liquidity_total: Liquidity::ZERO,
        }
    }

    /// Returns the current reserve of token A.
    #[must_use]
    pub const fn reserve_a(&self) -> Amount {
        self.reserve_a
    }

    /// Returns the current reserve of token B.
    #[must_use]
    pub const fn reserve_b(&self) -> Amount {
        self.reserve_b
    }

    /// Returns the total outstanding liquidity units.
    #[must_use]
    pub const fn liquidity_total(&self) -> Liquidity {
        self.liquidity_total
    }

    /// Returns `(reserve_in, reserve_out)` for a swap direction.
    #[must_use]
    pub const fn reserves_for(&self, direction: SwapDirection) -> (Amount, Amount) {
        match direction {
            SwapDirection::AToB => (self.reserve_a, self.reserve_b),
            SwapDirection::BToA => (self.reserve_b, self.reserve_a),
        }
    }

    /// Returns `true` if either reserve is zero.
    #[must_use]
    pub const fn has_zero_reserve(&self) -> bool {
        self.reserve_a.is_zero() || self.reserve_b.is_zero()
    }

    /// Returns a read-only snapshot.
    #[must_use]
    pub const fn view(&self) -> PairView {
        PairView {
            reserve_a: self.reserve_a,
            reserve_b: self.reserve_b,
            liquidity_total: self.liquidity_total,
        }
    }
}

/// Snapshot of a pair returned by `get_pair_data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairView {
    /// Reserve of token A.
    pub reserve_a: Amount,
    /// Reserve of token B.
    pub reserve_b: Amount,
    /// Total outstanding liquidity units.
    pub liquidity_total: Liquidity,
}

/// Direction of a swap relative to the pair's token order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapDirection {
    /// Sell token A, receive token B.
    AToB,
    /// Sell token B, receive token A.
    BToA,
}

/// A provider's share of a pair's liquidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProviderPosition {
    /// Liquidity units currently held.
    pub liquidity_provided: Liquidity,
}

/// Token amounts returned by a liquidity withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
    /// Amount of token A released.
    pub amount_a: Amount,
    /// Amount of token B released.
    pub amount_b: Amount,
}
