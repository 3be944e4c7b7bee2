//! Per-provider liquidity balances.

use std::collections::HashMap;

use crate::domain::{Liquidity, PairKey, PositionKey, ProviderId, ProviderPosition};
use crate::error::Result;
use crate::math::CheckedArithmetic;

/// Ledger of every provider's liquidity units, per pair.
///
/// Positions are created on first deposit and never removed, even once
/// drained to zero; a zero position still counts as "is a provider".
///
/// # Invariant
///
/// For every pair, the sum of its positions equals the pair's
/// `liquidity_total`.  The settlement engine is the only writer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionLedger {
    positions: HashMap<PositionKey, ProviderPosition>,
}

impl PositionLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the provider's position, or `None` if they never deposited.
    #[must_use]
    pub fn get(&self, pair: &PairKey, provider: &ProviderId) -> Option<ProviderPosition> {
        self.positions
            .get(&PositionKey::new(pair.clone(), provider.clone()))
            .copied()
    }

    /// Sum of all positions recorded for `pair`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`](crate::error::DexError::Overflow) if the sum exceeds `u128`.
    pub fn total_for_pair(&self, pair: &PairKey) -> Result<Liquidity> {
        self.positions
            .iter()
            .filter(|(k, _)| k.pair() == pair)
            .try_fold(Liquidity::ZERO, |acc, (_, p)| {
                acc.safe_add(&p.liquidity_provided, "position sum overflow")
            })
    }

    /// Writes a provider's balance, creating the position if absent.
    pub(crate) fn set(&mut self, key: PositionKey, liquidity: Liquidity) {
        self.positions
            .entry(key)
            .or_default()
            .liquidity_provided = liquidity;
    }

    /// Looks up a position by composite key.
    pub(crate) fn position(&self, key: &PositionKey) -> Option<ProviderPosition> {
        self.positions.get(key).copied()
    }
}
