//! Registry of pairs keyed by ordered token identity.

use std::collections::BTreeMap;

use log::debug;

use crate::domain::{Pair, PairKey, PairView, TokenId};
use crate::error::{DexError, Result};

/// Owns every [`Pair`] keyed by its ordered [`PairKey`].
///
/// Pairs are never removed: a drained pair keeps its entry with zero
/// reserves and can be refilled later.
///
/// # Example
///
/// ```rust
/// use hydra_dex::domain::TokenId;
/// use hydra_dex::registry::PoolRegistry;
///
/// let mut registry = PoolRegistry::new();
/// let a = TokenId::new("token-a");
/// let b = TokenId::new("token-b");
///
/// registry.create_pair(a.clone(), b.clone()).expect("new pair");
/// let view = registry.get_pair(&a, &b).expect("exists");
/// assert!(view.reserve_a.is_zero());
/// assert!(registry.get_pair(&b, &a).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolRegistry {
    pairs: BTreeMap<PairKey, Pair>,
}

impl PoolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new empty pair for `(token_a, token_b)`.
    ///
    /// # Errors
    ///
    /// - [`DexError::SameToken`] if both tokens are equal.
    /// - [`DexError::PairExists`] if the ordered pair is already present.
    pub fn create_pair(&mut self, token_a: TokenId, token_b: TokenId) -> Result<PairKey> {
        let key = PairKey::new(token_a, token_b)?;
        if self.pairs.contains_key(&key) {
            return Err(DexError::PairExists);
        }
        debug!("created pair {key}");
        self.pairs.insert(key.clone(), Pair::empty());
        Ok(key)
    }

    /// Returns a snapshot of the pair, or `None` if it was never created.
    #[must_use]
    pub fn get_pair(&self, token_a: &TokenId, token_b: &TokenId) -> Option<PairView> {
        let key = PairKey::new(token_a.clone(), token_b.clone()).ok()?;
        self.pairs.get(&key).map(Pair::view)
    }

    /// Returns `⌊reserve_b / reserve_a⌋`, the integer price of A in B.
    ///
    /// # Errors
    ///
    /// - [`DexError::PairNotFound`] if the pair does not exist.
    /// - [`DexError::ZeroLiquidity`] if either reserve is zero.
    pub fn get_price(&self, token_a: &TokenId, token_b: &TokenId) -> Result<u128> {
        let view = self
            .get_pair(token_a, token_b)
            .ok_or(DexError::PairNotFound)?;
        if view.reserve_a.is_zero() || view.reserve_b.is_zero() {
            return Err(DexError::ZeroLiquidity);
        }
        view.reserve_b
            .checked_div(&view.reserve_a)
            .map(|p| p.get())
            .ok_or(DexError::ZeroLiquidity)
    }

    /// Returns the key of an existing pair.
    ///
    /// Only [`create_pair`](Self::create_pair) reports `SameToken`; every
    /// other operation on `(A, A)` simply finds no pair.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::PairNotFound`] if the tokens are equal or the
    /// ordered pair was never created.
    pub fn resolve(&self, token_a: &TokenId, token_b: &TokenId) -> Result<PairKey> {
        let key = PairKey::new(token_a.clone(), token_b.clone())
            .map_err(|_| DexError::PairNotFound)?;
        if !self.pairs.contains_key(&key) {
            return Err(DexError::PairNotFound);
        }
        Ok(key)
    }

    /// Resolves a key to its pair for read access.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::PairNotFound`] if the pair does not exist.
    pub fn pair(&self, key: &PairKey) -> Result<&Pair> {
        self.pairs.get(key).ok_or(DexError::PairNotFound)
    }

    /// Resolves a key to its pair for the duration of one operation.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::PairNotFound`] if the pair does not exist.
    pub fn pair_mut(&mut self, key: &PairKey) -> Result<&mut Pair> {
        self.pairs.get_mut(key).ok_or(DexError::PairNotFound)
    }

    /// Returns the number of registered pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no pair has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
