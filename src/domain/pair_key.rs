//! Ordered pair of distinct tokens, used as the registry key.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{ProviderId, TokenId};
use crate::error::DexError;

/// The ordered `(token_a, token_b)` key identifying a pair.
///
/// Unlike a canonically sorted pair, the order is significant: `(A, B)`
/// and `(B, A)` are two different keys.  Callers must name the tokens in
/// the same order they used at creation.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::{PairKey, TokenId};
///
/// let ab = PairKey::new(TokenId::new("a"), TokenId::new("b")).expect("distinct");
/// let ba = PairKey::new(TokenId::new("b"), TokenId::new("a")).expect("distinct");
/// assert_ne!(ab, ba);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairKey {
    token_a: TokenId,
    token_b: TokenId,
}

impl PairKey {
    /// Creates a key from two tokens in caller order.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::SameToken`] if both tokens are equal.
    pub fn new(token_a: TokenId, token_b: TokenId) -> Result<Self, DexError> {
        if token_a == token_b {
            return Err(DexError::SameToken);
        }
        Ok(Self { token_a, token_b })
    }

    /// Returns the first token.
    #[must_use]
    pub const fn token_a(&self) -> &TokenId {
        &self.token_a
    }

    /// Returns the second token.
    #[must_use]
    pub const fn token_b(&self) -> &TokenId {
        &self.token_b
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.token_a, self.token_b)
    }
}

/// Composite key of a provider's position in one pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PositionKey {
    pair: PairKey,
    provider: ProviderId,
}

impl PositionKey {
    /// Creates a position key.
    #[must_use]
    pub const fn new(pair: PairKey, provider: ProviderId) -> Self {
        Self { pair, provider }
    }

    /// Returns the pair component.
    #[must_use]
    pub const fn pair(&self) -> &PairKey {
        &self.pair
    }

    /// Returns the provider component.
    #[must_use]
    pub const fn provider(&self) -> &ProviderId {
        &self.provider
    }
}
