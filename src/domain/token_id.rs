//! Opaque identifiers for assets and participants.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a fungible asset, typically a contract principal such as
/// `ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.token-a`.
///
/// The engine never parses the identifier; two `TokenId`s are equal iff
/// their text is equal.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::TokenId;
///
/// let a = TokenId::new("SP000.token-a");
/// assert_eq!(a.as_str(), "SP000.token-a");
/// assert_ne!(a, TokenId::new("SP000.token-b"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(String);

impl TokenId {
    /// Creates a `TokenId` from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a caller: a liquidity provider, a trader, or the owner.
///
/// Signature verification happens outside the engine; by the time a
/// `ProviderId` reaches an operation it is trusted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(String);

impl ProviderId {
    /// Creates a `ProviderId` from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identity text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the identity text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
