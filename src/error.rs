//! Unified error types for the Hydra DEX engine.
//!
//! Every fallible operation across the crate returns [`DexError`].  Each
//! variant carries a stable numeric code (see [`DexError::code`]) so that
//! external ledgers and transports can keep using the same taxonomy the
//! on-chain contract reports.
//!
//! A returned error always means the operation was rejected in full: no
//! reserve, liquidity or position value was modified.

use thiserror::Error;

/// Errors produced by the pool registry and the settlement engine.
///
/// # Codes
///
/// | Code | Variant |
/// |------|---------|
/// | 100 | [`OwnerOnly`](Self::OwnerOnly) |
/// | 102 | [`ZeroLiquidity`](Self::ZeroLiquidity) |
/// | 103 | [`InsufficientBalance`](Self::InsufficientBalance) |
/// | 104 | [`ZeroAmount`](Self::ZeroAmount) |
/// | 105 | [`SlippageExceeded`](Self::SlippageExceeded) |
/// | 107 | [`NotLiquidityProvider`](Self::NotLiquidityProvider) |
/// | 108 | [`NoLiquidity`](Self::NoLiquidity) |
/// | 110 | [`PairExists`](Self::PairExists) |
/// | 111 | [`PairNotFound`](Self::PairNotFound) |
/// | 112 | [`SameToken`](Self::SameToken) |
/// | 113 | [`FeeTooHigh`](Self::FeeTooHigh) |
/// | 114 | [`Overflow`](Self::Overflow) |
/// | 115 | [`TransferFailed`](Self::TransferFailed) |
/// | 116 | [`InvalidConfiguration`](Self::InvalidConfiguration) |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DexError {
    /// The caller is not the designated protocol owner.
    #[error("caller is not the protocol owner")]
    OwnerOnly,

    /// One or both pair reserves are zero.
    #[error("pair has zero liquidity on at least one side")]
    ZeroLiquidity,

    /// The provider holds fewer liquidity units than requested.
    #[error("insufficient liquidity balance")]
    InsufficientBalance,

    /// An input amount, or a computed output, is zero.
    #[error("amount must be non-zero")]
    ZeroAmount,

    /// The computed result is below the caller's minimum.
    #[error("slippage bound exceeded")]
    SlippageExceeded,

    /// The caller never deposited into this pair.
    #[error("caller is not a liquidity provider for this pair")]
    NotLiquidityProvider,

    /// The pair has no outstanding liquidity units.
    #[error("pair has no outstanding liquidity")]
    NoLiquidity,

    /// A pair with the same ordered tokens already exists.
    #[error("pair already exists")]
    PairExists,

    /// No pair has been created for the ordered tokens.
    #[error("pair not found")]
    PairNotFound,

    /// Both sides of a pair name the same token.
    #[error("pair requires two distinct tokens")]
    SameToken,

    /// Requested protocol fee exceeds the 1000 bp ceiling.
    #[error("protocol fee exceeds maximum")]
    FeeTooHigh,

    /// Checked arithmetic overflowed or underflowed.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// The custody collaborator refused a transfer.
    #[error("token transfer failed: {0}")]
    TransferFailed(&'static str),

    /// Engine configuration is malformed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

impl DexError {
    /// Returns the stable numeric code for this error.
    #[must_use]
    pub const fn code(&self) -> u32 {
        match self {
            Self::OwnerOnly => 100,
            Self::ZeroLiquidity => 102,
            Self::InsufficientBalance => 103,
            Self::ZeroAmount => 104,
            Self::SlippageExceeded => 105,
            Self::NotLiquidityProvider => 107,
            Self::NoLiquidity => 108,
            Self::PairExists => 110,
            Self::PairNotFound => 111,
            Self::SameToken => 112,
            Self::FeeTooHigh => 113,
            Self::Overflow(_) => 114,
            Self::TransferFailed(_) => 115,
            Self::InvalidConfiguration(_) => 116,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, DexError>;
