//! Operations as plain data.

use serde::{Deserialize, Serialize};

use crate::domain::{Amount, BasisPoints, Liquidity, TokenId, Withdrawal};

/// One mutating request against an [`Exchange`](crate::Exchange).
///
/// Tokens are always named in the pair's creation order; `SwapBForA`
/// sells the second token of that pair.
///
/// # Wire Format
///
/// Externally tagged with snake-case variant names (serde's internal
/// tagging cannot carry `u128` amounts):
///
/// ```
/// use hydra_dex::engine::Operation;
///
/// let op: Operation = serde_json::from_str(r#"{
///     "swap_a_for_b": {
///         "token_a": "token-a",
///         "token_b": "token-b",
///         "amount_in": 1000,
///         "min_amount_out": 900
///     }
/// }"#).expect("valid operation");
/// assert_eq!(op.name(), "swap-a-for-b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Register an empty pair.
    CreatePair {
        /// First token of the pair.
        token_a: TokenId,
        /// Second token of the pair.
        token_b: TokenId,
    },
    /// Deposit both tokens and mint liquidity units.
    AddLiquidity {
        /// First token of the pair.
        token_a: TokenId,
        /// Second token of the pair.
        token_b: TokenId,
        /// Amount of token A deposited.
        amount_a: Amount,
        /// Amount of token B deposited.
        amount_b: Amount,
        /// Fewest units the caller accepts.
        min_liquidity: Liquidity,
    },
    /// Sell token A for token B.
    SwapAForB {
        /// First token of the pair.
        token_a: TokenId,
        /// Second token of the pair.
        token_b: TokenId,
        /// Gross amount of token A sold.
        amount_in: Amount,
        /// Least amount of token B the caller accepts.
        min_amount_out: Amount,
    },
    /// Sell token B for token A.
    SwapBForA {
        /// First token of the pair.
        token_a: TokenId,
        /// Second token of the pair.
        token_b: TokenId,
        /// Gross amount of token B sold.
        amount_in: Amount,
        /// Least amount of token A the caller accepts.
        min_amount_out: Amount,
    },
    /// Burn liquidity units for the proportional reserves.
    RemoveLiquidity {
        /// First token of the pair.
        token_a: TokenId,
        /// Second token of the pair.
        token_b: TokenId,
        /// Units to burn.
        liquidity: Liquidity,
        /// Least amount of token A the caller accepts.
        min_amount_a: Amount,
        /// Least amount of token B the caller accepts.
        min_amount_b: Amount,
    },
    /// Change the protocol fee (owner only).
    SetProtocolFeePercent {
        /// New fee in basis points.
        fee_bps: BasisPoints,
    },
}

impl Operation {
    /// Returns the kebab-case operation name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreatePair { .. } => "create-pair",
            Self::AddLiquidity { .. } => "add-liquidity",
            Self::SwapAForB { .. } => "swap-a-for-b",
            Self::SwapBForA { .. } => "swap-b-for-a",
            Self::RemoveLiquidity { .. } => "remove-liquidity",
            Self::SetProtocolFeePercent { .. } => "set-protocol-fee-percent",
        }
    }
}

/// Success value of an applied [`Operation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The pair was registered.
    PairCreated,
    /// Units minted to the caller.
    LiquidityMinted(Liquidity),
    /// Output paid to the caller.
    Swapped(Amount),
    /// Token amounts released to the caller.
    LiquidityRemoved(Withdrawal),
    /// The protocol fee was changed.
    FeeUpdated,
}
