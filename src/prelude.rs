//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use hydra_dex::prelude::*;
//! ```

pub use crate::Exchange;

pub use crate::domain::{
    Amount, BasisPoints, Liquidity, PairKey, PairView, ProviderId, ProviderPosition, SwapDirection,
    TokenId, Withdrawal,
};

pub use crate::traits::Custody;

pub use crate::custody::{ExternalEscrow, InMemoryCustody};

pub use crate::config::EngineConfig;

pub use crate::engine::{Operation, Outcome, SwapQuote};

pub use crate::error::{DexError, Result};
