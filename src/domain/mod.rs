//! Fundamental domain value types used throughout the exchange engine.
//!
//! Token and caller identities, amounts, liquidity units, fee rates, pair
//! keys and the pair reserve state itself.  Quantities are newtypes over
//! `u128` with checked arithmetic; identities are opaque strings.

mod amount;
mod basis_points;
mod liquidity;
mod pair;
mod pair_key;
mod token_id;

pub use amount::Amount;
pub use basis_points::{BPS_DENOMINATOR, BasisPoints};
pub use liquidity::Liquidity;
pub use pair::{Pair, PairView, ProviderPosition, SwapDirection, Withdrawal};
pub use pair_key::{PairKey, PositionKey};
pub use token_id::{ProviderId, TokenId};
