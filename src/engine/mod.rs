//! Settlement engine: the state transitions of the exchange.
//!
//! [`SettlementEngine`] applies add-liquidity, swap, remove-liquidity and
//! set-fee against a pair resolved by the registry.  Each transition is
//! first *quoted*, computed in full with checked integer math against an
//! immutable view, and only then *committed*.  A failed quote therefore
//! leaves the pair and every position byte-for-byte unchanged.
//!
//! [`Operation`] and [`Outcome`] describe the same transitions as plain
//! data, for callers that receive operations from a transport.

mod operation;
mod positions;
mod settlement;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use operation::{Operation, Outcome};
pub use positions::PositionLedger;
pub use settlement::{AddLiquidityPlan, RemoveLiquidityPlan, SettlementEngine, SwapQuote};
