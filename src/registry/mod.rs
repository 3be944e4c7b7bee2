//! Pool registry: the set of pairs and their reserve state.
//!
//! The [`PoolRegistry`] creates pairs, resolves an ordered pair of tokens
//! to its mutable [`Pair`](crate::domain::Pair), and answers read-only
//! price and reserve queries.  It never changes reserves itself; that is
//! the settlement engine's job.

mod pool_registry;

pub use pool_registry::PoolRegistry;
