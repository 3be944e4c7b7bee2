//! Engine configuration.
//!
//! [`EngineConfig`] is the declarative blueprint an exchange is built
//! from (owner identity, initial protocol fee, custody vault).
//! [`ProtocolFeeConfig`] is the live, owner-mutable fee state derived
//! from it and consulted by every swap.

mod engine_config;
mod protocol_fee;

pub use engine_config::{DEFAULT_VAULT, EngineConfig};
pub use protocol_fee::{DEFAULT_PROTOCOL_FEE_BPS, MAX_PROTOCOL_FEE_BPS, ProtocolFeeConfig};
