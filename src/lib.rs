//! # Hydra DEX
//!
//! Constant-product exchange engine: a registry of token pairs, a
//! settlement engine that applies liquidity and swap operations with
//! exact integer math, and a custody seam through which token balances
//! are moved.
//!
//! Every operation either commits all of its state changes or returns a
//! typed [`DexError`](error::DexError) carrying a stable numeric code and
//! changes nothing.
//!
//! # Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! hydra-dex = "0.1"
//! ```
//!
//! ## Create a pair, provide liquidity and swap
//!
//! ```rust
//! use hydra_dex::Exchange;
//! use hydra_dex::config::EngineConfig;
//! use hydra_dex::domain::{Amount, BasisPoints, Liquidity, ProviderId, TokenId};
//!
//! // 1. Configure the exchange from TOML
//! let config = EngineConfig::from_toml_str(r#"
//!     owner = "deployer"
//!     protocol_fee_bps = 30
//! "#).expect("valid config");
//! let mut dex = Exchange::new(config).expect("exchange built");
//!
//! // 2. Register the ordered pair (A, B)
//! let usdc = TokenId::new("SP000.usdc");
//! let wstx = TokenId::new("SP000.wstx");
//! dex.create_pair(&usdc, &wstx).expect("new pair");
//!
//! // 3. Seed it: the first deposit mints √(a·b) units
//! let alice = ProviderId::new("alice");
//! let (a, b) = (Amount::new(1_000), Amount::new(1_000));
//! let minted = dex
//!     .add_liquidity(&usdc, &wstx, a, b, Liquidity::new(900), &alice)
//!     .expect("deposit");
//! assert_eq!(minted, Liquidity::new(1_000));
//!
//! // 4. Swap with a slippage floor
//! let out = dex
//!     .swap_a_for_b(&usdc, &wstx, Amount::new(100), Amount::new(80), &alice)
//!     .expect("swap");
//! assert_eq!(out, Amount::new(90));
//!
//! // 5. Only the owner may change the fee
//! let owner = ProviderId::new("deployer");
//! dex.set_protocol_fee_percent(BasisPoints::new(50), &owner).expect("owner");
//! assert_eq!(dex.protocol_fee_bps(), BasisPoints::new(50));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Consumer    │  named calls or Exchange::apply(Operation)
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │   Exchange    │  resolve pair → quote → custody → commit
//! └──┬────┬────┬─┘
//!    │    │    │
//!    ▼    │    ▼
//! ┌──────┐│ ┌─────────┐
//! │Regis-││ │ Custody │  ExternalEscrow, InMemoryCustody
//! │ try  ││ └─────────┘
//! └──────┘▼
//! ┌──────────────┐
//! │  Settlement   │  fee config + position ledger
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │ Domain, Math  │  Amount, Liquidity, PairKey, mul_div, isqrt
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Liquidity`](domain::Liquidity), [`PairKey`](domain::PairKey), etc. |
//! | [`math`]   | Checked arithmetic, 256-bit `mul_div` and integer square root |
//! | [`config`] | [`EngineConfig`](config::EngineConfig) and the live [`ProtocolFeeConfig`](config::ProtocolFeeConfig) |
//! | [`registry`] | [`PoolRegistry`](registry::PoolRegistry): pair creation, lookup and price |
//! | [`engine`] | [`SettlementEngine`](engine::SettlementEngine), [`Operation`](engine::Operation) |
//! | [`traits`] | The [`Custody`](traits::Custody) collaborator seam |
//! | [`custody`] | Custody implementations |
//! | [`error`]  | [`DexError`](error::DexError) with stable numeric codes |
//! | [`prelude`] | Convenience re-exports for common types and traits |
//!
//! # Logging
//!
//! The crate logs through the [`log`] facade and never installs a logger.
//! Commits are logged at `debug`, rejected operations at `debug` with
//! their error code, and fee changes at `info`.

pub mod config;
pub mod custody;
pub mod domain;
pub mod engine;
pub mod error;
mod exchange;
pub mod math;
pub mod prelude;
pub mod registry;
pub mod traits;

pub use exchange::Exchange;
