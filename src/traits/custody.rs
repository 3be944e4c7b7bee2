//! Token custody collaborator.
//!
//! [`Custody`] is called by the [`Exchange`](crate::Exchange) once a
//! transition has been fully computed and validated, and before it is
//! committed.  A custody error aborts the operation and leaves every
//! reserve and position untouched.
//!
//! # Batch Semantics
//!
//! Each call moves a whole batch of `(token, amount)` legs.  Implementors
//! **must** apply a batch all-or-nothing: if any leg fails, no leg takes
//! effect.  Adding liquidity, for instance, collects both tokens in one
//! call so that a provider can never end up having paid only one side.

use crate::domain::{Amount, ProviderId, TokenId};
use crate::error::DexError;

/// Trait for the ledger that holds the underlying token balances.
///
/// # Implementors
///
/// - [`ExternalEscrow`](crate::custody::ExternalEscrow): amounts are
///   escrowed by an outside ledger before the operation arrives
/// - [`InMemoryCustody`](crate::custody::InMemoryCustody): a simple
///   balance book for simulation and tests
///
/// # Errors
///
/// Implementations report refusals as [`DexError::TransferFailed`].
pub trait Custody {
    /// Moves every `(token, amount)` leg from `from` into `vault`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::TransferFailed`] if any leg cannot be funded;
    /// no leg is applied in that case.
    fn collect(
        &mut self,
        from: &ProviderId,
        vault: &ProviderId,
        legs: &[(TokenId, Amount)],
    ) -> Result<(), DexError>;

    /// Moves every `(token, amount)` leg from `vault` out to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::TransferFailed`] if the vault cannot cover
    /// any leg; no leg is applied in that case.
    fn release(
        &mut self,
        vault: &ProviderId,
        to: &ProviderId,
        legs: &[(TokenId, Amount)],
    ) -> Result<(), DexError>;
}
