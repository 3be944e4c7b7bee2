//! In-memory balance book.

use std::collections::HashMap;

use log::trace;

use crate::domain::{Amount, ProviderId, TokenId};
use crate::error::DexError;
use crate::math::CheckedArithmetic;
use crate::traits::Custody;

/// A token balance book keyed by `(holder, token)`.
///
/// Useful for simulations and tests: fund accounts with
/// [`credit`](Self::credit), run operations through an exchange, then
/// inspect balances with [`balance_of`](Self::balance_of).
///
/// # Examples
///
/// ```
/// use hydra_dex::custody::InMemoryCustody;
/// use hydra_dex::domain::{Amount, ProviderId, TokenId};
///
/// let mut book = InMemoryCustody::new();
/// let alice = ProviderId::new("alice");
/// let token = TokenId::new("token-a");
/// book.credit(&alice, &token, Amount::new(10_000)).expect("no overflow");
/// assert_eq!(book.balance_of(&alice, &token), Amount::new(10_000));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryCustody {
    balances: HashMap<(ProviderId, TokenId), Amount>,
}

impl InMemoryCustody {
    /// Creates an empty balance book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints `amount` of `token` to `holder`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the balance would exceed `u128`.
    pub fn credit(
        &mut self,
        holder: &ProviderId,
        token: &TokenId,
        amount: Amount,
    ) -> Result<(), DexError> {
        let entry = self
            .balances
            .entry((holder.clone(), token.clone()))
            .or_default();
        *entry = entry.safe_add(&amount, "custody balance overflow")?;
        Ok(())
    }

    /// Returns the balance of `token` held by `holder` (zero if unknown).
    pub fn balance_of(&self, holder: &ProviderId, token: &TokenId) -> Amount {
        self.balances
            .get(&(holder.clone(), token.clone()))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn transfer(
        &mut self,
        from: &ProviderId,
        to: &ProviderId,
        legs: &[(TokenId, Amount)],
    ) -> Result<(), DexError> {
        // Net the batch per token so a repeated token is checked against
        // its combined amount.
        let mut totals: HashMap<&TokenId, Amount> = HashMap::new();
        for (token, amount) in legs {
            let total = totals.entry(token).or_default();
            *total = total.safe_add(amount, "custody batch overflow")?;
        }

        // Validate every leg before touching any balance.
        for (token, amount) in &totals {
            if self.balance_of(from, token) < *amount {
                return Err(DexError::TransferFailed("insufficient token balance"));
            }
            let _ = self
                .balance_of(to, token)
                .safe_add(amount, "custody balance overflow")?;
        }

        for (token, amount) in totals {
            let debit = self.balance_of(from, token).safe_sub(&amount, "custody debit")?;
            self.balances.insert((from.clone(), token.clone()), debit);
            let credit = self.balance_of(to, token).safe_add(&amount, "custody credit")?;
            self.balances.insert((to.clone(), token.clone()), credit);
            trace!("custody moved {amount} {token} from {from} to {to}");
        }
        Ok(())
    }
}

impl Custody for InMemoryCustody {
    fn collect(
        &mut self,
        from: &ProviderId,
        vault: &ProviderId,
        legs: &[(TokenId, Amount)],
    ) -> Result<(), DexError> {
        self.transfer(from, vault, legs)
    }

    fn release(
        &mut self,
        vault: &ProviderId,
        to: &ProviderId,
        legs: &[(TokenId, Amount)],
    ) -> Result<(), DexError> {
        self.transfer(vault, to, legs)
    }
}
