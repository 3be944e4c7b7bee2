//! Constant-product settlement (`x · y = k`) with an owner-set input fee.
//!
//! # Swap Algorithm (A → B)
//!
//! 1. `fee = ⌊amount_in × fee_bps / 10 000⌋`
//! 2. `net_input = amount_in − fee`
//! 3. `amount_out = ⌊reserve_b × net_input / (reserve_a + net_input)⌋`
//! 4. `reserve_a += amount_in` (the fee stays in the pool)
//! 5. `reserve_b −= amount_out`
//!
//! # Liquidity Minting
//!
//! - Empty pair: `minted = ⌊√(amount_a × amount_b)⌋`
//! - Otherwise: `minted = ⌊amount_a × liquidity_total / reserve_a⌋`,
//!   measured on side A only (asymmetric deposits are not rebalanced)
//!
//! # Redemption
//!
//! `amount_x = ⌊liquidity × reserve_x / liquidity_total⌋`; rounding dust
//! stays in the pool.
//!
//! # Invariant
//!
//! After every swap `k_after ≥ k_before`: the floor on `amount_out` and
//! the fee portion of `amount_in` both leave extra value in reserves.

use log::debug;

use crate::config::ProtocolFeeConfig;
use crate::domain::{
    Amount, BasisPoints, Liquidity, Pair, PairKey, PositionKey, ProviderId, ProviderPosition,
    SwapDirection, Withdrawal,
};
use crate::error::{DexError, Result};
use crate::math::{CheckedArithmetic, isqrt_product, mul_div};

use super::PositionLedger;

/// A fully computed add-liquidity transition, ready to commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddLiquidityPlan {
    position: PositionKey,
    minted: Liquidity,
    next: Pair,
    next_position: Liquidity,
}

impl AddLiquidityPlan {
    /// Liquidity units the deposit will mint.
    #[must_use]
    pub const fn minted(&self) -> Liquidity {
        self.minted
    }
}

/// A fully computed swap, ready to commit.
///
/// Also serves as a read-only preview of what a swap would pay out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapQuote {
    direction: SwapDirection,
    fee_bps: BasisPoints,
    amount_in: Amount,
    fee: Amount,
    net_input: Amount,
    amount_out: Amount,
    next: Pair,
}

impl SwapQuote {
    /// Direction of the swap.
    #[must_use]
    pub const fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Fee rate in force when the quote was computed.
    #[must_use]
    pub const fn fee_bps(&self) -> BasisPoints {
        self.fee_bps
    }

    /// Gross input, fee included.
    #[must_use]
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Portion of the input retained as fee.
    #[must_use]
    pub const fn fee(&self) -> Amount {
        self.fee
    }

    /// Input that is priced by the curve (`amount_in − fee`).
    #[must_use]
    pub const fn amount_in_net(&self) -> Amount {
        self.net_input
    }

    /// Output paid to the trader.
    #[must_use]
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }
}

/// A fully computed withdrawal, ready to commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveLiquidityPlan {
    position: PositionKey,
    burned: Liquidity,
    withdrawal: Withdrawal,
    next: Pair,
    next_position: Liquidity,
}

impl RemoveLiquidityPlan {
    /// Token amounts the withdrawal will release.
    #[must_use]
    pub const fn withdrawal(&self) -> Withdrawal {
        self.withdrawal
    }
}

/// Applies economic operations to pairs and owns the provider ledger.
///
/// The engine holds the protocol fee state and the position ledger; pairs
/// themselves live in the [`PoolRegistry`](crate::registry::PoolRegistry)
/// and are passed in per call.
///
/// # Example
///
/// ```rust
/// use hydra_dex::config::ProtocolFeeConfig;
/// use hydra_dex::domain::{
///     Amount, Liquidity, Pair, PairKey, ProviderId, SwapDirection, TokenId,
/// };
/// use hydra_dex::engine::SettlementEngine;
///
/// let key = PairKey::new(TokenId::new("a"), TokenId::new("b")).expect("distinct");
/// let alice = ProviderId::new("alice");
/// let mut engine = SettlementEngine::new(ProtocolFeeConfig::new(ProviderId::new("owner")));
/// let mut pair = Pair::empty();
///
/// let (a, b) = (Amount::new(10_000), Amount::new(10_000));
/// let minted = engine
///     .add_liquidity(&key, &mut pair, a, b, Liquidity::ZERO, &alice)
///     .expect("deposit");
/// assert_eq!(minted, Liquidity::new(10_000));
///
/// let out = engine
///     .swap(&mut pair, SwapDirection::AToB, Amount::new(1_000), Amount::new(900))
///     .expect("swap");
/// assert_eq!(out, Amount::new(906));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementEngine {
    fees: ProtocolFeeConfig,
    positions: PositionLedger,
}

impl SettlementEngine {
    /// Creates an engine with an empty ledger.
    #[must_use]
    pub fn new(fees: ProtocolFeeConfig) -> Self {
        Self {
            fees,
            positions: PositionLedger::new(),
        }
    }

    /// Returns the protocol fee state.
    #[must_use]
    pub const fn fees(&self) -> &ProtocolFeeConfig {
        &self.fees
    }

    /// Returns the position ledger.
    #[must_use]
    pub const fn positions(&self) -> &PositionLedger {
        &self.positions
    }

    /// Returns a provider's position in a pair.
    #[must_use]
    pub fn position(&self, key: &PairKey, provider: &ProviderId) -> Option<ProviderPosition> {
        self.positions.get(key, provider)
    }

    // -----------------------------------------------------------------------
    // set_protocol_fee
    // -----------------------------------------------------------------------

    /// Sets the process-wide swap fee.
    ///
    /// # Errors
    ///
    /// - [`DexError::OwnerOnly`] if `caller` is not the owner.
    /// - [`DexError::FeeTooHigh`] above 1000 bp.
    pub fn set_protocol_fee(&mut self, new_fee: BasisPoints, caller: &ProviderId) -> Result<()> {
        self.fees.set_fee(new_fee, caller)
    }

    // -----------------------------------------------------------------------
    // add_liquidity
    // -----------------------------------------------------------------------

    /// Computes the effect of depositing `amount_a`/`amount_b` into `pair`.
    ///
    /// # Errors
    ///
    /// - [`DexError::ZeroAmount`] if either amount is zero.
    /// - [`DexError::SlippageExceeded`] if fewer than `min_liquidity`
    ///   units would be minted.
    /// - [`DexError::Overflow`] if a reserve or total would exceed `u128`.
    pub fn quote_add_liquidity(
        &self,
        key: &PairKey,
        pair: &Pair,
        amount_a: Amount,
        amount_b: Amount,
        min_liquidity: Liquidity,
        provider: &ProviderId,
    ) -> Result<AddLiquidityPlan> {
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(DexError::ZeroAmount);
        }

        let total = pair.liquidity_total;
        let minted = if total.is_zero() {
            isqrt_product(amount_a.get(), amount_b.get())
        } else if pair.reserve_a.is_zero() {
            // Degenerate pair with outstanding units but no A reserve.
            amount_a.get()
        } else {
            mul_div(amount_a.get(), total.get(), pair.reserve_a.get())?
        };
        let minted = Liquidity::new(minted);

        if minted < min_liquidity {
            return Err(DexError::SlippageExceeded);
        }

        let next = Pair {
            reserve_a: pair
                .reserve_a
                .safe_add(&amount_a, "reserve_a overflow on add")?,
            reserve_b: pair
                .reserve_b
                .safe_add(&amount_b, "reserve_b overflow on add")?,
            liquidity_total: total.safe_add(&minted, "total liquidity overflow")?,
        };

        let position = PositionKey::new(key.clone(), provider.clone());
        let held = self
            .positions
            .position(&position)
            .unwrap_or_default()
            .liquidity_provided;
        let next_position = held.safe_add(&minted, "position overflow")?;

        Ok(AddLiquidityPlan {
            position,
            minted,
            next,
            next_position,
        })
    }

    pub(crate) fn commit_add_liquidity(
        &mut self,
        pair: &mut Pair,
        plan: AddLiquidityPlan,
    ) -> Liquidity {
        debug!(
            "add_liquidity {} by {}: minted {} (reserves {}/{})",
            plan.position.pair(),
            plan.position.provider(),
            plan.minted,
            plan.next.reserve_a,
            plan.next.reserve_b,
        );
        *pair = plan.next;
        self.positions.set(plan.position, plan.next_position);
        plan.minted
    }

    /// Deposits both tokens and credits the minted units to `provider`.
    ///
    /// # Errors
    ///
    /// See [`quote_add_liquidity`](Self::quote_add_liquidity).  On error
    /// neither the pair nor the ledger is modified.
    pub fn add_liquidity(
        &mut self,
        key: &PairKey,
        pair: &mut Pair,
        amount_a: Amount,
        amount_b: Amount,
        min_liquidity: Liquidity,
        provider: &ProviderId,
    ) -> Result<Liquidity> {
        let plan =
            self.quote_add_liquidity(key, pair, amount_a, amount_b, min_liquidity, provider)?;
        Ok(self.commit_add_liquidity(pair, plan))
    }

    // -----------------------------------------------------------------------
    // swap
    // -----------------------------------------------------------------------

    /// Computes a swap of `amount_in` in `direction`.
    ///
    /// The fee rate is read once, here, and carried in the quote.
    ///
    /// # Errors
    ///
    /// - [`DexError::ZeroAmount`] if `amount_in` is zero or the output
    ///   rounds down to zero.
    /// - [`DexError::ZeroLiquidity`] if either reserve is zero.
    /// - [`DexError::SlippageExceeded`] if the output is below
    ///   `min_amount_out`.
    /// - [`DexError::Overflow`] if the input reserve would exceed `u128`.
    pub fn quote_swap(
        &self,
        pair: &Pair,
        direction: SwapDirection,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<SwapQuote> {
        if amount_in.is_zero() {
            return Err(DexError::ZeroAmount);
        }
        if pair.has_zero_reserve() {
            return Err(DexError::ZeroLiquidity);
        }

        let fee_bps = self.fees.fee_bps();
        let fee = fee_bps.apply(amount_in)?;
        let net_input = amount_in.safe_sub(&fee, "net input underflow")?;

        let (reserve_in, reserve_out) = pair.reserves_for(direction);
        let denominator = reserve_in.safe_add(&net_input, "denominator overflow")?;
        let amount_out = Amount::new(mul_div(
            reserve_out.get(),
            net_input.get(),
            denominator.get(),
        )?);

        if amount_out.is_zero() {
            return Err(DexError::ZeroAmount);
        }
        if amount_out < min_amount_out {
            return Err(DexError::SlippageExceeded);
        }

        let new_in = reserve_in.safe_add(&amount_in, "reserve_in overflow after swap")?;
        let new_out = reserve_out.safe_sub(&amount_out, "reserve_out underflow after swap")?;
        let (reserve_a, reserve_b) = match direction {
            SwapDirection::AToB => (new_in, new_out),
            SwapDirection::BToA => (new_out, new_in),
        };

        Ok(SwapQuote {
            direction,
            fee_bps,
            amount_in,
            fee,
            net_input,
            amount_out,
            next: Pair {
                reserve_a,
                reserve_b,
                liquidity_total: pair.liquidity_total,
            },
        })
    }

    pub(crate) fn commit_swap(pair: &mut Pair, quote: SwapQuote) -> Amount {
        debug!(
            "swap {:?}: in {} (fee {} at {}), out {}",
            quote.direction, quote.amount_in, quote.fee, quote.fee_bps, quote.amount_out,
        );
        *pair = quote.next;
        quote.amount_out
    }

    /// Swaps `amount_in` through the pair and returns the output amount.
    ///
    /// # Errors
    ///
    /// See [`quote_swap`](Self::quote_swap).  On error the pair is not
    /// modified.
    pub fn swap(
        &self,
        pair: &mut Pair,
        direction: SwapDirection,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<Amount> {
        let quote = self.quote_swap(pair, direction, amount_in, min_amount_out)?;
        Ok(Self::commit_swap(pair, quote))
    }

    // -----------------------------------------------------------------------
    // remove_liquidity
    // -----------------------------------------------------------------------

    /// Computes the redemption of `liquidity` units held by `provider`.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    ///
    /// 1. [`DexError::NotLiquidityProvider`] if `provider` never deposited.
    /// 2. [`DexError::ZeroAmount`] if `liquidity` is zero.
    /// 3. [`DexError::InsufficientBalance`] if the position is smaller.
    /// 4. [`DexError::NoLiquidity`] if the pair has no outstanding units.
    /// 5. [`DexError::SlippageExceeded`] if either output is below its
    ///    minimum.
    pub fn quote_remove_liquidity(
        &self,
        key: &PairKey,
        pair: &Pair,
        liquidity: Liquidity,
        min_amount_a: Amount,
        min_amount_b: Amount,
        provider: &ProviderId,
    ) -> Result<RemoveLiquidityPlan> {
        let position = PositionKey::new(key.clone(), provider.clone());
        let held = self
            .positions
            .position(&position)
            .ok_or(DexError::NotLiquidityProvider)?
            .liquidity_provided;

        if liquidity.is_zero() {
            return Err(DexError::ZeroAmount);
        }
        if held < liquidity {
            return Err(DexError::InsufficientBalance);
        }
        let total = pair.liquidity_total;
        if total.is_zero() {
            return Err(DexError::NoLiquidity);
        }

        let amount_a = Amount::new(mul_div(liquidity.get(), pair.reserve_a.get(), total.get())?);
        let amount_b = Amount::new(mul_div(liquidity.get(), pair.reserve_b.get(), total.get())?);

        if amount_a < min_amount_a || amount_b < min_amount_b {
            return Err(DexError::SlippageExceeded);
        }

        let next = Pair {
            reserve_a: pair
                .reserve_a
                .safe_sub(&amount_a, "reserve_a underflow on remove")?,
            reserve_b: pair
                .reserve_b
                .safe_sub(&amount_b, "reserve_b underflow on remove")?,
            liquidity_total: total.safe_sub(&liquidity, "total liquidity underflow")?,
        };
        let next_position = held.safe_sub(&liquidity, "position underflow")?;

        Ok(RemoveLiquidityPlan {
            position,
            burned: liquidity,
            withdrawal: Withdrawal { amount_a, amount_b },
            next,
            next_position,
        })
    }

    pub(crate) fn commit_remove_liquidity(
        &mut self,
        pair: &mut Pair,
        plan: RemoveLiquidityPlan,
    ) -> Withdrawal {
        debug!(
            "remove_liquidity {} by {}: burned {}, out {}/{}",
            plan.position.pair(),
            plan.position.provider(),
            plan.burned,
            plan.withdrawal.amount_a,
            plan.withdrawal.amount_b,
        );
        *pair = plan.next;
        self.positions.set(plan.position, plan.next_position);
        plan.withdrawal
    }

    /// Burns `liquidity` units and returns the proportional reserves.
    ///
    /// # Errors
    ///
    /// See [`quote_remove_liquidity`](Self::quote_remove_liquidity).  On
    /// error neither the pair nor the ledger is modified.
    pub fn remove_liquidity(
        &mut self,
        key: &PairKey,
        pair: &mut Pair,
        liquidity: Liquidity,
        min_amount_a: Amount,
        min_amount_b: Amount,
        provider: &ProviderId,
    ) -> Result<Withdrawal> {
        let plan = self.quote_remove_liquidity(
            key,
            pair,
            liquidity,
            min_amount_a,
            min_amount_b,
            provider,
        )?;
        Ok(self.commit_remove_liquidity(pair, plan))
    }
}
