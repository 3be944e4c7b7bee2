//! The exchange façade: registry, settlement engine and custody together.

use log::{debug, error, warn};

use crate::config::EngineConfig;
use crate::custody::ExternalEscrow;
use crate::domain::{
    Amount, BasisPoints, Liquidity, PairKey, PairView, ProviderId, ProviderPosition,
    SwapDirection, TokenId, Withdrawal,
};
use crate::engine::{Operation, Outcome, SettlementEngine, SwapQuote};
use crate::error::{DexError, Result};
use crate::registry::PoolRegistry;
use crate::traits::Custody;

/// A complete constant-product exchange.
///
/// Every mutating call follows the same sequence: resolve the pair, quote
/// the transition, move tokens through the [`Custody`] collaborator, then
/// commit.  If any step fails the registry, the fee state and every
/// provider position are left exactly as they were.
///
/// Mutation goes through `&mut self`, so at most one operation is ever in
/// flight against a given exchange.
///
/// # Example
///
/// ```rust
/// use hydra_dex::Exchange;
/// use hydra_dex::config::EngineConfig;
/// use hydra_dex::domain::{Amount, Liquidity, ProviderId, TokenId};
///
/// let owner = ProviderId::new("deployer");
/// let alice = ProviderId::new("alice");
/// let (a, b) = (TokenId::new("token-a"), TokenId::new("token-b"));
///
/// let mut dex = Exchange::new(EngineConfig::new(owner).expect("valid owner"))
///     .expect("valid config");
/// dex.create_pair(&a, &b).expect("new pair");
/// dex.add_liquidity(&a, &b, Amount::new(10_000), Amount::new(10_000), Liquidity::ZERO, &alice)
///     .expect("deposit");
///
/// let out = dex
///     .swap_a_for_b(&a, &b, Amount::new(1_000), Amount::new(900), &alice)
///     .expect("swap");
/// assert_eq!(out, Amount::new(906));
/// assert_eq!(dex.get_price(&a, &b), Ok(0));
/// ```
#[derive(Debug, Clone)]
pub struct Exchange<C: Custody = ExternalEscrow> {
    config: EngineConfig,
    registry: PoolRegistry,
    engine: SettlementEngine,
    custody: C,
}

impl Exchange<ExternalEscrow> {
    /// Creates an exchange whose token movements are escrowed externally.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`EngineConfig::validate`].
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_custody(config, ExternalEscrow)
    }
}

impl<C: Custody> Exchange<C> {
    /// Creates an exchange that moves tokens through `custody`.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`EngineConfig::validate`].
    pub fn with_custody(config: EngineConfig, custody: C) -> Result<Self> {
        config.validate()?;
        let engine = SettlementEngine::new(config.fee_config()?);
        debug!(
            "exchange ready: owner {}, vault {}, fee {}",
            config.owner(),
            config.vault(),
            config.protocol_fee_bps(),
        );
        Ok(Self {
            config,
            registry: PoolRegistry::new(),
            engine,
            custody,
        })
    }

    /// Returns the configuration the exchange was built from.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the pool registry.
    #[must_use]
    pub const fn registry(&self) -> &PoolRegistry {
        &self.registry
    }

    /// Returns the settlement engine.
    #[must_use]
    pub const fn engine(&self) -> &SettlementEngine {
        &self.engine
    }

    /// Returns the custody collaborator.
    #[must_use]
    pub const fn custody(&self) -> &C {
        &self.custody
    }

    /// Returns the custody collaborator for funding accounts.
    pub fn custody_mut(&mut self) -> &mut C {
        &mut self.custody
    }

    // -- queries ---------------------------------------------------------------

    /// Returns `⌊reserve_b / reserve_a⌋` for the pair.
    ///
    /// # Errors
    ///
    /// - [`DexError::PairNotFound`] if the pair does not exist.
    /// - [`DexError::ZeroLiquidity`] if either reserve is zero.
    pub fn get_price(&self, token_a: &TokenId, token_b: &TokenId) -> Result<u128> {
        self.registry.get_price(token_a, token_b)
    }

    /// Returns the pair's reserves and outstanding liquidity.
    #[must_use]
    pub fn get_pair_data(&self, token_a: &TokenId, token_b: &TokenId) -> Option<PairView> {
        self.registry.get_pair(token_a, token_b)
    }

    /// Returns `provider`'s position in the pair.
    #[must_use]
    pub fn get_liquidity_provider_data(
        &self,
        token_a: &TokenId,
        token_b: &TokenId,
        provider: &ProviderId,
    ) -> Option<ProviderPosition> {
        let key = PairKey::new(token_a.clone(), token_b.clone()).ok()?;
        self.engine.position(&key, provider)
    }

    /// Returns the fee currently applied to swaps.
    #[must_use]
    pub const fn protocol_fee_bps(&self) -> BasisPoints {
        self.engine.fees().fee_bps()
    }

    /// Previews a swap without moving tokens or changing reserves.
    ///
    /// # Errors
    ///
    /// [`DexError::PairNotFound`], then any error from
    /// [`SettlementEngine::quote_swap`].
    pub fn quote_swap(
        &self,
        token_a: &TokenId,
        token_b: &TokenId,
        direction: SwapDirection,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<SwapQuote> {
        let key = self.registry.resolve(token_a, token_b)?;
        let pair = self.registry.pair(&key)?;
        self.engine
            .quote_swap(pair, direction, amount_in, min_amount_out)
    }

    // -- operations ----------------------------------------------------------

    /// Registers an empty pair.
    ///
    /// # Errors
    ///
    /// - [`DexError::SameToken`] if both tokens are equal.
    /// - [`DexError::PairExists`] if the ordered pair already exists.
    pub fn create_pair(&mut self, token_a: &TokenId, token_b: &TokenId) -> Result<()> {
        self.registry
            .create_pair(token_a.clone(), token_b.clone())
            .map(|_| ())
            .inspect_err(|e| rejected("create-pair", e))
    }

    /// Collects both tokens from `provider` and mints liquidity units.
    ///
    /// # Errors
    ///
    /// - [`DexError::PairNotFound`] if the pair does not exist.
    /// - Any error from [`SettlementEngine::quote_add_liquidity`].
    /// - [`DexError::TransferFailed`] if custody refuses either leg.
    pub fn add_liquidity(
        &mut self,
        token_a: &TokenId,
        token_b: &TokenId,
        amount_a: Amount,
        amount_b: Amount,
        min_liquidity: Liquidity,
        provider: &ProviderId,
    ) -> Result<Liquidity> {
        self.settle_add(token_a, token_b, amount_a, amount_b, min_liquidity, provider)
            .inspect_err(|e| rejected("add-liquidity", e))
    }

    /// Sells `amount_in` of token A for token B.
    ///
    /// # Errors
    ///
    /// - [`DexError::PairNotFound`] if the pair does not exist, including
    ///   when both tokens are equal.
    /// - Any error from [`SettlementEngine::quote_swap`].
    /// - [`DexError::TransferFailed`] if custody refuses either leg.  If the
    ///   input cannot be refunded either, the error says so and the input
    ///   stays with the vault.
    pub fn swap_a_for_b(
        &mut self,
        token_a: &TokenId,
        token_b: &TokenId,
        amount_in: Amount,
        min_amount_out: Amount,
        trader: &ProviderId,
    ) -> Result<Amount> {
        self.settle_swap(
            token_a,
            token_b,
            SwapDirection::AToB,
            amount_in,
            min_amount_out,
            trader,
        )
        .inspect_err(|e| rejected("swap-a-for-b", e))
    }

    /// Sells `amount_in` of token B for token A.
    ///
    /// # Errors
    ///
    /// Same as [`swap_a_for_b`](Self::swap_a_for_b).
    pub fn swap_b_for_a(
        &mut self,
        token_a: &TokenId,
        token_b: &TokenId,
        amount_in: Amount,
        min_amount_out: Amount,
        trader: &ProviderId,
    ) -> Result<Amount> {
        self.settle_swap(
            token_a,
            token_b,
            SwapDirection::BToA,
            amount_in,
            min_amount_out,
            trader,
        )
        .inspect_err(|e| rejected("swap-b-for-a", e))
    }

    /// Burns `liquidity` units and releases both tokens to `provider`.
    ///
    /// # Errors
    ///
    /// - [`DexError::PairNotFound`] if the pair does not exist.
    /// - Any error from [`SettlementEngine::quote_remove_liquidity`].
    /// - [`DexError::TransferFailed`] if the vault cannot cover the release.
    pub fn remove_liquidity(
        &mut self,
        token_a: &TokenId,
        token_b: &TokenId,
        liquidity: Liquidity,
        min_amount_a: Amount,
        min_amount_b: Amount,
        provider: &ProviderId,
    ) -> Result<Withdrawal> {
        self.settle_remove(
            token_a,
            token_b,
            liquidity,
            min_amount_a,
            min_amount_b,
            provider,
        )
        .inspect_err(|e| rejected("remove-liquidity", e))
    }

    /// Sets the protocol fee.
    ///
    /// # Errors
    ///
    /// - [`DexError::OwnerOnly`] if `caller` is not the owner.
    /// - [`DexError::FeeTooHigh`] above 1000 bp.
    pub fn set_protocol_fee_percent(
        &mut self,
        fee_bps: BasisPoints,
        caller: &ProviderId,
    ) -> Result<()> {
        self.engine
            .set_protocol_fee(fee_bps, caller)
            .inspect_err(|e| rejected("set-protocol-fee-percent", e))
    }

    /// Applies one [`Operation`] on behalf of `caller`.
    ///
    /// # Errors
    ///
    /// Whatever the named operation returns.
    pub fn apply(&mut self, caller: &ProviderId, operation: Operation) -> Result<Outcome> {
        debug!("{caller} applies {}", operation.name());
        match operation {
            Operation::CreatePair { token_a, token_b } => self
                .create_pair(&token_a, &token_b)
                .map(|()| Outcome::PairCreated),
            Operation::AddLiquidity {
                token_a,
                token_b,
                amount_a,
                amount_b,
                min_liquidity,
            } => self
                .add_liquidity(&token_a, &token_b, amount_a, amount_b, min_liquidity, caller)
                .map(Outcome::LiquidityMinted),
            Operation::SwapAForB {
                token_a,
                token_b,
                amount_in,
                min_amount_out,
            } => self
                .swap_a_for_b(&token_a, &token_b, amount_in, min_amount_out, caller)
                .map(Outcome::Swapped),
            Operation::SwapBForA {
                token_a,
                token_b,
                amount_in,
                min_amount_out,
            } => self
                .swap_b_for_a(&token_a, &token_b, amount_in, min_amount_out, caller)
                .map(Outcome::Swapped),
            Operation::RemoveLiquidity {
                token_a,
                token_b,
                liquidity,
                min_amount_a,
                min_amount_b,
            } => self
                .remove_liquidity(
                    &token_a,
                    &token_b,
                    liquidity,
                    min_amount_a,
                    min_amount_b,
                    caller,
                )
                .map(Outcome::LiquidityRemoved),
            Operation::SetProtocolFeePercent { fee_bps } => self
                .set_protocol_fee_percent(fee_bps, caller)
                .map(|()| Outcome::FeeUpdated),
        }
    }

    // -- settlement ----------------------------------------------------------

    fn settle_add(
        &mut self,
        token_a: &TokenId,
        token_b: &TokenId,
        amount_a: Amount,
        amount_b: Amount,
        min_liquidity: Liquidity,
        provider: &ProviderId,
    ) -> Result<Liquidity> {
        let key = self.registry.resolve(token_a, token_b)?;
        let pair = self.registry.pair_mut(&key)?;
        let plan = self.engine.quote_add_liquidity(
            &key,
            pair,
            amount_a,
            amount_b,
            min_liquidity,
            provider,
        )?;

        self.custody.collect(
            provider,
            self.config.vault(),
            &[(token_a.clone(), amount_a), (token_b.clone(), amount_b)],
        )?;

        Ok(self.engine.commit_add_liquidity(pair, plan))
    }

    fn settle_swap(
        &mut self,
        token_a: &TokenId,
        token_b: &TokenId,
        direction: SwapDirection,
        amount_in: Amount,
        min_amount_out: Amount,
        trader: &ProviderId,
    ) -> Result<Amount> {
        let key = self.registry.resolve(token_a, token_b)?;
        let pair = self.registry.pair_mut(&key)?;
        let quote = self
            .engine
            .quote_swap(pair, direction, amount_in, min_amount_out)?;

        let (token_in, token_out) = match direction {
            SwapDirection::AToB => (token_a, token_b),
            SwapDirection::BToA => (token_b, token_a),
        };
        let vault = self.config.vault();
        let input = [(token_in.clone(), quote.amount_in())];

        self.custody.collect(trader, vault, &input)?;
        if let Err(e) =
            self.custody
                .release(vault, trader, &[(token_out.clone(), quote.amount_out())])
        {
            // Hand the input back so the trader is not left short.
            if let Err(refund) = self.custody.release(vault, trader, &input) {
                error!("swap to {trader}: output release failed ({e}), refund failed ({refund})");
                return Err(DexError::TransferFailed(
                    "output release refused and input refund failed",
                ));
            }
            warn!("swap output to {trader} refused, input refunded: {e}");
            return Err(e);
        }

        Ok(SettlementEngine::commit_swap(pair, quote))
    }

    fn settle_remove(
        &mut self,
        token_a: &TokenId,
        token_b: &TokenId,
        liquidity: Liquidity,
        min_amount_a: Amount,
        min_amount_b: Amount,
        provider: &ProviderId,
    ) -> Result<Withdrawal> {
        let key = self.registry.resolve(token_a, token_b)?;
        let pair = self.registry.pair_mut(&key)?;
        let plan = self.engine.quote_remove_liquidity(
            &key,
            pair,
            liquidity,
            min_amount_a,
            min_amount_b,
            provider,
        )?;

        let out = plan.withdrawal();
        self.custody.release(
            self.config.vault(),
            provider,
            &[
                (token_a.clone(), out.amount_a),
                (token_b.clone(), out.amount_b),
            ],
        )?;

        Ok(self.engine.commit_remove_liquidity(pair, plan))
    }
}

fn rejected(operation: &str, err: &DexError) {
    debug!("{operation} rejected with code {}: {err}", err.code());
}
