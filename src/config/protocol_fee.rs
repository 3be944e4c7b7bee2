//! Owner-settable protocol fee.

use log::info;

use crate::domain::{BasisPoints, ProviderId};
use crate::error::{DexError, Result};

/// Fee applied to swaps when no other value is configured (0.30%).
pub const DEFAULT_PROTOCOL_FEE_BPS: u16 = 30;

/// Highest fee the owner may set (10%).
pub const MAX_PROTOCOL_FEE_BPS: u16 = 1_000;

/// The protocol fee scalar and the identity allowed to change it.
///
/// One instance lives inside each settlement engine; there is no global
/// state, so independent engines can run side by side in tests.
///
/// # Examples
///
/// ```
/// use hydra_dex::config::ProtocolFeeConfig;
/// use hydra_dex::domain::{BasisPoints, ProviderId};
///
/// let owner = ProviderId::new("deployer");
/// let mut fees = ProtocolFeeConfig::new(owner.clone());
/// assert_eq!(fees.fee_bps(), BasisPoints::new(30));
///
/// fees.set_fee(BasisPoints::new(50), &owner).expect("owner may set");
/// assert_eq!(fees.fee_bps(), BasisPoints::new(50));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolFeeConfig {
    owner: ProviderId,
    fee_bps: BasisPoints,
}

impl ProtocolFeeConfig {
    /// Creates a fee config with the default 30 bp fee.
    #[must_use]
    pub const fn new(owner: ProviderId) -> Self {
        Self {
            owner,
            fee_bps: BasisPoints::new(DEFAULT_PROTOCOL_FEE_BPS),
        }
    }

    /// Creates a fee config with an explicit starting fee.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::FeeTooHigh`] above [`MAX_PROTOCOL_FEE_BPS`].
    pub fn with_fee(owner: ProviderId, fee_bps: BasisPoints) -> Result<Self> {
        if fee_bps.get() > MAX_PROTOCOL_FEE_BPS {
            return Err(DexError::FeeTooHigh);
        }
        Ok(Self { owner, fee_bps })
    }

    /// Returns the current fee.
    #[must_use]
    pub const fn fee_bps(&self) -> BasisPoints {
        self.fee_bps
    }

    /// Returns the owner identity.
    #[must_use]
    pub const fn owner(&self) -> &ProviderId {
        &self.owner
    }

    /// Replaces the fee.  Only the owner may call this.
    ///
    /// The ownership check runs first, so a non-owner asking for an
    /// out-of-range fee gets [`DexError::OwnerOnly`].
    ///
    /// # Errors
    ///
    /// - [`DexError::OwnerOnly`] if `caller` is not the owner.
    /// - [`DexError::FeeTooHigh`] if `new_fee` exceeds 1000 bp.
    pub fn set_fee(&mut self, new_fee: BasisPoints, caller: &ProviderId) -> Result<()> {
        if *caller != self.owner {
            return Err(DexError::OwnerOnly);
        }
        if new_fee.get() > MAX_PROTOCOL_FEE_BPS {
            return Err(DexError::FeeTooHigh);
        }
        info!("protocol fee changed from {} to {}", self.fee_bps, new_fee);
        self.fee_bps = new_fee;
        Ok(())
    }
}
