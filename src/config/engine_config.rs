//! Declarative configuration for an exchange instance.

use log::warn;
use serde::{Deserialize, Serialize};

use super::{DEFAULT_PROTOCOL_FEE_BPS, MAX_PROTOCOL_FEE_BPS, ProtocolFeeConfig};
use crate::domain::{BasisPoints, ProviderId};
use crate::error::{DexError, Result};

/// Custody account that holds pool-side balances when none is configured.
pub const DEFAULT_VAULT: &str = "hydra-dex.vault";

/// Blueprint for an [`Exchange`](crate::Exchange).
///
/// # Validation
///
/// - `owner` must be non-empty.
/// - `protocol_fee_bps` must not exceed 1000 bp.
/// - `vault` must be non-empty and differ from `owner`.
///
/// # Examples
///
/// ```
/// use hydra_dex::config::EngineConfig;
///
/// let cfg = EngineConfig::from_toml_str(r#"
///     owner = "deployer"
///     protocol_fee_bps = 25
/// "#).expect("valid config");
/// assert_eq!(cfg.protocol_fee_bps().get(), 25);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    owner: ProviderId,
    #[serde(default = "default_fee")]
    protocol_fee_bps: BasisPoints,
    #[serde(default = "default_vault")]
    vault: ProviderId,
}

fn default_fee() -> BasisPoints {
    BasisPoints::new(DEFAULT_PROTOCOL_FEE_BPS)
}

fn default_vault() -> ProviderId {
    ProviderId::new(DEFAULT_VAULT)
}

impl EngineConfig {
    /// Creates a config with the default fee and vault.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidConfiguration`] if `owner` is empty.
    pub fn new(owner: ProviderId) -> Result<Self> {
        let config = Self {
            owner,
            protocol_fee_bps: default_fee(),
            vault: default_vault(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy with a different starting fee.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::FeeTooHigh`] above 1000 bp.
    pub fn with_protocol_fee(mut self, fee: BasisPoints) -> Result<Self> {
        self.protocol_fee_bps = fee;
        self.validate()?;
        Ok(self)
    }

    /// Returns a copy with a different custody vault identity.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidConfiguration`] if the vault is empty or
    /// equals the owner.
    pub fn with_vault(mut self, vault: ProviderId) -> Result<Self> {
        self.vault = vault;
        self.validate()?;
        Ok(self)
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidConfiguration`] if the document is malformed.
    /// - Any error from [`validate`](Self::validate).
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(|e| {
            warn!("rejecting engine config: {e}");
            DexError::InvalidConfiguration("malformed TOML document")
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidConfiguration`] for an empty owner or vault, or
    ///   a vault equal to the owner.
    /// - [`DexError::FeeTooHigh`] if the fee exceeds 1000 bp.
    pub fn validate(&self) -> Result<()> {
        if self.owner.is_empty() {
            return Err(DexError::InvalidConfiguration("owner must be non-empty"));
        }
        if self.vault.is_empty() {
            return Err(DexError::InvalidConfiguration("vault must be non-empty"));
        }
        if self.vault == self.owner {
            return Err(DexError::InvalidConfiguration(
                "vault must differ from owner",
            ));
        }
        if self.protocol_fee_bps.get() > MAX_PROTOCOL_FEE_BPS {
            return Err(DexError::FeeTooHigh);
        }
        Ok(())
    }

    /// Returns the owner identity.
    #[must_use]
    pub const fn owner(&self) -> &ProviderId {
        &self.owner
    }

    /// Returns the starting protocol fee.
    #[must_use]
    pub const fn protocol_fee_bps(&self) -> BasisPoints {
        self.protocol_fee_bps
    }

    /// Returns the custody vault identity.
    #[must_use]
    pub const fn vault(&self) -> &ProviderId {
        &self.vault
    }

    /// Builds the live fee state described by this config.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::FeeTooHigh`] above 1000 bp.
    pub fn fee_config(&self) -> Result<ProtocolFeeConfig> {
        ProtocolFeeConfig::with_fee(self.owner.clone(), self.protocol_fee_bps)
    }
}
