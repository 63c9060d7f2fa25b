//! Top-level exchange configuration.

use serde::{Deserialize, Serialize};

use crate::domain::{FeeTier, TokenId};
use crate::error::DexError;

/// Immutable parameters for one exchange deployment.
///
/// # Validation
///
/// - The fee must be a valid percentage strictly below 100%; a 100% fee
///   would zero out every swap input and make the pricing formula
///   degenerate.
///
/// # Examples
///
/// ```
/// use prism_dex::config::DexConfig;
/// use prism_dex::domain::FeeTier;
///
/// let config = DexConfig::new(FeeTier::STANDARD, None).expect("valid config");
/// assert_eq!(config.fee(), FeeTier::STANDARD);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DexConfig {
    fee: FeeTier,
    /// Routing intermediary for two-hop paths.  `None` means "use the
    /// vault's wrapped native token", which is the usual deployment.
    base_asset: Option<TokenId>,
}

impl DexConfig {
    /// Creates a new `DexConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::ArithmeticOverflow`] if the fee is at or
    /// above 100%.
    pub fn new(fee: FeeTier, base_asset: Option<TokenId>) -> crate::error::Result<Self> {
        let config = Self { fee, base_asset };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::ArithmeticOverflow`] if the fee is at or
    /// above 100%.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.fee.basis_points().complement() == 0 {
            return Err(DexError::ArithmeticOverflow("fee at or above 100%"));
        }
        Ok(())
    }

    /// Returns the swap fee every pool charges.
    #[must_use]
    pub const fn fee(&self) -> FeeTier {
        self.fee
    }

    /// Returns the configured routing base asset, if overridden.
    #[must_use]
    pub const fn base_asset(&self) -> Option<TokenId> {
        self.base_asset
    }
}

impl Default for DexConfig {
    fn default() -> Self {
        Self {
            fee: FeeTier::STANDARD,
            base_asset: None,
        }
    }
}
