//! Validated token configuration types.
//!
//! These are the values that leave the form once every step has validated.
//! They are consumed by the template renderer and the deployment submitter
//! and are never mutated after construction.

use crate::supply::InitialSupply;
use alloy_primitives::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum buy or sell tax, in whole percent.
pub const MAX_TAX_PERCENT: u8 = 20;

/// Required total of all wallet shares, in whole percent.
pub const TOTAL_SHARE_PERCENT: u32 = 100;

/// Core token parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
	pub name: String,
	pub symbol: String,
	/// Supply in whole tokens; scaled by 10^18 on-chain.
	pub initial_supply: InitialSupply,
	pub buy_tax_percent: u8,
	pub sell_tax_percent: u8,
}

/// A wallet receiving a share of the collected tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxWallet {
	pub display_name: String,
	pub address: Address,
	pub share_percent: u8,
}

/// Optional token behaviours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
	pub burn_on_extraction: bool,
	pub max_wallet_enabled: bool,
	pub max_wallet_percent: Decimal,
	pub max_tx_enabled: bool,
	pub max_tx_percent: Decimal,
}

impl FeatureFlags {
	/// Bounds of the max-wallet percentage control.
	pub const MAX_WALLET_BOUNDS: (Decimal, Decimal) = (Decimal::ONE, Decimal::ONE_HUNDRED);
	/// Bounds of the max-transaction percentage control.
	pub const MAX_TX_BOUNDS: (Decimal, Decimal) =
		(Decimal::from_parts(1, 0, 0, false, 1), Decimal::ONE_HUNDRED);

	/// Features that are switched on, in declaration order.
	pub fn enabled(&self) -> Vec<FeatureKey> {
		let mut keys = Vec::new();
		if self.burn_on_extraction {
			keys.push(FeatureKey::Burn);
		}
		if self.max_wallet_enabled {
			keys.push(FeatureKey::MaxWallet);
		}
		if self.max_tx_enabled {
			keys.push(FeatureKey::MaxTx);
		}
		keys
	}
}

impl Default for FeatureFlags {
	fn default() -> Self {
		Self {
			burn_on_extraction: true,
			max_wallet_enabled: false,
			max_wallet_percent: Decimal::TWO,
			max_tx_enabled: false,
			max_tx_percent: Decimal::ONE,
		}
	}
}

/// Identifier of an optional feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKey {
	Burn,
	MaxWallet,
	MaxTx,
}

impl FeatureKey {
	/// Key as it appears in generated source comments.
	pub fn key(&self) -> &'static str {
		match self {
			FeatureKey::Burn => "burn",
			FeatureKey::MaxWallet => "maxWallet",
			FeatureKey::MaxTx => "maxTx",
		}
	}

	/// Capitalised label used in the review summary.
	pub fn label(&self) -> &'static str {
		match self {
			FeatureKey::Burn => "Burn",
			FeatureKey::MaxWallet => "MaxWallet",
			FeatureKey::MaxTx => "MaxTx",
		}
	}
}

impl fmt::Display for FeatureKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.key())
	}
}

/// Everything needed to render or deploy a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSpec {
	pub token: TokenConfig,
	pub wallets: Vec<TaxWallet>,
	pub features: FeatureFlags,
}

impl ContractSpec {
	/// Sum of all wallet shares.
	pub fn total_share(&self) -> u32 {
		self.wallets.iter().map(|w| w.share_percent as u32).sum()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::str::FromStr;

	#[test]
	fn test_feature_defaults() {
		let flags = FeatureFlags::default();
		assert!(flags.burn_on_extraction);
		assert!(!flags.max_wallet_enabled);
		assert!(!flags.max_tx_enabled);
		assert_eq!(flags.enabled(), vec![FeatureKey::Burn]);
	}

	#[test]
	fn test_enabled_order() {
		let flags = FeatureFlags {
			burn_on_extraction: false,
			max_wallet_enabled: true,
			max_tx_enabled: true,
			..FeatureFlags::default()
		};
		let keys: Vec<&str> = flags.enabled().iter().map(|k| k.key()).collect();
		assert_eq!(keys, vec!["maxWallet", "maxTx"]);
	}

	#[test]
	fn test_max_tx_lower_bound_is_one_tenth() {
		assert_eq!(
			FeatureFlags::MAX_TX_BOUNDS.0,
			Decimal::from_str("0.1").unwrap()
		);
	}
}
