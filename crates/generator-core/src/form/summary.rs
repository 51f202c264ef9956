//! Read-only review of a validated configuration.

use generator_types::address::shorten;
use generator_types::{ContractSpec, FeatureKey, TOTAL_SHARE_PERCENT};
use std::fmt;

/// What the review step shows before generating or deploying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSummary {
	pub name: String,
	pub symbol: String,
	pub supply: String,
	pub buy_tax_percent: u8,
	pub sell_tax_percent: u8,
	pub wallets: Vec<WalletLine>,
	pub total_share: u32,
	pub features: Vec<FeatureKey>,
}

/// One tax wallet in the review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletLine {
	pub name: String,
	pub share_percent: u8,
	pub short_address: String,
}

impl From<&ContractSpec> for ReviewSummary {
	fn from(spec: &ContractSpec) -> Self {
		Self {
			name: spec.token.name.clone(),
			symbol: spec.token.symbol.clone(),
			supply: spec.token.initial_supply.to_string(),
			buy_tax_percent: spec.token.buy_tax_percent,
			sell_tax_percent: spec.token.sell_tax_percent,
			wallets: spec
				.wallets
				.iter()
				.map(|w| WalletLine {
					name: w.display_name.clone(),
					share_percent: w.share_percent,
					short_address: shorten(&w.address.to_checksum(None), 10, 8),
				})
				.collect(),
			total_share: spec.total_share(),
			features: spec.features.enabled(),
		}
	}
}

impl fmt::Display for ReviewSummary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "Token Configuration")?;
		writeln!(f, "  Name: {}", self.name)?;
		writeln!(f, "  Symbol: {}", self.symbol)?;
		writeln!(f, "  Supply: {}", self.supply)?;
		writeln!(f, "  Buy Tax: {}%", self.buy_tax_percent)?;
		writeln!(f, "  Sell Tax: {}%", self.sell_tax_percent)?;
		writeln!(f)?;
		writeln!(f, "Tax Wallets ({})", self.wallets.len())?;
		for wallet in &self.wallets {
			writeln!(
				f,
				"  {}: {}% {}",
				wallet.name, wallet.share_percent, wallet.short_address
			)?;
		}
		writeln!(
			f,
			"Total Share: {}% / {}%",
			self.total_share, TOTAL_SHARE_PERCENT
		)?;
		writeln!(f)?;
		writeln!(f, "Features Enabled")?;
		if self.features.is_empty() {
			write!(f, "  Standard features only")
		} else {
			let labels: Vec<String> = self
				.features
				.iter()
				.map(|k| format!("  ✓ {}", k.label()))
				.collect();
			write!(f, "{}", labels.join("\n"))
		}
	}
}
