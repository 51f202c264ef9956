//! Builders for form drafts.

use crate::draft::{FormDraft, TokenDraft, WalletDraft};
use crate::token::FeatureFlags;

/// Address used by default for builder wallets (first Hardhat account).
pub const TEST_WALLET_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

/// Builder for a [`FormDraft`] that passes every step by default.
///
/// Defaults: "Test Token" / "TT", supply 1000000, 5% taxes and a single
/// "Dev" wallet holding the full 100% share.
#[derive(Debug, Clone)]
pub struct FormDraftBuilder {
	token: TokenDraft,
	wallets: Vec<WalletDraft>,
	features: FeatureFlags,
}

impl Default for FormDraftBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl FormDraftBuilder {
	pub fn new() -> Self {
		Self {
			token: TokenDraft {
				name: "Test Token".to_string(),
				symbol: "TT".to_string(),
				initial_supply: "1000000".to_string(),
				buy_tax: "5".to_string(),
				sell_tax: "5".to_string(),
			},
			wallets: vec![WalletDraft::new("Dev", TEST_WALLET_ADDRESS, "100")],
			features: FeatureFlags::default(),
		}
	}

	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.token.name = name.into();
		self
	}

	pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
		self.token.symbol = symbol.into();
		self
	}

	pub fn initial_supply(mut self, supply: impl Into<String>) -> Self {
		self.token.initial_supply = supply.into();
		self
	}

	pub fn buy_tax(mut self, tax: impl Into<String>) -> Self {
		self.token.buy_tax = tax.into();
		self
	}

	pub fn sell_tax(mut self, tax: impl Into<String>) -> Self {
		self.token.sell_tax = tax.into();
		self
	}

	/// Replaces the wallet list.
	pub fn wallets(mut self, wallets: Vec<WalletDraft>) -> Self {
		self.wallets = wallets;
		self
	}

	/// Appends a wallet row.
	pub fn wallet(
		mut self,
		name: impl Into<String>,
		address: impl Into<String>,
		share: impl Into<String>,
	) -> Self {
		self.wallets.push(WalletDraft::new(name, address, share));
		self
	}

	pub fn features(mut self, features: FeatureFlags) -> Self {
		self.features = features;
		self
	}

	pub fn build(self) -> FormDraft {
		FormDraft {
			token: self.token,
			wallets: self.wallets,
			features: self.features,
		}
	}
}
