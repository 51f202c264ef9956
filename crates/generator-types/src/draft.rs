//! Editable form data.
//!
//! Drafts hold exactly what the user typed. Numeric inputs stay strings until
//! the owning step validates them, so an in-progress edit such as an empty
//! supply field can be represented without loss.

use crate::token::FeatureFlags;
use serde::{Deserialize, Serialize};

/// Default buy and sell tax shown in a fresh form.
pub const DEFAULT_TAX_PERCENT: &str = "5";

/// Step 1 inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenDraft {
	pub name: String,
	pub symbol: String,
	pub initial_supply: String,
	pub buy_tax: String,
	pub sell_tax: String,
}

impl Default for TokenDraft {
	fn default() -> Self {
		Self {
			name: String::new(),
			symbol: String::new(),
			initial_supply: String::new(),
			buy_tax: DEFAULT_TAX_PERCENT.to_string(),
			sell_tax: DEFAULT_TAX_PERCENT.to_string(),
		}
	}
}

/// One row of the step 2 wallet list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletDraft {
	pub name: String,
	pub address: String,
	pub share: String,
}

impl WalletDraft {
	pub fn new(
		name: impl Into<String>,
		address: impl Into<String>,
		share: impl Into<String>,
	) -> Self {
		Self {
			name: name.into(),
			address: address.into(),
			share: share.into(),
		}
	}

	/// Row appended by "add wallet".
	pub fn blank() -> Self {
		Self::new("", "", "0")
	}

	/// Share as counted toward the total; unparsable input counts as zero.
	pub fn share_or_zero(&self) -> i64 {
		self.share.trim().parse::<i64>().unwrap_or(0)
	}

	/// Sum of `share_or_zero` over `wallets`, saturating at the `i64` bounds.
	pub fn total_share(wallets: &[WalletDraft]) -> i64 {
		wallets
			.iter()
			.map(WalletDraft::share_or_zero)
			.fold(0i64, i64::saturating_add)
	}
}

/// Identifies an editable column of a wallet row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletField {
	Name,
	Address,
	Share,
}

/// All form inputs across the four steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDraft {
	pub token: TokenDraft,
	pub wallets: Vec<WalletDraft>,
	pub features: FeatureFlags,
}

impl Default for FormDraft {
	fn default() -> Self {
		Self {
			token: TokenDraft::default(),
			wallets: vec![WalletDraft::new("Dev", "", "25")],
			features: FeatureFlags::default(),
		}
	}
}

impl FormDraft {
	/// Sum of wallet shares as displayed to the user.
	pub fn total_share(&self) -> i64 {
		WalletDraft::total_share(&self.wallets)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_fresh_form_defaults() {
		let draft = FormDraft::default();
		assert_eq!(draft.token.buy_tax, "5");
		assert_eq!(draft.token.sell_tax, "5");
		assert_eq!(draft.wallets.len(), 1);
		assert_eq!(draft.wallets[0].name, "Dev");
		assert_eq!(draft.total_share(), 25);
	}

	#[test]
	fn test_total_share_ignores_garbage() {
		let draft = FormDraft {
			wallets: vec![
				WalletDraft::new("a", "", "60"),
				WalletDraft::new("b", "", "abc"),
				WalletDraft::new("c", "", " 40 "),
			],
			..FormDraft::default()
		};
		assert_eq!(draft.total_share(), 100);
	}

	#[test]
	fn test_total_share_saturates_on_huge_input() {
		let draft = FormDraft {
			wallets: vec![
				WalletDraft::new("a", "", "9223372036854775807"),
				WalletDraft::new("b", "", "1"),
			],
			..FormDraft::default()
		};
		assert_eq!(draft.total_share(), i64::MAX);

		let wallets = vec![
			WalletDraft::new("a", "", "-9223372036854775808"),
			WalletDraft::new("b", "", "-1"),
		];
		assert_eq!(WalletDraft::total_share(&wallets), i64::MIN);
	}
}
