//! Per-step validation rules.

use generator_types::{
	parse_address, FieldErrors, FieldKey, InitialSupply, TaxWallet, TokenConfig, TokenDraft,
	Validation, WalletDraft, MAX_TAX_PERCENT, TOTAL_SHARE_PERCENT,
};

pub(crate) const NAME_REQUIRED: &str = "Token name is required";
pub(crate) const SYMBOL_REQUIRED: &str = "Token symbol is required";
pub(crate) const SUPPLY_POSITIVE: &str = "Initial supply must be greater than 0";
pub(crate) const TAX_RANGE: &str = "Tax must be 0-20%";
pub(crate) const WALLET_NAME_REQUIRED: &str = "Wallet name required";
pub(crate) const ADDRESS_REQUIRED: &str = "Address required";
pub(crate) const ADDRESS_INVALID: &str = "Invalid address";
pub(crate) const SHARE_RANGE: &str = "Share must be 0-100%";

fn parse_percent(input: &str, max: i64) -> Option<u8> {
	input
		.trim()
		.parse::<i64>()
		.ok()
		.filter(|v| (0..=max).contains(v))
		.and_then(|v| u8::try_from(v).ok())
}

/// Step 1: token details.
pub fn validate_token(draft: &TokenDraft) -> Validation<TokenConfig> {
	let mut errors = FieldErrors::new();

	let name = draft.name.trim();
	if name.is_empty() {
		errors.insert(FieldKey::Name, NAME_REQUIRED);
	}

	let symbol = draft.symbol.trim();
	if symbol.is_empty() {
		errors.insert(FieldKey::Symbol, SYMBOL_REQUIRED);
	}

	let supply = draft.initial_supply.parse::<InitialSupply>().ok();
	if supply.is_none() {
		errors.insert(FieldKey::InitialSupply, SUPPLY_POSITIVE);
	}

	let max_tax = i64::from(MAX_TAX_PERCENT);
	let buy_tax = parse_percent(&draft.buy_tax, max_tax);
	if buy_tax.is_none() {
		errors.insert(FieldKey::BuyTax, TAX_RANGE);
	}
	let sell_tax = parse_percent(&draft.sell_tax, max_tax);
	if sell_tax.is_none() {
		errors.insert(FieldKey::SellTax, TAX_RANGE);
	}

	match (supply, buy_tax, sell_tax) {
		(Some(initial_supply), Some(buy_tax_percent), Some(sell_tax_percent))
			if errors.is_empty() =>
		{
			Ok(TokenConfig {
				name: name.to_string(),
				symbol: symbol.to_string(),
				initial_supply,
				buy_tax_percent,
				sell_tax_percent,
			})
		},
		_ => Err(errors),
	}
}

/// Step 2: tax wallets. The shares must add up to exactly 100.
pub fn validate_wallets(wallets: &[WalletDraft]) -> Validation<Vec<TaxWallet>> {
	let mut errors = FieldErrors::new();
	let mut valid = Vec::with_capacity(wallets.len());

	for (index, wallet) in wallets.iter().enumerate() {
		let name = wallet.name.trim();
		if name.is_empty() {
			errors.insert(FieldKey::WalletName(index), WALLET_NAME_REQUIRED);
		}

		let address = if wallet.address.trim().is_empty() {
			errors.insert(FieldKey::WalletAddress(index), ADDRESS_REQUIRED);
			None
		} else {
			match parse_address(&wallet.address) {
				Ok(address) => Some(address),
				Err(_) => {
					errors.insert(FieldKey::WalletAddress(index), ADDRESS_INVALID);
					None
				},
			}
		};

		let share = parse_percent(&wallet.share, i64::from(TOTAL_SHARE_PERCENT));
		if share.is_none() {
			errors.insert(FieldKey::WalletShare(index), SHARE_RANGE);
		}

		if let (Some(address), Some(share_percent)) = (address, share) {
			valid.push(TaxWallet {
				display_name: name.to_string(),
				address,
				share_percent,
			});
		}
	}

	let total = WalletDraft::total_share(wallets);
	if total != i64::from(TOTAL_SHARE_PERCENT) {
		errors.insert(
			FieldKey::TotalShare,
			format!("Total must equal 100% (currently {total}%)"),
		);
	}

	if errors.is_empty() {
		Ok(valid)
	} else {
		Err(errors)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use generator_types::utils::tests::builders::TEST_WALLET_ADDRESS;
	use generator_types::U256;
	use rust_decimal::Decimal;

	fn token(name: &str, symbol: &str, supply: &str, buy: &str, sell: &str) -> TokenDraft {
		TokenDraft {
			name: name.into(),
			symbol: symbol.into(),
			initial_supply: supply.into(),
			buy_tax: buy.into(),
			sell_tax: sell.into(),
		}
	}

	#[test]
	fn test_valid_token() {
		let config = validate_token(&token(" Test Token ", "TT", "1000000", "5", "0")).unwrap();
		assert_eq!(config.name, "Test Token");
		assert_eq!(config.initial_supply.to_string(), "1000000");
		assert_eq!(config.buy_tax_percent, 5);
		assert_eq!(config.sell_tax_percent, 0);
	}

	#[test]
	fn test_empty_token_reports_every_field() {
		let errors = validate_token(&token("", "  ", "0", "21", "-1")).unwrap_err();
		assert_eq!(errors.get(FieldKey::Name), Some(NAME_REQUIRED));
		assert_eq!(errors.get(FieldKey::Symbol), Some(SYMBOL_REQUIRED));
		assert_eq!(errors.get(FieldKey::InitialSupply), Some(SUPPLY_POSITIVE));
		assert_eq!(errors.get(FieldKey::BuyTax), Some(TAX_RANGE));
		assert_eq!(errors.get(FieldKey::SellTax), Some(TAX_RANGE));
	}

	#[test]
	fn test_tax_must_be_integer() {
		let errors = validate_token(&token("A", "A", "1", "2.5", "abc")).unwrap_err();
		assert!(errors.contains(FieldKey::BuyTax));
		assert!(errors.contains(FieldKey::SellTax));
		assert_eq!(errors.len(), 2);
	}

	#[test]
	fn test_tax_bounds_inclusive() {
		assert!(validate_token(&token("A", "A", "1", "0", "20")).is_ok());
	}

	#[test]
	fn test_supply_accepts_fraction_and_exponent() {
		let config = validate_token(&token("A", "A", "0.5", "5", "5")).unwrap();
		assert_eq!(config.initial_supply, InitialSupply::Decimal(Decimal::new(5, 1)));
		let config = validate_token(&token("A", "A", "1e6", "5", "5")).unwrap();
		assert_eq!(config.initial_supply.to_whole(), Some(U256::from(1_000_000u64)));
	}

	#[test]
	fn test_supply_beyond_decimal_range() {
		let config =
			validate_token(&token("A", "A", "100000000000000000000000000000", "5", "5")).unwrap();
		assert_eq!(config.initial_supply.to_string(), "100000000000000000000000000000");
		assert!(validate_token(&token("A", "A", "1e29", "5", "5")).is_ok());
	}

	#[test]
	fn test_huge_share_does_not_overflow_total() {
		let wallets = vec![
			WalletDraft::new("A", TEST_WALLET_ADDRESS, "9223372036854775807"),
			WalletDraft::new("B", TEST_WALLET_ADDRESS, "1"),
		];
		let errors = validate_wallets(&wallets).unwrap_err();
		assert_eq!(errors.get(FieldKey::WalletShare(0)), Some(SHARE_RANGE));
		assert_eq!(
			errors.get(FieldKey::TotalShare),
			Some("Total must equal 100% (currently 9223372036854775807%)")
		);
	}

	#[test]
	fn test_wallets_must_total_100() {
		let wallets = vec![
			WalletDraft::new("Dev", TEST_WALLET_ADDRESS, "60"),
			WalletDraft::new("Marketing", TEST_WALLET_ADDRESS, "30"),
		];
		let errors = validate_wallets(&wallets).unwrap_err();
		assert_eq!(
			errors.get(FieldKey::TotalShare),
			Some("Total must equal 100% (currently 90%)")
		);
		assert_eq!(errors.len(), 1);
	}

	#[test]
	fn test_wallet_row_errors() {
		let wallets = vec![
			WalletDraft::new("", "", "50"),
			WalletDraft::new("B", "0x1234", "abc"),
		];
		let errors = validate_wallets(&wallets).unwrap_err();
		assert_eq!(errors.get(FieldKey::WalletName(0)), Some(WALLET_NAME_REQUIRED));
		assert_eq!(errors.get(FieldKey::WalletAddress(0)), Some(ADDRESS_REQUIRED));
		assert_eq!(errors.get(FieldKey::WalletAddress(1)), Some(ADDRESS_INVALID));
		assert_eq!(errors.get(FieldKey::WalletShare(1)), Some(SHARE_RANGE));
		// Non-numeric share counts as zero in the total
		assert_eq!(
			errors.get(FieldKey::TotalShare),
			Some("Total must equal 100% (currently 50%)")
		);
	}

	#[test]
	fn test_out_of_range_shares_rejected_even_when_total_is_100() {
		let wallets = vec![
			WalletDraft::new("A", TEST_WALLET_ADDRESS, "150"),
			WalletDraft::new("B", TEST_WALLET_ADDRESS, "-50"),
		];
		let errors = validate_wallets(&wallets).unwrap_err();
		assert!(errors.contains(FieldKey::WalletShare(0)));
		assert!(errors.contains(FieldKey::WalletShare(1)));
		assert!(!errors.contains(FieldKey::TotalShare));
	}

	#[test]
	fn test_valid_wallets() {
		let wallets = vec![
			WalletDraft::new("Dev", TEST_WALLET_ADDRESS, "40"),
			WalletDraft::new("Marketing", TEST_WALLET_ADDRESS.to_lowercase(), "60"),
		];
		let valid = validate_wallets(&wallets).unwrap();
		assert_eq!(valid.len(), 2);
		assert_eq!(valid[1].display_name, "Marketing");
		assert_eq!(valid[1].share_percent, 60);
		assert_eq!(valid[0].address, valid[1].address);
	}
}
