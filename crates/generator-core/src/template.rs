//! Solidity source rendering.
//!
//! Produces the source of a token contract that inherits the DEVeats
//! customizable base. Values are substituted verbatim: names and symbols are
//! not escaped, so a `"` in the token name yields source that does not
//! compile.

use generator_types::{ContractSpec, FeatureKey};

/// Renders the contract source for `spec`.
///
/// Pure and deterministic: the same spec always yields the same text.
pub fn render_contract(spec: &ContractSpec) -> String {
	let token = &spec.token;
	let features = &spec.features;

	let enabled: Vec<&str> = features.enabled().iter().map(FeatureKey::key).collect();
	let feature_list = if enabled.is_empty() {
		"standard".to_string()
	} else {
		enabled.join(", ")
	};

	let wallet_lines: String = spec
		.wallets
		.iter()
		.map(|wallet| {
			format!(
				"        addTaxWallet({address}, \"{name}\", {share}); // {name} - {share}%\n",
				address = wallet.address,
				name = wallet.display_name,
				share = wallet.share_percent,
			)
		})
		.collect();

	format!(
		r#"// SPDX-License-Identifier: MIT
pragma solidity ^0.8.20;

import "./DEvEatsTokenCustomizable.sol";

/**
 * @title {name}
 * @notice Custom token with DEVeats LP extraction system
 * @dev Generated via DEVeats Contract Generator v2
 *
 * Features enabled: {feature_list}
 * Tax: {buy}% buy / {sell}% sell
 * Wallets: {wallet_count}
 */
contract {symbol}Token is DEVeatsTokenCustomizable {{

    constructor() DEVeatsTokenCustomizable(
        "{name}",
        "{symbol}",
        {supply},
        routerAddress, // Set during deployment
        {buy},
        {sell},
        {burn}, // Burn during extraction
        {max_wallet}, // Max wallet enabled
        {max_tx}, // Max tx enabled
        {max_wallet_percent}, // Max wallet %
        {max_tx_percent} // Max tx %
    ) {{
        // Add tax wallets
{wallet_lines}    }}
}}"#,
		name = token.name,
		symbol = token.symbol,
		supply = token.initial_supply,
		buy = token.buy_tax_percent,
		sell = token.sell_tax_percent,
		wallet_count = spec.wallets.len(),
		burn = features.burn_on_extraction,
		max_wallet = features.max_wallet_enabled,
		max_tx = features.max_tx_enabled,
		max_wallet_percent = features.max_wallet_percent,
		max_tx_percent = features.max_tx_percent,
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use generator_types::{FeatureFlags, TaxWallet, TokenConfig};
	use rust_decimal::Decimal;
	use std::str::FromStr;

	fn spec() -> ContractSpec {
		ContractSpec {
			token: TokenConfig {
				name: "Test Token".into(),
				symbol: "TT".into(),
				initial_supply: "1000000".parse().unwrap(),
				buy_tax_percent: 5,
				sell_tax_percent: 5,
			},
			wallets: vec![TaxWallet {
				display_name: "Dev".into(),
				address: "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266".parse().unwrap(),
				share_percent: 100,
			}],
			features: FeatureFlags::default(),
		}
	}

	#[test]
	fn test_render_default_spec() {
		let expected = r#"// SPDX-License-Identifier: MIT
pragma solidity ^0.8.20;

import "./DEvEatsTokenCustomizable.sol";

/**
 * @title Test Token
 * @notice Custom token with DEVeats LP extraction system
 * @dev Generated via DEVeats Contract Generator v2
 *
 * Features enabled: burn
 * Tax: 5% buy / 5% sell
 * Wallets: 1
 */
contract TTToken is DEVeatsTokenCustomizable {

    constructor() DEVeatsTokenCustomizable(
        "Test Token",
        "TT",
        1000000,
        routerAddress, // Set during deployment
        5,
        5,
        true, // Burn during extraction
        false, // Max wallet enabled
        false, // Max tx enabled
        2, // Max wallet %
        1 // Max tx %
    ) {
        // Add tax wallets
        addTaxWallet(0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266, "Dev", 100); // Dev - 100%
    }
}"#;
		assert_eq!(render_contract(&spec()), expected);
	}

	#[test]
	fn test_render_is_deterministic() {
		let spec = spec();
		assert_eq!(render_contract(&spec), render_contract(&spec));
	}

	#[test]
	fn test_render_all_features_and_wallet_lines() {
		let mut spec = spec();
		spec.features = FeatureFlags {
			burn_on_extraction: true,
			max_wallet_enabled: true,
			max_wallet_percent: Decimal::from(3),
			max_tx_enabled: true,
			max_tx_percent: Decimal::from_str("0.5").unwrap(),
		};
		spec.wallets[0].share_percent = 70;
		spec.wallets.push(TaxWallet {
			display_name: "Marketing".into(),
			address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".parse().unwrap(),
			share_percent: 30,
		});

		let source = render_contract(&spec);
		assert!(source.contains(" * Features enabled: burn, maxWallet, maxTx\n"));
		assert!(source.contains(" * Wallets: 2\n"));
		assert!(source.contains("        0.5 // Max tx %\n"));
		assert!(source.contains(
			"        addTaxWallet(0x5FbDB2315678afecb367f032d93F642f64180aa3, \"Marketing\", 30); // Marketing - 30%\n"
		));
	}

	#[test]
	fn test_no_features_renders_standard() {
		let mut spec = spec();
		spec.features.burn_on_extraction = false;
		assert!(render_contract(&spec).contains(" * Features enabled: standard\n"));
	}

	#[test]
	fn test_name_is_not_escaped() {
		let mut spec = spec();
		spec.token.name = "Bad\"Name".into();
		assert!(render_contract(&spec).contains("        \"Bad\"Name\",\n"));
	}
}
