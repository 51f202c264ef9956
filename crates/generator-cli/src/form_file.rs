//! Form files.
//!
//! A form file carries the inputs of all four form steps so the generator
//! can be driven non-interactively:
//!
//! ```toml
//! [token]
//! name = "Test Token"
//! symbol = "TT"
//! initial_supply = 1000000
//! buy_tax = 5
//! sell_tax = 5
//!
//! [[wallets]]
//! name = "Dev"
//! address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
//! share = 100
//!
//! [features]
//! burn = true
//! max_wallet = true
//! max_wallet_percent = 2
//! ```
//!
//! Numeric token and wallet inputs may be written as numbers or strings.
//! They are kept as typed and only validated when the form advances.

use generator_core::Form;
use generator_types::draft::DEFAULT_TAX_PERCENT;
use generator_types::{FeatureFlags, FormDraft, TokenDraft, WalletDraft};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormFileError {
	#[error("Failed to read form file {path}: {source}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},
	#[error("Invalid form file: {0}")]
	Parse(String),
}

/// A value typed either as a TOML string or a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Input {
	Integer(i64),
	Float(f64),
	Text(String),
}

impl Input {
	fn into_text(self) -> String {
		match self {
			Input::Integer(n) => n.to_string(),
			Input::Float(n) => n.to_string(),
			Input::Text(s) => s,
		}
	}
}

fn text(input: Option<Input>, default: &str) -> String {
	input.map(Input::into_text).unwrap_or_else(|| default.to_string())
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TokenSection {
	name: Option<Input>,
	symbol: Option<Input>,
	initial_supply: Option<Input>,
	buy_tax: Option<Input>,
	sell_tax: Option<Input>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WalletSection {
	name: Option<Input>,
	address: Option<String>,
	share: Option<Input>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FeatureSection {
	burn: Option<bool>,
	max_wallet: Option<bool>,
	max_wallet_percent: Option<Decimal>,
	max_tx: Option<bool>,
	max_tx_percent: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FormFile {
	#[serde(default)]
	token: TokenSection,
	#[serde(default)]
	wallets: Vec<WalletSection>,
	#[serde(default)]
	features: FeatureSection,
}

impl From<FormFile> for FormDraft {
	fn from(file: FormFile) -> Self {
		let token = TokenDraft {
			name: text(file.token.name, ""),
			symbol: text(file.token.symbol, ""),
			initial_supply: text(file.token.initial_supply, ""),
			buy_tax: text(file.token.buy_tax, DEFAULT_TAX_PERCENT),
			sell_tax: text(file.token.sell_tax, DEFAULT_TAX_PERCENT),
		};

		let wallets = file
			.wallets
			.into_iter()
			.map(|w| WalletDraft {
				name: text(w.name, ""),
				address: w.address.unwrap_or_default(),
				share: text(w.share, "0"),
			})
			.collect();

		let defaults = FeatureFlags::default();
		let features = FeatureFlags {
			burn_on_extraction: file.features.burn.unwrap_or(defaults.burn_on_extraction),
			max_wallet_enabled: file.features.max_wallet.unwrap_or(defaults.max_wallet_enabled),
			max_wallet_percent: file
				.features
				.max_wallet_percent
				.unwrap_or(defaults.max_wallet_percent),
			max_tx_enabled: file.features.max_tx.unwrap_or(defaults.max_tx_enabled),
			max_tx_percent: file.features.max_tx_percent.unwrap_or(defaults.max_tx_percent),
		};

		FormDraft {
			token,
			wallets,
			features,
		}
	}
}

/// Parses form file contents into a draft.
pub fn parse_form(contents: &str) -> Result<FormDraft, FormFileError> {
	let file: FormFile =
		toml::from_str(contents).map_err(|e| FormFileError::Parse(e.message().to_string()))?;
	Ok(file.into())
}

/// Reads a form file and loads it into a fresh form at step 1.
pub async fn load_form(path: impl AsRef<Path>) -> Result<Form, FormFileError> {
	let path = path.as_ref();
	let contents = tokio::fs::read_to_string(path)
		.await
		.map_err(|source| FormFileError::Io {
			path: path.display().to_string(),
			source,
		})?;
	Ok(Form::from_draft(parse_form(&contents)?))
}

#[cfg(test)]
mod tests {
	use super::*;
	use generator_core::Step;
	use std::str::FromStr;

	const FULL: &str = r#"
[token]
name = "Test Token"
symbol = "TT"
initial_supply = 1000000
buy_tax = 5
sell_tax = "3"

[[wallets]]
name = "Dev"
address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
share = 70

[[wallets]]
name = "Marketing"
address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
share = 30

[features]
burn = false
max_tx = true
max_tx_percent = "0.5"
"#;

	#[test]
	fn test_numbers_and_strings_become_text() {
		let draft = parse_form(FULL).unwrap();
		assert_eq!(draft.token.name, "Test Token");
		assert_eq!(draft.token.initial_supply, "1000000");
		assert_eq!(draft.token.buy_tax, "5");
		assert_eq!(draft.token.sell_tax, "3");
		assert_eq!(draft.wallets.len(), 2);
		assert_eq!(draft.wallets[1].share, "30");
	}

	#[test]
	fn test_features_override_defaults() {
		let draft = parse_form(FULL).unwrap();
		assert!(!draft.features.burn_on_extraction);
		assert!(draft.features.max_tx_enabled);
		assert_eq!(draft.features.max_tx_percent, Decimal::from_str("0.5").unwrap());
		assert!(!draft.features.max_wallet_enabled);
		assert_eq!(draft.features.max_wallet_percent, Decimal::TWO);
	}

	#[test]
	fn test_missing_sections_use_form_defaults() {
		let draft = parse_form("[token]\nname = \"Only Name\"\n").unwrap();
		assert_eq!(draft.token.buy_tax, DEFAULT_TAX_PERCENT);
		assert_eq!(draft.token.sell_tax, DEFAULT_TAX_PERCENT);
		assert!(draft.wallets.is_empty());
		assert_eq!(draft.features, FeatureFlags::default());
	}

	#[test]
	fn test_unknown_field_is_rejected() {
		let err = parse_form("[token]\nticker = \"TT\"\n").unwrap_err();
		assert!(matches!(err, FormFileError::Parse(_)));
	}

	#[test]
	fn test_full_form_walks_to_review() {
		let mut form = Form::from_draft(parse_form(FULL).unwrap());
		assert_eq!(form.advance(), Ok(Step::TaxWallets));
		assert_eq!(form.advance(), Ok(Step::Features));
		assert_eq!(form.advance(), Ok(Step::Review));
		assert_eq!(form.spec().unwrap().wallets[0].share_percent, 70);
	}

	#[test]
	fn test_empty_wallet_list_gets_a_row() {
		let form = Form::from_draft(parse_form("").unwrap());
		assert_eq!(form.draft().wallets.len(), 1);
	}

	#[tokio::test]
	async fn test_missing_file() {
		let err = load_form("/nonexistent/form.toml").await.unwrap_err();
		assert!(matches!(err, FormFileError::Io { .. }));
	}
}
