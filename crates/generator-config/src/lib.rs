//! Configuration module for the DEVeats contract generator.
//!
//! Configuration is read from a TOML file. Before parsing, `${VAR_NAME}` and
//! `${VAR_NAME:-default}` references are replaced with environment values so
//! secrets such as the wallet key never need to live in the file itself.
//!
//! Every section is optional; an empty file yields [`Config::default`].
//!
//! ```toml
//! [generator]
//! network = "localhost"
//!
//! [gate]
//! token = "0xa4C4391bF643EbC391c9848453873656e1Fbd9d5"
//! network = "base"
//! min_balance_wei = "1"
//!
//! [wallet]
//! private_key = "${DEVEATS_PRIVATE_KEY:-}"
//! ```

use alloy_primitives::{Address, U256};
use generator_types::{parse_address, NetworkId};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// DEVeats token on Base mainnet, held to unlock the generator.
pub const DEVEATS_TOKEN_ADDRESS: &str = "0xa4C4391bF643EbC391c9848453873656e1Fbd9d5";

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Keep the message only, the full error echoes the input
		ConfigError::Parse(err.message().to_string())
	}
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
	/// General generator settings.
	#[serde(default)]
	pub generator: GeneratorConfig,
	/// Token-gate settings.
	#[serde(default)]
	pub gate: GateConfig,
	/// Local wallet used as the signing provider. Absent means no provider.
	#[serde(default)]
	pub wallet: Option<WalletConfig>,
}

/// General generator settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneratorConfig {
	/// Network selected when none is given on the command line.
	#[serde(default = "default_network")]
	pub network: NetworkId,
}

impl Default for GeneratorConfig {
	fn default() -> Self {
		Self {
			network: default_network(),
		}
	}
}

/// Token-gate settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GateConfig {
	/// ERC-20 token whose balance unlocks the generator.
	#[serde(default = "default_gate_token")]
	pub token: String,
	/// Network the balance is read from, independent of the deploy network.
	#[serde(default = "default_gate_network")]
	pub network: NetworkId,
	/// Minimum balance in the token's smallest unit, as a decimal string.
	#[serde(default = "default_min_balance_wei")]
	pub min_balance_wei: String,
}

impl Default for GateConfig {
	fn default() -> Self {
		Self {
			token: default_gate_token(),
			network: default_gate_network(),
			min_balance_wei: default_min_balance_wei(),
		}
	}
}

/// Local wallet settings.
#[derive(Clone, Deserialize, Serialize)]
pub struct WalletConfig {
	/// Hex-encoded private key, with or without 0x prefix.
	#[serde(default)]
	pub private_key: String,
}

impl fmt::Debug for WalletConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("WalletConfig")
			.field("private_key", &"<redacted>")
			.finish()
	}
}

fn default_network() -> NetworkId {
	NetworkId::Localhost
}

fn default_gate_token() -> String {
	DEVEATS_TOKEN_ADDRESS.to_string()
}

fn default_gate_network() -> NetworkId {
	NetworkId::Base
}

fn default_min_balance_wei() -> String {
	"1".to_string()
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
///
/// Input strings are limited to 1MB to prevent ReDoS attacks.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {e}")))?;

	let mut result = input.to_string();
	let mut replacements = Vec::new();

	for cap in re.captures_iter(input) {
		let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};
		let var_name = var_name.as_str();
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{var_name}' not found"
					)))
				},
			},
		};

		replacements.push((full_match.start(), full_match.end(), value));
	}

	// Apply replacements in reverse order to maintain positions
	for (start, end, value) in replacements.iter().rev() {
		result.replace_range(start..end, value);
	}

	Ok(result)
}

impl Config {
	/// Loads configuration from a TOML file, resolving environment variables.
	pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
			ConfigError::Io(std::io::Error::new(
				e.kind(),
				format!("{}: {}", path.display(), e),
			))
		})?;
		contents.parse()
	}

	/// Validates the configuration.
	///
	/// - The gate token must be a valid address
	/// - The minimum balance must be a non-negative integer
	/// - A configured private key must be 64 hex characters
	fn validate(&self) -> Result<(), ConfigError> {
		parse_address(&self.gate.token).map_err(|e| {
			ConfigError::Validation(format!("Invalid gate token '{}': {e}", self.gate.token))
		})?;

		U256::from_str_radix(self.gate.min_balance_wei.trim(), 10).map_err(|e| {
			ConfigError::Validation(format!(
				"Invalid min_balance_wei '{}': {e}",
				self.gate.min_balance_wei
			))
		})?;

		if let Some(key) = self.private_key() {
			let digits = key.strip_prefix("0x").unwrap_or(key);
			if digits.len() != 64 {
				return Err(ConfigError::Validation(
					"Private key must be 64 hex characters (32 bytes)".into(),
				));
			}
			if hex::decode(digits).is_err() {
				return Err(ConfigError::Validation(
					"Private key must be valid hexadecimal".into(),
				));
			}
		}

		Ok(())
	}

	/// Gate token address. Validated at load time.
	pub fn gate_token(&self) -> Result<Address, ConfigError> {
		parse_address(&self.gate.token)
			.map_err(|e| ConfigError::Validation(format!("Invalid gate token: {e}")))
	}

	/// Minimum gate balance in wei. Validated at load time.
	pub fn min_balance_wei(&self) -> Result<U256, ConfigError> {
		U256::from_str_radix(self.gate.min_balance_wei.trim(), 10)
			.map_err(|e| ConfigError::Validation(format!("Invalid min_balance_wei: {e}")))
	}

	/// The configured private key, treating an empty value as absent.
	pub fn private_key(&self) -> Option<&str> {
		self.wallet
			.as_ref()
			.map(|w| w.private_key.trim())
			.filter(|k| !k.is_empty())
	}
}

/// Parses configuration from a TOML string.
///
/// Environment variables are resolved first and the result is validated.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	#[test]
	fn test_env_var_resolution() {
		std::env::set_var("DEVEATS_TEST_HOST", "localhost");
		std::env::set_var("DEVEATS_TEST_PORT", "8545");

		let input = "rpc = \"http://${DEVEATS_TEST_HOST}:${DEVEATS_TEST_PORT}\"";
		let result = resolve_env_vars(input).unwrap();
		assert_eq!(result, "rpc = \"http://localhost:8545\"");

		std::env::remove_var("DEVEATS_TEST_HOST");
		std::env::remove_var("DEVEATS_TEST_PORT");
	}

	#[test]
	fn test_env_var_with_default() {
		let input = "value = \"${DEVEATS_MISSING_VAR:-fallback}\"";
		let result = resolve_env_vars(input).unwrap();
		assert_eq!(result, "value = \"fallback\"");
	}

	#[test]
	fn test_missing_env_var_error() {
		let input = "value = \"${DEVEATS_MISSING_VAR}\"";
		let result = resolve_env_vars(input);
		assert!(result.is_err());
		assert!(result.unwrap_err().to_string().contains("DEVEATS_MISSING_VAR"));
	}

	#[test]
	fn test_empty_config_uses_defaults() {
		let config: Config = "".parse().unwrap();
		assert_eq!(config.generator.network, NetworkId::Localhost);
		assert_eq!(config.gate.network, NetworkId::Base);
		assert_eq!(config.min_balance_wei().unwrap(), U256::from(1));
		assert_eq!(
			config.gate_token().unwrap(),
			parse_address(DEVEATS_TOKEN_ADDRESS).unwrap()
		);
		assert!(config.private_key().is_none());
	}

	#[test]
	fn test_full_config() {
		let config: Config = format!(
			r#"
[generator]
network = "base-sepolia"

[gate]
token = "0x0000000000000000000000000000000000000abc"
network = "localhost"
min_balance_wei = "1000000000000000000000"

[wallet]
private_key = "{TEST_KEY}"
"#
		)
		.parse()
		.unwrap();

		assert_eq!(config.generator.network, NetworkId::BaseSepolia);
		assert_eq!(config.gate.network, NetworkId::Localhost);
		assert_eq!(
			config.min_balance_wei().unwrap(),
			U256::from(1_000u64) * U256::from(10u64).pow(U256::from(18u64))
		);
		assert_eq!(config.private_key(), Some(TEST_KEY));
	}

	#[test]
	fn test_empty_private_key_means_no_wallet() {
		let config: Config = "[wallet]\nprivate_key = \"${DEVEATS_UNSET_KEY:-}\""
			.parse()
			.unwrap();
		assert!(config.wallet.is_some());
		assert!(config.private_key().is_none());
	}

	#[test]
	fn test_rejects_short_private_key() {
		let err = "[wallet]\nprivate_key = \"0x1234\""
			.parse::<Config>()
			.unwrap_err();
		assert!(err.to_string().contains("64 hex characters"));
	}

	#[test]
	fn test_rejects_unknown_network() {
		let err = "[generator]\nnetwork = \"polygon\"".parse::<Config>().unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)));
	}

	#[test]
	fn test_rejects_bad_gate_token() {
		let err = "[gate]\ntoken = \"0x1234\"".parse::<Config>().unwrap_err();
		assert!(err.to_string().contains("Invalid gate token"));
	}

	#[test]
	fn test_rejects_non_numeric_threshold() {
		let err = "[gate]\nmin_balance_wei = \"lots\"".parse::<Config>().unwrap_err();
		assert!(err.to_string().contains("min_balance_wei"));
	}

	#[test]
	fn test_debug_redacts_private_key() {
		let wallet = WalletConfig {
			private_key: TEST_KEY.to_string(),
		};
		let rendered = format!("{wallet:?}");
		assert!(!rendered.contains("ac0974"));
	}

	#[tokio::test]
	async fn test_from_file_missing() {
		let err = Config::from_file("/nonexistent/deveats.toml").await.unwrap_err();
		assert!(matches!(err, ConfigError::Io(_)));
	}
}
