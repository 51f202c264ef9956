//! Shared command context.
//!
//! Loads configuration once and builds the wallet bridge, access gate and
//! generator for a command from it.

use crate::cli::output::Display;
use generator_config::{Config, ConfigError};
use generator_core::{AccessGate, Generator, RpcBalanceReader, StatusCallback};
use generator_types::{format_address_short, NetworkId};
use generator_wallet::{ChainDefinition, LocalWallet, WalletBridge, WalletRequest};
use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use tokio::runtime::{Handle, RuntimeFlavor};

/// Configuration plus the interaction mode of the current command.
pub struct Context {
	pub config: Config,
	assume_yes: bool,
}

impl Context {
	/// Loads `path`, or the built-in defaults when no file is given.
	pub async fn load(path: Option<&Path>, assume_yes: bool) -> Result<Self, ConfigError> {
		let config = match path {
			Some(path) => Config::from_file(path).await?,
			None => Config::default(),
		};
		tracing::debug!(
			network = %config.generator.network,
			gate_network = %config.gate.network,
			wallet = config.private_key().is_some(),
			"Configuration loaded"
		);
		Ok(Self { config, assume_yes })
	}

	/// `requested`, falling back to the configured default network.
	pub fn network(&self, requested: Option<NetworkId>) -> NetworkId {
		requested.unwrap_or(self.config.generator.network)
	}

	/// Gate reading balances from the configured gate network.
	pub fn gate(&self) -> Result<AccessGate, ConfigError> {
		let reader = RpcBalanceReader::for_network(self.config.gate.network.profile());
		Ok(AccessGate::new(
			Arc::new(reader),
			self.config.gate_token()?,
			self.config.min_balance_wei()?,
		))
	}

	/// Bridge to the configured local wallet, started on `network`.
	///
	/// Without a configured key the bridge has no provider.
	pub fn bridge(&self, network: NetworkId) -> Result<WalletBridge, ConfigError> {
		let Some(key) = self.config.private_key() else {
			return Ok(WalletBridge::absent());
		};

		let wallet = LocalWallet::new(key, ChainDefinition::from(network.profile()))
			.map_err(|e| ConfigError::Validation(e.to_string()))?;
		let wallet = if self.assume_yes {
			wallet
		} else {
			wallet.with_approval(Arc::new(prompt_approval))
		};
		Ok(WalletBridge::new(Arc::new(wallet)))
	}

	/// Generator on `network` reporting deployment progress to the terminal.
	pub fn generator(&self, network: NetworkId) -> Result<Generator, ConfigError> {
		let on_status: StatusCallback = Arc::new(|status| Display::info(&status.to_string()));
		Ok(Generator::new(self.bridge(network)?, self.gate()?, network).with_status_callback(on_status))
	}
}

fn chain_label(chain_id: u64) -> String {
	match NetworkId::from_chain_id(chain_id) {
		Some(id) => format!("{} (chain {chain_id})", id.profile().name),
		None => format!("chain {chain_id}"),
	}
}

fn describe(request: &WalletRequest) -> String {
	match request {
		WalletRequest::Connect { address } => {
			format!("Connect wallet {}?", format_address_short(*address))
		},
		WalletRequest::SignMessage { message } => format!("Sign message?\n\n{message}\n"),
		WalletRequest::AddChain {
			chain_id,
			chain_name,
		} => format!("Add network {chain_name} (chain {chain_id})?"),
		WalletRequest::SendTransaction {
			chain_id,
			to,
			value,
		} => format!(
			"Send transaction to {to} on {} with value {value} wei?",
			chain_label(*chain_id)
		),
	}
}

/// Writes `prompt` and reads a yes/no answer. Anything but `y`/`yes`
/// declines, as does an I/O failure.
fn confirm(prompt: &str, input: &mut impl BufRead, output: &mut impl Write) -> bool {
	if write!(output, "{prompt} [y/N] ").and_then(|_| output.flush()).is_err() {
		return false;
	}
	let mut answer = String::new();
	if input.read_line(&mut answer).is_err() {
		return false;
	}
	matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Runs a blocking terminal read from inside async wallet calls. On a
/// multi-threaded runtime the worker hands its other tasks off first.
fn off_worker<T>(read: impl FnOnce() -> T) -> T {
	match Handle::try_current() {
		Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
			tokio::task::block_in_place(read)
		},
		_ => read(),
	}
}

fn prompt_approval(request: &WalletRequest) -> bool {
	let prompt = describe(request);
	off_worker(|| confirm(&prompt, &mut std::io::stdin().lock(), &mut std::io::stdout()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;

	const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	#[tokio::test]
	async fn test_defaults_without_file() {
		let ctx = Context::load(None, true).await.unwrap();
		assert_eq!(ctx.network(None), NetworkId::Localhost);
		assert_eq!(ctx.network(Some(NetworkId::Base)), NetworkId::Base);
		assert!(!ctx.bridge(NetworkId::Localhost).unwrap().is_available());
	}

	#[tokio::test]
	async fn test_configured_key_gives_provider() {
		let mut ctx = Context::load(None, true).await.unwrap();
		ctx.config = format!("[wallet]\nprivate_key = \"{KEY}\"\n").parse().unwrap();
		assert!(ctx.bridge(NetworkId::Localhost).unwrap().is_available());
	}

	#[test]
	fn test_describe_requests() {
		let text = describe(&WalletRequest::AddChain {
			chain_id: 8453,
			chain_name: "Base Mainnet".into(),
		});
		assert_eq!(text, "Add network Base Mainnet (chain 8453)?");

		let to = alloy_primitives::Address::repeat_byte(0x5f);
		let text = describe(&WalletRequest::SendTransaction {
			chain_id: 31337,
			to,
			value: alloy_primitives::U256::from(5u64),
		});
		assert_eq!(
			text,
			format!("Send transaction to {to} on Localhost (Hardhat) (chain 31337) with value 5 wei?")
		);
		assert_eq!(chain_label(1), "chain 1");
	}

	#[test]
	fn test_confirm_answers() {
		let mut output = Vec::new();
		assert!(confirm("Go?", &mut Cursor::new("y\n"), &mut output));
		assert_eq!(String::from_utf8(output).unwrap(), "Go? [y/N] ");
		assert!(confirm("Go?", &mut Cursor::new(" YES \n"), &mut Vec::new()));
		assert!(!confirm("Go?", &mut Cursor::new("\n"), &mut Vec::new()));
		assert!(!confirm("Go?", &mut Cursor::new(""), &mut Vec::new()));
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
	async fn test_prompt_read_leaves_worker() {
		let approved = tokio::spawn(async {
			off_worker(|| confirm("Go?", &mut Cursor::new("yes\n"), &mut Vec::new()))
		});
		assert!(approved.await.unwrap());
	}

	#[tokio::test]
	async fn test_prompt_read_inline_on_current_thread() {
		assert!(!off_worker(|| confirm("Go?", &mut Cursor::new("no\n"), &mut Vec::new())));
	}
}
