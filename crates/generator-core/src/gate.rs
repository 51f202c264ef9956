//! Token-gated access.
//!
//! Using the generator on a gated network requires holding the DEVeats token.
//! Balances are read over a plain RPC connection to the gate network, never
//! through the user's wallet, so the check works whatever chain the wallet is
//! on.

use crate::error::{GeneratorError, Result};
use alloy_primitives::{Address, U256};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::{sol, SolCall};
use async_trait::async_trait;
use generator_types::NetworkProfile;
use std::sync::Arc;

sol! {
	interface IERC20 {
		function balanceOf(address account) external view returns (uint256);
	}
}

/// Reads ERC-20 balances.
#[async_trait]
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait BalanceReader: Send + Sync {
	/// Balance of `holder` in `token`, in the token's smallest unit.
	async fn balance_of(&self, token: Address, holder: Address) -> Result<U256>;
}

/// [`BalanceReader`] backed by an HTTP JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct RpcBalanceReader {
	rpc_url: String,
}

impl RpcBalanceReader {
	pub fn new(rpc_url: impl Into<String>) -> Self {
		Self {
			rpc_url: rpc_url.into(),
		}
	}

	/// Reader for the network described by `profile`.
	pub fn for_network(profile: &NetworkProfile) -> Self {
		Self::new(profile.rpc_url)
	}
}

#[async_trait]
impl BalanceReader for RpcBalanceReader {
	async fn balance_of(&self, token: Address, holder: Address) -> Result<U256> {
		let url = self
			.rpc_url
			.parse()
			.map_err(|e| GeneratorError::Rpc(format!("Invalid RPC URL {}: {}", self.rpc_url, e)))?;
		let provider = ProviderBuilder::new().connect_http(url);

		let call = IERC20::balanceOfCall { account: holder };
		let result = provider
			.call(
				TransactionRequest::default()
					.to(token)
					.input(call.abi_encode().into()),
			)
			.await
			.map_err(|e| GeneratorError::Rpc(format!("Failed to call balanceOf: {e}")))?;

		IERC20::balanceOfCall::abi_decode_returns(&result)
			.map_err(|e| GeneratorError::Rpc(format!("Failed to decode balance: {e}")))
	}
}

/// Decides whether an address may use the generator.
#[derive(Clone)]
pub struct AccessGate {
	reader: Arc<dyn BalanceReader>,
	token: Address,
	threshold: U256,
}

impl AccessGate {
	pub fn new(reader: Arc<dyn BalanceReader>, token: Address, threshold: U256) -> Self {
		Self {
			reader,
			token,
			threshold,
		}
	}

	/// Gate token.
	pub fn token(&self) -> Address {
		self.token
	}

	/// Minimum balance, in wei.
	pub fn threshold(&self) -> U256 {
		self.threshold
	}

	/// Checks the configured token and threshold.
	pub async fn check(&self, address: Address) -> bool {
		self.check_holding(address, self.token, self.threshold).await
	}

	/// Whether `address` holds at least `threshold` of `token`.
	///
	/// A failed read counts as not holding.
	pub async fn check_holding(&self, address: Address, token: Address, threshold: U256) -> bool {
		match self.reader.balance_of(token, address).await {
			Ok(balance) => {
				let holds = balance >= threshold;
				tracing::debug!(
					address = %address,
					%balance,
					%threshold,
					holds,
					"Checked gate token balance"
				);
				holds
			},
			Err(e) => {
				tracing::warn!(address = %address, token = %token, "Error checking token balance: {}", e);
				false
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn holder() -> Address {
		Address::repeat_byte(0x01)
	}

	fn token() -> Address {
		Address::repeat_byte(0xaa)
	}

	fn gate_with_balance(balance: U256) -> AccessGate {
		let mut reader = MockBalanceReader::new();
		reader
			.expect_balance_of()
			.withf(|t, h| *t == Address::repeat_byte(0xaa) && *h == Address::repeat_byte(0x01))
			.times(1)
			.returning(move |_, _| Box::pin(async move { Ok(balance) }));
		AccessGate::new(Arc::new(reader), token(), U256::from(1000))
	}

	#[tokio::test]
	async fn test_at_threshold_holds() {
		assert!(gate_with_balance(U256::from(1000)).check(holder()).await);
	}

	#[tokio::test]
	async fn test_below_threshold_denied() {
		assert!(!gate_with_balance(U256::from(999)).check(holder()).await);
	}

	#[tokio::test]
	async fn test_read_error_denies() {
		let mut reader = MockBalanceReader::new();
		reader
			.expect_balance_of()
			.times(1)
			.returning(|_, _| Box::pin(async { Err(GeneratorError::Rpc("timeout".into())) }));
		let gate = AccessGate::new(Arc::new(reader), token(), U256::from(1));

		assert!(!gate.check(holder()).await);
	}

	#[tokio::test]
	async fn test_explicit_threshold_overrides_configured() {
		let mut reader = MockBalanceReader::new();
		reader
			.expect_balance_of()
			.times(1)
			.returning(|_, _| Box::pin(async { Ok(U256::from(5)) }));
		let gate = AccessGate::new(Arc::new(reader), token(), U256::from(1000));

		assert!(gate.check_holding(holder(), token(), U256::from(5)).await);
	}

	#[test]
	fn test_balance_of_encoding() {
		let call = IERC20::balanceOfCall { account: holder() };
		let encoded = call.abi_encode();
		assert_eq!(&encoded[..4], &[0x70, 0xa0, 0x82, 0x31]);
		assert_eq!(encoded.len(), 36);
	}
}
