//! Local private-key wallet provider.
//!
//! Stands in for a browser wallet when the generator runs from a terminal.
//! Keys are held in an alloy [`PrivateKeySigner`]; transactions go out over
//! the active chain's HTTP RPC endpoint. Every request that would prompt the
//! user in a browser wallet is passed to an [`ApprovalHook`] first.

use crate::{
	ChainDefinition, ProviderError, TransactionOutcome, TransactionRequest, WalletInterface,
};
use alloy_network::EthereumWallet;
use alloy_primitives::{Address, Bytes, U256};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest as RpcTransactionRequest;
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A request that needs the user's consent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletRequest {
	/// Expose the wallet address to the generator.
	Connect { address: Address },
	/// Sign a plain-text message.
	SignMessage { message: String },
	/// Register a chain the wallet does not know yet.
	AddChain { chain_id: u64, chain_name: String },
	/// Sign and send a transaction.
	SendTransaction {
		chain_id: u64,
		to: Address,
		value: U256,
	},
}

/// Decides whether a request goes ahead. Returning `false` declines it.
pub type ApprovalHook = Arc<dyn Fn(&WalletRequest) -> bool + Send + Sync>;

/// Private-key wallet implementing the provider request surface.
pub struct LocalWallet {
	signer: PrivateKeySigner,
	chains: RwLock<HashMap<u64, ChainDefinition>>,
	active_chain: RwLock<u64>,
	approve: ApprovalHook,
}

impl fmt::Debug for LocalWallet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LocalWallet")
			.field("address", &self.signer.address())
			.finish()
	}
}

impl LocalWallet {
	/// Creates a wallet from a hex private key (with or without 0x prefix),
	/// starting on `chain`. Every request is approved.
	pub fn new(private_key_hex: &str, chain: ChainDefinition) -> Result<Self, ProviderError> {
		let signer = private_key_hex
			.trim()
			.parse::<PrivateKeySigner>()
			.map_err(|e| ProviderError::internal(format!("Invalid private key: {e}")))?;

		let active = chain.chain_id;
		Ok(Self {
			signer,
			chains: RwLock::new(HashMap::from([(active, chain)])),
			active_chain: RwLock::new(active),
			approve: Arc::new(|_| true),
		})
	}

	/// Replaces the approval hook.
	pub fn with_approval(mut self, hook: ApprovalHook) -> Self {
		self.approve = hook;
		self
	}

	pub fn address(&self) -> Address {
		self.signer.address()
	}

	/// Chain requests are currently sent to.
	pub async fn active_chain(&self) -> u64 {
		*self.active_chain.read().await
	}

	fn require_approval(&self, request: WalletRequest) -> Result<(), ProviderError> {
		if (self.approve)(&request) {
			Ok(())
		} else {
			tracing::debug!(?request, "Wallet request declined");
			Err(ProviderError::user_rejected())
		}
	}

	async fn active_rpc_url(&self) -> Result<(u64, String), ProviderError> {
		let chain_id = *self.active_chain.read().await;
		let chains = self.chains.read().await;
		let url = chains
			.get(&chain_id)
			.and_then(|c| c.rpc_urls.first())
			.cloned()
			.ok_or_else(|| {
				ProviderError::internal(format!("No RPC URL for chain {chain_id}"))
			})?;
		Ok((chain_id, url))
	}
}

#[async_trait]
impl WalletInterface for LocalWallet {
	async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
		self.require_approval(WalletRequest::Connect {
			address: self.address(),
		})?;
		Ok(vec![self.address()])
	}

	async fn accounts(&self) -> Result<Vec<Address>, ProviderError> {
		Ok(vec![self.address()])
	}

	async fn personal_sign(
		&self,
		message: &str,
		address: Address,
	) -> Result<Bytes, ProviderError> {
		if address != self.address() {
			return Err(ProviderError::unauthorized(format!(
				"Account {address} is not managed by this wallet"
			)));
		}
		self.require_approval(WalletRequest::SignMessage {
			message: message.to_string(),
		})?;

		let signature = self
			.signer
			.sign_message(message.as_bytes())
			.await
			.map_err(|e| ProviderError::internal(format!("Failed to sign message: {e}")))?;

		Ok(Bytes::from(signature.as_bytes().to_vec()))
	}

	async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderError> {
		if !self.chains.read().await.contains_key(&chain_id) {
			return Err(ProviderError::unrecognized_chain(chain_id));
		}
		*self.active_chain.write().await = chain_id;
		tracing::debug!(chain_id, "Switched active chain");
		Ok(())
	}

	async fn add_chain(&self, chain: ChainDefinition) -> Result<(), ProviderError> {
		if chain.rpc_urls.is_empty() {
			return Err(ProviderError::internal("Chain definition has no RPC URL"));
		}
		self.require_approval(WalletRequest::AddChain {
			chain_id: chain.chain_id,
			chain_name: chain.chain_name.clone(),
		})?;
		self.chains.write().await.insert(chain.chain_id, chain);
		Ok(())
	}

	async fn send_transaction(
		&self,
		tx: TransactionRequest,
	) -> Result<TransactionOutcome, ProviderError> {
		if tx.from != self.address() {
			return Err(ProviderError::unauthorized(format!(
				"Account {} is not managed by this wallet",
				tx.from
			)));
		}

		let (chain_id, rpc_url) = self.active_rpc_url().await?;
		self.require_approval(WalletRequest::SendTransaction {
			chain_id,
			to: tx.to,
			value: tx.value,
		})?;

		let url = rpc_url
			.parse()
			.map_err(|e| ProviderError::internal(format!("Invalid RPC URL {rpc_url}: {e}")))?;
		let wallet = EthereumWallet::from(self.signer.clone().with_chain_id(Some(chain_id)));
		let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);

		let request = RpcTransactionRequest::default()
			.from(tx.from)
			.to(tx.to)
			.input(tx.data.into())
			.value(tx.value);

		tracing::debug!(
			chain_id,
			to = %tx.to,
			value = %tx.value,
			"Sending transaction"
		);

		let pending = provider.send_transaction(request).await.map_err(|e| {
			tracing::error!(chain_id, "Transaction submission failed: {}", e);
			ProviderError::internal(format!("Failed to send transaction: {e}"))
		})?;

		let receipt = pending
			.get_receipt()
			.await
			.map_err(|e| ProviderError::internal(format!("Failed to get receipt: {e}")))?;

		Ok(TransactionOutcome {
			hash: receipt.transaction_hash,
			block_number: receipt.block_number.unwrap_or(0),
			success: receipt.status(),
			logs: receipt
				.inner
				.logs()
				.iter()
				.map(|log| log.inner.clone())
				.collect(),
		})
	}
}
