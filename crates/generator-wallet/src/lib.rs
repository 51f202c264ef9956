//! Wallet bridge for the DEVeats contract generator.
//!
//! The generator never holds keys itself. Every account, signature and
//! transaction request goes through a wallet provider implementing
//! [`WalletInterface`], the same request surface an injected browser wallet
//! exposes (EIP-1193). [`WalletBridge`] wraps an optional provider and maps
//! provider error codes onto [`WalletError`].

use alloy_primitives::{Address, Bytes, Log, B256, U256};
use async_trait::async_trait;
use generator_types::{chain_id_hex, NetworkProfile};
use serde::{Serialize, Serializer};
use std::sync::Arc;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod local;
}

pub use implementations::local::{ApprovalHook, LocalWallet, WalletRequest};

/// EIP-1193 provider error codes.
pub mod codes {
	/// The user rejected the request.
	pub const USER_REJECTED: i64 = 4001;
	/// The requested method or account has not been authorized.
	pub const UNAUTHORIZED: i64 = 4100;
	/// The provider does not recognize the requested chain.
	pub const UNRECOGNIZED_CHAIN: i64 = 4902;
	/// Internal JSON-RPC error.
	pub const INTERNAL: i64 = -32603;
}

/// Error returned by a wallet provider request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (code {code})")]
pub struct ProviderError {
	pub code: i64,
	pub message: String,
}

impl ProviderError {
	pub fn new(code: i64, message: impl Into<String>) -> Self {
		Self {
			code,
			message: message.into(),
		}
	}

	pub fn user_rejected() -> Self {
		Self::new(codes::USER_REJECTED, "User rejected the request")
	}

	pub fn unauthorized(message: impl Into<String>) -> Self {
		Self::new(codes::UNAUTHORIZED, message)
	}

	pub fn unrecognized_chain(chain_id: u64) -> Self {
		Self::new(
			codes::UNRECOGNIZED_CHAIN,
			format!("Unrecognized chain ID {}", chain_id_hex(chain_id)),
		)
	}

	pub fn internal(message: impl Into<String>) -> Self {
		Self::new(codes::INTERNAL, message)
	}

	pub fn is_user_rejected(&self) -> bool {
		self.code == codes::USER_REJECTED
	}
}

/// Errors surfaced by the wallet bridge.
#[derive(Debug, Error)]
pub enum WalletError {
	/// No wallet provider is available.
	#[error("No wallet provider available")]
	ProviderAbsent,
	/// The user declined the request.
	#[error("User rejected the request")]
	UserRejected,
	/// The provider could not move to the requested chain.
	#[error("Failed to switch network: {0}")]
	ChainSwitchFailed(String),
	/// The transaction was rejected, could not be sent or reverted.
	#[error("Transaction failed: {0}")]
	TransactionFailed(String),
	/// Any other provider failure.
	#[error("Wallet provider error: {0}")]
	Provider(#[from] ProviderError),
}

/// Chain parameters handed to the provider when it does not know a chain
/// (EIP-3085 `wallet_addEthereumChain`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainDefinition {
	#[serde(serialize_with = "serialize_chain_id")]
	pub chain_id: u64,
	pub chain_name: String,
	pub rpc_urls: Vec<String>,
	pub block_explorer_urls: Vec<String>,
	pub native_currency: NativeCurrency,
}

/// Native currency of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NativeCurrency {
	pub name: String,
	pub symbol: String,
	pub decimals: u8,
}

impl Default for NativeCurrency {
	fn default() -> Self {
		Self {
			name: "Ether".to_string(),
			symbol: "ETH".to_string(),
			decimals: 18,
		}
	}
}

fn serialize_chain_id<S: Serializer>(chain_id: &u64, serializer: S) -> Result<S::Ok, S::Error> {
	serializer.serialize_str(&chain_id_hex(*chain_id))
}

impl From<&NetworkProfile> for ChainDefinition {
	fn from(profile: &NetworkProfile) -> Self {
		let block_explorer_urls = if profile.explorer_url.is_empty() {
			Vec::new()
		} else {
			vec![profile.explorer_url.to_string()]
		};
		Self {
			chain_id: profile.chain_id,
			chain_name: profile.name.to_string(),
			rpc_urls: vec![profile.rpc_url.to_string()],
			block_explorer_urls,
			native_currency: NativeCurrency::default(),
		}
	}
}

/// A contract call to be signed and sent by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
	pub from: Address,
	pub to: Address,
	pub data: Bytes,
	pub value: U256,
}

/// The parts of a mined transaction's receipt the generator reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionOutcome {
	pub hash: B256,
	pub block_number: u64,
	pub success: bool,
	pub logs: Vec<Log>,
}

/// Request surface of a wallet provider.
///
/// Implementations own the keys and any user interaction. A request the user
/// declines must fail with code 4001; a chain the provider does not know must
/// fail with code 4902.
#[async_trait]
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait WalletInterface: Send + Sync {
	/// Asks the user to expose their accounts (`eth_requestAccounts`).
	async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError>;

	/// Returns accounts already exposed, without prompting (`eth_accounts`).
	async fn accounts(&self) -> Result<Vec<Address>, ProviderError>;

	/// Signs a UTF-8 message with the EIP-191 prefix (`personal_sign`).
	async fn personal_sign(&self, message: &str, address: Address)
		-> Result<Bytes, ProviderError>;

	/// Moves the provider to another chain (`wallet_switchEthereumChain`).
	async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderError>;

	/// Registers a chain with the provider (`wallet_addEthereumChain`).
	async fn add_chain(&self, chain: ChainDefinition) -> Result<(), ProviderError>;

	/// Signs and sends a transaction, resolving once it is mined.
	async fn send_transaction(
		&self,
		tx: TransactionRequest,
	) -> Result<TransactionOutcome, ProviderError>;
}

/// Maps wallet requests onto the generator's error taxonomy.
///
/// Built without a provider, every operation fails with
/// [`WalletError::ProviderAbsent`].
#[derive(Clone, Default)]
pub struct WalletBridge {
	provider: Option<Arc<dyn WalletInterface>>,
}

impl WalletBridge {
	/// Creates a bridge over a provider.
	///
	/// # Arguments
	///
	/// * `provider` - The wallet every request is forwarded to
	pub fn new(provider: Arc<dyn WalletInterface>) -> Self {
		Self {
			provider: Some(provider),
		}
	}

	/// A bridge with no provider behind it.
	pub fn absent() -> Self {
		Self { provider: None }
	}

	pub fn is_available(&self) -> bool {
		self.provider.is_some()
	}

	fn provider(&self) -> Result<&Arc<dyn WalletInterface>, WalletError> {
		self.provider.as_ref().ok_or(WalletError::ProviderAbsent)
	}

	/// Requests accounts and returns the first one.
	pub async fn connect(&self) -> Result<Address, WalletError> {
		let provider = self.provider()?;
		let accounts = provider.request_accounts().await.map_err(|e| match e.code {
			codes::USER_REJECTED | codes::UNAUTHORIZED => WalletError::UserRejected,
			_ => WalletError::Provider(e),
		})?;

		accounts.first().copied().ok_or(WalletError::UserRejected)
	}

	/// Lists accounts already exposed to the generator.
	pub async fn get_accounts(&self) -> Result<Vec<Address>, WalletError> {
		Ok(self.provider()?.accounts().await?)
	}

	/// Asks the provider to sign `text` with `address`.
	///
	/// # Arguments
	///
	/// * `address` - Account expected to sign, as returned by [`Self::connect`]
	/// * `text` - Plain-text message, signed with the EIP-191 prefix
	///
	/// # Errors
	///
	/// Returns [`WalletError::UserRejected`] when the user declines.
	pub async fn sign_message(&self, address: Address, text: &str) -> Result<Bytes, WalletError> {
		self.provider()?
			.personal_sign(text, address)
			.await
			.map_err(|e| {
				if e.is_user_rejected() {
					WalletError::UserRejected
				} else {
					WalletError::Provider(e)
				}
			})
	}

	/// Switches to the profile's chain, adding it first if the provider
	/// reports it as unrecognized.
	///
	/// # Arguments
	///
	/// * `profile` - Network to move to; also the source of the chain
	///   definition handed to the provider when it needs adding
	pub async fn switch_chain(&self, profile: &NetworkProfile) -> Result<(), WalletError> {
		let provider = self.provider()?;

		match provider.switch_chain(profile.chain_id).await {
			Ok(()) => Ok(()),
			Err(e) if e.code == codes::UNRECOGNIZED_CHAIN => {
				tracing::debug!(
					chain_id = profile.chain_id,
					network = profile.name,
					"Chain unknown to provider, adding it"
				);
				provider
					.add_chain(ChainDefinition::from(profile))
					.await
					.map_err(|e| WalletError::ChainSwitchFailed(e.message))?;
				provider
					.switch_chain(profile.chain_id)
					.await
					.map_err(|e| WalletError::ChainSwitchFailed(e.message))
			},
			Err(e) => Err(WalletError::ChainSwitchFailed(e.message)),
		}
	}

	/// Sends a transaction and waits for it to be mined. A reverted
	/// transaction is an error.
	///
	/// # Arguments
	///
	/// * `tx` - Call to sign and send, including any value in wei
	pub async fn send_transaction(
		&self,
		tx: TransactionRequest,
	) -> Result<TransactionOutcome, WalletError> {
		let outcome = self
			.provider()?
			.send_transaction(tx)
			.await
			.map_err(|e| WalletError::TransactionFailed(e.message))?;

		if !outcome.success {
			return Err(WalletError::TransactionFailed(format!(
				"Transaction {} reverted",
				outcome.hash
			)));
		}

		Ok(outcome)
	}
}
