//! Error taxonomy of the generator.

use alloy_primitives::Address;
use generator_types::FieldErrors;
use generator_wallet::WalletError;
use thiserror::Error;

/// Every failure a generator action can end in.
///
/// Failures are caught at the action that triggered them and reported either
/// as inline field errors ([`GeneratorError::ValidationFailed`]) or as a
/// single status line ([`GeneratorError::status_message`]). Nothing retries.
#[derive(Debug, Error)]
pub enum GeneratorError {
	#[error("No wallet provider available")]
	ProviderAbsent,
	#[error("User rejected the request")]
	UserRejected,
	#[error("User declined to sign the welcome message")]
	SignatureRejected,
	#[error("Access denied: wallet does not hold the required token balance")]
	AccessDenied { token: Address },
	#[error("Failed to switch network: {0}")]
	ChainSwitchFailed(String),
	#[error("Validation failed: {0}")]
	ValidationFailed(FieldErrors),
	#[error("Factory contract not deployed on {0} yet")]
	NotSupportedOnNetwork(String),
	#[error("Transaction failed: {0}")]
	TransactionFailed(String),
	#[error("Wallet not connected")]
	NotConnected,
	#[error("Form is not at the review step")]
	FormIncomplete,
	#[error("Wallet provider error: {0}")]
	Provider(String),
	#[error("RPC error: {0}")]
	Rpc(String),
}

pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Where to buy the gate token.
pub fn purchase_link(token: Address) -> String {
	format!("https://app.uniswap.org/swap?outputCurrency={token}&chain=base")
}

/// The user action a failure is reported against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
	Connect,
	Generate,
	Deploy,
}

impl GeneratorError {
	/// The one-line message shown to the user when `action` fails with this
	/// error.
	///
	/// # Arguments
	///
	/// * `action` - The action that failed; picks the prefix of errors that
	///   carry no message of their own
	pub fn status_message(&self, action: Action) -> String {
		match self {
			GeneratorError::ProviderAbsent => {
				"Please install a Web3 wallet to use this feature".to_string()
			},
			GeneratorError::SignatureRejected => {
				"You must sign the message to connect your wallet.".to_string()
			},
			GeneratorError::AccessDenied { token } => format!(
				"Access Denied: You must hold DEVeats tokens to use this generator.\n\nBuy $DEVeats on Uniswap: {}",
				purchase_link(*token)
			),
			GeneratorError::ValidationFailed(_) => "Please fix the errors in the form".to_string(),
			GeneratorError::NotSupportedOnNetwork(_) => {
				"Factory contract not deployed on this network yet. Please check back later or deploy manually.".to_string()
			},
			GeneratorError::NotConnected => "Please connect your wallet first".to_string(),
			GeneratorError::UserRejected
			| GeneratorError::ChainSwitchFailed(_)
			| GeneratorError::TransactionFailed(_)
			| GeneratorError::Provider(_)
			| GeneratorError::Rpc(_)
			| GeneratorError::FormIncomplete => match action {
				Action::Connect => format!("Failed to connect wallet: {self}"),
				Action::Generate => format!("Failed to generate contract: {self}"),
				Action::Deploy => format!("Deployment failed: {self}"),
			},
		}
	}
}

impl From<WalletError> for GeneratorError {
	fn from(err: WalletError) -> Self {
		match err {
			WalletError::ProviderAbsent => GeneratorError::ProviderAbsent,
			WalletError::UserRejected => GeneratorError::UserRejected,
			WalletError::ChainSwitchFailed(msg) => GeneratorError::ChainSwitchFailed(msg),
			WalletError::TransactionFailed(msg) => GeneratorError::TransactionFailed(msg),
			WalletError::Provider(e) => GeneratorError::Provider(e.to_string()),
		}
	}
}

impl From<FieldErrors> for GeneratorError {
	fn from(errors: FieldErrors) -> Self {
		GeneratorError::ValidationFailed(errors)
	}
}
