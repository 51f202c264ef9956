//! Token deployment through the DEVeats factory contract.
//!
//! A deployment is a single payable `deployToken` call signed by the user's
//! wallet. The deployed token's address is read back from the factory's
//! `TokenDeployed` event in the receipt.

use crate::error::{GeneratorError, Result};
use alloy_primitives::utils::parse_ether;
use alloy_primitives::{Address, Bytes, Log, B256, U256};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest as RpcTransactionRequest;
use alloy_sol_types::{sol, SolCall, SolEvent};
use generator_types::{
	parse_address, ContractSpec, FieldErrors, FieldKey, InitialSupply, NetworkProfile,
};
use generator_wallet::{TransactionRequest, WalletBridge};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;

sol! {
	interface IDEVeatsFactory {
		function deployToken(
			string name,
			string symbol,
			uint256 initialSupply,
			address routerAddress,
			uint8 buyTax,
			uint8 sellTax,
			address[] taxWallets,
			string[] walletNames,
			uint8[] walletShares,
			bool burnOnExtraction,
			bool maxWalletEnabled,
			uint256 maxWalletBps,
			bool maxTxEnabled,
			uint256 maxTxBps
		) external payable returns (address);

		function DEPLOYMENT_FEE() external view returns (uint256);
		function getDeployedTokenCount() external view returns (uint256);
		function deployedTokens(uint256 index) external view returns (address);

		event TokenDeployed(address indexed tokenAddress, address indexed deployer, string name, string symbol);
	}
}

/// Fee sent with every deployment, in ether.
pub const DEPLOYMENT_FEE_ETH: &str = "0.0005";

/// Deployment fee in wei.
pub fn deployment_fee() -> Result<U256> {
	parse_ether(DEPLOYMENT_FEE_ETH)
		.map_err(|e| GeneratorError::TransactionFailed(format!("Invalid deployment fee: {e}")))
}

/// Progress of a deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentStatus {
	Preparing,
	ConnectingFactory,
	RequestingApproval,
	AwaitingConfirmation,
	Deployed { address: Address },
	DeployedWithoutAddress,
	Failed(String),
}

impl fmt::Display for DeploymentStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DeploymentStatus::Preparing => f.write_str("Preparing deployment..."),
			DeploymentStatus::ConnectingFactory => f.write_str("Connecting to factory contract..."),
			DeploymentStatus::RequestingApproval => {
				f.write_str("Requesting deployment approval...")
			},
			DeploymentStatus::AwaitingConfirmation => {
				f.write_str("Deploying contract... Please wait for confirmation.")
			},
			DeploymentStatus::Deployed { address } => {
				write!(f, "Success! Contract deployed at {address}")
			},
			DeploymentStatus::DeployedWithoutAddress => {
				f.write_str("Contract deployed successfully!")
			},
			DeploymentStatus::Failed(reason) => write!(f, "Deployment failed: {reason}"),
		}
	}
}

/// Receives every status change of a deployment.
pub type StatusCallback = Arc<dyn Fn(&DeploymentStatus) + Send + Sync>;

/// A mined deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentResult {
	pub tx_hash: B256,
	pub block_number: u64,
	/// Address from the `TokenDeployed` event, if the receipt carried one.
	pub token_address: Option<Address>,
	/// Explorer page of the token, when both address and explorer are known.
	pub explorer_url: Option<String>,
}

fn percent_to_bps(percent: Decimal) -> U256 {
	let bps = (percent * Decimal::ONE_HUNDRED).round().to_u64().unwrap_or(0);
	U256::from(bps)
}

fn whole_supply(supply: &InitialSupply) -> Result<U256> {
	supply.to_whole().ok_or_else(|| {
		let mut errors = FieldErrors::new();
		errors.insert(
			FieldKey::InitialSupply,
			"Initial supply must be a whole number to deploy",
		);
		GeneratorError::ValidationFailed(errors)
	})
}

fn profile_address(value: &str, what: &str) -> Result<Address> {
	parse_address(value).map_err(|e| GeneratorError::TransactionFailed(format!("Invalid {what}: {e}")))
}

/// Encodes the factory `deployToken` call for `spec`.
pub fn encode_deploy_call(spec: &ContractSpec, router: Address) -> Result<Bytes> {
	let token = &spec.token;
	let features = &spec.features;

	let call = IDEVeatsFactory::deployTokenCall {
		name: token.name.clone(),
		symbol: token.symbol.clone(),
		initialSupply: whole_supply(&token.initial_supply)?,
		routerAddress: router,
		buyTax: token.buy_tax_percent,
		sellTax: token.sell_tax_percent,
		taxWallets: spec.wallets.iter().map(|w| w.address).collect(),
		walletNames: spec.wallets.iter().map(|w| w.display_name.clone()).collect(),
		walletShares: spec.wallets.iter().map(|w| w.share_percent).collect(),
		burnOnExtraction: features.burn_on_extraction,
		maxWalletEnabled: features.max_wallet_enabled,
		maxWalletBps: percent_to_bps(features.max_wallet_percent),
		maxTxEnabled: features.max_tx_enabled,
		maxTxBps: percent_to_bps(features.max_tx_percent),
	};

	Ok(call.abi_encode().into())
}

/// Finds the deployed token address in receipt logs.
pub fn find_deployed_address(logs: &[Log]) -> Option<Address> {
	logs.iter()
		.filter(|log| log.topics().first() == Some(&IDEVeatsFactory::TokenDeployed::SIGNATURE_HASH))
		.find_map(|log| IDEVeatsFactory::TokenDeployed::decode_log_data(&log.data).ok())
		.map(|event| event.tokenAddress)
}

/// Sends deployments through the user's wallet.
pub struct DeploymentSubmitter {
	bridge: WalletBridge,
	on_status: Option<StatusCallback>,
}

impl DeploymentSubmitter {
	pub fn new(bridge: WalletBridge) -> Self {
		Self {
			bridge,
			on_status: None,
		}
	}

	pub fn with_status_callback(mut self, callback: Option<StatusCallback>) -> Self {
		self.on_status = callback;
		self
	}

	fn report(&self, status: DeploymentStatus) {
		tracing::info!("{}", status);
		if let Some(callback) = &self.on_status {
			callback(&status);
		}
	}

	/// Deploys `spec` from `from` on the network described by `profile`.
	///
	/// Fails with [`GeneratorError::NotSupportedOnNetwork`] before touching
	/// the wallet when the network has no factory. Nothing is retried.
	pub async fn deploy(
		&self,
		from: Address,
		spec: &ContractSpec,
		profile: &NetworkProfile,
	) -> Result<DeploymentResult> {
		if !profile.supports_deployment() {
			return Err(GeneratorError::NotSupportedOnNetwork(profile.name.to_string()));
		}

		let factory = profile_address(profile.factory_address, "factory address")?;
		let router = profile_address(profile.router_address, "router address")?;
		let data = encode_deploy_call(spec, router)?;
		let value = deployment_fee()?;

		self.report(DeploymentStatus::Preparing);
		match self.submit(from, factory, data, value, profile).await {
			Ok(result) => Ok(result),
			Err(e) => {
				self.report(DeploymentStatus::Failed(e.to_string()));
				Err(e)
			},
		}
	}

	async fn submit(
		&self,
		from: Address,
		factory: Address,
		data: Bytes,
		value: U256,
		profile: &NetworkProfile,
	) -> Result<DeploymentResult> {
		self.bridge.switch_chain(profile).await?;

		self.report(DeploymentStatus::ConnectingFactory);
		let tx = TransactionRequest {
			from,
			to: factory,
			data,
			value,
		};

		self.report(DeploymentStatus::RequestingApproval);
		let pending = self.bridge.send_transaction(tx);
		self.report(DeploymentStatus::AwaitingConfirmation);
		let outcome = pending.await?;

		let token_address = find_deployed_address(&outcome.logs);
		match token_address {
			Some(address) => self.report(DeploymentStatus::Deployed { address }),
			None => self.report(DeploymentStatus::DeployedWithoutAddress),
		}

		Ok(DeploymentResult {
			tx_hash: outcome.hash,
			block_number: outcome.block_number,
			token_address,
			explorer_url: token_address
				.and_then(|address| profile.explorer_address_url(&address.to_string())),
		})
	}
}

/// Read-only queries against a network's factory.
#[derive(Debug, Clone)]
pub struct FactoryReader {
	rpc_url: String,
	factory: Address,
}

impl FactoryReader {
	pub fn new(profile: &NetworkProfile) -> Result<Self> {
		if !profile.supports_deployment() {
			return Err(GeneratorError::NotSupportedOnNetwork(profile.name.to_string()));
		}
		Ok(Self {
			rpc_url: profile.rpc_url.to_string(),
			factory: profile_address(profile.factory_address, "factory address")?,
		})
	}

	pub fn factory(&self) -> Address {
		self.factory
	}

	async fn call<C: SolCall>(&self, call: C) -> Result<C::Return> {
		let url = self
			.rpc_url
			.parse()
			.map_err(|e| GeneratorError::Rpc(format!("Invalid RPC URL {}: {}", self.rpc_url, e)))?;
		let provider = ProviderBuilder::new().connect_http(url);

		let result = provider
			.call(
				RpcTransactionRequest::default()
					.to(self.factory)
					.input(call.abi_encode().into()),
			)
			.await
			.map_err(|e| GeneratorError::Rpc(format!("Factory call failed: {e}")))?;

		C::abi_decode_returns(&result)
			.map_err(|e| GeneratorError::Rpc(format!("Failed to decode factory response: {e}")))
	}

	/// Fee the factory charges, in wei.
	pub async fn deployment_fee(&self) -> Result<U256> {
		self.call(IDEVeatsFactory::DEPLOYMENT_FEECall {}).await
	}

	pub async fn deployed_token_count(&self) -> Result<U256> {
		self.call(IDEVeatsFactory::getDeployedTokenCountCall {}).await
	}

	pub async fn deployed_token(&self, index: U256) -> Result<Address> {
		self.call(IDEVeatsFactory::deployedTokensCall { index }).await
	}
}
