//! Generator engine.
//!
//! [`Generator`] owns the wallet session, the form and the active network
//! and sequences the wallet bridge, access gate, renderer and submitter.
//! Every mutating operation takes `&mut self`, so only one runs at a time.

use crate::deploy::{DeploymentResult, DeploymentSubmitter, StatusCallback};
use crate::error::{GeneratorError, Result};
use crate::form::Form;
use crate::gate::AccessGate;
use crate::session::Session;
use crate::template::render_contract;
use alloy_primitives::Address;
use chrono::{DateTime, SecondsFormat, Utc};
use generator_types::{ContractSpec, NetworkId, NetworkProfile};
use generator_wallet::{WalletBridge, WalletError};
use tracing::instrument;

/// Message the user signs to prove wallet ownership.
pub fn welcome_message(address: Address, timestamp: DateTime<Utc>) -> String {
	format!(
		"Welcome to DEVeats Contract Generator!\n\nPlease sign this message to verify wallet ownership.\n\nWallet: {}\nTimestamp: {}",
		address,
		timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
	)
}

/// The contract generator.
pub struct Generator {
	session: Session,
	bridge: WalletBridge,
	gate: AccessGate,
	network: NetworkId,
	form: Form,
	on_status: Option<StatusCallback>,
}

impl Generator {
	/// A disconnected generator on `network` with a fresh form.
	pub fn new(bridge: WalletBridge, gate: AccessGate, network: NetworkId) -> Self {
		Self {
			session: Session::new(),
			bridge,
			gate,
			network,
			form: Form::new(),
			on_status: None,
		}
	}

	/// Receives deployment progress.
	pub fn with_status_callback(mut self, callback: StatusCallback) -> Self {
		self.on_status = Some(callback);
		self
	}

	pub fn session(&self) -> &Session {
		&self.session
	}

	pub fn network(&self) -> NetworkId {
		self.network
	}

	pub fn profile(&self) -> &'static NetworkProfile {
		self.network.profile()
	}

	/// Selects the network used for connecting and deploying.
	pub fn set_network(&mut self, network: NetworkId) {
		self.network = network;
	}

	pub fn form(&self) -> &Form {
		&self.form
	}

	pub fn form_mut(&mut self) -> &mut Form {
		&mut self.form
	}

	/// Replaces the form, e.g. with one loaded from a file.
	pub fn set_form(&mut self, form: Form) {
		self.form = form;
	}

	/// Connects the wallet and grants access.
	///
	/// Requests accounts, has the user sign the welcome message and, on gated
	/// networks, checks the gate token balance. A failed balance check leaves
	/// the session fully disconnected. Switching the wallet to the active
	/// network afterwards is best effort.
	#[instrument(skip_all, fields(network = %self.network))]
	pub async fn connect(&mut self) -> Result<Address> {
		self.session.reset();

		let address = self.bridge.connect().await?;
		tracing::debug!(address = %address, "Wallet account exposed");

		let message = welcome_message(address, Utc::now());
		self.bridge
			.sign_message(address, &message)
			.await
			.map_err(|e| match e {
				WalletError::UserRejected => GeneratorError::SignatureRejected,
				other => other.into(),
			})?;

		let profile = self.profile();
		if profile.requires_token_gate {
			if !self.gate.check(address).await {
				self.session.reset();
				tracing::warn!(address = %address, "Access denied, gate token not held");
				return Err(GeneratorError::AccessDenied {
					token: self.gate.token(),
				});
			}
		} else {
			tracing::debug!(network = profile.name, "Token gate waived");
		}

		self.session.grant(address);
		tracing::info!(address = %address, "Wallet connected");

		if let Err(e) = self.bridge.switch_chain(profile).await {
			tracing::warn!(chain_id = profile.chain_id, "Could not switch wallet network: {}", e);
		}

		Ok(address)
	}

	fn require_access(&self) -> Result<Address> {
		let address = self
			.session
			.connected_address()
			.ok_or(GeneratorError::NotConnected)?;
		if !self.session.has_access() {
			return Err(GeneratorError::AccessDenied {
				token: self.gate.token(),
			});
		}
		Ok(address)
	}

	fn reviewed_spec(&self) -> Result<&ContractSpec> {
		self.form.spec().ok_or(GeneratorError::FormIncomplete)
	}

	/// Renders the reviewed configuration as Solidity source.
	pub fn generate(&self) -> Result<String> {
		self.require_access()?;
		Ok(render_contract(self.reviewed_spec()?))
	}

	/// Deploys the reviewed configuration on the active network.
	#[instrument(skip_all, fields(network = %self.network))]
	pub async fn deploy(&mut self) -> Result<DeploymentResult> {
		let from = self.require_access()?;
		let spec = self.reviewed_spec()?;

		let submitter =
			DeploymentSubmitter::new(self.bridge.clone()).with_status_callback(self.on_status.clone());
		let result = submitter.deploy(from, spec, self.profile()).await?;

		tracing::info!(
			tx_hash = %result.tx_hash,
			block = result.block_number,
			token = ?result.token_address,
			"Deployment confirmed"
		);
		Ok(result)
	}
}
