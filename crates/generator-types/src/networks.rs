//! Static network profile table.
//!
//! Each supported network has a fixed profile describing how to reach it and
//! which generator features are available there. Profiles are plain
//! configuration and are not user-editable; selecting a network means picking
//! a [`NetworkId`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a network identifier is not in the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown network '{0}' (expected one of: localhost, base, base-sepolia)")]
pub struct UnknownNetwork(pub String);

/// Identifier of a supported network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NetworkId {
	Localhost,
	Base,
	BaseSepolia,
}

/// Connection and feature settings for one network.
///
/// An empty `factory_address` means the deployment factory has not been
/// deployed there yet and deployments must be refused. An empty
/// `explorer_url` means no block explorer is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkProfile {
	pub name: &'static str,
	pub chain_id: u64,
	pub rpc_url: &'static str,
	pub router_address: &'static str,
	pub factory_address: &'static str,
	pub explorer_url: &'static str,
	pub requires_token_gate: bool,
}

const LOCALHOST: NetworkProfile = NetworkProfile {
	name: "Localhost (Hardhat)",
	chain_id: 31337,
	rpc_url: "http://127.0.0.1:8545",
	router_address: "0x7a250d5630B4cF539739dF2C5dAcb4c659F2488D",
	factory_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3",
	explorer_url: "",
	requires_token_gate: false,
};

const BASE: NetworkProfile = NetworkProfile {
	name: "Base Mainnet",
	chain_id: 8453,
	rpc_url: "https://mainnet.base.org",
	router_address: "0x4752ba5dbc23f44d87826276bf6fd6b1c372ad24",
	factory_address: "",
	explorer_url: "https://basescan.org",
	requires_token_gate: true,
};

const BASE_SEPOLIA: NetworkProfile = NetworkProfile {
	name: "Base Sepolia",
	chain_id: 84532,
	rpc_url: "https://sepolia.base.org",
	router_address: "0x4752ba5dbc23f44d87826276bf6fd6b1c372ad24",
	factory_address: "",
	explorer_url: "https://sepolia.basescan.org",
	requires_token_gate: false,
};

impl NetworkId {
	/// All networks in display order.
	pub const ALL: [NetworkId; 3] = [NetworkId::Localhost, NetworkId::Base, NetworkId::BaseSepolia];

	/// Returns the static profile for this network.
	pub fn profile(&self) -> &'static NetworkProfile {
		match self {
			NetworkId::Localhost => &LOCALHOST,
			NetworkId::Base => &BASE,
			NetworkId::BaseSepolia => &BASE_SEPOLIA,
		}
	}

	/// The identifier as used in configuration files and on the command line.
	pub fn as_str(&self) -> &'static str {
		match self {
			NetworkId::Localhost => "localhost",
			NetworkId::Base => "base",
			NetworkId::BaseSepolia => "base-sepolia",
		}
	}

	/// Finds the network with the given chain id.
	pub fn from_chain_id(chain_id: u64) -> Option<Self> {
		Self::ALL
			.into_iter()
			.find(|id| id.profile().chain_id == chain_id)
	}
}

impl fmt::Display for NetworkId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for NetworkId {
	type Err = UnknownNetwork;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"localhost" => Ok(NetworkId::Localhost),
			"base" => Ok(NetworkId::Base),
			"base-sepolia" | "base_sepolia" => Ok(NetworkId::BaseSepolia),
			other => Err(UnknownNetwork(other.to_string())),
		}
	}
}

/// Chain id in the `0x`-prefixed hex form wallet providers expect.
pub fn chain_id_hex(chain_id: u64) -> String {
	format!("0x{chain_id:x}")
}

impl NetworkProfile {
	/// Whether a deployment factory exists on this network.
	pub fn supports_deployment(&self) -> bool {
		!self.factory_address.is_empty()
	}

	/// Explorer page for an address, if the network has an explorer.
	pub fn explorer_address_url(&self, address: &str) -> Option<String> {
		if self.explorer_url.is_empty() {
			None
		} else {
			Some(format!("{}/address/{}", self.explorer_url, address))
		}
	}
}
