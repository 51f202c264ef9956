//! Command-line interface definitions.

pub mod output;

use clap::{Parser, Subcommand};
use generator_types::NetworkId;
use std::path::PathBuf;

/// DEVeats token contract generator.
#[derive(Parser, Debug)]
#[command(name = "deveats")]
#[command(about = "DEVeats Contract Generator - configure, render and deploy gated ERC-20 tokens")]
#[command(version)]
pub struct Cli {
	#[command(subcommand)]
	pub command: Commands,

	/// Configuration file (built-in defaults when omitted)
	#[arg(global = true, long, env = "DEVEATS_CONFIG")]
	pub config: Option<PathBuf>,

	/// Enable debug logging
	#[arg(global = true, long, env = "DEVEATS_DEBUG")]
	pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// List supported networks
	Networks,

	/// Walk a form file through every step and render the contract source
	Generate {
		/// Form file (TOML)
		#[arg(long)]
		input: PathBuf,

		/// Write the source here instead of printing it
		#[arg(long)]
		out: Option<PathBuf>,

		/// Approve every wallet request without prompting
		#[arg(long)]
		yes: bool,
	},

	/// Walk a form file through every step and deploy it through the factory
	Deploy {
		/// Form file (TOML)
		#[arg(long)]
		input: PathBuf,

		/// Target network (defaults to the configured network)
		#[arg(long)]
		network: Option<NetworkId>,

		/// Approve every wallet request without prompting
		#[arg(long)]
		yes: bool,
	},

	/// Check whether an address holds the gate token
	CheckAccess {
		/// Address to check
		#[arg(long)]
		address: String,
	},

	/// Show the deployment factory's fee and deployed token count
	Factory {
		/// Network to query (defaults to the configured network)
		#[arg(long)]
		network: Option<NetworkId>,
	},
}
