//! `deveats` binary entry point.
//!
//! Parses arguments, sets up logging and dispatches each subcommand to its
//! handler. Handlers report failures through [`Display`] and return an error
//! so the process exits non-zero.

use alloy_primitives::utils::format_ether;
use alloy_primitives::U256;
use anyhow::{anyhow, bail, Result};
use clap::Parser;
use generator_cli::{
	cli::{output::Display, Cli, Commands},
	load_form, Context,
};
use generator_core::{purchase_link, Action, FactoryReader, Form, GeneratorError, Step};
use generator_types::{parse_address, NetworkId};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

/// Most recent factory deployments listed by `factory`.
const RECENT_DEPLOYMENTS: u64 = 5;

#[tokio::main]
async fn main() {
	let _ = dotenvy::dotenv();

	let cli = Cli::parse();
	init_logging(cli.debug);

	let config = cli.config.as_deref();
	let result = match cli.command {
		Commands::Networks => handle_networks(),
		Commands::Generate { input, out, yes } => handle_generate(config, &input, out, yes).await,
		Commands::Deploy {
			input,
			network,
			yes,
		} => handle_deploy(config, &input, network, yes).await,
		Commands::CheckAccess { address } => handle_check_access(config, &address).await,
		Commands::Factory { network } => handle_factory(config, network).await,
	};

	if let Err(e) = result {
		Display::error(&format!("{e:#}"));
		std::process::exit(1);
	}
}

/// Compact tracing output filtered by `RUST_LOG`, defaulting to info for the
/// generator crates and warn elsewhere. `--debug` raises the default.
fn init_logging(debug: bool) {
	use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

	let default_filter = if debug {
		"deveats=debug,generator_cli=debug,generator_core=debug,generator_wallet=debug,generator_config=debug,warn"
	} else {
		"deveats=info,generator_cli=info,generator_core=info,generator_wallet=info,warn"
	};
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

	tracing_subscriber::registry()
		.with(
			fmt::layer()
				.with_target(true)
				.with_thread_ids(false)
				.with_file(false)
				.with_line_number(false)
				.compact(),
		)
		.with(env_filter)
		.init();
}

/// Prints field errors inline and turns `err` into the status line for the
/// failed `action`.
fn report(err: GeneratorError, action: Action) -> anyhow::Error {
	if let GeneratorError::ValidationFailed(errors) = &err {
		Display::field_errors(errors);
	}
	anyhow!(err.status_message(action))
}

/// Advances `form` from step 1 to Review, stopping at the first invalid step.
fn walk_form(form: &mut Form, action: Action) -> Result<()> {
	while form.step() != Step::Review {
		let step = form.step();
		match form.advance() {
			Ok(next) => info!(from = step.number(), to = next.number(), "Step complete"),
			Err(errors) => {
				Display::warning(&step.to_string());
				return Err(report(GeneratorError::ValidationFailed(errors), action));
			},
		}
	}
	Ok(())
}

async fn prepared_form(input: &Path, action: Action) -> Result<Form> {
	let mut form = load_form(input).await?;
	walk_form(&mut form, action)?;
	if let Some(summary) = form.review_summary() {
		Display::section(&Step::Review.to_string());
		Display::block(&summary.to_string());
	}
	Ok(form)
}

fn handle_networks() -> Result<()> {
	Display::header("Supported Networks");

	for id in NetworkId::ALL {
		let profile = id.profile();
		Display::section(&format!("{} ({id})", profile.name));
		Display::kv("Chain ID", &profile.chain_id.to_string());
		Display::kv("RPC", profile.rpc_url);
		Display::kv(
			"Factory",
			if profile.supports_deployment() {
				profile.factory_address
			} else {
				"not deployed"
			},
		);
		Display::kv(
			"Explorer",
			if profile.explorer_url.is_empty() {
				"none"
			} else {
				profile.explorer_url
			},
		);
		Display::kv(
			"Token gate",
			if profile.requires_token_gate {
				"required"
			} else {
				"waived"
			},
		);
	}
	Ok(())
}

#[instrument(skip_all, fields(input = %input.display()))]
async fn handle_generate(
	config: Option<&Path>,
	input: &Path,
	out: Option<PathBuf>,
	yes: bool,
) -> Result<()> {
	let ctx = Context::load(config, yes).await?;
	let network = ctx.network(None);
	let mut generator = ctx.generator(network)?;

	Display::header("Generate Contract");
	let address = generator
		.connect()
		.await
		.map_err(|e| report(e, Action::Connect))?;
	Display::success(&format!("Connected {address}"));

	generator.set_form(prepared_form(input, Action::Generate).await?);
	let source = generator
		.generate()
		.map_err(|e| report(e, Action::Generate))?;
	match out {
		Some(path) => {
			tokio::fs::write(&path, &source).await?;
			Display::success(&format!("Contract source written to {}", path.display()));
		},
		None => {
			Display::section("Contract Source");
			println!("{source}");
		},
	}

	Display::next_steps(&[
		"Compile the source next to DEvEatsTokenCustomizable.sol",
		"Set routerAddress before deploying",
		"Or run `deveats deploy` to deploy through the factory",
	]);
	Ok(())
}

#[instrument(skip_all, fields(input = %input.display()))]
async fn handle_deploy(
	config: Option<&Path>,
	input: &Path,
	network: Option<NetworkId>,
	yes: bool,
) -> Result<()> {
	let ctx = Context::load(config, yes).await?;
	let mut generator = ctx.generator(ctx.network(None))?;
	if let Some(network) = network {
		generator.set_network(network);
	}

	Display::header(&format!("Deploy to {}", generator.profile().name));
	let address = generator
		.connect()
		.await
		.map_err(|e| report(e, Action::Connect))?;
	Display::success(&format!("Connected {address}"));

	generator.set_form(prepared_form(input, Action::Deploy).await?);

	Display::section("Deployment");
	let result = generator
		.deploy()
		.await
		.map_err(|e| report(e, Action::Deploy))?;

	Display::kv("Transaction", &result.tx_hash.to_string());
	Display::kv("Block", &result.block_number.to_string());
	if let Some(token) = result.token_address {
		Display::kv("Token", &token.to_string());
	}
	if let Some(url) = &result.explorer_url {
		Display::kv("Explorer", url);
	}

	Display::next_steps(&[
		"Add liquidity for the token on the DEX router",
		"Run `deveats factory` to see it among the recent deployments",
	]);
	Ok(())
}

#[instrument(skip(config))]
async fn handle_check_access(config: Option<&Path>, address: &str) -> Result<()> {
	let ctx = Context::load(config, true).await?;
	let holder = parse_address(address)?;
	let gate = ctx.gate()?;

	Display::header("Access Check");
	Display::kv("Address", &holder.to_string());
	Display::kv("Gate token", &gate.token().to_string());
	Display::kv("Network", ctx.config.gate.network.profile().name);
	Display::kv("Minimum balance", &format!("{} wei", gate.threshold()));

	if gate.check(holder).await {
		Display::success("Access granted");
		Ok(())
	} else {
		Display::info(&format!("Buy $DEVeats on Uniswap: {}", purchase_link(gate.token())));
		bail!("Access denied")
	}
}

#[instrument(skip(config))]
async fn handle_factory(config: Option<&Path>, network: Option<NetworkId>) -> Result<()> {
	let ctx = Context::load(config, true).await?;
	let network = ctx.network(network);
	let profile = network.profile();

	Display::header(&format!("Factory on {}", profile.name));
	let reader = FactoryReader::new(profile).map_err(|e| report(e, Action::Deploy))?;
	Display::kv("Address", &reader.factory().to_string());

	let fee = reader.deployment_fee().await?;
	Display::kv("Deployment fee", &format!("{} ETH", format_ether(fee)));

	let count = reader.deployed_token_count().await?;
	Display::kv("Deployed tokens", &count.to_string());

	if count.is_zero() {
		return Ok(());
	}

	Display::section("Recent Deployments");
	let recent = count.min(U256::from(RECENT_DEPLOYMENTS));
	let mut index = count;
	while index > count - recent {
		index -= U256::from(1);
		let token = reader.deployed_token(index).await?;
		match profile.explorer_address_url(&token.to_string()) {
			Some(url) => Display::kv(&format!("#{index}"), &format!("{token} {url}")),
			None => Display::kv(&format!("#{index}"), &token.to_string()),
		}
	}
	Ok(())
}
