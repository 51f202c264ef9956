//! Common types for the DEVeats contract generator.
//!
//! This crate holds the data model shared by the generator crates: validated
//! token configuration, the editable form draft, field-level validation
//! results, the static network table and address helpers.

/// Address parsing and display helpers.
pub mod address;
/// Editable form inputs.
pub mod draft;
/// Static network profile table.
pub mod networks;
/// Initial supply parsing.
pub mod supply;
/// Validated token configuration.
pub mod token;
pub mod utils;
/// Field-level validation results.
pub mod validation;

pub use address::{format_address_short, parse_address, AddressError};
pub use draft::{FormDraft, TokenDraft, WalletDraft, WalletField};
pub use networks::{chain_id_hex, NetworkId, NetworkProfile, UnknownNetwork};
pub use supply::{InitialSupply, InvalidSupply};
pub use token::{
	ContractSpec, FeatureFlags, FeatureKey, TaxWallet, TokenConfig, MAX_TAX_PERCENT,
	TOTAL_SHARE_PERCENT,
};
pub use validation::{FieldError, FieldErrors, FieldKey, Validation};

pub use alloy_primitives::{Address, U256};
