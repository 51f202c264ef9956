//! Four-step token configuration form.
//!
//! The form moves through Token Details, Tax Wallets, Features and Review.
//! Each step's inputs live in a [`FormDraft`]; the current step is a
//! [`FormState`] variant that owns that step's validation errors, so leaving
//! a step discards them. Only [`FormState::Review`] holds a validated
//! [`ContractSpec`], which is what the renderer and the submitter consume.

mod summary;
mod validate;

pub use summary::{ReviewSummary, WalletLine};
pub use validate::{validate_token, validate_wallets};

use generator_types::{
	ContractSpec, FeatureFlags, FeatureKey, FieldErrors, FieldKey, FormDraft, Validation,
	WalletDraft, WalletField,
};
use rust_decimal::Decimal;
use std::fmt;

/// Form steps, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
	TokenDetails = 1,
	TaxWallets = 2,
	Features = 3,
	Review = 4,
}

impl Step {
	pub fn number(&self) -> u8 {
		*self as u8
	}

	pub fn title(&self) -> &'static str {
		match self {
			Step::TokenDetails => "Token Details",
			Step::TaxWallets => "Tax Wallets",
			Step::Features => "Features",
			Step::Review => "Review & Deploy",
		}
	}
}

impl fmt::Display for Step {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Step {}: {}", self.number(), self.title())
	}
}

/// Current step and its step-local data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
	TokenDetails { errors: FieldErrors },
	TaxWallets { errors: FieldErrors },
	Features,
	Review { spec: ContractSpec },
}

impl FormState {
	pub fn step(&self) -> Step {
		match self {
			FormState::TokenDetails { .. } => Step::TokenDetails,
			FormState::TaxWallets { .. } => Step::TaxWallets,
			FormState::Features => Step::Features,
			FormState::Review { .. } => Step::Review,
		}
	}

	fn token_details() -> Self {
		FormState::TokenDetails {
			errors: FieldErrors::new(),
		}
	}

	fn tax_wallets() -> Self {
		FormState::TaxWallets {
			errors: FieldErrors::new(),
		}
	}
}

/// The form: draft inputs plus the step state machine.
///
/// Field setters only act while the step that shows the field is current
/// and return whether the edit was applied. Editing a field clears that
/// field's error; the full step is validated again on [`Form::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
	draft: FormDraft,
	state: FormState,
}

impl Default for Form {
	fn default() -> Self {
		Self::new()
	}
}

impl Form {
	/// A fresh form at step 1 with default inputs.
	pub fn new() -> Self {
		Self::from_draft(FormDraft::default())
	}

	/// A form at step 1 pre-filled with `draft`.
	pub fn from_draft(mut draft: FormDraft) -> Self {
		if draft.wallets.is_empty() {
			draft.wallets.push(WalletDraft::blank());
		}
		clamp_feature_percents(&mut draft.features);
		Self {
			draft,
			state: FormState::token_details(),
		}
	}

	pub fn draft(&self) -> &FormDraft {
		&self.draft
	}

	pub fn state(&self) -> &FormState {
		&self.state
	}

	pub fn step(&self) -> Step {
		self.state.step()
	}

	/// Errors of the current step, empty on steps without validation.
	pub fn errors(&self) -> Option<&FieldErrors> {
		match &self.state {
			FormState::TokenDetails { errors } | FormState::TaxWallets { errors } => Some(errors),
			FormState::Features | FormState::Review { .. } => None,
		}
	}

	/// The validated configuration, available at the review step only.
	pub fn spec(&self) -> Option<&ContractSpec> {
		match &self.state {
			FormState::Review { spec } => Some(spec),
			_ => None,
		}
	}

	/// Review of the validated configuration, available at the review step only.
	pub fn review_summary(&self) -> Option<ReviewSummary> {
		self.spec().map(ReviewSummary::from)
	}

	/// Sum of wallet shares as typed. Unparsable shares count as zero.
	pub fn total_share(&self) -> i64 {
		self.draft.total_share()
	}

	/// Validates the current step and moves to the next one.
	///
	/// On failure the form stays where it is, the step's errors are replaced
	/// and a copy is returned. Advancing from Review is a no-op.
	pub fn advance(&mut self) -> Validation<Step> {
		let next = match &self.state {
			FormState::TokenDetails { .. } => {
				validate_token(&self.draft.token).map(|_| FormState::tax_wallets())
			},
			FormState::TaxWallets { .. } => {
				validate_wallets(&self.draft.wallets).map(|_| FormState::Features)
			},
			FormState::Features => self.build_spec().map(|spec| FormState::Review { spec }),
			FormState::Review { .. } => return Ok(Step::Review),
		};

		match next {
			Ok(state) => {
				self.state = state;
				tracing::debug!(step = self.step().number(), "Form advanced");
				Ok(self.step())
			},
			Err(errors) => {
				match &mut self.state {
					FormState::TokenDetails { errors: current }
					| FormState::TaxWallets { errors: current } => *current = errors.clone(),
					_ => {},
				}
				Err(errors)
			},
		}
	}

	/// Moves back one step. No-op at step 1.
	pub fn retreat(&mut self) -> Step {
		self.state = match self.state {
			FormState::TokenDetails { .. } | FormState::TaxWallets { .. } => {
				FormState::token_details()
			},
			FormState::Features => FormState::tax_wallets(),
			FormState::Review { .. } => FormState::Features,
		};
		self.step()
	}

	fn build_spec(&self) -> Validation<ContractSpec> {
		let token = validate_token(&self.draft.token)?;
		let wallets = validate_wallets(&self.draft.wallets)?;
		Ok(ContractSpec {
			token,
			wallets,
			features: self.draft.features.clone(),
		})
	}

	fn edit_token_field(&mut self, field: FieldKey, apply: impl FnOnce(&mut FormDraft)) -> bool {
		match &mut self.state {
			FormState::TokenDetails { errors } => {
				apply(&mut self.draft);
				errors.clear(field);
				true
			},
			_ => false,
		}
	}

	pub fn set_name(&mut self, value: impl Into<String>) -> bool {
		let value = value.into();
		self.edit_token_field(FieldKey::Name, |d| d.token.name = value)
	}

	pub fn set_symbol(&mut self, value: impl Into<String>) -> bool {
		let value = value.into();
		self.edit_token_field(FieldKey::Symbol, |d| d.token.symbol = value)
	}

	pub fn set_initial_supply(&mut self, value: impl Into<String>) -> bool {
		let value = value.into();
		self.edit_token_field(FieldKey::InitialSupply, |d| d.token.initial_supply = value)
	}

	pub fn set_buy_tax(&mut self, value: impl Into<String>) -> bool {
		let value = value.into();
		self.edit_token_field(FieldKey::BuyTax, |d| d.token.buy_tax = value)
	}

	pub fn set_sell_tax(&mut self, value: impl Into<String>) -> bool {
		let value = value.into();
		self.edit_token_field(FieldKey::SellTax, |d| d.token.sell_tax = value)
	}

	/// Edits one column of a wallet row.
	pub fn set_wallet_field(
		&mut self,
		index: usize,
		field: WalletField,
		value: impl Into<String>,
	) -> bool {
		let FormState::TaxWallets { errors } = &mut self.state else {
			return false;
		};
		let Some(wallet) = self.draft.wallets.get_mut(index) else {
			return false;
		};

		let value = value.into();
		let key = match field {
			WalletField::Name => {
				wallet.name = value;
				FieldKey::WalletName(index)
			},
			WalletField::Address => {
				wallet.address = value;
				FieldKey::WalletAddress(index)
			},
			WalletField::Share => {
				wallet.share = value;
				FieldKey::WalletShare(index)
			},
		};
		errors.clear(key);
		true
	}

	/// Appends an empty wallet row with a 0 share.
	pub fn add_wallet(&mut self) -> bool {
		if !matches!(self.state, FormState::TaxWallets { .. }) {
			return false;
		}
		self.draft.wallets.push(WalletDraft::blank());
		true
	}

	/// Removes a wallet row. The last remaining row cannot be removed.
	pub fn remove_wallet(&mut self, index: usize) -> bool {
		let FormState::TaxWallets { errors } = &mut self.state else {
			return false;
		};
		if self.draft.wallets.len() <= 1 || index >= self.draft.wallets.len() {
			return false;
		}

		self.draft.wallets.remove(index);
		// Row errors are keyed by index, which just shifted
		let stale: Vec<FieldKey> = errors
			.iter()
			.map(|e| e.field)
			.filter(|k| {
				matches!(
					k,
					FieldKey::WalletName(_) | FieldKey::WalletAddress(_) | FieldKey::WalletShare(_)
				)
			})
			.collect();
		for key in stale {
			errors.clear(key);
		}
		true
	}

	/// Switches an optional feature on or off.
	pub fn set_feature(&mut self, feature: FeatureKey, enabled: bool) -> bool {
		if self.state != FormState::Features {
			return false;
		}
		let flags = &mut self.draft.features;
		match feature {
			FeatureKey::Burn => flags.burn_on_extraction = enabled,
			FeatureKey::MaxWallet => flags.max_wallet_enabled = enabled,
			FeatureKey::MaxTx => flags.max_tx_enabled = enabled,
		}
		true
	}

	/// Sets the max-wallet percentage, clamped to its control bounds.
	pub fn set_max_wallet_percent(&mut self, percent: Decimal) -> bool {
		if self.state != FormState::Features {
			return false;
		}
		self.draft.features.max_wallet_percent = clamp(percent, FeatureFlags::MAX_WALLET_BOUNDS);
		true
	}

	/// Sets the max-transaction percentage, clamped to its control bounds.
	pub fn set_max_tx_percent(&mut self, percent: Decimal) -> bool {
		if self.state != FormState::Features {
			return false;
		}
		self.draft.features.max_tx_percent = clamp(percent, FeatureFlags::MAX_TX_BOUNDS);
		true
	}
}

fn clamp(value: Decimal, (min, max): (Decimal, Decimal)) -> Decimal {
	value.max(min).min(max)
}

fn clamp_feature_percents(flags: &mut FeatureFlags) {
	flags.max_wallet_percent = clamp(flags.max_wallet_percent, FeatureFlags::MAX_WALLET_BOUNDS);
	flags.max_tx_percent = clamp(flags.max_tx_percent, FeatureFlags::MAX_TX_BOUNDS);
}
