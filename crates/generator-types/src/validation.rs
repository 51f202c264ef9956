//! Field-level validation results for the generator form.

use std::fmt;

/// Identifies a single input of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKey {
	Name,
	Symbol,
	InitialSupply,
	BuyTax,
	SellTax,
	WalletName(usize),
	WalletAddress(usize),
	WalletShare(usize),
	TotalShare,
}

impl fmt::Display for FieldKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FieldKey::Name => f.write_str("name"),
			FieldKey::Symbol => f.write_str("symbol"),
			FieldKey::InitialSupply => f.write_str("initialSupply"),
			FieldKey::BuyTax => f.write_str("buyTax"),
			FieldKey::SellTax => f.write_str("sellTax"),
			FieldKey::WalletName(i) => write!(f, "wallet{i}name"),
			FieldKey::WalletAddress(i) => write!(f, "wallet{i}address"),
			FieldKey::WalletShare(i) => write!(f, "wallet{i}share"),
			FieldKey::TotalShare => f.write_str("totalShare"),
		}
	}
}

/// A validation failure attached to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
	pub field: FieldKey,
	pub message: String,
}

impl fmt::Display for FieldError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.field, self.message)
	}
}

/// Ordered collection of field errors, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records an error, replacing any earlier error for the same field.
	pub fn insert(&mut self, field: FieldKey, message: impl Into<String>) {
		let message = message.into();
		match self.0.iter_mut().find(|e| e.field == field) {
			Some(existing) => existing.message = message,
			None => self.0.push(FieldError { field, message }),
		}
	}

	/// Drops the error for `field`, returning whether one was present.
	pub fn clear(&mut self, field: FieldKey) -> bool {
		let before = self.0.len();
		self.0.retain(|e| e.field != field);
		before != self.0.len()
	}

	pub fn get(&self, field: FieldKey) -> Option<&str> {
		self.0
			.iter()
			.find(|e| e.field == field)
			.map(|e| e.message.as_str())
	}

	pub fn contains(&self, field: FieldKey) -> bool {
		self.get(field).is_some()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
		self.0.iter()
	}
}

impl fmt::Display for FieldErrors {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let joined: Vec<String> = self.0.iter().map(ToString::to_string).collect();
		f.write_str(&joined.join("; "))
	}
}

/// Outcome of validating a form step.
pub type Validation<T> = Result<T, FieldErrors>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_field_key_names() {
		assert_eq!(FieldKey::InitialSupply.to_string(), "initialSupply");
		assert_eq!(FieldKey::WalletAddress(2).to_string(), "wallet2address");
		assert_eq!(FieldKey::TotalShare.to_string(), "totalShare");
	}

	#[test]
	fn test_insert_replaces_and_clear_removes() {
		let mut errors = FieldErrors::new();
		errors.insert(FieldKey::Name, "first");
		errors.insert(FieldKey::Symbol, "symbol");
		errors.insert(FieldKey::Name, "second");

		assert_eq!(errors.len(), 2);
		assert_eq!(errors.get(FieldKey::Name), Some("second"));

		assert!(errors.clear(FieldKey::Name));
		assert!(!errors.clear(FieldKey::Name));
		assert!(!errors.contains(FieldKey::Name));
		assert_eq!(errors.to_string(), "symbol: symbol");
	}
}
