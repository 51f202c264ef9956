//! Initial token supply.
//!
//! The form accepts any positive number, including scientific notation.
//! Values inside `rust_decimal`'s range keep their fractional part; anything
//! larger must be a whole number and is held as a `U256`.

use alloy_primitives::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned for input that is not a positive number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid initial supply '{0}'")]
pub struct InvalidSupply(pub String);

/// A positive supply in whole tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InitialSupply {
	Decimal(Decimal),
	Whole(U256),
}

impl InitialSupply {
	pub fn is_positive(&self) -> bool {
		match self {
			InitialSupply::Decimal(value) => *value > Decimal::ZERO,
			InitialSupply::Whole(value) => !value.is_zero(),
		}
	}

	/// The supply as an integer, or `None` if it has a fractional part.
	pub fn to_whole(&self) -> Option<U256> {
		match self {
			InitialSupply::Decimal(value) => {
				if !value.fract().is_zero() {
					return None;
				}
				U256::from_str_radix(&value.trunc().normalize().to_string(), 10).ok()
			},
			InitialSupply::Whole(value) => Some(*value),
		}
	}
}

/// Parses digits with an optional fraction and a non-negative exponent into an
/// integer. Fails on anything that does not come out whole.
fn parse_whole(input: &str) -> Option<U256> {
	let (mantissa, exponent) = match input.find(['e', 'E']) {
		Some(i) => (&input[..i], input[i + 1..].parse::<u32>().ok()?),
		None => (input, 0),
	};

	let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
	let fraction = fraction.trim_end_matches('0');
	let digits = format!("{integer}{fraction}");
	if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}

	let shift = exponent.checked_sub(u32::try_from(fraction.len()).ok()?)?;
	let scale = U256::from(10u8).checked_pow(U256::from(shift))?;
	U256::from_str_radix(&digits, 10).ok()?.checked_mul(scale)
}

impl FromStr for InitialSupply {
	type Err = InvalidSupply;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let input = s.trim();
		let invalid = || InvalidSupply(input.to_string());

		let supply = match Decimal::from_str(input).or_else(|_| Decimal::from_scientific(input)) {
			Ok(value) => InitialSupply::Decimal(value.normalize()),
			Err(_) => InitialSupply::Whole(parse_whole(input).ok_or_else(invalid)?),
		};

		if supply.is_positive() {
			Ok(supply)
		} else {
			Err(invalid())
		}
	}
}

impl fmt::Display for InitialSupply {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			InitialSupply::Decimal(value) => value.fmt(f),
			InitialSupply::Whole(value) => value.fmt(f),
		}
	}
}

impl TryFrom<String> for InitialSupply {
	type Error = InvalidSupply;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<InitialSupply> for String {
	fn from(supply: InitialSupply) -> Self {
		supply.to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn supply(input: &str) -> InitialSupply {
		input.parse().unwrap()
	}

	#[test]
	fn test_small_values_keep_fraction() {
		assert_eq!(supply("0.50").to_string(), "0.5");
		assert_eq!(supply("0.5").to_whole(), None);
		assert_eq!(supply("1e6").to_string(), "1000000");
		assert_eq!(supply("1000000").to_whole(), Some(U256::from(1_000_000u64)));
	}

	#[test]
	fn test_values_beyond_decimal_range() {
		let large = supply("100000000000000000000000000000");
		assert!(matches!(large, InitialSupply::Whole(_)));
		assert_eq!(large.to_string(), "100000000000000000000000000000");

		assert_eq!(supply("1e29"), large);
		let expected = U256::from(15u8) * U256::from(10u8).pow(U256::from(39u8));
		assert_eq!(supply("1.5E40").to_whole(), Some(expected));
	}

	#[test]
	fn test_rejects_non_positive_and_garbage() {
		for input in ["0", "-1", "-1e40", "", "abc", "1e", "1.5e-40", "1e99999"] {
			assert!(input.parse::<InitialSupply>().is_err(), "{input} should be rejected");
		}
	}

	#[test]
	fn test_serde_uses_text() {
		let value: InitialSupply = String::from("1e29").try_into().unwrap();
		assert_eq!(String::from(value), "100000000000000000000000000000");
	}
}
