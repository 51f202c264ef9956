//! Address parsing and display helpers.
//!
//! Wallet addresses reach the generator as free-form text typed by the user.
//! Syntax follows the browser-wallet convention: an optional `0x` prefix and
//! forty hex digits. All-lowercase and all-uppercase inputs are accepted as-is,
//! mixed-case inputs must carry a valid EIP-55 checksum.

use alloy_primitives::Address;
use thiserror::Error;

/// Reasons an address string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
	/// The input is empty after trimming the prefix.
	#[error("Address is empty")]
	Empty,
	/// The input does not contain exactly 40 hex digits.
	#[error("Expected 40 hex digits, got {0}")]
	InvalidLength(usize),
	/// The input contains non-hex characters.
	#[error("Address contains non-hex characters: {0}")]
	InvalidHex(String),
	/// Mixed-case input whose checksum does not match.
	#[error("Invalid checksum for address: {0}")]
	BadChecksum(String),
}

/// Removes a leading `0x`/`0X` if present.
pub fn without_0x_prefix(hex_str: &str) -> &str {
	hex_str
		.strip_prefix("0x")
		.or_else(|| hex_str.strip_prefix("0X"))
		.unwrap_or(hex_str)
}

/// Parses a user supplied address string.
///
/// # Errors
///
/// Returns an [`AddressError`] describing the first syntactic problem found.
pub fn parse_address(input: &str) -> Result<Address, AddressError> {
	let digits = without_0x_prefix(input.trim());

	if digits.is_empty() {
		return Err(AddressError::Empty);
	}
	if digits.len() != 40 {
		return Err(AddressError::InvalidLength(digits.len()));
	}
	if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
		return Err(AddressError::InvalidHex(input.to_string()));
	}

	let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
	let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
	if has_lower && has_upper {
		return Address::parse_checksummed(format!("0x{digits}"), None)
			.map_err(|_| AddressError::BadChecksum(input.to_string()));
	}

	let bytes = hex::decode(digits).map_err(|_| AddressError::InvalidHex(input.to_string()))?;
	Ok(Address::from_slice(&bytes))
}

/// Shortens a string to `head` leading and `tail` trailing characters
/// joined by `...`. Strings that are already short are returned unchanged.
pub fn shorten(value: &str, head: usize, tail: usize) -> String {
	let chars: Vec<char> = value.chars().collect();
	if chars.len() <= head + tail {
		return value.to_string();
	}
	let start: String = chars[..head].iter().collect();
	let end: String = chars[chars.len() - tail..].iter().collect();
	format!("{start}...{end}")
}

/// Formats an address for a status line, e.g. `0x1234...7890`.
pub fn format_address_short(address: Address) -> String {
	shorten(&address.to_checksum(None), 6, 4)
}

#[cfg(test)]
mod tests {
	use super::*;

	const CHECKSUMMED: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

	#[test]
	fn test_accepts_checksummed_and_single_case() {
		let expected = parse_address(CHECKSUMMED).unwrap();
		assert_eq!(parse_address(&CHECKSUMMED.to_lowercase()), Ok(expected));
		assert_eq!(
			parse_address("0x5FBDB2315678AFECB367F032D93F642F64180AA3"),
			Ok(expected)
		);
		// Prefix is optional
		assert_eq!(parse_address("5fbdb2315678afecb367f032d93f642f64180aa3"), Ok(expected));
	}

	#[test]
	fn test_rejects_bad_checksum() {
		let broken = "0x5fbDB2315678afecb367f032d93F642f64180aa3";
		assert_eq!(
			parse_address(broken),
			Err(AddressError::BadChecksum(broken.to_string()))
		);
	}

	#[test]
	fn test_rejects_malformed() {
		assert_eq!(parse_address(""), Err(AddressError::Empty));
		assert_eq!(parse_address("0x"), Err(AddressError::Empty));
		assert_eq!(parse_address("0x123"), Err(AddressError::InvalidLength(3)));
		assert!(matches!(
			parse_address("0xzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz"),
			Err(AddressError::InvalidHex(_))
		));
	}

	#[test]
	fn test_parsed_bytes_match() {
		let addr = parse_address("0x0000000000000000000000000000000000000001").unwrap();
		assert_eq!(addr, Address::with_last_byte(1));
	}

	#[test]
	fn test_shorten() {
		assert_eq!(
			shorten("0x1234567890123456789012345678901234567890", 6, 4),
			"0x1234...7890"
		);
		assert_eq!(shorten("short", 6, 4), "short");
		let addr = parse_address(CHECKSUMMED).unwrap();
		assert_eq!(format_address_short(addr), "0x5FbD...0aa3");
	}
}
