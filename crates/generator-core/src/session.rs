//! Wallet session state.

use alloy_primitives::Address;

/// Who is connected and whether they passed the token gate.
///
/// A session never reports access without an address: [`Session::grant`]
/// needs one and [`Session::reset`] clears both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
	connected: Option<Address>,
	has_access: bool,
}

impl Session {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn connected_address(&self) -> Option<Address> {
		self.connected
	}

	pub fn is_connected(&self) -> bool {
		self.connected.is_some()
	}

	pub fn has_access(&self) -> bool {
		self.has_access
	}

	/// Marks `address` as connected and allowed to use the generator.
	///
	/// # Arguments
	///
	/// * `address` - Account that signed the welcome message and passed the
	///   token gate
	pub fn grant(&mut self, address: Address) {
		self.connected = Some(address);
		self.has_access = true;
	}

	/// Back to fully disconnected.
	pub fn reset(&mut self) {
		self.connected = None;
		self.has_access = false;
	}
}
