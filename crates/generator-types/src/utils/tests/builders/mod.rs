//! Builder patterns for generator types
//!
//! Fluent builders with defaults that satisfy every form step, so tests only
//! spell out the fields they care about.

pub mod form;

pub use form::{FormDraftBuilder, TEST_WALLET_ADDRESS};
