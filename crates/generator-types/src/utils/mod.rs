//! Shared helpers that do not belong to a single data type.

#[cfg(any(test, feature = "testing"))]
pub mod tests;
