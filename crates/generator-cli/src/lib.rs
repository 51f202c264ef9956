//! Command-line front end for the DEVeats contract generator.
//!
//! - [`cli`]: argument definitions and terminal output
//! - [`context`]: configuration and the objects built from it
//! - [`form_file`]: TOML form files feeding the generator form

pub mod cli;
pub mod context;
pub mod form_file;

pub use context::Context;
pub use form_file::{load_form, parse_form, FormFileError};
