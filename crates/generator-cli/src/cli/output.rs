//! Terminal output helpers.

use colored::Colorize;
use generator_types::FieldErrors;

/// Formatted terminal output.
pub struct Display;

impl Display {
	/// Underlined section header.
	pub fn header(text: &str) {
		println!("\n{}", text.bold().cyan());
		println!("{}", "─".repeat(text.chars().count()).cyan());
	}

	pub fn success(message: &str) {
		println!("{} {}", "✓".green().bold(), message);
	}

	/// Error line on stderr.
	pub fn error(message: &str) {
		eprintln!("{} {}", "✗".red().bold(), message.red());
	}

	pub fn warning(message: &str) {
		println!("{} {}", "⚠".yellow().bold(), message.yellow());
	}

	pub fn info(message: &str) {
		println!("{} {}", "ℹ".blue().bold(), message);
	}

	/// Indented `key: value` line.
	///
	/// # Arguments
	///
	/// * `key` - Label printed in bold, followed by a colon
	/// * `value` - Value printed as-is
	pub fn kv(key: &str, value: &str) {
		println!("  {} {}", format!("{key}:").bold(), value);
	}

	pub fn section(title: &str) {
		println!("\n{}", format!("▸ {title}").bold());
	}

	/// One error line per invalid field, in field order.
	///
	/// # Arguments
	///
	/// * `errors` - Field errors of the step that failed to advance
	pub fn field_errors(errors: &FieldErrors) {
		for error in errors.iter() {
			eprintln!(
				"  {} {}",
				format!("{}:", error.field).red().bold(),
				error.message.red()
			);
		}
	}

	/// Multi-line block printed as-is, indented by two spaces.
	pub fn block(text: &str) {
		for line in text.lines() {
			println!("  {line}");
		}
	}

	/// Numbered list of follow-up actions.
	///
	/// # Arguments
	///
	/// * `steps` - One line per step, printed in order from 1
	pub fn next_steps(steps: &[&str]) {
		Self::section("Next Steps");
		for (i, step) in steps.iter().enumerate() {
			println!("  {}. {}", i + 1, step);
		}
	}
}
