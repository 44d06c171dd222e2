//! Execution context and outcomes for console commands.

use keel_vars::{VarStore, WriteError};

use crate::suggest::suggest_name;

/// State a command handler runs against.
pub struct CommandContext<'a> {
	pub vars: &'a mut VarStore,
	/// Whether the surrounding execution is still in startup; forwarded to
	/// the store's init-only gate.
	pub is_init: bool,
}

/// What a successfully handled command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
	/// Handled, nothing to show.
	Done,
	/// Text for the operator.
	Print(String),
	/// Stored command text to hand to the command scheduler.
	Queue {
		text: String,
		/// Execute in protected mode: the text came from a value the
		/// sandbox/session context owns.
		protected: bool,
	},
}

pub type CommandResult = Result<CommandOutcome, CommandError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
	#[error("unknown command {0:?}")]
	UnknownCommand(String),

	#[error("usage: {0}")]
	Usage(&'static str),

	#[error("unknown variable {name:?}{hint}")]
	UnknownVariable { name: String, hint: String },

	#[error(transparent)]
	Rejected(#[from] WriteError),
}

/// Builds the unknown-variable error, with a near-miss hint when one of the
/// registered names is close enough.
pub(crate) fn unknown_variable(vars: &VarStore, name: &str) -> CommandError {
	let hint = match suggest_name(vars, name) {
		Some(suggestion) => format!(" (did you mean {suggestion:?}?)"),
		None => String::new(),
	};
	CommandError::UnknownVariable { name: name.to_string(), hint }
}
