//! The built-in command table.

use crate::context::{CommandContext, CommandError, CommandResult};

mod lifecycle;
mod query;
mod set;


/// Function signature for command handlers. Arguments arrive already split
/// by the external tokenizer, command name excluded.
pub type CommandHandler = fn(&mut CommandContext<'_>, &[&str]) -> CommandResult;

/// A registered console command.
pub struct CommandSpec {
	pub name: &'static str,
	pub usage: &'static str,
	pub handler: CommandHandler,
}

pub static COMMANDS: &[CommandSpec] = &[
	CommandSpec { name: "set", usage: "set <variable> <value>", handler: set::set },
	CommandSpec { name: "seta", usage: "seta <variable> <value>", handler: set::set_archive },
	CommandSpec { name: "setn", usage: "setn <variable> <value>", handler: set::set_net },
	CommandSpec { name: "setp", usage: "setp <variable> <value>", handler: set::set_protected },
	CommandSpec {
		name: "setap",
		usage: "setap <variable> <value>",
		handler: set::set_protected_archive,
	},
	CommandSpec { name: "setf", usage: "setf <variable> <flag>...", handler: set::set_flags },
	CommandSpec { name: "toggle", usage: "toggle <variable> [value]...", handler: set::toggle },
	CommandSpec { name: "reset", usage: "reset <variable>", handler: lifecycle::reset },
	CommandSpec { name: "unset", usage: "unset <variable>", handler: lifecycle::unset },
	CommandSpec { name: "var_restart", usage: "var_restart", handler: lifecycle::var_restart },
	CommandSpec { name: "vstr", usage: "vstr <variable>", handler: query::vstr },
	CommandSpec { name: "print", usage: "print <variable>", handler: query::print },
	CommandSpec { name: "varlist", usage: "varlist [pattern]", handler: query::varlist },
	CommandSpec { name: "var", usage: "var <variable>", handler: query::dump },
];

/// Finds a command by case-insensitive name.
pub fn find_command(name: &str) -> Option<&'static CommandSpec> {
	COMMANDS.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Dispatches one already-tokenized command line.
pub fn dispatch(ctx: &mut CommandContext<'_>, name: &str, args: &[&str]) -> CommandResult {
	let spec = find_command(name).ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;
	(spec.handler)(ctx, args)
}
