//! Reverting and clearing variables.

use crate::context::{CommandContext, CommandError, CommandOutcome, CommandResult, unknown_variable};

pub fn reset(ctx: &mut CommandContext<'_>, args: &[&str]) -> CommandResult {
	let [name] = args else {
		return Err(CommandError::Usage("reset <variable>"));
	};
	if ctx.vars.find(name).is_none() {
		return Err(unknown_variable(ctx.vars, name));
	}
	let is_init = ctx.is_init;
	ctx.vars.reset(name, is_init)?;
	Ok(CommandOutcome::Done)
}

pub fn unset(ctx: &mut CommandContext<'_>, args: &[&str]) -> CommandResult {
	let [name] = args else {
		return Err(CommandError::Usage("unset <variable>"));
	};
	if ctx.vars.find(name).is_none() {
		return Err(unknown_variable(ctx.vars, name));
	}
	let is_init = ctx.is_init;
	ctx.vars.unset(name, is_init)?;
	Ok(CommandOutcome::Done)
}

pub fn var_restart(ctx: &mut CommandContext<'_>, args: &[&str]) -> CommandResult {
	if !args.is_empty() {
		return Err(CommandError::Usage("var_restart"));
	}
	ctx.vars.restart_all();
	Ok(CommandOutcome::Done)
}
