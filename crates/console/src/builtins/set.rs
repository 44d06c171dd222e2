//! The `set` family: value writes, flag merges, and toggling.

use keel_vars::{VarFlags, WriteMode};

use crate::context::{CommandContext, CommandError, CommandOutcome, CommandResult, unknown_variable};

fn write_value(
	ctx: &mut CommandContext<'_>,
	args: &[&str],
	usage: &'static str,
	extra: VarFlags,
	mode: WriteMode,
) -> CommandResult {
	let [name, rest @ ..] = args else {
		return Err(CommandError::Usage(usage));
	};
	if rest.is_empty() {
		return Err(CommandError::Usage(usage));
	}
	let value = rest.join(" ");
	let is_init = ctx.is_init;
	let var = ctx.vars.command_write(name, &value, extra, mode, is_init)?;
	if let Some(pending) = var.latched() {
		return Ok(CommandOutcome::Print(format!(
			"{} will be changed to {pending:?} on restart",
			var.name()
		)));
	}
	Ok(CommandOutcome::Done)
}

pub fn set(ctx: &mut CommandContext<'_>, args: &[&str]) -> CommandResult {
	write_value(ctx, args, "set <variable> <value>", VarFlags::empty(), WriteMode::Normal)
}

pub fn set_archive(ctx: &mut CommandContext<'_>, args: &[&str]) -> CommandResult {
	write_value(ctx, args, "seta <variable> <value>", VarFlags::ARCHIVE, WriteMode::Normal)
}

pub fn set_net(ctx: &mut CommandContext<'_>, args: &[&str]) -> CommandResult {
	write_value(ctx, args, "setn <variable> <value>", VarFlags::NET_VISIBLE, WriteMode::Normal)
}

pub fn set_protected(ctx: &mut CommandContext<'_>, args: &[&str]) -> CommandResult {
	write_value(ctx, args, "setp <variable> <value>", VarFlags::empty(), WriteMode::Protected)
}

pub fn set_protected_archive(ctx: &mut CommandContext<'_>, args: &[&str]) -> CommandResult {
	write_value(ctx, args, "setap <variable> <value>", VarFlags::ARCHIVE, WriteMode::Protected)
}

/// `setf`: merge operator-settable flags into the main tier.
pub fn set_flags(ctx: &mut CommandContext<'_>, args: &[&str]) -> CommandResult {
	const USAGE: &str = "setf <variable> <flag>...";
	let [name, rest @ ..] = args else {
		return Err(CommandError::Usage(USAGE));
	};
	if rest.is_empty() {
		return Err(CommandError::Usage(USAGE));
	}
	if ctx.vars.find(name).is_none() {
		return Err(unknown_variable(ctx.vars, name));
	}

	let mut flags = VarFlags::empty();
	for token in rest {
		flags |= match token.to_ascii_lowercase().as_str() {
			"archive" => VarFlags::ARCHIVE,
			"noarchive" => VarFlags::NO_ARCHIVE,
			"net" => VarFlags::NET_VISIBLE,
			"latch" => VarFlags::LATCH,
			_ => return Err(CommandError::Usage(USAGE)),
		};
	}
	let is_init = ctx.is_init;
	ctx.vars.merge_main_flags(name, flags, is_init)?;
	Ok(CommandOutcome::Done)
}

/// `toggle`: flip between 0 and 1, or cycle through an explicit value list.
pub fn toggle(ctx: &mut CommandContext<'_>, args: &[&str]) -> CommandResult {
	const USAGE: &str = "toggle <variable> [value]...";
	let [name, values @ ..] = args else {
		return Err(CommandError::Usage(USAGE));
	};
	let Some(var) = ctx.vars.find(name) else {
		return Err(unknown_variable(ctx.vars, name));
	};

	let next = if values.is_empty() {
		if var.as_float() != 0.0 { "0".to_string() } else { "1".to_string() }
	} else {
		let current = var.current();
		match values.iter().position(|v| *v == current) {
			Some(at) => values[(at + 1) % values.len()].to_string(),
			None => values[0].to_string(),
		}
	};
	let is_init = ctx.is_init;
	ctx.vars
		.command_write(name, &next, VarFlags::empty(), WriteMode::Normal, is_init)?;
	Ok(CommandOutcome::Done)
}
