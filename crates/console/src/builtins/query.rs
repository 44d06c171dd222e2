//! Read-only commands: printing, listing, tier dumps, and `vstr`.

use std::fmt::Write as _;

use keel_vars::{VarFlags, VarRecord};

use crate::context::{CommandContext, CommandError, CommandOutcome, CommandResult, unknown_variable};

pub fn print(ctx: &mut CommandContext<'_>, args: &[&str]) -> CommandResult {
	let [name] = args else {
		return Err(CommandError::Usage("print <variable>"));
	};
	let Some(var) = ctx.vars.find(name) else {
		return Err(unknown_variable(ctx.vars, name));
	};
	let mut out = format!("{} is {:?} default {:?}", var.name(), var.current(), var.reset_value());
	if let Some(pending) = var.latched() {
		let _ = write!(out, ", latched to {pending:?}");
	}
	Ok(CommandOutcome::Print(out))
}

/// `vstr`: hand a variable's text to the command scheduler. Text that came
/// from the protected tier runs in protected mode so it cannot escalate.
pub fn vstr(ctx: &mut CommandContext<'_>, args: &[&str]) -> CommandResult {
	let [name] = args else {
		return Err(CommandError::Usage("vstr <variable>"));
	};
	let Some(var) = ctx.vars.find(name) else {
		return Err(unknown_variable(ctx.vars, name));
	};
	Ok(CommandOutcome::Queue {
		text: var.current().to_string(),
		protected: var.is_protected_value(),
	})
}

pub fn varlist(ctx: &mut CommandContext<'_>, args: &[&str]) -> CommandResult {
	let pattern = match args {
		[] => "",
		[pattern] => *pattern,
		_ => return Err(CommandError::Usage("varlist [pattern]")),
	};

	let mut out = String::new();
	let names = ctx.vars.list_matching(pattern);
	let count = names.len();
	for name in names {
		if let Some(var) = ctx.vars.find(name) {
			let _ = writeln!(out, "{} {} {:?}", flag_letters(var), var.name(), var.current());
		}
	}
	let _ = write!(out, "{count} variables");
	Ok(CommandOutcome::Print(out))
}

/// `var`: tier-by-tier debug dump.
pub fn dump(ctx: &mut CommandContext<'_>, args: &[&str]) -> CommandResult {
	let [name] = args else {
		return Err(CommandError::Usage("var <variable>"));
	};
	let Some(var) = ctx.vars.find(name) else {
		return Err(unknown_variable(ctx.vars, name));
	};

	let mut out = String::new();
	let _ = writeln!(out, "{} = {:?} ({:?})", var.name(), var.current(), var.permission());
	let _ = writeln!(out, "  reset: {:?}", var.reset_value());
	if let Some(pending) = var.latched() {
		let _ = writeln!(out, "  latched: {pending:?}");
	}
	let _ = writeln!(
		out,
		"  system: default {:?} flags {:?}",
		var.system().default.as_deref(),
		var.system().flags
	);
	let _ = writeln!(
		out,
		"  main: value {:?} flags {:?}",
		var.main().value.as_deref(),
		var.main().flags
	);
	let _ = write!(
		out,
		"  protected: value {:?} default {:?} flags {:?}",
		var.protected().value.as_deref(),
		var.protected().default.as_deref(),
		var.protected().flags
	);
	Ok(CommandOutcome::Print(out))
}

fn flag_letters(var: &VarRecord) -> String {
	const LETTERS: &[(VarFlags, char)] = &[
		(VarFlags::ARCHIVE, 'A'),
		(VarFlags::LATCH, 'L'),
		(VarFlags::READ_ONLY, 'R'),
		(VarFlags::CHEAT, 'C'),
		(VarFlags::NET_VISIBLE, 'N'),
		(VarFlags::INIT_ONLY, 'I'),
		(VarFlags::SERVER_OWNED, 'S'),
		(VarFlags::USER_CREATED, 'U'),
		(VarFlags::SANDBOX_CREATED, 'B'),
	];
	let mut letters = String::with_capacity(LETTERS.len() + 1);
	for &(flag, letter) in LETTERS {
		letters.push(if var.flags().contains(flag) { letter } else { ' ' });
	}
	letters.push(if var.is_protected_value() { 'P' } else { ' ' });
	letters
}
