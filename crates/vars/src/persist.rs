//! Settings-file persistence: selecting which variables are worth writing
//! and emitting them as command lines the console replays at startup.
//!
//! Skips are silent: a value that is default-equal, oversized, or carries
//! characters the file format cannot hold is simply not written.

use std::io::{self, Write};

use crate::flags::{Permission, VarFlags};
use crate::record::{CATEGORY_ORDER, VarCategory, VarRecord};
use crate::store::VarStore;

/// Longest persistable variable name.
const MAX_PERSIST_NAME: usize = 256;
/// Longest persistable value.
const MAX_PERSIST_VALUE: usize = 512;

/// One line of a settings file, before formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistEntry {
	pub name: String,
	pub value: String,
	/// The value came from the protected tier; the writer emits the
	/// protected write-mode marker so replay lands on the same tier.
	pub protected: bool,
	/// The value must be quoted to survive tokenization.
	pub needs_quotes: bool,
}

impl VarStore {
	/// Archive-eligible variables of one category, in registration order.
	pub fn select_for_write(
		&self,
		category: VarCategory,
		extra: Option<&dyn Fn(&VarRecord) -> bool>,
	) -> Vec<PersistEntry> {
		let mut out = Vec::new();
		for var in self.iter() {
			if var.category() != category {
				continue;
			}
			if !var.flags.contains(VarFlags::ARCHIVE) || var.flags.contains(VarFlags::NO_ARCHIVE) {
				continue;
			}
			if let Some(pred) = extra {
				if !pred(var) {
					continue;
				}
			}

			// Protected values persist only when the sandbox had archive
			// authority; otherwise fall back to the main tier.
			let protected_value = (var.permission() == Permission::Archivable)
				.then(|| var.protected.value.as_ref())
				.flatten();
			let Some((value, protected)) = protected_value
				.map(|v| (v, true))
				.or_else(|| var.main.value.as_ref().map(|v| (v, false)))
			else {
				continue;
			};

			if default_equal(value, &var.reset) {
				continue;
			}
			if var.name.len() > MAX_PERSIST_NAME || value.len() > MAX_PERSIST_VALUE {
				continue;
			}
			if value.contains(['"', '\r', '\n']) {
				continue;
			}

			let needs_quotes =
				value.is_empty() || value.contains([' ', ';']) || value.contains("//");
			out.push(PersistEntry {
				name: var.name.to_string(),
				value: value.to_string(),
				protected,
				needs_quotes,
			});
		}
		out
	}

	/// Writes the settings file: fixed category order, a section comment
	/// before the first entry of each non-empty category.
	pub fn write_settings<W: Write>(&self, w: &mut W) -> io::Result<()> {
		for &category in CATEGORY_ORDER {
			let entries = self.select_for_write(category, None);
			if entries.is_empty() {
				continue;
			}
			writeln!(w, "// {}", category.label())?;
			for entry in entries {
				let command = if entry.protected { "setap" } else { "seta" };
				if entry.needs_quotes {
					writeln!(w, "{command} {} \"{}\"", entry.name, entry.value)?;
				} else {
					writeln!(w, "{command} {} {}", entry.name, entry.value)?;
				}
			}
		}
		Ok(())
	}
}

/// Textually or numerically equal to the reset default.
fn default_equal(value: &str, reset: &str) -> bool {
	if value == reset {
		return true;
	}
	match (value.trim().parse::<f32>(), reset.trim().parse::<f32>()) {
		(Ok(a), Ok(b)) => a == b,
		_ => false,
	}
}
