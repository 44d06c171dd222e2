//! The variable store: name index, write gateways, and the resolution pass
//! that merges the three tiers into one effective value.
//!
//! All callers (host, operator console, sandboxed modules, remote session)
//! are multiplexed onto one control thread before they reach the store, so
//! there is no internal locking; writes apply in gateway-call order and the
//! resolution pass always observes fully-formed tiers.

use rustc_hash::FxHashMap as HashMap;

use crate::atom::Atom;
use crate::error::{HandleFault, WriteError};
use crate::flags::{Permission, VarFlags};
use crate::handle::{HandleTable, VarHandle};
use crate::record::{MainTier, ProtectedTier, VarCategory, VarRecord, valid_name};
use crate::validate::{self, Validation};

/// How an operator command write targets the tiers.
///
/// The mode is an explicit argument rather than a flag bit so a gateway call
/// site always states which trust path it is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
	/// Write the main tier; supersedes any sandbox override.
	Normal,
	/// Write the protected tier on behalf of a session/server context.
	Protected,
	/// Write from an untrusted import; only allowed onto variables the
	/// host never claimed or explicitly opened to imports.
	Import,
}

/// The layered variable store.
///
/// Records live in an append-only arena; iteration order is registration
/// order. Records are never deleted during a process lifetime.
pub struct VarStore {
	vars: Vec<VarRecord>,
	/// Lowercased name -> arena slot.
	index: HashMap<Box<str>, usize>,
	handles: HandleTable,
	/// Accumulates the flag categories of everything that changed, for
	/// consumers that batch-recheck derived state (info strings).
	modified_flags: VarFlags,
	cheats: bool,
	startup: bool,
}

impl Default for VarStore {
	fn default() -> Self {
		Self::new()
	}
}

impl VarStore {
	pub fn new() -> Self {
		Self {
			vars: Vec::new(),
			index: HashMap::default(),
			handles: HandleTable::default(),
			modified_flags: VarFlags::empty(),
			cheats: false,
			startup: true,
		}
	}

	fn lookup(&self, name: &str) -> Option<usize> {
		self.index.get(name.to_ascii_lowercase().as_str()).copied()
	}

	/// Finds an existing record by case-insensitive name.
	pub fn find(&self, name: &str) -> Option<&VarRecord> {
		self.lookup(name).map(|idx| &self.vars[idx])
	}

	/// Creates the record on first use; `None` when the name is invalid.
	fn find_or_create(&mut self, name: &str) -> Option<usize> {
		if let Some(idx) = self.lookup(name) {
			return Some(idx);
		}
		if !valid_name(name) {
			return None;
		}
		let idx = self.vars.len();
		self.vars.push(VarRecord::new(name));
		self.index
			.insert(name.to_ascii_lowercase().into_boxed_str(), idx);
		Some(idx)
	}

	/// All records, in registration order.
	pub fn iter(&self) -> impl Iterator<Item = &VarRecord> {
		self.vars.iter()
	}

	pub fn len(&self) -> usize {
		self.vars.len()
	}

	pub fn is_empty(&self) -> bool {
		self.vars.is_empty()
	}

	/// Enables or disables cheat-gated writes.
	pub fn set_cheats(&mut self, enabled: bool) {
		self.cheats = enabled;
	}

	/// Marks the end of startup; from here on, sandbox registrations over a
	/// user-created value may forcibly reclaim it.
	pub fn set_startup_complete(&mut self) {
		self.startup = false;
	}

	// ---- write gateways -------------------------------------------------

	/// Host registration: writes the system tier.
	///
	/// The first registered default wins, so compiled-in overrides take
	/// precedence over later incidental registrations of the same name.
	pub fn host_register(
		&mut self,
		name: &str,
		default: &str,
		flags: VarFlags,
	) -> Result<&VarRecord, WriteError> {
		let idx = self
			.find_or_create(name)
			.ok_or_else(|| WriteError::InvalidName { name: name.to_string() })?;
		let var = &mut self.vars[idx];
		var.host_registered = true;
		if var.system.default.is_none() {
			var.system.default = Some(Atom::new(default));
		}
		var.system.flags |= flags;

		if var.system.flags.contains(VarFlags::READ_ONLY) {
			var.main = MainTier::default();
			var.protected = ProtectedTier::default();
		}
		if var.permission() == Permission::None {
			var.protected = ProtectedTier::default();
		}
		// Values smuggled in through an untrusted import do not survive the
		// legitimate owner showing up.
		if var.main.flags.contains(VarFlags::IMPORT_CREATED)
			&& !var.system.flags.contains(VarFlags::IMPORT_ALLOWED)
		{
			var.main.value = None;
			var.main.flags.remove(VarFlags::IMPORT_CREATED);
		}

		self.finalize(idx, true);
		Ok(&self.vars[idx])
	}

	/// Sandbox registration: declares a default and requested flags on the
	/// protected tier, then hands back a stable handle.
	///
	/// With no write permission the tier is left untouched, but the handle
	/// is still issued so the module can read the variable.
	pub fn sandbox_register(
		&mut self,
		name: &str,
		default: &str,
		flags: VarFlags,
	) -> Result<VarHandle, WriteError> {
		let idx = self
			.find_or_create(name)
			.ok_or_else(|| WriteError::InvalidName { name: name.to_string() })?;
		let perm = self.vars[idx].permission();
		if perm != Permission::None {
			let startup = self.startup;
			let var = &mut self.vars[idx];
			if !var.system.flags.contains(VarFlags::IGNORE_SANDBOX_DEFAULT) {
				var.protected.default = Some(Atom::new(default));
			}

			let mut merge = flags & VarFlags::SANDBOX_MERGEABLE;
			if perm != Permission::Archivable {
				merge.remove(VarFlags::ARCHIVE);
			}
			if var.system.flags.contains(VarFlags::LATCH) {
				// The host already owns the latch semantics.
				merge.remove(VarFlags::LATCH);
			}
			var.protected.flags |= merge;

			// A read-only declaration over a value the operator typed in is
			// a reclaim: the module's default takes the slot back.
			if merge.contains(VarFlags::READ_ONLY)
				&& var.flags.contains(VarFlags::USER_CREATED)
				&& !startup
			{
				var.main.flags.remove(VarFlags::CREATED_TAGS);
				var.protected.flags.remove(VarFlags::CREATED_TAGS);
				var.protected.flags.insert(VarFlags::SANDBOX_CREATED);
				var.protected.value = var.protected.default.clone();
			}

			let unlatch = self.vars[idx].protected.flags.contains(VarFlags::LATCH);
			self.finalize(idx, unlatch);
		}
		Ok(self.register_handle(idx))
	}

	/// Operator command write: the `set` family.
	pub fn command_write(
		&mut self,
		name: &str,
		value: &str,
		extra: VarFlags,
		mode: WriteMode,
		is_init: bool,
	) -> Result<&VarRecord, WriteError> {
		let idx = self
			.find_or_create(name)
			.ok_or_else(|| WriteError::InvalidName { name: name.to_string() })?;
		self.write_gate(idx, is_init)?;

		let atom = Atom::new(value);
		match mode {
			WriteMode::Import => {
				let var = &self.vars[idx];
				if var.host_registered && !var.system.flags.contains(VarFlags::IMPORT_ALLOWED) {
					return Err(WriteError::ImportBlocked { name: var.name.to_string() });
				}
				let var = &mut self.vars[idx];
				var.main.value = Some(atom);
				var.main.flags.remove(VarFlags::CREATED_TAGS);
				var.main.flags.insert(VarFlags::IMPORT_CREATED);
				var.main.flags |= extra;
				var.protected.value = None;
			}
			WriteMode::Protected => {
				let var = &self.vars[idx];
				if var.permission() == Permission::None {
					return Err(WriteError::NoPermission { name: var.name.to_string() });
				}
				if var.main.flags.contains(VarFlags::PINNED) {
					return Err(WriteError::Pinned { name: var.name.to_string() });
				}
				let var = &mut self.vars[idx];
				var.protected.value = Some(atom);
				var.protected.flags.remove(VarFlags::CREATED_TAGS);
				var.protected.flags.insert(VarFlags::USER_CREATED);
				var.protected.flags |= extra;
			}
			WriteMode::Normal => {
				let var = &mut self.vars[idx];
				var.main.value = Some(atom);
				var.main.flags.remove(VarFlags::CREATED_TAGS);
				var.main.flags.insert(VarFlags::USER_CREATED);
				var.main.flags |= extra;
				// A normal set supersedes any sandbox override; a protected
				// write leaves the main value in place.
				var.protected.value = None;
			}
		}

		self.finalize(idx, false);
		Ok(&self.vars[idx])
	}

	/// Sandbox value write: the ordinary-set counterpart of
	/// [`Self::sandbox_register`], with the same permission gate and tier.
	pub fn sandbox_write(&mut self, name: &str, value: &str) -> Result<(), WriteError> {
		let idx = self
			.find_or_create(name)
			.ok_or_else(|| WriteError::InvalidName { name: name.to_string() })?;
		if self.vars[idx].permission() == Permission::None {
			return Err(WriteError::NoPermission {
				name: self.vars[idx].name.to_string(),
			});
		}
		let var = &mut self.vars[idx];
		var.protected.value = Some(Atom::new(value));
		var.protected.flags.remove(VarFlags::CREATED_TAGS);
		var.protected.flags.insert(VarFlags::SANDBOX_CREATED);
		self.finalize(idx, false);
		Ok(())
	}

	/// Shared rejection gate for operator-path writes.
	fn write_gate(&self, idx: usize, is_init: bool) -> Result<(), WriteError> {
		let var = &self.vars[idx];
		if var.flags.contains(VarFlags::SERVER_OWNED) {
			return Err(WriteError::ServerOwned { name: var.name.to_string() });
		}
		if var.flags.contains(VarFlags::READ_ONLY) {
			return Err(WriteError::ReadOnly { name: var.name.to_string() });
		}
		if var.flags.contains(VarFlags::INIT_ONLY) && !is_init {
			return Err(WriteError::InitOnly { name: var.name.to_string() });
		}
		if var.flags.contains(VarFlags::CHEAT) && !self.cheats {
			return Err(WriteError::CheatProtected { name: var.name.to_string() });
		}
		Ok(())
	}

	// ---- lifecycle operations -------------------------------------------

	/// Reverts a variable to its default by clearing both value tiers.
	pub fn reset(&mut self, name: &str, is_init: bool) -> Result<&VarRecord, WriteError> {
		let idx = self
			.lookup(name)
			.ok_or_else(|| WriteError::Unknown { name: name.to_string() })?;
		self.write_gate(idx, is_init)?;
		let var = &mut self.vars[idx];
		var.main.value = None;
		var.protected.value = None;
		self.finalize(idx, false);
		Ok(&self.vars[idx])
	}

	/// Clears the operator-writable tiers wholesale, flags included. The
	/// record itself stays; only tier contents go.
	pub fn unset(&mut self, name: &str, is_init: bool) -> Result<&VarRecord, WriteError> {
		let idx = self
			.lookup(name)
			.ok_or_else(|| WriteError::Unknown { name: name.to_string() })?;
		self.write_gate(idx, is_init)?;
		let var = &mut self.vars[idx];
		var.main = MainTier::default();
		var.protected = ProtectedTier::default();
		self.finalize(idx, true);
		Ok(&self.vars[idx])
	}

	/// Reverts every variable to its default, committing pending latches.
	/// Read-only and init-only variables are left alone.
	pub fn restart_all(&mut self) {
		for idx in 0..self.vars.len() {
			if self
				.vars[idx]
				.flags
				.intersects(VarFlags::READ_ONLY | VarFlags::INIT_ONLY)
			{
				continue;
			}
			let var = &mut self.vars[idx];
			var.main.value = None;
			var.protected.value = None;
			self.finalize(idx, true);
		}
	}

	/// Ends the session-scoped context: non-archivable protected tiers are
	/// wiped; archivable ones keep their text with flags reduced to the
	/// archive bit.
	pub fn end_session(&mut self) {
		for idx in 0..self.vars.len() {
			let var = &mut self.vars[idx];
			if var.protected.flags.contains(VarFlags::ARCHIVE) {
				var.protected.flags &= VarFlags::ARCHIVE;
				var.protected.default = None;
			} else {
				var.protected = ProtectedTier::default();
			}
			self.finalize(idx, true);
		}
	}

	// ---- auxiliary writes -----------------------------------------------

	/// Attaches range validation; applied on this and every later
	/// resolution.
	pub fn attach_validation(
		&mut self,
		name: &str,
		min: f32,
		max: f32,
		integral: bool,
	) -> Result<&VarRecord, WriteError> {
		let idx = self
			.lookup(name)
			.ok_or_else(|| WriteError::Unknown { name: name.to_string() })?;
		self.vars[idx].validation = Some(Validation { min, max, integral });
		self.finalize(idx, false);
		Ok(&self.vars[idx])
	}

	/// Assigns the persistence-grouping category.
	pub fn set_category(&mut self, name: &str, category: VarCategory) -> Result<(), WriteError> {
		let idx = self
			.lookup(name)
			.ok_or_else(|| WriteError::Unknown { name: name.to_string() })?;
		self.vars[idx].category = category;
		Ok(())
	}

	/// Merges operator-settable flags into the main tier (`setf`).
	pub fn merge_main_flags(
		&mut self,
		name: &str,
		flags: VarFlags,
		is_init: bool,
	) -> Result<&VarRecord, WriteError> {
		let idx = self
			.lookup(name)
			.ok_or_else(|| WriteError::Unknown { name: name.to_string() })?;
		self.write_gate(idx, is_init)?;
		self.vars[idx].main.flags |= flags & VarFlags::OPERATOR_MERGEABLE;
		self.finalize(idx, false);
		Ok(&self.vars[idx])
	}

	// ---- reads ----------------------------------------------------------

	pub fn get_string(&self, name: &str) -> &str {
		self.find(name).map_or("", |v| v.current())
	}

	pub fn get_float(&self, name: &str) -> f32 {
		self.find(name).map_or(0.0, |v| v.as_float)
	}

	pub fn get_integer(&self, name: &str) -> i32 {
		self.find(name).map_or(0, |v| v.as_int)
	}

	/// Effective flags, with the synthetic MODIFIED bit while the variable
	/// has changed since the last [`Self::check_modified`].
	pub fn flags(&self, name: &str) -> VarFlags {
		self.find(name).map_or(VarFlags::empty(), |v| {
			if v.modified {
				v.flags | VarFlags::MODIFIED
			} else {
				v.flags
			}
		})
	}

	/// Reads and clears the modified-since-last-check marker.
	pub fn check_modified(&mut self, name: &str) -> bool {
		match self.lookup(name) {
			Some(idx) => std::mem::take(&mut self.vars[idx].modified),
			None => false,
		}
	}

	/// Names matching a glob pattern, case-insensitively, in registration
	/// order. An empty pattern matches everything; an unparseable pattern
	/// degrades to a substring match.
	pub fn list_matching(&self, pattern: &str) -> Vec<&str> {
		if pattern.is_empty() {
			return self.vars.iter().map(|v| v.name()).collect();
		}
		let glob = globset::GlobBuilder::new(pattern)
			.case_insensitive(true)
			.build()
			.map(|g| g.compile_matcher());
		let needle = pattern.to_ascii_lowercase();
		self.vars
			.iter()
			.map(|v| v.name())
			.filter(|name| match &glob {
				Ok(matcher) => matcher.is_match(name),
				Err(_) => name.to_ascii_lowercase().contains(&needle),
			})
			.collect()
	}

	/// Flag categories of everything that changed since the last take,
	/// masked and cleared.
	pub fn take_modified_flags(&mut self, mask: VarFlags) -> VarFlags {
		let hit = self.modified_flags & mask;
		self.modified_flags &= !mask;
		hit
	}

	/// The `\key\value` string replicated to the network layer, over
	/// variables whose flags intersect `filter`. Names or values carrying
	/// separator characters are skipped.
	pub fn info_string(&self, filter: VarFlags) -> String {
		let mut out = String::new();
		for var in &self.vars {
			if !var.flags.intersects(filter) {
				continue;
			}
			let value = var.current();
			if var.name.contains(['\\', '"', ';']) || value.contains(['\\', '"', ';']) {
				continue;
			}
			out.push('\\');
			out.push_str(&var.name);
			out.push('\\');
			out.push_str(value);
		}
		out
	}

	// ---- handles --------------------------------------------------------

	fn register_handle(&mut self, idx: usize) -> VarHandle {
		if let Some(handle) = self.vars[idx].handle {
			return handle;
		}
		let handle = self.handles.register(idx);
		self.vars[idx].handle = Some(handle);
		handle
	}

	/// Re-reads a variable through its handle. `None` when nothing changed
	/// since `cached_count`.
	pub fn sandbox_update(
		&self,
		handle: VarHandle,
		cached_count: u32,
	) -> Result<Option<(String, u32)>, HandleFault> {
		let idx = self.handles.resolve(handle)?;
		let var = &self.vars[idx];
		if var.modification_count == cached_count {
			return Ok(None);
		}
		Ok(Some((var.current().to_string(), var.modification_count)))
	}

	/// Strands every outstanding handle; modules must re-register.
	pub fn invalidate_handles(&mut self) {
		self.handles.invalidate();
		for var in &mut self.vars {
			var.handle = None;
		}
	}

	// ---- resolution -----------------------------------------------------

	/// The single path by which `current`, `latched`, and the effective
	/// flags ever change. Every gateway ends here.
	fn finalize(&mut self, idx: usize, unlatch: bool) {
		let var = &mut self.vars[idx];
		let old_current = var.current.clone();
		let old_latched = var.latched.clone();
		let old_flags = var.flags;

		var.flags = var.protected.flags | var.main.flags | var.system.flags;
		self.modified_flags |= var.flags ^ old_flags;

		let reset_src = var
			.system
			.default
			.clone()
			.or_else(|| var.protected.default.clone())
			.unwrap_or_default();
		var.reset = match validate::check(var.validation.as_ref(), &var.name, &reset_src, "0") {
			Some(fixed) => Atom::new(&fixed),
			None => reset_src,
		};

		let (candidate, protect) = if let Some(v) = &var.protected.value {
			(v.clone(), true)
		} else if let Some(v) = &var.main.value {
			(v.clone(), false)
		} else if let Some(v) = &var.protected.default {
			(v.clone(), true)
		} else if let Some(v) = &var.system.default {
			(v.clone(), false)
		} else {
			(Atom::Empty, false)
		};
		var.protect = protect;
		let candidate =
			match validate::check(var.validation.as_ref(), &var.name, &candidate, &var.reset) {
				Some(fixed) => Atom::new(&fixed),
				None => candidate,
			};

		let commit = unlatch
			|| !var.flags.contains(VarFlags::LATCH)
			|| var.current.is_none()
			|| var.current.as_ref() == Some(&candidate);
		if commit {
			var.current = Some(candidate);
			var.latched = None;
		} else {
			var.latched = Some(candidate);
		}

		if var.current != old_current {
			// The very first resolution primes the record; only changes to
			// an already-resolved value are observable modifications.
			if old_current.is_some() {
				var.modification_count += 1;
				var.modified = true;
				self.modified_flags |= var.flags;
			}
			let current = var.current.as_deref().unwrap_or("");
			var.as_float = current.trim().parse().unwrap_or(0.0);
			var.as_int = current
				.trim()
				.parse()
				.unwrap_or_else(|_| var.as_float as i32);
		} else if var.latched.is_some() && var.latched != old_latched {
			// A pending-latch change is itself observable, but the numeric
			// projections keep tracking the committed value.
			var.modification_count += 1;
			var.modified = true;
		}
	}
}
