//! Variable flag bits and the named subsets each write path is allowed to
//! touch.

bitflags::bitflags! {
	/// Behavior and provenance bits attached to a variable tier.
	///
	/// Every tier carries its own set; the effective set a consumer observes
	/// is the union of all three tiers, recomputed on each resolution.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct VarFlags: u32 {
		/// Persisted to the settings file.
		const ARCHIVE = 1 << 0;
		/// Never persisted, even when `ARCHIVE` is also present.
		const NO_ARCHIVE = 1 << 1;
		/// The host owns the value outright; writes are rejected.
		const READ_ONLY = 1 << 2;
		/// Sandboxed writers are allowed to change the value.
		const MODIFIABLE = 1 << 3;
		/// Replicated into the runtime's info string.
		const NET_VISIBLE = 1 << 4;
		/// New values are withheld until an unlatch boundary commits them.
		const LATCH = 1 << 5;
		/// Writable only while cheats are enabled.
		const CHEAT = 1 << 6;
		/// Writable only during startup.
		const INIT_ONLY = 1 << 7;
		/// The value is dictated by the remote session.
		const SERVER_OWNED = 1 << 8;
		/// A host-provided default beats a sandbox-declared one.
		const IGNORE_SANDBOX_DEFAULT = 1 << 9;
		/// Untrusted imports may create or overwrite this variable.
		const IMPORT_ALLOWED = 1 << 10;
		/// The main tier claims exclusive ownership; protected-mode writes
		/// are refused while this is set.
		const PINNED = 1 << 11;
		/// The active value was last written by the operator.
		const USER_CREATED = 1 << 12;
		/// The active value was last written by a sandboxed module.
		const SANDBOX_CREATED = 1 << 13;
		/// The value came in through an untrusted import.
		const IMPORT_CREATED = 1 << 14;
		/// Synthetic: reported by flag queries while the variable has
		/// changed since the last check. Never stored in a tier.
		const MODIFIED = 1 << 15;

		/// The subset a sandbox registration may merge into its tier.
		const SANDBOX_MERGEABLE = Self::ARCHIVE.bits()
			| Self::NO_ARCHIVE.bits()
			| Self::READ_ONLY.bits()
			| Self::MODIFIABLE.bits()
			| Self::NET_VISIBLE.bits()
			| Self::LATCH.bits();
		/// The subset an operator `setf` may merge into the main tier.
		const OPERATOR_MERGEABLE = Self::ARCHIVE.bits()
			| Self::NO_ARCHIVE.bits()
			| Self::NET_VISIBLE.bits()
			| Self::LATCH.bits();
		/// Provenance tags; exactly one is active on a written tier.
		const CREATED_TAGS = Self::USER_CREATED.bits()
			| Self::SANDBOX_CREATED.bits()
			| Self::IMPORT_CREATED.bits();
	}
}

/// Write authority a sandboxed or protected-mode writer has over a variable.
///
/// Derived from the host-registered tier only; the other tiers never grant
/// or revoke authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
	/// No sandbox writes at all.
	None,
	/// Value writes allowed, archiving is not.
	Modifiable,
	/// Value writes allowed and the archive bit may be requested.
	Archivable,
}
