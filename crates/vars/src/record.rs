//! The per-variable record: three independently-writable tiers plus the
//! effective state derived from them.

use crate::atom::Atom;
use crate::flags::{Permission, VarFlags};
use crate::handle::VarHandle;
use crate::validate::Validation;

/// Longest accepted variable name.
pub const MAX_NAME_LEN: usize = 1000;

/// Bytes a variable name may not contain.
const FORBIDDEN_NAME_CHARS: &[char] = &['"', '\\', ';', '\r', '\n'];

/// Whether `name` may identify a variable.
pub fn valid_name(name: &str) -> bool {
	!name.is_empty() && name.len() <= MAX_NAME_LEN && !name.contains(FORBIDDEN_NAME_CHARS)
}

/// Compiled-in baseline, written once by the trusted host at registration.
#[derive(Debug, Clone, Default)]
pub struct SystemTier {
	pub default: Option<Atom>,
	pub flags: VarFlags,
}

/// Locally persisted/interactive value, written by operator commands or
/// host code.
#[derive(Debug, Clone, Default)]
pub struct MainTier {
	pub value: Option<Atom>,
	pub flags: VarFlags,
}

/// Sandbox/session context; cleared at session end unless archivable.
#[derive(Debug, Clone, Default)]
pub struct ProtectedTier {
	pub value: Option<Atom>,
	pub default: Option<Atom>,
	pub flags: VarFlags,
}

/// Classification tag used for persistence grouping only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VarCategory {
	#[default]
	General,
	Video,
	Audio,
	Input,
	Network,
}

/// The order categories appear in a written settings file.
pub const CATEGORY_ORDER: &[VarCategory] = &[
	VarCategory::General,
	VarCategory::Video,
	VarCategory::Audio,
	VarCategory::Input,
	VarCategory::Network,
];

impl VarCategory {
	pub fn label(self) -> &'static str {
		match self {
			Self::General => "general",
			Self::Video => "video",
			Self::Audio => "audio",
			Self::Input => "input",
			Self::Network => "network",
		}
	}
}

/// A named setting shared by the host, the operator, and sandboxed modules.
///
/// Records are created on first lookup-with-create and never deleted;
/// "unset" clears tier contents, not the record. All effective state is
/// written exclusively by the store's resolution pass.
#[derive(Debug, Clone)]
pub struct VarRecord {
	pub(crate) name: Box<str>,
	pub(crate) system: SystemTier,
	pub(crate) main: MainTier,
	pub(crate) protected: ProtectedTier,
	pub(crate) host_registered: bool,
	/// `None` only between creation and the first resolution.
	pub(crate) current: Option<Atom>,
	pub(crate) latched: Option<Atom>,
	pub(crate) reset: Atom,
	pub(crate) flags: VarFlags,
	pub(crate) protect: bool,
	pub(crate) as_float: f32,
	pub(crate) as_int: i32,
	pub(crate) modification_count: u32,
	pub(crate) modified: bool,
	pub(crate) validation: Option<Validation>,
	pub(crate) category: VarCategory,
	pub(crate) handle: Option<VarHandle>,
}

impl VarRecord {
	pub(crate) fn new(name: &str) -> Self {
		Self {
			name: name.into(),
			system: SystemTier::default(),
			main: MainTier::default(),
			protected: ProtectedTier::default(),
			host_registered: false,
			current: None,
			latched: None,
			reset: Atom::Empty,
			flags: VarFlags::empty(),
			protect: false,
			as_float: 0.0,
			as_int: 0,
			modification_count: 0,
			modified: false,
			validation: None,
			category: VarCategory::General,
			handle: None,
		}
	}

	/// Case-preserving name as first registered.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// The resolved value all non-store consumers observe.
	pub fn current(&self) -> &str {
		self.current.as_deref().unwrap_or("")
	}

	/// Pending value withheld by a latch, if any.
	pub fn latched(&self) -> Option<&str> {
		self.latched.as_deref()
	}

	/// The default this variable reverts to on reset.
	pub fn reset_value(&self) -> &str {
		&self.reset
	}

	/// Union of all tier flags as of the last resolution.
	pub fn flags(&self) -> VarFlags {
		self.flags
	}

	/// Whether the active value originates from the protected tier.
	pub fn is_protected_value(&self) -> bool {
		self.protect
	}

	pub fn as_float(&self) -> f32 {
		self.as_float
	}

	pub fn as_int(&self) -> i32 {
		self.as_int
	}

	/// Bumped every time the effective or pending value changes.
	pub fn modification_count(&self) -> u32 {
		self.modification_count
	}

	pub fn category(&self) -> VarCategory {
		self.category
	}

	pub fn system(&self) -> &SystemTier {
		&self.system
	}

	pub fn main(&self) -> &MainTier {
		&self.main
	}

	pub fn protected(&self) -> &ProtectedTier {
		&self.protected
	}

	/// Write authority a sandboxed or protected-mode writer has here.
	///
	/// A variable the host never claimed is fully open; past that, only
	/// host-set flags grant authority.
	pub fn permission(&self) -> Permission {
		if !self.host_registered || self.system.flags.contains(VarFlags::ARCHIVE) {
			Permission::Archivable
		} else if self
			.system
			.flags
			.intersects(VarFlags::MODIFIABLE | VarFlags::NET_VISIBLE)
		{
			Permission::Modifiable
		} else {
			Permission::None
		}
	}
}
