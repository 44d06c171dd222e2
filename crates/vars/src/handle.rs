//! Generation-checked handles for sandboxed access.
//!
//! Sandboxed modules never hold a reference into the store; they hold an
//! opaque `(generation, index)` token and go through the table on every
//! access. Indices come from a fixed-size pool, are allocated monotonically,
//! and are never recycled within a process lifetime. Invalidating the table
//! bumps the generation, stranding every outstanding token.

use crate::error::HandleFault;

/// Handle pool capacity. Exhausting it is a build misconfiguration (too
/// many sandbox registrations compiled in), not a runtime condition.
pub const HANDLE_CAPACITY: usize = 1024;

/// Opaque token a sandboxed module holds in place of a variable reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarHandle {
	pub(crate) generation: u32,
	pub(crate) index: u32,
}

/// Maps handle indices to store arena slots.
#[derive(Debug, Default)]
pub(crate) struct HandleTable {
	generation: u32,
	slots: Vec<usize>,
}

impl HandleTable {
	/// Allocates the next handle for `arena_idx`.
	///
	/// # Panics
	///
	/// Panics when the pool is exhausted; the capacity is a build-time
	/// constant.
	pub(crate) fn register(&mut self, arena_idx: usize) -> VarHandle {
		assert!(
			self.slots.len() < HANDLE_CAPACITY,
			"variable handle pool exhausted ({HANDLE_CAPACITY} slots); raise HANDLE_CAPACITY"
		);
		let index = self.slots.len() as u32;
		self.slots.push(arena_idx);
		VarHandle { generation: self.generation, index }
	}

	/// Resolves a handle back to its arena slot.
	pub(crate) fn resolve(&self, handle: VarHandle) -> Result<usize, HandleFault> {
		if handle.generation != self.generation {
			return Err(HandleFault::StaleGeneration {
				handle: handle.generation,
				table: self.generation,
			});
		}
		self.slots
			.get(handle.index as usize)
			.copied()
			.ok_or(HandleFault::OutOfRange {
				index: handle.index,
				allocated: self.slots.len() as u32,
			})
	}

	/// Strands every outstanding handle. Slots are kept so indices stay
	/// monotonic across resets.
	pub(crate) fn invalidate(&mut self) {
		self.generation += 1;
	}
}
