//! Error taxonomy: recoverable write rejections versus fatal handle faults.
//!
//! A [`WriteError`] is a graceful rejection of user/sandbox input; a
//! [`HandleFault`] signals caller misuse and is not meant to be handled
//! beyond aborting the caller.

/// A write was rejected or could not name a variable. Non-fatal: no state
/// changed, and the message is the human-readable reason surfaced to the
/// caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WriteError {
	#[error("invalid variable name {name:?}")]
	InvalidName { name: String },

	#[error("no variable named {name:?}")]
	Unknown { name: String },

	#[error("{name} is read only")]
	ReadOnly { name: String },

	#[error("{name} is owned by the remote session")]
	ServerOwned { name: String },

	#[error("{name} can only be set during startup")]
	InitOnly { name: String },

	#[error("{name} is cheat protected")]
	CheatProtected { name: String },

	#[error("{name} is registered by the host and does not allow imports")]
	ImportBlocked { name: String },

	#[error("the sandbox has no write permission for {name}")]
	NoPermission { name: String },

	#[error("{name} is pinned by the operator")]
	Pinned { name: String },
}

/// A sandboxed caller presented a token the handle table cannot honor.
///
/// Fatal by contract: a stale or out-of-range handle means the caller kept
/// a token across a table reset or fabricated one. Fix the caller, do not
/// retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HandleFault {
	#[error("variable handle index {index} is outside the allocated range ({allocated} allocated)")]
	OutOfRange { index: u32, allocated: u32 },

	#[error("variable handle generation {handle} does not match table generation {table}")]
	StaleGeneration { handle: u32, table: u32 },
}
