//! Operator command surface over the layered variable store.
//!
//! The tokenizer and command-buffer scheduler live elsewhere; this crate
//! receives already-split arguments and hands back either printable text or
//! stored command text for the scheduler to run (`vstr`). Handlers are
//! synchronous and drive [`keel_vars::VarStore`] through its public
//! gateways only.

pub mod builtins;
pub mod context;
pub mod suggest;

pub use builtins::{COMMANDS, CommandSpec, dispatch, find_command};
pub use context::{CommandContext, CommandError, CommandOutcome, CommandResult};
pub use suggest::{complete_name, suggest_name};
