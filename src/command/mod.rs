//! Command module: the declarative side of the engine.
//!
//! Builder calls compile into [`Command`] values held by a
//! [`CommandQueue`]; the engine consumes them one at a time.

#[allow(clippy::module_inception)]
mod command;
mod queue;

pub use command::Command;
pub use queue::{clamp_delay, CommandQueue};
