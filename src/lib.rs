//! # Typewriter
//!
//! A tick-driven typewriter animation engine.
//!
//! Text is typed into a render surface one grapheme per tick, with caret
//! moves, deletions, pauses and per-line color gradients, all described up
//! front through a fluent builder.
//!
//! ## Core Concepts
//!
//! - **Command queue**: builder calls compile into immutable commands,
//!   executed strictly in order
//! - **One step per tick**: a single repeating timer advances the active
//!   command by exactly one atomic mutation
//! - **Clamp first**: moves and deletions clamp their destination against
//!   the buffer before counting steps
//! - **Pluggable edges**: a [`RenderSurface`] shows the result and a
//!   [`Clock`] supplies the timers
//!
//! ## Example
//!
//! ```rust
//! use typewriter::{ManualClock, MemorySurface, Typewriter};
//!
//! let mut writer = Typewriter::new(MemorySurface::new(), ManualClock::new(), 60)?;
//! writer
//!     .type_text("Nvver", 300)
//!     .move_by(-3, 0)
//!     .delete(-1, 0)
//!     .type_text("e", 0)
//!     .start();
//! writer.run_until_stopped(1_000)?;
//!
//! assert_eq!(writer.surface().text(), "Never");
//! # Ok::<(), typewriter::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod clock;
pub mod color;
pub mod command;
pub mod engine;
pub mod error;
pub mod surface;

// Re-exports for convenience
pub use buffer::{Direction, TextBuffer, Unit, UnitFlags, UnitId};
pub use clock::{Clock, ManualClock, TickerClock, TimerHandle};
pub use color::{Color, Gradient};
pub use command::{Command, CommandQueue};
pub use engine::{EngineConfig, EngineState, Typewriter};
pub use error::{ColorError, Error, Result};
pub use surface::{MemorySurface, RenderSurface, SurfaceOp, TerminalSurface, TerminalSurfaceConfig};
