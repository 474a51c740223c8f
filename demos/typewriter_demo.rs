//! Typewriter Demo: types a quote into the terminal.
//!
//! Runs the whole command script on real-time ticker threads, then lets
//! the caret blink for a few seconds before restoring the terminal.
//!
//! Usage: `cargo run --example typewriter_demo [speed]`
//!
//! Set `RUST_LOG=typewriter=debug` (and redirect stderr, e.g. `2>demo.log`)
//! to see engine events.

use std::time::Duration;
use typewriter::{
    Clock, RenderSurface, TerminalSurface, TerminalSurfaceConfig, TickerClock, Typewriter,
};

fn script<S: RenderSurface, C: Clock>(writer: &mut Typewriter<S, C>) -> typewriter::Result<()> {
    writer
        .type_text("wait a minute, ", 100)
        .type_text("I show you", 100)
        .move_to_start(300)
        .delete(1, 0)
        .type_text("W", 225)
        .gradient("#002B5B", None)?
        .move_to_end(300)
        .type_text(" the mot useful", 100)
        .move_by(-8, 100)
        .type_text("s", 400)
        .move_to_end(0)
        .type_text(" typing utlity", 150)
        .move_by(-4, 150)
        .type_text("i", 0)
        .move_to_end(0)
        .type_text(" on the internet.", 400)
        .new_line(0)
        .new_line(500)
        .type_text("Nvver", 300)
        .move_by(-3, 0)
        .delete(-1, 0)
        .gradient("#FF2B5B", Some("#FFE3CF"))?
        .type_text("e", 0)
        .move_to_end(0)
        .type_text(" let yees", 0)
        .delay(300)
        .delete(-2, 0)
        .type_text("sterday use up to muc", 0)
        .move_by(-4, 0)
        .type_text("o", 0)
        .move_to_end(0)
        .type_text("h of today.", 0)
        .delay(500)
        .new_line(500)
        .type_text("- Will Rogers", 0);
    Ok(())
}

fn main() -> typewriter::Result<()> {
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let speed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(60);

    let surface = TerminalSurface::stdout(TerminalSurfaceConfig {
        origin_x: 2,
        origin_y: 1,
        ..TerminalSurfaceConfig::default()
    })?;

    let mut writer = Typewriter::new(surface, TickerClock::new(), speed)?;
    script(&mut writer)?;
    writer.start();
    writer.run()?;

    // Let the idle caret blink before handing the terminal back
    writer.run_for(Duration::from_secs(3))?;
    Ok(())
}
