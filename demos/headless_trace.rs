//! Headless Trace: prints every surface operation with its virtual time.
//!
//! Uses a `MemorySurface` and a `ManualClock`, so the output is fully
//! deterministic and the run takes no wall-clock time.
//!
//! Usage: `cargo run --example headless_trace [speed]`

use typewriter::{ManualClock, MemorySurface, SurfaceOp, Typewriter};

fn main() -> typewriter::Result<()> {
    let speed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(60);

    let mut writer = Typewriter::new(MemorySurface::new(), ManualClock::new(), speed)?;
    writer
        .type_text("Nvver", 300)
        .move_by(-3, 0)
        .delete(-1, 0)
        .gradient("#FF2B5B", Some("#FFE3CF"))?
        .type_text("e", 0)
        .move_to_end(0)
        .new_line(0)
        .type_text("- Will Rogers", 0)
        .start();

    println!("speed {speed}, tick period {:?}", writer.period());
    println!();

    let mut ticks = 0usize;
    while writer.is_started() {
        let period = writer.period();
        writer.advance(period)?;
        ticks += 1;

        let millis = writer.clock().now().as_secs_f64() * 1000.0;
        for op in writer.surface_mut().take_ops() {
            match op {
                SurfaceOp::Flush => {}
                op => println!("{millis:>9.1}ms  tick {ticks:>3}  {op:?}"),
            }
        }
    }

    println!();
    println!("{ticks} ticks, final text:");
    println!("{}", writer.surface().text());
    Ok(())
}
