//! # Wallplot
//!
//! Motion control and path interpretation for a cable-suspended wall
//! plotter: two stepper motors wind cables from the upper corners of a
//! frame, and the pen hangs where the cables meet.
//!
//! ## Architecture
//!
//! Wallplot is organized as a workspace with multiple crates:
//!
//! 1. **wallplot-core** - Geometry, errors, diagnostics
//! 2. **wallplot-motion** - Kinematics, step scheduling, the motion engine
//! 3. **wallplot-path** - SVG path and G-code interpretation
//! 4. **wallplot-settings** - Device configuration and persistence
//! 5. **wallplot** - Main binary that integrates all crates

pub use wallplot_core::{
    CurveFamily, DiagnosticsSink, PlotterError, Point, RecordingDiagnostics, TracingDiagnostics,
    Warning,
};

pub use wallplot_motion::{
    CardinalPoint, Clock, CountingMotor, Cursor, FrameConfig, Kinematics, MonotonicClock,
    MotionEngine, MotorDriver, MotorState, PenActuator, RecordingPen, SimulatedClock,
};

pub use wallplot_path::{plot_svg, run_gcode, PeekableSource};

pub use wallplot_settings::{load_device_file, PlotterConfig, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with console output and RUST_LOG
/// environment variable support.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
