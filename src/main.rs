use anyhow::{bail, Context};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{error, info};
use wallplot::{
    init_logging, load_device_file, plot_svg, run_gcode, Clock, CountingMotor, MonotonicClock,
    MotionEngine, PeekableSource, RecordingPen, SimulatedClock, TracingDiagnostics, BUILD_DATE,
    VERSION,
};

struct Args {
    config: PathBuf,
    drawing: Option<PathBuf>,
    realtime: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut config = None;
    let mut drawing = None;
    let mut realtime = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--realtime" => realtime = true,
            "--version" => {
                println!("wallplot {} ({})", VERSION, BUILD_DATE);
                std::process::exit(0);
            }
            _ if config.is_none() => config = Some(PathBuf::from(arg)),
            _ if drawing.is_none() => drawing = Some(PathBuf::from(arg)),
            _ => bail!("unexpected argument: {}", arg),
        }
    }
    let Some(config) = config else {
        bail!("usage: wallplot [--realtime] <config-file> [drawing-file]");
    };
    Ok(Args {
        config,
        drawing,
        realtime,
    })
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let args = parse_args()?;

    let diagnostics = Rc::new(TracingDiagnostics);
    let config = load_device_file(&args.config, diagnostics.as_ref())
        .with_context(|| format!("loading {}", args.config.display()))?;

    let drawing = args
        .drawing
        .unwrap_or_else(|| PathBuf::from(&config.drawing_file));
    if drawing.as_os_str().is_empty() {
        bail!("no drawing file configured and none given on the command line");
    }

    // Counting drivers: the binary is a dry-run host that traces the
    // plot and reports the step totals real hardware would execute.
    // `--realtime` paces the run at the configured drawing speed.
    let clock: Box<dyn Clock> = if args.realtime {
        Box::new(MonotonicClock::new())
    } else {
        Box::new(SimulatedClock::new(100))
    };
    let left = CountingMotor::new();
    let right = CountingMotor::new();
    let left_log = left.log();
    let right_log = right.log();

    let start = config.init_position.to_point(&config.frame);
    let mut engine = MotionEngine::new(
        config.frame.clone(),
        start,
        clock,
        Box::new(left),
        Box::new(right),
        Box::new(RecordingPen::new()),
        diagnostics,
    )?;

    info!(drawing = %drawing.display(), "starting plot");
    engine.dwell(config.initial_delay_ms as f64 / 1000.0);

    let result = plot_file(&mut engine, &drawing);
    if let Err(err) = &result {
        error!("plot failed: {}", err);
        engine.halt();
        return result.map_err(Into::into);
    }

    engine.move_to(config.end_position.to_point(&config.frame));
    engine.halt();

    info!(
        left_steps = left_log.borrow().total(),
        right_steps = right_log.borrow().total(),
        "plot complete"
    );
    Ok(())
}

fn plot_file(engine: &mut MotionEngine, path: &Path) -> wallplot_core::Result<()> {
    let file = File::open(path)?;
    let is_svg = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);
    if is_svg {
        let mut source = PeekableSource::new(BufReader::new(file));
        plot_svg(engine, &mut source)
    } else {
        run_gcode(engine, BufReader::new(file))
    }
}
