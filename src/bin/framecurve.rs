use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "framecurve", version)]
struct Cli {
    /// Log at DEBUG level instead of WARN.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print spring progress samples as a JSON array.
    Spring(SpringArgs),
    /// Print the natural duration of a spring preset.
    Measure(MeasureArgs),
    /// Print scene placement and total length of a composition.
    Timeline(TimelineArgs),
    /// Print evaluated frame state as JSON.
    Frame(FrameArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Source {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Builtin composition id (e.g. `AlfaVideoRU`).
    #[arg(long)]
    builtin: Option<String>,
}

#[derive(Args, Debug)]
struct SpringArgs {
    /// Preset name: smooth, snappy, bouncy or heavy.
    #[arg(long, default_value = "smooth")]
    preset: framecurve::SpringPreset,

    /// Number of frames to sample.
    #[arg(long, default_value_t = 60)]
    frames: u64,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Frames to wait before the spring starts.
    #[arg(long, default_value_t = 0.0)]
    delay: f64,
}

#[derive(Args, Debug)]
struct MeasureArgs {
    /// Preset name: smooth, snappy, bouncy or heavy.
    #[arg(long, default_value = "smooth")]
    preset: framecurve::SpringPreset,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Distance to target considered at rest.
    #[arg(long, default_value_t = framecurve::DEFAULT_REST_THRESHOLD)]
    threshold: f64,
}

#[derive(Args, Debug)]
struct TimelineArgs {
    #[command(flatten)]
    source: Source,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: Source,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Number of consecutive frames to evaluate.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    count: u64,

    /// Evaluate frames on a thread pool.
    #[arg(long)]
    parallel: bool,

    /// Worker thread count for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per chunk (parallel mode only).
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

#[derive(serde::Serialize)]
struct TimelineOut<'a> {
    id: &'a str,
    fps: f64,
    total_frames: u64,
    transition_frames: u64,
    scenes: Vec<SceneOut<'a>>,
}

#[derive(serde::Serialize)]
struct SceneOut<'a> {
    id: &'a str,
    start: u64,
    end: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Spring(args) => cmd_spring(args),
        Command::Measure(args) => cmd_measure(args),
        Command::Timeline(args) => cmd_timeline(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load(source: &Source) -> anyhow::Result<framecurve::Composition> {
    match (&source.in_path, &source.builtin) {
        (Some(path), _) => framecurve::Composition::from_path(path)
            .with_context(|| format!("load composition '{}'", path.display())),
        (None, Some(id)) => {
            framecurve::builtin(id).with_context(|| format!("load builtin composition '{id}'"))
        }
        (None, None) => anyhow::bail!("either --in or --builtin is required"),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value).context("serialize output JSON")?;
    println!("{s}");
    Ok(())
}

fn cmd_spring(args: SpringArgs) -> anyhow::Result<()> {
    let fps = framecurve::Fps::whole(args.fps)?;
    let samples: Vec<f64> = (0..args.frames)
        .map(|f| framecurve::spring(f as f64 - args.delay, fps, args.preset))
        .collect();
    print_json(&samples)
}

fn cmd_measure(args: MeasureArgs) -> anyhow::Result<()> {
    let fps = framecurve::Fps::whole(args.fps)?;
    let frames = framecurve::measure_spring(fps, args.preset, args.threshold)
        .with_context(|| format!("measure '{}' spring", args.preset))?;
    println!(
        "{}: {frames} frames ({:.3} s at {} fps)",
        args.preset,
        fps.frames_to_secs(frames as f64),
        args.fps
    );
    Ok(())
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let comp = load(&args.source)?;
    let series = comp.series();
    let scenes = series
        .scenes()
        .iter()
        .enumerate()
        .filter_map(|(i, slot)| {
            series.scene_range(i).map(|r| SceneOut {
                id: &slot.id,
                start: r.start.0,
                end: r.end.0,
            })
        })
        .collect();
    print_json(&TimelineOut {
        id: comp.id(),
        fps: comp.fps().as_f64(),
        total_frames: comp.total_frames(),
        transition_frames: series.transition_frames(),
        scenes,
    })
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let comp = load(&args.source)?;
    if args.count == 1 {
        let frame = framecurve::Evaluator::eval_frame(&comp, framecurve::FrameIndex(args.frame))
            .with_context(|| format!("evaluate frame {}", args.frame))?;
        return print_json(&frame);
    }

    let range = framecurve::FrameRange::new(
        framecurve::FrameIndex(args.frame),
        framecurve::FrameIndex(args.frame.saturating_add(args.count)),
    )?;
    let threading = framecurve::EvalThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };
    let frames = framecurve::Evaluator::eval_frames(&comp, range, &threading)
        .with_context(|| format!("evaluate frames {}..{}", range.start.0, range.end.0))?;
    print_json(&frames)
}
