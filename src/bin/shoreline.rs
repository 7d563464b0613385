use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

use shoreline::{
    CpuBackend, CpuBackendOpts, FfmpegSink, FixedTickScheduler, Fps, FrameSink,
    PngSequenceSink, RenderBackend, SceneConfig, SceneRenderer, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "shoreline", version, about = "Render the animated sunset beach scene")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a PNG sequence.
    Frames(FramesArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Dump the frame plan recorded at one instant as JSON.
    Plan(PlanArgs),
    /// Print the default scene configuration as JSON.
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Viewport width.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height.
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Device pixel ratio (clamped to [1, 2]).
    #[arg(long, default_value_t = 1.0)]
    pixel_ratio: f64,

    /// Scene configuration JSON; omitted fields keep the built-in sunset scene.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the particle seed.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Elapsed time in seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct SequenceArgs {
    /// Clip length in seconds.
    #[arg(long, default_value_t = 5.0)]
    duration: f64,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Elapsed time of the first frame, in seconds.
    #[arg(long, default_value_t = 0.0)]
    start: f64,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    scene: SceneArgs,

    #[command(flatten)]
    seq: SequenceArgs,

    /// Directory receiving `frame_000000.png`, ...
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    #[command(flatten)]
    seq: SequenceArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Elapsed time in seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Render(args) => cmd_render(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_scene(args: &SceneArgs) -> anyhow::Result<(SceneRenderer, CpuBackend)> {
    let mut config = match &args.config {
        Some(path) => SceneConfig::from_path(path)
            .with_context(|| format!("load scene config '{}'", path.display()))?,
        None => SceneConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let backend = CpuBackend::new(CpuBackendOpts::for_labels(&config.labels))
        .context("create CPU backend")?;
    let viewport = Viewport::new(args.width, args.height, args.pixel_ratio);
    let scene = SceneRenderer::new(config, viewport).context("configure scene")?;
    Ok((scene, backend))
}

fn scheduler(seq: &SequenceArgs) -> anyhow::Result<(FixedTickScheduler, Fps)> {
    let fps = Fps::new(seq.fps, 1)?;
    let ticks = FixedTickScheduler::for_duration(seq.duration, fps, seq.start)
        .context("invalid --duration/--start")?;
    Ok((ticks, fps))
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create directory '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_or_print(out: Option<&Path>, json: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            ensure_parent(path)?;
            std::fs::write(path, json).with_context(|| format!("write '{}'", path.display()))?;
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (mut scene, mut backend) = load_scene(&args.scene)?;
    let frame = scene
        .render_frame(args.time, &mut backend)
        .with_context(|| format!("render frame at t={}", args.time))?;

    let img = frame.to_rgba_image()?;
    ensure_parent(&args.out)?;
    img.save(&args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    Ok(())
}

fn run_sequence(
    scene_args: &SceneArgs,
    seq: &SequenceArgs,
    sink: &mut dyn FrameSink,
) -> anyhow::Result<()> {
    let (mut scene, mut backend) = load_scene(scene_args)?;
    let (mut ticks, fps) = scheduler(seq)?;
    let stats = scene
        .run(&mut ticks, &mut backend, sink, fps)
        .context("render sequence")?;
    tracing::info!(frames = stats.frames_rendered, "done");
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let mut sink = PngSequenceSink::new(&args.out_dir);
    run_sequence(&args.scene, &args.seq, &mut sink)?;
    eprintln!(
        "wrote {} frames to '{}'",
        sink.written().len(),
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    ensure_parent(&args.out)?;
    let mut sink = FfmpegSink::new(&args.out);
    run_sequence(&args.scene, &args.seq, &mut sink)?;
    eprintln!("wrote '{}'", args.out.display());
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let (mut scene, mut backend) = load_scene(&args.scene)?;
    let plan = scene.paint(args.time, backend.text_measure());
    let json = plan.to_json_pretty()?;
    write_or_print(args.out.as_deref(), &json)
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let json = SceneConfig::default().to_json_pretty()?;
    write_or_print(args.out.as_deref(), &json)
}
