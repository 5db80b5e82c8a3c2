use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mapf-vis", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a map and solution pair and print a summary.
    Check(InputArgs),
    /// Print the frame state at a time as JSON.
    Inspect(InspectArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render the whole playback as a PNG sequence.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// MovingAI map file.
    #[arg(long)]
    map: PathBuf,

    /// Solution file, one configuration per line.
    #[arg(long)]
    solution: PathBuf,

    /// JSON settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the cell size in pixels.
    #[arg(long)]
    cell_px: Option<u32>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Timeline time, clamped to `[0, T]`.
    #[arg(long, default_value_t = 0.0)]
    time: f64,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Timeline time, clamped to `[0, T]`.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Frames per second.
    #[arg(long, default_value_t = mapf_vis::DEFAULT_FRAME_RATE_HZ)]
    fps: f64,

    /// Playback speed in timesteps per second.
    #[arg(long)]
    speed: Option<f64>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per batch.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn load(args: &InputArgs) -> anyhow::Result<mapf_vis::Workspace> {
    let mut config = match &args.config {
        Some(path) => mapf_vis::VisConfig::from_path(path)
            .with_context(|| format!("load settings '{}'", path.display()))?,
        None => mapf_vis::VisConfig::default(),
    };
    if let Some(px) = args.cell_px {
        config.render.cell_px = px;
    }
    config.validate().context("validate settings")?;

    let mut ws = mapf_vis::Workspace::new(&config);
    ws.load_map_path(&args.map)
        .with_context(|| format!("load map '{}'", args.map.display()))?;
    ws.load_solution_path(&args.solution)
        .with_context(|| format!("load solution '{}'", args.solution.display()))?;
    Ok(ws)
}

fn cmd_check(args: InputArgs) -> anyhow::Result<()> {
    let ws = load(&args)?;
    let map = ws.map().context("map missing after load")?;
    let solution = ws
        .engine()
        .solution()
        .context("solution missing after load")?;
    println!(
        "map {}x{} ({} obstacles), {} agents, {} timesteps{}",
        map.width(),
        map.height(),
        map.obstacles().len(),
        solution.agent_count(),
        solution.last_timestep(),
        if solution.is_orientation_aware() {
            ", orientation-aware"
        } else {
            ""
        }
    );
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let mut ws = load(&args.input)?;
    let frame = ws.frame_at(args.time).context("no solution loaded")?;
    let json = serde_json::to_string_pretty(&frame).context("serialize frame state")?;
    println!("{json}");
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut ws = load(&args.input)?;
    ws.engine_mut().seek_to(args.time);
    let frame = ws.screenshot().context("render frame")?;
    write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let ws = load(&args.input)?;
    let opts = mapf_vis::ExportOpts {
        fps: args.fps,
        speed: args.speed,
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };
    let mut sink = mapf_vis::PngSequenceSink::new(&args.out_dir);
    let stats = mapf_vis::render_timeline(&ws, &opts, &mut sink)
        .with_context(|| format!("render into '{}'", args.out_dir.display()))?;

    eprintln!(
        "wrote {} frames ({}x{}) to {}",
        stats.frames,
        stats.width,
        stats.height,
        args.out_dir.display()
    );
    Ok(())
}

fn write_png(path: &Path, frame: &mapf_vis::FrameRGBA) -> anyhow::Result<()> {
    mapf_vis::write_png(path, frame).with_context(|| format!("write png '{}'", path.display()))
}
