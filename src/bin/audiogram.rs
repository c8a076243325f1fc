use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "audiogram", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one composited frame as a PNG.
    Frame(FrameArgs),
    /// Render the whole job to MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct JobArgs {
    /// Scene description JSON.
    #[arg(long)]
    scene: PathBuf,

    /// Amplitude series JSON (`{"spectrum": [[..]], "signal": [[..]]}`).
    #[arg(long)]
    amplitudes: PathBuf,

    /// Directory resource identifiers resolve against. Defaults to the scene's directory.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Extra font directories, loaded once before rendering.
    #[arg(long = "fonts")]
    fonts: Vec<PathBuf>,

    /// Seed for particle and jitter randomness.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    job: JobArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    job: JobArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,
}

struct LoadedJob {
    scene: audiogram::SceneDescription,
    amplitudes: audiogram::AmplitudeData,
    resolver: audiogram::FsResolver,
    opts: audiogram::RenderOpts,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn read_text(path: &Path, what: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {what} '{}'", path.display()))
}

fn load_job(args: &JobArgs) -> anyhow::Result<LoadedJob> {
    audiogram::init_fonts(&args.fonts)?;

    let scene = audiogram::SceneDescription::from_json(&read_text(&args.scene, "scene")?)?;
    let amplitudes =
        audiogram::AmplitudeData::from_json(&read_text(&args.amplitudes, "amplitudes")?)?;
    let root = match &args.assets {
        Some(dir) => dir.clone(),
        None => args
            .scene
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    Ok(LoadedJob {
        scene,
        amplitudes,
        resolver: audiogram::FsResolver::new(root),
        opts: audiogram::RenderOpts {
            seed: args.seed,
            ..audiogram::RenderOpts::default()
        },
    })
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let job = load_job(&args.job)?;
    let mut synth = audiogram::FrameSynthesizer::prepare(
        &job.scene,
        &job.amplitudes,
        &job.resolver,
        &job.opts,
    )?;
    for index in 0..=args.frame {
        synth.compose(index)?;
    }
    let frame = synth.frame_image();

    audiogram::encode::ffmpeg::ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let job = load_job(&args.job)?;
    let registry = audiogram::TaskRegistry::new();
    let id = audiogram::JobId::new(
        args.out
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "job".to_owned()),
    );
    registry.register(id.clone())?;

    let mut sink = audiogram::FfmpegSink::new(audiogram::FfmpegSinkOpts::new(&args.out));
    let status = audiogram::render_job(
        &id,
        &job.scene,
        &job.amplitudes,
        &job.resolver,
        &mut sink,
        &audiogram::JobHooks::registry(&registry),
        &job.opts,
    )?;

    eprintln!("{status:?}: wrote {}", args.out.display());
    Ok(())
}
