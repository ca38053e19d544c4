use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lyricue", version, about = "Timed-lyric overlay renderer")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the active lyric for each frame as JSON lines.
    Cues(CuesArgs),
    /// Render a single frame as SVG or PNG (by output extension).
    Frame(FrameArgs),
    /// Render a PNG sequence.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct RangeArgs {
    /// First frame (inclusive).
    #[arg(long)]
    from: Option<u64>,

    /// Last frame (exclusive). Defaults to the end of the last line's hold.
    #[arg(long)]
    to: Option<u64>,
}

#[derive(Parser, Debug)]
struct CuesArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    range: RangeArgs,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output path; `.svg` writes the overlay document, anything else a PNG.
    #[arg(long)]
    out: PathBuf,

    /// Print diagnostics about font resolution (family name + SHA-256 of font bytes).
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory for `frame_NNNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    #[command(flatten)]
    range: RangeArgs,

    /// Rasterize frames in parallel.
    #[arg(long)]
    parallel: bool,

    /// Worker threads when `--parallel` is set.
    #[arg(long)]
    threads: Option<usize>,

    /// Rasterize every frame even when identical to an earlier one.
    #[arg(long)]
    no_elide: bool,

    /// Print diagnostics about font resolution (family name + SHA-256 of font bytes).
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(serde::Serialize)]
struct CueLine<'a> {
    frame: u64,
    time_secs: f64,
    #[serde(flatten)]
    result: lyricue::EvaluationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    layers: Vec<lyricue::LayerSource>,
    backdrop_opacity: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Cues(args) => cmd_cues(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn open_session(path: &Path) -> anyhow::Result<lyricue::LyricSession> {
    lyricue::LyricSession::open(path).with_context(|| format!("open project '{}'", path.display()))
}

fn resolve_range(
    session: &lyricue::LyricSession,
    args: &RangeArgs,
) -> anyhow::Result<lyricue::FrameRange> {
    let default = session.default_range();
    let start = lyricue::FrameIndex(args.from.unwrap_or(default.start.0));
    let end = lyricue::FrameIndex(args.to.unwrap_or(default.end.0.max(start.0)));
    Ok(lyricue::FrameRange::new(start, end)?)
}

fn cmd_cues(args: CuesArgs) -> anyhow::Result<()> {
    let session = open_session(&args.in_path)?;
    let range = resolve_range(&session, &args.range)?;

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    let mut cursor = session.cursor();
    for frame in range.iter() {
        let time = session.time_of(frame);
        let result = cursor.evaluate(session.timeline(), time);
        let scene = lyricue::compose_result(
            session.timeline(),
            result,
            session.preset(),
            session.project().canvas,
            frame,
            time,
        );
        let line = CueLine {
            frame: frame.0,
            time_secs: time,
            result,
            text: scene.text.as_deref(),
            layers: scene.layers.iter().map(|l| l.source).collect(),
            backdrop_opacity: scene.backdrop_opacity,
        };
        serde_json::to_writer(&mut out, &line).context("encode cue")?;
        out.write_all(b"\n").context("write cue")?;
    }
    out.flush().context("flush cues")?;
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let session = open_session(&args.in_path)?;
    if args.dump_fonts {
        dump_font_diagnostics(session.fonts());
    }

    let frame = lyricue::FrameIndex(args.frame);
    let is_svg = args
        .out
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

    if is_svg {
        if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(&args.out, session.render_svg(frame))
            .with_context(|| format!("write svg '{}'", args.out.display()))?;
    } else {
        let pixels = session.render_frame(frame)?;
        lyricue::write_png(&pixels, &args.out)?;
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let session = open_session(&args.in_path)?;
    if args.dump_fonts {
        dump_font_diagnostics(session.fonts());
    }

    let range = resolve_range(&session, &args.range)?;
    let threading = lyricue::RenderThreading {
        parallel: args.parallel,
        threads: args.threads,
        static_frame_elision: !args.no_elide,
    };
    let stats = session.render_range_to_dir(range, &args.out_dir, &threading)?;

    eprintln!(
        "wrote {} frames to {} ({} rasterized, {} reused)",
        stats.frames_total,
        args.out_dir.display(),
        stats.frames_rendered,
        stats.frames_elided
    );
    Ok(())
}

fn dump_font_diagnostics(fonts: &lyricue::FontHandle) {
    eprintln!("font diagnostics:");
    eprintln!("  family:      {}", fonts.family());
    eprintln!("  font_faces:  {}", fonts.face_count());
    if let Some(loaded) = fonts.loaded() {
        if let Some(path) = &loaded.path {
            eprintln!("  font_source: {}", path.display());
        }
        eprintln!("  file_faces:  {}", loaded.faces);
        eprintln!("  sha256:      {}", loaded.sha256);
    }
}
