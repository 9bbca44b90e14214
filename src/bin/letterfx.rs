use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "letterfx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run timed animation requests on one label and write every frame as JSON.
    Trace(TraceArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct FontArgs {
    /// BMFont text descriptor (.fnt).
    #[arg(long)]
    bmfont: Option<PathBuf>,

    /// Outline font file (.ttf/.otf).
    #[arg(long)]
    ttf: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct TraceArgs {
    /// Stage config JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    font: FontArgs,

    /// Font size in pixels (outline fonts only).
    #[arg(long, default_value_t = 32.0)]
    size: f32,

    /// Label text. Use `\n` in the shell string for line breaks.
    #[arg(long)]
    text: String,

    /// Horizontal alignment.
    #[arg(long, value_enum, default_value_t = AlignChoice::Left)]
    align: AlignChoice,

    /// Vertical alignment (outline fonts only).
    #[arg(long, value_enum, default_value_t = VAlignChoice::Top)]
    valign: VAlignChoice,

    /// Wrap width for bitmap labels; box width for outline labels. 0 means unbounded.
    #[arg(long, default_value_t = 0.0)]
    width: f64,

    /// Box height for outline labels. 0 means unbounded.
    #[arg(long, default_value_t = 0.0)]
    height: f64,

    /// Label position on the stage.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    x: f64,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    y: f64,

    /// JSON array of timed animation requests.
    #[arg(long)]
    requests: Option<PathBuf>,

    /// Number of frames to record.
    #[arg(long, default_value_t = 60)]
    frames: u64,

    /// Output trace JSON path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AlignChoice {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VAlignChoice {
    Top,
    Center,
    Bottom,
}

impl From<AlignChoice> for letterfx::HAlign {
    fn from(value: AlignChoice) -> Self {
        match value {
            AlignChoice::Left => Self::Left,
            AlignChoice::Center => Self::Center,
            AlignChoice::Right => Self::Right,
        }
    }
}

impl From<VAlignChoice> for letterfx::VAlign {
    fn from(value: VAlignChoice) -> Self {
        match value {
            VAlignChoice::Top => Self::Top,
            VAlignChoice::Center => Self::Center,
            VAlignChoice::Bottom => Self::Bottom,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Trace(args) => cmd_trace(args),
    }
}

fn read_requests(path: &Path) -> anyhow::Result<Vec<letterfx::TimedRequest>> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("read requests '{}'", path.display()))?;
    let requests = letterfx::TimedRequest::list_from_json_str(&src)
        .with_context(|| format!("parse requests '{}'", path.display()))?;
    Ok(requests)
}

fn build_label(args: &TraceArgs) -> anyhow::Result<letterfx::Label> {
    let text = args.text.replace("\\n", "\n");
    let label = match (&args.font.bmfont, &args.font.ttf) {
        (Some(fnt), _) => letterfx::Label::from_bitmap_font(
            fnt,
            &text,
            args.align.into(),
            args.width,
            letterfx::Vec2::ZERO,
        )?,
        (None, Some(ttf)) => letterfx::Label::from_outline_font(
            &text,
            ttf,
            args.size,
            letterfx::Size::new(args.width, args.height),
            args.align.into(),
            args.valign.into(),
        )?,
        (None, None) => anyhow::bail!("either --bmfont or --ttf is required"),
    };
    Ok(label)
}

fn cmd_trace(args: TraceArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => letterfx::StageConfig::from_path(path)?,
        None => letterfx::StageConfig::default(),
    };
    let requests = match &args.requests {
        Some(path) => read_requests(path)?,
        None => Vec::new(),
    };

    let mut label = build_label(&args)?;
    label.node_mut().position = letterfx::Point::new(args.x, args.y);

    let mut stage = letterfx::Stage::new(config);
    let node = stage.add_label(label);
    let trace = letterfx::trace::record(&mut stage, node, &requests, args.frames);

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(&args.out)
        .with_context(|| format!("create trace '{}'", args.out.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(f), &trace).with_context(|| "write trace JSON")?;

    for d in &trace.diagnostics {
        eprintln!("warning: {d}");
    }
    eprintln!(
        "wrote {} ({} frames)",
        args.out.display(),
        trace.frames.len()
    );
    Ok(())
}
