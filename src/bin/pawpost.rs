use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use pawpost::script::Script;
use pawpost::{
    Command as EditCommand, CpuBackend, DirSink, DrawOp, EditorConfig, EditorSession, FontBook,
    TextEngine,
};

#[derive(Parser, Debug)]
#[command(name = "pawpost", version)]
struct Cli {
    /// Log at debug level.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a script and export its slides as PNG files.
    Export(ExportArgs),
    /// Replay a script and print the draw list of one slide.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct SessionArgs {
    /// Input script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Editor config JSON (brand defaults when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Register a font file, e.g. `--font Chewy=fonts/Chewy.ttf`. Repeatable.
    #[arg(long = "font", value_parser = parse_font)]
    fonts: Vec<(String, PathBuf)>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// On-screen display scale the export compensates for.
    #[arg(long, default_value_t = 1.0)]
    display_scale: f64,

    /// Export only this slide (0-based) under the single-post name.
    #[arg(long)]
    slide: Option<usize>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Slide index (0-based).
    #[arg(long, default_value_t = 0)]
    slide: usize,
}

fn parse_font(s: &str) -> Result<(String, PathBuf), String> {
    let (family, path) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FAMILY=PATH, got '{s}'"))?;
    if family.trim().is_empty() || path.is_empty() {
        return Err(format!("expected FAMILY=PATH, got '{s}'"));
    }
    Ok((family.trim().to_string(), PathBuf::from(path)))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Export(args) => cmd_export(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

/// Load config and fonts, then replay the script into a fresh session.
fn prepare(args: &SessionArgs) -> anyhow::Result<(EditorSession, FontBook)> {
    let config = match &args.config {
        Some(path) => EditorConfig::from_path(path)?,
        None => EditorConfig::default(),
    };

    let mut book = FontBook::new();
    let config_dir = args
        .config
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new("."));
    for (family, path) in &config.fonts.files {
        book.load(family, config_dir.join(path))?;
    }
    for (family, path) in &args.fonts {
        book.load(family, path)?;
    }

    let script = Script::from_path(&args.script)?;
    let mut session =
        EditorSession::new(config)?.with_measure(TextEngine::new(book.clone()));
    let base_dir = args.script.parent().unwrap_or_else(|| Path::new("."));
    let report = script
        .run(&mut session, base_dir)
        .with_context(|| format!("run script '{}'", args.script.display()))?;

    for notice in &report.notices {
        eprintln!("note: {notice}");
    }
    tracing::info!(
        applied = report.applied,
        unchanged = report.unchanged,
        rejected = report.rejected,
        refused = report.refused,
        "script replayed"
    );
    Ok((session, book))
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let (mut session, book) = prepare(&args.session)?;
    session.set_display_scale(args.display_scale);

    let mut backend = CpuBackend::new(book);
    let mut sink = DirSink::new(&args.out);
    match args.slide {
        Some(index) => {
            let outcome = session.apply(EditCommand::SetActiveSlide { index });
            if let pawpost::Outcome::Refused(reason) = outcome {
                anyhow::bail!("cannot export slide {index}: {reason}");
            }
            session.export_current(&mut backend, &mut sink)?;
        }
        None => {
            session.export_all(&mut backend, &mut sink)?;
        }
    }

    for path in sink.written() {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let (mut session, _) = prepare(&args.session)?;
    session.apply(EditCommand::Select { id: None });
    let list = session.compose(args.slide)?;

    println!(
        "slide {} of {}: {}x{} canvas, {} items, fingerprint {:016x}",
        args.slide,
        session.project().slides.len(),
        list.canvas.width,
        list.canvas.height,
        list.items.len(),
        list.fingerprint()
    );
    for item in &list.items {
        let op = match &item.op {
            DrawOp::Fill { color, .. } => format!("fill {}", color.to_hex()),
            DrawOp::Image { asset, size, .. } => {
                format!("image {asset} {:.1}x{:.1}", size.width, size.height)
            }
            DrawOp::Text { run, .. } => format!("text {:?} {}px", run.text, run.size),
        };
        println!("{:?}\t{:?}\t{op}", item.layer, item.source);
    }
    Ok(())
}
