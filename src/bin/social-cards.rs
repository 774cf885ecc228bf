use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "social-cards", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a layout to a PNG card.
    Render(RenderArgs),
    /// Check a layout document without rendering it.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Layout document (JSON or YAML).
    #[arg(long)]
    layout: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Config file (JSON or YAML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base directory for relative images; defaults to the layout's directory.
    #[arg(long)]
    doc_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Layout document (JSON or YAML).
    #[arg(long)]
    layout: PathBuf,

    /// Print each validated layer.
    #[arg(long)]
    dump_layers: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn read_layout(path: &Path) -> anyhow::Result<social_cards::Layout> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("open layout '{}'", path.display()))?;
    let layout = social_cards::parse_layout(&text, social_cards::DocFormat::from_path(path))
        .with_context(|| format!("validate layout '{}'", path.display()))?;
    Ok(layout)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let layout = read_layout(&args.layout)?;

    let config = match &args.config {
        Some(path) => social_cards::CardsConfig::from_path(path)?,
        None => social_cards::CardsConfig::default(),
    }
    .with_env_overrides();
    let ctx = social_cards::CardsContext::new(config)?;

    let doc_dir = args.doc_dir.clone().unwrap_or_else(|| {
        args.layout
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    });
    let docname = args
        .out
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "card".to_owned());
    let page = social_cards::PageContext::new(docname, doc_dir);

    ctx.render_card_to(&layout, &page, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let layout = read_layout(&args.layout)?;
    if args.dump_layers {
        for (i, layer) in layout.layers.iter().enumerate() {
            eprintln!(
                "  [{i}] {:<10} {}x{} at ({}, {}){}",
                layer.kind.name(),
                layer.size.width,
                layer.size.height,
                layer.offset.x,
                layer.offset.y,
                if layer.mask.is_some() { " masked" } else { "" },
            );
        }
    }
    eprintln!(
        "ok: {} ({}x{}, {} layers)",
        args.layout.display(),
        layout.size.width,
        layout.size.height,
        layout.layers.len()
    );
    Ok(())
}
