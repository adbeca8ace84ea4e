use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "subplate", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite caption text onto an image and write a PNG.
    Render(RenderArgs),
    /// Print the average and recommended caption colors for an image.
    Analyze(AnalyzeArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input image path.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Caption text; may contain embedded newlines.
    #[arg(long, conflicts_with = "text_file")]
    text: Option<String>,

    /// Read the caption text from a file instead.
    #[arg(long)]
    text_file: Option<PathBuf>,

    /// Caption font size in pixels (24..=60; out-of-range values keep the default).
    #[arg(long, default_value_t = 40)]
    size: u32,

    /// Caption color as 6-digit hex; defaults to the recommended color.
    #[arg(long)]
    color: Option<String>,

    /// Output PNG path; defaults to subtitle-image-<unix-millis>.png in the
    /// current directory.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct AnalyzeArgs {
    /// Input image path.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Analyze(args) => cmd_analyze(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut session = subplate::Session::new();

    let blob = subplate::UploadBlob::from_path(&args.in_path)?;
    session.load_image(&blob)?;

    let text = match (args.text, args.text_file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("read caption text from '{}'", path.display()))?,
        (None, None) => String::new(),
    };
    session.set_text(text)?;
    session.set_size(args.size)?;
    if let Some(hex) = &args.color {
        session.set_color_hex(hex)?;
    }

    match args.out {
        Some(out) => {
            let png = session
                .render_result()
                .context("render produced no output")?;
            if let Some(parent) = out.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&out, png)
                .with_context(|| format!("write png '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => {
            let path = session.export_into(Path::new("."))?;
            eprintln!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn cmd_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let blob = subplate::UploadBlob::from_path(&args.in_path)?;
    let image = subplate::ingest_image(&blob)?;
    let analysis = subplate::analyze(&image);

    let out = serde_json::json!({
        "average": { "hex": analysis.average.to_hex(), "hsl": analysis.average },
        "recommended": { "hex": analysis.recommended.to_hex(), "hsl": analysis.recommended },
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
