//! svgslice CLI - SVG layer slicing tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use svgslice::{Error, Pipeline, Progress, SliceOptions};

#[derive(Parser)]
#[command(name = "svgslice")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Slice titled SVG groups into PNG overlay layers", long_about = None)]
struct Cli {
    /// Input SVG file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Slice an SVG into a background and per-object layers
    Slice {
        /// Input SVG file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory (defaults to the input file stem)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Render canvas width (defaults to the document width)
        #[arg(long)]
        width: Option<u32>,

        /// Render canvas height (defaults to the document height)
        #[arg(long)]
        height: Option<u32>,

        /// Integer downsample ratio
        #[arg(short, long, default_value = "1")]
        ratio: u32,

        /// Background layer name
        #[arg(long, default_value = "bg")]
        background: String,

        /// View name written into the layout file
        #[arg(long, default_value = "lcd")]
        view: String,

        /// Skip writing the layout file
        #[arg(long)]
        no_layout: bool,

        /// Also write a JSON manifest of the placements
        #[arg(long)]
        manifest: bool,
    },

    /// List titled objects discovered in an SVG
    Scan {
        /// Input SVG file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Emit the object list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show document information
    Info {
        /// Input SVG file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Slice {
            input,
            output,
            width,
            height,
            ratio,
            background,
            view,
            no_layout,
            manifest,
        }) => cmd_slice(
            &input,
            output.as_deref(),
            width,
            height,
            ratio,
            &background,
            &view,
            no_layout,
            manifest,
        ),
        Some(Commands::Scan { input, json }) => cmd_scan(&input, json),
        Some(Commands::Info { input }) => cmd_info(&input),
        None => {
            // Default behavior: slice if an input is provided
            if let Some(input) = cli.input {
                cmd_slice(
                    &input,
                    cli.output.as_deref(),
                    None,
                    None,
                    1,
                    "bg",
                    "lcd",
                    false,
                    false,
                )
            } else {
                println!("{}", "Usage: svgslice <FILE> [OUTPUT]".yellow());
                println!("       svgslice --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(exit_code(&e));
    }
}

/// Map an error to the process exit code: input-side failures and
/// output-side failures stay distinguishable for callers.
fn exit_code(err: &Error) -> i32 {
    match err {
        Error::Input { .. } => 2,
        Error::Output { .. } => 3,
        _ => 1,
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_slice(
    input: &Path,
    output: Option<&Path>,
    width: Option<u32>,
    height: Option<u32>,
    ratio: u32,
    background: &str,
    view: &str,
    no_layout: bool,
    manifest: bool,
) -> Result<(), Error> {
    let out_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(stem.into_owned())
    });

    let mut options = SliceOptions::new()
        .with_ratio(ratio)
        .with_background_name(background)
        .with_view_name(view)
        .with_layout(!no_layout)
        .with_manifest(manifest);
    options.width = width;
    options.height = height;

    let pipeline = Pipeline::from_file(input, options)?;

    let pb = ProgressBar::new(1);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Scanning...");

    let result = pipeline.run_with_progress(&out_dir, |event| match event {
        Progress::Scanned { found, unique } => {
            pb.set_length(unique as u64 + 1);
            pb.set_message(format!(
                "Rendering background ({} subtrees, {} unique)...",
                found, unique
            ));
        }
        Progress::BackgroundDone => {
            pb.inc(1);
        }
        Progress::ObjectDone { name, .. } => {
            pb.inc(1);
            pb.set_message(name.to_string());
        }
    })?;
    pb.finish_with_message("Done!");
    log::info!(
        "sliced {} object layer(s) into {}",
        result.placements.len(),
        out_dir.display()
    );

    println!("\n{}", "Placements:".green().bold());
    for p in &result.placements {
        println!("{:4} {:4}: {}", p.x, p.y, p.name);
    }

    println!("\n{}", "Output files:".green().bold());
    println!(
        "  {} {}",
        "├─".dimmed(),
        result.background_file.file_name().unwrap().to_string_lossy()
    );
    for p in &result.placements {
        println!("  {} {}", "├─".dimmed(), p.file_name());
    }
    if let Some(path) = &result.layout_file {
        println!(
            "  {} {}",
            "├─".dimmed(),
            path.file_name().unwrap().to_string_lossy()
        );
    }
    if let Some(path) = &result.manifest_file {
        println!(
            "  {} {}",
            "├─".dimmed(),
            path.file_name().unwrap().to_string_lossy()
        );
    }
    println!("  {} {}x{} canvas", "└─".dimmed(), result.width, result.height);

    Ok(())
}

fn cmd_scan(input: &Path, json: bool) -> Result<(), Error> {
    let objects = svgslice::scan_file(input)?;

    if json {
        let text = serde_json::to_string_pretty(&objects)
            .map_err(|e| Error::Other(e.to_string()))?;
        println!("{}", text);
        return Ok(());
    }

    if objects.is_empty() {
        println!("{}", "No titled objects found".yellow());
        return Ok(());
    }

    println!("{}", "Titled objects:".green().bold());
    for obj in &objects {
        println!(
            "  {:>8}..{:<8} {}",
            obj.span.start,
            obj.span.end,
            obj.name.bold()
        );
    }
    println!("{} object(s)", objects.len());
    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Error> {
    let data = fs::read(input).map_err(|source| Error::Input {
        path: input.to_path_buf(),
        source,
    })?;
    let format = svgslice::detect_format_from_bytes(&data)?;
    let (width, height) = svgslice::render::document_size(&data)?;
    let objects = svgslice::scan_titles(&data);
    let unique: std::collections::HashSet<&str> =
        objects.iter().map(|o| o.name.as_str()).collect();

    println!("{}: {}", "Format".bold(), format);
    println!("{}: {}x{}", "Canvas".bold(), width, height);
    println!("{}: {}", "Titled subtrees".bold(), objects.len());
    println!("{}: {}", "Unique names".bold(), unique.len());
    Ok(())
}
