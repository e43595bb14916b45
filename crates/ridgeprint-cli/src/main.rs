//! ridgeprint CLI - fingerprint preprocessing from the command line.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use ridgeprint::io::{ImageFormat, detect_format, read_image, write_image};
use ridgeprint::{BorderHandling, PipelineOptions, PixelMatrix, Stage, run_through};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ridgeprint")]
#[command(about = "Reduce fingerprint images to one-pixel-wide ridge skeletons")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline and write the final matrix.
    Run(RunArgs),

    /// Run the pipeline up to and including one stage.
    Stage {
        /// Last stage to run.
        #[arg(value_enum)]
        stage: StageArg,

        #[command(flatten)]
        io: IoArgs,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Print image dimensions and format.
    Info {
        /// Path to the input image.
        #[arg(long)]
        input: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
struct IoArgs {
    /// Path to the input image (PNG or JPEG).
    #[arg(long)]
    input: PathBuf,

    /// Path of the output image; the format follows the extension.
    #[arg(long)]
    output: PathBuf,
}

#[derive(Debug, Clone, Args)]
struct TuningArgs {
    /// Binarization threshold; intensities below it become ink.
    #[arg(long, env = "RIDGEPRINT_THRESHOLD", default_value_t = ridgeprint::color::DEFAULT_THRESHOLD)]
    threshold: u8,

    /// Border treatment of the despeckle filters.
    #[arg(long, value_enum, default_value_t = BorderArg::Clear)]
    border: BorderArg,

    /// Cap on thinning passes (0 = until convergence).
    #[arg(long, default_value_t = 0)]
    max_thin_iters: u32,
}

impl TuningArgs {
    fn to_options(&self) -> PipelineOptions {
        PipelineOptions::default()
            .with_threshold(self.threshold)
            .with_border(self.border.to_core())
            .with_max_thin_iters(self.max_thin_iters)
    }
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    #[command(flatten)]
    io: IoArgs,

    #[command(flatten)]
    tuning: TuningArgs,

    /// Stop after this stage.
    #[arg(long, value_enum, default_value_t = StageArg::Skeletonize)]
    through: StageArg,

    /// Directory to write every intermediate stage image to.
    #[arg(long)]
    intermediates: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StageArg {
    Grayscale,
    Equalize,
    Binarize,
    Despeckle,
    Skeletonize,
}

impl StageArg {
    fn to_core(self) -> Stage {
        match self {
            Self::Grayscale => Stage::Grayscale,
            Self::Equalize => Stage::Equalize,
            Self::Binarize => Stage::Binarize,
            Self::Despeckle => Stage::Despeckle,
            Self::Skeletonize => Stage::Skeletonize,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BorderArg {
    Clear,
    Replicate,
}

impl BorderArg {
    fn to_core(self) -> BorderHandling {
        match self {
            Self::Clear => BorderHandling::Clear,
            Self::Replicate => BorderHandling::Replicate,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run_pipeline_command(&args),
        Commands::Stage { stage, io, tuning } => run_stage_command(stage.to_core(), &io, &tuning),
        Commands::Info { input } => run_info(&input),
    }
}

// ── run / stage ────────────────────────────────────────────────────────

fn load(path: &Path) -> Result<PixelMatrix> {
    tracing::info!("Loading image: {}", path.display());
    let pix = read_image(path).with_context(|| format!("failed to read {}", path.display()))?;
    tracing::info!("Image size: {}x{}", pix.width(), pix.height());
    Ok(pix)
}

fn save(pix: &PixelMatrix, path: &Path) -> Result<()> {
    write_image(pix, path, ImageFormat::Unknown)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

fn execute(
    io: &IoArgs,
    tuning: &TuningArgs,
    last: Stage,
    intermediates: Option<&Path>,
) -> Result<()> {
    let source = load(&io.input)?;
    let options = tuning.to_options();
    tracing::info!(
        "Running through {} (threshold {}, border {:?})",
        last,
        options.threshold,
        options.border
    );

    let output = run_through(&source, last, &options)
        .with_context(|| format!("pipeline failed on {}", io.input.display()))?;

    if let Some(dir) = intermediates {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        for (stage, pix) in output.iter() {
            let path = dir.join(format!(
                "{}.{}",
                stage.file_stem(),
                ImageFormat::Png.extension()
            ));
            save(pix, &path)?;
        }
    }

    save(output.final_matrix(), &io.output)
}

fn run_pipeline_command(args: &RunArgs) -> Result<()> {
    execute(
        &args.io,
        &args.tuning,
        args.through.to_core(),
        args.intermediates.as_deref(),
    )
}

fn run_stage_command(stage: Stage, io: &IoArgs, tuning: &TuningArgs) -> Result<()> {
    execute(io, tuning, stage, None)
}

// ── info ───────────────────────────────────────────────────────────────

fn run_info(input: &Path) -> Result<()> {
    let format = detect_format(input)
        .with_context(|| format!("failed to identify {}", input.display()))?;
    let pix = load(input)?;
    println!("file:   {}", input.display());
    println!("format: {:?}", format);
    println!("size:   {}x{}", pix.width(), pix.height());
    println!("pixels: {}", pix.pixel_count());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["ridgeprint", "run", "--input", "a.png", "--output", "b.png"])
            .unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.through, StageArg::Skeletonize);
        assert!(args.intermediates.is_none());
        let opts = args.tuning.to_options();
        assert_eq!(opts.border, BorderHandling::Clear);
        assert_eq!(opts.max_thin_iters, 0);
    }

    #[test]
    fn test_stage_with_tuning() {
        let cli = Cli::try_parse_from([
            "ridgeprint",
            "stage",
            "binarize",
            "--input",
            "a.jpg",
            "--output",
            "b.png",
            "--threshold",
            "120",
            "--border",
            "replicate",
        ])
        .unwrap();
        let Commands::Stage { stage, tuning, .. } = cli.command else {
            panic!("expected stage");
        };
        assert_eq!(stage.to_core(), Stage::Binarize);
        let opts = tuning.to_options();
        assert_eq!(opts.threshold, 120);
        assert_eq!(opts.border, BorderHandling::Replicate);
    }

    #[test]
    fn test_threshold_out_of_range_is_rejected() {
        let parsed = Cli::try_parse_from([
            "ridgeprint",
            "run",
            "--input",
            "a.png",
            "--output",
            "b.png",
            "--threshold",
            "300",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_stage_args_cover_every_stage() {
        let mapped: Vec<Stage> = StageArg::value_variants()
            .iter()
            .map(|s| s.to_core())
            .collect();
        assert_eq!(mapped, Stage::ALL.to_vec());
    }
}
