use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use cloud_cover_index::cloud_cover::{CloudCoverPipeline, PipelineConfig, Traversal};
use cloud_cover_index::logger;

use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "cloud_cover_index")]
#[command(version, about = "Compute the cloud cover index of a sky photograph inside a mask")]
struct Cli {
    /// Source image, it can be of any dimensions and JPEG or PNG encoded.
    #[arg(long)]
    src: Option<PathBuf>,

    /// Mask file of any dimensions. Source and mask are center aligned and only
    /// pixels matching an opaque white mask pixel are used during computation.
    #[arg(long)]
    mask: Option<PathBuf>,

    /// Output a black and white segmentation result as a PNG encoded image.
    #[arg(short = 's', long = "segmentation")]
    segmentation: bool,

    /// Output file name (required when segmentation is enabled).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Classify rows on all available cores.
    #[arg(long)]
    parallel: bool,

    /// Print the duration of each pipeline step.
    #[arg(long)]
    timings: bool,

    /// Log progress at info level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            source_path: self.src.clone(),
            mask_path: self.mask.clone(),
            segmentation: self.segmentation,
            output_path: self.out.clone(),
            traversal: if self.parallel {
                Traversal::Parallel
            } else {
                Traversal::Sequential
            },
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.pipeline_config();
    if let Err(e) = config.validate() {
        eprint!("{}", Cli::command().render_help());
        return Err(e).context("invalid arguments");
    }

    let pipeline = CloudCoverPipeline::new(config);
    info!(
        traversal = ?pipeline.config().traversal,
        segmentation = pipeline.config().segmentation,
        "Cloud cover pipeline initialized"
    );

    let report = pipeline.run().context("cloud cover computation failed")?;

    println!("Cloud Cover Index: {:.6}", report.index);
    if let Some(path) = &report.segmentation_path {
        println!("Segmentation image saved successfully at {}", path.display());
    }
    if cli.timings {
        println!("\n{}", report.timings);
    }

    Ok(())
}
