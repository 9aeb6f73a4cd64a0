// pixmill/src/main.rs
use anyhow::Result;
use clap::{CommandFactory, Parser};
use log::LevelFilter;
use pixmill::cli::{Cli, Commands};
use pixmill::{
    DirectoryWalker, FileTransform, ImageCodec, LanczosResizer, ReportWriter, ResizeParams,
    SizeBudget,
};
use std::path::PathBuf;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    match cli.command {
        Commands::Run {
            root,
            width,
            height,
            max_size_kb,
            output_dir,
            optimize_png,
        } => {
            let Some(root) = root else {
                Cli::command().print_help()?;
                return Ok(());
            };
            run_batch(root, width, height, max_size_kb, output_dir, optimize_png)
        }
        Commands::Serve { port } => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(pixmill::server::serve(port))?;
            Ok(())
        }
    }
}

fn run_batch(
    root: PathBuf,
    width: u32,
    height: u32,
    max_size_kb: Option<u64>,
    output_dir: Option<PathBuf>,
    optimize_png: bool,
) -> Result<()> {
    let codec = ImageCodec::new().with_png_optimization(optimize_png);
    let transform = FileTransform::new(codec, LanczosResizer::new(), ResizeParams::new(width, height))
        .with_budget(max_size_kb.map(SizeBudget::new))
        .with_output_dir(output_dir);

    let report = DirectoryWalker::new(transform).run(&root);

    let (successes_path, failures_path) =
        ReportWriter::new(std::env::current_dir()?).write(&report)?;

    log::info!(
        "image processing complete: {} succeeded, {} failed",
        report.successes.len(),
        report.failures.len()
    );
    log::info!(
        "results saved to {} and {}",
        successes_path.display(),
        failures_path.display()
    );

    Ok(())
}
