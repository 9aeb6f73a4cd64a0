// pixmill/src/cli.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pixmill",
    version,
    about = "Batch image resizer with size-budget recompression and JSON run reports"
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resize every image under a directory tree and write JSON run reports
    Run {
        /// Root directory to process (prints usage when omitted)
        root: Option<PathBuf>,

        /// Target width in pixels; 0 keeps each image's own width
        #[arg(long, default_value_t = 800)]
        width: u32,

        /// Target height in pixels; 0 keeps each image's own height
        #[arg(long, default_value_t = 600)]
        height: u32,

        /// Recompress sources larger than this many KB to reduced-quality
        /// JPEG; the bare flag uses 700
        #[arg(long, value_name = "KB", num_args = 0..=1, default_missing_value = "700")]
        max_size_kb: Option<u64>,

        /// Write results here instead of overwriting sources in place
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Run lossless PNG optimization on PNG output
        #[arg(long)]
        optimize_png: bool,
    },

    /// Serve the single-image resize transform over HTTP
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_defaults_to_800_by_600_without_budget() {
        let cli = Cli::try_parse_from(["pixmill", "run", "photos"]).unwrap();
        match cli.command {
            Commands::Run {
                root,
                width,
                height,
                max_size_kb,
                output_dir,
                ..
            } => {
                assert_eq!(root, Some(PathBuf::from("photos")));
                assert_eq!((width, height), (800, 600));
                assert_eq!(max_size_kb, None);
                assert_eq!(output_dir, None);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn bare_max_size_flag_defaults_to_700() {
        let cli = Cli::try_parse_from(["pixmill", "run", "photos", "--max-size-kb"]).unwrap();
        match cli.command {
            Commands::Run { max_size_kb, .. } => assert_eq!(max_size_kb, Some(700)),
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn non_numeric_dimensions_are_a_parse_error() {
        assert!(Cli::try_parse_from(["pixmill", "run", "photos", "--width", "eight"]).is_err());
        assert!(Cli::try_parse_from(["pixmill", "run", "photos", "--height", "-1"]).is_err());
    }
}
