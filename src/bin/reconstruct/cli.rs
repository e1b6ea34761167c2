#[derive(clap::Parser, Debug, Clone)]
#[clap(name = "reconstruct", about = "Iterative reconstruction of an image from measured ray integrals")]
pub struct Cli {

    /// TOML file describing the volume and the algorithm
    #[clap(short, long, default_value = "reconstruct-config.toml")]
    pub config: PathBuf,

    /// Measured rays: one `origin… delta… value` per line
    #[clap(short, long)]
    pub rays: PathBuf,

    /// Prefix of the image files written after each iteration
    #[clap(short, long, default_value = "data/out/reconstruct/image")]
    pub out_files: String,

    /// Maximum number of rayon threads
    #[clap(short = 'j', long, default_value = "4")]
    pub num_threads: usize,
}

// ----- Imports -----------------------------------------------------------------------------------------
use std::path::PathBuf;
