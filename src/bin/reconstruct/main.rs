mod cli;
use cli::*;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut progress = Progress::new();
    progress.start("Reading configuration");
    let config = read_config_file(&cli.config)?;
    progress.done();

    // Set the maximum number of threads used by rayon for parallel iteration
    match rayon::ThreadPoolBuilder::new().num_threads(cli.num_threads).build_global() {
        Err(e) => println!("{e}"),
        Ok(_)  => println!("Using up to {} threads.", cli.num_threads),
    }

    match config.dimension() {
        1 => run::<1, 0>(&config, &cli, &mut progress),
        2 => run::<2, 1>(&config, &cli, &mut progress),
        3 => run::<3, 2>(&config, &cli, &mut progress),
        d => Err(format!("cannot reconstruct {d}-dimensional images").into()),
    }
}

fn run<const D: usize, const L: usize>(config: &Config, cli: &Cli, progress: &mut Progress) -> Result<(), Box<dyn Error>> {
    let volume = config.volume::<D>()?;

    progress.start(&format!("Reading rays from {}", cli.rays.display()));
    let rays = read_rays::<D>(&cli.rays)?;
    progress.done_with_message(&format!("Read {} rays", group_digits(rays.len())));

    // If the directory where results will be written does not exist yet, make it
    if let Some(dir) = PathBuf::from(format!("{}_00.raw", cli.out_files)).parent() {
        create_dir_all(dir)?;
    }

    let Config { relaxation, voxel_size, job_size, subsets, .. } = *config;
    let images: Box<dyn Iterator<Item = Image<D>> + '_> = match config.algorithm {
        Algorithm::Sirt => Box::new(Image::sirt::<Joseph<D, L>>(volume, &rays, Sirt { relaxation, voxel_size, job_size })),
        Algorithm::Sart => Box::new(Image::sart::<Joseph<D, L>>(volume, &rays, Sart { relaxation, voxel_size, job_size, subsets })),
        Algorithm::Art  => Box::new(Image::art ::<Joseph<D, L>>(volume, &rays, Art  { relaxation, voxel_size })),
    };

    let bar = ProgressBar::new(config.iterations as u64);
    bar.set_style(ProgressStyle::default_bar()
                  .template("{msg} [{elapsed_precise}] {wide_bar} {pos}/{len} ({eta_precise})")?);
    bar.set_message(format!("{:?}", config.algorithm));

    progress.startln(&format!("{:?}: {} iterations over {:?} voxels",
                              config.algorithm, config.iterations, volume.lengths()));
    for (n, image) in images.take(config.iterations).enumerate() {
        let path = PathBuf::from(format!("{}_{:02}.raw", cli.out_files, n));
        image.write_to_raw_file(&path)?;
        log::info!("iteration {n:2}: wrote {}", path.display());
        bar.inc(1);
    }
    bar.finish();
    progress.done_with_message("Reconstruction");
    Ok(())
}

// ----- Imports -----------------------------------------------------------------------------------------
use std::{
    error::Error,
    fs::create_dir_all,
    path::PathBuf,
};

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use raytomo::{
    Image, Joseph,
    config::reconstruction::{Algorithm, Config, read_config_file},
    io::rays::read_rays,
    reconstruction::{Art, Sart, Sirt},
    utils::{group_digits, timing::Progress},
};
