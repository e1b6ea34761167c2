// ----------------------------------- CLI -----------------------------------
use clap::Parser;

#[derive(clap::Parser, Debug, Clone)]
#[clap(name = "joseph_row", about = "Print the Joseph system matrix row of one line through a voxel grid")]
pub struct Cli {

    /// Number of voxels along each axis, e.g. `4,4` or `10,10,20`
    #[clap(short, long, value_delimiter = ',')]
    pub nvoxels: Vec<usize>,

    /// Corner of the volume. Defaults to centring the volume on zero
    #[clap(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    pub corner: Option<Vec<Lengthf32>>,

    /// A point on the line
    #[clap(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    pub origin: Vec<Lengthf32>,

    /// Direction of the line
    #[clap(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    pub delta: Vec<Lengthf32>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Cli::parse();
    match args.nvoxels.len() {
        1 => print_row::<1, 0>(&args),
        2 => print_row::<2, 1>(&args),
        3 => print_row::<3, 2>(&args),
        d => Err(format!("expected 1 to 3 voxel counts, got {d}").into()),
    }
}

fn print_row<const D: usize, const L: usize>(args: &Cli) -> Result<(), Box<dyn Error>> {
    let lengths = to_array::<usize, D>(&args.nvoxels)?;
    let volume = match &args.corner {
        Some(corner) => Volume::new(Point::new(to_array(corner)?), lengths)?,
        None         => Volume::centred(lengths)?,
    };
    let line = Line::new(Point::new(to_array(&args.origin)?), Vector::new(to_array(&args.delta)?));

    let mut joseph = Joseph::<D, L>::new(volume);
    joseph.reset(&line);

    println!("{line}");
    println!("{} voxels, step length {:.4}", joseph.row().len(), joseph.step_length());
    for (index, weight) in &joseph {
        let coords = volume.unroll(index);
        println!("{index:>8}  {:<16}  {weight:.4}", format!("{coords:?}"));
    }
    println!("total weight {:.4}", joseph.row().weight_sum());
    Ok(())
}

// ----- Imports -----------------------------------------------------------------------------------------
use std::error::Error;

use raytomo::{
    DiscretizedImageModel, Joseph, Line, Point, Vector, Volume, Lengthf32,
    utils::to_array,
};
