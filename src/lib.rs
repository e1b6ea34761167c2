mod exports;
pub use exports::*;

pub mod error;
pub mod index;
pub mod volume;
pub mod line;
pub mod interpolate;
pub mod system_matrix;
pub mod image;
pub mod projector;
pub mod reconstruction;
pub mod config;
pub mod io;
pub mod utils;
