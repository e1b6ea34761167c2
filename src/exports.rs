pub use crate::error::{Error, Result};
pub use crate::line::{Line, Ray};
pub use crate::volume::Volume;
pub use crate::image::{Image, ImageData};
pub use crate::system_matrix::{
    DiscretizedImageModel,
    Joseph, Joseph1, Joseph2, Joseph3, MARGIN,
    SystemMatrixElement, SystemMatrixRow,
};

pub use geometry::{Point, Vector};

pub use units::todo::{Lengthf32, Weightf32, Ratiof32, Intensityf32};

pub use crate::index::{BoxDim_u, Index1_u, IndexN_u};
