/// Units which are simply type aliases for `f32` rather than having an
/// implementation as a `uom` `Quantity`.
///
/// Everything on the per-ray hot path is expressed in voxel units, where a
/// `uom` quantity would add nothing but conversions. The aliases still leave
/// a clue in the source as to what a value represents.

/// Distances measured in voxels
pub type Lengthf32    = f32;
/// Interpolation weights of system matrix elements
pub type Weightf32    = f32;
/// Relaxation factors and other dimensionless numbers
pub type Ratiof32     = f32;
/// Voxel values of images, and line integrals through them
pub type Intensityf32 = f32; // TODO uom Intensity, once images carry physical units
