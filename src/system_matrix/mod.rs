//! Calculation of system matrix elements for use in forward and backward
//! projections.
//!
//! A discretized image model (DIM) turns a continuous line into the sparse row
//! of the system matrix which couples that line to the voxels of a volume.

// ----- The trait --------------------------------------------------------------------

/// Reusable generator of system matrix rows for lines through one volume.
///
/// An instance is bound to its volume for its whole lifetime and owns the
/// buffer holding the current row. Allocating these anew for each line had a
/// noticeable runtime cost, so the buffer is created up-front and reused.
///
/// The row is only reachable through `&self`, so it cannot be read while a
/// `reset`, `accumulate` or `clear` is modifying it. Parallel projections give
/// each worker its own instance.
pub trait DiscretizedImageModel<const D: usize> {

    /// Bind a new model to `volume`
    fn new(volume: Volume<D>) -> Self where Self: Sized;

    fn volume(&self) -> &Volume<D>;

    /// Calculate the row for `line` and append it to the current row
    fn accumulate(&mut self, line: &Line<D>);

    /// Discard the current row
    fn clear(&mut self);

    /// Replace the current row with the one for `line`
    fn reset(&mut self, line: &Line<D>) {
        self.clear();
        self.accumulate(line);
    }

    fn row(&self) -> &SystemMatrixRow;

    /// The line most recently passed to `reset` or `accumulate`
    fn line(&self) -> Option<&Line<D>>;

    /// Distance travelled along the most recent line between consecutive
    /// samples, in voxel units. Multiplying weights by this turns them into
    /// path lengths.
    fn step_length(&self) -> Lengthf32;

    fn iter(&self) -> RowIter<'_> { self.row().into_iter() }
}

// ----- Implementations of the trait -----------------------------------------------
pub mod joseph;
pub use joseph::{Joseph, Joseph1, Joseph2, Joseph3, MARGIN};

// ----- Storage of system matrix elements. Only one row is relevant at any single time ------
pub type SystemMatrixElement = (Index1_u, Weightf32);

pub type RowIter<'a> = std::iter::Cloned<std::slice::Iter<'a, SystemMatrixElement>>;

/// Sparse row of the system matrix, in the order in which the line reached
/// the voxels
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SystemMatrixRow(pub Vec<SystemMatrixElement>);

impl SystemMatrixRow {
    pub fn with_capacity(n: usize) -> Self { Self(Vec::with_capacity(n)) }
    pub fn iter(&self) -> std::slice::Iter<SystemMatrixElement> { self.0.iter() }
    pub fn clear(&mut self) { self.0.clear(); }
    #[inline] pub fn push(&mut self, element: SystemMatrixElement) { self.0.push(element) }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn capacity(&self) -> usize { self.0.capacity() }

    pub fn weight_sum(&self) -> Weightf32 { self.0.iter().map(|(_, w)| w).sum() }
    pub fn norm_squared(&self) -> Weightf32 { self.0.iter().map(|(_, w)| w * w).sum() }
}

impl IntoIterator for SystemMatrixRow {
    type Item = SystemMatrixElement;
    type IntoIter = std::vec::IntoIter<Self::Item>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SystemMatrixRow {
    type Item = SystemMatrixElement;
    type IntoIter = RowIter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().cloned()
    }
}

// ----- Imports ------------------------------------------------------------------------------------------
use units::todo::{Lengthf32, Weightf32};

use crate::{
    Line, Volume,
    index::Index1_u,
};
