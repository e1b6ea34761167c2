use core::fmt;

use crate::{Point, Vector, Intensityf32, Lengthf32};

/// Infinite straight line through `D`-dimensional voxel space.
///
/// `delta` need not be normalized. Lines whose `delta` is zero (or not finite)
/// are degenerate: they couple to no voxels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line<const D: usize> {
    pub origin: Point<D>,
    pub delta: Vector<D>,
}

impl<const D: usize> Line<D> {

    pub fn new(origin: Point<D>, delta: Vector<D>) -> Self { Self { origin, delta } }

    /// The line passing through `p` and then `q`
    pub fn through(p: Point<D>, q: Point<D>) -> Self { Self::new(p, q - p) }

    pub fn at(&self, t: Lengthf32) -> Point<D> { self.origin + self.delta * t }

    /// Same line, traversed in the opposite direction
    pub fn reversed(&self) -> Self { Self::new(self.origin, -self.delta) }

    /// The axis along which `delta` has the largest magnitude. `None` for
    /// degenerate lines.
    pub fn dominant_axis(&self) -> Option<usize> {
        if !self.delta.is_finite() { return None }
        let (axis, largest) = self.delta.abs().argmax();
        (largest > 0.0).then_some(axis)
    }
}

impl<const D: usize> fmt::Display for Line<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<Line (")?;
        for x in self.origin.coords() { write!(f, "{x:8.2}")? }
        write!(f, ") + t (")?;
        for x in self.delta .components() { write!(f, "{x:8.2}")? }
        write!(f, ") >")
    }
}

/// A measured line integral: the value observed along `line`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray<const D: usize> {
    pub line: Line<D>,
    pub value: Intensityf32,
}

impl<const D: usize> Ray<D> {
    pub fn new(line: Line<D>, value: Intensityf32) -> Self { Self { line, value } }
}
