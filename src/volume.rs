/// The extent and granularity of the voxel grid in which images live.
///
/// Coordinates are in voxel units: voxel `i` along an axis spans
/// `[origin + i, origin + i + 1)`, so its centre lies on the half-integer
/// plane `origin + i + 0.5`.

use std::ops::Index;

use crate::{Error, Result, Line, Point, Lengthf32};
use crate::index::{BoxDim_u, Index1_u, IndexN_u, index_n_to_1, index1_to_n};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Volume<const D: usize> {
    origin: Point<D>,
    lengths: BoxDim_u<D>,
}

impl<const D: usize> Volume<D> {

    pub fn new(origin: Point<D>, lengths: BoxDim_u<D>) -> Result<Self> {
        if lengths.iter().any(|&n| n == 0) {
            return Err(Error::EmptyVolume(lengths.to_vec()))
        }
        Ok(Self { origin, lengths })
    }

    /// Volume whose centre coincides with the coordinate origin
    pub fn centred(lengths: BoxDim_u<D>) -> Result<Self> {
        Self::new(Point::new(lengths.map(|n| -(n as Lengthf32) / 2.0)), lengths)
    }

    /// Same grid, with its corner at `origin`
    pub fn with_origin(&self, origin: Point<D>) -> Self { Self { origin, lengths: self.lengths } }

    pub fn origin (&self) -> Point<D>    { self.origin }
    pub fn lengths(&self) -> BoxDim_u<D> { self.lengths }
    pub fn dimension(&self) -> usize     { D }

    pub fn n_voxels(&self) -> usize { self.lengths.iter().product() }

    pub fn max_extent(&self) -> usize { self.lengths.iter().copied().max().unwrap_or(0) }

    /// Flat index of the voxel with coordinates `index`
    #[inline]
    pub fn index(&self, index: IndexN_u<D>) -> Index1_u { index_n_to_1(index, self.lengths) }

    /// Coordinates of the voxel with flat index `index`
    #[inline]
    pub fn unroll(&self, index: Index1_u) -> IndexN_u<D> { index1_to_n(index, self.lengths) }

    pub fn contains(&self, index: IndexN_u<D>) -> bool {
        index.iter().zip(self.lengths.iter()).all(|(i, n)| i < n)
    }

    /// The `L = D - 1` dimensional volume obtained by dropping `axis`
    pub fn restrict<const L: usize>(&self, axis: usize) -> Volume<L> {
        Volume {
            origin:  self.origin.restrict(axis),
            lengths: geometry::restrict(self.lengths, axis),
        }
    }

    /// Find centre of voxel with given coordinates
    pub fn voxel_centre(&self, index: IndexN_u<D>) -> Point<D> {
        Point::new(std::array::from_fn(|k| self.origin[k] + index[k] as Lengthf32 + 0.5))
    }

    /// Is `p` inside the volume, after growing it by `margin` on every side?
    #[inline]
    pub fn inside_margin(&self, p: Point<D>, margin: Lengthf32) -> bool {
        (0..D).all(|k| {
            let lo = self.origin[k] - margin;
            let hi = self.origin[k] + self.lengths[k] as Lengthf32 + margin;
            lo <= p[k] && p[k] <= hi
        })
    }

    /// Parameter interval `(t_enter, t_exit)` over which `line.at(t)` lies
    /// inside the volume grown by `margin`. `None` if the line misses it.
    pub fn clip(&self, line: &Line<D>, margin: Lengthf32) -> Option<(Lengthf32, Lengthf32)> {
        let mut t_enter = Lengthf32::NEG_INFINITY;
        let mut t_exit  = Lengthf32::INFINITY;
        for k in 0..D {
            let lo = self.origin[k] - margin;
            let hi = self.origin[k] + self.lengths[k] as Lengthf32 + margin;
            let (o, d) = (line.origin[k], line.delta[k]);
            if d == 0.0 {
                // Parallel to this pair of faces: either always between them, or never
                if o < lo || o > hi { return None }
            } else {
                let (a, b) = ((lo - o) / d, (hi - o) / d);
                t_enter = t_enter.max(a.min(b));
                t_exit  = t_exit .min(a.max(b));
            }
        }
        let hit = t_enter <= t_exit && t_enter.is_finite() && t_exit.is_finite();
        hit.then_some((t_enter, t_exit))
    }
}

impl<const D: usize> Index<usize> for Volume<D> {
    type Output = usize;
    /// Number of voxels along `axis`
    fn index(&self, axis: usize) -> &Self::Output { &self.lengths[axis] }
}
