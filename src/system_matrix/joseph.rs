//! Joseph's method: sample the line once per voxel row along its dominant
//! axis and share each sample between the neighbouring voxels of that row by
//! linear interpolation.

use geometry::DropsOneAxis;

use super::{DiscretizedImageModel, RowIter, SystemMatrixRow};
use crate::{Line, Point, Volume, Lengthf32};
use crate::interpolate::interpolate;

/// How far beyond the volume's faces samples are still taken, in voxels.
///
/// Samples up to one voxel outside a face still share weight with the voxels
/// on that face.
pub const MARGIN: Lengthf32 = 1.0;

/// Joseph DIM over a `D`-dimensional volume. `L` must be `D - 1`: it is the
/// dimension of the slices in which each sample is interpolated.
#[derive(Clone, Debug)]
pub struct Joseph<const D: usize, const L: usize> {
    volume: Volume<D>,
    /// `volume` with its corner moved to the coordinate origin. Lines are
    /// walked relative to the corner, so that the volume's position does not
    /// cost precision.
    local: Volume<D>,
    /// `slices[axis]` is `local` with `axis` dropped
    slices: [Volume<L>; D],
    row: SystemMatrixRow,
    line: Option<Line<D>>,
}

pub type Joseph1 = Joseph<1, 0>;
pub type Joseph2 = Joseph<2, 1>;
pub type Joseph3 = Joseph<3, 2>;

impl<const D: usize, const L: usize> Joseph<D, L> {

    /// Enough room for two neighbours per sample in 2D, four in 3D, along
    /// the longest axis
    fn row_capacity(volume: &Volume<D>) -> usize {
        2 * volume.max_extent() * (1 << D.saturating_sub(2))
    }
}

impl<const D: usize, const L: usize> DiscretizedImageModel<D> for Joseph<D, L> {

    fn new(volume: Volume<D>) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = DropsOneAxis::<D, L>::OK;
        let local = volume.with_origin(Point::zero());
        Self {
            slices: std::array::from_fn(|axis| local.restrict(axis)),
            row: SystemMatrixRow::with_capacity(Self::row_capacity(&volume)),
            line: None,
            volume,
            local,
        }
    }

    fn volume(&self) -> &Volume<D> { &self.volume }

    fn accumulate(&mut self, line: &Line<D>) {
        self.line = Some(*line);
        if !line.origin.is_finite() { return }
        let Some(axis) = line.dominant_axis() else { return };

        let corner = self.volume.origin();
        let line = Line::new(Point::new(std::array::from_fn(|k| line.origin[k] - corner[k])), line.delta);
        let Some((t_enter, t_exit)) = self.local.clip(&line, MARGIN) else { return };

        // Rows whose centre plane `row + 0.5` the clipped chord crosses
        let (o, d) = (line.origin[axis], line.delta[axis]);
        let (a, b) = (o + t_enter * d, o + t_exit * d);
        let first = (a.min(b) - 0.5).ceil().max(0.0);
        let last  = (a.max(b) - 0.5).floor().min(self.volume[axis] as Lengthf32 - 1.0);
        if first > last { return }
        let (first, last) = (first as usize, last as usize);

        let slice = &self.slices[axis];
        for i in 0..=(last - first) {
            let row = if d > 0.0 { first + i } else { last - i };
            let sample = line.at((row as Lengthf32 + 0.5 - o) / d);
            if !self.local.inside_margin(sample, MARGIN) { continue }
            let first_new = self.row.len();
            interpolate(sample.restrict::<L>(axis), slice, &mut self.row);
            // Interpolation yields indices within the slice
            for (index, _) in &mut self.row.0[first_new..] {
                let within_slice = slice.unroll(*index);
                *index = self.local.index(geometry::extend(within_slice, axis, row));
            }
        }
    }

    fn clear(&mut self) { self.row.clear(); }

    fn row(&self) -> &SystemMatrixRow { &self.row }

    fn line(&self) -> Option<&Line<D>> { self.line.as_ref() }

    fn step_length(&self) -> Lengthf32 {
        self.line
            .and_then(|line| line.dominant_axis().map(|axis| line.delta.norm() / line.delta[axis].abs()))
            .filter(|l| l.is_finite())
            .unwrap_or(0.0)
    }
}

impl<'a, const D: usize, const L: usize> IntoIterator for &'a Joseph<D, L> {
    type Item = <RowIter<'a> as Iterator>::Item;
    type IntoIter = RowIter<'a>;
    fn into_iter(self) -> Self::IntoIter { (&self.row).into_iter() }
}
