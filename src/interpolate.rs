//! Multilinear interpolation on a voxel grid.
//!
//! Used by the Joseph model to spread each sample of a line over the voxels of
//! the `D - 1` dimensional slab it falls in. This module knows nothing about
//! the slab's place in the full volume: indices it produces are flat indices
//! of the volume it is given.

use crate::{Point, Volume, Weightf32};
use crate::system_matrix::SystemMatrixRow;

/// Append to `row` the voxels of `volume` neighbouring `point`, with their
/// multilinear interpolation weights.
///
/// Neighbours lying outside `volume`, and those with zero weight, are not
/// emitted, so the weights sum to 1 only for points at least half a voxel
/// inside the volume. Corners are visited with the first axis varying
/// fastest.
#[inline]
pub fn interpolate<const L: usize>(point: Point<L>, volume: &Volume<L>, row: &mut SystemMatrixRow) {
    let origin  = volume.origin();
    let lengths = volume.lengths();

    // Along each axis: the neighbour below the point, and how far beyond it
    // the point lies, in units of voxel spacing
    let mut lower = [0_i64; L];
    let mut frac  = [0.0 as Weightf32; L];
    for k in 0..L {
        let c = point[k] - origin[k] - 0.5;
        let below = c.floor();
        lower[k] = below as i64;
        frac [k] = c - below;
    }

    'corner: for corner in 0..(1_usize << L) {
        let mut weight: Weightf32 = 1.0;
        let mut index = [0_usize; L];
        for k in 0..L {
            let upper = (corner >> k) & 1 == 1;
            let i = lower[k] + upper as i64;
            if i < 0 || i >= lengths[k] as i64 { continue 'corner; }
            index[k] = i as usize;
            weight *= if upper { frac[k] } else { 1.0 - frac[k] };
        }
        if weight > 0.0 {
            row.push((volume.index(index), weight));
        }
    }
}
