use std::collections::HashMap;

use proptest::prelude::*;
use float_eq::assert_float_eq;
use pretty_assertions::assert_eq;

use raytomo::{
    DiscretizedImageModel, Joseph2, Joseph3, Line, Point, Vector, Volume, Ray, Image,
    Lengthf32, Weightf32, Index1_u,
    io::rays::{read_rays, write_rays},
    projector::forward_projections,
    reconstruction::{Sirt, residual},
};

fn line<const D: usize>(origin: [Lengthf32; D], delta: [Lengthf32; D]) -> Line<D> {
    Line::new(Point::new(origin), Vector::new(delta))
}

fn as_map(model: &impl DiscretizedImageModel<3>) -> HashMap<Index1_u, Weightf32> {
    model.iter().collect()
}

#[test]
fn one_model_serves_many_lines() {
    let volume = Volume::new(Point::zero(), [4, 4]).unwrap();
    let mut joseph = Joseph2::new(volume);
    let expected = [
        vec![(4, 1.0), (5, 1.0), (6, 1.0), (7, 1.0)],
        vec![(0, 0.875), (4, 0.125), (1, 0.125), (5, 0.875), (6, 0.375), (10, 0.625), (11, 0.625), (15, 0.375)],
        vec![],
    ];
    let lines = [
        Line::through(Point::new([-1.0, 1.5]), Point::new([5.0, 1.5])),
        line([0.0, 0.25], [1.0, 0.75]),
        line([0.0, 9.0], [1.0, 0.0]),
    ];
    for (l, expected) in lines.iter().zip(expected) {
        joseph.reset(l);
        let row: Vec<_> = (&joseph).into_iter().collect();
        assert_eq!(row, expected);
        assert_eq!(joseph.line(), Some(l));
        assert_eq!(joseph.volume(), &volume);
    }
}

#[test]
fn three_dimensional_row_sums_to_path_length() {
    // Through the middle of a 5×5×5 volume, far from every face, each sample
    // distributes unit weight over its slab
    let volume = Volume::centred([5, 5, 5]).unwrap();
    let mut joseph = Joseph3::new(volume);
    joseph.reset(&line([0.1, -0.2, 0.3], [0.2, 0.1, 1.0]));
    let samples = joseph.row().iter()
        .map(|&(i, _)| volume.unroll(i)[2])
        .collect::<std::collections::BTreeSet<_>>();
    assert_eq!(samples.len(), 5);
    assert_float_eq!(joseph.row().weight_sum(), 5.0, abs <= 0.2);
}

proptest! {
    #[test]
    fn three_dimensional_reversal_symmetry(
        x in -4.0..4.0_f32, y in -4.0..4.0_f32, z in -4.0..4.0_f32,
        dx in -1.0..1.0_f32, dy in -1.0..1.0_f32, dz in -1.0..1.0_f32,
    ) {
        prop_assume!(dx.abs().max(dy.abs()).max(dz.abs()) > 0.05);
        let volume = Volume::centred([5, 4, 6]).unwrap();
        let l = line([x, y, z], [dx, dy, dz]);
        let mut forward = Joseph3::new(volume);
        let mut backward = Joseph3::new(volume);
        forward.reset(&l);
        backward.reset(&l.reversed());
        let (f, b) = (as_map(&forward), as_map(&backward));
        prop_assert_eq!(f.len(), forward.row().len());
        for (i, w) in &f {
            prop_assert!(*i < volume.n_voxels());
            let other = b.get(i).copied().unwrap_or(0.0);
            prop_assert!((w - other).abs() <= 1e-4, "voxel {}: {} vs {}", i, w, other);
        }
    }
}

#[test]
fn reconstruct_from_ray_file() -> raytomo::Result<()> {
    let volume = Volume::new(Point::zero(), [6, 6])?;
    let mut truth = Image::zeros(volume);
    truth[[2, 3]] = 4.0;
    truth[[3, 3]] = 2.0;

    let mut lines = vec![];
    for k in 0..8 {
        let (s, c) = (k as f32 * std::f32::consts::PI / 8.0).sin_cos();
        for i in -8..=8 {
            let offset = i as f32 * 0.5;
            lines.push(line([3.0 - s * offset, 3.0 + c * offset], [c, s]));
        }
    }
    let values = forward_projections::<Joseph2, 2>(&truth, &lines, 1.0);
    let rays: Vec<_> = lines.into_iter().zip(values).map(|(l, v)| Ray::new(l, v)).collect();

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("rays.txt");
    write_rays(&rays, &path)?;
    let rays = read_rays::<2>(&path)?;

    let voxel_size = units::mm(1.0);
    let initial = residual::<Joseph2, 2>(&Image::zeros(volume), &rays, voxel_size);
    let params = Sirt { relaxation: 1.0, voxel_size, job_size: 8 };
    let images: Vec<_> = Image::sirt::<Joseph2>(volume, &rays, params).take(30).collect();
    let last = images.last().map(|image| residual::<Joseph2, 2>(image, &rays, voxel_size));
    assert!(matches!(last, Some(r) if r < 0.5 * initial), "{last:?} vs {initial}");
    Ok(())
}
