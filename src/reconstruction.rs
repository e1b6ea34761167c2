//! Iterative reconstruction from line-integral measurements.
//!
//! All algorithms return an infinite iterator which yields the image after
//! each iteration; callers `take` as many as they need.

use ndarray::azip;

use units::{Length, mm_};

use crate::{Image, Ray, Volume, Lengthf32, Intensityf32, Ratiof32};
use crate::image::ImageData;
use crate::projector::{forward_projections, project_rays, project_one_ray_sirt, project_one_ray_column_sums};
use crate::system_matrix::DiscretizedImageModel;

/// Simultaneous iterative reconstruction technique:
/// `x ← x + λ C Aᵀ R (b − A x)`, where `R` and `C` are the reciprocals of the
/// row and column sums of the system matrix `A`.
#[derive(Clone, Copy, Debug)]
pub struct Sirt {
    pub relaxation: Ratiof32,
    pub voxel_size: Length,
    /// Number of rays processed by each rayon job
    pub job_size: usize,
}

/// Simultaneous algebraic reconstruction technique: the SIRT update applied
/// to one subset of the rays at a time, with row and column sums taken over
/// that subset. Ray `i` belongs to subset `i % subsets`.
#[derive(Clone, Copy, Debug)]
pub struct Sart {
    pub relaxation: Ratiof32,
    pub voxel_size: Length,
    /// Number of rays processed by each rayon job
    pub job_size: usize,
    pub subsets: usize,
}

/// Algebraic reconstruction technique (Kaczmarz): one row-action update per
/// ray, `x ← x + λ (b_i − a_i·x) / ‖a_i‖² a_i`.
#[derive(Clone, Copy, Debug)]
pub struct Art {
    pub relaxation: Ratiof32,
    pub voxel_size: Length,
}

impl<const D: usize> Image<D> {

    pub fn sirt<'a, M>(volume: Volume<D>, rays: &'a [Ray<D>], params: Sirt) -> impl Iterator<Item = Image<D>> + 'a
    where
        M: DiscretizedImageModel<D> + Send + 'a,
    {
        let Sirt { relaxation, voxel_size, job_size } = params;
        let voxel_size = mm_(voxel_size);

        let mut image = Self::zeros(volume);
        let column_sums = project_rays::<M, _, _, D>(&image, rays, job_size, voxel_size, project_one_ray_column_sums::<M, D>);
        let inverse_column_sums = reciprocal_or_zero(column_sums);
        let mut iteration = 0;

        std::iter::from_fn(move || {
            let backprojection = project_rays::<M, _, _, D>(&image, rays, job_size, voxel_size, project_one_ray_sirt::<M, D>);
            azip!((voxel in &mut image.data, &b in &backprojection, &c in &inverse_column_sums) {
                *voxel = (*voxel + relaxation * c * b).max(0.0)
            });
            iteration += 1;
            log::debug!("SIRT iteration {iteration}: total activity {}", image.data.iter().sum::<f32>());
            Some(image.clone())
        })
    }

    pub fn sart<'a, M>(volume: Volume<D>, rays: &'a [Ray<D>], params: Sart) -> impl Iterator<Item = Image<D>> + 'a
    where
        M: DiscretizedImageModel<D> + Send + 'a,
    {
        let Sart { relaxation, voxel_size, job_size, subsets } = params;
        let voxel_size = mm_(voxel_size);
        let n_subsets = subsets.clamp(1, rays.len().max(1));

        let mut image = Self::zeros(volume);
        let subsets: Vec<(Vec<Ray<D>>, Vec<Intensityf32>)> = (0..n_subsets)
            .map(|s| {
                let subset: Vec<_> = rays.iter().skip(s).step_by(n_subsets).copied().collect();
                let column_sums = project_rays::<M, _, _, D>(&image, &subset, job_size, voxel_size, project_one_ray_column_sums::<M, D>);
                (subset, reciprocal_or_zero(column_sums))
            })
            .collect();
        let mut iteration = 0;

        std::iter::from_fn(move || {
            for (subset, inverse_column_sums) in &subsets {
                let backprojection = project_rays::<M, _, _, D>(&image, subset, job_size, voxel_size, project_one_ray_sirt::<M, D>);
                azip!((voxel in &mut image.data, &b in &backprojection, &c in inverse_column_sums) {
                    *voxel = (*voxel + relaxation * c * b).max(0.0)
                });
            }
            iteration += 1;
            log::debug!("SART iteration {iteration} ({n_subsets} subsets): total activity {}", image.data.iter().sum::<f32>());
            Some(image.clone())
        })
    }

    pub fn art<'a, M>(volume: Volume<D>, rays: &'a [Ray<D>], params: Art) -> impl Iterator<Item = Image<D>> + 'a
    where
        M: DiscretizedImageModel<D> + 'a,
    {
        let Art { relaxation, voxel_size } = params;
        let voxel_size = mm_(voxel_size);

        let mut image = Self::zeros(volume);
        let mut model = M::new(volume);
        let mut iteration = 0;

        std::iter::from_fn(move || {
            let mut skipped = 0_usize;
            for ray in rays {
                model.reset(&ray.line);
                let scale = model.step_length() * voxel_size;
                let norm_squared = model.row().norm_squared() * scale * scale;
                if norm_squared <= 0.0 {
                    skipped += 1;
                    continue;
                }
                let projection = crate::projector::forward_project(model.row(), &image) * scale;
                let correction = relaxation * (ray.value - projection) / norm_squared * scale;
                for (j, w) in model.row() {
                    image.data[j] += correction * w;
                }
            }
            image.data.iter_mut().for_each(|v| *v = v.max(0.0));
            iteration += 1;
            log::debug!("ART iteration {iteration}: {skipped} rays missed the volume");
            Some(image.clone())
        })
    }
}

/// Euclidean norm of `b − A x`
pub fn residual<M, const D: usize>(image: &Image<D>, rays: &[Ray<D>], voxel_size: Length) -> Lengthf32
where
    M: DiscretizedImageModel<D> + Send,
{
    let lines: Vec<_> = rays.iter().map(|r| r.line).collect();
    forward_projections::<M, D>(image, &lines, mm_(voxel_size))
        .into_iter()
        .zip(rays)
        .map(|(p, r)| (r.value - p).powi(2))
        .sum::<f32>()
        .sqrt()
}

fn reciprocal_or_zero(sums: ImageData) -> Vec<Intensityf32> {
    sums.into_iter().map(|s| if s > 0.0 { 1.0 / s } else { 0.0 }).collect()
}
