//! Overall structure of forward and backward projections.
//!
//! The main projection driver functions
//!
//! + `project_rays`, which loops over all rays in parallel, and
//!
//! + `project_one_ray`
//!
//! are abstracted over different algorithms for calculating system matrix
//! elements, via the `DiscretizedImageModel` trait.
//!
//! Projections adapted for different use cases can be created by passing
//! adapter functions into `project_rays` and `project_one_ray`. Two varieties
//! are implemented:
//!
//! + SIRT
//!
//! + Column sums (the back-projection of a uniform measurement)
//!
//! Weights produced by a DIM are in units of sampling steps: they are scaled
//! by the model's `step_length` and the voxel size to become path lengths.

/// Performs forward and backward projections over a collection of rays.
///
/// Abstracted over different algorithms for calculating system matrix elements,
/// via the `DiscretizedImageModel` trait.
///
/// Different varieties of projection are made possible by injecting the
/// `project_one_ray` function, for which two implementations are provided:
///
/// + `project_one_ray_sirt`
///
/// + `project_one_ray_column_sums`
pub fn project_rays<'i, M, R, F, const D: usize>(
    image          : &'i Image<D>,
    rays           : R,
    job_size       : usize,
    voxel_size     : Lengthf32,
    project_one_ray: F,
) -> ImageData
where
    M: DiscretizedImageModel<D> + Send,
    R: IntoParallelIterator,
    R::Iter: IndexedParallelIterator,
    F: Fn(Fs<'i, M, D>, R::Item) -> Fs<'i, M, D> + Sync + Send,
{
    // Closure preparing the state needed by `fold`: will be called by
    // `fold` at the start of every thread that is launched.
    let initial_thread_state = || {
        let backprojection = Image::zeros_buffer(image.volume);
        let model = M::new(image.volume);
        Fs::<M, D> { backprojection, model, image, voxel_size }
    };

    // -------- Project all rays forwards and backwards ---------------------
    let fold_result = rays
        .into_par_iter()
        // Rayon is too eager in spawning small jobs, each of which requires the
        // construction and subsequent combination of expensive accumulators
        // (whole `Image`s). So here we try to limit it to one job per thread.
        .fold_chunks(job_size.max(1), initial_thread_state, project_one_ray);

    // -------- extract relevant information (backprojection) ---------------
    fold_result
        // Keep only the backprojection (ignore the model)
        .map(|state| state.backprojection)
        // Sum the backprojections calculated on each thread
        .reduce(|| Image::zeros_buffer(image.volume), elementwise_add)
}

// ----- For injection into `project_rays` --------------------------------------------------
/// Adapts `project_rays` for SIRT iterations: back-projects the residual of
/// each ray, normalized by the sum of its system matrix row.
pub fn project_one_ray_sirt<'i, M, const D: usize>(fold_state: Fs<'i, M, D>, ray: &Ray<D>) -> Fs<'i, M, D>
where
    M: DiscretizedImageModel<D>,
{
    project_one_ray::<M, D>(fold_state, ray, |projection, row_sum, ray| {
        if row_sum > 0.0 { (ray.value - projection) / row_sum } else { 0.0 }
    })
}

/// Adapts `project_rays` for calculating the column sums of the system matrix
pub fn project_one_ray_column_sums<'i, M, const D: usize>(fold_state: Fs<'i, M, D>, ray: &Ray<D>) -> Fs<'i, M, D>
where
    M: DiscretizedImageModel<D>,
{
    project_one_ray::<M, D>(fold_state, ray, |_projection, _row_sum, _ray| 1.0)
}
// ---------------------------------------------------------------------------------------------

/// Used by `project_rays` to perform the forward and backward projection of a
/// single ray.
///
/// The adapter receives the forward projection and the sum of the scaled row,
/// and returns the value to be back-projected.
fn project_one_ray<'img, M, const D: usize>(
    state: Fs<'img, M, D>,
    ray: &Ray<D>,
    adapt_forward_projection: impl Fn(Lengthf32, Lengthf32, &Ray<D>) -> Lengthf32,
) -> Fs<'img, M, D>
where
    M: DiscretizedImageModel<D>,
{
    let Fs::<M, D> { mut backprojection, mut model, image, voxel_size } = state;
    model.reset(&ray.line);

    let project_this_ray = 'safe_ray: {
        for (i, _) in model.row() {
            if i >= backprojection.len() {
                log::debug!("skipping ray {}: voxel index {i} out of range", ray.line);
                break 'safe_ray false;
            }
        }
        !model.row().is_empty()
    };

    if project_this_ray {
        let scale = model.step_length() * voxel_size;
        let projection = forward_project(model.row(), image) * scale;
        let row_sum = model.row().weight_sum() * scale;
        let adapted_projection = adapt_forward_projection(projection, row_sum, ray);
        back_project(&mut backprojection, model.row(), adapted_projection * scale);
    }
    // Return values needed by next ray's iteration
    Fs::<M, D> { backprojection, model, image, voxel_size }
}

/// Forward projection of every line, scaled to path lengths, in parallel with
/// one model per worker
pub fn forward_projections<M, const D: usize>(image: &Image<D>, lines: &[Line<D>], voxel_size: Lengthf32) -> Vec<Lengthf32>
where
    M: DiscretizedImageModel<D> + Send,
{
    lines
        .par_iter()
        .map_init(
            || M::new(image.volume),
            |model, line| {
                model.reset(line);
                forward_project(model.row(), image) * model.step_length() * voxel_size
            })
        .collect()
}

/// Σ w·image[j] over the row
#[inline]
pub fn forward_project<const D: usize>(system_matrix_row: &SystemMatrixRow, image: &Image<D>) -> Lengthf32 {
    let mut projection = 0.0;
    for (j, w) in system_matrix_row {
        projection += w * image[j]
    }
    projection
}

/// buffer[j] += w·value over the row
#[inline]
pub fn back_project(backprojection: &mut [Lengthf32], system_matrix_row: &SystemMatrixRow, value: Lengthf32) {
    for (j, w) in system_matrix_row {
        backprojection[j] += w * value;
    }
}

fn elementwise_add(a: Vec<f32>, b: Vec<f32>) -> Vec<f32> {
    a.iter().zip(b.iter()).map(|(l,r)| l+r).collect()
}

/// Data needed to be passed efficiently between the projection of one ray and
/// the next. Needs to work in conjunction with `rayon`'s `fold`s.
pub struct FoldState<'img, M, const D: usize> {
    pub backprojection: ImageData,
    pub model: M,
    pub image: &'img Image<D>,
    pub voxel_size: Lengthf32,
}

/// Abbreviation of `FoldState` for use in signatures
pub type Fs<'i, M, const D: usize> = FoldState<'i, M, D>;


// ----- Imports ------------------------------------------------------------------------------------------
use rayon::prelude::*;

use units::todo::Lengthf32;

use crate::{
    Line, Ray,
    image::{ImageData, Image},
    system_matrix::{SystemMatrixRow, DiscretizedImageModel},
};
