use std::path::Path;

use crate::{Error, Result, Volume, Intensityf32};
use crate::index::{Index1_u, IndexN_u};
use crate::io;

pub type ImageData = Vec<Intensityf32>;

/// Voxel values on a `D`-dimensional grid, stored with the first axis varying
/// fastest
#[derive(Clone, Debug, PartialEq)]
pub struct Image<const D: usize> {
    pub volume: Volume<D>,
    pub data: ImageData,
}

impl<const D: usize> Image<D> {

    pub fn new(volume: Volume<D>, data: ImageData) -> Result<Self> {
        let expected = volume.n_voxels();
        if data.len() != expected {
            return Err(Error::ImageSize { lengths: volume.lengths().to_vec(), expected, got: data.len() })
        }
        Ok(Self { volume, data })
    }

    pub fn zeros(volume: Volume<D>) -> Self {
        Self { data: Self::zeros_buffer(volume), volume }
    }

    pub fn ones(volume: Volume<D>) -> Self {
        Self { data: vec![1.0; volume.n_voxels()], volume }
    }

    /// Accumulator for back-projections onto `volume`
    pub fn zeros_buffer(volume: Volume<D>) -> ImageData {
        vec![0.0; volume.n_voxels()]
    }

    /// Raw files carry no header: the caller supplies the geometry
    pub fn from_raw_file(volume: Volume<D>, path: &Path) -> Result<Self> {
        let data = io::raw::read(path)?.collect::<std::io::Result<ImageData>>()?;
        Self::new(volume, data)
    }

    pub fn write_to_raw_file(&self, path: &Path) -> Result<()> {
        io::raw::write(self.data.iter().copied(), path)?;
        Ok(())
    }
}

impl<const D: usize> core::ops::Index<Index1_u> for Image<D> {
    type Output = Intensityf32;
    #[inline]
    fn index(&self, i: Index1_u) -> &Self::Output { &self.data[i] }
}

impl<const D: usize> core::ops::IndexMut<Index1_u> for Image<D> {
    #[inline]
    fn index_mut(&mut self, i: Index1_u) -> &mut Self::Output { &mut self.data[i] }
}

impl<const D: usize> core::ops::Index<IndexN_u<D>> for Image<D> {
    type Output = Intensityf32;
    fn index(&self, i: IndexN_u<D>) -> &Self::Output {
        &self.data[self.volume.index(i)]
    }
}

impl<const D: usize> core::ops::IndexMut<IndexN_u<D>> for Image<D> {
    fn index_mut(&mut self, i: IndexN_u<D>) -> &mut Self::Output {
        let i1 = self.volume.index(i);
        &mut self.data[i1]
    }
}
