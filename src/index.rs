//! Conversion between `D`-dimensional voxel coordinates and flat (1-d)
//! indices. The first axis varies fastest.

#[allow(non_camel_case_types)] pub type Index1_u = usize;
#[allow(non_camel_case_types)] pub type IndexN_u<const D: usize> = [usize; D];
#[allow(non_camel_case_types)] pub type BoxDim_u<const D: usize> = [usize; D];

#[inline]
pub fn index_n_to_1<const D: usize>(index: IndexN_u<D>, size: BoxDim_u<D>) -> Index1_u {
    index.iter().zip(size.iter()).rev()
        .fold(0, |flat, (&i, &n)| flat * n + i)
}

#[inline]
pub fn index1_to_n<const D: usize>(mut flat: Index1_u, size: BoxDim_u<D>) -> IndexN_u<D> {
    let mut index = [0; D];
    for (i, &n) in index.iter_mut().zip(size.iter()) {
        *i = flat % n;
        flat /= n;
    }
    index
}
