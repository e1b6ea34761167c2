use std::ops::{Add, AddAssign, Index, IndexMut, Sub, SubAssign};
use units::todo::Lengthf32;
use crate::{Vector, restrict};

/// Position in continuous `D`-dimensional voxel coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point<const D: usize>(pub [Lengthf32; D]);

impl<const D: usize> Point<D> {

    pub fn new(coords: [Lengthf32; D]) -> Self { Self(coords) }

    pub fn zero() -> Self { Self([0.0; D]) }

    pub fn coords(&self) -> [Lengthf32; D] { self.0 }

    /// Project onto the hyperplane orthogonal to `axis`, dropping that
    /// coordinate
    pub fn restrict<const L: usize>(&self, axis: usize) -> Point<L> {
        Point(restrict(self.0, axis))
    }

    pub fn is_finite(&self) -> bool { self.0.iter().all(|x| x.is_finite()) }
}

impl<const D: usize> Sub for Point<D> {
    type Output = Vector<D>;
    fn sub(self, rhs: Self) -> Self::Output {
        Vector(std::array::from_fn(|i| self.0[i] - rhs.0[i]))
    }
}

impl<const D: usize> Add<Vector<D>> for Point<D> {
    type Output = Self;
    fn add(self, rhs: Vector<D>) -> Self::Output {
        Self(std::array::from_fn(|i| self.0[i] + rhs.0[i]))
    }
}

impl<const D: usize> Sub<Vector<D>> for Point<D> {
    type Output = Self;
    fn sub(self, rhs: Vector<D>) -> Self::Output {
        Self(std::array::from_fn(|i| self.0[i] - rhs.0[i]))
    }
}

impl<const D: usize> AddAssign<Vector<D>> for Point<D> {
    fn add_assign(&mut self, rhs: Vector<D>) {
        for (x, dx) in self.0.iter_mut().zip(rhs.0) { *x += dx }
    }
}

impl<const D: usize> SubAssign<Vector<D>> for Point<D> {
    fn sub_assign(&mut self, rhs: Vector<D>) {
        for (x, dx) in self.0.iter_mut().zip(rhs.0) { *x -= dx }
    }
}

impl<const D: usize> Index<usize> for Point<D> {
    type Output = Lengthf32;
    fn index(&self, index: usize) -> &Self::Output {
        match self.0.get(index) {
            Some(x) => x,
            None => panic!("index {index} is out of bounds [0,{D})")
        }
    }
}

impl<const D: usize> IndexMut<usize> for Point<D> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output { &mut self.0[index] }
}

impl<const D: usize> From<[Lengthf32; D]> for Point<D> {
    fn from(coords: [Lengthf32; D]) -> Self { Self(coords) }
}
