// src/tracer/field.rs

use std::ops::{Index, IndexMut};

/// Cell-centered scalar over the full grid, ghosts included.
/// Indexed `[i, j, k]` with `i` running fastest.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField3 {
    shape: [usize; 3],
    data: Vec<f64>,
}

impl ScalarField3 {
    pub fn new(shape: [usize; 3], value: f64) -> Self {
        ScalarField3 {
            shape,
            data: vec![value; shape[0] * shape[1] * shape[2]],
        }
    }

    /// Fills the field from a function of the cell indices.
    pub fn from_fn<F: FnMut(usize, usize, usize) -> f64>(shape: [usize; 3], mut f: F) -> Self {
        let mut data = Vec::with_capacity(shape[0] * shape[1] * shape[2]);
        for k in 0..shape[2] {
            for j in 0..shape[1] {
                for i in 0..shape[0] {
                    data.push(f(i, j, k));
                }
            }
        }
        ScalarField3 { shape, data }
    }

    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    pub fn fill(&mut self, value: f64) {
        self.data.iter_mut().for_each(|v| *v = value);
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    fn offset(&self, [i, j, k]: [usize; 3]) -> usize {
        debug_assert!(
            i < self.shape[0] && j < self.shape[1] && k < self.shape[2],
            "cell ({}, {}, {}) outside field of shape {:?}",
            i,
            j,
            k,
            self.shape
        );
        i + self.shape[0] * (j + self.shape[1] * k)
    }
}

impl Index<[usize; 3]> for ScalarField3 {
    type Output = f64;

    #[inline]
    fn index(&self, cell: [usize; 3]) -> &f64 {
        &self.data[self.offset(cell)]
    }
}

impl IndexMut<[usize; 3]> for ScalarField3 {
    #[inline]
    fn index_mut(&mut self, cell: [usize; 3]) -> &mut f64 {
        let offset = self.offset(cell);
        &mut self.data[offset]
    }
}

/// Concentration of every tracer species.
#[derive(Debug, Clone, PartialEq)]
pub struct TracerField {
    species: Vec<ScalarField3>,
}

impl TracerField {
    pub fn new(species: Vec<ScalarField3>) -> Self {
        debug_assert!(
            species.windows(2).all(|w| w[0].shape() == w[1].shape()),
            "tracer species must share one shape"
        );
        TracerField { species }
    }

    pub fn single(field: ScalarField3) -> Self {
        TracerField { species: vec![field] }
    }

    pub fn ntracer(&self) -> usize {
        self.species.len()
    }

    pub fn species(&self, n: usize) -> &ScalarField3 {
        &self.species[n]
    }

    pub fn species_mut(&mut self, n: usize) -> &mut ScalarField3 {
        &mut self.species[n]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScalarField3> {
        self.species.iter()
    }
}
