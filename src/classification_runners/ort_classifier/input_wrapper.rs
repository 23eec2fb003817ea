use anyhow::Result;
use ndarray::{Array, IxDyn};

/// Tensor passed in and out of an inference engine, always widened to `f32`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct X(pub Array<f32, IxDyn>);

impl From<Array<f32, IxDyn>> for X {
    fn from(x: Array<f32, IxDyn>) -> Self {
        Self(x)
    }
}

impl From<Vec<f32>> for X {
    fn from(x: Vec<f32>) -> Self {
        Self(Array::from_vec(x).into_dyn())
    }
}

impl std::ops::Deref for X {
    type Target = Array<f32, IxDyn>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl X {
    pub fn from_shape_vec(shape: &[usize], xs: Vec<f32>) -> Result<Self> {
        Ok(Self::from(Array::from_shape_vec(shape, xs)?))
    }

    /// Drops every unit axis, leaving the flat score vector of a
    /// classification head. Fails if more than one axis is wider than one.
    pub fn squeeze(&self) -> Result<Vec<f32>> {
        let wide = self.shape().iter().filter(|&&d| d > 1).count();
        if wide > 1 {
            anyhow::bail!("Expected a single score vector, got output of shape {:?}", self.shape());
        }
        Ok(self.0.iter().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squeeze_unit_axes() {
        let x = X::from_shape_vec(&[1, 4], vec![0.1, 0.2, 0.3, 0.4]).unwrap();
        assert_eq!(x.squeeze().unwrap(), vec![0.1, 0.2, 0.3, 0.4]);

        let x = X::from_shape_vec(&[1, 1, 3, 1], vec![1., 2., 3.]).unwrap();
        assert_eq!(x.squeeze().unwrap(), vec![1., 2., 3.]);
    }

    #[test]
    fn squeeze_rejects_matrix() {
        let x = X::from_shape_vec(&[2, 3], vec![0.; 6]).unwrap();
        assert!(x.squeeze().is_err());
    }
}
