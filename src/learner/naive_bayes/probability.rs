use serde::{
    Serialize,
    Deserialize,
};

use core::f64::consts::PI;


/// A class-conditional probability density/mass of one attribute.
pub trait Probability {
    /// Logarithm of the density (numeric) or mass (nominal) at `x`.
    fn log_probability(&self, x: f64) -> f64;


    /// Density (numeric) or mass (nominal) at `x`.
    fn probability(&self, x: f64) -> f64 {
        self.log_probability(x).exp()
    }
}


/// Gaussian density
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Gaussian {
    pub(super) mean: f64,
    pub(super) var: f64,
}


impl Gaussian {
    pub(super) fn new(mean: f64, var: f64) -> Self {
        assert!(var > 0.0, "the variance must be positive, got {var}");
        Self { mean, var }
    }
}


impl Probability for Gaussian {
    #[inline(always)]
    fn log_probability(&self, x: f64) -> f64 {
        let gauss_const = (2.0_f64 * PI * self.var).ln();
        - 0.5 * (gauss_const + (x - self.mean).powi(2) / self.var)
    }
}


/// Probability mass over the values of a nominal attribute.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Categorical {
    pub(super) probs: Vec<f64>,
}


impl Probability for Categorical {
    #[inline(always)]
    fn log_probability(&self, x: f64) -> f64 {
        self.probs.get(x as usize)
            .map_or(0.0, |p| p.ln())
    }
}


/// The density model of one attribute for one class.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Density {
    /// Numeric attributes.
    Gaussian(Gaussian),
    /// Nominal attributes.
    Categorical(Categorical),
}


impl Probability for Density {
    #[inline(always)]
    fn log_probability(&self, x: f64) -> f64 {
        match self {
            Self::Gaussian(g) => g.log_probability(x),
            Self::Categorical(c) => c.log_probability(x),
        }
    }
}
