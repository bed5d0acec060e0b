// Energy-momentum tensor of a particle ensemble and its Landau rest frame.

use nalgebra::{Matrix4, Vector4};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Index, Mul, Sub};

use crate::fourvector::FourVector;
use crate::particle::ParticleData;

const POWER_ITERATIONS: usize = 200;
const CONVERGENCE: f64 = 1e-13;

/// Symmetric `T^{μν}` stored as its ten independent components in the order
/// 00, 01, 02, 03, 11, 12, 13, 22, 23, 33.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyMomentumTensor {
    components: [f64; 10],
}

impl EnergyMomentumTensor {
    pub fn new(components: [f64; 10]) -> Self {
        Self { components }
    }

    pub fn components(&self) -> &[f64; 10] {
        &self.components
    }

    /// Position of `T^{μν}` in the packed storage.
    pub fn packed_index(mu: usize, nu: usize) -> usize {
        let (a, b) = if mu <= nu { (mu, nu) } else { (nu, mu) };
        // rows of the upper triangle have 4, 3, 2, 1 entries
        a * 4 - a * (a.saturating_sub(1)) / 2 + (b - a)
    }

    /// Adds `factor · p^μ p^ν / p^0` for momentum `p`.
    pub fn add_momentum(&mut self, p: &FourVector, factor: f64) {
        if p.x0 <= 0.0 {
            return;
        }
        let v = [p.x0, p.x1, p.x2, p.x3];
        for mu in 0..4 {
            for nu in mu..4 {
                self.components[Self::packed_index(mu, nu)] += factor * v[mu] * v[nu] / p.x0;
            }
        }
    }

    pub fn add_particle(&mut self, particle: &ParticleData, factor: f64) {
        self.add_momentum(&particle.momentum, factor);
    }

    /// Mixed tensor `T^μ_ν = T^{μλ} g_{λν}`.
    fn mixed(&self) -> Matrix4<f64> {
        Matrix4::from_fn(|mu, nu| {
            let sign = if nu == 0 { 1.0 } else { -1.0 };
            sign * self[(mu, nu)]
        })
    }

    /// Four-velocity `u` of the Landau frame, the timelike eigenvector of
    /// `T^μ_ν` normalized to `u·u = 1` with positive time component.
    ///
    /// Power iteration converges onto it because the energy density is the
    /// eigenvalue of largest magnitude for any ensemble of real particles.
    /// `None` when the tensor is empty or has no timelike eigenvector.
    pub fn landau_frame_4velocity(&self) -> Option<FourVector> {
        let m = self.mixed();
        let mut v = Vector4::new(1.0, 0.0, 0.0, 0.0);
        for _ in 0..POWER_ITERATIONS {
            let next = m * v;
            let norm = next.norm();
            if norm == 0.0 || !norm.is_finite() {
                return None;
            }
            let next = next / norm;
            let converged = (next - v).norm() < CONVERGENCE;
            v = next;
            if converged {
                break;
            }
        }
        let u = FourVector::new(v[0], v[1], v[2], v[3]);
        let u2 = u.sqr();
        if u2 <= 0.0 {
            return None;
        }
        let u = u / u2.sqrt();
        Some(if u.x0 < 0.0 { -u } else { u })
    }
}

impl Index<(usize, usize)> for EnergyMomentumTensor {
    type Output = f64;

    fn index(&self, (mu, nu): (usize, usize)) -> &f64 {
        &self.components[Self::packed_index(mu, nu)]
    }
}

impl Add for EnergyMomentumTensor {
    type Output = EnergyMomentumTensor;
    fn add(mut self, rhs: EnergyMomentumTensor) -> EnergyMomentumTensor {
        self += rhs;
        self
    }
}

impl AddAssign for EnergyMomentumTensor {
    fn add_assign(&mut self, rhs: EnergyMomentumTensor) {
        for (a, b) in self.components.iter_mut().zip(rhs.components.iter()) {
            *a += b;
        }
    }
}

impl Sub for EnergyMomentumTensor {
    type Output = EnergyMomentumTensor;
    fn sub(mut self, rhs: EnergyMomentumTensor) -> EnergyMomentumTensor {
        for (a, b) in self.components.iter_mut().zip(rhs.components.iter()) {
            *a -= b;
        }
        self
    }
}

impl Mul<f64> for EnergyMomentumTensor {
    type Output = EnergyMomentumTensor;
    fn mul(mut self, factor: f64) -> EnergyMomentumTensor {
        self.components.iter_mut().for_each(|c| *c *= factor);
        self
    }
}

impl Div<f64> for EnergyMomentumTensor {
    type Output = EnergyMomentumTensor;
    fn div(self, divisor: f64) -> EnergyMomentumTensor {
        self * (1.0 / divisor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_packed_indices() {
        let expected = [
            ((0, 0), 0),
            ((0, 3), 3),
            ((1, 1), 4),
            ((1, 3), 6),
            ((2, 2), 7),
            ((3, 2), 8),
            ((3, 3), 9),
        ];
        for ((mu, nu), i) in expected {
            assert_eq!(EnergyMomentumTensor::packed_index(mu, nu), i, "({}, {})", mu, nu);
        }
    }

    #[test]
    fn test_single_particle_landau_frame_is_its_velocity() {
        let p = FourVector::on_shell(0.938, &Vector3::new(0.4, -0.3, 1.2));
        let mut tmn = EnergyMomentumTensor::default();
        tmn.add_momentum(&p, 1.0);
        let u = tmn.landau_frame_4velocity().unwrap();
        let expected = p / 0.938;
        assert!(u.max_abs_diff(&expected) < 1e-9, "u = {}", u);
    }

    #[test]
    fn test_back_to_back_pair_is_at_rest() {
        let k = Vector3::new(0.0, 0.5, 0.0);
        let mut tmn = EnergyMomentumTensor::default();
        tmn.add_momentum(&FourVector::on_shell(0.14, &k), 1.0);
        tmn.add_momentum(&FourVector::on_shell(0.14, &-k), 1.0);
        let u = tmn.landau_frame_4velocity().unwrap();
        assert!(u.max_abs_diff(&FourVector::new(1.0, 0.0, 0.0, 0.0)) < 1e-9);
    }

    #[test]
    fn test_arithmetic() {
        let mut a = EnergyMomentumTensor::default();
        a.add_momentum(&FourVector::new(2.0, 1.0, 0.0, 0.0), 1.0);
        let b = a * 3.0;
        assert_eq!((b - a)[(0, 1)], 2.0 * a[(1, 0)]);
        assert_eq!((a + a) / 2.0, a);
        assert!(EnergyMomentumTensor::default().landau_frame_4velocity().is_none());
    }
}
