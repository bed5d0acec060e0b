use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Four-vector with contravariant components `(x0, x1, x2, x3)`.
///
/// Used for both four-momenta (energy first) and four-positions (time
/// first). The metric is `(+, -, -, -)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FourVector {
    pub x0: f64,
    pub x1: f64,
    pub x2: f64,
    pub x3: f64,
}

impl FourVector {
    pub const fn new(x0: f64, x1: f64, x2: f64, x3: f64) -> Self {
        Self { x0, x1, x2, x3 }
    }

    /// Builds a four-vector from a time-like component and a spatial part.
    pub fn from_parts(x0: f64, v: &Vector3<f64>) -> Self {
        Self::new(x0, v.x, v.y, v.z)
    }

    /// On-shell four-momentum for the given mass and three-momentum.
    pub fn on_shell(mass: f64, p: &Vector3<f64>) -> Self {
        Self::from_parts((mass * mass + p.norm_squared()).sqrt(), p)
    }

    pub fn threevec(&self) -> Vector3<f64> {
        Vector3::new(self.x1, self.x2, self.x3)
    }

    /// Minkowski product `a·b = a0 b0 - a⃗·b⃗`.
    #[inline]
    pub fn dot(&self, other: &FourVector) -> f64 {
        self.x0 * other.x0 - self.x1 * other.x1 - self.x2 * other.x2 - self.x3 * other.x3
    }

    #[inline]
    pub fn sqr(&self) -> f64 {
        self.dot(self)
    }

    /// Invariant length; negative for space-like vectors.
    pub fn abs(&self) -> f64 {
        let s = self.sqr();
        if s < 0.0 {
            -(-s).sqrt()
        } else {
            s.sqrt()
        }
    }

    /// Three-velocity `x⃗ / x0` of a four-momentum.
    pub fn velocity(&self) -> Vector3<f64> {
        self.threevec() / self.x0
    }

    /// Transforms this vector into the frame moving with velocity `v`
    /// relative to the current frame.
    pub fn lorentz_boost(&self, v: &Vector3<f64>) -> FourVector {
        let v2 = v.norm_squared();
        if v2 == 0.0 {
            return *self;
        }
        let gamma = 1.0 / (1.0 - v2).sqrt();
        let x = self.threevec();
        let xv = x.dot(v);
        let t = gamma * (self.x0 - xv);
        let spatial = x + ((gamma - 1.0) * xv / v2 - gamma * self.x0) * v;
        FourVector::from_parts(t, &spatial)
    }

    pub fn all_lt(&self, other: &FourVector) -> bool {
        self.x0 < other.x0 && self.x1 < other.x1 && self.x2 < other.x2 && self.x3 < other.x3
    }

    pub fn all_le(&self, other: &FourVector) -> bool {
        self.x0 <= other.x0 && self.x1 <= other.x1 && self.x2 <= other.x2 && self.x3 <= other.x3
    }

    pub fn all_gt(&self, other: &FourVector) -> bool {
        other.all_lt(self)
    }

    pub fn all_ge(&self, other: &FourVector) -> bool {
        other.all_le(self)
    }

    /// Largest absolute component-wise difference.
    pub fn max_abs_diff(&self, other: &FourVector) -> f64 {
        let d = *self - *other;
        d.x0.abs().max(d.x1.abs()).max(d.x2.abs()).max(d.x3.abs())
    }
}

impl Add for FourVector {
    type Output = FourVector;
    fn add(self, rhs: FourVector) -> FourVector {
        FourVector::new(self.x0 + rhs.x0, self.x1 + rhs.x1, self.x2 + rhs.x2, self.x3 + rhs.x3)
    }
}

impl Sub for FourVector {
    type Output = FourVector;
    fn sub(self, rhs: FourVector) -> FourVector {
        FourVector::new(self.x0 - rhs.x0, self.x1 - rhs.x1, self.x2 - rhs.x2, self.x3 - rhs.x3)
    }
}

impl Neg for FourVector {
    type Output = FourVector;
    fn neg(self) -> FourVector {
        FourVector::new(-self.x0, -self.x1, -self.x2, -self.x3)
    }
}

impl Mul<f64> for FourVector {
    type Output = FourVector;
    fn mul(self, a: f64) -> FourVector {
        FourVector::new(self.x0 * a, self.x1 * a, self.x2 * a, self.x3 * a)
    }
}

impl Mul<FourVector> for f64 {
    type Output = FourVector;
    fn mul(self, v: FourVector) -> FourVector {
        v * self
    }
}

impl Div<f64> for FourVector {
    type Output = FourVector;
    fn div(self, a: f64) -> FourVector {
        FourVector::new(self.x0 / a, self.x1 / a, self.x2 / a, self.x3 / a)
    }
}

impl AddAssign for FourVector {
    fn add_assign(&mut self, rhs: FourVector) {
        *self = *self + rhs;
    }
}

impl SubAssign for FourVector {
    fn sub_assign(&mut self, rhs: FourVector) {
        *self = *self - rhs;
    }
}

impl MulAssign<f64> for FourVector {
    fn mul_assign(&mut self, a: f64) {
        *self = *self * a;
    }
}

impl DivAssign<f64> for FourVector {
    fn div_assign(&mut self, a: f64) {
        *self = *self / a;
    }
}

impl std::iter::Sum for FourVector {
    fn sum<I: Iterator<Item = FourVector>>(iter: I) -> FourVector {
        iter.fold(FourVector::default(), |acc, v| acc + v)
    }
}

impl fmt::Display for FourVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6}, {:.6}, {:.6})", self.x0, self.x1, self.x2, self.x3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a() -> FourVector {
        FourVector::new(0.12, 0.06, 0.003, -0.15)
    }

    fn b() -> FourVector {
        FourVector::new(0.06, 0.03, 0.0015, -0.075)
    }

    #[test]
    fn test_equality() {
        assert_ne!(a(), b());
        assert_eq!(a(), FourVector::new(0.12, 0.06, 0.003, -0.15));
    }

    #[test]
    fn test_componentwise_comparisons() {
        let c = FourVector::new(0.1, 0.6, 0.3, -0.15);
        let d = FourVector::new(0.01, 0.06, 0.0015, -0.75);
        assert!(!c.all_le(&d));
        assert!(c.all_gt(&d));
    }

    #[test]
    fn test_addition_and_division() {
        assert_eq!(b() + b(), a());
        let mut v = a();
        v /= 2.0;
        assert_eq!(v, b());
    }

    #[test]
    fn test_boost_to_rest_frame() {
        let p = FourVector::on_shell(0.938, &Vector3::new(0.3, -0.2, 1.1));
        let rest = p.lorentz_boost(&p.velocity());
        assert!((rest.x0 - 0.938).abs() < 1e-12, "E = {}", rest.x0);
        assert!(rest.threevec().norm() < 1e-12);
        // invariant is preserved
        assert!((rest.sqr() - p.sqr()).abs() < 1e-12);
    }

    #[test]
    fn test_boost_round_trip() {
        let p = FourVector::new(2.0, 0.5, 0.4, -0.3);
        let v = Vector3::new(0.2, -0.6, 0.1);
        let back = p.lorentz_boost(&v).lorentz_boost(&-v);
        assert!(back.max_abs_diff(&p) < 1e-12);
    }

    #[test]
    fn test_abs_of_spacelike_vector() {
        let x = FourVector::new(1.0, 2.0, 0.0, 0.0);
        assert!((x.abs() + 3.0_f64.sqrt()).abs() < 1e-12);
    }
}
