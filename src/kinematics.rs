// Relativistic kinematics used when materializing final states

use nalgebra::Vector3;
use rand::Rng;
use rand_distr::{Distribution, UnitSphere};

use crate::fourvector::FourVector;
use crate::particletype::ParticleType;

/// ħc in GeV fm.
pub const HBARC: f64 = 0.197327053;
/// Square femtometres per millibarn.
pub const FM2_MB: f64 = 0.1;

/// Centre-of-mass momentum of a two-body system of invariant mass `srts`
/// made of masses `m1` and `m2`. Zero at or below threshold.
pub fn pcm(srts: f64, m1: f64, m2: f64) -> f64 {
    let s = srts * srts;
    let x = (s - (m1 + m2).powi(2)) * (s - (m1 - m2).powi(2));
    if x <= 0.0 || srts <= 0.0 {
        return 0.0;
    }
    x.sqrt() / (2.0 * srts)
}

/// Beam momentum of a projectile of mass `m_projectile` hitting a target of
/// mass `m_target` at rest, for Mandelstam `s`.
pub fn plab_from_s(mandelstam_s: f64, m_projectile: f64, m_target: f64) -> f64 {
    let x = (mandelstam_s - (m_projectile + m_target).powi(2))
        * (mandelstam_s - (m_projectile - m_target).powi(2));
    if x <= 0.0 {
        return 0.0;
    }
    x.sqrt() / (2.0 * m_target)
}

/// Uniformly distributed unit vector.
pub fn isotropic_direction<R: Rng + ?Sized>(rng: &mut R) -> Vector3<f64> {
    let [x, y, z]: [f64; 3] = UnitSphere.sample(rng);
    Vector3::new(x, y, z)
}

/// Rotate a direction vector by angle theta (cos(theta)=mu) around the
/// azimuth `phi`, measured from an arbitrary perpendicular axis.
pub fn rotate_direction_3d(u_old: &Vector3<f64>, mu: f64, phi: f64) -> Vector3<f64> {
    let sin_theta = (1.0 - mu * mu).max(0.0).sqrt();

    let perp = if u_old.x.abs() < 0.99 {
        Vector3::new(1.0, 0.0, 0.0).cross(u_old).normalize()
    } else {
        Vector3::new(0.0, 1.0, 0.0).cross(u_old).normalize()
    };
    let ortho = u_old.cross(&perp);

    mu * u_old + sin_theta * phi.cos() * perp + sin_theta * phi.sin() * ortho
}

/// Back-to-back on-shell momenta of two particles with masses `m1`, `m2`
/// in their rest frame of invariant mass `srts`; the first particle moves
/// along `direction`.
pub fn two_body_momenta(
    srts: f64,
    m1: f64,
    m2: f64,
    direction: &Vector3<f64>,
) -> (FourVector, FourVector) {
    let p = pcm(srts, m1, m2) * direction;
    (FourVector::on_shell(m1, &p), FourVector::on_shell(m2, &-p))
}

/// Splits `total` (the four-momentum of a system of mass `m1 + m2` or more)
/// into two on-shell momenta with the first particle emitted along
/// `direction` in the system's rest frame, returned in the original frame.
pub fn split_two_body(
    total: &FourVector,
    m1: f64,
    m2: f64,
    direction: &Vector3<f64>,
) -> (FourVector, FourVector) {
    let srts = total.abs();
    let beta = total.velocity();
    let (p1, p2) = two_body_momenta(srts, m1, m2, direction);
    (p1.lorentz_boost(&-beta), p2.lorentz_boost(&-beta))
}

/// Splits `total` into three on-shell momenta for masses `m1`, `m2`, `m3`,
/// with the (1, 2) subsystem at invariant mass `m12`.
///
/// The pair recoils against particle 3 isotropically in the overall rest
/// frame and decays isotropically in its own rest frame, which at fixed
/// `m12` populates the Dalitz plot uniformly. Results are in the frame of
/// `total`, ordered as the masses.
pub fn split_three_body<R: Rng + ?Sized>(
    total: &FourVector,
    masses: [f64; 3],
    m12: f64,
    rng: &mut R,
) -> [FourVector; 3] {
    let [m1, m2, m3] = masses;
    let (p12, p3) = split_two_body(total, m12, m3, &isotropic_direction(rng));
    let (p1, p2) = split_two_body(&p12, m1, m2, &isotropic_direction(rng));
    [p1, p2, p3]
}

/// Samples the invariant mass `m12` of the (1, 2) subsystem in a decay
/// `M -> 1 + 2 + 3` distributed according to flat three-body phase space.
///
/// Integrating the uniform Dalitz plot over `m23²` leaves a density in
/// `m12` proportional to `p*(M; m12, m3) · q*(m12; m1, m2)`, which is
/// sampled by rejection.
pub fn sample_three_body_mass<R: Rng + ?Sized>(
    big_m: f64,
    m1: f64,
    m2: f64,
    m3: f64,
    rng: &mut R,
) -> f64 {
    let lo = m1 + m2;
    let hi = big_m - m3;
    if hi <= lo {
        return lo;
    }
    let envelope = pcm(big_m, lo, m3) * pcm(hi, m1, m2);
    if envelope <= 0.0 {
        return rng.gen_range(lo..hi);
    }
    loop {
        let m12 = rng.gen_range(lo..hi);
        let weight = pcm(big_m, m12, m3) * pcm(m12, m1, m2);
        if rng.gen::<f64>() * envelope < weight {
            return m12;
        }
    }
}

/// Samples the mass of an unstable particle produced together with a
/// partner of mass `m_other` at total energy `srts`.
///
/// The proposal is a Cauchy (non-relativistic Breit-Wigner) truncated to the
/// allowed window, and candidates are accepted in proportion to the
/// two-body phase space, which is largest at the lower mass edge.
pub fn sample_resonance_mass<R: Rng + ?Sized>(
    ptype: &ParticleType,
    m_other: f64,
    srts: f64,
    rng: &mut R,
) -> f64 {
    if ptype.is_stable() {
        return ptype.mass;
    }
    let m_min = ptype.min_mass_kinetic();
    let m_max = srts - m_other;
    if m_max <= m_min {
        return m_min;
    }
    let half_width = 0.5 * ptype.width;
    let lower = ((m_min - ptype.mass) / half_width).atan();
    let upper = ((m_max - ptype.mass) / half_width).atan();
    let envelope = pcm(srts, m_other, m_min);
    loop {
        let u = rng.gen_range(lower..upper);
        let m = (ptype.mass + half_width * u.tan()).clamp(m_min, m_max);
        if envelope <= 0.0 || rng.gen::<f64>() * envelope < pcm(srts, m_other, m) {
            return m;
        }
    }
}

/// Masses of a two-body final state of total energy `srts`: stable products
/// keep their pole mass, unstable ones are sampled in turn within the window
/// left by their partner.
pub fn sample_two_body_masses<R: Rng + ?Sized>(
    first: &ParticleType,
    second: &ParticleType,
    srts: f64,
    rng: &mut R,
) -> (f64, f64) {
    let m1 = sample_resonance_mass(first, second.min_mass_kinetic(), srts, rng);
    let m2 = sample_resonance_mass(second, m1, srts, rng);
    (m1, m2)
}

/// Slope `b` of the Cugnon parametrization `dσ/dt ∝ exp(b t)` of the
/// nucleon-nucleon elastic angular distribution, in GeV⁻².
pub fn cugnon_slope(srts: f64) -> f64 {
    let x = (3.65 * (srts - 1.8766)).powi(6);
    if x <= 0.0 {
        return 0.0;
    }
    6.0 * x / (1.0 + x)
}

/// Samples the scattering cosine in the centre-of-mass frame for
/// `dσ/dt ∝ exp(b t)` with `t ∈ [-4 p², 0]`.
pub fn sample_exponential_cos_theta<R: Rng + ?Sized>(b: f64, p_cm: f64, rng: &mut R) -> f64 {
    let four_p2 = 4.0 * p_cm * p_cm;
    if b <= 0.0 || four_p2 <= 0.0 {
        return rng.gen_range(-1.0..=1.0);
    }
    let u: f64 = rng.gen();
    let t = (1.0 - u * (1.0 - (-b * four_p2).exp())).ln() / b;
    (1.0 + 2.0 * t / four_p2).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdgcode::PdgCode;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pcm_threshold_and_symmetry() {
        assert_eq!(pcm(1.0, 0.6, 0.5), 0.0);
        let p = pcm(2.0, 0.938, 0.494);
        assert!(p > 0.0);
        assert!((p - pcm(2.0, 0.494, 0.938)).abs() < 1e-15);
        // energies add up to srts
        let e = (0.938f64.powi(2) + p * p).sqrt() + (0.494f64.powi(2) + p * p).sqrt();
        assert!((e - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_plab_from_s() {
        // target at rest: s = m1² + m2² + 2 m2 E_lab
        let (m1, m2) = (0.494, 0.938);
        let plab = 1.0_f64;
        let elab = (m1 * m1 + plab * plab).sqrt();
        let s = m1 * m1 + m2 * m2 + 2.0 * m2 * elab;
        assert!((plab_from_s(s, m1, m2) - plab).abs() < 1e-12);
    }

    #[test]
    fn test_rotate_direction_preserves_norm() {
        let u = Vector3::new(0.0, 0.0, 1.0);
        let v = rotate_direction_3d(&u, 0.5, 1.3);
        assert!((v.norm() - 1.0).abs() < 1e-12, "norm = {}", v.norm());
        assert!((v.z - 0.5).abs() < 1e-12, "z = {}", v.z);
    }

    #[test]
    fn test_split_two_body_conserves_momentum() {
        let mut rng = StdRng::seed_from_u64(7);
        let total = FourVector::new(3.0, 0.4, -1.2, 0.9);
        let dir = isotropic_direction(&mut rng);
        let (p1, p2) = split_two_body(&total, 0.938, 0.14, &dir);
        assert!((p1 + p2).max_abs_diff(&total) < 1e-12);
        assert!((p1.abs() - 0.938).abs() < 1e-9);
        assert!((p2.abs() - 0.14).abs() < 1e-9);
    }

    #[test]
    fn test_split_three_body_conserves_momentum() {
        let mut rng = StdRng::seed_from_u64(13);
        let total = FourVector::new(1.2, 0.3, 0.2, -0.5);
        let masses = [0.1396, 0.1396, 0.135];
        let big_m = total.abs();
        let m12 = sample_three_body_mass(big_m, masses[0], masses[1], masses[2], &mut rng);
        let p = split_three_body(&total, masses, m12, &mut rng);
        assert!((p[0] + p[1] + p[2]).max_abs_diff(&total) < 1e-12);
        assert!(((p[0] + p[1]).abs() - m12).abs() < 1e-9);
        for (pi, mi) in p.iter().zip(masses.iter()) {
            assert!((pi.abs() - mi).abs() < 1e-9);
        }
    }

    #[test]
    fn test_three_body_mass_within_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let m12 = sample_three_body_mass(0.782, 0.1396, 0.1396, 0.135, &mut rng);
            assert!(m12 >= 0.2792 && m12 <= 0.782 - 0.135);
        }
    }

    #[test]
    fn test_resonance_mass_within_window() {
        let mut rng = StdRng::seed_from_u64(3);
        let delta = ParticleType::find(PdgCode::DELTA_PLUS_PLUS).unwrap();
        for _ in 0..1000 {
            let m = sample_resonance_mass(delta, 0.494, 1.8, &mut rng);
            assert!(m >= delta.min_mass_kinetic() && m <= 1.8 - 0.494, "m = {}", m);
        }
    }

    #[test]
    fn test_two_body_masses_fit_below_srts() {
        let mut rng = StdRng::seed_from_u64(9);
        let kaon = ParticleType::find(PdgCode::K_ZERO).unwrap();
        let delta = ParticleType::find(PdgCode::DELTA_PLUS_PLUS).unwrap();
        for _ in 0..500 {
            let (mk, md) = sample_two_body_masses(kaon, delta, 1.9, &mut rng);
            assert_eq!(mk, kaon.mass);
            assert!(mk + md <= 1.9);
        }
    }

    #[test]
    fn test_exponential_cos_theta_is_forward_peaked() {
        let mut rng = StdRng::seed_from_u64(5);
        let n = 5000;
        let mean: f64 = (0..n)
            .map(|_| sample_exponential_cos_theta(5.0, 1.0, &mut rng))
            .sum::<f64>()
            / n as f64;
        assert!(mean > 0.5, "mean cos = {}", mean);
    }
}
