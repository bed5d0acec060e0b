use serde::{Deserialize, Serialize};

use crate::branch::DecayBranch;
use crate::data::{PARTICLE_INDEX, PARTICLE_TYPES};
use crate::error::{ActionError, ActionResult};
use crate::kinematics::pcm;
use crate::pdgcode::PdgCode;

/// Widths below this value (GeV) are treated as stable for mass sampling.
pub const WIDTH_CUTOFF: f64 = 1e-5;

/// Whether a decay mode is part of the ordinary hadronic decay width or is
/// only ever produced perturbatively (dilepton shining).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecayKind {
    Hadronic,
    Dilepton,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayMode {
    pub products: Vec<PdgCode>,
    /// Branching ratio at the pole mass.
    pub branching_ratio: f64,
    /// Orbital angular momentum of the final state.
    pub angular_momentum: u8,
    pub kind: DecayKind,
}

impl DecayMode {
    /// Sum of the product pole masses.
    pub fn threshold(&self) -> f64 {
        self.products
            .iter()
            .map(|pdg| ParticleType::try_find(*pdg).map_or(0.0, |t| t.mass))
            .sum()
    }

    pub fn multiplicity(&self) -> usize {
        self.products.len()
    }

    /// Mass of the lepton pair constituents, if the mode contains leptons.
    pub fn lepton_mass(&self) -> Option<f64> {
        self.products
            .iter()
            .find(|pdg| pdg.is_lepton())
            .and_then(|pdg| ParticleType::try_find(*pdg))
            .map(|t| t.mass)
    }

    pub fn is_dalitz(&self) -> bool {
        self.kind == DecayKind::Dilepton && self.products.len() == 3
    }
}

/// Static properties of one particle species.
#[derive(Debug, Clone)]
pub struct ParticleType {
    pub name: &'static str,
    pub pdg: PdgCode,
    /// Pole mass in GeV.
    pub mass: f64,
    /// Pole width in GeV.
    pub width: f64,
    /// Spin as `2J`.
    pub spin: u8,
    pub charge: i32,
    pub baryon_number: i32,
    pub strangeness: i32,
    pub decay_modes: Vec<DecayMode>,
}

impl ParticleType {
    pub fn try_find(pdg: PdgCode) -> Option<&'static ParticleType> {
        PARTICLE_INDEX.get(&pdg).map(|&i| &PARTICLE_TYPES[i])
    }

    pub fn find(pdg: PdgCode) -> ActionResult<&'static ParticleType> {
        Self::try_find(pdg).ok_or(ActionError::UnknownSpecies(pdg))
    }

    /// All species in table order.
    pub fn list_all() -> &'static [ParticleType] {
        &PARTICLE_TYPES
    }

    pub fn is_stable(&self) -> bool {
        self.width < WIDTH_CUTOFF
    }

    /// Spin degeneracy `2J + 1`.
    pub fn spin_degeneracy(&self) -> f64 {
        f64::from(self.spin) + 1.0
    }

    /// Lowest mass this species can have: the pole mass for stable
    /// particles, the lightest hadronic decay threshold otherwise.
    pub fn min_mass_kinetic(&self) -> f64 {
        if self.is_stable() {
            return self.mass;
        }
        self.decay_modes
            .iter()
            .filter(|mode| mode.kind == DecayKind::Hadronic)
            .map(DecayMode::threshold)
            .fold(f64::INFINITY, f64::min)
            .min(self.mass)
    }

    /// Partial width of `mode` at mass `m`.
    ///
    /// Two-body hadronic modes scale with the centre-of-mass momentum to the
    /// power `2L+1`; direct dilepton modes follow the vector-meson-dominance
    /// `(M/m)^3` scaling; three-body modes keep their pole value above
    /// threshold.
    pub fn partial_width(&self, mode: &DecayMode, m: f64) -> f64 {
        if self.width <= 0.0 || m <= mode.threshold() {
            return 0.0;
        }
        let gamma0 = self.width * mode.branching_ratio;
        match (mode.kind, mode.products.len()) {
            (DecayKind::Hadronic, 2) => {
                let m1 = mass_of(mode.products[0]);
                let m2 = mass_of(mode.products[1]);
                let q0 = pcm(self.mass, m1, m2);
                if q0 <= 0.0 {
                    return gamma0;
                }
                let q = pcm(m, m1, m2);
                let exponent = 2 * i32::from(mode.angular_momentum) + 1;
                gamma0 * (q / q0).powi(exponent) * self.mass / m
            }
            (DecayKind::Dilepton, 2) => {
                let ml = mode.lepton_mass().unwrap_or(0.0);
                gamma0 * (self.mass / m).powi(3) * dilepton_phase_space(m, ml)
                    / dilepton_phase_space(self.mass, ml)
            }
            _ => gamma0,
        }
    }

    /// Sum of the partial widths of all modes of the given kind at mass `m`.
    pub fn total_width(&self, m: f64, kind: DecayKind) -> f64 {
        self.decay_modes
            .iter()
            .filter(|mode| mode.kind == kind)
            .map(|mode| self.partial_width(mode, m))
            .sum()
    }

    /// Decay branches of the given kind at mass `m`, weighted by their
    /// partial widths. Closed channels are left out.
    pub fn decay_branches(&self, m: f64, kind: DecayKind) -> Vec<DecayBranch> {
        self.decay_modes
            .iter()
            .filter(|mode| mode.kind == kind)
            .filter_map(|mode| {
                let weight = self.partial_width(mode, m);
                (weight > 0.0).then(|| DecayBranch {
                    mode: mode.clone(),
                    weight,
                })
            })
            .collect()
    }

    /// Hadronic two-body mode decaying into exactly the pair `a`, `b`
    /// (in either order).
    pub fn two_body_mode(&self, a: PdgCode, b: PdgCode) -> Option<&DecayMode> {
        self.decay_modes.iter().find(|mode| {
            mode.kind == DecayKind::Hadronic
                && mode.products.len() == 2
                && ((mode.products[0] == a && mode.products[1] == b)
                    || (mode.products[0] == b && mode.products[1] == a))
        })
    }
}

/// Pole mass of a species, zero for unknown codes.
pub fn mass_of(pdg: PdgCode) -> f64 {
    ParticleType::try_find(pdg).map_or(0.0, |t| t.mass)
}

/// `sqrt(1 - 4 m_l²/m²) (1 + 2 m_l²/m²)`, the lepton pair phase-space factor.
pub fn dilepton_phase_space(m: f64, lepton_mass: f64) -> f64 {
    let r = lepton_mass * lepton_mass / (m * m);
    if r >= 0.25 {
        return 0.0;
    }
    (1.0 - 4.0 * r).sqrt() * (1.0 + 2.0 * r)
}
