use serde::{Deserialize, Serialize};
use std::fmt;

/// Particle species code in the PDG Monte Carlo numbering scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PdgCode(pub i32);

impl PdgCode {
    pub const PROTON: PdgCode = PdgCode(2212);
    pub const NEUTRON: PdgCode = PdgCode(2112);
    pub const PI_PLUS: PdgCode = PdgCode(211);
    pub const PI_ZERO: PdgCode = PdgCode(111);
    pub const PI_MINUS: PdgCode = PdgCode(-211);
    pub const K_PLUS: PdgCode = PdgCode(321);
    pub const K_ZERO: PdgCode = PdgCode(311);
    pub const K_MINUS: PdgCode = PdgCode(-321);
    pub const K_ZERO_BAR: PdgCode = PdgCode(-311);
    pub const ETA: PdgCode = PdgCode(221);
    pub const RHO_ZERO: PdgCode = PdgCode(113);
    pub const RHO_PLUS: PdgCode = PdgCode(213);
    pub const RHO_MINUS: PdgCode = PdgCode(-213);
    pub const OMEGA: PdgCode = PdgCode(223);
    pub const PHI: PdgCode = PdgCode(333);
    pub const DELTA_PLUS_PLUS: PdgCode = PdgCode(2224);
    pub const DELTA_PLUS: PdgCode = PdgCode(2214);
    pub const DELTA_ZERO: PdgCode = PdgCode(2114);
    pub const DELTA_MINUS: PdgCode = PdgCode(1114);
    pub const LAMBDA: PdgCode = PdgCode(3122);
    pub const SIGMA_PLUS: PdgCode = PdgCode(3222);
    pub const SIGMA_ZERO: PdgCode = PdgCode(3212);
    pub const SIGMA_MINUS: PdgCode = PdgCode(3112);
    pub const LAMBDA_1520: PdgCode = PdgCode(3124);
    pub const ELECTRON: PdgCode = PdgCode(11);
    pub const POSITRON: PdgCode = PdgCode(-11);
    pub const MUON: PdgCode = PdgCode(13);
    pub const ANTIMUON: PdgCode = PdgCode(-13);
    pub const PHOTON: PdgCode = PdgCode(22);

    #[inline]
    pub fn code(&self) -> i32 {
        self.0
    }

    pub fn is_nucleon(&self) -> bool {
        matches!(self.0, 2212 | 2112)
    }

    pub fn is_pion(&self) -> bool {
        matches!(self.0, 211 | -211 | 111)
    }

    /// K+, K0 and their antiparticles.
    pub fn is_kaon(&self) -> bool {
        matches!(self.0.abs(), 321 | 311)
    }

    /// Three-quark states: four-digit codes in this numbering.
    pub fn is_baryon(&self) -> bool {
        (1000..10000).contains(&self.0.abs())
    }

    pub fn is_meson(&self) -> bool {
        (100..1000).contains(&self.0.abs())
    }

    pub fn is_lepton(&self) -> bool {
        (11..=16).contains(&self.0.abs())
    }

    pub fn is_photon(&self) -> bool {
        self.0 == 22
    }

    pub fn is_hadron(&self) -> bool {
        self.is_baryon() || self.is_meson()
    }
}

impl fmt::Display for PdgCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match crate::particletype::ParticleType::try_find(*self) {
            Some(ptype) => write!(f, "{}", ptype.name),
            None => write!(f, "{}", self.0),
        }
    }
}
