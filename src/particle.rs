use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ActionResult;
use crate::fourvector::FourVector;
use crate::particletype::ParticleType;
use crate::pdgcode::PdgCode;

/// One particle as seen by an action: identity, four-momentum and
/// four-position.
///
/// The momentum may be off-shell (broad resonances); the mass is always the
/// derived invariant mass of the momentum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleData {
    /// Unique within the running simulation; [`ParticleData::UNASSIGNED_ID`]
    /// for particles produced by an action until the simulation state
    /// registers them.
    pub id: i64,
    pub pdg: PdgCode,
    pub momentum: FourVector,
    pub position: FourVector,
}

/// Ordered sequence of particles: the incoming or outgoing side of an action.
pub type ParticleList = Vec<ParticleData>;

impl ParticleData {
    pub const UNASSIGNED_ID: i64 = -1;

    /// New particle of a known species, at rest at the origin, with its pole
    /// mass.
    pub fn new(pdg: PdgCode) -> ActionResult<Self> {
        let ptype = ParticleType::find(pdg)?;
        Ok(Self {
            id: Self::UNASSIGNED_ID,
            pdg,
            momentum: FourVector::new(ptype.mass, 0.0, 0.0, 0.0),
            position: FourVector::default(),
        })
    }

    /// Particle created by an action, not yet registered with the simulation
    /// state. The species is not looked up.
    pub fn produced(pdg: PdgCode, momentum: FourVector) -> Self {
        Self {
            id: Self::UNASSIGNED_ID,
            pdg,
            momentum,
            position: FourVector::default(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn with_momentum(mut self, momentum: FourVector) -> Self {
        self.momentum = momentum;
        self
    }

    pub fn with_position(mut self, position: FourVector) -> Self {
        self.position = position;
        self
    }

    /// Sets an on-shell four-momentum for `mass` and three-momentum `p`.
    pub fn set_4momentum(&mut self, mass: f64, p: &Vector3<f64>) {
        self.momentum = FourVector::on_shell(mass, p);
    }

    pub fn particle_type(&self) -> ActionResult<&'static ParticleType> {
        ParticleType::find(self.pdg)
    }

    /// Invariant mass of the current four-momentum.
    pub fn effective_mass(&self) -> f64 {
        self.momentum.abs()
    }

    pub fn velocity(&self) -> Vector3<f64> {
        self.momentum.velocity()
    }

    /// Lorentz factor of the particle's motion.
    pub fn gamma(&self) -> f64 {
        let m = self.effective_mass();
        if m > 0.0 {
            self.momentum.x0 / m
        } else {
            f64::INFINITY
        }
    }
}

impl fmt::Display for ParticleData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} m={:.4} p={} x={}",
            self.id,
            self.pdg,
            self.effective_mass(),
            self.momentum,
            self.position
        )
    }
}
