use crate::fourvector::FourVector;
use crate::particle::ParticleData;
use crate::particletype::ParticleType;

/// Additive conserved quantities of a set of particles.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuantumNumbers {
    pub momentum: FourVector,
    pub charge: i32,
    pub baryon_number: i32,
    pub strangeness: i32,
}

impl QuantumNumbers {
    pub fn from_particles(particles: &[ParticleData]) -> Self {
        particles.iter().fold(Self::default(), |mut acc, p| {
            acc.momentum += p.momentum;
            if let Some(ptype) = ParticleType::try_find(p.pdg) {
                acc.charge += ptype.charge;
                acc.baryon_number += ptype.baryon_number;
                acc.strangeness += ptype.strangeness;
            }
            acc
        })
    }

    /// Human-readable list of the quantities in which `self` and `other`
    /// differ; empty when they agree (momentum within `tolerance`).
    pub fn report_deviations(&self, other: &QuantumNumbers, tolerance: f64) -> String {
        let mut report = Vec::new();
        let dp = self.momentum.max_abs_diff(&other.momentum);
        if dp > tolerance {
            report.push(format!(
                "four-momentum {} vs {} (|Δ| = {:.3e})",
                self.momentum, other.momentum, dp
            ));
        }
        if self.charge != other.charge {
            report.push(format!("charge {} vs {}", self.charge, other.charge));
        }
        if self.baryon_number != other.baryon_number {
            report.push(format!(
                "baryon number {} vs {}",
                self.baryon_number, other.baryon_number
            ));
        }
        if self.strangeness != other.strangeness {
            report.push(format!("strangeness {} vs {}", self.strangeness, other.strangeness));
        }
        report.join("; ")
    }
}
