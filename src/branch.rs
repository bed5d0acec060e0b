use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::particletype::DecayMode;
use crate::pdgcode::PdgCode;

/// Process classification of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessType {
    Elastic,
    /// Resonance formation.
    TwoToOne,
    /// Inelastic two-body scattering.
    TwoToTwo,
    Decay,
    /// Perturbative (shining) dilepton decay.
    DileptonDecay,
}

impl fmt::Display for ProcessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProcessType::Elastic => "elastic",
            ProcessType::TwoToOne => "2->1",
            ProcessType::TwoToTwo => "2->2",
            ProcessType::Decay => "decay",
            ProcessType::DileptonDecay => "dilepton decay",
        };
        f.write_str(s)
    }
}

/// Anything that can take part in a weighted channel choice.
pub trait Branch {
    fn weight(&self) -> f64;
}

/// One outgoing channel of a two-body collision; `weight` is the partial
/// cross section in mb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionBranch {
    pub products: Vec<PdgCode>,
    pub weight: f64,
    pub process: ProcessType,
}

impl Branch for CollisionBranch {
    fn weight(&self) -> f64 {
        self.weight
    }
}

/// One decay channel; `weight` is the partial width in GeV at the mass the
/// branch was evaluated for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayBranch {
    pub mode: DecayMode,
    pub weight: f64,
}

impl Branch for DecayBranch {
    fn weight(&self) -> f64 {
        self.weight
    }
}

pub fn total_weight<B: Branch>(branches: &[B]) -> f64 {
    branches.iter().map(Branch::weight).sum()
}

/// Picks a branch with probability proportional to its weight.
///
/// A single uniform number `ξ ∈ [0, Σw)` is drawn and the first branch of
/// positive weight whose running sum reaches `ξ` wins, so a `ξ` on the
/// boundary between two branches goes to the one enumerated first. Returns
/// `None` when the total weight is not positive.
pub fn choose_branch<'a, B: Branch, R: Rng + ?Sized>(
    branches: &'a [B],
    rng: &mut R,
) -> Option<&'a B> {
    let total = total_weight(branches);
    if total <= 0.0 {
        return None;
    }
    let xi = rng.gen::<f64>() * total;
    let mut accum = 0.0;
    for branch in branches {
        accum += branch.weight();
        if branch.weight() > 0.0 && xi <= accum {
            return Some(branch);
        }
    }
    // roundoff can leave ξ just above the last running sum
    branches.iter().rev().find(|b| b.weight() > 0.0)
}

/// Drops branches whose weight does not exceed `cutoff`.
pub fn retain_above<B: Branch>(branches: &mut Vec<B>, cutoff: f64) {
    branches.retain(|b| b.weight() > cutoff);
}
