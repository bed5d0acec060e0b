// Hadronic decay of a single resonance.

use rand::{Rng, RngCore};
use std::fmt;

use crate::action::{format_species, Action, ActionBase};
use crate::branch::{choose_branch, retain_above, total_weight, DecayBranch, ProcessType};
#[cfg(debug_assertions)]
use crate::config::DEFAULT_CONSERVATION_TOLERANCE;
use crate::error::{ActionError, ActionResult};
use crate::kinematics::{
    isotropic_direction, sample_three_body_mass, sample_two_body_masses, split_three_body,
    split_two_body,
};
use crate::particle::{ParticleData, ParticleList};
use crate::particletype::{mass_of, DecayKind, DecayMode, ParticleType};
use crate::scatter::THRESHOLD_EPSILON;

/// Whether `mode` can be reached from a parent of mass `m`, given the
/// lightest masses its products can have.
pub fn mode_is_open(mode: &DecayMode, m: f64) -> bool {
    let threshold: f64 = mode
        .products
        .iter()
        .map(|pdg| ParticleType::try_find(*pdg).map_or(f64::INFINITY, |t| t.min_mass_kinetic()))
        .sum();
    m > threshold + THRESHOLD_EPSILON
}

/// Two-body decay of `parent` into `mode`; unstable products get a sampled
/// mass, emission is isotropic in the parent rest frame.
pub(crate) fn one_to_two<R: Rng + ?Sized>(
    parent: &ParticleData,
    mode: &DecayMode,
    rng: &mut R,
) -> ParticleList {
    let total = parent.momentum;
    let (first, second) = (mode.products[0], mode.products[1]);
    let (m1, m2) = match (ParticleType::try_find(first), ParticleType::try_find(second)) {
        (Some(t1), Some(t2)) => sample_two_body_masses(t1, t2, total.abs(), rng),
        _ => panic!("decay into unknown species {} + {}", first, second),
    };
    let (p1, p2) = split_two_body(&total, m1, m2, &isotropic_direction(rng));
    vec![ParticleData::produced(first, p1), ParticleData::produced(second, p2)]
}

/// Three-body decay of `parent` into `mode` following flat phase space.
fn one_to_three<R: Rng + ?Sized>(parent: &ParticleData, mode: &DecayMode, rng: &mut R) -> ParticleList {
    let total = parent.momentum;
    let masses = [
        mass_of(mode.products[0]),
        mass_of(mode.products[1]),
        mass_of(mode.products[2]),
    ];
    let m12 = sample_three_body_mass(total.abs(), masses[0], masses[1], masses[2], rng);
    let momenta = split_three_body(&total, masses, m12, rng);
    mode.products
        .iter()
        .zip(momenta.iter())
        .map(|(pdg, p)| ParticleData::produced(*pdg, *p))
        .collect()
}

/// Decay of one resonance through its hadronic modes.
#[derive(Debug, Clone)]
pub struct DecayAction {
    base: ActionBase,
    branches: Vec<DecayBranch>,
    supplied: bool,
    total_width: Option<f64>,
    chosen: Option<DecayMode>,
}

impl DecayAction {
    /// Decay of `particle` through the hadronic modes of its species, with
    /// partial widths evaluated at its current invariant mass.
    pub fn new(particle: ParticleData, time_of_execution: f64) -> ActionResult<Self> {
        particle.particle_type()?;
        Ok(Self {
            base: ActionBase::new(vec![particle], time_of_execution),
            branches: Vec::new(),
            supplied: false,
            total_width: None,
            chosen: None,
        })
    }

    /// Decay of `particle` through an externally supplied list of channels;
    /// weights are partial widths in GeV.
    pub fn from_branches(
        particle: ParticleData,
        time_of_execution: f64,
        branches: Vec<DecayBranch>,
    ) -> ActionResult<Self> {
        particle.particle_type()?;
        for branch in &branches {
            for pdg in &branch.mode.products {
                ParticleType::find(*pdg)?;
            }
            if !(2..=3).contains(&branch.mode.multiplicity()) {
                return Err(ActionError::InvalidConfig(format!(
                    "decay channels need two or three products, got {}",
                    branch.mode.multiplicity()
                )));
            }
        }
        Ok(Self {
            base: ActionBase::new(vec![particle], time_of_execution),
            branches,
            supplied: true,
            total_width: None,
            chosen: None,
        })
    }

    pub fn particle(&self) -> &ParticleData {
        &self.base.incoming()[0]
    }

    /// Open channels at the particle's mass, in enumeration order. Empty
    /// until the total weight has been evaluated.
    pub fn branches(&self) -> &[DecayBranch] {
        &self.branches
    }

    /// The channel the final state was generated in.
    pub fn chosen_mode(&self) -> Option<&DecayMode> {
        self.chosen.as_ref()
    }
}

impl Action for DecayAction {
    fn base(&self) -> &ActionBase {
        &self.base
    }

    fn total_weight(&mut self) -> f64 {
        if let Some(width) = self.total_width {
            return width;
        }
        let m = self.particle().effective_mass();
        let mut branches = if self.supplied {
            std::mem::take(&mut self.branches)
        } else {
            self.particle()
                .particle_type()
                .map(|t| t.decay_branches(m, DecayKind::Hadronic))
                .unwrap_or_default()
        };
        branches.retain(|branch| mode_is_open(&branch.mode, m));
        retain_above(&mut branches, 0.0);
        let width = total_weight(&branches);
        tracing::trace!(
            "{} at m = {:.4} GeV: {} open channel(s), width {:.4e} GeV",
            self.particle().pdg,
            m,
            branches.len(),
            width
        );
        self.branches = branches;
        self.total_width = Some(width);
        self.base.mark_weight_evaluated();
        width
    }

    fn raw_weight_value(&self) -> f64 {
        self.total_width.unwrap_or(0.0)
    }

    fn generate_final_state(&mut self, rng: &mut dyn RngCore) {
        self.base.assert_ready_to_resolve(
            self.total_width.unwrap_or(0.0),
            "DecayAction::generate_final_state",
        );
        let Some(mode) = choose_branch(&self.branches, rng).map(|b| b.mode.clone()) else {
            panic!("no decay channel to choose from despite a positive width");
        };
        let parent = self.particle().clone();
        let outgoing = match mode.multiplicity() {
            2 => one_to_two(&parent, &mode, rng),
            3 => one_to_three(&parent, &mode, rng),
            n => panic!("{}-body decays are not supported", n),
        };
        self.chosen = Some(mode);
        self.base.resolve(outgoing);
        tracing::debug!("{}", self);
        #[cfg(debug_assertions)]
        self.base.assert_conserved(DEFAULT_CONSERVATION_TOLERANCE, self);
    }

    fn process_type(&self) -> Option<ProcessType> {
        Some(ProcessType::Decay)
    }
}

impl fmt::Display for DecayAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Decay {} (m = {:.4} GeV) at t = {:.4} fm",
            self.particle().pdg,
            self.particle().effective_mass(),
            self.base.time_of_execution()
        )?;
        if let Some(width) = self.total_width {
            write!(f, ", width = {:.4e} GeV", width)?;
        }
        if self.is_resolved() {
            write!(f, " -> {}", format_species(self.base.outgoing()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fourvector::FourVector;
    use crate::pdgcode::PdgCode;
    use nalgebra::Vector3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn moving(pdg: PdgCode, mass: f64) -> ParticleData {
        ParticleData::new(pdg)
            .unwrap()
            .with_momentum(FourVector::on_shell(mass, &Vector3::new(0.3, -0.2, 1.1)))
            .with_position(FourVector::new(2.0, 1.0, 1.0, 1.0))
    }

    #[test]
    fn test_stable_particle_has_zero_width() {
        let mut action = DecayAction::new(ParticleData::new(PdgCode::PROTON).unwrap(), 1.0).unwrap();
        assert_eq!(action.total_weight(), 0.0);
        assert!(action.branches().is_empty());
    }

    #[test]
    fn test_delta_below_threshold_does_not_decay() {
        let mut action = DecayAction::new(moving(PdgCode::DELTA_PLUS_PLUS, 1.0), 1.0).unwrap();
        assert_eq!(action.total_weight(), 0.0);
    }

    fn supplied(products: &[PdgCode], weight: f64) -> DecayBranch {
        DecayBranch {
            mode: DecayMode {
                products: products.to_vec(),
                branching_ratio: 1.0,
                angular_momentum: 1,
                kind: DecayKind::Hadronic,
            },
            weight,
        }
    }

    #[test]
    fn test_tiny_supplied_width_is_kept() {
        // collision cutoffs do not apply to decay channels
        let branches = vec![supplied(&[PdgCode::PROTON, PdgCode::PI_ZERO], 1e-9)];
        let particle = ParticleData::new(PdgCode::DELTA_PLUS).unwrap();
        let mut action = DecayAction::from_branches(particle, 0.0, branches).unwrap();
        assert_eq!(action.total_weight(), 1e-9);
        assert_eq!(action.branches().len(), 1);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "Conservation violated")]
    fn test_charge_violating_channel_is_caught() {
        let branches = vec![supplied(&[PdgCode::PROTON, PdgCode::PI_PLUS], 1.0)];
        let particle = ParticleData::new(PdgCode::DELTA_PLUS).unwrap();
        let mut action = DecayAction::from_branches(particle, 0.0, branches).unwrap();
        action.total_weight();
        action.generate_final_state(&mut StdRng::seed_from_u64(5));
    }

    #[test]
    fn test_two_body_decay_preserves_invariant_mass() {
        let mut action = DecayAction::new(moving(PdgCode::DELTA_ZERO, 1.3), 1.0).unwrap();
        assert!(action.total_weight() > 0.0);
        action.generate_final_state(&mut StdRng::seed_from_u64(21));
        let out = action.outgoing_particles();
        assert_eq!(out.len(), 2);
        let sum: FourVector = out.iter().map(|p| p.momentum).sum();
        assert!((sum.abs() - 1.3).abs() < 1e-9);
        assert!(out.iter().all(|p| p.position.x0 == 1.0));
        assert!(action.check_conservation(1e-9).is_ok());
    }

    #[test]
    fn test_three_body_decay() {
        let omega = ParticleType::find(PdgCode::OMEGA).unwrap();
        let branches = vec![DecayBranch {
            mode: omega.decay_modes[0].clone(),
            weight: 0.0076,
        }];
        let mut action =
            DecayAction::from_branches(moving(PdgCode::OMEGA, 0.78265), 0.0, branches).unwrap();
        action.total_weight();
        action.generate_final_state(&mut StdRng::seed_from_u64(5));
        assert_eq!(action.outgoing_particles().len(), 3);
        assert_eq!(action.chosen_mode().map(|m| m.multiplicity()), Some(3));
        assert!(action.check_conservation(1e-9).is_ok());
    }

    #[test]
    fn test_from_branches_rejects_unknown_products() {
        let mode = DecayMode {
            products: vec![PdgCode::PROTON, PdgCode(999_999)],
            branching_ratio: 1.0,
            angular_momentum: 0,
            kind: DecayKind::Hadronic,
        };
        let result = DecayAction::from_branches(
            moving(PdgCode::DELTA_PLUS, 1.232),
            0.0,
            vec![DecayBranch { mode, weight: 1.0 }],
        );
        assert!(matches!(result, Err(ActionError::UnknownSpecies(_))));
    }

    #[test]
    #[should_panic(expected = "already resolved")]
    fn test_second_resolution_panics() {
        let mut action = DecayAction::new(moving(PdgCode::DELTA_PLUS, 1.232), 0.0).unwrap();
        action.total_weight();
        let mut rng = StdRng::seed_from_u64(1);
        action.generate_final_state(&mut rng);
        action.generate_final_state(&mut rng);
    }
}
