// Two-body collisions: channel enumeration, selection and final states.

use nalgebra::Vector3;
use rand::{Rng, RngCore};
use std::f64::consts::PI;
use std::fmt;

use crate::action::{format_species, Action, ActionBase};
use crate::branch::{choose_branch, retain_above, total_weight, CollisionBranch, ProcessType};
use crate::config::Config;
use crate::error::{ActionError, ActionResult};
use crate::fourvector::FourVector;
use crate::kinematics::{
    cugnon_slope, isotropic_direction, pcm, rotate_direction_3d, sample_exponential_cos_theta,
    sample_two_body_masses, split_two_body, FM2_MB, HBARC,
};
use crate::particle::{ParticleData, ParticleList};
use crate::particletype::{DecayKind, ParticleType};
use crate::pdgcode::PdgCode;
use crate::{scatter_baryon_meson, scatter_nucleon_kaon, scatter_nucleon_nucleon};

/// A channel is open when `sqrt(s)` exceeds its threshold by more than this
/// amount (GeV).
pub const THRESHOLD_EPSILON: f64 = 1e-9;

/// Which family of parametrizations describes a colliding pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScatterKind {
    NucleonNucleon,
    NucleonKaon,
    /// Pion-nucleon.
    BaryonMeson,
    /// No measured data; only the configured constant elastic cross section
    /// and resonance formation.
    Generic,
}

impl ScatterKind {
    pub fn classify(a: PdgCode, b: PdgCode) -> Self {
        if scatter_nucleon_nucleon::involves(a, b) {
            ScatterKind::NucleonNucleon
        } else if scatter_nucleon_kaon::involves(a, b) {
            ScatterKind::NucleonKaon
        } else if scatter_baryon_meson::involves(a, b) {
            ScatterKind::BaryonMeson
        } else {
            ScatterKind::Generic
        }
    }

    fn elastic_parametrization(self, a: PdgCode, b: PdgCode, mandelstam_s: f64) -> Option<f64> {
        match self {
            ScatterKind::NucleonNucleon => {
                scatter_nucleon_nucleon::elastic_parametrization(a, b, mandelstam_s)
            }
            ScatterKind::NucleonKaon => scatter_nucleon_kaon::elastic_parametrization(a, b, mandelstam_s),
            ScatterKind::BaryonMeson => scatter_baryon_meson::elastic_parametrization(a, b, mandelstam_s),
            ScatterKind::Generic => None,
        }
    }

    fn two_to_two_branches(self, a: PdgCode, b: PdgCode, sqrts: f64) -> Vec<CollisionBranch> {
        match self {
            ScatterKind::NucleonNucleon => scatter_nucleon_nucleon::two_to_two_branches(a, b, sqrts),
            ScatterKind::NucleonKaon => scatter_nucleon_kaon::two_to_two_branches(a, b, sqrts),
            ScatterKind::BaryonMeson | ScatterKind::Generic => Vec::new(),
        }
    }
}

/// Relativistic Breit-Wigner spectral function, normalized to unit integral
/// over `m`.
pub fn spectral_function(pole_mass: f64, width: f64, m: f64) -> f64 {
    let m2 = m * m;
    let d = m2 - pole_mass * pole_mass;
    2.0 / PI * m2 * width / (d * d + m2 * width * width)
}

/// Collision of two particles.
#[derive(Debug, Clone)]
pub struct ScatterAction {
    base: ActionBase,
    kind: ScatterKind,
    config: Config,
    branches: Vec<CollisionBranch>,
    total_cross_section: Option<f64>,
    process: Option<ProcessType>,
}

impl ScatterAction {
    /// Sets up the collision of `a` and `b` at `time_of_execution`.
    ///
    /// Fails when a species is unknown, or when the pair has no elastic
    /// parametrization and the configuration supplies no constant elastic
    /// cross section.
    pub fn new(
        a: ParticleData,
        b: ParticleData,
        time_of_execution: f64,
        config: &Config,
    ) -> ActionResult<Self> {
        ParticleType::find(a.pdg)?;
        ParticleType::find(b.pdg)?;
        let kind = ScatterKind::classify(a.pdg, b.pdg);
        if kind == ScatterKind::Generic && config.elastic_cross_section.is_none() {
            return Err(ActionError::UnknownParametrization { a: a.pdg, b: b.pdg });
        }
        Ok(Self {
            base: ActionBase::new(vec![a, b], time_of_execution),
            kind,
            config: config.clone(),
            branches: Vec::new(),
            total_cross_section: None,
            process: None,
        })
    }

    pub fn kind(&self) -> ScatterKind {
        self.kind
    }

    /// Centre-of-mass energy of the pair in GeV.
    pub fn sqrt_s(&self) -> f64 {
        self.base.sqrt_s()
    }

    fn pair(&self) -> (&ParticleData, &ParticleData) {
        let incoming = self.base.incoming();
        (&incoming[0], &incoming[1])
    }

    /// Elastic cross section of the pair at the current `sqrt(s)` in mb: the
    /// configured constant if set, otherwise the fit to measured data for
    /// this pair.
    pub fn elastic_parametrization(&self) -> f64 {
        if let Some(sigma) = self.config.elastic_cross_section {
            return sigma;
        }
        let (a, b) = self.pair();
        let s = self.sqrt_s().powi(2);
        self.kind
            .elastic_parametrization(a.pdg, b.pdg, s)
            .unwrap_or(0.0)
    }

    /// Partial cross sections of the open channels, in enumeration order.
    /// Empty until the total weight has been evaluated.
    pub fn cross_sections(&self) -> &[CollisionBranch] {
        &self.branches
    }

    fn elastic_branch(&self, sqrts: f64) -> Option<CollisionBranch> {
        let (a, b) = self.pair();
        if sqrts <= a.effective_mass() + b.effective_mass() + THRESHOLD_EPSILON {
            return None;
        }
        Some(CollisionBranch {
            products: vec![a.pdg, b.pdg],
            weight: self.elastic_parametrization(),
            process: ProcessType::Elastic,
        })
    }

    /// Formation of every unstable species that decays into the incoming
    /// pair, in species-table order.
    fn resonance_formation_branches(&self, sqrts: f64) -> Vec<CollisionBranch> {
        let (a, b) = self.pair();
        let (ma, mb) = (a.effective_mass(), b.effective_mass());
        if sqrts <= ma + mb + THRESHOLD_EPSILON {
            return Vec::new();
        }
        let p_cm = pcm(sqrts, ma, mb);
        let (Some(ta), Some(tb)) = (ParticleType::try_find(a.pdg), ParticleType::try_find(b.pdg))
        else {
            return Vec::new();
        };
        let spin_in = ta.spin_degeneracy() * tb.spin_degeneracy();
        let symmetry = if a.pdg == b.pdg { 2.0 } else { 1.0 };
        let to_mb = HBARC * HBARC / FM2_MB;

        ParticleType::list_all()
            .iter()
            .filter(|resonance| !resonance.is_stable())
            .filter_map(|resonance| {
                let mode = resonance.two_body_mode(a.pdg, b.pdg)?;
                let gamma_in = resonance.partial_width(mode, sqrts);
                if gamma_in <= 0.0 {
                    return None;
                }
                let gamma_total = resonance.total_width(sqrts, DecayKind::Hadronic);
                let sigma = resonance.spin_degeneracy() / spin_in
                    * symmetry
                    * 2.0
                    * PI
                    * PI
                    / (p_cm * p_cm)
                    * gamma_in
                    * spectral_function(resonance.mass, gamma_total, sqrts)
                    * to_mb;
                Some(CollisionBranch {
                    products: vec![resonance.pdg],
                    weight: sigma,
                    process: ProcessType::TwoToOne,
                })
            })
            .collect()
    }

    fn inelastic_branches(&self, sqrts: f64) -> Vec<CollisionBranch> {
        let (a, b) = self.pair();
        self.kind
            .two_to_two_branches(a.pdg, b.pdg, sqrts)
            .into_iter()
            .filter(|branch| {
                let threshold: f64 = branch
                    .products
                    .iter()
                    .map(|pdg| ParticleType::try_find(*pdg).map_or(f64::INFINITY, |t| t.min_mass_kinetic()))
                    .sum();
                sqrts > threshold + THRESHOLD_EPSILON
            })
            .collect()
    }

    fn enumerate_branches(&self) -> Vec<CollisionBranch> {
        let sqrts = self.sqrt_s();
        let mut branches: Vec<CollisionBranch> = self.elastic_branch(sqrts).into_iter().collect();
        if self.config.two_to_one {
            branches.extend(self.resonance_formation_branches(sqrts));
        }
        if self.config.two_to_two {
            branches.extend(self.inelastic_branches(sqrts));
        }
        let before = branches.len();
        retain_above(&mut branches, self.config.low_weight_cutoff);
        if branches.len() < before {
            tracing::trace!(
                "Dropped {} channel(s) below {} mb",
                before - branches.len(),
                self.config.low_weight_cutoff
            );
        }
        for branch in &branches {
            tracing::trace!(
                "{} -> {} ({}): {:.4} mb at sqrt(s) = {:.4} GeV",
                format_species(self.base.incoming()),
                branch
                    .products
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(" + "),
                branch.process,
                branch.weight,
                sqrts
            );
        }
        branches
    }

    fn elastic_final_state<R: Rng + ?Sized>(&self, rng: &mut R) -> ParticleList {
        let (a, b) = self.pair();
        let (ma, mb) = (a.effective_mass(), b.effective_mass());
        let total = self.base.total_momentum();
        let sqrts = total.abs();
        let direction = if self.kind == ScatterKind::NucleonNucleon && self.config.anisotropic_nn {
            let axis = a.momentum.lorentz_boost(&total.velocity()).threevec();
            let axis = if axis.norm() > 0.0 {
                axis.normalize()
            } else {
                Vector3::z()
            };
            let mu = sample_exponential_cos_theta(cugnon_slope(sqrts), pcm(sqrts, ma, mb), rng);
            let phi = rng.gen_range(0.0..2.0 * PI);
            rotate_direction_3d(&axis, mu, phi)
        } else {
            isotropic_direction(rng)
        };
        let (pa, pb) = split_two_body(&total, ma, mb, &direction);
        vec![a.clone().with_momentum(pa), b.clone().with_momentum(pb)]
    }

    fn two_to_two_final_state<R: Rng + ?Sized>(
        &self,
        branch: &CollisionBranch,
        rng: &mut R,
    ) -> ParticleList {
        let total = self.base.total_momentum();
        let sqrts = total.abs();
        let (first, second) = (branch.products[0], branch.products[1]);
        let (m1, m2) = match (ParticleType::try_find(first), ParticleType::try_find(second)) {
            (Some(t1), Some(t2)) => sample_two_body_masses(t1, t2, sqrts, rng),
            _ => panic!("collision channel into unknown species {} + {}", first, second),
        };
        let direction = isotropic_direction(rng);
        let (p1, p2) = split_two_body(&total, m1, m2, &direction);
        vec![
            ParticleData::produced(first, p1),
            ParticleData::produced(second, p2),
        ]
    }

    fn resonance_final_state(&self, branch: &CollisionBranch) -> ParticleList {
        vec![ParticleData::produced(branch.products[0], self.base.total_momentum())]
    }
}

impl Action for ScatterAction {
    fn base(&self) -> &ActionBase {
        &self.base
    }

    fn total_weight(&mut self) -> f64 {
        if let Some(sigma) = self.total_cross_section {
            return sigma;
        }
        self.branches = self.enumerate_branches();
        let sigma = total_weight(&self.branches);
        self.total_cross_section = Some(sigma);
        self.base.mark_weight_evaluated();
        sigma
    }

    fn raw_weight_value(&self) -> f64 {
        self.total_cross_section.unwrap_or(0.0)
    }

    fn generate_final_state(&mut self, rng: &mut dyn RngCore) {
        self.base.assert_ready_to_resolve(
            self.total_cross_section.unwrap_or(0.0),
            "ScatterAction::generate_final_state",
        );
        let Some(branch) = choose_branch(&self.branches, rng).cloned() else {
            panic!("no collision channel to choose from despite a positive cross section");
        };
        tracing::debug!(
            "Chose {} channel of {} ({:.4} of {:.4} mb)",
            branch.process,
            format_species(self.base.incoming()),
            branch.weight,
            self.raw_weight_value()
        );
        let outgoing = match branch.process {
            ProcessType::Elastic => self.elastic_final_state(rng),
            ProcessType::TwoToOne => self.resonance_final_state(&branch),
            ProcessType::TwoToTwo => self.two_to_two_final_state(&branch, rng),
            ProcessType::Decay | ProcessType::DileptonDecay => {
                panic!("collision channel classified as {}", branch.process)
            }
        };
        self.process = Some(branch.process);
        self.base.resolve(outgoing);
        tracing::debug!("{}", self);
        #[cfg(debug_assertions)]
        self.base.assert_conserved(self.config.conservation_tolerance, self);
    }

    fn process_type(&self) -> Option<ProcessType> {
        self.process
    }
}

impl fmt::Display for ScatterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scatter[{:?}] {} at t = {:.4} fm, sqrt(s) = {:.4} GeV",
            self.kind,
            format_species(self.base.incoming()),
            self.base.time_of_execution(),
            self.sqrt_s()
        )?;
        if let Some(sigma) = self.total_cross_section {
            write!(f, ", sigma = {:.4} mb", sigma)?;
        }
        if let Some(process) = self.process {
            let masses: Vec<String> = self
                .base
                .outgoing()
                .iter()
                .map(|p| format!("{:.4}", p.effective_mass()))
                .collect();
            write!(
                f,
                " -> {} ({}, m = [{}])",
                format_species(self.base.outgoing()),
                process,
                masses.join(", ")
            )?;
        }
        Ok(())
    }
}

/// Projectile `a` with beam momentum `p_lab` along z and target `b` at rest,
/// both at the origin with their pole masses.
pub fn fixed_target_pair(
    a: PdgCode,
    b: PdgCode,
    p_lab: f64,
) -> ActionResult<(ParticleData, ParticleData)> {
    let ma = ParticleType::find(a)?.mass;
    let projectile = ParticleData::new(a)?.with_momentum(FourVector::on_shell(ma, &Vector3::new(0.0, 0.0, p_lab)));
    let target = ParticleData::new(b)?;
    Ok((projectile, target))
}
