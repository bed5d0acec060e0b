//! Perturbative dilepton decays.
//!
//! Dileptons are radiated from every vector and pseudoscalar meson at every
//! time step rather than at their true, much smaller, rate. Each such
//! decay carries a *shining weight* `Δt·Γ/(ħc·γ)` that restores the
//! physical yield, fixed when the action is built.
//!
//! Direct decays (`ρ, ω, φ -> l⁺l⁻`) need nothing more. For Dalitz decays
//! (`π0, η -> γ l⁺l⁻`, `ω -> π0 l⁺l⁻`) the dilepton mass is drawn uniformly
//! over its kinematic range, and the event is corrected by the *branching*
//!
//! ```text
//! branching = (m_max - m_min) · dΓ/dm(m_ll) / Γ_int
//! ```
//!
//! an importance weight with unit mean over the sampled masses. The weight is
//! modelled as [`DileptonWeight`], whose [`Branching`] moves from `Pending`
//! to its final value exactly once.

use rand::{Rng, RngCore};
use std::f64::consts::PI;
use std::fmt;

use crate::action::{format_species, Action, ActionBase};
use crate::branch::{choose_branch, retain_above, total_weight, DecayBranch, ProcessType};
#[cfg(debug_assertions)]
use crate::config::DEFAULT_CONSERVATION_TOLERANCE;
use crate::decay::{mode_is_open, one_to_two};
use crate::error::ActionResult;
use crate::kinematics::{pcm, split_three_body, HBARC};
use crate::particle::{ParticleData, ParticleList};
use crate::particletype::{dilepton_phase_space, mass_of, DecayKind, DecayMode, ParticleType};
use crate::pdgcode::PdgCode;

/// Fine-structure constant.
pub const ALPHA: f64 = 1.0 / 137.035999;

/// Slope of the π0 transition form factor, GeV⁻².
const PI0_FORM_FACTOR_SLOPE: f64 = 5.5;
/// Pole mass of the η transition form factor, GeV.
const ETA_FORM_FACTOR_LAMBDA: f64 = 0.716;
/// Pole mass and width of the ω -> π0 transition form factor, GeV.
const OMEGA_FORM_FACTOR_LAMBDA: f64 = 0.65;
const OMEGA_FORM_FACTOR_WIDTH: f64 = 0.075;

/// Intervals of the Simpson rule used for integrated Dalitz widths.
const INTEGRATION_INTERVALS: usize = 2000;

/// Shining weight of a dilepton decay of a particle with width `width` (GeV)
/// and Lorentz factor `gamma`, radiated once per time step `time_step` (fm).
pub fn shining_weight(time_step: f64, width: f64, gamma: f64) -> f64 {
    time_step * width / (HBARC * gamma)
}

/// Correction applied once the dilepton mass is known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Branching {
    /// No final state generated yet.
    Pending,
    /// Two-body decay: no correction.
    Direct,
    /// Dalitz decay at the sampled dilepton mass.
    Differential { dilepton_mass: f64, ratio: f64 },
}

impl Branching {
    pub fn value(&self) -> f64 {
        match self {
            Branching::Pending | Branching::Direct => 1.0,
            Branching::Differential { ratio, .. } => *ratio,
        }
    }
}

/// Two-phase event weight of a dilepton decay: the shining weight known at
/// construction and the branching known after the final state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DileptonWeight {
    pub shining_weight: f64,
    pub branching: Branching,
}

impl DileptonWeight {
    pub fn new(shining_weight: f64) -> Self {
        Self {
            shining_weight,
            branching: Branching::Pending,
        }
    }

    pub fn is_final(&self) -> bool {
        self.branching != Branching::Pending
    }

    /// `shining_weight × branching`.
    pub fn value(&self) -> f64 {
        self.shining_weight * self.branching.value()
    }
}

/// The hadron and lepton products of a Dalitz mode as
/// `(hadron index, lepton indices)`.
fn dalitz_layout(mode: &DecayMode) -> Option<(usize, [usize; 2])> {
    let hadron = mode.products.iter().position(|p| !p.is_lepton())?;
    let mut leptons = (0..3).filter(|&i| i != hadron);
    Some((hadron, [leptons.next()?, leptons.next()?]))
}

/// Width of the radiative two-body mode `parent -> products` at the pole.
fn radiative_width(parent: &ParticleType, products: [PdgCode; 2]) -> f64 {
    parent
        .two_body_mode(products[0], products[1])
        .map_or(0.0, |mode| parent.width * mode.branching_ratio)
}

/// Differential width `dΓ/dm` of the Dalitz decay of `parent` (at mass
/// `big_m`) into `mode`, at dilepton mass `m`.
///
/// Pseudoscalar decays into a photon follow Kroll-Wada with the measured
/// transition form factor; `ω -> π0 l⁺l⁻` follows vector meson dominance;
/// other modes are shaped by their phase space.
pub fn diff_width(parent: &ParticleType, mode: &DecayMode, big_m: f64, m: f64) -> f64 {
    let Some((hadron_index, lepton_indices)) = dalitz_layout(mode) else {
        return 0.0;
    };
    let hadron = mode.products[hadron_index];
    let ml = mass_of(mode.products[lepton_indices[0]]);
    let m_x = mass_of(hadron);
    if m <= 2.0 * ml || m >= big_m - m_x {
        return 0.0;
    }
    let leptons = dilepton_phase_space(m, ml);
    match (parent.pdg, hadron) {
        (PdgCode::PI_ZERO, PdgCode::PHOTON) | (PdgCode::ETA, PdgCode::PHOTON) => {
            let form_factor = if parent.pdg == PdgCode::PI_ZERO {
                1.0 + PI0_FORM_FACTOR_SLOPE * m * m
            } else {
                1.0 / (1.0 - m * m / (ETA_FORM_FACTOR_LAMBDA * ETA_FORM_FACTOR_LAMBDA))
            };
            let gamma_gamma = radiative_width(parent, [PdgCode::PHOTON, PdgCode::PHOTON]);
            gamma_gamma * 4.0 * ALPHA / (3.0 * PI) / m
                * leptons
                * (1.0 - m * m / (big_m * big_m)).powi(3)
                * form_factor
                * form_factor
        }
        (PdgCode::OMEGA, PdgCode::PI_ZERO) => {
            let lambda2 = OMEGA_FORM_FACTOR_LAMBDA * OMEGA_FORM_FACTOR_LAMBDA;
            let form_factor2 = lambda2 * lambda2
                / ((lambda2 - m * m).powi(2) + lambda2 * OMEGA_FORM_FACTOR_WIDTH.powi(2));
            let d = big_m * big_m - m_x * m_x;
            let bracket = ((1.0 + m * m / d).powi(2) - 4.0 * big_m * big_m * m * m / (d * d)).max(0.0);
            let pi_gamma = radiative_width(parent, [PdgCode::PI_ZERO, PdgCode::PHOTON]);
            2.0 * ALPHA / (3.0 * PI) * pi_gamma / m * leptons * bracket.powf(1.5) * form_factor2
        }
        _ => {
            let p = pcm(big_m, m, m_x);
            parent.width * mode.branching_ratio * leptons * p / m
        }
    }
}

/// `dΓ/dm` integrated over the dilepton mass range, by Simpson's rule in
/// `ln m` (the integrand falls like `1/m` above threshold).
pub fn integrated_width(parent: &ParticleType, mode: &DecayMode, big_m: f64) -> f64 {
    let Some((hadron_index, lepton_indices)) = dalitz_layout(mode) else {
        return 0.0;
    };
    let lo = 2.0 * mass_of(mode.products[lepton_indices[0]]);
    let hi = big_m - mass_of(mode.products[hadron_index]);
    if hi <= lo || lo <= 0.0 {
        return 0.0;
    }
    let (u_lo, u_hi) = (lo.ln(), hi.ln());
    let n = INTEGRATION_INTERVALS;
    let h = (u_hi - u_lo) / n as f64;
    let integrand = |u: f64| {
        let m = u.exp();
        diff_width(parent, mode, big_m, m) * m
    };
    let inner: f64 = (1..n)
        .map(|i| {
            let factor = if i % 2 == 1 { 4.0 } else { 2.0 };
            factor * integrand(u_lo + i as f64 * h)
        })
        .sum();
    (integrand(u_lo) + inner + integrand(u_hi)) * h / 3.0
}

/// Importance weight of a Dalitz decay at dilepton mass `m` when `m` was
/// drawn uniformly over its kinematic range.
pub fn dalitz_branching(parent: &ParticleType, mode: &DecayMode, big_m: f64, m: f64) -> f64 {
    let Some((hadron_index, lepton_indices)) = dalitz_layout(mode) else {
        return 0.0;
    };
    let lo = 2.0 * mass_of(mode.products[lepton_indices[0]]);
    let hi = big_m - mass_of(mode.products[hadron_index]);
    let total = integrated_width(parent, mode, big_m);
    if total <= 0.0 {
        return 0.0;
    }
    (hi - lo) * diff_width(parent, mode, big_m, m) / total
}

/// Dilepton decay of one meson, weighted by its shining weight.
#[derive(Debug, Clone)]
pub struct DecayActionDilepton {
    base: ActionBase,
    ptype: &'static ParticleType,
    weight: DileptonWeight,
    branches: Vec<DecayBranch>,
    total_width: Option<f64>,
    channel: Option<DecayMode>,
}

impl DecayActionDilepton {
    pub fn new(particle: ParticleData, time_of_execution: f64, shining_weight: f64) -> ActionResult<Self> {
        let ptype = particle.particle_type()?;
        Ok(Self {
            base: ActionBase::new(vec![particle], time_of_execution),
            ptype,
            weight: DileptonWeight::new(shining_weight),
            branches: Vec::new(),
            total_width: None,
            channel: None,
        })
    }

    pub fn particle(&self) -> &ParticleData {
        &self.base.incoming()[0]
    }

    pub fn shining_weight(&self) -> f64 {
        self.weight.shining_weight
    }

    pub fn branching(&self) -> Branching {
        self.weight.branching
    }

    pub fn weight(&self) -> DileptonWeight {
        self.weight
    }

    pub fn branches(&self) -> &[DecayBranch] {
        &self.branches
    }

    pub fn channel(&self) -> Option<&DecayMode> {
        self.channel.as_ref()
    }

    /// Picks the dilepton channel, once. Returns the chosen mode.
    ///
    /// # Panics
    /// When the weight has not been evaluated or is zero.
    pub fn select_channel(&mut self, rng: &mut dyn RngCore) -> &DecayMode {
        let mode = match &self.channel {
            Some(mode) => mode.clone(),
            None => {
                self.base.assert_ready_to_resolve(
                    self.total_width.unwrap_or(0.0),
                    "DecayActionDilepton::select_channel",
                );
                let Some(mode) = choose_branch(&self.branches, rng).map(|b| b.mode.clone()) else {
                    panic!("no dilepton channel to choose from despite a positive width");
                };
                tracing::debug!(
                    "Chose {} dilepton channel of {}",
                    format_species_codes(&mode.products),
                    self.ptype.name
                );
                mode
            }
        };
        self.channel.get_or_insert(mode)
    }

    /// Samples the Dalitz final state: the dilepton mass uniformly over its
    /// range, then flat phase space at that mass, and fixes the branching.
    ///
    /// # Panics
    /// When no channel has been selected, the selected channel is not a
    /// three-body channel, or the action is already resolved.
    pub fn one_to_three(&mut self, rng: &mut dyn RngCore) {
        let Some(mode) = self.channel.clone() else {
            panic!("one_to_three called before a dilepton channel was selected");
        };
        if mode.multiplicity() != 3 {
            panic!("one_to_three called for a {}-body channel", mode.multiplicity());
        }
        if self.is_resolved() || self.weight.is_final() {
            panic!("one_to_three called on an already resolved action");
        }
        let Some((hadron_index, lepton_indices)) = dalitz_layout(&mode) else {
            panic!("Dalitz channel without a hadron and a lepton pair");
        };
        let parent = self.particle().clone();
        let ptype = self.ptype;
        let big_m = parent.effective_mass();
        let ml = mass_of(mode.products[lepton_indices[0]]);
        let m_x = mass_of(mode.products[hadron_index]);
        let (lo, hi) = (2.0 * ml, big_m - m_x);

        let integrated = integrated_width(ptype, &mode, big_m);
        if !(integrated > 0.0) {
            panic!("closed Dalitz channel {} selected", format_species_codes(&mode.products));
        }
        let (m_ll, ratio) = loop {
            // (0, 1] keeps the lower edge, where the width vanishes, out
            let u = 1.0 - rng.gen::<f64>();
            let m = lo + (hi - lo) * u;
            let ratio = (hi - lo) * diff_width(ptype, &mode, big_m, m) / integrated;
            if ratio > 0.0 {
                break (m, ratio);
            }
        };

        let momenta = split_three_body(&parent.momentum, [ml, ml, m_x], m_ll, rng);
        let mut outgoing: ParticleList = mode
            .products
            .iter()
            .map(|pdg| ParticleData::produced(*pdg, parent.momentum))
            .collect();
        outgoing[lepton_indices[0]].momentum = momenta[0];
        outgoing[lepton_indices[1]].momentum = momenta[1];
        outgoing[hadron_index].momentum = momenta[2];

        self.weight.branching = Branching::Differential {
            dilepton_mass: m_ll,
            ratio,
        };
        self.base.resolve(outgoing);
        tracing::debug!("{}", self);
        #[cfg(debug_assertions)]
        self.base.assert_conserved(DEFAULT_CONSERVATION_TOLERANCE, self);
    }
}

fn format_species_codes(codes: &[PdgCode]) -> String {
    codes
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(" + ")
}

impl Action for DecayActionDilepton {
    fn base(&self) -> &ActionBase {
        &self.base
    }

    fn total_weight(&mut self) -> f64 {
        if let Some(width) = self.total_width {
            return width;
        }
        let m = self.particle().effective_mass();
        let mut branches = self.ptype.decay_branches(m, DecayKind::Dilepton);
        branches.retain(|branch| mode_is_open(&branch.mode, m));
        retain_above(&mut branches, 0.0);
        let width = total_weight(&branches);
        self.branches = branches;
        self.total_width = Some(width);
        self.base.mark_weight_evaluated();
        width
    }

    fn raw_weight_value(&self) -> f64 {
        self.weight.value()
    }

    fn generate_final_state(&mut self, rng: &mut dyn RngCore) {
        if self.is_resolved() {
            panic!("DecayActionDilepton::generate_final_state called on an already resolved action");
        }
        let mode = self.select_channel(rng).clone();
        match mode.multiplicity() {
            2 => {
                let outgoing = one_to_two(self.particle(), &mode, rng);
                self.weight.branching = Branching::Direct;
                self.base.resolve(outgoing);
                tracing::debug!("{}", self);
                #[cfg(debug_assertions)]
                self.base.assert_conserved(DEFAULT_CONSERVATION_TOLERANCE, self);
            }
            3 => self.one_to_three(rng),
            n => panic!("{}-body dilepton decays are not supported", n),
        }
    }

    fn process_type(&self) -> Option<ProcessType> {
        Some(ProcessType::DileptonDecay)
    }
}

impl fmt::Display for DecayActionDilepton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dilepton decay {} (m = {:.4} GeV) at t = {:.4} fm, shining weight {:.4e}",
            self.particle().pdg,
            self.particle().effective_mass(),
            self.base.time_of_execution(),
            self.weight.shining_weight
        )?;
        match self.weight.branching {
            Branching::Pending => {}
            Branching::Direct => write!(f, " -> {}", format_species(self.base.outgoing()))?,
            Branching::Differential { dilepton_mass, ratio } => write!(
                f,
                " -> {} (m_ll = {:.4} GeV, branching {:.4})",
                format_species(self.base.outgoing()),
                dilepton_mass,
                ratio
            )?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fourvector::FourVector;
    use nalgebra::Vector3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn meson(pdg: PdgCode) -> ParticleData {
        let mass = mass_of(pdg);
        ParticleData::new(pdg)
            .unwrap()
            .with_momentum(FourVector::on_shell(mass, &Vector3::new(0.2, 0.0, 0.5)))
    }

    fn dalitz_mode(pdg: PdgCode) -> (&'static ParticleType, DecayMode) {
        let ptype = ParticleType::find(pdg).unwrap();
        let mode = ptype
            .decay_modes
            .iter()
            .find(|m| m.is_dalitz())
            .unwrap()
            .clone();
        (ptype, mode)
    }

    #[test]
    fn test_shining_weight() {
        let w = shining_weight(0.1, 0.15, 2.0);
        assert!((w - 0.1 * 0.15 / (HBARC * 2.0)).abs() < 1e-15);
    }

    #[test]
    fn test_branching_has_unit_mean_over_uniform_masses() {
        for pdg in [PdgCode::PI_ZERO, PdgCode::ETA, PdgCode::OMEGA] {
            let (ptype, mode) = dalitz_mode(pdg);
            let (hadron, leptons) = dalitz_layout(&mode).unwrap();
            let lo = 2.0 * mass_of(mode.products[leptons[0]]);
            let hi = ptype.mass - mass_of(mode.products[hadron]);
            let total = integrated_width(ptype, &mode, ptype.mass);
            // midpoint rule in the sampled variable
            let n = 200_000;
            let mean: f64 = (0..n)
                .map(|i| {
                    let m = lo + (hi - lo) * (i as f64 + 0.5) / n as f64;
                    (hi - lo) * diff_width(ptype, &mode, ptype.mass, m) / total
                })
                .sum::<f64>()
                / n as f64;
            assert!((mean - 1.0).abs() < 2e-3, "{}: mean = {}", ptype.name, mean);
        }
    }

    #[test]
    fn test_kroll_wada_vanishes_at_endpoints() {
        let (ptype, mode) = dalitz_mode(PdgCode::ETA);
        assert_eq!(diff_width(ptype, &mode, ptype.mass, 0.0005), 0.0);
        assert_eq!(diff_width(ptype, &mode, ptype.mass, ptype.mass), 0.0);
        assert!(diff_width(ptype, &mode, ptype.mass, 0.1) > 0.0);
    }

    #[test]
    fn test_direct_decay_keeps_shining_weight() {
        let mut action = DecayActionDilepton::new(meson(PdgCode::RHO_ZERO), 1.0, 3.5e-6).unwrap();
        assert!(action.total_weight() > 0.0);
        assert_eq!(action.raw_weight_value(), 3.5e-6);
        action.generate_final_state(&mut StdRng::seed_from_u64(2));
        assert_eq!(action.branching(), Branching::Direct);
        assert_eq!(action.raw_weight_value(), 3.5e-6);
        assert_eq!(action.outgoing_particles().len(), 2);
        assert!(action.check_conservation(1e-9).is_ok());
    }

    #[test]
    fn test_dalitz_decay_fixes_branching() {
        let mut action = DecayActionDilepton::new(meson(PdgCode::PI_ZERO), 0.0, 1e-3).unwrap();
        action.total_weight();
        action.generate_final_state(&mut StdRng::seed_from_u64(17));
        match action.branching() {
            Branching::Differential { dilepton_mass, ratio } => {
                assert!(ratio > 0.0);
                assert!(dilepton_mass > 2.0 * mass_of(PdgCode::ELECTRON));
                let out = action.outgoing_particles();
                let pair = out[1].momentum + out[2].momentum;
                assert!((pair.abs() - dilepton_mass).abs() < 1e-9);
            }
            other => panic!("unexpected branching {:?}", other),
        }
        assert!(action.raw_weight_value() != 1e-3);
        assert!(action.check_conservation(1e-9).is_ok());
    }

    #[test]
    #[should_panic(expected = "one_to_three called for a 2-body channel")]
    fn test_one_to_three_rejects_two_body_channel() {
        let mut action = DecayActionDilepton::new(meson(PdgCode::RHO_ZERO), 0.0, 1.0).unwrap();
        action.total_weight();
        let mut rng = StdRng::seed_from_u64(3);
        action.select_channel(&mut rng);
        action.one_to_three(&mut rng);
    }

    #[test]
    #[should_panic(expected = "already resolved")]
    fn test_one_to_three_twice_panics() {
        let mut action = DecayActionDilepton::new(meson(PdgCode::PI_ZERO), 0.0, 1.0).unwrap();
        action.total_weight();
        let mut rng = StdRng::seed_from_u64(3);
        action.select_channel(&mut rng);
        action.one_to_three(&mut rng);
        action.one_to_three(&mut rng);
    }
}
