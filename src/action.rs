//! The action contract shared by every interaction.
//!
//! An action is one candidate interaction: a fixed incoming particle list,
//! the time at which it is scheduled, and, once resolved, the outgoing list.
//! Every action walks the same three states:
//!
//! ```text
//! Constructed --total_weight()--> WeightEvaluated --generate_final_state()--> Resolved
//! ```
//!
//! A zero total weight is an ordinary outcome ("this process does not
//! happen") and the scheduler must not request a final state for it.
//! Requesting a final state out of order is a programming error and panics.

use rand::RngCore;
use std::fmt;

use crate::branch::ProcessType;
use crate::decay::DecayAction;
use crate::decay_dilepton::DecayActionDilepton;
use crate::error::{ActionError, ActionResult};
use crate::fourvector::FourVector;
use crate::particle::{ParticleData, ParticleList};
use crate::quantum_numbers::QuantumNumbers;
use crate::scatter::ScatterAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Constructed,
    WeightEvaluated,
    Resolved,
}

/// Bookkeeping shared by all action kinds.
#[derive(Debug, Clone)]
pub struct ActionBase {
    incoming: ParticleList,
    outgoing: ParticleList,
    time_of_execution: f64,
    state: ActionState,
}

impl ActionBase {
    pub fn new(incoming: ParticleList, time_of_execution: f64) -> Self {
        Self {
            incoming,
            outgoing: ParticleList::new(),
            time_of_execution,
            state: ActionState::Constructed,
        }
    }

    pub fn incoming(&self) -> &ParticleList {
        &self.incoming
    }

    pub fn outgoing(&self) -> &ParticleList {
        &self.outgoing
    }

    pub fn time_of_execution(&self) -> f64 {
        self.time_of_execution
    }

    pub fn state(&self) -> ActionState {
        self.state
    }

    /// Sum of the incoming four-momenta.
    pub fn total_momentum(&self) -> FourVector {
        self.incoming.iter().map(|p| p.momentum).sum()
    }

    /// Invariant mass of the incoming system.
    pub fn sqrt_s(&self) -> f64 {
        self.total_momentum().abs()
    }

    /// Where outgoing particles are placed: the mean incoming position, at
    /// the time of execution.
    pub fn interaction_point(&self) -> FourVector {
        let n = self.incoming.len().max(1) as f64;
        let mean: FourVector = self.incoming.iter().map(|p| p.position).sum::<FourVector>() / n;
        FourVector::new(self.time_of_execution, mean.x1, mean.x2, mean.x3)
    }

    /// Records that the weight has been evaluated. Idempotent before
    /// resolution.
    pub fn mark_weight_evaluated(&mut self) {
        if self.state == ActionState::Constructed {
            self.state = ActionState::WeightEvaluated;
        }
    }

    /// Guards the entry into final-state generation.
    ///
    /// # Panics
    /// If the weight has not been evaluated, the action is already resolved,
    /// or the weight is zero.
    pub fn assert_ready_to_resolve(&self, total_weight: f64, what: &str) {
        match self.state {
            ActionState::Constructed => panic!(
                "{} called before the total weight was evaluated",
                what
            ),
            ActionState::Resolved => panic!("{} called on an already resolved action", what),
            ActionState::WeightEvaluated => {}
        }
        if !(total_weight > 0.0) {
            panic!(
                "{} called on a kinematically forbidden action (total weight {})",
                what, total_weight
            );
        }
    }

    /// Stores the outgoing particles, placing them at the interaction point,
    /// and moves to the terminal state.
    pub fn resolve(&mut self, mut outgoing: ParticleList) {
        let point = self.interaction_point();
        for p in &mut outgoing {
            p.position = point;
        }
        self.outgoing = outgoing;
        self.state = ActionState::Resolved;
    }

    pub fn check_conservation(&self, tolerance: f64) -> ActionResult<()> {
        let before = QuantumNumbers::from_particles(&self.incoming);
        let after = QuantumNumbers::from_particles(&self.outgoing);
        let report = before.report_deviations(&after, tolerance);
        if report.is_empty() {
            Ok(())
        } else {
            tracing::warn!("Conservation violated in action at t={}: {}", self.time_of_execution, report);
            Err(ActionError::ConservationViolation(report))
        }
    }

    /// Panics when the resolved `action` violates conservation beyond
    /// `tolerance`. Debug builds only.
    #[cfg(debug_assertions)]
    pub(crate) fn assert_conserved(&self, tolerance: f64, action: &dyn fmt::Display) {
        if let Err(err) = self.check_conservation(tolerance) {
            panic!("{}: {}", action, err);
        }
    }
}

/// Uniform lifecycle of every interaction.
///
/// `Display` is the debug-output hook: it describes the action (species,
/// channel, masses) for logging and has no effect on physics.
pub trait Action: fmt::Display {
    fn base(&self) -> &ActionBase;

    /// Total probability weight: cross section in mb for scatterings,
    /// width in GeV for decays. Non-negative; zero when no channel is open.
    fn total_weight(&mut self) -> f64;

    /// Weight the scheduler uses when accumulating observables from this
    /// action.
    fn raw_weight_value(&self) -> f64;

    /// Selects a channel and materializes the outgoing particles.
    ///
    /// # Panics
    /// When called before [`Action::total_weight`], on a zero-weight action,
    /// or a second time.
    fn generate_final_state(&mut self, rng: &mut dyn RngCore);

    /// Process classification; `None` for a scattering whose channel has not
    /// been chosen yet.
    fn process_type(&self) -> Option<ProcessType>;

    fn incoming_particles(&self) -> &ParticleList {
        self.base().incoming()
    }

    fn outgoing_particles(&self) -> &ParticleList {
        self.base().outgoing()
    }

    fn time_of_execution(&self) -> f64 {
        self.base().time_of_execution()
    }

    fn state(&self) -> ActionState {
        self.base().state()
    }

    fn is_resolved(&self) -> bool {
        self.state() == ActionState::Resolved
    }

    fn check_conservation(&self, tolerance: f64) -> ActionResult<()> {
        self.base().check_conservation(tolerance)
    }
}

/// Closed set of action kinds, dispatched by variant.
#[derive(Debug)]
pub enum AnyAction {
    Scatter(ScatterAction),
    Decay(DecayAction),
    Dilepton(DecayActionDilepton),
}

impl AnyAction {
    fn as_action(&self) -> &dyn Action {
        match self {
            AnyAction::Scatter(a) => a,
            AnyAction::Decay(a) => a,
            AnyAction::Dilepton(a) => a,
        }
    }

    fn as_action_mut(&mut self) -> &mut dyn Action {
        match self {
            AnyAction::Scatter(a) => a,
            AnyAction::Decay(a) => a,
            AnyAction::Dilepton(a) => a,
        }
    }
}

impl Action for AnyAction {
    fn base(&self) -> &ActionBase {
        self.as_action().base()
    }

    fn total_weight(&mut self) -> f64 {
        self.as_action_mut().total_weight()
    }

    fn raw_weight_value(&self) -> f64 {
        self.as_action().raw_weight_value()
    }

    fn generate_final_state(&mut self, rng: &mut dyn RngCore) {
        self.as_action_mut().generate_final_state(rng)
    }

    fn process_type(&self) -> Option<ProcessType> {
        self.as_action().process_type()
    }
}

impl fmt::Display for AnyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_action(), f)
    }
}

impl From<ScatterAction> for AnyAction {
    fn from(a: ScatterAction) -> Self {
        AnyAction::Scatter(a)
    }
}

impl From<DecayAction> for AnyAction {
    fn from(a: DecayAction) -> Self {
        AnyAction::Decay(a)
    }
}

impl From<DecayActionDilepton> for AnyAction {
    fn from(a: DecayActionDilepton) -> Self {
        AnyAction::Dilepton(a)
    }
}

/// Formats a particle list as `a + b + c` for debug output.
pub(crate) fn format_species(particles: &[ParticleData]) -> String {
    particles
        .iter()
        .map(|p| p.pdg.to_string())
        .collect::<Vec<_>>()
        .join(" + ")
}
