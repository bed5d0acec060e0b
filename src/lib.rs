// Import the modules and re-export the types for Rust usage
mod data;

pub mod action;
pub mod branch;
pub mod config;
pub mod decay;
pub mod decay_dilepton;
pub mod error;
pub mod fourvector;
pub mod kinematics;
pub mod parametrizations;
pub mod particle;
pub mod particletype;
pub mod pdgcode;
pub mod quantum_numbers;
pub mod random;
pub mod scatter;
pub mod scatter_baryon_meson;
pub mod scatter_nucleon_kaon;
pub mod scatter_nucleon_nucleon;
pub mod tmn;
pub mod utilities;

pub use action::{Action, ActionBase, ActionState, AnyAction};
pub use branch::{choose_branch, Branch, CollisionBranch, DecayBranch, ProcessType};
pub use config::Config;
pub use decay::DecayAction;
pub use decay_dilepton::{shining_weight, Branching, DecayActionDilepton, DileptonWeight};
pub use error::{ActionError, ActionResult};
pub use fourvector::FourVector;
pub use particle::{ParticleData, ParticleList};
pub use particletype::{DecayKind, DecayMode, ParticleType};
pub use pdgcode::PdgCode;
pub use quantum_numbers::QuantumNumbers;
pub use random::FastRng;
pub use scatter::{ScatterAction, ScatterKind};
pub use tmn::EnergyMomentumTensor;
