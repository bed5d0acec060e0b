// Nucleon-nucleon collisions: elastic fits and NN -> NΔ.

use crate::branch::{CollisionBranch, ProcessType};
use crate::parametrizations as param;
use crate::pdgcode::PdgCode;

pub fn involves(a: PdgCode, b: PdgCode) -> bool {
    a.is_nucleon() && b.is_nucleon()
}

pub fn elastic_parametrization(a: PdgCode, b: PdgCode, mandelstam_s: f64) -> Option<f64> {
    if !involves(a, b) {
        return None;
    }
    Some(if a == b {
        param::pp_elastic(mandelstam_s)
    } else {
        param::np_elastic(mandelstam_s)
    })
}

/// NN -> NΔ channels, split by isospin Clebsch-Gordan coefficients.
pub fn two_to_two_branches(a: PdgCode, b: PdgCode, sqrts: f64) -> Vec<CollisionBranch> {
    use PdgCode as P;
    if !involves(a, b) {
        return Vec::new();
    }
    let sigma = param::nn_to_ndelta(sqrts);
    let split: [(PdgCode, PdgCode, f64); 2] = match (a, b) {
        (P::PROTON, P::PROTON) => [
            (P::NEUTRON, P::DELTA_PLUS_PLUS, 0.75),
            (P::PROTON, P::DELTA_PLUS, 0.25),
        ],
        (P::NEUTRON, P::NEUTRON) => [
            (P::PROTON, P::DELTA_MINUS, 0.75),
            (P::NEUTRON, P::DELTA_ZERO, 0.25),
        ],
        _ => [
            (P::PROTON, P::DELTA_ZERO, 0.25),
            (P::NEUTRON, P::DELTA_PLUS, 0.25),
        ],
    };
    split
        .iter()
        .map(|&(nucleon, delta, factor)| CollisionBranch {
            products: vec![nucleon, delta],
            weight: factor * sigma,
            process: ProcessType::TwoToTwo,
        })
        .collect()
}
