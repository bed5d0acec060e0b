// Nucleon-kaon collisions: elastic fits, strangeness exchange and KN -> KΔ.
//
// Only K+p, K+n, K-p and K-n are measured; the neutral kaons are mapped onto
// them by isospin symmetry (K0 n ~ K+ p, K0 p ~ K+ n, K̄0 n ~ K- p,
// K̄0 p ~ K- n).

use crate::branch::{CollisionBranch, ProcessType};
use crate::parametrizations as param;
use crate::pdgcode::PdgCode;

pub fn involves(a: PdgCode, b: PdgCode) -> bool {
    (a.is_nucleon() && b.is_kaon()) || (a.is_kaon() && b.is_nucleon())
}

/// Orders the pair as (nucleon, kaon).
fn ordered(a: PdgCode, b: PdgCode) -> (PdgCode, PdgCode) {
    if a.is_nucleon() {
        (a, b)
    } else {
        (b, a)
    }
}

/// Measured elastic cross section of the pair in mb.
pub fn elastic_parametrization(a: PdgCode, b: PdgCode, mandelstam_s: f64) -> Option<f64> {
    use PdgCode as P;
    let sigma = match ordered(a, b) {
        (P::PROTON, P::K_PLUS) | (P::NEUTRON, P::K_ZERO) => param::kplusp_elastic(mandelstam_s),
        (P::NEUTRON, P::K_PLUS) | (P::PROTON, P::K_ZERO) => param::kplusn_elastic(mandelstam_s),
        (P::PROTON, P::K_MINUS) | (P::NEUTRON, P::K_ZERO_BAR) => {
            param::kminusp_elastic(mandelstam_s)
        }
        (P::NEUTRON, P::K_MINUS) | (P::PROTON, P::K_ZERO_BAR) => {
            param::kminusn_elastic(mandelstam_s)
        }
        _ => return None,
    };
    Some(sigma)
}

fn channel(products: [PdgCode; 2], weight: f64) -> CollisionBranch {
    CollisionBranch {
        products: products.to_vec(),
        weight,
        process: ProcessType::TwoToTwo,
    }
}

/// Inelastic two-body channels of the pair at `sqrts`, before any
/// kinematic threshold is applied.
pub fn two_to_two_branches(a: PdgCode, b: PdgCode, sqrts: f64) -> Vec<CollisionBranch> {
    use PdgCode as P;
    let (nucleon, kaon) = ordered(a, b);
    match (nucleon, kaon) {
        // K̄N -> πY
        (P::PROTON, P::K_MINUS) => vec![
            channel([P::PI_MINUS, P::SIGMA_PLUS], param::kminusp_piminussigmaplus(sqrts)),
            channel([P::PI_PLUS, P::SIGMA_MINUS], param::kminusp_piplussigmaminus(sqrts)),
            channel([P::PI_ZERO, P::SIGMA_ZERO], param::kminusp_pi0sigma0(sqrts)),
            channel([P::PI_ZERO, P::LAMBDA], param::kminusp_pi0lambda(sqrts)),
        ],
        (P::NEUTRON, P::K_ZERO_BAR) => vec![
            channel([P::PI_PLUS, P::SIGMA_MINUS], param::kminusp_piminussigmaplus(sqrts)),
            channel([P::PI_MINUS, P::SIGMA_PLUS], param::kminusp_piplussigmaminus(sqrts)),
            channel([P::PI_ZERO, P::SIGMA_ZERO], param::kminusp_pi0sigma0(sqrts)),
            channel([P::PI_ZERO, P::LAMBDA], param::kminusp_pi0lambda(sqrts)),
        ],
        (P::NEUTRON, P::K_MINUS) => vec![
            channel([P::PI_MINUS, P::LAMBDA], param::kminusn_piminuslambda(sqrts)),
            channel([P::PI_MINUS, P::SIGMA_ZERO], param::kminusn_piminussigma0(sqrts)),
            channel([P::PI_ZERO, P::SIGMA_MINUS], param::kminusn_piminussigma0(sqrts)),
        ],
        (P::PROTON, P::K_ZERO_BAR) => vec![
            channel([P::PI_PLUS, P::LAMBDA], param::kminusn_piminuslambda(sqrts)),
            channel([P::PI_PLUS, P::SIGMA_ZERO], param::kminusn_piminussigma0(sqrts)),
            channel([P::PI_ZERO, P::SIGMA_PLUS], param::kminusn_piminussigma0(sqrts)),
        ],
        // KN -> KΔ, split by isospin Clebsch-Gordan coefficients
        (P::PROTON, P::K_PLUS) => {
            let sigma = param::kn_to_kdelta(sqrts);
            vec![
                channel([P::K_ZERO, P::DELTA_PLUS_PLUS], 0.75 * sigma),
                channel([P::K_PLUS, P::DELTA_PLUS], 0.25 * sigma),
            ]
        }
        (P::NEUTRON, P::K_PLUS) | (P::PROTON, P::K_ZERO) => {
            let sigma = param::kn_to_kdelta(sqrts);
            vec![
                channel([P::K_ZERO, P::DELTA_PLUS], 0.25 * sigma),
                channel([P::K_PLUS, P::DELTA_ZERO], 0.25 * sigma),
            ]
        }
        (P::NEUTRON, P::K_ZERO) => {
            let sigma = param::kn_to_kdelta(sqrts);
            vec![
                channel([P::K_PLUS, P::DELTA_MINUS], 0.75 * sigma),
                channel([P::K_ZERO, P::DELTA_ZERO], 0.25 * sigma),
            ]
        }
        _ => Vec::new(),
    }
}
