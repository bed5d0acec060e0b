// src/data.rs
// Static species table. Masses and widths are in GeV, branching ratios are
// the pole values; mass dependence is applied in `particletype.rs`.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::particletype::{DecayKind, DecayMode, ParticleType};
use crate::pdgcode::PdgCode;

fn hadronic(products: &[PdgCode], branching_ratio: f64, angular_momentum: u8) -> DecayMode {
    DecayMode {
        products: products.to_vec(),
        branching_ratio,
        angular_momentum,
        kind: DecayKind::Hadronic,
    }
}

fn dilepton(products: &[PdgCode], branching_ratio: f64, angular_momentum: u8) -> DecayMode {
    DecayMode {
        products: products.to_vec(),
        branching_ratio,
        angular_momentum,
        kind: DecayKind::Dilepton,
    }
}

#[allow(clippy::too_many_arguments)]
fn species(
    name: &'static str,
    pdg: PdgCode,
    mass: f64,
    width: f64,
    spin: u8,
    charge: i32,
    baryon_number: i32,
    strangeness: i32,
    decay_modes: Vec<DecayMode>,
) -> ParticleType {
    ParticleType {
        name,
        pdg,
        mass,
        width,
        spin,
        charge,
        baryon_number,
        strangeness,
        decay_modes,
    }
}

/// All species known to the action layer, in a fixed order.
///
/// The order is significant: resonance formation channels are enumerated by
/// walking this table, and channel enumeration order decides ties during
/// channel selection. Spin is stored as `2J`.
pub static PARTICLE_TYPES: Lazy<Vec<ParticleType>> = Lazy::new(|| {
    use PdgCode as P;
    vec![
        // leptons and photon
        species("e-", P::ELECTRON, 0.000510999, 0.0, 1, -1, 0, 0, vec![]),
        species("e+", P::POSITRON, 0.000510999, 0.0, 1, 1, 0, 0, vec![]),
        species("mu-", P::MUON, 0.105658, 0.0, 1, -1, 0, 0, vec![]),
        species("mu+", P::ANTIMUON, 0.105658, 0.0, 1, 1, 0, 0, vec![]),
        species("gamma", P::PHOTON, 0.0, 0.0, 2, 0, 0, 0, vec![]),
        // pseudoscalar mesons
        species("pi+", P::PI_PLUS, 0.139570, 0.0, 0, 1, 0, 0, vec![]),
        species("pi-", P::PI_MINUS, 0.139570, 0.0, 0, -1, 0, 0, vec![]),
        species(
            "pi0",
            P::PI_ZERO,
            0.134977,
            7.8e-9,
            0,
            0,
            0,
            0,
            vec![
                hadronic(&[P::PHOTON, P::PHOTON], 0.98823, 0),
                dilepton(&[P::PHOTON, P::POSITRON, P::ELECTRON], 0.01174, 0),
            ],
        ),
        species("K+", P::K_PLUS, 0.493677, 0.0, 0, 1, 0, 1, vec![]),
        species("K0", P::K_ZERO, 0.497611, 0.0, 0, 0, 0, 1, vec![]),
        species("K-", P::K_MINUS, 0.493677, 0.0, 0, -1, 0, -1, vec![]),
        species("K0bar", P::K_ZERO_BAR, 0.497611, 0.0, 0, 0, 0, -1, vec![]),
        species(
            "eta",
            P::ETA,
            0.547862,
            1.31e-6,
            0,
            0,
            0,
            0,
            vec![
                hadronic(&[P::PHOTON, P::PHOTON], 0.3941, 0),
                hadronic(&[P::PI_ZERO, P::PI_ZERO, P::PI_ZERO], 0.3268, 0),
                hadronic(&[P::PI_PLUS, P::PI_MINUS, P::PI_ZERO], 0.2292, 0),
                hadronic(&[P::PI_PLUS, P::PI_MINUS, P::PHOTON], 0.0422, 0),
                dilepton(&[P::PHOTON, P::POSITRON, P::ELECTRON], 6.9e-3, 0),
                dilepton(&[P::PHOTON, P::ANTIMUON, P::MUON], 3.1e-4, 0),
            ],
        ),
        // vector mesons
        species(
            "rho0",
            P::RHO_ZERO,
            0.7755,
            0.149,
            2,
            0,
            0,
            0,
            vec![
                hadronic(&[P::PI_PLUS, P::PI_MINUS], 1.0, 1),
                dilepton(&[P::POSITRON, P::ELECTRON], 4.72e-5, 0),
                dilepton(&[P::ANTIMUON, P::MUON], 4.55e-5, 0),
            ],
        ),
        species(
            "rho+",
            P::RHO_PLUS,
            0.7755,
            0.149,
            2,
            1,
            0,
            0,
            vec![hadronic(&[P::PI_PLUS, P::PI_ZERO], 1.0, 1)],
        ),
        species(
            "rho-",
            P::RHO_MINUS,
            0.7755,
            0.149,
            2,
            -1,
            0,
            0,
            vec![hadronic(&[P::PI_MINUS, P::PI_ZERO], 1.0, 1)],
        ),
        species(
            "omega",
            P::OMEGA,
            0.78265,
            0.00849,
            2,
            0,
            0,
            0,
            vec![
                hadronic(&[P::PI_PLUS, P::PI_MINUS, P::PI_ZERO], 0.892, 0),
                hadronic(&[P::PI_ZERO, P::PHOTON], 0.0828, 1),
                hadronic(&[P::PI_PLUS, P::PI_MINUS], 0.0153, 1),
                dilepton(&[P::POSITRON, P::ELECTRON], 7.28e-5, 0),
                dilepton(&[P::ANTIMUON, P::MUON], 9.0e-5, 0),
                dilepton(&[P::PI_ZERO, P::POSITRON, P::ELECTRON], 7.7e-4, 0),
                dilepton(&[P::PI_ZERO, P::ANTIMUON, P::MUON], 1.34e-4, 0),
            ],
        ),
        species(
            "phi",
            P::PHI,
            1.019461,
            0.004249,
            2,
            0,
            0,
            0,
            vec![
                hadronic(&[P::K_PLUS, P::K_MINUS], 0.492, 1),
                hadronic(&[P::K_ZERO, P::K_ZERO_BAR], 0.340, 1),
                hadronic(&[P::PI_PLUS, P::PI_MINUS, P::PI_ZERO], 0.153, 0),
                dilepton(&[P::POSITRON, P::ELECTRON], 2.954e-4, 0),
                dilepton(&[P::ANTIMUON, P::MUON], 2.86e-4, 0),
            ],
        ),
        // nucleons
        species("p", P::PROTON, 0.938272, 0.0, 1, 1, 1, 0, vec![]),
        species("n", P::NEUTRON, 0.939565, 0.0, 1, 0, 1, 0, vec![]),
        // Delta(1232)
        species(
            "Delta++",
            P::DELTA_PLUS_PLUS,
            1.232,
            0.117,
            3,
            2,
            1,
            0,
            vec![hadronic(&[P::PROTON, P::PI_PLUS], 1.0, 1)],
        ),
        species(
            "Delta+",
            P::DELTA_PLUS,
            1.232,
            0.117,
            3,
            1,
            1,
            0,
            vec![
                hadronic(&[P::PROTON, P::PI_ZERO], 2.0 / 3.0, 1),
                hadronic(&[P::NEUTRON, P::PI_PLUS], 1.0 / 3.0, 1),
            ],
        ),
        species(
            "Delta0",
            P::DELTA_ZERO,
            1.232,
            0.117,
            3,
            0,
            1,
            0,
            vec![
                hadronic(&[P::NEUTRON, P::PI_ZERO], 2.0 / 3.0, 1),
                hadronic(&[P::PROTON, P::PI_MINUS], 1.0 / 3.0, 1),
            ],
        ),
        species(
            "Delta-",
            P::DELTA_MINUS,
            1.232,
            0.117,
            3,
            -1,
            1,
            0,
            vec![hadronic(&[P::NEUTRON, P::PI_MINUS], 1.0, 1)],
        ),
        // hyperons
        species("Lambda", P::LAMBDA, 1.115683, 0.0, 1, 0, 1, -1, vec![]),
        species("Sigma+", P::SIGMA_PLUS, 1.18937, 0.0, 1, 1, 1, -1, vec![]),
        species(
            "Sigma0",
            P::SIGMA_ZERO,
            1.192642,
            8.9e-6,
            1,
            0,
            1,
            -1,
            vec![hadronic(&[P::LAMBDA, P::PHOTON], 1.0, 1)],
        ),
        species("Sigma-", P::SIGMA_MINUS, 1.197449, 0.0, 1, -1, 1, -1, vec![]),
        species(
            "Lambda(1520)",
            P::LAMBDA_1520,
            1.5195,
            0.0156,
            3,
            0,
            1,
            -1,
            vec![
                hadronic(&[P::PROTON, P::K_MINUS], 0.25, 2),
                hadronic(&[P::NEUTRON, P::K_ZERO_BAR], 0.25, 2),
                hadronic(&[P::SIGMA_PLUS, P::PI_MINUS], 1.0 / 6.0, 2),
                hadronic(&[P::SIGMA_ZERO, P::PI_ZERO], 1.0 / 6.0, 2),
                hadronic(&[P::SIGMA_MINUS, P::PI_PLUS], 1.0 / 6.0, 2),
            ],
        ),
    ]
});

/// Map from species code to its position in [`PARTICLE_TYPES`].
pub static PARTICLE_INDEX: Lazy<HashMap<PdgCode, usize>> = Lazy::new(|| {
    PARTICLE_TYPES
        .iter()
        .enumerate()
        .map(|(i, ptype)| (ptype.pdg, i))
        .collect()
});
