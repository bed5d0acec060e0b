// Cross section parametrizations of measured hadronic data.
//
// Every function here is pure: cross sections in mb as a function of the
// Mandelstam `s` (GeV²) or of `sqrt(s)` (GeV). Beam-momentum fits use
// nominal masses; they are frozen below `MIN_PLAB`, where the underlying
// fits diverge and no data constrain them.

use crate::kinematics::plab_from_s;
use crate::utilities::interpolate_log_log;

pub const NUCLEON_MASS: f64 = 0.938;
pub const KAON_MASS: f64 = 0.494;
pub const PION_MASS: f64 = 0.138;

/// Lowest beam momentum (GeV) at which power-law fits are evaluated.
const MIN_PLAB: f64 = 0.05;

fn plab_pion_nucleon(mandelstam_s: f64) -> f64 {
    plab_from_s(mandelstam_s, PION_MASS, NUCLEON_MASS).max(MIN_PLAB)
}

fn plab_kaon_nucleon(mandelstam_s: f64) -> f64 {
    plab_from_s(mandelstam_s, KAON_MASS, NUCLEON_MASS).max(MIN_PLAB)
}

fn plab_nucleon_nucleon(mandelstam_s: f64) -> f64 {
    plab_from_s(mandelstam_s, NUCLEON_MASS, NUCLEON_MASS)
}

// ---------------------------------------------------------------------------
// nucleon-nucleon
// ---------------------------------------------------------------------------

/// Common high-energy tail of the nucleon-nucleon elastic fits.
fn nn_elastic_high_energy(p_lab: f64) -> f64 {
    let logp = p_lab.ln();
    11.9 + 26.9 * p_lab.powf(-1.21) + 0.169 * logp * logp - 1.85 * logp
}

/// pp (and nn) elastic cross section.
pub fn pp_elastic(mandelstam_s: f64) -> f64 {
    let p_lab = plab_nucleon_nucleon(mandelstam_s);
    if p_lab < 0.435 {
        let denominator = (mandelstam_s - 4.0 * NUCLEON_MASS * NUCLEON_MASS).max(1e-4);
        5.12 * NUCLEON_MASS / denominator + 1.67
    } else if p_lab < 0.8 {
        23.5 + 1000.0 * (p_lab - 0.7).powi(4)
    } else if p_lab < 2.0 {
        1250.0 / (p_lab + 50.0) - 4.0 * (p_lab - 1.3).powi(2)
    } else if p_lab < 2.776 {
        77.0 / (p_lab + 1.5)
    } else {
        nn_elastic_high_energy(p_lab)
    }
}

/// np elastic cross section.
pub fn np_elastic(mandelstam_s: f64) -> f64 {
    let p_lab = plab_nucleon_nucleon(mandelstam_s);
    if p_lab < 0.525 {
        let denominator = (mandelstam_s - 4.0 * NUCLEON_MASS * NUCLEON_MASS).max(1e-4);
        (17.05 * NUCLEON_MASS / denominator - 6.83).max(0.0)
    } else if p_lab < 0.8 {
        33.0 + 196.0 * (p_lab - 0.95).abs().powf(2.5)
    } else if p_lab < 2.0 {
        31.0 / p_lab.sqrt()
    } else if p_lab < 2.776 {
        77.0 / (p_lab + 1.5)
    } else {
        nn_elastic_high_energy(p_lab)
    }
}

/// Total NN -> NΔ cross section, to be split by isospin factors.
pub fn nn_to_ndelta(sqrts: f64) -> f64 {
    let x = sqrts - (2.0 * NUCLEON_MASS + PION_MASS);
    if x <= 0.0 {
        return 0.0;
    }
    20.0 * x * x / (0.1 + x * x)
}

// ---------------------------------------------------------------------------
// pion-nucleon
// ---------------------------------------------------------------------------

/// π+p (and π-n) elastic cross section, non-resonant part.
pub fn piplusp_elastic(mandelstam_s: f64) -> f64 {
    let p_lab = plab_pion_nucleon(mandelstam_s);
    let logp = p_lab.ln();
    11.4 * p_lab.powf(-0.4) + 0.079 * logp * logp
}

/// π-p (and π+n) elastic cross section, non-resonant part.
pub fn piminusp_elastic(mandelstam_s: f64) -> f64 {
    let p_lab = plab_pion_nucleon(mandelstam_s);
    let logp = p_lab.ln();
    1.76 + 11.2 * p_lab.powf(-0.64) + 0.043 * logp * logp
}

// ---------------------------------------------------------------------------
// kaon-nucleon
// ---------------------------------------------------------------------------

/// K+p (and K0n) elastic cross section: rational fit in the beam momentum.
pub fn kplusp_elastic(mandelstam_s: f64) -> f64 {
    const A0: f64 = 10.508; // mb
    const A1: f64 = -3.716; // mb/GeV
    const A2: f64 = 1.845; // mb/GeV²
    const A3: f64 = -0.764; // 1/GeV
    const A4: f64 = 0.508; // 1/GeV²
    let p_lab = plab_kaon_nucleon(mandelstam_s);
    let p_lab2 = p_lab * p_lab;
    (A0 + A1 * p_lab + A2 * p_lab2) / (1.0 + A3 * p_lab + A4 * p_lab2)
}

/// K+n (and K0p) elastic cross section.
pub fn kplusn_elastic(mandelstam_s: f64) -> f64 {
    0.5 * kplusp_elastic(mandelstam_s)
}

/// Measured K-p elastic cross section, beam momentum (GeV) / σ (mb).
const KMINUSP_ELASTIC_PLAB: [f64; 15] = [
    0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0, 1.5, 2.0, 3.0, 5.0, 10.0,
];
const KMINUSP_ELASTIC_SIGMA: [f64; 15] = [
    60.0, 35.0, 25.0, 20.0, 16.0, 14.0, 12.0, 11.0, 12.0, 13.0, 9.0, 7.5, 6.0, 4.5, 3.5,
];

const KMINUSN_ELASTIC_PLAB: [f64; 8] = [0.1, 0.3, 0.5, 0.8, 1.0, 2.0, 5.0, 10.0];
const KMINUSN_ELASTIC_SIGMA: [f64; 8] = [20.0, 12.0, 9.0, 7.0, 7.0, 5.0, 3.5, 3.0];

/// K-p (and K̄0n) elastic cross section, log-log interpolated data.
pub fn kminusp_elastic(mandelstam_s: f64) -> f64 {
    interpolate_log_log(
        &KMINUSP_ELASTIC_PLAB,
        &KMINUSP_ELASTIC_SIGMA,
        plab_kaon_nucleon(mandelstam_s),
    )
}

/// K-n (and K̄0p) elastic cross section, log-log interpolated data.
pub fn kminusn_elastic(mandelstam_s: f64) -> f64 {
    interpolate_log_log(
        &KMINUSN_ELASTIC_PLAB,
        &KMINUSN_ELASTIC_SIGMA,
        plab_kaon_nucleon(mandelstam_s),
    )
}

/// K-p -> π-Σ+
pub fn kminusp_piminussigmaplus(sqrts: f64) -> f64 {
    0.0788265 / (sqrts - 1.38841).powi(2)
}

/// K-p -> π+Σ-
pub fn kminusp_piplussigmaminus(sqrts: f64) -> f64 {
    0.0196741 / (sqrts - 1.42318).powi(2)
}

/// K-p -> π0Σ0
pub fn kminusp_pi0sigma0(sqrts: f64) -> f64 {
    0.0403364 / (sqrts - 1.39830305).powi(2)
}

/// K-p -> π0Λ
pub fn kminusp_pi0lambda(sqrts: f64) -> f64 {
    0.05932 / (sqrts - 1.38786).powi(2)
}

/// K-n -> π-Λ: pure isospin 1, twice the K-p -> π0Λ cross section.
pub fn kminusn_piminuslambda(sqrts: f64) -> f64 {
    2.0 * kminusp_pi0lambda(sqrts)
}

/// K-n -> π-Σ0 and K-n -> π0Σ- (equal by isospin), obtained from the
/// isospin-1 amplitude extracted from the K-p channels.
pub fn kminusn_piminussigma0(sqrts: f64) -> f64 {
    (kminusp_piminussigmaplus(sqrts) + kminusp_piplussigmaminus(sqrts)
        - 2.0 * kminusp_pi0sigma0(sqrts))
    .max(0.0)
}

/// Total KN -> KΔ cross section, to be split by isospin factors.
pub fn kn_to_kdelta(sqrts: f64) -> f64 {
    let x = sqrts - (KAON_MASS + NUCLEON_MASS + PION_MASS);
    if x <= 0.0 {
        return 0.0;
    }
    7.0 * x * x / (0.04 + x * x)
}
