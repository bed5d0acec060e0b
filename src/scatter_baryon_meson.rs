// Baryon-meson collisions with a measured elastic cross section: πN.
//
// The fits describe the non-resonant background; Δ formation is added on
// top as a 2 -> 1 channel by the generic scatter enumeration.

use crate::parametrizations as param;
use crate::pdgcode::PdgCode;

/// Pion-nucleon pairs, the baryon-meson pairs with elastic data.
pub fn involves(a: PdgCode, b: PdgCode) -> bool {
    (a.is_nucleon() && b.is_pion()) || (a.is_pion() && b.is_nucleon())
}

/// Measured elastic cross section of the pair in mb; `None` for baryon-meson
/// pairs without data.
pub fn elastic_parametrization(a: PdgCode, b: PdgCode, mandelstam_s: f64) -> Option<f64> {
    use PdgCode as P;
    let (baryon, meson) = if a.is_baryon() { (a, b) } else { (b, a) };
    let sigma = match (baryon, meson) {
        (P::PROTON, P::PI_PLUS) | (P::NEUTRON, P::PI_MINUS) => param::piplusp_elastic(mandelstam_s),
        (P::PROTON, P::PI_MINUS) | (P::NEUTRON, P::PI_PLUS) => {
            param::piminusp_elastic(mandelstam_s)
        }
        (P::PROTON, P::PI_ZERO) | (P::NEUTRON, P::PI_ZERO) => {
            0.5 * (param::piplusp_elastic(mandelstam_s) + param::piminusp_elastic(mandelstam_s))
        }
        _ => return None,
    };
    Some(sigma)
}
