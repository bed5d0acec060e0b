use hadronic_actions::decay_dilepton::shining_weight;
use hadronic_actions::{
    Action, Branching, DecayActionDilepton, FourVector, ParticleData, ParticleType, PdgCode,
    ProcessType,
};
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn meson(pdg: PdgCode) -> ParticleData {
    let mass = ParticleType::find(pdg).unwrap().mass;
    ParticleData::new(pdg)
        .unwrap()
        .with_momentum(FourVector::on_shell(mass, &Vector3::new(0.0, 0.3, -0.4)))
}

#[test]
fn test_direct_channel_weight_is_shining_weight() {
    let rho = meson(PdgCode::RHO_ZERO);
    let width = ParticleType::find(PdgCode::RHO_ZERO).unwrap().width;
    let shining = shining_weight(0.1, width, rho.gamma());
    for seed in 0..20 {
        let mut action = DecayActionDilepton::new(rho.clone(), 5.0, shining).unwrap();
        assert!(action.total_weight() > 0.0);
        action.generate_final_state(&mut StdRng::seed_from_u64(seed));
        assert_eq!(action.branching(), Branching::Direct);
        assert_eq!(action.raw_weight_value(), shining);
        assert_eq!(action.process_type(), Some(ProcessType::DileptonDecay));
        assert!(action.outgoing_particles().iter().all(|p| p.pdg.is_lepton()));
    }
}

#[test]
fn test_dalitz_weight_changes_and_averages_to_shining_weight() {
    let shining = 2.0e-5;
    let trials = 20_000;
    let mut sum = 0.0;
    for seed in 0..trials {
        let mut action = DecayActionDilepton::new(meson(PdgCode::PI_ZERO), 0.0, shining).unwrap();
        action.total_weight();
        assert_eq!(action.raw_weight_value(), shining);
        action.generate_final_state(&mut StdRng::seed_from_u64(seed));
        let weight = action.raw_weight_value();
        assert!(weight > 0.0);
        assert_ne!(weight, shining);
        assert!(action.check_conservation(1e-9).is_ok());
        sum += weight;
    }
    let mean = sum / trials as f64;
    assert!((mean / shining - 1.0).abs() < 0.1, "mean / shining = {}", mean / shining);
}

#[test]
fn test_dalitz_mass_is_the_pair_mass() {
    let mut dalitz = 0;
    for seed in 0..50 {
        let mut action = DecayActionDilepton::new(meson(PdgCode::OMEGA), 0.0, 1.0).unwrap();
        action.total_weight();
        let mut rng = StdRng::seed_from_u64(seed);
        if action.select_channel(&mut rng).multiplicity() != 3 {
            action.generate_final_state(&mut rng);
            assert_eq!(action.branching(), Branching::Direct);
            continue;
        }
        action.one_to_three(&mut rng);
        let Branching::Differential { dilepton_mass, .. } = action.branching() else {
            panic!("branching not fixed after a Dalitz decay");
        };
        let pair: FourVector = action
            .outgoing_particles()
            .iter()
            .filter(|p| p.pdg.is_lepton())
            .map(|p| p.momentum)
            .sum();
        assert!((pair.abs() - dilepton_mass).abs() < 1e-9);
        dalitz += 1;
    }
    assert!(dalitz > 0);
}

#[test]
fn test_stable_meson_has_no_dilepton_width() {
    let mut action = DecayActionDilepton::new(meson(PdgCode::PI_PLUS), 0.0, 1.0).unwrap();
    assert_eq!(action.total_weight(), 0.0);
}
