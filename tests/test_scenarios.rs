use hadronic_actions::kinematics::plab_from_s;
use hadronic_actions::particletype::DecayKind;
use hadronic_actions::scatter::fixed_target_pair;
use hadronic_actions::{
    Action, Config, DecayAction, DecayBranch, ParticleData, ParticleType, PdgCode, ProcessType,
    ScatterAction,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn collision(a: PdgCode, b: PdgCode, sqrts: f64, config: &Config) -> ScatterAction {
    let ma = ParticleType::find(a).unwrap().mass;
    let mb = ParticleType::find(b).unwrap().mass;
    let (pa, pb) = fixed_target_pair(a, b, plab_from_s(sqrts * sqrts, ma, mb)).unwrap();
    ScatterAction::new(pa.with_id(10), pb.with_id(11), 2.0, config).unwrap()
}

#[test]
fn test_nucleon_kaon_below_inelastic_threshold_is_elastic() {
    // K+ p has no resonance to form and KΔ opens near 1.57 GeV
    let mut action = collision(PdgCode::K_PLUS, PdgCode::PROTON, 1.5, &Config::new());
    let sigma = action.total_weight();
    assert!(sigma > 0.0);
    assert_eq!(sigma, action.elastic_parametrization());

    action.generate_final_state(&mut StdRng::seed_from_u64(99));
    assert_eq!(action.process_type(), Some(ProcessType::Elastic));
    let species: Vec<PdgCode> = action.outgoing_particles().iter().map(|p| p.pdg).collect();
    assert_eq!(species, vec![PdgCode::K_PLUS, PdgCode::PROTON]);
    assert!(action.check_conservation(1e-9).is_ok());
}

#[test]
fn test_nucleon_kaon_above_threshold_opens_kdelta() {
    let mut action = collision(PdgCode::K_PLUS, PdgCode::PROTON, 2.0, &Config::new());
    let sigma = action.total_weight();
    assert!(sigma > action.elastic_parametrization());
    let processes: Vec<ProcessType> = action.cross_sections().iter().map(|b| b.process).collect();
    assert_eq!(
        processes,
        vec![ProcessType::Elastic, ProcessType::TwoToTwo, ProcessType::TwoToTwo]
    );
}

#[test]
fn test_antikaon_strangeness_exchange() {
    let config = Config {
        two_to_one: false,
        ..Config::new()
    };
    let mut action = collision(PdgCode::K_MINUS, PdgCode::PROTON, 1.6, &config);
    action.total_weight();
    let hyperon_channels = action
        .cross_sections()
        .iter()
        .filter(|b| b.process == ProcessType::TwoToTwo)
        .count();
    assert_eq!(hyperon_channels, 4);

    let mut hyperons = 0;
    for seed in 0..200 {
        let mut action = collision(PdgCode::K_MINUS, PdgCode::PROTON, 1.6, &config);
        action.total_weight();
        action.generate_final_state(&mut StdRng::seed_from_u64(seed));
        if action.process_type() == Some(ProcessType::TwoToTwo) {
            hyperons += 1;
            assert!(action.outgoing_particles().iter().any(|p| p.pdg.is_baryon()));
        }
        assert!(action.check_conservation(1e-9).is_ok());
    }
    assert!(hyperons > 0);
}

#[test]
fn test_decay_branching_frequencies() {
    let delta = ParticleType::find(PdgCode::DELTA_PLUS).unwrap();
    let modes: Vec<_> = delta
        .decay_modes
        .iter()
        .filter(|m| m.kind == DecayKind::Hadronic)
        .cloned()
        .collect();
    let trials = 10_000;
    let mut first = 0;
    for seed in 0..trials {
        let branches = vec![
            DecayBranch {
                mode: modes[0].clone(),
                weight: 0.7,
            },
            DecayBranch {
                mode: modes[1].clone(),
                weight: 0.3,
            },
        ];
        let particle = ParticleData::new(PdgCode::DELTA_PLUS).unwrap();
        let mut action = DecayAction::from_branches(particle, 0.0, branches).unwrap();
        assert!((action.total_weight() - 1.0).abs() < 1e-12);
        action.generate_final_state(&mut StdRng::seed_from_u64(seed));
        if action.chosen_mode() == Some(&modes[0]) {
            first += 1;
        }
    }
    let fraction = first as f64 / trials as f64;
    assert!((fraction - 0.7).abs() < 0.02, "fraction = {}", fraction);
}

#[test]
fn test_equal_weights_prefer_first_enumerated_on_boundary() {
    // ξ is drawn in [0, Σw): both halves are hit, the first channel owns
    // the shared boundary
    let delta = ParticleType::find(PdgCode::DELTA_PLUS).unwrap();
    let branches: Vec<DecayBranch> = delta
        .decay_modes
        .iter()
        .map(|mode| DecayBranch {
            mode: mode.clone(),
            weight: 0.5,
        })
        .collect();
    let counts = (0..2000u64).fold([0, 0], |mut counts, seed| {
        let particle = ParticleData::new(PdgCode::DELTA_PLUS).unwrap();
        let mut action = DecayAction::from_branches(particle, 0.0, branches.clone()).unwrap();
        action.total_weight();
        action.generate_final_state(&mut StdRng::seed_from_u64(seed));
        let index = usize::from(action.chosen_mode() != Some(&branches[0].mode));
        counts[index] += 1;
        counts
    });
    assert!(counts[0] > 800 && counts[1] > 800, "{:?}", counts);
}
