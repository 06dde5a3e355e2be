use comalg_core::{Ideal, Ring, RingHandle};
use comalg_module::{Decomposition, Module};
use proptest::prelude::*;

fn generators(count: usize) -> Vec<String> {
    (1..=count).map(|idx| format!("e{idx}")).collect()
}

fn assert_witnesses(ring: &RingHandle, m: &Module, expected: &[i64]) {
    let primes = m.associated_primes().unwrap();
    let found: Vec<i64> = primes.iter().map(|assoc| assoc.prime.generator()).collect();
    assert_eq!(found, expected);
    for assoc in primes {
        let witness = m.element(assoc.witness.coefficients().to_vec()).unwrap();
        assert_eq!(m.annihilator_of(&witness).unwrap(), assoc.prime);
    }
    let meet = Ideal::intersect_all(ring, primes.iter().map(|assoc| &assoc.prime)).unwrap();
    assert_eq!(meet, m.annihilator().unwrap().radical());
}

#[test]
fn dense_six_generator_presentation() {
    let z = Ring::integers();
    let rows = vec![
        vec![-1, 10, 8, 7, -10, -2],
        vec![0, -5, -2, -3, 7, 7],
        vec![9, -8, 6, 4, -7, 3],
        vec![5, 2, -9, 10, 1, -6],
        vec![-4, 7, 3, -8, 9, 10],
        vec![6, -3, -10, 2, -5, 8],
    ];
    let m = Module::new(&z, generators(6), rows).unwrap();
    assert_eq!(
        m.decomposition().unwrap(),
        Decomposition {
            invariant_factors: vec![1_762_713],
            free_rank: 0,
            torsion: vec![1_762_713],
        }
    );
    assert_eq!(m.annihilator().unwrap().generator(), 1_762_713);
    assert_witnesses(&z, &m, &[3, 17, 41, 281]);
}

#[test]
fn dense_five_generator_presentation() {
    let z = Ring::integers();
    let rows = vec![
        vec![12, -30, 45, 7, -88],
        vec![64, 18, -27, 90, 3],
        vec![-55, 41, 16, -72, 29],
        vec![33, -99, 80, 11, -6],
        vec![-14, 52, -37, 68, 95],
    ];
    let m = Module::new(&z, generators(5), rows).unwrap();
    let decomposition = m.decomposition().unwrap();
    assert_eq!(decomposition.invariant_factors, vec![2, 1_129_961_244]);
    assert_eq!(decomposition.free_rank, 0);
    assert_eq!(m.annihilator().unwrap().generator(), 1_129_961_244);
    assert_witnesses(&z, &m, &[2, 3, 94_163_437]);
}

#[test]
fn residue_ring_with_large_prime_factor() {
    let ring = Ring::integers_mod(3_000_000_021).unwrap();
    let rows = vec![
        vec![1_000_000_007, 2_000_000_014, 0],
        vec![3, 6, 9],
        vec![0, 1_000_000_007, 3],
    ];
    let m = Module::new(&ring, generators(3), rows).unwrap();
    let decomposition = m.decomposition().unwrap();
    assert_eq!(decomposition.free_rank, 1);
    assert!(decomposition.torsion.is_empty());
    assert!(m.annihilator().unwrap().is_zero());
    assert_witnesses(&ring, &m, &[3, 1_000_000_007]);
}

#[test]
fn cyclic_module_over_large_prime() {
    let z = Ring::integers();
    let p = 999_999_999_999_999_989;
    let m = Module::cyclic(&z, p).unwrap();
    assert_eq!(m.annihilator().unwrap().generator(), p);
    assert_witnesses(&z, &m, &[p]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn wide_presentations_stay_within_range(
        columns in 4usize..=6,
        entries in prop::collection::vec(-100i64..=100, 36),
        rows in 0usize..=6,
    ) {
        let z = Ring::integers();
        let relations: Vec<Vec<i64>> = entries
            .chunks(6)
            .take(rows)
            .map(|row| row[..columns].to_vec())
            .collect();
        let m = Module::new(&z, generators(columns), relations).unwrap();
        let ann = m.annihilator().unwrap().clone();
        prop_assert!(m.annihilates(&ann).unwrap());
        let primes = m.associated_primes().unwrap();
        for assoc in primes {
            prop_assert!(assoc.prime.is_prime());
            prop_assert_eq!(m.annihilator_of(&assoc.witness).unwrap(), assoc.prime.clone());
        }
        let meet = Ideal::intersect_all(&z, primes.iter().map(|a| &a.prime)).unwrap();
        prop_assert_eq!(meet, ann.radical());
    }
}
