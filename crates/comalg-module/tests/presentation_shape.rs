use comalg_core::{Ideal, Ring};
use comalg_module::{Decomposition, Module};
use proptest::prelude::*;

#[test]
fn relation_rows_must_match_generators() {
    let z = Ring::integers();
    let err = Module::new(&z, vec!["a".into(), "b".into()], vec![vec![1]]).unwrap_err();
    assert_eq!(err.info().code, "relation-shape");

    let z6 = Ring::integers_mod(6).unwrap();
    let err = Module::new(&z6, vec!["a".into()], vec![vec![9]]).unwrap_err();
    assert_eq!(err.info().code, "element-outside-domain");
}

#[test]
fn quotient_by_ideal_matches_cyclic_module() {
    let z = Ring::integers();
    let ideal = Ideal::new(&z, [4, 6]).unwrap();
    let m = Module::quotient(&z, &ideal).unwrap();
    assert_eq!(
        m.decomposition().unwrap(),
        Decomposition {
            invariant_factors: vec![2],
            free_rank: 0,
            torsion: vec![2],
        }
    );

    let other = Ring::integers();
    assert!(Module::quotient(&other, &ideal).unwrap_err().is_domain());
}

#[test]
fn direct_sum_recombines_coprime_factors() {
    let z = Ring::integers();
    let m = Module::cyclic(&z, 2)
        .unwrap()
        .direct_sum(&Module::cyclic(&z, 3).unwrap())
        .unwrap()
        .direct_sum(&Module::free(&z, 2))
        .unwrap();
    let decomposition = m.decomposition().unwrap();
    assert_eq!(decomposition.free_rank, 2);
    assert_eq!(decomposition.torsion, vec![6]);
    assert_eq!(m.describe().unwrap(), "Z^2 ⊕ Z/(6)");
}

#[test]
fn elements_are_validated() {
    let z6 = Ring::integers_mod(6).unwrap();
    let m = Module::free(&z6, 2).with_name("P");
    assert_eq!(m.to_string(), "P");
    assert!(m.element(vec![1]).is_err());
    assert!(m.element(vec![1, 7]).is_err());
    let x = m.element(vec![0, 3]).unwrap();
    assert!(!m.is_zero(&x).unwrap());
    assert_eq!(m.annihilator_of(&x).unwrap().generator(), 2);
    assert!(m.generator(2).is_none());
}

proptest! {
    #[test]
    fn annihilator_and_witnesses_are_consistent(
        rows in prop::collection::vec(prop::collection::vec(-12i64..12, 2), 0..3)
    ) {
        let z = Ring::integers();
        let m = Module::new(&z, vec!["a".into(), "b".into()], rows).unwrap();
        let ann = m.annihilator().unwrap().clone();
        prop_assert!(m.annihilates(&ann).unwrap());
        for assoc in m.associated_primes().unwrap() {
            prop_assert!(assoc.prime.is_prime());
            prop_assert!(!m.is_zero(&assoc.witness).unwrap());
            prop_assert!(assoc.prime.contains(&ann));
        }
        let meet = Ideal::intersect_all(&z, m.associated_primes().unwrap().iter().map(|a| &a.prime)).unwrap();
        prop_assert_eq!(meet, ann.radical());
    }
}
