use comalg_core::{Ideal, Ring};
use comalg_module::Module;

#[test]
fn z_mod_6_annihilator_and_associated_primes() {
    let z = Ring::integers();
    let m = Module::cyclic(&z, 6).unwrap();

    let ann = m.annihilator().unwrap();
    assert_eq!(ann, &Ideal::principal(&z, 6).unwrap());

    let primes: Vec<i64> = m
        .associated_primes()
        .unwrap()
        .iter()
        .map(|assoc| assoc.prime.generator())
        .collect();
    assert_eq!(primes, vec![2, 3]);

    for assoc in m.associated_primes().unwrap() {
        assert!(!m.is_zero(&assoc.witness).unwrap());
        assert_eq!(m.annihilator_of(&assoc.witness).unwrap(), assoc.prime);
    }
}

#[test]
fn z_mod_4_has_single_associated_prime() {
    let z = Ring::integers();
    let m = Module::cyclic(&z, 4).unwrap();
    assert_eq!(m.annihilator().unwrap().generator(), 4);
    let ass = m.associated_primes().unwrap();
    assert_eq!(ass.len(), 1);
    assert_eq!(ass[0].prime, Ideal::principal(&z, 2).unwrap());
    assert_eq!(ass[0].witness.coefficients(), &[2]);
}

#[test]
fn annihilator_is_cached() {
    let z = Ring::integers();
    let m = Module::cyclic(&z, 12).unwrap();
    let first = m.annihilator().unwrap() as *const Ideal;
    let second = m.annihilator().unwrap() as *const Ideal;
    assert_eq!(first, second);

    let ass_a = m.associated_primes().unwrap().as_ptr();
    let ass_b = m.associated_primes().unwrap().as_ptr();
    assert_eq!(ass_a, ass_b);
}

#[test]
fn annihilator_kills_every_generator() {
    let z = Ring::integers();
    let m = Module::new(
        &z,
        vec!["a".into(), "b".into()],
        vec![vec![4, 6], vec![2, 0]],
    )
    .unwrap();
    let ann = m.annihilator().unwrap().clone();
    assert!(m.annihilates(&ann).unwrap());
    let too_small = Ideal::principal(&z, 1).unwrap();
    assert!(!m.annihilates(&too_small).unwrap());
}

#[test]
fn free_summand_contributes_zero_prime() {
    let z = Ring::integers();
    let m = Module::free(&z, 1).direct_sum(&Module::cyclic(&z, 9).unwrap()).unwrap();
    assert!(m.annihilator().unwrap().is_zero());
    let ass: Vec<String> = m
        .associated_primes()
        .unwrap()
        .iter()
        .map(|assoc| assoc.prime.to_string())
        .collect();
    assert_eq!(ass, vec!["(0)".to_string(), "(3)".to_string()]);
}

#[test]
fn zero_module_has_unit_annihilator_and_no_primes() {
    let z = Ring::integers();
    let m = Module::cyclic(&z, 1).unwrap();
    assert!(m.annihilator().unwrap().is_unit());
    assert!(m.associated_primes().unwrap().is_empty());
    assert_eq!(m.describe().unwrap(), "0");
}

#[test]
fn residue_ring_module_annihilators() {
    let z6 = Ring::integers_mod(6).unwrap();
    let m = Module::cyclic(&z6, 2).unwrap();
    assert_eq!(m.annihilator().unwrap(), &Ideal::principal(&z6, 2).unwrap());
    let ass = m.associated_primes().unwrap();
    assert_eq!(ass.len(), 1);
    assert_eq!(ass[0].prime.generator(), 2);

    let free = Module::free(&z6, 1);
    assert!(free.annihilator().unwrap().is_zero());
    let primes: Vec<i64> = free
        .associated_primes()
        .unwrap()
        .iter()
        .map(|assoc| assoc.prime.generator())
        .collect();
    assert_eq!(primes, vec![2, 3]);
}
