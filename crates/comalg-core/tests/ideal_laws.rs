use comalg_core::{Ideal, Ring};
use proptest::prelude::*;

#[test]
fn construction_rejects_elements_outside_domain() {
    let z6 = Ring::integers_mod(6).unwrap();
    let err = Ideal::new(&z6, [2, 7]).unwrap_err();
    assert!(err.is_domain());
    assert_eq!(err.info().code, "element-outside-domain");
    assert_eq!(err.info().context.get("element").map(String::as_str), Some("7"));
}

#[test]
fn equality_is_by_generated_ideal() {
    let z = Ring::integers();
    let a = Ideal::new(&z, [4, 6]).unwrap();
    let b = Ideal::principal(&z, 2).unwrap();
    assert_ne!(a.generators(), b.generators());
    assert_eq!(a, b);
    assert_eq!(Ideal::new(&z, Vec::<i64>::new()).unwrap(), Ideal::zero(&z));
    assert_eq!(Ideal::principal(&z, -3).unwrap(), Ideal::principal(&z, 3).unwrap());
}

#[test]
fn ideals_over_distinct_rings_never_compare_equal() {
    let a = Ring::integers();
    let b = Ring::integers();
    let lhs = Ideal::principal(&a, 2).unwrap();
    let rhs = Ideal::principal(&b, 2).unwrap();
    assert_ne!(lhs, rhs);
    assert!(lhs.intersect(&rhs).unwrap_err().is_domain());
}

#[test]
fn residue_ring_ideals() {
    let z12 = Ring::integers_mod(12).unwrap();
    let four = Ideal::principal(&z12, 8).unwrap();
    assert_eq!(four.divisor(), 4);
    assert_eq!(four.generator(), 4);
    assert_eq!(four.radical(), Ideal::principal(&z12, 2).unwrap());
    let nil = Ideal::zero(&z12).radical();
    assert_eq!(nil, Ideal::principal(&z12, 6).unwrap());
    assert!(Ideal::principal(&z12, 3).unwrap().is_maximal());
    assert!(!Ideal::zero(&z12).is_prime());

    let z5 = Ring::integers_mod(5).unwrap();
    assert!(Ideal::zero(&z5).is_maximal());
}

#[test]
fn primality_and_maximality_are_computed() {
    let z = Ring::integers();
    let zero = Ideal::zero(&z);
    assert!(zero.is_prime());
    assert!(!zero.is_maximal());
    assert!(Ideal::principal(&z, 7).unwrap().is_maximal());
    assert!(!Ideal::principal(&z, 9).unwrap().is_prime());
    assert!(!Ideal::unit(&z).is_prime());
}

#[test]
fn sum_and_product() {
    let z = Ring::integers();
    let four = Ideal::principal(&z, 4).unwrap();
    let six = Ideal::principal(&z, 6).unwrap();
    assert_eq!(four.sum(&six).unwrap().generator(), 2);
    assert_eq!(four.product(&six).unwrap().generator(), 24);
    assert_eq!(four.intersect(&six).unwrap().generator(), 12);
}

#[test]
fn intersection_of_empty_family_is_unit() {
    let z = Ring::integers();
    let all = Ideal::intersect_all(&z, std::iter::empty::<&Ideal>()).unwrap();
    assert!(all.is_unit());
}

#[test]
fn summary_snapshot() {
    let z = Ring::integers();
    let summary = Ideal::principal(&z, 6).unwrap().summary();
    assert_eq!(summary.display, "(6)");
    assert_eq!(summary.ring, "Z");
    assert!(!summary.prime);
}

fn modulus_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![Just(0i64), 1i64..=60]
}

proptest! {
    #[test]
    fn intersection_commutes_and_is_contained(m in modulus_strategy(), a in -500i64..500, b in -500i64..500) {
        let ring = if m == 0 { Ring::integers() } else { Ring::integers_mod(m).unwrap() };
        let i = Ideal::from_integer(&ring, a);
        let j = Ideal::from_integer(&ring, b);
        let ij = i.intersect(&j).unwrap();
        let ji = j.intersect(&i).unwrap();
        prop_assert_eq!(&ij, &ji);
        prop_assert!(ij.is_subset_of(&i));
        prop_assert!(ij.is_subset_of(&j));
    }

    #[test]
    fn radical_is_idempotent_and_contains_ideal(m in modulus_strategy(), a in -5000i64..5000) {
        let ring = if m == 0 { Ring::integers() } else { Ring::integers_mod(m).unwrap() };
        let i = Ideal::from_integer(&ring, a);
        let rad = i.radical();
        prop_assert_eq!(rad.radical(), rad.clone());
        prop_assert!(rad.contains(&i));
    }

    #[test]
    fn radical_matches_power_membership(a in 1i64..400, x in -400i64..400) {
        let z = Ring::integers();
        let i = Ideal::principal(&z, a).unwrap();
        prop_assert_eq!(i.radical().contains_element(x), i.contains_power_of(x).is_some());
    }
}
