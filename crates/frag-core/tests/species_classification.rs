use frag_core::species::{self, is_hadron, is_quark};
use proptest::prelude::*;

#[test]
fn mesons_and_baryons_are_hadrons() {
    for id in [111, 211, -211, 221, 113, 213, -213, 223, 311, -311, 321, 313, 333, 130, 310] {
        assert!(is_hadron(id), "{id} should be a hadron");
    }
    for id in [2212, -2212, 2112, 3122, -3122, 2214, 3322] {
        assert!(is_hadron(id), "{id} should be a hadron");
    }
}

#[test]
fn partons_leptons_and_bookkeeping_are_not_hadrons() {
    for id in [0, 1, -1, 2, 3, 21, 22, 11, -13, 90, 100] {
        assert!(!is_hadron(id), "{id} should not be a hadron");
    }
}

#[test]
fn diquarks_are_not_hadrons() {
    for id in [2101, 2103, 1103, -3201, 2203] {
        assert!(!is_hadron(id), "{id} is a diquark");
    }
}

#[test]
fn reserved_blocks_are_not_hadrons() {
    assert!(!is_hadron(1_000_021));
    assert!(!is_hadron(9_900_441));
}

#[test]
fn names_use_antiparticle_spelling() {
    assert_eq!(species::name(211), "pi+");
    assert_eq!(species::name(-211), "pi-");
    assert_eq!(species::name(111), "pi0");
    assert_eq!(species::name(-111), "pi0");
    assert_eq!(species::name(-311), "Kbar0");
    assert_eq!(species::name(-1), "dbar");
    assert_eq!(species::name(123456), "id123456");
}

#[test]
fn masses_come_from_the_table() {
    let pion = species::mass(-211).expect("pion mass");
    assert!((pion - 0.13957).abs() < 1e-6);
    assert_eq!(species::mass(987_654), None);
}

#[test]
fn quark_codes() {
    assert!(is_quark(1));
    assert!(is_quark(-5));
    assert!(!is_quark(21));
    assert!(!is_quark(0));
}

proptest! {
    #[test]
    fn classification_is_charge_symmetric(id in 1i32..10_000_000) {
        prop_assert_eq!(is_hadron(id), is_hadron(-id));
    }
}
