use frag_core::FourMomentum;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn invariants_of_a_simple_vector() {
    let p = FourMomentum::new(3.0, 4.0, 12.0, 13.5);
    assert!(close(p.pt(), 5.0));
    assert!(close(p.m2(), 13.5 * 13.5 - 169.0));
    assert!(close(p.m(), p.m2().sqrt()));
}

#[test]
fn boost_preserves_invariant_mass() {
    let rest = FourMomentum::new(0.0, 0.0, 0.0, 0.775);
    let parent = FourMomentum::new(0.3, -0.2, 4.0, 4.09);
    let boosted = rest.boosted(parent.velocity());
    assert!(close(boosted.m(), 0.775));
    assert!(boosted.pz > 0.0);
}

#[test]
fn boost_of_rest_mass_reproduces_parent() {
    let parent = FourMomentum::new(1.0, 2.0, -3.0, 5.0);
    let rest = FourMomentum::new(0.0, 0.0, 0.0, parent.m());
    let boosted = rest.boosted(parent.velocity());
    assert!(close(boosted.px, parent.px));
    assert!(close(boosted.py, parent.py));
    assert!(close(boosted.pz, parent.pz));
    assert!(close(boosted.e, parent.e));
}

#[test]
fn luminal_boost_is_ignored() {
    let p = FourMomentum::new(0.0, 0.0, 1.0, 2.0);
    assert_eq!(p.boosted([0.0, 0.0, 1.0]), p);
}

#[test]
fn space_like_mass_is_negative() {
    let p = FourMomentum::new(0.0, 0.0, 2.0, 1.0);
    assert!(p.m() < 0.0);
}

#[test]
fn arithmetic() {
    let a = FourMomentum::new(1.0, 2.0, 3.0, 4.0);
    let b = FourMomentum::new(0.5, 0.5, 0.5, 0.5);
    assert_eq!(a + b, FourMomentum::new(1.5, 2.5, 3.5, 4.5));
    assert_eq!(a + FourMomentum::default(), a);
}
