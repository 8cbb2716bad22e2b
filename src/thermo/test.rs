//! Test enthalpy and entropy sums

use approx::assert_relative_eq;

use super::accumulate;
use crate::{Error, NnParams, Orientation, Strand, align};

fn profile(top: &str, bottom: Option<&str>) -> crate::Result<crate::ThermoProfile> {
    let top = Strand::new(top).unwrap();
    let bottom = bottom.map(|b| Strand::new(b).unwrap());
    let alignment = align(&top, bottom.as_ref().map(|b| (b, Orientation::ThreeToFive)))?;
    accumulate(&alignment, &NnParams::unified())
}

/// ATCGATCG by hand: init + 7 stacks + one A/T end (it ends on G-C).
#[test]
fn perfect_match() {
    let p = profile("ATCGATCG", None).unwrap();
    let dh = 0.2 + (-7.2 - 8.2 - 10.6 - 8.2 - 7.2 - 8.2 - 10.6) + 2.2;
    let ds = -5.7 + (-20.4 - 22.2 - 27.2 - 22.2 - 20.4 - 22.2 - 27.2) + 6.9;
    assert_relative_eq!(p.dh, dh, epsilon = 1e-9);
    assert_relative_eq!(p.ds, ds, epsilon = 1e-9);
    assert_relative_eq!(p.dh, -57.8, epsilon = 1e-9);
    assert_relative_eq!(p.ds, -160.6, epsilon = 1e-9);
}

/// Only ends that are not G-C pay the A/T term.
#[test]
fn terminal_pairs() {
    // G...T: one A/T end
    let one = profile("GGGACCGCCT", None).unwrap();
    assert_relative_eq!(one.dh, 0.2 - 76.8 + 2.2, epsilon = 1e-9);
    assert_relative_eq!(one.ds, -5.7 - 196.8 + 6.9, epsilon = 1e-9);
    // G...C: none
    let none = profile("GGGACCGCCC", None).unwrap();
    assert_relative_eq!(none.dh, 0.2 - 77.0, epsilon = 1e-9);
    assert_relative_eq!(none.ds, -5.7 - 195.7, epsilon = 1e-9);
}

/// The symmetry entropy is added once and only for palindromes.
#[test]
fn symmetry_correction() {
    let sym = profile("CGATCG", None).unwrap();
    let stacks_ds = -27.2 - 22.2 - 20.4 - 22.2 - 27.2;
    assert_relative_eq!(sym.ds, -5.7 + stacks_ds - 1.4, epsilon = 1e-9);
    let stacks_dh = -10.6 - 8.2 - 7.2 - 8.2 - 10.6;
    assert_relative_eq!(sym.dh, 0.2 + stacks_dh, epsilon = 1e-9);
}

/// A G-T mismatch uses the two mismatch steps around it.
#[test]
fn single_mismatch() {
    let p = profile("ATCGATCG", Some("TAGTTAGC")).unwrap();
    // CG/GT and GA/TT replace CG/GC and GA/CT
    let dh = 0.2 + (-7.2 - 8.2 - 4.1 - 1.3 - 7.2 - 8.2 - 10.6) + 2.2;
    let ds = -5.7 + (-20.4 - 22.2 - 11.7 - 5.3 - 20.4 - 22.2 - 27.2) + 6.9;
    assert_relative_eq!(p.dh, dh, epsilon = 1e-9);
    assert_relative_eq!(p.ds, ds, epsilon = 1e-9);

    let perfect = profile("ATCGATCG", None).unwrap();
    assert!(p.dh > perfect.dh);
}

/// A mismatch at the very end is looked up like an internal one and the
/// end counts as A/T.
#[test]
fn terminal_mismatch() {
    let p = profile("ATCGATCG", Some("TAGCTAGA")).unwrap();
    // CG/GA and a second A/T end term
    let dh = 0.2 + (-7.2 - 8.2 - 10.6 - 8.2 - 7.2 - 8.2 - 4.0) + 2.0 * 2.2;
    assert_relative_eq!(p.dh, dh, epsilon = 1e-9);
}

#[test]
fn consecutive_mismatch_is_rejected_before_lookup() {
    assert!(matches!(
        profile("ATCGATCG", Some("TAGTAAGC")),
        Err(Error::ConsecutiveMismatch { .. })
    ));
}

/// A table without the needed step aborts instead of adding zero.
#[test]
fn missing_parameter() {
    let mut params = NnParams::unified();
    params.internal_mm = crate::BpEnergy::default();

    let top = Strand::new("ATCGATCG").unwrap();
    let bottom = Strand::new("TAGTTAGC").unwrap();
    let alignment = align(&top, Some((&bottom, Orientation::ThreeToFive))).unwrap();
    assert!(matches!(
        accumulate(&alignment, &params),
        Err(Error::ParameterNotFound { step }) if step == "CG/GT"
    ));
}
