//! Calculate the tm, free energy and fraction bound of a DNA duplex

use crate::{ActualThermo, Conditions, StandardThermo, Symmetry, ThermoProfile};


/// Gas constant, cal/(K·mol)
pub const R: f64 = 1.987;

/// Zero celsius in kelvin
pub const KELVIN: f64 = 273.15;

/// Temperature of the standard free energy, celsius
pub const STANDARD_TEMPERATURE: f64 = 37.0;

/// Strand concentration entering the mass-action term of the Tm equation.
///
/// For a non-self-complementary duplex this is `Cp - Ct/2`, which is the
/// total strand concentration over 4 when both strands are equal and the
/// excess strand when they are not. A self-complementary duplex forms from
/// a single species, so the whole strand concentration counts.
pub fn effective_concentration(conditions: &Conditions, symmetry: Symmetry) -> f64 {
    match symmetry {
        Symmetry::NonSelfComplementary => conditions.primer - conditions.template / 2.0,
        Symmetry::SelfComplementary => conditions.total_strand() / symmetry.factor(),
    }
}

/// Solve the van't Hoff relation for the melting temperature.
///
/// # Args
///
/// - profile: enthalpy (kcal/mol) and entropy (cal/mol·K)
/// - c_eff: concentration from [`effective_concentration`], M
///
/// # Returns
///
/// - [`f64`]: tm in celsius
pub fn calc_tm(profile: ThermoProfile, c_eff: f64) -> f64 {
    (profile.dh * 1000.0) / (profile.ds + R * c_eff.ln()) - KELVIN
}

/// Free energy (kcal/mol) at `kelvin`
pub fn calc_dg(profile: ThermoProfile, kelvin: f64) -> f64 {
    profile.dh - kelvin * profile.ds / 1000.0
}

/// Association constant from a free energy (kcal/mol) at `kelvin`
pub fn equilibrium_constant(dg: f64, kelvin: f64) -> f64 {
    (-dg * 1000.0 / (R * kelvin)).exp()
}

/// Percentage of the template (less abundant strand) in duplex.
///
/// With `c = cp / ct` the bound fraction `p` solves
/// `p^2 - (c + 1 + 1/(k·ct))·p + c = 0`. The physical root is the smaller
/// one; it is taken as `c / p_large` to avoid cancellation when the
/// template is many orders of magnitude below the primer. `p_large` is
/// written as `b/2 · (1 + sqrt(1 - 4c/b²))` so that `b²` never overflows.
///
/// # Args
///
/// - k: association constant
/// - cp: primer concentration, M
/// - ct: template concentration, M
///
/// # Returns
///
/// - [`f64`]: percent bound, 0 to 100
pub fn per_bound(k: f64, cp: f64, ct: f64) -> f64 {
    let c = cp / ct;
    let b = c + 1.0 + 1.0 / (k * ct);
    let large = b / 2.0 * (1.0 + (1.0 - 4.0 * c / b / b).max(0.0).sqrt());

    if large.is_finite() {
        100.0 * c / large
    } else {
        0.0
    }
}

/// Percentage of strands in duplex when one species pairs with itself.
///
/// For `2A <-> A2` with total strand `c`, the bound fraction `f` solves
/// `k·c = f / (2(1 - f)^2)`, i.e. `f^2 - 2a·f + 1 = 0` with
/// `a = 1 + 1/(4k·c)`. The physical root is `1 / (a + sqrt(a^2 - 1))`,
/// which is exactly one half at `k = 1/c`.
///
/// # Args
///
/// - k: association constant
/// - total: total strand concentration, M
///
/// # Returns
///
/// - [`f64`]: percent bound, 0 to 100
pub fn per_bound_self(k: f64, total: f64) -> f64 {
    let a = 1.0 + 1.0 / (4.0 * k * total);
    let large = a * (1.0 + (1.0 - 1.0 / a / a).max(0.0).sqrt());

    if large.is_finite() {
        100.0 / large
    } else {
        0.0
    }
}

/// Percent bound for the duplex's symmetry under `conditions`.
fn bound(k: f64, conditions: &Conditions, symmetry: Symmetry) -> f64 {
    match symmetry {
        Symmetry::NonSelfComplementary => per_bound(k, conditions.primer, conditions.template),
        Symmetry::SelfComplementary => per_bound_self(k, conditions.total_strand()),
    }
}

/// Tm, percent bound and free energy under `conditions`.
///
/// `corrected` must already carry the salt correction. Free energy and
/// percent bound are evaluated at the conditions' temperature, which need
/// not be anywhere near the tm.
pub fn solve(corrected: ThermoProfile, conditions: &Conditions, symmetry: Symmetry) -> ActualThermo {
    let kelvin = conditions.kelvin();
    let tm = calc_tm(corrected, effective_concentration(conditions, symmetry));
    let dg = calc_dg(corrected, kelvin);
    let k = equilibrium_constant(dg, kelvin);

    ActualThermo {
        tm,
        per_bound: bound(k, conditions, symmetry),
        dg,
        dh: corrected.dh,
        ds: corrected.ds,
    }
}

/// Tm, free energy and entropy at the literature standard state.
///
/// Uses the raw, uncorrected profile (1 M Na+) and a total strand
/// concentration of 4 mM, or 1 mM for a self-complementary duplex. The
/// free energy is given at 37 C.
pub fn standard(raw: ThermoProfile, symmetry: Symmetry) -> StandardThermo {
    let c_eff = symmetry.standard_total() / symmetry.factor();

    StandardThermo {
        tm: calc_tm(raw, c_eff),
        dg: calc_dg(raw, STANDARD_TEMPERATURE + KELVIN),
        ds: raw.ds,
    }
}

/// The standard state expressed as ordinary conditions. Solving with these
/// reproduces [`standard`].
pub fn standard_conditions(symmetry: Symmetry) -> Conditions {
    let each = symmetry.standard_total() / 2.0;
    Conditions {
        temperature: STANDARD_TEMPERATURE,
        primer: each,
        template: each,
        monovalent: 1.0,
        divalent: 0.0,
        dntp: 0.0,
    }
}

/// Percent bound at each temperature (celsius), the same quantity
/// [`solve`] reports at the conditions' temperature.
///
/// # Returns
///
/// - `Vec<(f64, f64)>`: (temperature, percent bound) pairs in input order
pub fn melting_curve(
    corrected: ThermoProfile,
    conditions: &Conditions,
    symmetry: Symmetry,
    temperatures: &[f64],
) -> Vec<(f64, f64)> {
    temperatures
        .iter()
        .map(|&t| {
            let kelvin = t + KELVIN;
            let k = equilibrium_constant(calc_dg(corrected, kelvin), kelvin);
            (t, bound(k, conditions, symmetry))
        })
        .collect()
}
