//! Sum nearest-neighbor enthalpy and entropy over an aligned duplex

use crate::{Alignment, NnParams, Result, Symmetry, ThermoProfile};

#[cfg(test)]
mod test;

/// Raw (1 M Na+) enthalpy and entropy of a duplex.
///
/// Sums, in order:
///
/// - initiation, once per duplex
/// - every nearest-neighbor step, from the match table or, when either
///   position is mismatched, the mismatch table
/// - an A/T (or G/C) end term for each of the two terminal pairs; a
///   terminal mismatch counts as an A/T end
/// - the symmetry entropy when the duplex is self-complementary
///
/// Enthalpy and entropy are from:
/// SantaLucia & Hicks (2004), Annu. Rev. Biophys. Biomol. Struct 33: 415-440
pub fn accumulate(alignment: &Alignment, params: &NnParams) -> Result<ThermoProfile> {
    let (mut dh, mut ds) = params.constant(b"init")?;

    for step in alignment.steps() {
        let (step_dh, step_ds) = params.lookup(&step)?;
        dh += step_dh;
        ds += step_ds;
    }

    let (at_dh, at_ds) = params.constant(b"init_A/T")?;
    let (gc_dh, gc_ds) = params.constant(b"init_G/C")?;
    let pairs = alignment.pairs();
    if let (Some(first), Some(last)) = (pairs.first(), pairs.last()) {
        for end in [first, last] {
            if end.is_gc() {
                dh += gc_dh;
                ds += gc_ds;
            } else {
                dh += at_dh;
                ds += at_ds;
            }
        }
    }

    if alignment.symmetry() == Symmetry::SelfComplementary {
        let (sym_dh, sym_ds) = params.constant(b"sym")?;
        dh += sym_dh;
        ds += sym_ds;
    }

    tracing::trace!("accumulated dH={dh:.2} dS={ds:.2} for {}", alignment.duplex());

    Ok(ThermoProfile::new(dh, ds))
}
