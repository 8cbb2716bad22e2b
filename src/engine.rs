//! Run the full calculation for one duplex or a batch of them

use rayon::prelude::*;

use crate::{
    Alignment, Config, Duplex, NnParams, Result, SaltCorrection, ThermoProfile, TmResult, align,
    thermo, tm,
};


/// Parameter tables and salt coefficients for one run. Immutable once
/// built, so a single calculator can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    params: NnParams,
    salt: SaltCorrection,
}

/// Intermediate values of one duplex
struct Profiles {
    alignment: Alignment,
    raw: ThermoProfile,
    corrected: ThermoProfile,
}

impl Calculator {
    pub fn new(params: NnParams, salt: SaltCorrection) -> Self {
        Self { params, salt }
    }

    /// Built-in or directory-loaded tables, depending on the configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let params = match config.parameters.resolve_dir() {
            Some(dir) => NnParams::from_dir(&dir)?,
            None => NnParams::unified(),
        };
        Ok(Self::new(params, config.salt.clone()))
    }

    pub fn params(&self) -> &NnParams {
        &self.params
    }

    pub fn salt(&self) -> &SaltCorrection {
        &self.salt
    }

    fn profiles(&self, duplex: &Duplex) -> Result<Profiles> {
        let conditions = duplex.conditions();
        conditions.validate()?;

        let alignment = align(
            &duplex.primary,
            duplex.secondary.as_ref().map(|(s, o)| (s, *o)),
        )?;
        let raw = thermo::accumulate(&alignment, &self.params)?;
        let corrected = self.salt.correct(raw, alignment.len() - 1, &conditions)?;

        Ok(Profiles {
            alignment,
            raw,
            corrected,
        })
    }

    /// Every quantity for one duplex: actual conditions and standard state.
    pub fn calculate(&self, duplex: &Duplex) -> Result<TmResult> {
        let conditions = duplex.conditions();
        let Profiles {
            alignment,
            raw,
            corrected,
        } = self.profiles(duplex)?;
        let symmetry = alignment.symmetry();

        let result = TmResult {
            name: duplex.name.clone(),
            duplex: alignment.duplex(),
            symmetry,
            actual: tm::solve(corrected, &conditions, symmetry),
            standard: tm::standard(raw, symmetry),
            conditions,
        };

        tracing::debug!(
            "{}: {} tm={:.2} dG={:.3} dH={:.3} dS={:.3}",
            result.name,
            result.duplex,
            result.actual.tm,
            result.actual.dg,
            result.actual.dh,
            result.actual.ds
        );

        Ok(result)
    }

    /// Percent bound of one duplex over a list of temperatures (celsius).
    pub fn melting_curve(&self, duplex: &Duplex, temperatures: &[f64]) -> Result<Vec<(f64, f64)>> {
        let profiles = self.profiles(duplex)?;
        Ok(tm::melting_curve(
            profiles.corrected,
            &duplex.conditions(),
            profiles.alignment.symmetry(),
            temperatures,
        ))
    }

    /// Calculate every duplex independently. A failing duplex is logged and
    /// its error returned in place; the others are unaffected. Results keep
    /// the input order.
    pub fn calculate_batch(&self, duplexes: &[Duplex]) -> Vec<(String, Result<TmResult>)> {
        duplexes
            .par_iter()
            .map(|duplex| {
                let result = self.calculate(duplex);
                if let Err(e) = &result {
                    tracing::warn!("Skipping duplex {}: {}", duplex.name, e);
                }
                (duplex.name.clone(), result)
            })
            .collect()
    }
}
