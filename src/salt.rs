//! Salt correction of the duplex entropy
//!
//! Divalent cations are folded into an equivalent monovalent concentration
//! following von Ahsen et al. (2001), Clinical Chemistry 47(11): 1956-1961:
//!
//! ```text
//! [Na+eq] = [Mon+] + 120 * sqrt([Mg2+] - [dNTP])     (mM)
//! ```
//!
//! and the entropy is corrected per phosphate as in
//! SantaLucia (1998), PNAS 95: 1460-1465:
//!
//! ```text
//! dS' = dS + 0.368 * N * ln([Na+eq])                   (M)
//! ```
//!
//! where N is the number of nearest-neighbor steps. Enthalpy is unaffected.

use serde::{Deserialize, Serialize};

use crate::{Conditions, Error, Result, ThermoProfile};

/// Coefficients of the salt correction. Kept apart from the
/// nearest-neighbor tables so either can be recalibrated alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaltCorrection {
    #[serde(default = "default_version")]
    pub version: String,

    /// mM^(1/2) multiplier of the free divalent concentration
    #[serde(default = "default_divalent_factor")]
    pub divalent_factor: f64,

    /// cal/mol·K per step and ln(M)
    #[serde(default = "default_entropy_slope")]
    pub entropy_slope: f64,

    /// Highest divalent concentration accepted, M
    #[serde(default = "default_max_divalent")]
    pub max_divalent: f64,
}

fn default_version() -> String {
    "von-ahsen-2001".into()
}

fn default_divalent_factor() -> f64 {
    120.0
}

fn default_entropy_slope() -> f64 {
    0.368
}

fn default_max_divalent() -> f64 {
    1.0
}

impl Default for SaltCorrection {
    fn default() -> Self {
        Self {
            version: default_version(),
            divalent_factor: default_divalent_factor(),
            entropy_slope: default_entropy_slope(),
            max_divalent: default_max_divalent(),
        }
    }
}

impl SaltCorrection {
    /// Monovalent-equivalent cation concentration in M.
    pub fn equivalent_monovalent(&self, conditions: &Conditions) -> Result<f64> {
        let Conditions {
            monovalent,
            divalent,
            dntp,
            ..
        } = *conditions;

        for (name, c) in [
            ("monovalent", monovalent),
            ("divalent", divalent),
            ("dNTP", dntp),
        ] {
            if !c.is_finite() || c < 0.0 {
                return Err(Error::InvalidConditions(format!(
                    "{name} concentration must not be negative, got {c} M"
                )));
            }
        }
        if divalent > self.max_divalent {
            return Err(Error::InvalidConditions(format!(
                "divalent concentration {divalent} M exceeds {} M",
                self.max_divalent
            )));
        }
        if dntp > divalent {
            return Err(Error::InvalidConditions(format!(
                "dNTP concentration ({dntp} M) exceeds divalent concentration ({divalent} M)"
            )));
        }

        // the published relation is in mM
        let free_mm = (divalent - dntp) * 1e3;
        let equivalent = monovalent + self.divalent_factor * free_mm.sqrt() * 1e-3;

        if equivalent <= 0.0 {
            return Err(Error::InvalidConditions(
                "no monovalent or divalent cations".into(),
            ));
        }
        Ok(equivalent)
    }

    /// Correct the entropy of a duplex with `steps` nearest-neighbor steps.
    pub fn correct(
        &self,
        raw: ThermoProfile,
        steps: usize,
        conditions: &Conditions,
    ) -> Result<ThermoProfile> {
        let na_eq = self.equivalent_monovalent(conditions)?;
        let ds = raw.ds + self.entropy_slope * steps as f64 * na_eq.ln();
        Ok(ThermoProfile::new(raw.dh, ds))
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::SaltCorrection;
    use crate::{Conditions, Error, ThermoProfile};

    fn cond(monovalent: f64, divalent: f64, dntp: f64) -> Conditions {
        Conditions {
            monovalent,
            divalent,
            dntp,
            ..Conditions::default()
        }
    }

    #[test]
    fn equivalent_without_divalent() {
        let salt = SaltCorrection::default();
        let na = salt.equivalent_monovalent(&cond(0.05, 0.0, 0.0)).unwrap();
        assert_relative_eq!(na, 0.05);
    }

    #[test]
    fn equivalent_with_divalent() {
        // 50 mM Na+ and 1.5 mM Mg2+: 50 + 120 * sqrt(1.5) mM
        let salt = SaltCorrection::default();
        let na = salt.equivalent_monovalent(&cond(0.05, 1.5e-3, 0.0)).unwrap();
        assert_relative_eq!(na, 0.05 + 0.12 * 1.5f64.sqrt(), epsilon = 1e-12);

        // dNTPs chelate part of the magnesium
        let chelated = salt
            .equivalent_monovalent(&cond(0.05, 1.5e-3, 0.8e-3))
            .unwrap();
        assert_relative_eq!(chelated, 0.05 + 0.12 * 0.7f64.sqrt(), epsilon = 1e-12);
    }

    /// Divalent ions count sub-linearly
    #[test]
    fn divalent_is_square_root() {
        let salt = SaltCorrection::default();
        let one = salt.equivalent_monovalent(&cond(0.0, 1e-3, 0.0)).unwrap();
        let four = salt.equivalent_monovalent(&cond(0.0, 4e-3, 0.0)).unwrap();
        assert_relative_eq!(four, 2.0 * one, epsilon = 1e-12);
    }

    #[test]
    fn one_molar_is_neutral() {
        let salt = SaltCorrection::default();
        let raw = ThermoProfile::new(-57.8, -160.6);
        let corrected = salt.correct(raw, 7, &cond(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(corrected, raw);
    }

    #[test]
    fn enthalpy_untouched() {
        let salt = SaltCorrection::default();
        let raw = ThermoProfile::new(-57.8, -160.6);
        let corrected = salt.correct(raw, 7, &cond(0.05, 0.0, 0.0)).unwrap();
        assert_eq!(corrected.dh, raw.dh);
        assert_relative_eq!(corrected.ds, -160.6 + 0.368 * 7.0 * 0.05f64.ln());
    }

    #[test]
    fn entropy_rises_with_salt() {
        let salt = SaltCorrection::default();
        let raw = ThermoProfile::new(-57.8, -160.6);
        let mut last = f64::NEG_INFINITY;
        for na in [0.01, 0.05, 0.1, 0.5, 1.0] {
            let ds = salt.correct(raw, 7, &cond(na, 0.0, 0.0)).unwrap().ds;
            assert!(ds > last);
            last = ds;
        }
    }

    #[test]
    fn rejects_bad_conditions() {
        let salt = SaltCorrection::default();
        let cases = [
            cond(-0.05, 0.0, 0.0),
            cond(0.05, -1e-3, 0.0),
            cond(0.05, 2.0, 0.0),
            cond(0.05, 1e-3, 2e-3),
            cond(0.0, 0.0, 0.0),
            cond(f64::NAN, 0.0, 0.0),
        ];
        for c in cases {
            assert!(matches!(
                salt.equivalent_monovalent(&c),
                Err(Error::InvalidConditions(_))
            ));
        }
    }

    #[test]
    fn partial_toml() {
        let salt: SaltCorrection = toml::from_str("divalent_factor = 100.0").unwrap();
        assert_eq!(salt.divalent_factor, 100.0);
        assert_eq!(salt.entropy_slope, 0.368);
        assert_eq!(salt.version, "von-ahsen-2001");
    }
}
