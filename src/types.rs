//! Types shared between the aligner, the solvers and the reporting layer

use crate::{
    Error, Result,
    util::{ByteStr, milli, nano},
};

/// A single DNA strand, 5' -> 3', over {A, C, G, T}.
#[derive(Debug, Clone, PartialEq)]
pub struct Strand {
    seq: Vec<u8>,
    concentration: Option<f64>,
}

impl Strand {
    /// Validate and upper-case a sequence.
    pub fn new(seq: impl AsRef<[u8]>) -> Result<Self> {
        let seq = seq.as_ref().to_ascii_uppercase();

        if seq.is_empty() {
            return Err(Error::InvalidSequence {
                sequence: String::new(),
                reason: "empty strand".into(),
            });
        }
        if let Some(&bad) = seq.iter().find(|&&b| !b"ACGT".contains(&b)) {
            return Err(Error::InvalidSequence {
                sequence: ByteStr(&seq).to_string(),
                reason: format!(
                    "the strand contains '{}', only A, C, G and T are allowed",
                    bad as char
                ),
            });
        }

        Ok(Self {
            seq,
            concentration: None,
        })
    }

    /// Give this strand its own concentration (mol/L), overriding the
    /// primer or template concentration of the duplex's conditions.
    pub fn with_concentration(mut self, molar: f64) -> Self {
        self.concentration = Some(molar);
        self
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.seq
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    pub fn concentration(&self) -> Option<f64> {
        self.concentration
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", ByteStr(&self.seq))
    }
}

/// How a secondary strand was written down by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Already antiparallel: position i pairs with position i of the primary
    #[default]
    ThreeToFive,
    /// Written 5' -> 3' and must be reversed before pairing
    FiveToThree,
}

/// Whether the duplex is formed by one sequence pairing with itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symmetry {
    SelfComplementary,
    NonSelfComplementary,
}

impl Symmetry {
    /// Divisor of the total strand concentration in the Tm equation.
    pub const fn factor(self) -> f64 {
        match self {
            Symmetry::SelfComplementary => 1.0,
            Symmetry::NonSelfComplementary => 4.0,
        }
    }

    /// Total strand concentration (mol/L) of the literature standard state.
    pub const fn standard_total(self) -> f64 {
        match self {
            Symmetry::SelfComplementary => 1e-3,
            Symmetry::NonSelfComplementary => 4e-3,
        }
    }

    pub const fn is_self_complementary(self) -> bool {
        matches!(self, Symmetry::SelfComplementary)
    }
}

/// Buffer conditions. Concentrations are molar, temperature is celsius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conditions {
    pub temperature: f64,
    pub primer: f64,
    pub template: f64,
    pub monovalent: f64,
    pub divalent: f64,
    pub dntp: f64,
}

impl Default for Conditions {
    fn default() -> Self {
        Self {
            temperature: 65.0,
            primer: nano(300.0),
            template: nano(1.38e-15),
            monovalent: milli(100.0),
            divalent: 0.0,
            dntp: 0.0,
        }
    }
}

impl Conditions {
    pub const MIN_TEMPERATURE: f64 = -100.0;
    pub const MAX_TEMPERATURE: f64 = 200.0;

    /// Check the strand concentrations and the temperature. Cation
    /// concentrations are checked by the salt correction.
    pub fn validate(&self) -> Result<()> {
        if !self.temperature.is_finite()
            || !(Self::MIN_TEMPERATURE..=Self::MAX_TEMPERATURE).contains(&self.temperature)
        {
            return Err(Error::InvalidConditions(format!(
                "temperature {} C is outside [{}, {}] C",
                self.temperature,
                Self::MIN_TEMPERATURE,
                Self::MAX_TEMPERATURE
            )));
        }
        for (name, c) in [("primer", self.primer), ("template", self.template)] {
            if !c.is_finite() || c <= 0.0 {
                return Err(Error::InvalidConditions(format!(
                    "{name} concentration must be positive, got {c} M"
                )));
            }
        }
        if self.primer < self.template {
            return Err(Error::InvalidConditions(format!(
                "primer concentration ({} M) must not be lower than template ({} M)",
                self.primer, self.template
            )));
        }
        Ok(())
    }

    /// Temperature in kelvin
    pub fn kelvin(&self) -> f64 {
        self.temperature + crate::tm::KELVIN
    }

    /// Sum of both strand concentrations
    pub fn total_strand(&self) -> f64 {
        self.primer + self.template
    }
}

/// A named duplex as handed over by the input layer.
#[derive(Debug, Clone)]
pub struct Duplex {
    pub name: String,
    pub primary: Strand,
    pub secondary: Option<(Strand, Orientation)>,
    pub conditions: Conditions,
}

impl Duplex {
    /// A perfect-match duplex of `primary` with its own complement.
    pub fn new(name: impl Into<String>, primary: Strand, conditions: Conditions) -> Self {
        Self {
            name: name.into(),
            primary,
            secondary: None,
            conditions,
        }
    }

    pub fn with_secondary(mut self, strand: Strand, orientation: Orientation) -> Self {
        self.secondary = Some((strand, orientation));
        self
    }

    /// Conditions with any per-strand concentrations applied.
    pub fn conditions(&self) -> Conditions {
        let mut conditions = self.conditions;
        if let Some(c) = self.primary.concentration() {
            conditions.primer = c;
        }
        if let Some(c) = self.secondary.as_ref().and_then(|(s, _)| s.concentration()) {
            conditions.template = c;
        }
        conditions
    }
}

/// Enthalpy (kcal/mol) and entropy (cal/mol·K) of a duplex.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ThermoProfile {
    pub dh: f64,
    pub ds: f64,
}

impl ThermoProfile {
    pub const fn new(dh: f64, ds: f64) -> Self {
        Self { dh, ds }
    }
}

/// Values under the caller's conditions, salt corrected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActualThermo {
    /// Melting temperature, celsius
    pub tm: f64,
    /// Percent of the less abundant strand in duplex at the conditions' temperature
    pub per_bound: f64,
    /// Free energy at the conditions' temperature, kcal/mol
    pub dg: f64,
    pub dh: f64,
    /// Salt corrected entropy, cal/mol·K
    pub ds: f64,
}

/// Values at the literature standard state: 1 M Na+, 4 mM total strand
/// (1 mM when self-complementary) and 37 C, without salt correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardThermo {
    pub tm: f64,
    pub dg: f64,
    pub ds: f64,
}

/// Everything computed for one duplex.
#[derive(Debug, Clone, PartialEq)]
pub struct TmResult {
    pub name: String,
    /// `top/bottom`, top 5' -> 3' and bottom 3' -> 5'
    pub duplex: String,
    pub symmetry: Symmetry,
    pub actual: ActualThermo,
    pub standard: StandardThermo,
    pub conditions: Conditions,
}
