//! DNA nearest-neighbor enthalpy and entropy parameters.

use std::path::Path;

use serde::Deserialize;

use crate::{BpEnergy, Error, Pairing, Result, Step, util::ByteStr};

/// Watson-Crick stacks, initiation, terminal A/T and symmetry terms.
///
/// The Thermodynamics of DNA Structural Motifs
/// SantaLucia and Hicks, 2004
pub static RAW_NN: [(&[u8], (f64, f64)); 14] = [
    (b"init", (0.2, -5.7)),
    (b"init_G/C", (0.0, 0.0)),
    (b"init_A/T", (2.2, 6.9)),
    (b"sym", (0.0, -1.4)),
    (b"AA/TT", (-7.6, -21.3)),
    (b"AT/TA", (-7.2, -20.4)),
    (b"TA/AT", (-7.2, -21.3)),
    (b"CA/GT", (-8.5, -22.7)),
    (b"GT/CA", (-8.4, -22.4)),
    (b"CT/GA", (-7.8, -21.0)),
    (b"GA/CT", (-8.2, -22.2)),
    (b"CG/GC", (-10.6, -27.2)),
    (b"GC/CG", (-9.8, -24.4)),
    (b"GG/CC", (-8.0, -19.9)),
];

/// Internal mismatch table (DNA)
/// Allawi & SantaLucia (1997), Biochemistry 36: 10581-10594
/// Allawi & SantaLucia (1998), Biochemistry 37: 9435-9444
/// Allawi & SantaLucia (1998), Biochemistry 37: 2170-2179 *
/// Allawi & SantaLucia (1998), Nucl Acids Res 26: 2694-2701 *
/// Peyret et al. (1999), Biochemistry 38: 3468-3477 *
pub static RAW_INTERNAL_MM: [(&[u8], (f64, f64)); 51] = [
    (b"AG/TT", (1.0, 0.9)),
    (b"AT/TG", (-2.5, -8.3)),
    (b"CG/GT", (-4.1, -11.7)),
    (b"CT/GG", (-2.8, -8.0)),
    (b"GG/CT", (3.3, 10.4)),
    (b"GG/TT", (5.8, 16.3)),
    (b"GT/CG", (-4.4, -12.3)),
    (b"GT/TG", (4.1, 9.5)),
    (b"TG/AT", (-0.1, -1.7)),
    (b"TG/GT", (-1.4, -6.2)),
    (b"TT/AG", (-1.3, -5.3)),
    (b"AA/TG", (-0.6, -2.3)),
    (b"AG/TA", (-0.7, -2.3)),
    (b"CA/GG", (-0.7, -2.3)),
    (b"CG/GA", (-4.0, -13.2)),
    (b"GA/CG", (-0.6, -1.0)),
    (b"GG/CA", (0.5, 3.2)),
    (b"TA/AG", (0.7, 0.7)),
    (b"TG/AA", (3.0, 7.4)),
    (b"AC/TT", (0.7, 0.2)),
    (b"AT/TC", (-1.2, -6.2)),
    (b"CC/GT", (-0.8, -4.5)),
    (b"CT/GC", (-1.5, -6.1)),
    (b"GC/CT", (2.3, 5.4)),
    (b"GT/CC", (5.2, 13.5)),
    (b"TC/AT", (1.2, 0.7)),
    (b"TT/AC", (1.0, 0.7)),
    (b"AA/TC", (2.3, 4.6)),
    (b"AC/TA", (5.3, 14.6)),
    (b"CA/GC", (1.9, 3.7)),
    (b"CC/GA", (0.6, -0.6)),
    (b"GA/CC", (5.2, 14.2)),
    (b"GC/CA", (-0.7, -3.8)),
    (b"TA/AC", (3.4, 8.0)),
    (b"TC/AA", (7.6, 20.2)),
    (b"AA/TA", (1.2, 1.7)),
    (b"CA/GA", (-0.9, -4.2)),
    (b"GA/CA", (-2.9, -9.8)),
    (b"TA/AA", (4.7, 12.9)),
    (b"AC/TC", (0.0, -4.4)),
    (b"CC/GC", (-1.5, -7.2)),
    (b"GC/CC", (3.6, 8.9)),
    (b"TC/AC", (6.1, 16.4)),
    (b"AG/TG", (-3.1, -9.5)),
    (b"CG/GG", (-4.9, -15.3)),
    (b"GG/CG", (-6.0, -15.8)),
    (b"TG/AG", (1.6, 3.6)),
    (b"AT/TT", (-2.7, -10.8)),
    (b"CT/GT", (-5.0, -15.8)),
    (b"GT/CT", (-2.2, -8.4)),
    (b"TT/AT", (0.2, -1.5)),
];

/// Match-step table file inside a parameter directory.
pub const MATCH_FILE: &str = "nn_match.csv";
/// Mismatch-step table file inside a parameter directory.
pub const MISMATCH_FILE: &str = "nn_mismatch.csv";

/// Non-step keys that a match table must carry.
pub const CONSTANTS: [&[u8]; 4] = [b"init", b"init_A/T", b"init_G/C", b"sym"];

/// The read-only parameter set used for one run.
#[derive(Debug, Clone)]
pub struct NnParams {
    /// Watson-Crick steps plus the initiation and symmetry constants
    pub nn: BpEnergy,
    /// Steps containing a single mismatch
    pub internal_mm: BpEnergy,
}

impl Default for NnParams {
    fn default() -> Self {
        Self::unified()
    }
}

/// One row of a parameter csv: `step,dh,ds`
#[derive(Debug, Deserialize)]
struct RawEntry {
    step: String,
    dh: f64,
    ds: f64,
}

impl NnParams {
    /// The built-in unified parameters.
    pub fn unified() -> Self {
        Self {
            nn: BpEnergy::build(RAW_NN),
            internal_mm: BpEnergy::build(RAW_INTERNAL_MM),
        }
    }

    /// Load replacement tables from `dir/nn_match.csv` and
    /// `dir/nn_mismatch.csv`.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let matches = read_table(&dir.join(MATCH_FILE), true)?;
        let mismatches = read_table(&dir.join(MISMATCH_FILE), false)?;

        for constant in CONSTANTS {
            if !matches.iter().any(|e| e.step.as_bytes() == constant) {
                return Err(Error::InvalidParameter(format!(
                    "{} is missing '{}'",
                    MATCH_FILE,
                    ByteStr(constant)
                )));
            }
        }

        tracing::info!(
            "Loaded {} match and {} mismatch parameters from {:?}",
            matches.len(),
            mismatches.len(),
            dir
        );

        Ok(Self {
            nn: BpEnergy::build(entries(&matches)),
            internal_mm: BpEnergy::build(entries(&mismatches)),
        })
    }

    /// Enthalpy and entropy of one nearest-neighbor step. The step's
    /// pairing selects the table; there is no fallback between them.
    pub fn lookup(&self, step: &Step) -> Result<(f64, f64)> {
        let table = match step.pairing {
            Pairing::Match => &self.nn,
            Pairing::Mismatch => &self.internal_mm,
        };
        table.get(step.key).ok_or_else(|| Error::ParameterNotFound {
            step: ByteStr(step.key).to_string(),
        })
    }

    /// A non-step term of the match table, such as `init` or `sym`.
    pub fn constant(&self, key: &[u8]) -> Result<(f64, f64)> {
        self.nn
            .get_slice(key)
            .ok_or_else(|| Error::ParameterNotFound {
                step: ByteStr(key).to_string(),
            })
    }
}

fn entries(table: &[RawEntry]) -> impl Iterator<Item = (&[u8], (f64, f64))> {
    table.iter().map(|e| (e.step.as_bytes(), (e.dh, e.ds)))
}

fn is_step(key: &[u8]) -> bool {
    key.len() == 5
        && key[2] == b'/'
        && [0, 1, 3, 4].iter().all(|&i| b"ACGT".contains(&key[i]))
}

fn read_table(path: &Path, allow_constants: bool) -> Result<Vec<RawEntry>> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut entries = Vec::new();
    for row in rdr.deserialize() {
        let entry: RawEntry = row?;
        let key = entry.step.as_bytes();
        let known = is_step(key) || (allow_constants && CONSTANTS.contains(&key));
        if !known || !entry.dh.is_finite() || !entry.ds.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "{} in {:?}",
                entry.step, path
            )));
        }
        entries.push(entry);
    }
    Ok(entries)
}
