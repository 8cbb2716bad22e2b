#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

mod util;

pub mod align;
pub mod config;
pub mod dna;
pub mod engine;
pub mod error;
pub mod input;
pub mod logging;
pub mod report;
pub mod salt;
pub mod thermo;
pub mod tm;
pub mod types;

pub use align::{AlignedPair, Alignment, Pairing, Step, align};
pub use config::Config;
pub use dna::NnParams;
pub use engine::Calculator;
pub use error::{Error, Result};
pub use report::Verbosity;
pub use salt::SaltCorrection;
pub use types::*;

use rustc_hash::FxHashMap as HashMap;

/// Enthalpy (kcal/mol) and entropy (cal/mol·K) keyed by step bytes,
/// e.g. `b"AG/TC"` or `b"init_A/T"`.
#[derive(Debug, Clone, Default)]
pub struct BpEnergy {
    values: HashMap<u64, (f64, f64)>,
}

/// Pack up to eight bytes into a big-endian key, zero padded.
pub fn interpret_bytes<'a>(mut b: impl Iterator<Item = &'a u8>) -> u64 {
    u64::from_be_bytes(std::array::from_fn(|_| b.next().copied().unwrap_or(0)))
}

impl BpEnergy {
    /// Build a table from raw entries. Every five-byte step (`XY/ZW`) is
    /// also stored under its reversed key (`WZ/YX`), which is the same
    /// step read from the other strand. A reversed key never overwrites an
    /// entry that is already present.
    ///
    /// Keys must be one to eight bytes long. Only the built-in tables and
    /// [`NnParams::from_dir`], which checks every key first, build tables.
    pub(crate) fn build<'a, I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (&'a [u8], (f64, f64))>,
    {
        let mut values = HashMap::default();

        for (b, v) in iter {
            assert!(!b.is_empty() && b.len() <= 8);
            let forward = interpret_bytes(b.iter());
            values.insert(forward, v);

            if b.len() == 5 {
                let backward = interpret_bytes(b.iter().rev());
                if !values.contains_key(&backward) {
                    values.insert(backward, v);
                }
            }
        }

        Self { values }
    }

    pub fn get<const N: usize>(&self, b: [u8; N]) -> Option<(f64, f64)> {
        self.get_slice(&b)
    }

    pub fn get_slice(&self, b: &[u8]) -> Option<(f64, f64)> {
        if b.len() > 8 {
            return None;
        }
        self.values.get(&interpret_bytes(b.iter())).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
