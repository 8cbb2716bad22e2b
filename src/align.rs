//! Pair two strands position by position and classify each pair

use std::fmt::Display;

use crate::{Error, Orientation, Result, Strand, Symmetry, util::ByteStr};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pairing {
    Match,
    Mismatch,
}

/// One position of the duplex: a base of the top strand (5' -> 3') over the
/// base of the bottom strand it faces (3' -> 5').
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedPair {
    pub top: u8,
    pub bottom: u8,
    pub pairing: Pairing,
    pub index: usize,
}

impl AlignedPair {
    fn new(index: usize, top: u8, bottom: u8) -> Self {
        let pairing = if is_watson_crick(top, bottom) {
            Pairing::Match
        } else {
            Pairing::Mismatch
        };
        Self {
            top,
            bottom,
            pairing,
            index,
        }
    }

    /// A Watson-Crick G-C or C-G pair
    pub fn is_gc(&self) -> bool {
        matches!((self.top, self.bottom), (b'G', b'C') | (b'C', b'G'))
    }
}

/// Two consecutive aligned pairs, keyed `XY/ZW` with the top bases first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub key: [u8; 5],
    pub pairing: Pairing,
}

impl Step {
    pub fn new(left: &AlignedPair, right: &AlignedPair) -> Self {
        let pairing = if left.pairing == Pairing::Mismatch || right.pairing == Pairing::Mismatch {
            Pairing::Mismatch
        } else {
            Pairing::Match
        };
        Self {
            key: [left.top, right.top, b'/', left.bottom, right.bottom],
            pairing,
        }
    }
}

/// A validated duplex: no length difference and no adjacent mismatches.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    pairs: Vec<AlignedPair>,
    symmetry: Symmetry,
}

impl Alignment {
    pub fn pairs(&self) -> &[AlignedPair] {
        &self.pairs
    }

    pub fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Nearest-neighbor steps, 5' -> 3' along the top strand.
    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        self.pairs.windows(2).map(|w| Step::new(&w[0], &w[1]))
    }

    pub fn mismatches(&self) -> usize {
        self.pairs
            .iter()
            .filter(|p| p.pairing == Pairing::Mismatch)
            .count()
    }

    pub fn top(&self) -> Vec<u8> {
        self.pairs.iter().map(|p| p.top).collect()
    }

    pub fn bottom(&self) -> Vec<u8> {
        self.pairs.iter().map(|p| p.bottom).collect()
    }

    /// `TOP/BOTTOM`
    pub fn duplex(&self) -> String {
        format!("{}/{}", ByteStr(self.top()), ByteStr(self.bottom()))
    }
}

/// Three-line diagram, `|` for a match and `x` for a mismatch:
///
/// ```text
/// 5'CGCAGT3'
///   |||x||
/// 3'GCGACA5'
/// ```
impl Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bars: String = self
            .pairs
            .iter()
            .map(|p| match p.pairing {
                Pairing::Match => '|',
                Pairing::Mismatch => 'x',
            })
            .collect();
        writeln!(f, "5'{}3'", ByteStr(self.top()))?;
        writeln!(f, "  {bars}")?;
        write!(f, "3'{}5'", ByteStr(self.bottom()))
    }
}

/// Align `primary` against `secondary`, or against its own complement when
/// no secondary strand is given.
pub fn align(primary: &Strand, secondary: Option<(&Strand, Orientation)>) -> Result<Alignment> {
    let top = primary.as_bytes();

    if top.len() < 2 {
        return Err(Error::InvalidSequence {
            sequence: primary.to_string(),
            reason: format!("{}bp is too short for a nearest-neighbor step", top.len()),
        });
    }

    let bottom: Vec<u8> = match secondary {
        None => top.iter().map(|&b| complement(b)).collect(),
        Some((strand, Orientation::ThreeToFive)) => strand.as_bytes().to_vec(),
        Some((strand, Orientation::FiveToThree)) => strand.as_bytes().iter().rev().copied().collect(),
    };

    if top.len() != bottom.len() {
        return Err(Error::LengthMismatch {
            primary: top.len(),
            secondary: bottom.len(),
        });
    }

    let alignment = Alignment {
        pairs: top
            .iter()
            .zip(&bottom)
            .enumerate()
            .map(|(i, (&t, &b))| AlignedPair::new(i, t, b))
            .collect(),
        symmetry: symmetry(top),
    };

    if let Some(w) = alignment
        .pairs
        .windows(2)
        .find(|w| w[0].pairing == Pairing::Mismatch && w[1].pairing == Pairing::Mismatch)
    {
        return Err(Error::ConsecutiveMismatch {
            first: w[0].index,
            second: w[1].index,
            diagram: alignment.to_string(),
        });
    }

    tracing::trace!(
        "aligned {} with {} mismatch(es)",
        alignment.duplex(),
        alignment.mismatches()
    );

    Ok(alignment)
}

/// Watson-Crick complement. Other symbols are returned unchanged.
pub const fn complement(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' => b'A',
        b'G' => b'C',
        b'C' => b'G',
        other => other,
    }
}

pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter().rev().map(|&b| complement(b)).collect()
}

pub fn is_watson_crick(a: u8, b: u8) -> bool {
    matches!(
        (a, b),
        (b'A', b'T') | (b'T', b'A') | (b'G', b'C') | (b'C', b'G')
    )
}

/// Self-complementary iff the strand equals its own reverse complement.
pub fn symmetry(seq: &[u8]) -> Symmetry {
    if seq == reverse_complement(seq).as_slice() {
        Symmetry::SelfComplementary
    } else {
        Symmetry::NonSelfComplementary
    }
}
