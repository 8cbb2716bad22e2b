//! Read named duplexes from a delimited text file.
//!
//! The file has a header row and up to three columns: the duplex name, the
//! first strand (5' -> 3') and, optionally, the second strand. Columns are
//! separated by tabs or commas; the header decides which. Blank lines and
//! lines starting with `#` are ignored. A row with an invalid strand, no
//! first strand or no name is logged and skipped; the rest of the file is
//! still read. Duplicate names reject the whole file.

use std::path::Path;

use rustc_hash::FxHashSet as HashSet;

use crate::{Conditions, Duplex, Error, Orientation, Result, Strand};

/// Read every duplex of `path`, all under the same `conditions`.
/// `orientation` applies to every second strand in the file.
pub fn read_duplexes(
    path: &Path,
    orientation: Orientation,
    conditions: Conditions,
) -> Result<Vec<Duplex>> {
    tracing::info!("Reading input file {:?}", path);
    let contents = std::fs::read_to_string(path)?;
    parse_duplexes(&contents, orientation, conditions)
}

/// Parse duplexes from the contents of an input file.
pub fn parse_duplexes(
    contents: &str,
    orientation: Orientation,
    conditions: Conditions,
) -> Result<Vec<Duplex>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(contents))
        .has_headers(true)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    let mut seen = HashSet::default();
    let mut duplexes = Vec::new();

    for record in rdr.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let line = record.position().map_or(0, csv::Position::line);
        let duplex = match parse_row(&record, orientation, conditions) {
            Ok(duplex) => duplex,
            Err(e) => {
                tracing::warn!("Skipping line {}: {}", line, e);
                continue;
            }
        };
        if !seen.insert(duplex.name.clone()) {
            return Err(Error::DuplicateName(duplex.name));
        }
        duplexes.push(duplex);
    }

    tracing::debug!("Parsed {} duplexes", duplexes.len());
    Ok(duplexes)
}

/// One duplex from a non-empty record: name, first strand, optional second.
fn parse_row(
    record: &csv::StringRecord,
    orientation: Orientation,
    conditions: Conditions,
) -> Result<Duplex> {
    let name = record.get(0).unwrap_or_default();
    let strand = |column: usize| -> Result<Option<Strand>> {
        record
            .get(column)
            .filter(|s| !s.is_empty())
            .map(|s| Strand::new(s).map_err(|e| in_duplex(e, name)))
            .transpose()
    };

    let Some(primary) = strand(1)? else {
        return Err(Error::InvalidSequence {
            sequence: String::new(),
            reason: format!("duplex {name:?} has no first strand"),
        });
    };
    if name.is_empty() {
        return Err(Error::InvalidSequence {
            sequence: primary.to_string(),
            reason: "row without a duplex name".into(),
        });
    }

    let mut duplex = Duplex::new(name, primary, conditions);
    if let Some(secondary) = strand(2)? {
        duplex = duplex.with_secondary(secondary, orientation);
    }
    Ok(duplex)
}

fn in_duplex(e: Error, name: &str) -> Error {
    match e {
        Error::InvalidSequence { sequence, reason } => Error::InvalidSequence {
            sequence,
            reason: format!("{reason} (duplex {name:?})"),
        },
        other => other,
    }
}

fn detect_delimiter(contents: &str) -> u8 {
    contents
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with('#'))
        .map_or(b'\t', |header| if header.contains('\t') { b'\t' } else { b',' })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tab_delimited() {
        let contents = "Name\tStrand1\tStrand2\n\
                        # a comment\n\
                        p1\tATCGATCG\n\
                        \n\
                        p2\tatcgatcg\tTAGCTAGC\n";
        let duplexes =
            parse_duplexes(contents, Orientation::ThreeToFive, Conditions::default()).unwrap();

        assert_eq!(duplexes.len(), 2);
        assert_eq!(duplexes[0].name, "p1");
        assert!(duplexes[0].secondary.is_none());
        assert_eq!(duplexes[1].primary.as_bytes(), b"ATCGATCG");
        let (secondary, orientation) = duplexes[1].secondary.as_ref().unwrap();
        assert_eq!(secondary.as_bytes(), b"TAGCTAGC");
        assert_eq!(*orientation, Orientation::ThreeToFive);
    }

    #[test]
    fn comma_delimited() {
        let contents = "name,s1,s2\nx, GGGACCGCCT ,\ny,CCATTGCTACC,GGTAGCAATGG\n";
        let duplexes =
            parse_duplexes(contents, Orientation::FiveToThree, Conditions::default()).unwrap();

        assert_eq!(duplexes.len(), 2);
        assert_eq!(duplexes[0].primary.as_bytes(), b"GGGACCGCCT");
        assert!(duplexes[0].secondary.is_none());
        assert_eq!(
            duplexes[1].secondary.as_ref().map(|(_, o)| *o),
            Some(Orientation::FiveToThree)
        );
    }

    #[test]
    fn duplicate_names() {
        let contents = "name,s1\na,ACGT\na,TTTT\n";
        let err = parse_duplexes(contents, Orientation::ThreeToFive, Conditions::default());
        assert!(matches!(err, Err(Error::DuplicateName(n)) if n == "a"));
    }

    #[test]
    fn not_dna() {
        let record = csv::StringRecord::from(vec!["bad", "ACGU"]);
        let err = parse_row(&record, Orientation::ThreeToFive, Conditions::default());
        assert!(matches!(err, Err(Error::InvalidSequence { reason, .. }) if reason.contains("bad")));
    }

    #[test]
    fn missing_first_strand() {
        let record = csv::StringRecord::from(vec!["lonely"]);
        let err = parse_row(&record, Orientation::ThreeToFive, Conditions::default());
        assert!(matches!(err, Err(Error::InvalidSequence { .. })));

        let record = csv::StringRecord::from(vec!["", "ACGT"]);
        let err = parse_row(&record, Orientation::ThreeToFive, Conditions::default());
        assert!(matches!(err, Err(Error::InvalidSequence { .. })));
    }

    /// Malformed rows are dropped and the rows around them still load.
    #[test]
    fn bad_rows_are_skipped() {
        crate::logging::init_test();
        let contents = "name,s1,s2\n\
                        first,ATCGATCG,\n\
                        rna,ACGU,\n\
                        lonely\n\
                        ,GGGACCGCCT\n\
                        bad_partner,ATCGATCG,TAGXTAGC\n\
                        last,GGGACCGCCT,\n";
        let duplexes =
            parse_duplexes(contents, Orientation::ThreeToFive, Conditions::default()).unwrap();

        let names: Vec<&str> = duplexes.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["first", "last"]);
    }

    /// A skipped row does not reserve its name.
    #[test]
    fn duplicate_after_skipped_row() {
        let contents = "name,s1\na,ACGU\na,ACGT\nb,ACGT\nb,TTTT\n";
        let err = parse_duplexes(contents, Orientation::ThreeToFive, Conditions::default());
        assert!(matches!(err, Err(Error::DuplicateName(n)) if n == "b"));
    }

    #[test]
    fn read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oligos.txt");
        std::fs::write(&path, "Name\tS1\nfoo\tCGATCG\n").unwrap();

        let duplexes =
            read_duplexes(&path, Orientation::ThreeToFive, Conditions::default()).unwrap();
        assert_eq!(duplexes.len(), 1);
        assert_eq!(duplexes[0].name, "foo");
    }
}
