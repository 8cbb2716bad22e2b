//! Tab-delimited report of calculated duplexes

use std::path::{Path, PathBuf};

use crate::TmResult;

pub const DELIMITER: &str = "\t";

/// Name given to a duplex entered on the command line
pub const COMMAND_LINE_NAME: &str = "YourSeq";

/// How much of a [`TmResult`] to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Name, duplex and tm
    #[default]
    Tm,
    /// Plus percent bound, dG, dH, dS, temperature and the conditions
    Thermo,
    /// Plus the standard-state tm, dG and dS
    Standard,
}

impl Verbosity {
    /// From a repeated flag count: none, `-v`, `-vv` or more.
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Tm,
            1 => Verbosity::Thermo,
            _ => Verbosity::Standard,
        }
    }
}

const TM_COLUMNS: [&str; 3] = ["Name", "Duplex", "Tm(C)"];
const THERMO_COLUMNS: [&str; 5] = [
    "PerBound(%)",
    "dG(kcal/mol)",
    "dH(kcal/mol)",
    "dS(e.u.)",
    "Temperature(C)",
];
const STANDARD_COLUMNS: [&str; 3] = ["Tm_std(C)", "dG_std(kcal/mol)", "dS_std(e.u.)"];
const CONDITION_COLUMNS: [&str; 4] = [
    "Cprimer(nM)",
    "Ctemplate(nM)",
    "C_mono(mM)",
    "C_divalent(mM)",
];

pub fn columns(verbosity: Verbosity) -> Vec<&'static str> {
    let mut columns = TM_COLUMNS.to_vec();
    if verbosity >= Verbosity::Thermo {
        columns.extend(THERMO_COLUMNS);
    }
    if verbosity >= Verbosity::Standard {
        columns.extend(STANDARD_COLUMNS);
    }
    if verbosity >= Verbosity::Thermo {
        columns.extend(CONDITION_COLUMNS);
    }
    columns
}

pub fn header(verbosity: Verbosity) -> String {
    columns(verbosity).join(DELIMITER)
}

pub fn format_row(result: &TmResult, verbosity: Verbosity) -> String {
    let mut fields = vec![
        result.name.clone(),
        result.duplex.clone(),
        format!("{:7.2}", result.actual.tm),
    ];

    if verbosity >= Verbosity::Thermo {
        let actual = &result.actual;
        fields.extend([
            format!("{:6.3e}%", actual.per_bound),
            format!("{:8.3}", actual.dg),
            format!("{:8.3}", actual.dh),
            format!("{:8.3}", actual.ds),
            format!("{:6.2}", result.conditions.temperature),
        ]);
    }
    if verbosity >= Verbosity::Standard {
        let standard = &result.standard;
        fields.extend([
            format!("{:7.2}", standard.tm),
            format!("{:8.3}", standard.dg),
            format!("{:8.3}", standard.ds),
        ]);
    }
    if verbosity >= Verbosity::Thermo {
        let c = &result.conditions;
        fields.extend([
            format!("{:7.4e}", c.primer * 1e9),
            format!("{:7.4e}", c.template * 1e9),
            format!("{:7.4e}", c.monovalent * 1e3),
            format!("{:7.4e}", c.divalent * 1e3),
        ]);
    }

    fields.join(DELIMITER)
}

/// Header plus one row per result, sorted by name.
pub fn render(results: &[TmResult], verbosity: Verbosity) -> Vec<String> {
    let mut sorted: Vec<&TmResult> = results.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    std::iter::once(header(verbosity))
        .chain(sorted.into_iter().map(|r| format_row(r, verbosity)))
        .collect()
}

/// `nntm.<input stem>.out.txt` in the working directory, or
/// `nntm.YourSeq.out.txt` when there is no input file.
pub fn default_output_path(input: Option<&Path>) -> PathBuf {
    let stem = input
        .and_then(Path::file_stem)
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| COMMAND_LINE_NAME.to_string());
    PathBuf::from(format!("nntm.{stem}.out.txt"))
}
