use std::path::PathBuf;

use clap::Parser;
use nntm_rs::{
    Calculator, Conditions, Config, Duplex, Error, Orientation, Result, Strand, Verbosity, input,
    report,
};

/// Duplex used when neither a file nor --s1 is given
const DEMO_DUPLEX: &str = "CGATCG";

/// Calculate DNA duplex melting temperatures with the nearest-neighbor model.
///
/// Input is a delimited file (-f), a duplex given with --s1 and optionally
/// --s2, or both. Without either a demo duplex is used.
#[derive(Parser, Debug)]
#[command(name = "nntm", version, about, long_about)]
struct Args {
    /// Comma or tab delimited file: name, first strand, optional second strand
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Output file [default: nntm.<input stem>.out.txt]
    #[arg(short, long)]
    outfile: Option<PathBuf>,

    /// First strand, 5' -> 3'
    #[arg(long)]
    s1: Option<String>,

    /// Second strand, 3' -> 5' unless --rev-s2 is given
    #[arg(long, requires = "s1")]
    s2: Option<String>,

    /// Second strands are written 5' -> 3' and must be reversed
    #[arg(short, long)]
    rev_s2: bool,

    /// Report thermodynamics (-v) and standard-state values (-vv)
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Temperature in celsius
    #[arg(short, long)]
    temperature: Option<f64>,

    /// Primer concentration in nM
    #[arg(long)]
    cp: Option<f64>,

    /// Template concentration in nM
    #[arg(long)]
    ct: Option<f64>,

    /// Monovalent cation concentration in mM
    #[arg(short, long)]
    na: Option<f64>,

    /// Divalent cation concentration in mM
    #[arg(short, long)]
    mg: Option<f64>,

    /// dNTP concentration in mM
    #[arg(long)]
    dntp: Option<f64>,

    /// Configuration file [default: $XDG_CONFIG_HOME/nntm/config.toml]
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    nntm_rs::logging::init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // command line flags take precedence over the configuration file
    let mut units = config.conditions.clone();
    let overrides = [
        (&mut units.temperature, args.temperature),
        (&mut units.primer, args.cp),
        (&mut units.template, args.ct),
        (&mut units.monovalent, args.na),
        (&mut units.divalent, args.mg),
        (&mut units.dntp, args.dntp),
    ];
    for (field, value) in overrides {
        if let Some(v) = value {
            *field = v;
        }
    }
    let conditions = units.to_conditions();

    let orientation = if args.rev_s2 {
        Orientation::FiveToThree
    } else {
        Orientation::ThreeToFive
    };

    let mut duplexes = match &args.file {
        Some(path) => input::read_duplexes(path, orientation, conditions)?,
        None => Vec::new(),
    };

    let s1 = match (&args.file, &args.s1) {
        (None, None) => {
            eprintln!("Using {DEMO_DUPLEX} as a demo duplex");
            Some(DEMO_DUPLEX)
        }
        (_, s1) => s1.as_deref(),
    };
    if let Some(s1) = s1 {
        if duplexes.iter().any(|d| d.name == report::COMMAND_LINE_NAME) {
            return Err(Error::DuplicateName(report::COMMAND_LINE_NAME.into()));
        }
        match command_line_duplex(s1, args.s2.as_deref(), orientation, conditions) {
            Ok(duplex) => duplexes.push(duplex),
            Err(e) => tracing::warn!("Skipping duplex {}: {}", report::COMMAND_LINE_NAME, e),
        }
    }

    let calculator = Calculator::from_config(&config)?;
    let results: Vec<_> = calculator
        .calculate_batch(&duplexes)
        .into_iter()
        .filter_map(|(_, result)| result.ok())
        .collect();

    let lines = report::render(&results, Verbosity::from_count(args.verbose));
    let text = lines.join("\n");
    println!("{text}");

    let outfile = args
        .outfile
        .unwrap_or_else(|| report::default_output_path(args.file.as_deref()));
    std::fs::write(&outfile, text + "\n")?;
    tracing::info!("Wrote {} results to {:?}", results.len(), outfile);

    Ok(())
}

fn command_line_duplex(
    s1: &str,
    s2: Option<&str>,
    orientation: Orientation,
    conditions: Conditions,
) -> Result<Duplex> {
    let duplex = Duplex::new(report::COMMAND_LINE_NAME, Strand::new(s1)?, conditions);
    Ok(match s2 {
        Some(s2) => duplex.with_secondary(Strand::new(s2)?, orientation),
        None => duplex,
    })
}
