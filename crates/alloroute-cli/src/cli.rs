use alloroute::engine::config::PenaltyKind;
use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Alloroute Developers",
    version,
    about = "Alloroute - discovers allosteric communication routes between two protein residues by enumerating diverse weighted paths over a residue contact graph.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    // --- Core Arguments ---
    /// Path to the input PDB structure providing the alpha-carbon trace.
    #[arg(value_name = "STRUCTURE")]
    pub structure: PathBuf,

    /// Residue number of the route's starting residue.
    #[arg(value_name = "RES1")]
    pub res1: isize,

    /// Residue number of the route's ending residue.
    #[arg(value_name = "RES2")]
    pub res2: isize,

    /// Chain of the starting residue.
    #[arg(value_name = "CHAIN1")]
    pub chain1: char,

    /// Chain of the ending residue.
    #[arg(value_name = "CHAIN2")]
    pub chain2: char,

    /// Path to a configuration file in TOML format; command-line flags
    /// override its values.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Contact Sources ---
    /// QM pairwise-interaction file to read contacts from.
    #[arg(long, value_name = "PATH")]
    pub qmfile: Option<PathBuf>,

    /// Cieplak-style contact-map file to read statistical contacts from.
    #[arg(long, value_name = "PATH")]
    pub cieplakfile: Option<PathBuf>,

    /// Maximum distance (in Angstroms) for a QM record to be kept.
    #[arg(long, value_name = "FLOAT")]
    pub dcutoff: Option<f64>,

    /// Minimum absolute energy for a QM record to be kept.
    #[arg(long, value_name = "FLOAT")]
    pub ecutoff: Option<f64>,

    /// Bonding energy assigned to every statistical contact.
    #[arg(long, value_name = "FLOAT")]
    pub cieplake: Option<f64>,

    /// Drop statistical contacts between same-chain residues closer than
    /// this many sequence positions.
    #[arg(long, value_name = "INT")]
    pub exclude: Option<isize>,

    /// Bonding energy assigned to every backbone contact.
    #[arg(long, value_name = "FLOAT")]
    pub bbenergy: Option<f64>,

    /// Keep contacts that bridge different chains.
    #[arg(long)]
    pub crosschains: bool,

    // --- Search Overrides ---
    /// Penalty policy applied to each found path ('random' or 'wedge').
    #[arg(long, value_name = "POLICY")]
    pub pen: Option<PenaltyKind>,

    /// Revert the previous path's penalties after each new path is found.
    #[arg(long)]
    pub undo: bool,

    /// Harshest penalty factor bound.
    #[arg(long, value_name = "FLOAT")]
    pub worst: Option<f64>,

    /// Mildest penalty factor bound.
    #[arg(long, value_name = "FLOAT")]
    pub least: Option<f64>,

    /// Number of distinct paths to search for.
    #[arg(long, value_name = "INT")]
    pub maxpath: Option<usize>,

    /// Comma-separated residue labels (e.g. HIS192A) that every reported
    /// path must pass through.
    #[arg(long, value_name = "LABELS", value_delimiter = ',')]
    pub mustbe: Vec<String>,

    /// Seed for the random penalty policy, for reproducible runs.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Give up after this many consecutive searches rediscover the same path.
    #[arg(long, value_name = "INT")]
    pub max_stalls: Option<usize>,

    /// Print paths ordered by ascending length instead of discovery order.
    #[arg(long)]
    pub sort: bool,

    // --- Logging ---
    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
