use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::store::diff::MatchPolicy;

#[derive(Parser)]
#[command(name = "listwatch")]
#[command(about = "Track catalog listings between runs and report what changed")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare freshly extracted listings with the saved snapshot, then save them
    Run(RunArgs),

    /// Print the saved snapshot
    Show(ShowArgs),

    /// Compare two snapshot files without saving anything
    Diff(DiffArgs),
}

impl Command {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Command::Run(args) => &args.common,
            Command::Show(args) => &args.common,
            Command::Diff(args) => &args.common,
        }
    }
}

#[derive(Args, Clone, Default)]
pub struct CommonArgs {
    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Show debug logging on stderr
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,
}

#[derive(Parser)]
pub struct RunArgs {
    /// JSON file with the extracted field lists, or '-' for stdin
    #[arg(long)]
    pub fields: PathBuf,

    /// Snapshot file to compare against and overwrite
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Where to write the change report
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// How duplicate listings are matched: existential or multiset
    #[arg(long)]
    pub policy: Option<MatchPolicy>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Snapshot file to print
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Parser)]
pub struct DiffArgs {
    /// Older snapshot file
    pub from: PathBuf,

    /// Newer snapshot file
    pub to: PathBuf,

    /// How duplicate listings are matched: existential or multiset
    #[arg(long)]
    pub policy: Option<MatchPolicy>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl RunArgs {
    /// true when the field lists come from stdin
    pub fn fields_from_stdin(&self) -> bool {
        self.fields.as_os_str() == "-"
    }
}
