use std::path::PathBuf;

/// Planar decomposition CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "polydecomp", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Print counts and the polygon nesting of a document
    Info(InfoArgs),

    /// Rebuild a document and verify every structural invariant
    Check(CheckArgs),

    /// Apply an edit script to a document (forbids stdout)
    Apply(ApplyArgs),
}

#[derive(clap::Args, Debug)]
pub struct InfoArgs {
    /// Decomposition document (JSON)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub document: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Decomposition document (JSON)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub document: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct ApplyArgs {
    /// Input document; may be absent with --new
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub document: PathBuf,

    /// Edit script (JSON array of edits)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub script: PathBuf,

    /// Output document
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// Start from an empty decomposition when the input does not exist
    #[arg(long)]
    pub new: bool,

    /// Overwrite the output if it exists
    #[arg(short, long)]
    pub force: bool,
}
