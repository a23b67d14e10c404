use anyhow::{Context, Result};
use polydecomp::read_document;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::CheckArgs) -> Result<()> {
    let decomp = read_document(&args.document)?;
    decomp.check_consistency()
        .with_context(|| format!("{} is inconsistent", args.document.display()))?;
    println!("[check] {} ok", args.document.display());
    Ok(())
}
