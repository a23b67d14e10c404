use anyhow::Result;
use polydecomp::{apply_edits, read_document, read_script, write_document, Decomposition};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::ApplyArgs) -> Result<()> {
    let mut decomp = if args.new && !args.document.exists() {
        log::info!("{} does not exist, starting empty", args.document.display());
        Decomposition::new()
    } else {
        read_document(&args.document)?
    };

    let edits = read_script(&args.script)?;
    println!("[apply] applying {} edits from {}", edits.len(), args.script.display());
    let changes = apply_edits(&mut decomp, &edits)?;
    let structural = changes.iter().filter(|c| c.is_structural()).count();
    println!(
        "[apply] {} structural changes; now {} polygons",
        structural, decomp.num_polygons(),
    );

    println!("[apply] writing document to {}", args.output.display());
    write_document(&args.output, &decomp, args.force)
}
