use anyhow::Result;
use polydecomp::{read_document, OUTER_POLYGON};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::InfoArgs) -> Result<()> {
    let decomp = read_document(&args.document)?;

    println!("points:   {}", decomp.num_points());
    println!("segments: {}", decomp.num_segments());
    println!("wires:    {}", decomp.num_wires());
    println!("polygons: {}", decomp.num_polygons());

    for (id, polygon) in decomp.polygons() {
        if id == OUTER_POLYGON {
            println!(
                "{id}: outer, {} holes, {} free points",
                decomp.holes(id).count(), polygon.free_points().len(),
            );
            continue;
        }
        println!(
            "{id}: depth {}, {} vertices, {} holes, {} free points",
            decomp.depth(id),
            decomp.vertices(id).len(),
            decomp.holes(id).count(),
            polygon.free_points().len(),
        );
    }
    Ok(())
}
