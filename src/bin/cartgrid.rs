use std::path::PathBuf;
use clap::Parser;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use cartgrid::error::{Error, Result};
use cartgrid::{GridDescription, GridLevel, PartitionKind};




/// Decompose a Cartesian grid among a number of ranks and report every
/// rank's partitions.
#[derive(Debug, Parser)]
#[clap(version, about)]
struct Opts {
    /// Number of cells along each axis, comma separated
    #[clap(short = 'c', long, default_value = "4,3")]
    cells: String,

    /// Number of ranks sharing the grid
    #[clap(short = 'n', long, default_value = "1")]
    ranks: usize,

    /// Periodic axes, comma separated
    #[clap(short = 'p', long)]
    periodic: Option<String>,

    /// Number of overlap cells around each rank's partition
    #[clap(short = 'o', long, default_value = "1")]
    overlap: i64,

    /// Codimension of the entities to count
    #[clap(long, default_value = "0")]
    codim: usize,

    /// Sweep bits: bit i walks axis i from high to low
    #[clap(long, default_value = "0")]
    sweep: u32,

    /// Name recorded in a saved description
    #[clap(long, default_value = "cartgrid")]
    name: String,

    /// Read the grid description from this file instead of the options above
    #[clap(long)]
    load: Option<PathBuf>,

    /// Write the grid description to this file
    #[clap(long)]
    save: Option<PathBuf>,

    #[clap(short = 'v', long)]
    verbose: bool,
}




fn parse_list<T: std::str::FromStr>(list: &str) -> Result<Vec<T>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().map_err(|_| Error::ParseMultiIndex(list.to_string())))
        .collect()
}




fn description(opts: &Opts) -> Result<GridDescription> {
    match &opts.load {
        Some(path) => GridDescription::load(path),
        None => Ok(GridDescription {
            name: opts.name.clone(),
            cells: parse_list(&opts.cells)?,
            overlap: opts.overlap,
            periodic: parse_list(opts.periodic.as_deref().unwrap_or(""))?,
            ranks: opts.ranks,
        }),
    }
}




// ============================================================================
fn run<const DIM: usize>(description: &GridDescription, opts: &Opts) -> Result<()> {
    if opts.codim > DIM {
        return Err(Error::InvalidDescription(format!("codimension {} exceeds dimension {}", opts.codim, DIM)));
    }
    if opts.sweep >= 1 << DIM {
        return Err(Error::InvalidDescription(format!("sweep bits {:#b} exceed dimension {}", opts.sweep, DIM)));
    }

    let tree = description.decomposition::<DIM>()?;
    let start = std::time::Instant::now();
    let levels = GridLevel::build_all(&tree, description.overlap)?;
    info!("built {} rank views in {:.4}s", levels.len(), start.elapsed().as_secs_f64());

    println!("global mesh ....... {}", tree.global_partition());
    println!("tree depth ........ {}", tree.depth());

    for level in &levels {
        let entities = level.sweep(PartitionKind::All, opts.codim, opts.sweep).count();
        let interior = level.sweep(PartitionKind::Interior, opts.codim, opts.sweep).count();
        println!();
        println!("rank {}", level.rank());
        println!("  interior ........ {}", level.partition(PartitionKind::Interior));
        println!("  local mesh ...... {}", level.local_mesh());
        println!("  ghost ........... {}", level.partition(PartitionKind::Ghost));
        println!("  codim {} ......... {} local, {} interior", opts.codim, entities, interior);
    }

    let volume: i64 = levels
        .iter()
        .map(|level| level.partition(PartitionKind::Interior).volume())
        .sum();

    if volume != tree.global_partition().volume() {
        return Err(Error::InvalidDescription(format!(
            "interior volumes sum to {}, global mesh has {}",
            volume, tree.global_partition().volume())));
    }

    let graph = GridLevel::neighbor_graph(&tree, description.overlap);
    println!();
    println!("neighbor edges .... {}", graph.len());

    for (a, b) in graph.edges() {
        println!("  {} -> {}", a, b);
    }

    if let Some(path) = &opts.save {
        description.save(path)?;
    }
    Ok(())
}




// ============================================================================
fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();
    let level = if opts.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    SimpleLogger::new().with_level(level).init()?;

    let description = description(&opts)?;
    info!("{:?}", description);

    match description.dimension() {
        1 => run::<1>(&description, &opts)?,
        2 => run::<2>(&description, &opts)?,
        3 => run::<3>(&description, &opts)?,
        n => return Err(Error::InvalidDescription(format!("unsupported dimension {}", n)).into()),
    }
    Ok(())
}
