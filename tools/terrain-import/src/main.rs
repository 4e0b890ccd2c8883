//! terrain-import: run the terrain import pipeline on survey files.
//!
//! Usage:
//!   terrain-import --raster heightmap.png --metadata metadata.json
//!   terrain-import --raster heightmap.png --metadata metadata.json \
//!       --overlay osm_splines.json --output terrain.json
//!   terrain-import --raster dem.r16 --raw-depth 16 --metadata metadata.json

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tessera_core::{OverlayPath, TerrainImportResult};
use tessera_import::{ImportConfig, ImportSources, TerrainImporter};

#[derive(Parser, Debug)]
#[command(name = "terrain-import")]
#[command(about = "Convert terrain survey products into normalized terrain data")]
#[command(version)]
struct Args {
    /// Elevation raster (PNG/TIFF, or raw samples with --raw-depth)
    #[arg(long)]
    raster: PathBuf,

    /// Metadata JSON with a `heightmap` section
    #[arg(long)]
    metadata: PathBuf,

    /// Overlay JSON with roads, railways and power lines
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// World units per metre (overrides the config file)
    #[arg(long)]
    units_per_meter: Option<f64>,

    /// Treat the raster as headerless big-endian samples of this depth
    #[arg(long)]
    raw_depth: Option<u8>,

    /// Parse the raster and overlay on separate threads
    #[arg(long)]
    parallel: bool,

    /// Write the import result as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = build_config(&args)?;
    let importer = TerrainImporter::new(config);

    let sources = ImportSources {
        raster: args.raster.clone(),
        metadata: args.metadata.clone(),
        overlay: args.overlay.clone(),
    };
    let result = importer
        .import_files(&sources)
        .with_context(|| format!("importing {}", args.raster.display()))?;

    print_summary(&result);

    if let Some(output) = &args.output {
        let json = serde_json::to_vec_pretty(&result).context("serializing import result")?;
        std::fs::write(output, &json)
            .with_context(|| format!("writing {}", output.display()))?;
        tracing::info!("Wrote {} ({} bytes)", output.display(), json.len());
    }

    Ok(())
}

fn build_config(args: &Args) -> anyhow::Result<ImportConfig> {
    let mut config = match &args.config {
        Some(path) => ImportConfig::load(path)?,
        None => ImportConfig::default(),
    };
    if let Some(units) = args.units_per_meter {
        anyhow::ensure!(
            units.is_finite() && units > 0.0,
            "--units-per-meter must be positive, got {units}"
        );
        config.world_units_per_meter = units;
    }
    if args.raw_depth.is_some() {
        config.raster.raw_bit_depth = args.raw_depth;
    }
    config.parallel |= args.parallel;
    Ok(config)
}

fn print_summary(result: &TerrainImportResult) {
    let terrain = &result.terrain;
    let layout = &terrain.layout;
    let extent = terrain.world_extent();

    println!(
        "Terrain: {}x{} samples, scale ({}, {}, {})",
        terrain.grid.width(),
        terrain.grid.height(),
        terrain.scale.x,
        terrain.scale.y,
        terrain.scale.z
    );
    println!(
        "Tiles:   {}x{} of {} quads{}",
        layout.tile_count_x,
        layout.tile_count_y,
        layout.quads_per_tile,
        if layout.divides_evenly { "" } else { " (edges need padding)" }
    );
    println!("Extent:  {:.1} x {:.1} world units", extent.x, extent.y);

    if let Some((min, max)) = terrain.grid.min_max() {
        println!("Samples: {min}..{max}");
    }

    println!(
        "Paths:   {} roads, {} railways, {} power lines",
        result.roads.len(),
        result.railways.len(),
        result.power_lines.len()
    );
    for path in result.paths() {
        let detail = match path {
            OverlayPath::Road(road) => format!("{} ({}, {} lanes)", road.name, road.road_type, road.lanes),
            OverlayPath::Rail(rail) => format!("{} track(s)", rail.tracks),
            OverlayPath::PowerLine(line) => format!("{} towers", line.tower_positions.len()),
        };
        println!(
            "  {} {}: {} points, {:.1} units, {}",
            path.kind(),
            path.id(),
            path.points().len(),
            path.polyline_length(),
            detail
        );
    }
}
