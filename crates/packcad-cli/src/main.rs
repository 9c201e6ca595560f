//! packcad CLI - parametric battery pack generator
//!
//! Builds a pack from cell family and S×P topology, then exports the
//! printable STL, the dimensioned SVG layout, or a build summary.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use packcad::{
    stl_file_name, svg_file_name, CellFamily, ModelKind, PackConfig, Workbench,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "packcad")]
#[command(about = "Parametric battery pack generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the pack and export the printable model as binary STL
    Export {
        #[command(flatten)]
        params: PackArgs,
        /// Output file (default: generated name, e.g. enclosure_4s2p_18650.stl)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export the dimensioned top-down layout drawing as SVG
    Draw {
        #[command(flatten)]
        params: PackArgs,
        /// Output file (default: generated name, e.g. pack_4s2p_18650.svg)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a build summary without exporting anything
    Info {
        #[command(flatten)]
        params: PackArgs,
        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Pack parameters, mirroring the full configuration surface.
#[derive(Args)]
struct PackArgs {
    /// Cell family: 14500, 18650, 21700, or 26650
    #[arg(long, default_value = "18650")]
    cell: String,

    /// Series row count (pack voltage)
    #[arg(short, long, default_value_t = 4)]
    series: u32,

    /// Parallel column count (pack capacity)
    #[arg(short, long, default_value_t = 2)]
    parallel: u32,

    /// Enclosure wall thickness in mm
    #[arg(long, default_value_t = 2.0)]
    wall: f64,

    /// Enclosure fit tolerance in mm
    #[arg(long, default_value_t = 0.5)]
    tolerance: f64,

    /// Include holder brackets
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    brackets: bool,

    /// Model to build: enclosure or bracket-only
    #[arg(long, default_value = "enclosure")]
    model: String,

    /// Load the configuration from a TOML file instead of the flags above
    #[arg(long)]
    config: Option<PathBuf>,
}

impl PackArgs {
    fn resolve(&self) -> Result<PackConfig> {
        if let Some(path) = &self.config {
            return PackConfig::from_toml_file(path)
                .with_context(|| format!("reading config {}", path.display()));
        }
        Ok(PackConfig {
            family: self.cell.parse::<CellFamily>()?,
            series: self.series,
            parallel: self.parallel,
            wall_thickness_mm: self.wall,
            tolerance_mm: self.tolerance,
            show_brackets: self.brackets,
            model: self.model.parse::<ModelKind>()?,
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Export { params, output } => export_stl(&params, output),
        Commands::Draw { params, output } => export_svg(&params, output),
        Commands::Info { params, json } => show_info(&params, json),
    }
}

fn export_stl(params: &PackArgs, output: Option<PathBuf>) -> Result<()> {
    let config = params.resolve()?;
    let mut bench = Workbench::new()?;
    let snapshot = bench.rebuild(&config)?;

    let path = output.unwrap_or_else(|| {
        PathBuf::from(stl_file_name(
            config.model.file_prefix(),
            config.series,
            config.parallel,
            config.family.designation(),
        ))
    });
    let bytes = bench.export_stl()?;
    std::fs::write(&path, &bytes)
        .with_context(|| format!("writing {}", path.display()))?;

    let triangles = (bytes.len() - 84) / 50;
    println!(
        "Exported {} ({} cells, {} triangles)",
        path.display(),
        snapshot.total_cells(),
        triangles
    );
    Ok(())
}

fn export_svg(params: &PackArgs, output: Option<PathBuf>) -> Result<()> {
    let config = params.resolve()?;
    let mut bench = Workbench::new()?;
    let snapshot = bench.rebuild(&config)?;

    let path = output.unwrap_or_else(|| {
        PathBuf::from(svg_file_name(
            config.series,
            config.parallel,
            config.family.designation(),
        ))
    });
    let drawing = snapshot.drawing();
    drawing
        .export(&path)
        .with_context(|| format!("writing {}", path.display()))?;

    println!(
        "Exported {} ({:.1} x {:.1} mm)",
        path.display(),
        drawing.width_mm(),
        drawing.height_mm()
    );
    Ok(())
}

fn show_info(params: &PackArgs, json: bool) -> Result<()> {
    let config = params.resolve()?;
    let mut bench = Workbench::new()?;
    let snapshot = bench.rebuild(&config)?;
    let report = snapshot.report();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} pack, model: {}",
        snapshot.layout.topology.designation(),
        report.family,
        config.model
    );
    println!(
        "  cells:     {} ({} rows x {} per row)",
        report.total_cells, report.series, report.parallel
    );
    println!(
        "  strips:    {} parallel, {} series",
        report.parallel_strips, report.series_strips
    );
    println!(
        "  pack size: {:.1} x {:.1} x {:.1} mm",
        report.pack_width_mm, report.pack_length_mm, report.pack_height_mm
    );
    if let Some(outer) = report.enclosure_outer_mm {
        println!(
            "  enclosure: {:.1} x {:.1} x {:.1} mm outer",
            outer[0], outer[1], outer[2]
        );
    }
    println!("  triangles: {}", report.triangles);
    Ok(())
}
