mod scene;

use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scene::{output_stem, ContourScene, VolumeScene};
use serde::Serialize;
use xdgrd_core::{
    config::{AtomOverrides, PlotConfig, OVERRIDE_TEMPLATE},
    data::GridData,
    periodic_table::AtomPropertyTable,
};

const DEFAULT_PARAMETER_FILE: &str = "xdgrd.json";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: GrdCommand,

    /// Atom colors and covalent radii to use instead of the built-in ones. A template
    /// is written here if the file doesn't exist.
    #[arg(long, global = true, default_value = "change_atom_properties.txt")]
    atom_properties: PathBuf,
}

#[derive(Subcommand, Debug)]
enum GrdCommand {
    /// Prepare a contour plot of a 2D grid file
    #[command(name = "contour")]
    Contour {
        /// The XD grid file to plot
        grd: PathBuf,
        /// Plot parameters. Without one, the defaults are written to xdgrd.json and used
        #[arg(long, short)]
        params: Option<PathBuf>,
        /// Where to write the scene, `{function}_{atoms}.json` by default
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Export a 3D grid file together with the atoms inside it
    #[command(name = "volume")]
    Volume {
        /// The XD grid file to export
        grd: PathBuf,
        /// Only keep atoms inside this percentage of the grid bounds, 0 keeps none
        #[arg(long, short, default_value_t = 100.0)]
        crop: f64,
        /// Where to write the scene, `{function}_{atoms}.json` by default
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print what a grid file contains
    #[command(name = "info")]
    Info {
        /// The XD grid file to inspect
        grd: PathBuf,
    },
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let args: Args = Args::parse();

    match args.command {
        GrdCommand::Contour {
            grd,
            params,
            output,
        } => {
            let table = load_property_table(&args.atom_properties)?;
            let config = load_plot_config(params.as_deref())?;
            let data = read_grid(&grd)?;

            let scene = ContourScene::build(&data, &config, &table)
                .with_context(|| format!("can't plot {}", grd.display()))?;
            let output = output.unwrap_or_else(|| default_output(&data));
            write_json(&output, &scene)?;

            println!(
                "{} positive and {} negative contours, {} atoms and {} bonds in the plane",
                scene.positive.levels.len(),
                scene.negative.levels.len(),
                scene.atoms.len(),
                scene.bonds.len()
            );
            println!("{} saved, render as {}", output.display(), scene.format);
        }

        GrdCommand::Volume { grd, crop, output } => {
            let table = load_property_table(&args.atom_properties)?;
            let data = read_grid(&grd)?;

            let scene = VolumeScene::build(&data, crop, &table)
                .with_context(|| format!("can't export {}", grd.display()))?;
            let output = output.unwrap_or_else(|| default_output(&data));
            write_json(&output, &scene)?;

            println!(
                "{} samples, {} atoms and {} bonds within {crop}% of the grid",
                scene.field.len(),
                scene.atoms.len(),
                scene.bonds.len()
            );
            println!("{} saved", output.display());
        }

        GrdCommand::Info { grd } => {
            let data = read_grid(&grd)?;

            println!("{}", grd.display());
            println!("dimensionality: {}D", data.dimensionality.rank());
            println!("function: {}", data.function_tag);
            for (name, axis) in data.axes.iter() {
                println!(
                    "{name}: {:>4} points, {:>10.4} to {:>10.4}, step {:.4}",
                    axis.count,
                    axis.min(),
                    axis.max(),
                    axis.step()
                );
            }
            match data.field.range() {
                Some((min, max)) => println!("values: {min:.6e} to {max:.6e}"),
                None => println!("values: none"),
            }
            println!("atoms: {}", data.atoms.len());
            for atom in &data.atoms {
                println!(
                    "  {:<14} {:>10.4} {:>10.4} {:>10.4}{}",
                    atom.label,
                    atom.x(),
                    atom.y(),
                    atom.z(),
                    if atom.is_symmetry_generated { "  (symmetry)" } else { "" }
                );
            }
        }
    }

    Ok(())
}

fn read_grid(path: &Path) -> Result<GridData> {
    let start = Instant::now();
    let data = GridData::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    log::info!("read {} in {:0.2?}", path.display(), start.elapsed());

    Ok(data)
}

/// The built-in atom properties with the overrides of `path` applied. A missing
/// override file is replaced by the template.
fn load_property_table(path: &Path) -> Result<AtomPropertyTable> {
    let builder = AtomPropertyTable::builder();

    if !path.is_file() {
        fs::write(path, OVERRIDE_TEMPLATE)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("{} created, edit it to change atom colors and radii", path.display());
        return Ok(builder.build());
    }

    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let overrides = AtomOverrides::parse(&text);
    if !overrides.is_empty() {
        println!(
            "{} colors and {} radii changed by {}",
            overrides.colors.len(),
            overrides.radii.len(),
            path.display()
        );
    }

    Ok(builder.apply_overrides(&overrides).build())
}

fn load_plot_config(path: Option<&Path>) -> Result<PlotConfig> {
    match path {
        Some(path) => {
            PlotConfig::load(path).with_context(|| format!("failed to load {}", path.display()))
        }
        None => {
            let config = PlotConfig::default();
            config
                .save(DEFAULT_PARAMETER_FILE)
                .with_context(|| format!("failed to write {DEFAULT_PARAMETER_FILE}"))?;
            println!("no parameter file given, default parameters written to {DEFAULT_PARAMETER_FILE}");

            Ok(config)
        }
    }
}

fn default_output(data: &GridData) -> PathBuf {
    PathBuf::from(format!("{}.json", output_stem(data)))
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer(BufWriter::new(file), value)
        .with_context(|| format!("failed to write {}", path.display()))
}
