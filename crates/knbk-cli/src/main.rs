//! KNBK CLI - survey trajectories and assembly reference lookups

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use knbk::prelude::*;
use knbk::{PlotExtents, PlotSeries, ReferenceOptions, ReferenceTable};
use knbk_csv::{expand_assembly, find_assembly, write_series, CsvWriteOptions};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "knbk")]
#[command(
    author,
    version,
    about = "Survey trajectory and bottom-hole assembly tool"
)]
struct Cli {
    /// Workbench configuration (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Integrate a survey file into x, y, z positions
    #[command(alias = "traj")]
    Trajectory {
        /// Survey file (xlsx, csv)
        input: PathBuf,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the plot extents to stderr
        #[arg(short, long)]
        extents: bool,

        /// Negate z so depth points down
        #[arg(long)]
        depth_down: bool,
    },

    /// Look up a key in an equipment reference file
    Lookup {
        /// Reference CSV file
        input: PathBuf,

        /// Value of the key column
        key: String,

        /// Field delimiter (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },

    /// Expand a saved assembly into full reference rows
    Expand {
        /// Assembly store
        store: PathBuf,

        /// Assembly name
        name: String,

        /// Directory of reference files (default: from configuration)
        #[arg(short, long)]
        reference_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Trajectory {
            input,
            output,
            extents,
            depth_down,
        } => trajectory(config, &input, output.as_deref(), extents, depth_down),
        Commands::Lookup {
            input,
            key,
            delimiter,
        } => lookup(&config, &input, &key, delimiter),
        Commands::Expand {
            store,
            name,
            reference_dir,
        } => expand(&config, &store, &name, reference_dir.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> Result<WorkbenchConfig> {
    match path {
        Some(path) => WorkbenchConfig::from_json_file(path)
            .with_context(|| format!("Failed to load configuration '{}'", path.display())),
        None => Ok(WorkbenchConfig::default()),
    }
}

fn trajectory(
    config: WorkbenchConfig,
    input: &Path,
    output: Option<&Path>,
    extents: bool,
    depth_down: bool,
) -> Result<()> {
    let mut workbench = Workbench::new(config).context("Invalid configuration")?;
    let stations = workbench
        .import_survey(input)
        .with_context(|| format!("Failed to import '{}'", input.display()))?;
    tracing::info!("Imported {} survey stations", stations.len());

    let positions = workbench.trajectory()?;

    if extents {
        match PlotExtents::of(&positions) {
            Some(e) => eprintln!(
                "x: {} .. {}\ny: {} .. {}\nz: {} .. {}",
                e.x.minimum, e.x.maximum, e.y.minimum, e.y.maximum, e.z.minimum, e.z.maximum
            ),
            None => eprintln!("Warning: survey has no stations"),
        }
    }

    let survey = workbench.find_page(PageKind::Survey)?;
    let mut series =
        PlotSeries::from_positions(&positions).with_name(workbench.page(survey)?.title());
    if depth_down {
        series = series.depth_down();
    }

    let options = CsvWriteOptions::default();
    if let Some(output_path) = output {
        let file = File::create(output_path)
            .with_context(|| format!("Failed to create '{}'", output_path.display()))?;
        write_series(&series, file, &options)
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        eprintln!(
            "Wrote {} positions to '{}'",
            series.len(),
            output_path.display()
        );
    } else {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        write_series(&series, &mut lock, &options).context("Failed to write to stdout")?;
        lock.flush().context("Failed to write to stdout")?;
    }

    Ok(())
}

fn lookup(config: &WorkbenchConfig, input: &Path, key: &str, delimiter: char) -> Result<()> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character");
    }
    let options = ReferenceOptions {
        delimiter: delimiter as u8,
        ..config.reference.clone()
    };
    let table = ReferenceTable::load(input, &options)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;

    let Some(row) = table.find(key) else {
        bail!("'{}' not found in '{}'", key, input.display());
    };

    for (i, value) in row.iter().enumerate() {
        let header = table.headers().get(i).map(String::as_str).unwrap_or("");
        println!("{}\t{}", header, value);
    }

    Ok(())
}

fn expand(
    config: &WorkbenchConfig,
    store: &Path,
    name: &str,
    reference_dir: Option<&Path>,
) -> Result<()> {
    let assembly = find_assembly(store, name, &config.assembly_format)
        .with_context(|| format!("Failed to read '{}'", store.display()))?;
    let Some(assembly) = assembly else {
        bail!("Assembly '{}' not found in '{}'", name, store.display());
    };

    let reference_dir = reference_dir.unwrap_or(&config.reference_dir);
    let rows = expand_assembly(&assembly, reference_dir, &config.reference)
        .context("Failed to read reference files")?;
    if rows.len() < assembly.components.len() {
        tracing::warn!(
            "{} of {} components have no reference row",
            assembly.components.len() - rows.len(),
            assembly.components.len()
        );
    }

    for row in rows {
        println!("{}", row.join("\t"));
    }

    Ok(())
}
