//! `smm-build`: populates an SMM model from a simulation telemetry document
//! and writes the artifacts to the output directory.
//!
//! **Outputs:**
//! - `<out>/smm.xmi`: XMI 2.0 instance document
//! - `<out>/smm.json`: JSON instance document (with `--json`)
//! - `<out>/smm.ecore`: Ecore metamodel (with `--ecore`)
//!
//! **Usage:**
//! ```
//! smm-build --input <run.json> [--out <path>] [--scope <uri>] [--json] [--ecore]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use smm_metamodel::serializer::{ecore, json, xmi};
use smm_metamodel::Package;
use smm_populate::{source, MapperConfig, Populator};

/// Build SMM artifacts from simulation telemetry.
#[derive(Parser)]
#[command(name = "smm-build", about = "Build SMM artifacts from simulation telemetry")]
struct Args {
    /// Telemetry document: a frame array or a campaign document.
    #[arg(long)]
    input: PathBuf,

    /// Output directory for generated artifacts.
    #[arg(long, default_value = "public")]
    out: PathBuf,

    /// `observer` recorded on every observation.
    #[arg(long)]
    observer: Option<String>,

    /// `tool` recorded on every observation.
    #[arg(long)]
    tool: Option<String>,

    /// `source` recorded on every measure.
    #[arg(long)]
    source: Option<String>,

    /// Scope URI attached to every observation.
    #[arg(long)]
    scope: Option<String>,

    /// Also write the model as JSON.
    #[arg(long)]
    json: bool,

    /// Also write the metamodel as Ecore.
    #[arg(long)]
    ecore: bool,

    /// Log per-frame progress.
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn mapper_config(&self) -> MapperConfig {
        let defaults = MapperConfig::default();
        MapperConfig {
            observer: self.observer.clone().unwrap_or(defaults.observer),
            tool: self.tool.clone().unwrap_or(defaults.tool),
            measure_source: self.source.clone().unwrap_or(defaults.measure_source),
            scope_uri: self.scope.clone(),
            ..MapperConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .init();

    let out = &args.out;
    fs::create_dir_all(out)
        .with_context(|| format!("Failed to create output directory: {}", out.display()))?;

    let package = Package::smm();
    let populator = Populator::new(package, args.mapper_config())
        .context("Metamodel is missing required classes")?;

    let frames = source::load_frames_from_path(&args.input)
        .with_context(|| format!("Failed to load frames from {}", args.input.display()))?;
    info!("{} frames read from {}", frames.len(), args.input.display());

    let config = populator.config();
    info!(
        "observer '{}', tool '{}', measure source '{}'",
        config.observer, config.tool, config.measure_source
    );
    if let Some(scope) = &config.scope_uri {
        info!("scope {scope}");
    }

    let model = populator
        .build_model(&frames)
        .with_context(|| format!("Failed to populate {}", args.input.display()))?;

    // Print summary
    println!(
        "SMM model: {} observations, {} measures, {} measurements, {} attributes",
        model.observation_count(),
        model.measures.len(),
        model.measurement_count(),
        model.attribute_count()
    );

    // XMI
    let xmi_path = out.join("smm.xmi");
    let xmi_str = xmi::to_xmi(&model).context("Failed to serialize model to XMI")?;
    fs::write(&xmi_path, &xmi_str)
        .with_context(|| format!("Failed to write {}", xmi_path.display()))?;
    println!("  Written: {}", xmi_path.display());

    // JSON
    if args.json {
        let json_path = out.join("smm.json");
        let json_value = json::to_json(&model).context("Failed to serialize model to JSON")?;
        let json_str = serde_json::to_string_pretty(&json_value)
            .context("Failed to serialize model to JSON")?;
        fs::write(&json_path, &json_str)
            .with_context(|| format!("Failed to write {}", json_path.display()))?;
        println!("  Written: {}", json_path.display());
    }

    // Ecore
    if args.ecore {
        let ecore_path = out.join("smm.ecore");
        let ecore_str =
            ecore::to_ecore(package).context("Failed to serialize metamodel to Ecore")?;
        fs::write(&ecore_path, &ecore_str)
            .with_context(|| format!("Failed to write {}", ecore_path.display()))?;
        println!("  Written: {}", ecore_path.display());
    }

    println!("Build complete.");
    Ok(())
}
