//! storio-codegen: run the mapping generator over files on disk.
//!
//! All inputs form one invocation. Rust sources (`.rs`) are scanned for
//! markers, TOML element snapshots (`.toml`) are read as they are.
//!
//! # Usage
//!
//! ```bash
//! # Print the generated SQLite units of one file
//! storio-codegen --backend sqlite src/models.rs
//!
//! # Write ContentResolver units, one file per unit
//! storio-codegen --backend content-resolver --module crate::models \
//!     --out-dir target/generated src/models.rs
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow, bail};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use storio_codegen::elements::SourceVisitor;
use storio_codegen::prelude::*;
use syn::visit::Visit;

const GENERATED_HEADER: &str = "// @generated by storio-codegen. Do not edit.\n\n";

/// Processing errors carry token spans, which are neither `Send` nor `Sync`
trait IntoAnyhow<T> {
    fn into_anyhow(self) -> anyhow::Result<T>;
}

impl<T, E: std::fmt::Display> IntoAnyhow<T> for Result<T, E> {
    fn into_anyhow(self) -> anyhow::Result<T> {
        self.map_err(|e| anyhow!("{e}"))
    }
}

#[derive(Parser)]
#[command(name = "storio-codegen")]
#[command(version)]
#[command(about = "Generate StorIO put/get/delete resolvers and type mappings", long_about = None)]
struct Cli {
    /// Storage backend whose markers are processed
    #[arg(short, long, value_enum)]
    backend: BackendArg,

    /// Module path of the scanned sources, e.g. `crate::models`
    #[arg(short, long)]
    module: Option<String>,

    /// Runtime module generated code refers to
    #[arg(long, env = "STORIO_RUNTIME_PATH")]
    runtime: Option<String>,

    /// Processor configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory to write units to; prints them when absent
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Leave doc comments out of generated code
    #[arg(long)]
    no_docs: bool,

    /// Rust sources or TOML element snapshots
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
    Sqlite,
    ContentResolver,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ProcessorConfig::from_file(path).into_anyhow()?,
        None => ProcessorConfig::default(),
    };
    if let Some(module) = &cli.module {
        config.module_path = module.clone();
    }
    if let Some(runtime) = &cli.runtime {
        config.runtime_path = Some(runtime.clone());
    }
    if cli.no_docs {
        config.generated_docs = false;
    }

    match cli.backend {
        BackendArg::Sqlite => run(SqliteBackend, &cli, &config),
        BackendArg::ContentResolver => run(ContentResolverBackend, &cli, &config),
    }
}

fn run<B: Backend>(backend: B, cli: &Cli, config: &ProcessorConfig) -> anyhow::Result<()> {
    let mut round = Round::new();
    for input in &cli.inputs {
        round.extend(load_round::<B>(input, config)?);
    }
    debug!(
        "storio-codegen: {} input(s), {} declaration(s)",
        cli.inputs.len(),
        round.declarations.len()
    );

    let output = Processor::new(backend, config)
        .into_anyhow()?
        .process(&round)
        .into_anyhow()?;

    if let Some((earlier, later)) = output.file_collision() {
        bail!(
            "{} and {} both generate {}, rename one of the types",
            earlier.type_name,
            later.type_name,
            later.file_name()
        );
    }

    match &cli.out_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
            for unit in &output.units {
                let path = dir.join(unit.file_name());
                fs::write(&path, format!("{GENERATED_HEADER}{}\n", unit.render()))
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("storio-codegen: Wrote {}", path.display());
            }
        }
        None => {
            for unit in &output.units {
                println!("// {}\n{}\n", unit.file_name(), unit.render());
            }
        }
    }

    Ok(())
}

fn load_round<B: Backend>(path: &Path, config: &ProcessorConfig) -> anyhow::Result<Round> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let round = match path.extension().and_then(|ext| ext.to_str()) {
        Some("rs") => {
            let file = syn::parse_file(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            let markers = B::MARKERS;
            let mut visitor = SourceVisitor::new(&markers, config.module_segments())
                .with_file(path.display().to_string());
            visitor.visit_file(&file);
            visitor.into_round().into_anyhow()?
        }
        Some("toml") => SnapshotSchema::from_toml_str(&content)
            .into_anyhow()?
            .into_round(&B::MARKERS)
            .into_anyhow()?,
        _ => bail!("Unsupported input {}, expected a .rs or .toml file", path.display()),
    };

    Ok(round)
}
