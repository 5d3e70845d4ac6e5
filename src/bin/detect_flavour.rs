//! Reports which descriptor format governs a project directory.
//!
//! Loads the mapping catalog (`--catalog`, `POLYGLOT_MAPPING_CATALOG`, or the
//! bundled one), registers every entry with the JSON codec, and prints one JSON
//! object describing the located descriptor and its flavour. With `--file`, it
//! also resolves the flavour a request for that file name would select.

use anyhow::{Context, Result, anyhow, bail};
use polyglot_registry::codec::JsonCodec;
use polyglot_registry::logging::init_logging;
use polyglot_registry::{
    CatalogIndex, Flavour, ModelReader, ModelWriter, Options, Registry, default_catalog_path,
};
use serde::Serialize;
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse(env::args_os().skip(1))?;
    let catalog_path = match cli.catalog_path {
        Some(path) => path,
        None => default_catalog_path()?,
    };
    let index = CatalogIndex::load(&catalog_path)?;
    let registry = build_registry(&index)?;

    let report = detect(&registry, cli.directory, cli.file)?;
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}

#[derive(Serialize)]
struct Report {
    directory: PathBuf,
    descriptor: Option<PathBuf>,
    flavour: Option<Flavour>,
    #[serde(skip_serializing_if = "Option::is_none")]
    requested_flavour: Option<Flavour>,
}

fn build_registry(index: &CatalogIndex) -> Result<Registry> {
    let codec = Arc::new(JsonCodec);
    let builder = index.to_builder(|_| {
        let reader: Arc<dyn ModelReader> = codec.clone();
        let writer: Arc<dyn ModelWriter> = codec.clone();
        Ok((reader, writer))
    })?;
    Ok(builder.build())
}

fn detect(registry: &Registry, directory: PathBuf, file: Option<String>) -> Result<Report> {
    if !directory.is_dir() {
        bail!("{} is not a directory", directory.display());
    }
    let descriptor = registry
        .locate_descriptor_file(&directory)
        .with_context(|| format!("probing {}", directory.display()))?;
    let flavour = registry
        .locate_flavour(&directory)
        .with_context(|| format!("probing {}", directory.display()))?;
    let requested_flavour = match file {
        Some(name) => Some(registry.resolve_flavour(&Options::for_location(name))?),
        None => None,
    };

    Ok(Report {
        directory,
        descriptor,
        flavour,
        requested_flavour,
    })
}

#[derive(Debug, PartialEq)]
struct Cli {
    catalog_path: Option<PathBuf>,
    file: Option<String>,
    directory: PathBuf,
}

impl Cli {
    fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut args = args.into_iter();
        let mut catalog_path = None;
        let mut file = None;
        let mut directory = None;

        while let Some(arg) = args.next() {
            let arg_str = arg
                .to_str()
                .ok_or_else(|| anyhow!("invalid UTF-8 in argument"))?;
            match arg_str {
                "--catalog" => catalog_path = Some(PathBuf::from(next_value("--catalog", &mut args)?)),
                "--file" => file = Some(next_value("--file", &mut args)?),
                "--help" | "-h" => usage(0),
                other if other.starts_with('-') => bail!("unknown argument: {other}"),
                other => {
                    if directory.is_some() {
                        bail!("only one directory may be given");
                    }
                    directory = Some(PathBuf::from(other));
                }
            }
        }

        Ok(Self {
            catalog_path,
            file,
            directory: directory.unwrap_or_else(|| PathBuf::from(".")),
        })
    }
}

fn next_value(flag: &str, args: &mut impl Iterator<Item = OsString>) -> Result<String> {
    let value = args
        .next()
        .ok_or_else(|| anyhow!("{flag} requires a value"))?
        .into_string()
        .map_err(|_| anyhow!("{flag} must be valid UTF-8"))?;
    if value.is_empty() {
        bail!("{flag} must not be empty");
    }
    Ok(value)
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: detect-flavour [--catalog PATH] [--file NAME] [DIR]\n\nOptions:\n  --catalog PATH   Mapping catalog to load (or set POLYGLOT_MAPPING_CATALOG).\n  --file NAME      Also resolve the flavour selected for this descriptor name.\n  --help           Show this help text.\n\nLogging is controlled by POLYGLOT_LOG (default: warn)."
    );
    std::process::exit(code);
}
