//! Subcommand implementations.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use gridtree_ingest::{ErrorPolicy, IngestionDriver, RunReport, SheetLayout};
use gridtree_output::write_model_xml;

use crate::cli::ConvertArgs;

/// Extensions the directory scan picks up.
const SUPPORTED_EXTENSIONS: [&str; 6] = ["xlsx", "xlsm", "xlsb", "xls", "ods", "csv"];

/// Outcome of a `convert` run, for the summary printer and the exit code.
pub struct ConvertResult {
    /// Where the export document was written, when anything succeeded.
    pub output: Option<PathBuf>,
    pub report: RunReport,
}

impl ConvertResult {
    pub fn has_errors(&self) -> bool {
        self.report.has_failures() || self.output.is_none()
    }
}

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    let layout = load_layout(args.layout.as_deref())?;
    let policy = if args.continue_on_errors {
        ErrorPolicy::ContinueOnErrors
    } else {
        ErrorPolicy::Strict
    };

    let sources = collect_sources(&args.inputs)?;
    if sources.is_empty() {
        bail!("no definition files found in the given inputs");
    }
    info!(count = sources.len(), "starting conversion");

    let mut driver = IngestionDriver::new(layout, policy);
    let report = driver
        .run(&sources)
        .map_err(|error| anyhow::Error::new(error).context("conversion failed"))?;

    let output = if report.sources.is_empty() {
        // Every source failed under the lenient policy; there is nothing
        // to export.
        None
    } else {
        write_model_xml(&args.output, driver.model())
            .with_context(|| format!("write export to {}", args.output.display()))?;
        Some(args.output.clone())
    };

    Ok(ConvertResult { output, report })
}

pub fn run_layout() -> Result<()> {
    let layout = SheetLayout::default();
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}

fn load_layout(path: Option<&Path>) -> Result<SheetLayout> {
    match path {
        Some(path) => SheetLayout::from_json_file(path)
            .with_context(|| format!("load layout from {}", path.display())),
        None => Ok(SheetLayout::default()),
    }
}

/// Expand the input arguments into a flat source list.
///
/// Files are taken as given; directories contribute their definition files
/// sorted by file name. A path that is neither is an error.
fn collect_sources(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut sources = Vec::new();
    for input in inputs {
        if input.is_dir() {
            sources.extend(list_definition_files(input)?);
        } else if input.is_file() {
            sources.push(input.clone());
        } else {
            bail!("input {} does not exist", input.display());
        }
    }
    Ok(sources)
}

fn list_definition_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries =
        fs::read_dir(dir).with_context(|| format!("read directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("read directory {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let supported = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                SUPPORTED_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            });
        if supported {
            debug!(file = %path.display(), "discovered definition file");
            files.push(path);
        }
    }
    files.sort_by_key(|path| path.file_name().map(std::ffi::OsStr::to_os_string));
    Ok(files)
}
