//! Generate command implementation
//!
//! Discovers ABI documents, runs each one through normalization and
//! rendering, and writes the generated bindings. Documents are processed
//! independently in sorted path order; a failing document is reported and
//! skipped, and the run fails at the end if any document failed.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use tracing::{debug, error, info};

use abigen_core::{Backend, Contract};

use crate::template::TemplateEngine;

/// Options for one generator run
pub struct GenerateOptions {
    /// Glob pattern for input ABI files
    pub abis: String,
    /// Main contract template path
    pub template: PathBuf,
    /// Glob pattern for partial templates
    pub partials: String,
    /// Output directory, created if absent
    pub output_dir: PathBuf,
    /// Extension for generated files
    pub extension: String,
    /// Target contract backend
    pub backend: Backend,
}

/// Expand a glob pattern into a sorted path list
///
/// Sorted so a batch always visits documents in the same order and produces
/// a reproducible output set.
fn sorted_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut paths = glob::glob(pattern)
        .map_err(|e| anyhow!("invalid glob pattern `{}`: {}", pattern, e))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| anyhow!("glob error: {}", e))?;
    paths.sort();
    Ok(paths)
}

/// Contract display name: the source file stem
fn contract_name(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow!("cannot derive contract name from {}", path.display()))
}

fn generate_one(
    abi_file: &Path,
    engine: &TemplateEngine,
    output_dir: &Path,
    extension: &str,
) -> Result<()> {
    let name = contract_name(abi_file)?;
    let content = fs::read_to_string(abi_file)
        .with_context(|| format!("failed to read {}", abi_file.display()))?;
    let document: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", abi_file.display()))?;

    let contract = Contract::from_document(name, &document)?;
    let rendered = engine.render(&contract.context()?)?;

    let out_path = output_dir.join(format!("{}.{}", contract.name(), extension));
    fs::write(&out_path, rendered)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    debug!("Wrote {}", out_path.display());
    Ok(())
}

/// Execute the generate command
pub fn cmd_generate(options: &GenerateOptions) -> Result<()> {
    let abi_files = sorted_glob(&options.abis)?;
    if abi_files.is_empty() {
        bail!("no ABI files matched pattern `{}`", options.abis);
    }

    let partial_files = sorted_glob(&options.partials)?;
    let engine = TemplateEngine::new(&options.template, &partial_files, options.backend)?;

    fs::create_dir_all(&options.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            options.output_dir.display()
        )
    })?;

    info!("Generating bindings for {} contracts", abi_files.len());

    let mut failed = 0usize;
    for abi_file in &abi_files {
        if let Err(e) = generate_one(abi_file, &engine, &options.output_dir, &options.extension) {
            error!("{}: {:#}", abi_file.display(), e);
            failed += 1;
        }
    }

    if failed > 0 {
        bail!(
            "{} of {} contracts failed to generate",
            failed,
            abi_files.len()
        );
    }

    info!("Wrote {} files to {}", abi_files.len(), options.output_dir.display());
    Ok(())
}
