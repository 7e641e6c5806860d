use anyhow::{bail, Context, Result};
use contract_abi::{normalize_contract_name, parse_abi_json};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use walkdir::WalkDir;
use web3_typegen_core::{codegen, TypegenConfig};

/// Declaration rendered from one ABI file
#[derive(Debug, Clone)]
pub struct Generated {
    pub contract: String,
    pub methods: usize,
    pub events: usize,
    pub declaration: String,
}

/// Per-file result reported in the summary
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub source: PathBuf,
    pub contract: Option<String>,
    pub output: Option<PathBuf>,
    pub error: Option<String>,
}

impl FileReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Collect ABI files under `path`. An explicit file is always accepted;
/// directories are walked recursively and filtered by the config.
pub fn collect_abi_files(path: &Path, config: &TypegenConfig) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        bail!("Path does not exist: {}", path.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| config.accepts_extension(p))
        .filter(|p| !config.should_ignore(&p.to_string_lossy()))
        .collect();
    files.sort();

    debug!(root = %path.display(), count = files.len(), "collected ABI files");
    Ok(files)
}

/// Contract name derived from the file stem
pub fn contract_name_for(source: &Path) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    normalize_contract_name(&stem)
}

pub fn generate_file(source: &Path) -> Result<Generated> {
    let content = fs::read_to_string(source)
        .with_context(|| format!("Failed to read {}", source.display()))?;
    let contract_name = contract_name_for(source);

    let contract = parse_abi_json(&content, &contract_name)
        .with_context(|| format!("Failed to parse ABI in {}", source.display()))?;
    let declaration = codegen(&contract)
        .with_context(|| format!("Failed to generate {}", contract_name))?;

    Ok(Generated {
        methods: contract.method_count(),
        events: contract.events.len(),
        contract: contract_name,
        declaration,
    })
}

/// Generate every file in parallel. Results keep the order of `files`.
pub fn generate_all(files: &[PathBuf]) -> Vec<(PathBuf, Result<Generated>)> {
    files
        .par_iter()
        .map(|source| (source.clone(), generate_file(source)))
        .collect()
}

/// Write each successful declaration to the configured output directory.
/// Two files mapping to the same contract name are reported as a failure
/// for the later one. A failed write is reported for that file only.
pub fn write_declarations(
    results: Vec<(PathBuf, Result<Generated>)>,
    config: &TypegenConfig,
) -> Result<Vec<FileReport>> {
    fs::create_dir_all(&config.output.dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output.dir.display()
        )
    })?;

    let mut seen = HashSet::new();
    let mut reports = Vec::with_capacity(results.len());

    for (source, result) in results {
        let report = match result {
            Ok(generated) => {
                let output = config.output_path(&generated.contract);
                if !seen.insert(generated.contract.clone()) {
                    failure(
                        source,
                        Some(generated.contract),
                        format!(
                            "Duplicate contract name; {} already written",
                            output.display()
                        ),
                    )
                } else {
                    match fs::write(&output, &generated.declaration)
                        .with_context(|| format!("Failed to write {}", output.display()))
                    {
                        Ok(()) => {
                            info!(
                                contract = %generated.contract,
                                methods = generated.methods,
                                events = generated.events,
                                output = %output.display(),
                                "wrote declaration"
                            );
                            FileReport {
                                source,
                                contract: Some(generated.contract),
                                output: Some(output),
                                error: None,
                            }
                        }
                        Err(e) => failure(source, Some(generated.contract), format!("{:#}", e)),
                    }
                }
            }
            Err(e) => failure(source, None, format!("{:#}", e)),
        };
        reports.push(report);
    }

    Ok(reports)
}

pub fn failure(source: PathBuf, contract: Option<String>, message: String) -> FileReport {
    error!(source = %source.display(), error = %message, "generation failed");
    FileReport {
        source,
        contract,
        output: None,
        error: Some(message),
    }
}
