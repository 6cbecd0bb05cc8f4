//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Path, PathBuf};

use blockc_syntax::{Workspace, parse_document, write_document};
use miette::{Diagnostic, NamedSource, Report};
use tracing::{debug, info};

use crate::backend::{Compiler, GeneratorConfig, arduino_registry};
use crate::project::{FlashRequest, ProjectRecord};

use super::{CliError, CliResult, ExitCode};

/// Maximum tree document size (16 MB)
///
/// Editor documents are a few kilobytes; anything this large is not one.
const MAX_SOURCE_SIZE: u64 = 16 * 1024 * 1024;

/// Read a tree document.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE`
pub fn read_source(path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", path.display(), e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "File '{}' is too large ({} bytes, max {} bytes)",
            path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    let source = fs::read_to_string(path)
        .map_err(|e| CliError::failure(format!("Error reading file '{}': {}", path.display(), e)))?;
    debug!(path = %path.display(), bytes = source.len(), "read tree document");
    Ok(source)
}

/// Render a diagnostic against the document it came from.
fn render<E>(path: &Path, source: &str, err: E) -> CliError
where
    E: Diagnostic + Send + Sync + 'static,
{
    let report = Report::new(err).with_source_code(NamedSource::new(path.display().to_string(), source.to_string()));
    CliError::failure(format!("{:?}", report))
}

fn load(path: &Path) -> CliResult<(String, Workspace)> {
    let source = read_source(path)?;
    let workspace = parse_document(&source).map_err(|e| render(path, &source, e))?;
    Ok((source, workspace))
}

/// Read, parse and compile a document; returns the document text and the sketch.
fn compile_file(path: &Path, config: &GeneratorConfig) -> CliResult<(String, String)> {
    let (source, workspace) = load(path)?;
    let sketch = Compiler::new(arduino_registry())
        .with_config(config.clone())
        .compile(&workspace)
        .map_err(|e| render(path, &source, e))?;
    Ok((source, sketch))
}

/// Default output path for `build`: the input path with an `.ino` extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("ino")
}

/// Parse a document and print its tree (debug).
pub fn parse_file(path: &Path) -> CliResult<ExitCode> {
    let (_, workspace) = load(path)?;
    println!("{:#?}", workspace);
    Ok(ExitCode::SUCCESS)
}

/// Compile a document and print the sketch.
pub fn emit(path: &Path, config: &GeneratorConfig) -> CliResult<ExitCode> {
    let (_, sketch) = compile_file(path, config)?;
    print!("{}", sketch);
    Ok(ExitCode::SUCCESS)
}

/// Compile a document and write the sketch to `output` (or next to the input).
pub fn build(path: &Path, output: Option<&Path>, config: &GeneratorConfig) -> CliResult<ExitCode> {
    let (_, sketch) = compile_file(path, config)?;
    let out = output.map_or_else(|| default_output_path(path), Path::to_path_buf);

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| CliError::failure(format!("Error creating directory '{}': {}", parent.display(), e)))?;
    }
    fs::write(&out, &sketch).map_err(|e| CliError::failure(format!("Error writing '{}': {}", out.display(), e)))?;

    info!(output = %out.display(), bytes = sketch.len(), "wrote sketch");
    println!("✓ Wrote sketch: {}", out.display());
    Ok(ExitCode::SUCCESS)
}

/// Rewrite a document in canonical form, or with `check_mode` only report whether it would change.
pub fn format_document(path: &Path, check_mode: bool) -> CliResult<ExitCode> {
    let (source, workspace) = load(path)?;
    let formatted = write_document(&workspace);
    let changed = source != formatted;

    if check_mode {
        if changed {
            return Err(CliError::failure(format!("Would reformat: {}", path.display())));
        }
        println!("✓ {} already formatted", path.display());
    } else if changed {
        fs::write(path, &formatted)
            .map_err(|e| CliError::failure(format!("Error writing {}: {}", path.display(), e)))?;
        println!("Formatted: {}", path.display());
    } else {
        println!("✓ {} already formatted", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

/// Print the project-store payload for a document.
pub fn project(
    path: &Path,
    id: &str,
    name: Option<&str>,
    description: Option<&str>,
    config: &GeneratorConfig,
) -> CliResult<ExitCode> {
    let (source, sketch) = compile_file(path, config)?;
    let name = name
        .map(str::to_string)
        .or_else(|| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| id.to_string());

    let mut record = ProjectRecord::new(id, name, source, sketch);
    if let Some(description) = description {
        record = record.with_description(description);
    }
    print_json(&record)
}

/// Print the build-service payload for a document.
pub fn flash_request(
    path: &Path,
    board: Option<&str>,
    project_name: &str,
    config: &GeneratorConfig,
) -> CliResult<ExitCode> {
    let (_, sketch) = compile_file(path, config)?;
    let mut request = FlashRequest::new(sketch).with_project_name(project_name);
    if let Some(board) = board {
        request = request.with_board(board);
    }
    print_json(&request)
}

fn print_json<T: serde::Serialize>(payload: &T) -> CliResult<ExitCode> {
    let json = serde_json::to_string_pretty(payload)
        .map_err(|e| CliError::failure(format!("Error encoding payload: {}", e)))?;
    println!("{}", json);
    Ok(ExitCode::SUCCESS)
}
