//! Notebook discovery and per-file cleaning.

use anyhow::{Context, Result};
use nbclean_core::{read_notebook, read_notebook_from_reader, Notebook};
use rayon::prelude::*;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Extension a file must carry to be cleaned
pub const NOTEBOOK_EXTENSION: &str = "ipynb";

/// Outcome of cleaning a batch of notebooks
#[derive(Debug, Default)]
pub struct CleanSummary {
    /// Notebooks cleaned successfully
    pub cleaned: usize,
    /// Notebooks that failed, with the reason
    pub failures: Vec<(PathBuf, anyhow::Error)>,
}

impl CleanSummary {
    fn record(&mut self, path: &Path, result: Result<()>) {
        match result {
            Ok(()) => self.cleaned += 1,
            Err(e) => self.failures.push((path.to_path_buf(), e)),
        }
    }

    /// Total number of notebooks attempted
    pub fn total(&self) -> usize {
        self.cleaned + self.failures.len()
    }
}

/// Check whether `path` names a notebook file
pub fn is_notebook(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == NOTEBOOK_EXTENSION)
}

/// Glob pattern matching every notebook under `nbs_path`
pub fn notebook_pattern(nbs_path: &Path) -> String {
    let root = glob::Pattern::escape(&nbs_path.to_string_lossy());
    format!("{root}/**/*.{NOTEBOOK_EXTENSION}")
}

/// Expand `fname` (a path or glob pattern), or every notebook under
/// `nbs_path` when no pattern is given.
///
/// Only existing files ending in `.ipynb` are returned, sorted and
/// deduplicated. Wildcards never match a leading `.`, so hidden files and
/// directories such as `.ipynb_checkpoints` are skipped unless named
/// literally.
pub fn resolve_inputs(fname: Option<&str>, nbs_path: &Path) -> Result<Vec<PathBuf>> {
    let pattern = fname.map_or_else(|| notebook_pattern(nbs_path), str::to_owned);
    tracing::debug!(%pattern, "expanding notebook pattern");

    let options = glob::MatchOptions {
        require_literal_leading_dot: true,
        ..glob::MatchOptions::new()
    };
    let matches = glob::glob_with(&pattern, options)
        .with_context(|| format!("Invalid glob pattern: {pattern}"))?;

    let mut paths = Vec::new();
    for entry in matches {
        let path = entry.context("Failed to read glob entry")?;
        if !path.is_file() {
            continue;
        }
        if !is_notebook(&path) {
            tracing::debug!(path = %path.display(), "skipping non-notebook file");
            continue;
        }
        paths.push(path);
    }
    paths.sort();
    paths.dedup();
    Ok(paths)
}

/// Read and clean one notebook file
pub fn clean_file(path: &Path, clear_all: bool) -> Result<Notebook> {
    let mut notebook = read_notebook(path)
        .with_context(|| format!("Failed to read notebook: {}", path.display()))?;
    notebook
        .clean(clear_all)
        .with_context(|| format!("Failed to clean notebook: {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        cells = notebook.cell_count(),
        clear_all,
        "cleaned notebook"
    );
    Ok(notebook)
}

/// Clean a single notebook read from `reader` and print it to `writer`.
///
/// This is the git filter mode: the cleaned document is followed by a
/// newline.
pub fn clean_stream<R: Read, W: Write>(reader: R, writer: W, clear_all: bool) -> Result<()> {
    let mut notebook =
        read_notebook_from_reader(reader).context("Failed to read notebook from input stream")?;
    notebook
        .clean(clear_all)
        .context("Failed to clean notebook from input stream")?;
    notebook
        .write_to_stream(writer)
        .context("Failed to write cleaned notebook")?;
    Ok(())
}

/// Clean every notebook in `paths` and write each back in place.
///
/// Files are processed in parallel; every file is attempted even if some
/// fail.
pub fn rewrite_files(paths: &[PathBuf], clear_all: bool) -> CleanSummary {
    let results: Vec<(&PathBuf, Result<()>)> = paths
        .par_iter()
        .map(|path| {
            let result = clean_file(path, clear_all).and_then(|notebook| {
                notebook
                    .save(path)
                    .with_context(|| format!("Failed to write notebook: {}", path.display()))
            });
            (path, result)
        })
        .collect();

    let mut summary = CleanSummary::default();
    for (path, result) in results {
        summary.record(path, result);
    }
    summary
}

/// Clean every notebook in `paths` and print it to `writer` without
/// touching the files, in order.
pub fn display_files<W: Write>(
    paths: &[PathBuf],
    clear_all: bool,
    mut writer: W,
) -> CleanSummary {
    let mut summary = CleanSummary::default();
    for path in paths {
        let result = clean_file(path, clear_all).and_then(|notebook| {
            notebook
                .write_to_stream(&mut writer)
                .context("Failed to write cleaned notebook")
        });
        summary.record(path, result);
    }
    summary
}
