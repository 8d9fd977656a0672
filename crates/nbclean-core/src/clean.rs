//! Notebook cleaning: execution counts, outputs and metadata
//!
//! The cleaner walks the decoded JSON tree in place. Fields the cleaner does
//! not know about are left alone, so everything except the pruned metadata and
//! the execution markers survives a round trip byte-for-byte after
//! re-serialization.

use serde_json::{Map, Value};

use crate::error::{NotebookError, Result};

/// Cell metadata keys that survive a non-full clean
pub const CELL_METADATA_KEEP: &[&str] = &["hide_input"];

/// Notebook metadata keys that survive every clean
pub const NB_METADATA_KEEP: &[&str] = &["kernelspec", "jekyll", "jupytext"];

/// Set `execution_count` to null if the key is present.
#[inline]
pub fn clear_execution_count(obj: &mut Map<String, Value>) {
    if let Some(count) = obj.get_mut("execution_count") {
        *count = Value::Null;
    }
}

/// Clear the execution count of every output in `cell`.
///
/// Outputs that are not objects carry no execution count and are skipped.
pub fn clean_cell_outputs(cell: &mut Map<String, Value>) {
    if let Some(Value::Array(outputs)) = cell.get_mut("outputs") {
        for output in outputs.iter_mut().filter_map(Value::as_object_mut) {
            clear_execution_count(output);
        }
    }
}

/// Clean `cell` by removing superfluous metadata, or everything except the
/// input if `clear_all` is set.
///
/// # Errors
///
/// Returns [`NotebookError::InvalidFormat`] if the cell's `metadata` needs
/// pruning but is not an object.
pub fn clean_cell(cell: &mut Map<String, Value>, clear_all: bool) -> Result<()> {
    clear_execution_count(cell);

    if clear_all {
        if let Some(outputs) = cell.get_mut("outputs") {
            *outputs = Value::Array(Vec::new());
        }
    } else {
        clean_cell_outputs(cell);
    }

    let Some(metadata) = cell.get_mut("metadata") else {
        return Ok(());
    };
    if clear_all {
        *metadata = Value::Object(Map::new());
        return Ok(());
    }
    let metadata = metadata
        .as_object_mut()
        .ok_or_else(|| NotebookError::invalid("cell `metadata` is not an object"))?;
    retain_keys(metadata, CELL_METADATA_KEEP);
    Ok(())
}

/// Clean every cell of `nb` and prune the notebook metadata.
///
/// `clear_all` is passed through to [`clean_cell`] for each cell. Cell order
/// and count never change.
///
/// # Errors
///
/// Returns [`NotebookError::InvalidFormat`] if `cells` is missing or not an
/// array, if a cell is not an object, or if a `metadata` field is not an
/// object.
pub fn clean_notebook(nb: &mut Map<String, Value>, clear_all: bool) -> Result<()> {
    let cells = nb
        .get_mut("cells")
        .ok_or_else(|| NotebookError::invalid("missing `cells`"))?
        .as_array_mut()
        .ok_or_else(|| NotebookError::invalid("`cells` is not an array"))?;

    for (index, cell) in cells.iter_mut().enumerate() {
        let cell = cell
            .as_object_mut()
            .ok_or_else(|| NotebookError::invalid(format!("cell {index} is not an object")))?;
        clean_cell(cell, clear_all)?;
    }

    if let Some(metadata) = nb.get_mut("metadata") {
        let metadata = metadata
            .as_object_mut()
            .ok_or_else(|| NotebookError::invalid("notebook `metadata` is not an object"))?;
        retain_keys(metadata, NB_METADATA_KEEP);
    }
    Ok(())
}

fn retain_keys(map: &mut Map<String, Value>, keep: &[&str]) {
    let before = map.len();
    map.retain(|key, _| keep.contains(&key.as_str()));
    let dropped = before - map.len();
    if dropped > 0 {
        tracing::trace!(dropped, "pruned metadata keys");
    }
}
