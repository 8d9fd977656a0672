//! # nbclean-core
//!
//! Jupyter Notebook (.ipynb) cleaning library.
//!
//! Re-running a notebook changes execution counts and editor metadata even
//! when the code did not change, which makes version-control diffs noisy.
//! This crate strips that state:
//! - Cell and output execution counts are set to `null`
//! - Cell metadata is pruned to `hide_input` (or emptied in full-clear mode)
//! - Cell outputs are emptied in full-clear mode
//! - Notebook metadata is pruned to `kernelspec`, `jekyll` and `jupytext`
//!
//! Every other field is left untouched.
//!
//! ## Example
//!
//! ```no_run
//! use nbclean_core::read_notebook;
//!
//! let mut notebook = read_notebook("analysis.ipynb")?;
//! notebook.clean(false)?;
//! notebook.save("analysis.ipynb")?;
//! # Ok::<(), nbclean_core::NotebookError>(())
//! ```

/// Cleaning rules for cells, outputs and notebook metadata
pub mod clean;
/// Error types for notebook cleaning
pub mod error;
/// Notebook document reading and writing
pub mod notebook;

pub use clean::{
    clean_cell, clean_cell_outputs, clean_notebook, clear_execution_count, CELL_METADATA_KEEP,
    NB_METADATA_KEEP,
};
pub use error::{NotebookError, Result};
pub use notebook::{read_notebook, read_notebook_from_reader, read_notebook_from_str, Notebook};
