//! Command-line interface for cleaning Jupyter notebooks
//!
//! This crate provides the `nbclean` tool, which strips execution counts and
//! volatile metadata from notebooks so that re-running them does not produce
//! version-control noise.
//!
//! # Quick Start
//!
//! ```bash
//! # Clean every notebook under the configured notebook directory
//! nbclean
//!
//! # Clean notebooks matching a glob
//! nbclean 'nbs/*.ipynb'
//!
//! # Also drop all outputs and cell metadata
//! nbclean --clear-all
//!
//! # Print cleaned notebooks instead of rewriting them
//! nbclean --disp nbs/00_core.ipynb
//! ```
//!
//! # Git filter
//!
//! With `--read-input-stream` a single notebook is read from stdin and the
//! cleaned result is printed to stdout:
//!
//! ```bash
//! git config filter.clean-nbs.clean 'nbclean --read-input-stream'
//! git config filter.clean-nbs.smudge cat
//! echo '*.ipynb filter=clean-nbs' >> .gitattributes
//! ```
//!
//! # Configuration
//!
//! `.nbclean.toml` in the current or a parent directory, then
//! `~/.nbclean.toml`:
//!
//! ```toml
//! nbs_path = "nbs"   # relative to the config file
//! clear_all = false
//! ```

pub mod config;
pub mod files;

pub use config::Config;
pub use files::{clean_stream, display_files, resolve_inputs, rewrite_files, CleanSummary};
