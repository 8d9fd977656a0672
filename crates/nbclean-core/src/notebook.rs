use crate::clean::clean_notebook;
use crate::error::{NotebookError, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

/// A decoded notebook document.
///
/// The document is kept as a generic JSON object so fields the cleaner does
/// not touch are written back exactly as they were read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notebook {
    root: Map<String, Value>,
}

impl Notebook {
    /// Number of cells, or zero if `cells` is missing or not an array
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.root
            .get("cells")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Clean the notebook in place. See [`clean_notebook`].
    ///
    /// # Errors
    ///
    /// Returns [`NotebookError::InvalidFormat`] if the cell list or a
    /// metadata field has the wrong shape.
    pub fn clean(&mut self, clear_all: bool) -> Result<()> {
        clean_notebook(&mut self.root, clear_all)
    }

    /// Encode with one-space indentation and sorted keys.
    ///
    /// Non-ASCII characters are written verbatim. No trailing newline is
    /// added; see [`Notebook::write_to_stream`] for the streaming form.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn to_json_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_json(&mut buf)?;
        // serde_json only emits valid UTF-8
        String::from_utf8(buf).map_err(|e| NotebookError::invalid(e.to_string()))
    }

    /// Write the encoded notebook followed by a newline, then flush.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn write_to_stream<W: Write>(&self, mut writer: W) -> Result<()> {
        self.write_json(&mut writer)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Overwrite `path` with the encoded notebook (no trailing newline).
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        let formatter = PrettyFormatter::with_indent(b" ");
        let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
        self.root.serialize(&mut ser)?;
        Ok(())
    }
}

impl TryFrom<Value> for Notebook {
    type Error = NotebookError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(NotebookError::invalid(format!(
                "expected a JSON object at the notebook root, found {}",
                json_kind(&other)
            ))),
        }
    }
}

impl From<Notebook> for Value {
    fn from(notebook: Notebook) -> Self {
        Self::Object(notebook.root)
    }
}

/// Read a notebook from a file path
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The notebook JSON is malformed
/// - The root is not a JSON object
#[must_use = "this function returns a notebook that should be processed"]
pub fn read_notebook<P: AsRef<Path>>(path: P) -> Result<Notebook> {
    let content = fs::read_to_string(path)?;
    read_notebook_from_str(&content)
}

/// Read a notebook from a string
///
/// # Errors
///
/// Returns an error if the JSON is malformed or the root is not an object.
#[must_use = "this function returns a notebook that should be processed"]
pub fn read_notebook_from_str(content: &str) -> Result<Notebook> {
    let value: Value = serde_json::from_str(content)?;
    Notebook::try_from(value)
}

/// Read a notebook from a UTF-8 byte stream such as stdin
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid UTF-8 JSON, or
/// the root is not an object.
#[must_use = "this function returns a notebook that should be processed"]
pub fn read_notebook_from_reader<R: Read>(mut reader: R) -> Result<Notebook> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    read_notebook_from_str(&content)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SIMPLE_NOTEBOOK: &str = r##"{
        "nbformat": 4,
        "nbformat_minor": 5,
        "metadata": {
            "kernelspec": {"name": "python3", "display_name": "Python 3"},
            "language_info": {"name": "python", "version": "3.9.0"}
        },
        "cells": [
            {
                "id": "cell-1",
                "cell_type": "markdown",
                "metadata": {},
                "source": ["# Héllo Wörld\n", "This is a test notebook."]
            },
            {
                "id": "cell-2",
                "cell_type": "code",
                "metadata": {"collapsed": false, "hide_input": true},
                "execution_count": 7,
                "source": ["2 + 2"],
                "outputs": [
                    {
                        "output_type": "execute_result",
                        "execution_count": 7,
                        "data": {"text/plain": "4"},
                        "metadata": {}
                    }
                ]
            }
        ]
    }"##;

    #[test]
    fn test_read_and_clean_simple_notebook() {
        let mut notebook = read_notebook_from_str(SIMPLE_NOTEBOOK).unwrap();
        assert_eq!(notebook.cell_count(), 2);

        notebook.clean(false).unwrap();
        let value = Value::from(notebook);
        assert_eq!(
            value["metadata"],
            json!({"kernelspec": {"name": "python3", "display_name": "Python 3"}})
        );
        assert_eq!(value["cells"][1]["execution_count"], Value::Null);
        assert_eq!(value["cells"][1]["metadata"], json!({"hide_input": true}));
        assert_eq!(value["cells"][1]["outputs"][0]["execution_count"], Value::Null);
        // Output metadata is not cell metadata and is left alone
        assert_eq!(value["cells"][1]["outputs"][0]["metadata"], json!({}));
    }

    #[test]
    fn test_encoding_sorts_keys_with_one_space_indent() {
        let notebook =
            read_notebook_from_str(r#"{"metadata": {}, "cells": [], "b": [1]}"#).unwrap();
        assert_eq!(
            notebook.to_json_string().unwrap(),
            "{\n \"b\": [\n  1\n ],\n \"cells\": [],\n \"metadata\": {}\n}"
        );
    }

    #[test]
    fn test_encoding_keeps_non_ascii() {
        let notebook = read_notebook_from_str(SIMPLE_NOTEBOOK).unwrap();
        let encoded = notebook.to_json_string().unwrap();
        assert!(encoded.contains("Héllo Wörld"));
        assert!(!encoded.contains("\\u00e9"));
    }

    #[test]
    fn test_stream_adds_trailing_newline() {
        let notebook = read_notebook_from_str(r#"{"cells": []}"#).unwrap();
        let mut out = Vec::new();
        notebook.write_to_stream(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n \"cells\": []\n}\n");
    }

    #[test]
    fn test_numbers_keep_their_source_text() {
        let mut notebook = read_notebook_from_str(
            r#"{"cells": [], "metadata": {"kernelspec": {"n": 123456789012345678901234567890, "v": 1e-05, "f": 1.0}}}"#,
        )
        .unwrap();
        notebook.clean(false).unwrap();
        let encoded = notebook.to_json_string().unwrap();
        assert!(encoded.contains("\"n\": 123456789012345678901234567890"));
        assert!(encoded.contains("\"v\": 1e-05"));
        assert!(encoded.contains("\"f\": 1.0"));
    }

    #[test]
    fn test_read_from_reader() {
        let notebook = read_notebook_from_reader(SIMPLE_NOTEBOOK.as_bytes()).unwrap();
        assert_eq!(notebook.cell_count(), 2);
    }

    #[test]
    fn test_non_object_root_is_rejected() {
        let err = read_notebook_from_str("[1, 2]").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid notebook format: expected a JSON object at the notebook root, found an array"
        );
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = read_notebook_from_str("{\"cells\": [").unwrap_err();
        assert!(matches!(err, NotebookError::JsonError(_)));
    }

    #[test]
    fn test_cleaned_output_is_stable() {
        let mut first = read_notebook_from_str(SIMPLE_NOTEBOOK).unwrap();
        first.clean(false).unwrap();
        let encoded = first.to_json_string().unwrap();

        let mut second = read_notebook_from_str(&encoded).unwrap();
        second.clean(false).unwrap();
        assert_eq!(second.to_json_string().unwrap(), encoded);
    }
}
