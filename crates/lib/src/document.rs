//! The serialized document collaborator.
//!
//! The property tree does not implement its own text format. Everything it
//! loads from or saves to is a [`Document`] — the generic JSON tree value
//! supplied by `serde_json` — and this module collects the free functions
//! that operate on whole documents: the right-biased [`merge`] used when a
//! group flattens its children, parse/stringify wrappers, and the file
//! helpers that turn a path into a parsed document and back.
//!
//! File reads are deliberately forgiving: configuration and save-state files
//! are frequently missing on first run, so [`read_document_or_empty`] reports
//! the failure through `tracing` and hands back an empty document instead of
//! failing the caller. Writes of empty documents are skipped for the same
//! reason. The strict [`read_document`] / [`write_document`] variants return
//! errors for callers that want them.

use std::fs;
use std::path::Path;

use serde_json::Map;

use crate::Result;

/// The generic tree-shaped value exchanged with the serialization format.
///
/// Objects, arrays, and scalar leaves; key lookup and iteration — everything
/// the property tree needs from a document is provided by
/// [`serde_json::Value`], so the core simply uses it directly.
pub type Document = serde_json::Value;

/// Returns a short name for the document's shape, for error messages.
pub fn document_kind(doc: &Document) -> &'static str {
    match doc {
        Document::Null => "null",
        Document::Bool(_) => "bool",
        Document::Number(_) => "number",
        Document::String(_) => "string",
        Document::Array(_) => "array",
        Document::Object(_) => "object",
    }
}

/// Returns true if the document carries no data.
///
/// Null, `{}`, and `[]` all count as empty; any scalar leaf does not.
pub fn is_empty_document(doc: &Document) -> bool {
    match doc {
        Document::Null => true,
        Document::Object(map) => map.is_empty(),
        Document::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Merges `addition` into `base`, key-wise and right-biased.
///
/// Every key of `addition` is set in `base`, overwriting on collision; keys
/// only in `base` are preserved. A non-object `addition` overwrites `base`
/// wholesale (the degenerate case of right bias), and merging an object into
/// a non-object `base` replaces `base` with just the addition's keys.
///
/// # Examples
///
/// ```
/// use proptree::{Document, merge};
/// use serde_json::json;
///
/// let mut base: Document = json!({"x": 1, "y": 2});
/// merge(&mut base, &json!({"y": 3, "z": 4}));
/// assert_eq!(base, json!({"x": 1, "y": 3, "z": 4}));
/// ```
pub fn merge(base: &mut Document, addition: &Document) {
    let Document::Object(add) = addition else {
        *base = addition.clone();
        return;
    };

    if !matches!(base, Document::Object(_)) {
        *base = Document::Object(Map::new());
    }
    if let Document::Object(existing) = base {
        for (key, value) in add {
            existing.insert(key.clone(), value.clone());
        }
    }
}

/// Parses a document from JSON text.
pub fn parse_document(text: &str) -> Result<Document> {
    Ok(serde_json::from_str(text)?)
}

/// Renders a document as pretty-printed JSON text.
pub fn stringify_document(doc: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Reads and parses the JSON file at `path`.
///
/// Open and parse failures are returned to the caller. Use
/// [`read_document_or_empty`] for the degrade-and-continue behavior.
pub fn read_document(path: impl AsRef<Path>) -> Result<Document> {
    let text = fs::read_to_string(path)?;
    parse_document(&text)
}

/// Reads the JSON file at `path`, degrading to an empty document on failure.
///
/// A missing or malformed file is reported with a `tracing` warning and an
/// empty object document is returned, so first-run callers can load defaults
/// without special-casing the absent file.
pub fn read_document_or_empty(path: impl AsRef<Path>) -> Document {
    let path = path.as_ref();
    match read_document(path) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read document, using empty");
            Document::Object(Map::new())
        }
    }
}

/// Writes a document to the JSON file at `path`, pretty-printed.
///
/// An empty document (see [`is_empty_document`]) is not written at all; the
/// skip is reported with a `tracing` warning and the call succeeds. Write
/// failures are returned.
pub fn write_document(path: impl AsRef<Path>, doc: &Document) -> Result<()> {
    let path = path.as_ref();
    if is_empty_document(doc) {
        tracing::warn!(path = %path.display(), "document is empty, skipping write");
        return Ok(());
    }

    let text = stringify_document(doc)?;
    fs::write(path, text)?;
    Ok(())
}
