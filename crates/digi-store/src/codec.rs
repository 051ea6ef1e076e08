//! Tree object encoding.
//!
//! A tree payload is a compact JSON array of `{"Name","Mode","Hash"}` objects
//! in caller order. Strings escape `<`, `>`, `&`, U+2028 and U+2029 as
//! `\uXXXX` so that payloads, and therefore tree IDs, match those already
//! written by other producers of the format.

use std::io;

use serde::Serialize;
use tracing::debug;

use digi_types::ObjectId;

use crate::error::{StoreError, StoreResult};
use crate::object::{ObjectKind, TreeEntry};
use crate::traits::ObjectStore;

/// Encodes ordered [`TreeEntry`] lists to and from `Tree` objects.
pub struct TreeCodec;

impl TreeCodec {
    /// Serialize entries into the canonical tree payload.
    pub fn encode_payload(entries: &[TreeEntry]) -> StoreResult<Vec<u8>> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, CanonicalFormatter);
        entries
            .serialize(&mut ser)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Parse a tree payload. A literal `null` decodes as no entries.
    pub fn decode_payload(data: &[u8]) -> StoreResult<Vec<TreeEntry>> {
        serde_json::from_slice::<Option<Vec<TreeEntry>>>(data)
            .map(Option::unwrap_or_default)
            .map_err(|e| StoreError::Malformed(e.to_string()))
    }

    /// Encode entries and store them as a `Tree` object.
    pub fn put_tree<S>(store: &S, entries: &[TreeEntry]) -> StoreResult<ObjectId>
    where
        S: ObjectStore + ?Sized,
    {
        let payload = Self::encode_payload(entries)?;
        let id = store.put(ObjectKind::Tree, payload)?;
        debug!(id = %id.short_hex(), entries = entries.len(), "wrote tree");
        Ok(id)
    }

    /// Read and decode the `Tree` object stored under `id`.
    ///
    /// Fails with `NotFound` if absent, `TypeMismatch` if the object is not a
    /// tree and `Malformed` if the payload does not decode.
    pub fn read_tree<S>(store: &S, id: &ObjectId) -> StoreResult<Vec<TreeEntry>>
    where
        S: ObjectStore + ?Sized,
    {
        let obj = store.get(id)?;
        if obj.kind != ObjectKind::Tree {
            return Err(StoreError::TypeMismatch {
                id: *id,
                expected: ObjectKind::Tree,
                found: obj.kind,
            });
        }
        Self::decode_payload(&obj.data).map_err(|e| match e {
            StoreError::Malformed(reason) => StoreError::Malformed(format!("tree {id}: {reason}")),
            other => other,
        })
    }
}

/// Compact JSON with HTML-sensitive characters escaped.
struct CanonicalFormatter;

impl serde_json::ser::Formatter for CanonicalFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            let escaped = match ch {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..i].as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}
