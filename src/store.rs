// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The record store: page URL → display metadata.
//!
//! This is the lookup table the build writes and the page loads. It is
//! checked once, here, when it is constructed; after that every record has
//! a string title, categories and content, and nothing downstream needs to
//! re-validate.
//!
//! # File format
//!
//! ```json
//! {
//!   "version": 1,
//!   "checksum": "9f2c61a0",
//!   "records": {
//!     "/2024/01/hello/": { "title": "Hello", "categories": "meta", "content": "..." }
//!   }
//! }
//! ```
//!
//! `checksum` is the CRC32 (lowercase hex) of the compact JSON encoding of
//! `records`. Records are kept in a `BTreeMap`, so that encoding is stable.
//!
//! A bare `{ ref: record }` object without the envelope is also accepted,
//! which is what hand-written or template-generated stores look like.
//!
//! JSON text allows an object to repeat a key. A ref that appears twice in
//! store text is rejected with `StoreError::DuplicateRef` rather than letting
//! the later record silently replace the earlier one.

use crate::error::{SearchError, StoreError};
use crate::types::Record;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

/// Store file format version written by this build.
pub const STORE_VERSION: u32 = 1;

/// Immutable, validated map from page reference to record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    records: BTreeMap<String, Record>,
}

#[derive(Serialize)]
struct Envelope<'a> {
    version: u32,
    checksum: String,
    records: &'a BTreeMap<String, Record>,
}

impl RecordStore {
    /// Build a store from already-typed records.
    ///
    /// Fails on an empty reference or on the same reference appearing twice.
    pub fn from_records<I>(records: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = (String, Record)>,
    {
        let mut map = BTreeMap::new();
        for (reference, record) in records {
            if reference.is_empty() {
                return Err(SearchError::invalid("record reference", "a non-empty string", "\"\"").into());
            }
            if map.contains_key(&reference) {
                return Err(StoreError::DuplicateRef { reference });
            }
            map.insert(reference, record);
        }
        Ok(RecordStore { records: map })
    }

    /// Validate an untyped JSON value into a store.
    ///
    /// Accepts the versioned envelope or a bare lookup table.
    pub fn from_json_value(value: Value) -> Result<Self, StoreError> {
        let mut root = match value {
            Value::Object(root) => root,
            other => {
                return Err(SearchError::invalid("store", "an object", describe(&other)).into())
            }
        };

        if is_envelope(&root) {
            let version = root.get("version").and_then(Value::as_u64).unwrap_or(0);
            if version != u64::from(STORE_VERSION) {
                return Err(StoreError::UnsupportedVersion {
                    version,
                    supported: STORE_VERSION,
                });
            }
            let stored = root
                .get("checksum")
                .and_then(Value::as_str)
                .map(str::to_string);
            let Some(Value::Object(records)) = root.remove("records") else {
                return Err(SearchError::invalid("store records", "an object", "nothing").into());
            };
            let store = Self::from_object(records)?;
            if let Some(stored) = stored {
                let computed = store.checksum();
                if stored != computed {
                    return Err(StoreError::ChecksumMismatch { stored, computed });
                }
            }
            return Ok(store);
        }

        Self::from_object(root)
    }

    /// Parse and validate store JSON text.
    ///
    /// Unlike `from_json_value`, this sees the text before keys are merged,
    /// so a ref repeated in the table is a `DuplicateRef` error.
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        let raw: RawValue = serde_json::from_str(json)?;
        if let RawValue::Object(root) = &raw {
            let table = match root.get("records") {
                Some(RawValue::Object(records)) if root.get("version").is_some() => records,
                _ => root,
            };
            if let Some(reference) = table.first_duplicate() {
                return Err(StoreError::DuplicateRef {
                    reference: reference.to_string(),
                });
            }
        }
        Self::from_json_value(raw.into())
    }

    /// Read a store file from disk.
    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    fn from_object(records: Map<String, Value>) -> Result<Self, StoreError> {
        let mut map = BTreeMap::new();
        for (reference, entry) in records {
            let record = record_from_value(&reference, entry)?;
            map.insert(reference, record);
        }
        if map.contains_key("") {
            return Err(SearchError::invalid("record reference", "a non-empty string", "\"\"").into());
        }
        Ok(RecordStore { records: map })
    }

    pub fn get(&self, reference: &str) -> Option<&Record> {
        self.records.get(reference)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in reference order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.records.iter().map(|(r, rec)| (r.as_str(), rec))
    }

    /// CRC32 of the compact records encoding, as 8 lowercase hex digits.
    pub fn checksum(&self) -> String {
        // Serializing a BTreeMap of plain strings cannot fail.
        let bytes = serde_json::to_vec(&self.records).unwrap_or_default();
        format!("{:08x}", crc32fast::hash(&bytes))
    }

    /// Encode as the versioned envelope.
    pub fn to_json(&self) -> Result<String, StoreError> {
        let envelope = Envelope {
            version: STORE_VERSION,
            checksum: self.checksum(),
            records: &self.records,
        };
        Ok(serde_json::to_string(&envelope)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, StoreError> {
        let envelope = Envelope {
            version: STORE_VERSION,
            checksum: self.checksum(),
            records: &self.records,
        };
        Ok(serde_json::to_string_pretty(&envelope)?)
    }

    /// Write the envelope to `path`.
    pub fn write(&self, path: &Path) -> Result<(), StoreError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

fn is_envelope(root: &Map<String, Value>) -> bool {
    root.contains_key("version") && matches!(root.get("records"), Some(Value::Object(_)))
}

/// Which of the two accepted layouts a store document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreShape {
    /// `{version, checksum?, records}`.
    Envelope { version: u64 },
    /// A bare `{ ref: record }` table.
    Bare,
}

impl StoreShape {
    /// The layout `from_json_value` would read `value` as, or `None` when it
    /// is not an object at all.
    pub fn of(value: &Value) -> Option<Self> {
        let root = value.as_object()?;
        Some(if is_envelope(root) {
            StoreShape::Envelope {
                version: root.get("version").and_then(Value::as_u64).unwrap_or(0),
            }
        } else {
            StoreShape::Bare
        })
    }
}

impl fmt::Display for StoreShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreShape::Envelope { version } => write!(f, "envelope v{}", version),
            StoreShape::Bare => f.write_str("bare lookup table"),
        }
    }
}

/// JSON as written, with every object entry kept in order.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Object(RawObject),
    Other(Value),
}

struct RawObject(Vec<(String, RawValue)>);

impl RawObject {
    fn get(&self, key: &str) -> Option<&RawValue> {
        self.0.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    fn first_duplicate(&self) -> Option<&str> {
        let mut seen = HashSet::with_capacity(self.0.len());
        self.0
            .iter()
            .map(|(k, _)| k.as_str())
            .find(|k| !seen.insert(*k))
    }
}

impl<'de> Deserialize<'de> for RawObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawObject;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawObject, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, RawValue>()? {
                    entries.push(entry);
                }
                Ok(RawObject(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl From<RawValue> for Value {
    fn from(raw: RawValue) -> Value {
        match raw {
            RawValue::Object(RawObject(entries)) => Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
            RawValue::Other(value) => value,
        }
    }
}

fn record_from_value(reference: &str, entry: Value) -> Result<Record, SearchError> {
    let mut fields = match entry {
        Value::Object(fields) => fields,
        other => {
            return Err(SearchError::invalid(
                format!("record '{}'", reference),
                "an object",
                describe(&other),
            ))
        }
    };

    let title = match fields.remove("title") {
        Some(Value::String(s)) => s,
        Some(other) => return Err(field_error(reference, "title", &other)),
        None => {
            return Err(SearchError::invalid(
                format!("record '{}' field 'title'", reference),
                "a string",
                "nothing",
            ))
        }
    };

    let categories = match fields.remove("categories") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(Value::Array(items)) => {
            let mut names = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) => names.push(s),
                    other => return Err(field_error(reference, "categories", &other)),
                }
            }
            names.join(", ")
        }
        Some(other) => return Err(field_error(reference, "categories", &other)),
    };

    let content = match fields.remove("content") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => return Err(field_error(reference, "content", &other)),
    };

    Ok(Record {
        title,
        categories,
        content,
    })
}

fn field_error(reference: &str, field: &str, value: &Value) -> SearchError {
    SearchError::invalid(
        format!("record '{}' field '{}'", reference, field),
        "a string",
        describe(value),
    )
}

/// Short description of a JSON value for error messages.
pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Array(a) => format!("array of {}", a.len()),
        Value::Object(_) => "object".to_string(),
    }
}
