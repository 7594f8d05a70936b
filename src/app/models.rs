//! Data models for node_status
//!
//! The node reports operations as loosely-typed JSON objects. This module
//! marshals them at the boundary into a closed set of variants so that the
//! report code can match exhaustively. Decoding never fails on a single
//! record: absent or mistyped fields become `None`, and an unrecognized
//! discriminator becomes [`OperationKind::Unknown`].

use std::collections::BTreeMap;

use chrono::{DateTime, Local, TimeZone};
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

/// JSON field names shared by every operation record
mod fields {
    pub const TYPE: &str = "type";
    pub const STORAGE_INDEX: &str = "storage-index-string";
    pub const TOTAL_SIZE: &str = "total-size";
    pub const STATUS: &str = "status";
    pub const STARTED: &str = "started";
    pub const PROGRESS: &str = "progress";
    pub const PROGRESS_HASH: &str = "progress-hash";
    pub const PROGRESS_CIPHERTEXT: &str = "progress-ciphertext";
    pub const PROGRESS_ENCODE_PUSH: &str = "progress-encode-push";
    pub const MODE: &str = "mode";
    pub const CLASS: &str = "class";
}

/// Per-phase completion of an upload, each in `[0, 1]`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UploadProgress {
    pub hash: Option<f64>,
    pub ciphertext: Option<f64>,
    pub encode_push: Option<f64>,
}

impl UploadProgress {
    /// Mean of the phases that were reported, or `None` if none were
    pub fn overall(&self) -> Option<f64> {
        let phases: Vec<f64> = [self.hash, self.ciphertext, self.encode_push]
            .into_iter()
            .flatten()
            .collect();
        if phases.is_empty() {
            None
        } else {
            Some(phases.iter().sum::<f64>() / phases.len() as f64)
        }
    }
}

/// Discriminated operation variants and their specific fields
#[derive(Debug, Clone, PartialEq)]
pub enum OperationKind {
    Upload(UploadProgress),
    Download { progress: Option<f64> },
    Publish { progress: Option<f64> },
    Retrieve { progress: Option<f64> },
    ServermapUpdate { mode: Option<String> },
    /// Any discriminator this tool does not know, or none at all
    Unknown {
        type_name: Option<String>,
        class: Option<String>,
    },
}

impl OperationKind {
    /// Wire discriminator for this kind
    pub fn type_name(&self) -> &str {
        match self {
            OperationKind::Upload(_) => "upload",
            OperationKind::Download { .. } => "download",
            OperationKind::Publish { .. } => "publish",
            OperationKind::Retrieve { .. } => "retrieve",
            OperationKind::ServermapUpdate { .. } => "mapupdate",
            OperationKind::Unknown { type_name, .. } => type_name.as_deref().unwrap_or("unknown"),
        }
    }

    /// Short label for the report's kind column
    pub fn label(&self) -> &'static str {
        match self {
            OperationKind::Upload(_) => "put",
            OperationKind::Download { .. } => "get",
            OperationKind::Publish { .. } => "pub",
            OperationKind::Retrieve { .. } => "ret",
            OperationKind::ServermapUpdate { .. } => "map",
            OperationKind::Unknown { .. } => "?",
        }
    }
}

/// One operation reported by the node
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRecord {
    pub kind: OperationKind,
    /// Base32 storage index, when the operation has one yet
    pub storage_index: Option<String>,
    /// Size of the object in bytes
    pub total_size: Option<u64>,
    /// Free-form status message
    pub status: Option<String>,
    /// Start time as seconds since the Unix epoch
    pub started: Option<f64>,
}

impl OperationRecord {
    /// Create a record of the given kind with no common fields set
    pub fn new(kind: OperationKind) -> Self {
        Self {
            kind,
            storage_index: None,
            total_size: None,
            status: None,
            started: None,
        }
    }

    /// Decode a record from the node's JSON
    ///
    /// Infallible: a value that is not an object decodes to an unknown record.
    pub fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            warn!("Operation record is not a JSON object: {}", value);
            return Self::new(OperationKind::Unknown {
                type_name: None,
                class: None,
            });
        };

        let kind = match string_field(object, fields::TYPE).as_deref() {
            Some("upload") => OperationKind::Upload(UploadProgress {
                hash: number_field(object, fields::PROGRESS_HASH),
                ciphertext: number_field(object, fields::PROGRESS_CIPHERTEXT),
                encode_push: number_field(object, fields::PROGRESS_ENCODE_PUSH),
            }),
            Some("download") => OperationKind::Download {
                progress: number_field(object, fields::PROGRESS),
            },
            Some("publish") => OperationKind::Publish {
                progress: number_field(object, fields::PROGRESS),
            },
            Some("retrieve") => OperationKind::Retrieve {
                progress: number_field(object, fields::PROGRESS),
            },
            Some("mapupdate") => OperationKind::ServermapUpdate {
                mode: string_field(object, fields::MODE),
            },
            other => {
                debug!("Unrecognized operation type: {:?}", other);
                OperationKind::Unknown {
                    type_name: other.map(str::to_string),
                    class: string_field(object, fields::CLASS),
                }
            }
        };

        Self {
            kind,
            storage_index: string_field(object, fields::STORAGE_INDEX),
            total_size: number_field(object, fields::TOTAL_SIZE)
                .filter(|size| *size >= 0.0)
                .map(|size| size as u64),
            status: string_field(object, fields::STATUS),
            started: number_field(object, fields::STARTED),
        }
    }

    /// Encode the record in the node's wire format
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert(fields::TYPE.into(), json!(self.kind.type_name()));
        object.insert(fields::STORAGE_INDEX.into(), json!(self.storage_index));
        object.insert(fields::TOTAL_SIZE.into(), json!(self.total_size));
        object.insert(fields::STATUS.into(), json!(self.status));
        if let Some(started) = self.started {
            object.insert(fields::STARTED.into(), json!(started));
        }

        match &self.kind {
            OperationKind::Upload(progress) => {
                object.insert(fields::PROGRESS_HASH.into(), json!(progress.hash));
                object.insert(fields::PROGRESS_CIPHERTEXT.into(), json!(progress.ciphertext));
                object.insert(
                    fields::PROGRESS_ENCODE_PUSH.into(),
                    json!(progress.encode_push),
                );
            }
            OperationKind::Download { progress }
            | OperationKind::Publish { progress }
            | OperationKind::Retrieve { progress } => {
                if let Some(progress) = progress {
                    object.insert(fields::PROGRESS.into(), json!(progress));
                }
            }
            OperationKind::ServermapUpdate { mode } => {
                object.insert(fields::MODE.into(), json!(mode));
            }
            OperationKind::Unknown { class, .. } => {
                if let Some(class) = class {
                    object.insert(fields::CLASS.into(), json!(class));
                }
            }
        }

        Value::Object(object)
    }

    /// Completion as a fraction in `[0, 1]`, if the record exposes one
    pub fn progress_fraction(&self) -> Option<f64> {
        match &self.kind {
            OperationKind::Upload(progress) => progress.overall(),
            OperationKind::Download { progress }
            | OperationKind::Publish { progress }
            | OperationKind::Retrieve { progress } => *progress,
            OperationKind::ServermapUpdate { .. } | OperationKind::Unknown { .. } => None,
        }
    }

    /// Whether the report can meaningfully summarize this record
    pub fn is_known(&self) -> bool {
        !matches!(self.kind, OperationKind::Unknown { .. })
    }

    /// Start time in the local timezone
    pub fn started_at(&self) -> Option<DateTime<Local>> {
        let started = self.started?;
        let secs = started.trunc() as i64;
        let nanos = ((started.fract()) * 1e9) as u32;
        Local.timestamp_opt(secs, nanos).single()
    }
}

/// The node's operation lists at one point in time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusSnapshot {
    pub active: Vec<OperationRecord>,
    pub recent: Vec<OperationRecord>,
}

impl StatusSnapshot {
    /// Decode from `{"active": [...], "recent": [...]}`
    ///
    /// Returns `None` only if the value is not an object. Missing or
    /// non-array lists are treated as empty.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(Self {
            active: record_list(object, "active"),
            recent: record_list(object, "recent"),
        })
    }

    /// Encode in the node's wire format
    pub fn to_json(&self) -> Value {
        json!({
            "active": self.active.iter().map(OperationRecord::to_json).collect::<Vec<_>>(),
            "recent": self.recent.iter().map(OperationRecord::to_json).collect::<Vec<_>>(),
        })
    }
}

/// The node's counters and stats at one point in time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsSnapshot {
    pub counters: BTreeMap<String, f64>,
    pub stats: BTreeMap<String, f64>,
}

impl StatsSnapshot {
    /// Decode from `{"counters": {...}, "stats": {...}}`
    ///
    /// Returns `None` only if the value is not an object. Non-numeric
    /// entries are dropped.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(Self {
            counters: number_map(object, "counters"),
            stats: number_map(object, "stats"),
        })
    }

    /// Counter value, 0 when absent
    pub fn counter(&self, name: &str) -> f64 {
        self.counters.get(name).copied().unwrap_or(0.0)
    }

    /// Stat value, 0 when absent
    pub fn stat(&self, name: &str) -> f64 {
        self.stats.get(name).copied().unwrap_or(0.0)
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

fn number_field(object: &Map<String, Value>, key: &str) -> Option<f64> {
    object.get(key).and_then(Value::as_f64)
}

fn record_list(object: &Map<String, Value>, key: &str) -> Vec<OperationRecord> {
    match object.get(key) {
        Some(Value::Array(items)) => items.iter().map(OperationRecord::from_json).collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            warn!("Expected '{}' to be a list, got {}", key, other);
            Vec::new()
        }
    }
}

fn number_map(object: &Map<String, Value>, key: &str) -> BTreeMap<String, f64> {
    object
        .get(key)
        .and_then(Value::as_object)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|(name, value)| value.as_f64().map(|n| (name.clone(), n)))
                .collect()
        })
        .unwrap_or_default()
}
