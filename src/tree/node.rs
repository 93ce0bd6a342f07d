//! Node Model
//!
//! Typed identifiers and node records for the document tree. An id
//! carries its kind in the type (`folder_<n>` vs `doc_<n>`), so a table
//! keyed by `FileId` can never hand back a document where the caller
//! indexed a folder number.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a string is not a well-formed file id
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid file id: {0:?} (expected folder_<n> or doc_<n>)")]
pub struct ParseFileIdError(String);

/// Typed identifier of a node in the tree
///
/// Folders and documents are numbered by independent counters, so the
/// id names both the namespace and the slot: `folder_<n>` or `doc_<n>`.
/// Worksheets and dashboards share the `doc` namespace; the node's
/// `FileKind` tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileId {
    Folder(u64),
    Doc(u64),
}

impl FileId {
    /// Reserved id of the root folder
    pub const ROOT: FileId = FileId::Folder(0);

    /// Whether this id names a folder
    pub fn is_folder(&self) -> bool {
        matches!(self, FileId::Folder(_))
    }

    /// Whether this id names a document (worksheet or dashboard)
    pub fn is_document(&self) -> bool {
        matches!(self, FileId::Doc(_))
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileId::Folder(n) => write!(f, "folder_{}", n),
            FileId::Doc(n) => write!(f, "doc_{}", n),
        }
    }
}

/// Canonical decimal only: no sign, no leading zeros, so every id has
/// exactly one accepted spelling
fn parse_index(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    digits.parse().ok()
}

impl FromStr for FileId {
    type Err = ParseFileIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = if let Some(n) = s.strip_prefix("folder_") {
            parse_index(n).map(FileId::Folder)
        } else if let Some(n) = s.strip_prefix("doc_") {
            parse_index(n).map(FileId::Doc)
        } else {
            None
        };
        parsed.ok_or_else(|| ParseFileIdError(s.to_string()))
    }
}

// Ids cross serialization boundaries in their display form, so maps
// keyed by FileId stay readable ("folder_0", not a struct).
impl Serialize for FileId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FileId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IdVisitor;

        impl de::Visitor<'_> for IdVisitor {
            type Value = FileId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a file id of the form folder_<n> or doc_<n>")
            }

            fn visit_str<E>(self, v: &str) -> Result<FileId, E>
            where
                E: de::Error,
            {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(IdVisitor)
    }
}

/// What a node is: a folder or one of the two document types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Folder,
    Worksheet,
    Dashboard,
}

impl FileKind {
    /// Whether this is the folder kind
    pub fn is_folder(&self) -> bool {
        matches!(self, FileKind::Folder)
    }

    /// Whether this is a document kind (worksheet or dashboard)
    pub fn is_document(&self) -> bool {
        !self.is_folder()
    }

    /// Lowercase name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Folder => "folder",
            FileKind::Worksheet => "worksheet",
            FileKind::Dashboard => "dashboard",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single node in the document tree
///
/// Either a folder that may own children, or a document that is always
/// a leaf. Kind and id are fixed at creation; only `parent` (and the
/// owning folders' child lists) change, and only through a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    /// Unique id, fixed at creation
    pub id: FileId,
    /// Human-readable name, unique among this node's siblings
    pub name: String,
    /// Folder, worksheet, or dashboard
    pub kind: FileKind,
    /// Containing folder; `None` only for the root
    pub parent: Option<FileId>,
    /// Child ids in insertion order; always empty for documents
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FileId>,
}

impl FileNode {
    /// Create a node with no children
    pub fn new(
        id: FileId,
        name: impl Into<String>,
        kind: FileKind,
        parent: Option<FileId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            parent,
            children: Vec::new(),
        }
    }

    /// Whether this node is a folder
    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    /// Whether this node is a document (worksheet or dashboard)
    pub fn is_document(&self) -> bool {
        self.kind.is_document()
    }

    /// Append a child id
    pub fn add_child(&mut self, child: FileId) {
        self.children.push(child);
    }

    /// Remove a child id if present
    pub fn remove_child(&mut self, child: FileId) {
        self.children.retain(|c| *c != child);
    }
}
