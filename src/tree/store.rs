//! Document Tree Store
//!
//! `DocTree` is the in-memory tree of folders, worksheets, and
//! dashboards rooted at a fixed `MyDocuments` folder. All nodes live in
//! one id-indexed table; parent and child links are stored as ids, so a
//! lookup never rescans the tree and a move only relinks the node.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use super::node::{FileId, FileKind, FileNode};
use super::walk::LevelOrder;

/// Name of the root folder every tree starts with
pub const ROOT_NAME: &str = "MyDocuments";

/// Errors that can occur during tree operations
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "details")]
pub enum TreeError {
    /// The id does not resolve to an existing node, or not to a folder
    /// where a folder is required
    #[error("File not found: {0}")]
    FileNotFound(FileId),

    /// The folder already has an immediate child with this name
    #[error("File already exists: {name:?} in {folder}")]
    DuplicateFile { folder: FileId, name: String },

    /// The move would place a folder inside its own subtree
    #[error("Cycle detected: cannot move {file} into {dest}")]
    CycleDetected { file: FileId, dest: FileId },
}

/// In-memory document tree
///
/// Maintains the id-indexed node table plus the per-kind counters that
/// mint new ids. All mutation goes through `add_file` and `move_file`,
/// which uphold the sibling-name and tree-shape invariants; a failed
/// operation leaves the tree untouched. Deserialization re-checks the
/// same invariants over the incoming nodes and rejects anything that
/// does not form a valid tree.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocTree {
    /// All nodes indexed by their id
    nodes: HashMap<FileId, FileNode>,

    /// Highest folder number minted so far (the root holds 0)
    last_folder_id: u64,

    /// Highest document number minted so far
    last_doc_id: u64,
}

impl DocTree {
    /// Create a tree holding only the root folder
    pub fn new() -> Self {
        let mut nodes = HashMap::new();

        // Root folder is always folder_0
        nodes.insert(
            FileId::ROOT,
            FileNode::new(FileId::ROOT, ROOT_NAME, FileKind::Folder, None),
        );

        Self {
            nodes,
            last_folder_id: 0,
            last_doc_id: 0,
        }
    }

    /// Id of the root folder
    pub fn root(&self) -> FileId {
        FileId::ROOT
    }

    /// Total number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get a node by id, folder or document alike
    pub fn get(&self, id: FileId) -> Option<&FileNode> {
        self.nodes.get(&id)
    }

    /// Check whether a node with this id exists
    pub fn exists(&self, id: FileId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Id of the folder containing `id`
    ///
    /// `None` for the root (it has no parent) and for unknown ids.
    pub fn parent_of(&self, id: FileId) -> Option<FileId> {
        self.nodes.get(&id).and_then(|node| node.parent)
    }

    /// Child ids of a node, in insertion order
    ///
    /// Empty for documents and for unknown ids.
    pub fn children(&self, id: FileId) -> &[FileId] {
        self.nodes
            .get(&id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// All nodes as an iterator, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&FileId, &FileNode)> {
        self.nodes.iter()
    }

    /// Resolve an id that must name an existing folder
    fn folder(&self, id: FileId) -> Result<&FileNode, TreeError> {
        self.nodes
            .get(&id)
            .filter(|node| node.is_folder())
            .ok_or(TreeError::FileNotFound(id))
    }

    /// Mint the next id of the given kind
    fn alloc_id(&mut self, kind: FileKind) -> FileId {
        if kind.is_folder() {
            self.last_folder_id += 1;
            FileId::Folder(self.last_folder_id)
        } else {
            self.last_doc_id += 1;
            FileId::Doc(self.last_doc_id)
        }
    }

    /// Whether `ancestor` lies strictly above `id` on its parent chain
    fn is_ancestor(&self, ancestor: FileId, id: FileId) -> bool {
        let mut current = self.parent_of(id);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent_of(parent);
        }
        false
    }

    /// Add a new file or folder under an existing folder
    ///
    /// Validates that:
    /// - `folder_id` resolves to an existing folder (`FileNotFound`)
    /// - no immediate child of that folder already carries this name
    ///   (`DuplicateFile`)
    ///
    /// Allocates the next id of the requested kind (`folder_<n>` or
    /// `doc_<n>`), links the node under its parent, and returns the id.
    /// A failed add allocates nothing.
    pub fn add_file(
        &mut self,
        name: &str,
        kind: FileKind,
        folder_id: FileId,
    ) -> Result<FileId, TreeError> {
        let folder = self.folder(folder_id)?;

        // Sibling names stay unique within a folder
        if folder
            .children
            .iter()
            .filter_map(|child| self.nodes.get(child))
            .any(|child| child.name == name)
        {
            return Err(TreeError::DuplicateFile {
                folder: folder_id,
                name: name.to_string(),
            });
        }

        let id = self.alloc_id(kind);
        self.nodes
            .insert(id, FileNode::new(id, name, kind, Some(folder_id)));
        if let Some(parent) = self.nodes.get_mut(&folder_id) {
            parent.add_child(id);
        }

        tracing::debug!(id = %id, name = %name, kind = %kind, folder = %folder_id, "added file");
        Ok(id)
    }

    /// Look up a file by name within a folder
    ///
    /// A folder resolves its own name to its own id, and that takes
    /// precedence over any same-named child. Otherwise only the
    /// folder's immediate children are scanned, not the deeper tree,
    /// and a name that is not there is `Ok(None)` rather than an
    /// error. Fails with `FileNotFound` only when `folder_id` itself
    /// does not resolve to an existing folder.
    pub fn file_id(&self, name: &str, folder_id: FileId) -> Result<Option<FileId>, TreeError> {
        let folder = self.folder(folder_id)?;

        if folder.name == name {
            return Ok(Some(folder.id));
        }

        Ok(folder
            .children
            .iter()
            .filter_map(|child| self.nodes.get(child))
            .find(|child| child.name == name)
            .map(|child| child.id))
    }

    /// Move a file or folder into another folder
    ///
    /// Validates, in order:
    /// - the destination resolves to an existing folder (`FileNotFound`)
    /// - the moved node exists and is not the root (`FileNotFound`)
    /// - its current parent resolves to a folder (`FileNotFound`)
    /// - the destination is neither the node nor inside its subtree
    ///   (`CycleDetected`)
    /// - no other child of the destination carries the node's name
    ///   (`DuplicateFile`)
    ///
    /// The moved node itself is excluded from the collision check, so
    /// a move into the current folder succeeds as a no-op. On success
    /// the node keeps its id, name, and kind; only its parent link and
    /// the two child lists change. A failed move leaves the tree
    /// untouched.
    pub fn move_file(&mut self, file_id: FileId, dest_id: FileId) -> Result<(), TreeError> {
        // Destination first, then the node, then its current parent
        self.folder(dest_id)?;
        let node = self.get(file_id).ok_or(TreeError::FileNotFound(file_id))?;
        // The root has no parent folder to detach from
        let parent_id = node.parent.ok_or(TreeError::FileNotFound(file_id))?;
        let name = node.name.clone();
        self.folder(parent_id)?;

        // A folder must never end up inside its own subtree
        if file_id == dest_id || self.is_ancestor(file_id, dest_id) {
            return Err(TreeError::CycleDetected {
                file: file_id,
                dest: dest_id,
            });
        }

        // Collision check before anything is detached
        if self
            .children(dest_id)
            .iter()
            .filter(|child| **child != file_id)
            .filter_map(|child| self.nodes.get(child))
            .any(|child| child.name == name)
        {
            return Err(TreeError::DuplicateFile {
                folder: dest_id,
                name,
            });
        }

        // Relink: out of the old parent, into the destination
        if let Some(parent) = self.nodes.get_mut(&parent_id) {
            parent.remove_child(file_id);
        }
        if let Some(dest) = self.nodes.get_mut(&dest_id) {
            dest.add_child(file_id);
        }
        if let Some(node) = self.nodes.get_mut(&file_id) {
            node.parent = Some(dest_id);
        }

        tracing::debug!(file = %file_id, from = %parent_id, to = %dest_id, "moved file");
        Ok(())
    }

    /// Number of nodes of the given kind anywhere in the tree
    pub fn total_count(&self, kind: FileKind) -> usize {
        self.nodes.values().filter(|node| node.kind == kind).count()
    }

    /// Number of worksheets anywhere in the tree
    pub fn total_worksheets(&self) -> usize {
        self.total_count(FileKind::Worksheet)
    }

    /// Number of dashboards anywhere in the tree
    pub fn total_dashboards(&self) -> usize {
        self.total_count(FileKind::Dashboard)
    }

    /// Level-order traversal of the subtree rooted at `id`
    ///
    /// Yields `id` itself first, then its children, then theirs, one
    /// level at a time. Yields nothing for unknown ids.
    pub fn walk_from(&self, id: FileId) -> LevelOrder<'_> {
        LevelOrder::new(self, id)
    }

    /// Names of a folder and everything under it, in level order
    ///
    /// The folder's own name comes first, then the names of its
    /// children, then their children's, level by level to any depth.
    /// Fails with `FileNotFound` if `folder_id` does not resolve to an
    /// existing folder.
    pub fn list_names(&self, folder_id: FileId) -> Result<Vec<String>, TreeError> {
        self.folder(folder_id)?;

        Ok(self
            .walk_from(folder_id)
            .filter_map(|id| self.nodes.get(&id))
            .map(|node| node.name.clone())
            .collect())
    }

    /// Get statistics about the tree
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            total_nodes: self.node_count(),
            total_folders: self.total_count(FileKind::Folder),
            total_worksheets: self.total_worksheets(),
            total_dashboards: self.total_dashboards(),
        }
    }

    /// Re-check the structural invariants over an arbitrary node table
    ///
    /// Runs when a tree arrives from outside `new` and `add_file`,
    /// where nothing guarantees the links. Validates that:
    /// - the root exists, is a folder, and has no parent
    /// - every node is keyed by its own id, with matching id and kind
    /// - documents carry no children
    /// - parent and child links agree in both directions
    /// - sibling names are unique within each folder
    /// - every node hangs off the root
    /// - the id counters cover every minted id
    fn validate(&self) -> Result<(), String> {
        let root = self
            .nodes
            .get(&FileId::ROOT)
            .ok_or_else(|| format!("missing root folder {}", FileId::ROOT))?;
        if !root.is_folder() {
            return Err(format!("root {} is not a folder", FileId::ROOT));
        }
        if root.parent.is_some() {
            return Err(format!("root {} has a parent", FileId::ROOT));
        }

        let mut child_links = 0;
        for (id, node) in &self.nodes {
            if node.id != *id {
                return Err(format!("node keyed {id} carries id {}", node.id));
            }
            if id.is_folder() != node.is_folder() {
                return Err(format!("id {id} does not match kind {}", node.kind));
            }
            if node.is_document() && !node.children.is_empty() {
                return Err(format!("document {id} has children"));
            }

            let mut names = HashSet::with_capacity(node.children.len());
            for child_id in &node.children {
                let child = self
                    .nodes
                    .get(child_id)
                    .ok_or_else(|| format!("{id} lists missing child {child_id}"))?;
                if child.parent != Some(*id) {
                    return Err(format!("{child_id} is listed under {id} but points elsewhere"));
                }
                if !names.insert(child.name.as_str()) {
                    return Err(format!("{id} has two children named {:?}", child.name));
                }
            }
            child_links += node.children.len();

            if *id != FileId::ROOT {
                let parent_id = node.parent.ok_or_else(|| format!("{id} has no parent"))?;
                let listed = self
                    .nodes
                    .get(&parent_id)
                    .map_or(false, |parent| parent.children.contains(id));
                if !listed {
                    return Err(format!("{id} points at {parent_id}, which does not list it"));
                }
            }
        }

        // Every non-root node must appear in exactly one child list,
        // and every node must sit under the root
        if child_links != self.nodes.len() - 1 {
            return Err(format!(
                "{child_links} child links for {} nodes",
                self.nodes.len()
            ));
        }
        if self.walk_from(FileId::ROOT).count() != self.nodes.len() {
            return Err("nodes unreachable from the root".to_string());
        }

        for id in self.nodes.keys() {
            let minted = match *id {
                FileId::Folder(n) => n <= self.last_folder_id,
                FileId::Doc(n) => n <= self.last_doc_id,
            };
            if !minted {
                return Err(format!("{id} exceeds its id counter"));
            }
        }

        Ok(())
    }
}

impl Default for DocTree {
    fn default() -> Self {
        Self::new()
    }
}

// Stored bytes are untrusted; the raw fields are validated as a whole
// before they become a `DocTree`.
impl<'de> Deserialize<'de> for DocTree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct RawTree {
            nodes: HashMap<FileId, FileNode>,
            last_folder_id: u64,
            last_doc_id: u64,
        }

        let raw = RawTree::deserialize(deserializer)?;
        let tree = DocTree {
            nodes: raw.nodes,
            last_folder_id: raw.last_folder_id,
            last_doc_id: raw.last_doc_id,
        };
        tree.validate().map_err(de::Error::custom)?;
        Ok(tree)
    }
}

/// Snapshot of tree-wide totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeStats {
    pub total_nodes: usize,
    pub total_folders: usize,
    pub total_worksheets: usize,
    pub total_dashboards: usize,
}
