//! In-memory document tree with folders, worksheets, and dashboards.
//!
//! Every tree starts with a root folder named `MyDocuments` (id
//! `folder_0`). Folders nest to any depth; worksheets and dashboards
//! are leaves. Nodes are addressed by typed ids (`folder_<n>` /
//! `doc_<n>`) minted from per-kind counters, and the whole structure
//! lives in one id-indexed table, so lookups and moves never rescan
//! the tree.
//!
//! ```
//! use docfs::{DocTree, FileKind};
//!
//! let mut tree = DocTree::new();
//! let reports = tree.add_file("reports", FileKind::Folder, tree.root())?;
//! tree.add_file("q3", FileKind::Worksheet, reports)?;
//!
//! assert_eq!(tree.total_worksheets(), 1);
//! assert_eq!(tree.list_names(reports)?, vec!["reports", "q3"]);
//! # Ok::<(), docfs::TreeError>(())
//! ```

pub mod tree;

pub use tree::{
    DocTree, FileId, FileKind, FileNode, LevelOrder, ParseFileIdError, TreeError, TreeStats,
    TreeWriter, ROOT_NAME,
};
