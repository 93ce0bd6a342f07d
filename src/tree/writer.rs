//! Tree Listing Writer
//!
//! Renders a tree as plain text, one node per line, indented by depth.
//! The default shape is the classic document listing: a tab per level
//! and a `" - "` bullet before each name.

use super::node::FileId;
use super::store::DocTree;

/// Text writer for hierarchical tree listings
pub struct TreeWriter {
    /// Indentation unit repeated once per depth level
    pub indent: String,
    /// Marker between the indentation and the name
    pub bullet: String,
}

impl Default for TreeWriter {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
            bullet: " - ".to_string(),
        }
    }
}

impl TreeWriter {
    /// Create a writer with the default indent and bullet
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the whole tree starting at the root
    ///
    /// Output format:
    /// ```text
    ///  - MyDocuments
    /// 	 - draft
    /// 		 - foo
    /// 	 - complete
    /// 		 - bar
    /// ```
    pub fn to_text(&self, tree: &DocTree) -> String {
        self.to_text_from(tree, tree.root())
    }

    /// Render the subtree rooted at `id` (empty for unknown ids)
    pub fn to_text_from(&self, tree: &DocTree, id: FileId) -> String {
        let mut output = String::new();
        self.write_node(tree, id, 0, &mut output);
        output
    }

    /// Write a single node and, depth-first, its children
    fn write_node(&self, tree: &DocTree, id: FileId, depth: usize, output: &mut String) {
        let node = match tree.get(id) {
            Some(node) => node,
            None => return,
        };

        output.push_str(&self.indent.repeat(depth));
        output.push_str(&self.bullet);
        output.push_str(&node.name);
        output.push('\n');

        if node.is_folder() {
            for child in tree.children(id) {
                self.write_node(tree, *child, depth + 1, output);
            }
        }
    }
}

/// Convenience function to render a tree with the default writer
pub fn to_text(tree: &DocTree) -> String {
    TreeWriter::new().to_text(tree)
}
