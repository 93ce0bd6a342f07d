//! Level-Order Traversal
//!
//! Breadth-first iteration over a subtree's ids. The deep listing in
//! `DocTree::list_names` is this walk plus a name lookup per id.

use std::collections::VecDeque;

use super::node::FileId;
use super::store::DocTree;

/// Breadth-first iterator over the ids of a subtree
///
/// Yields the start node first, then works outward one level at a
/// time. Documents have no children, so the walk descends through
/// folders only. An unknown start id yields nothing.
pub struct LevelOrder<'a> {
    tree: &'a DocTree,
    queue: VecDeque<FileId>,
}

impl<'a> LevelOrder<'a> {
    pub(crate) fn new(tree: &'a DocTree, start: FileId) -> Self {
        let mut queue = VecDeque::new();
        if tree.exists(start) {
            queue.push_back(start);
        }
        Self { tree, queue }
    }
}

impl Iterator for LevelOrder<'_> {
    type Item = FileId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.queue.pop_front()?;
        self.queue.extend(self.tree.children(current));
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::super::node::FileKind;
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_test_tree() -> (DocTree, FileId, FileId) {
        let mut tree = DocTree::new();
        let a = tree.add_file("a", FileKind::Folder, tree.root()).unwrap();
        let b = tree.add_file("b", FileKind::Folder, tree.root()).unwrap();
        tree.add_file("a1", FileKind::Worksheet, a).unwrap();
        tree.add_file("a2", FileKind::Dashboard, a).unwrap();
        tree.add_file("b1", FileKind::Worksheet, b).unwrap();
        (tree, a, b)
    }

    #[test]
    fn test_walk_visits_levels_in_order() {
        let (tree, a, b) = create_test_tree();

        let ids: Vec<FileId> = tree.walk_from(tree.root()).collect();
        assert_eq!(
            ids,
            vec![
                tree.root(),
                a,
                b,
                FileId::Doc(1),
                FileId::Doc(2),
                FileId::Doc(3),
            ]
        );
    }

    #[test]
    fn test_walk_from_subfolder() {
        let (tree, a, _) = create_test_tree();

        let ids: Vec<FileId> = tree.walk_from(a).collect();
        assert_eq!(ids, vec![a, FileId::Doc(1), FileId::Doc(2)]);
    }

    #[test]
    fn test_walk_from_document_yields_only_it() {
        let (tree, _, _) = create_test_tree();

        let ids: Vec<FileId> = tree.walk_from(FileId::Doc(1)).collect();
        assert_eq!(ids, vec![FileId::Doc(1)]);
    }

    #[test]
    fn test_walk_from_unknown_id_is_empty() {
        let (tree, _, _) = create_test_tree();
        assert_eq!(tree.walk_from(FileId::Folder(42)).count(), 0);
    }
}
