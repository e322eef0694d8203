use anyhow::Result;
use log::debug;

use crate::node::Node;
use crate::repository::Repository;
use crate::tree::Tree;

/// Depth-first, pre-order traversal that parses subtrees only when it
/// descends into them.
///
/// Each subtree is dropped once its walk finishes, so memory follows the
/// depth of the current path rather than the size of the repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct Walker {
    max_depth: Option<usize>,
}

impl Walker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop descending below `depth`; children of the root are at depth 0
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Walk a parsed tree, calling `visit` with every node and its depth
    pub fn walk<'r, F>(&self, root: &Tree<'r>, mut visit: F) -> Result<()>
    where
        F: FnMut(&Node<'r>, usize) -> Result<()>,
    {
        self.walk_level(root, 0, &mut visit)
    }

    /// Parse `treeish` and walk it
    pub fn walk_treeish<F>(&self, repository: &Repository, treeish: &str, visit: F) -> Result<()>
    where
        F: FnMut(&Node<'_>, usize) -> Result<()>,
    {
        let mut root = repository.tree(treeish);
        root.parse()?;
        self.walk(&root, visit)
    }

    fn walk_level<'r, F>(&self, tree: &Tree<'r>, depth: usize, visit: &mut F) -> Result<()>
    where
        F: FnMut(&Node<'r>, usize) -> Result<()>,
    {
        let mut cursor = tree.cursor();

        while cursor.valid() {
            if let Some(node) = cursor.current() {
                visit(node, depth)?;
            }

            if cursor.has_children() && self.descends_below(depth) {
                if let Some(mut child) = cursor.children() {
                    debug!("descending into {}", child.path());
                    child.parse()?;
                    self.walk_level(&child, depth + 1, visit)?;
                }
            }

            cursor.advance();
        }

        Ok(())
    }

    fn descends_below(&self, depth: usize) -> bool {
        self.max_depth.map_or(true, |max| depth < max)
    }
}
