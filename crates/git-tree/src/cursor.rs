use crate::node::Node;
use crate::tree::Tree;

/// A restartable position over the children of one parsed tree.
///
/// Cursors borrow the tree, so any number of them can walk the same tree
/// independently.
#[derive(Debug, Clone)]
pub struct Cursor<'a, 'r> {
    tree: &'a Tree<'r>,
    position: usize,
}

impl<'a, 'r> Cursor<'a, 'r> {
    pub fn new(tree: &'a Tree<'r>) -> Self {
        Self { tree, position: 0 }
    }

    /// Whether the cursor points at a child
    pub fn valid(&self) -> bool {
        self.position < self.tree.len()
    }

    pub fn current(&self) -> Option<&'a Node<'r>> {
        self.tree.children().get(self.position)
    }

    /// Whether the current child is a tree that can be descended into
    pub fn has_children(&self) -> bool {
        matches!(self.current(), Some(Node::Tree(_)))
    }

    /// An unparsed copy of the current child tree.
    ///
    /// The caller parses it before iterating; nothing here queries the repository.
    pub fn children(&self) -> Option<Tree<'r>> {
        match self.current() {
            Some(Node::Tree(tree)) => Some(tree.placeholder()),
            _ => None,
        }
    }

    /// Move to the next child
    pub fn advance(&mut self) {
        self.position += 1;
    }

    /// Move back to the first child
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    pub fn key(&self) -> usize {
        self.position
    }
}
