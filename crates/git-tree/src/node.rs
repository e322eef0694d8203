use derive_more::Display;

use crate::tree::Tree;

/// Mode reported by `ls-tree` for symbolic links
pub const SYMLINK_MODE: &str = "120000";

/// The object type column of a long-format tree listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ObjectKind {
    /// A file-like object
    #[display(fmt = "blob")]
    Blob,
    /// A directory-like object
    #[display(fmt = "tree")]
    Tree,
    /// A submodule reference into another repository
    #[display(fmt = "commit")]
    Commit,
    /// Anything the listing reports that we do not know by name
    #[display(fmt = "other")]
    Other,
}

impl ObjectKind {
    /// Convert from the raw type column
    pub fn from_column(column: &str) -> Self {
        match column {
            "blob" => ObjectKind::Blob,
            "tree" => ObjectKind::Tree,
            "commit" => ObjectKind::Commit,
            _ => ObjectKind::Other,
        }
    }
}

/// A file entry of a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    /// Raw mode bits, e.g. `100644`
    pub mode: String,
    /// Object id of the file contents
    pub hash: String,
    /// Basename within the parent tree
    pub name: String,
    /// Path relative to the repository root
    pub path: String,
    /// Size of the file contents in bytes
    pub size: u64,
}

/// A symbolic link entry of a tree
///
/// The link target is kept apart from `path`: it is the literal text stored
/// in the link and does not have to name anything inside the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symlink {
    /// Raw mode bits, always `120000` when built from a listing
    pub mode: String,
    /// Basename within the parent tree
    pub name: String,
    /// Path of the link itself, relative to the repository root
    pub path: String,
    /// Text the link points at
    pub target: String,
}

/// One entry of a tree listing
#[derive(Debug, Clone)]
pub enum Node<'r> {
    Blob(Blob),
    Tree(Tree<'r>),
    Symlink(Symlink),
}

impl<'r> Node<'r> {
    pub fn mode(&self) -> &str {
        match self {
            Node::Blob(blob) => &blob.mode,
            Node::Tree(tree) => tree.mode(),
            Node::Symlink(link) => &link.mode,
        }
    }

    /// Object id of the entry; empty for symlinks
    pub fn hash(&self) -> &str {
        match self {
            Node::Blob(blob) => &blob.hash,
            Node::Tree(tree) => tree.hash(),
            Node::Symlink(_) => "",
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Blob(blob) => &blob.name,
            Node::Tree(tree) => tree.name(),
            Node::Symlink(link) => &link.name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Node::Blob(blob) => &blob.path,
            Node::Tree(tree) => tree.path(),
            Node::Symlink(link) => &link.path,
        }
    }

    pub fn is_blob(&self) -> bool {
        matches!(self, Node::Blob(_))
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, Node::Tree(_))
    }

    pub fn is_symlink(&self) -> bool {
        matches!(self, Node::Symlink(_))
    }

    pub fn as_tree(&self) -> Option<&Tree<'r>> {
        match self {
            Node::Tree(tree) => Some(tree),
            _ => None,
        }
    }
}

/// Join a parent path and an entry name the way paths are reported
/// relative to the repository root.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}
