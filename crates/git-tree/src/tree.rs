use anyhow::{Context, Result};
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;

use crate::commands;
use crate::cursor::Cursor;
use crate::node::{Blob, Node, Symlink};
use crate::repository::Repository;
use crate::rows::{self, Row};

lazy_static! {
    // `<rev>:"<path>"/`, with the quotes and trailing slash optional
    static ref TREEISH_PATH: Regex = Regex::new(r#"^[^:]+:"?(.*?)"?/?$"#).unwrap();
}

/// One directory level of a repository.
///
/// A tree starts out empty and learns its children when [`Tree::parse`] runs a
/// single `ls-tree` query. Child trees come back unparsed; callers descend by
/// parsing them on demand.
#[derive(Debug, Clone)]
pub struct Tree<'r> {
    repository: &'r Repository,
    mode: String,
    hash: String,
    name: String,
    path: String,
    data: Vec<Node<'r>>,
    parsed: bool,
    skipped_rows: usize,
}

impl<'r> Tree<'r> {
    /// Create an unparsed tree for `treeish`, deriving its path from it.
    ///
    /// `master` and bare revisions map to the repository root, while
    /// `master:"src/lib"/` maps to `src/lib`.
    pub fn new(treeish: &str, repository: &'r Repository) -> Self {
        Self::with_path(treeish, treeish_path(treeish), repository)
    }

    /// Create an unparsed tree with an explicit path
    pub fn with_path<H, P>(hash: H, path: P, repository: &'r Repository) -> Self
    where
        H: Into<String>,
        P: Into<String>,
    {
        Self {
            repository,
            mode: String::new(),
            hash: hash.into(),
            name: String::new(),
            path: path.into(),
            data: Vec::new(),
            parsed: false,
            skipped_rows: 0,
        }
    }

    /// List this tree and replace its children with the result.
    ///
    /// On error the previous children are left untouched.
    pub fn parse(&mut self) -> Result<()> {
        let listing = self
            .repository
            .run(&commands::ls_tree(&self.hash))
            .with_context(|| format!("Failed to list tree {}", self.hash))?;

        let mut children = Vec::new();
        let mut skipped = 0;

        for fields in rows::tokenize(&listing) {
            match rows::classify(&fields, &self.path, self.repository)? {
                Row::Entry(node) => children.push(node),
                Row::Submodule => {}
                Row::Malformed => {
                    warn!("skipping unreadable row in tree {}: {:?}", self.hash, fields);
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            warn!("skipped {} rows while listing tree {}", skipped, self.hash);
        }
        debug!(
            "parsed tree {} ({:?}): {} children",
            self.hash,
            self.path,
            children.len()
        );

        self.data = children;
        self.skipped_rows = skipped;
        self.parsed = true;

        Ok(())
    }

    /// A fresh, unparsed copy of this tree
    pub fn placeholder(&self) -> Tree<'r> {
        Tree {
            repository: self.repository,
            mode: self.mode.clone(),
            hash: self.hash.clone(),
            name: self.name.clone(),
            path: self.path.clone(),
            data: Vec::new(),
            parsed: false,
            skipped_rows: 0,
        }
    }

    pub fn repository(&self) -> &'r Repository {
        self.repository
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn set_mode(&mut self, mode: &str) -> &mut Self {
        self.mode = mode.to_string();
        self
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) -> &mut Self {
        self.name = name.to_string();
        self
    }

    /// Path relative to the repository root; empty for the root itself
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether [`Tree::parse`] has completed at least once
    pub fn is_parsed(&self) -> bool {
        self.parsed
    }

    /// Rows the last parse could not interpret
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Children in listing order
    pub fn children(&self) -> &[Node<'r>] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Find a direct child by name
    pub fn get(&self, name: &str) -> Option<&Node<'r>> {
        self.data.iter().find(|node| node.name() == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node<'r>> {
        self.data.iter()
    }

    /// A positional cursor over the children
    pub fn cursor(&self) -> Cursor<'_, 'r> {
        Cursor::new(self)
    }

    pub fn blobs(&self) -> impl Iterator<Item = &Blob> + '_ {
        self.data.iter().filter_map(|node| match node {
            Node::Blob(blob) => Some(blob),
            _ => None,
        })
    }

    pub fn trees(&self) -> impl Iterator<Item = &Tree<'r>> + '_ {
        self.data.iter().filter_map(|node| match node {
            Node::Tree(tree) => Some(tree),
            _ => None,
        })
    }

    pub fn symlinks(&self) -> impl Iterator<Item = &Symlink> + '_ {
        self.data.iter().filter_map(|node| match node {
            Node::Symlink(link) => Some(link),
            _ => None,
        })
    }
}

impl<'a, 'r> IntoIterator for &'a Tree<'r> {
    type Item = &'a Node<'r>;
    type IntoIter = std::slice::Iter<'a, Node<'r>>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Repository path named by a tree-ish, or the root when it names none
pub fn treeish_path(treeish: &str) -> String {
    TREEISH_PATH
        .captures(treeish)
        .and_then(|captures| captures.get(1))
        .map(|path| path.as_str().trim_matches('/').to_string())
        .unwrap_or_default()
}
