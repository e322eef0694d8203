//! Display-ready views of one parsed tree level.

use anyhow::{Context, Result};
use derive_more::Display;
use lazy_static::lazy_static;
use regex::Regex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::commands;
use crate::node::{join_path, Node};
use crate::tree::Tree;

lazy_static! {
    static ref YEARS_AGO: Regex = Regex::new(r"(\d year.*),.*").unwrap();
}

/// How an entry is presented in a flat listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EntryKind {
    #[display(fmt = "folder")]
    Folder,
    #[display(fmt = "symlink")]
    Symlink,
    #[display(fmt = "blob")]
    Blob,
}

impl EntryKind {
    /// Folders and symlinks are listed ahead of files
    pub fn is_folder_like(&self) -> bool {
        !matches!(self, EntryKind::Blob)
    }
}

/// One row of a flat listing
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlatEntry {
    pub kind: EntryKind,
    pub name: String,
    /// Byte size for files, `None` for folders and symlinks
    pub size: Option<u64>,
    pub mode: String,
    /// Object id; empty for symlinks
    pub hash: String,
    /// Link target, only set for symlinks
    pub target: Option<String>,
}

/// Last-change information for one entry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetailEntry {
    pub hash: String,
    /// Relative date such as `3 days ago`
    pub age: String,
    /// Subject line of the last commit
    pub comment: String,
}

impl<'r> Tree<'r> {
    /// Immediate children with folders and symlinks ahead of files,
    /// each group in listing order
    pub fn flat_listing(&self) -> Vec<FlatEntry> {
        let (folders, files): (Vec<FlatEntry>, Vec<FlatEntry>) = self
            .iter()
            .map(flat_entry)
            .partition(|entry| entry.kind.is_folder_like());

        folders.into_iter().chain(files).collect()
    }

    /// Last-change age and subject for every immediate child except symlinks.
    ///
    /// Costs two repository queries per entry.
    pub fn detail_listing(&self) -> Result<Vec<DetailEntry>> {
        let mut details = Vec::new();

        for node in self.iter() {
            if node.is_symlink() {
                continue;
            }

            let path = join_path(self.path(), node.name());
            let age = self
                .repository()
                .run(&commands::last_change_age(&path))
                .with_context(|| format!("Failed to read last change date of {}", path))?;
            let comment = self
                .repository()
                .run(&commands::last_change_subject(&path))
                .with_context(|| format!("Failed to read last change subject of {}", path))?;

            details.push(DetailEntry {
                hash: node.hash().to_string(),
                age: normalize_age(&age),
                comment: comment.trim().to_string(),
            });
        }

        Ok(details)
    }
}

fn flat_entry(node: &Node<'_>) -> FlatEntry {
    match node {
        Node::Blob(blob) => FlatEntry {
            kind: EntryKind::Blob,
            name: blob.name.clone(),
            size: Some(blob.size),
            mode: blob.mode.clone(),
            hash: blob.hash.clone(),
            target: None,
        },
        Node::Tree(tree) => FlatEntry {
            kind: EntryKind::Folder,
            name: tree.name().to_string(),
            size: None,
            mode: tree.mode().to_string(),
            hash: tree.hash().to_string(),
            target: None,
        },
        Node::Symlink(link) => FlatEntry {
            kind: EntryKind::Symlink,
            name: link.name.clone(),
            size: None,
            mode: link.mode.clone(),
            hash: String::new(),
            target: Some(link.target.clone()),
        },
    }
}

/// Trim a relative date and drop the month part of multi-year ages:
/// `2 years, 3 months ago` becomes `2 years ago`
pub fn normalize_age(age: &str) -> String {
    YEARS_AGO.replace(age.trim(), "$1 ago").into_owned()
}
