//! Splitting `ls-tree -l` output into rows and turning rows into nodes.

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;
use std::borrow::Cow;

use crate::commands;
use crate::node::{join_path, Blob, Node, ObjectKind, Symlink, SYMLINK_MODE};
use crate::repository::Repository;
use crate::tree::Tree;

/// Number of columns in a long-format listing row: mode, type, hash, size, name
pub const ROW_FIELDS: usize = 5;

lazy_static! {
    static ref FIELD_SEPARATOR: Regex = Regex::new(r"\s+").unwrap();
}

/// Split listing text into rows of at most [`ROW_FIELDS`] fields.
///
/// The last field takes the rest of the line, so names containing
/// whitespace survive intact. Blank lines produce no row.
pub fn tokenize(listing: &str) -> Vec<Vec<&str>> {
    listing
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| FIELD_SEPARATOR.splitn(line, ROW_FIELDS).collect())
        .collect()
}

/// Outcome of classifying a single row
#[derive(Debug)]
pub enum Row<'r> {
    /// The row describes a blob, tree or symlink
    Entry(Node<'r>),
    /// The row is a submodule reference and yields no node
    Submodule,
    /// The row could not be interpreted
    Malformed,
}

/// Classify one tokenized row into a node of the tree at `parent_path`.
///
/// Symlink rows cost one extra `show` round trip to read the link target.
pub fn classify<'r>(
    fields: &[&str],
    parent_path: &str,
    repository: &'r Repository,
) -> Result<Row<'r>> {
    let [mode, kind, hash, size, name] = match fields {
        [mode, kind, hash, size, name] => [*mode, *kind, *hash, *size, *name],
        _ => return Ok(Row::Malformed),
    };
    let kind = ObjectKind::from_column(kind);
    let name = unquote_name(name);
    let path = join_path(parent_path, &name);

    if kind == ObjectKind::Commit {
        trace!("skipping {} entry {}", kind, path);
        return Ok(Row::Submodule);
    }

    if mode == SYMLINK_MODE {
        let target = repository
            .run(&commands::show(hash))
            .with_context(|| format!("Failed to read symlink target of {}", path))?;
        trace!("symlink {} -> {}", path, target.trim_end());

        return Ok(Row::Entry(Node::Symlink(Symlink {
            mode: mode.to_string(),
            name: name.to_string(),
            path,
            target: target.trim_end_matches('\n').to_string(),
        })));
    }

    if kind == ObjectKind::Blob {
        let size = match size.parse::<u64>() {
            Ok(size) => size,
            Err(_) => return Ok(Row::Malformed),
        };
        trace!("blob {} ({} bytes)", path, size);

        return Ok(Row::Entry(Node::Blob(Blob {
            mode: mode.to_string(),
            hash: hash.to_string(),
            name: name.to_string(),
            path,
            size,
        })));
    }

    trace!("tree {} (listed as {})", path, kind);
    let mut tree = Tree::with_path(hash, path, repository);
    tree.set_mode(mode).set_name(&name);

    Ok(Row::Entry(Node::Tree(tree)))
}

/// Undo git's C-style quoting of a name, e.g. `"caf\303\251.txt"` becomes `café.txt`.
///
/// Names that are not wrapped in double quotes come back unchanged.
pub fn unquote_name(field: &str) -> Cow<'_, str> {
    let inner = match field.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
        Some(inner) => inner,
        None => return Cow::Borrowed(field),
    };

    let mut bytes = Vec::with_capacity(inner.len());
    let mut iter = inner.bytes().peekable();

    while let Some(byte) = iter.next() {
        if byte != b'\\' {
            bytes.push(byte);
            continue;
        }

        match iter.next() {
            Some(b'n') => bytes.push(b'\n'),
            Some(b't') => bytes.push(b'\t'),
            Some(b'r') => bytes.push(b'\r'),
            Some(b'a') => bytes.push(0x07),
            Some(b'b') => bytes.push(0x08),
            Some(b'f') => bytes.push(0x0c),
            Some(b'v') => bytes.push(0x0b),
            Some(digit @ b'0'..=b'7') => {
                let mut value = u32::from(digit - b'0');
                for _ in 0..2 {
                    match iter.peek() {
                        Some(&next @ b'0'..=b'7') => {
                            value = value * 8 + u32::from(next - b'0');
                            iter.next();
                        }
                        _ => break,
                    }
                }
                bytes.push(value as u8);
            }
            // covers \" and \\
            Some(other) => bytes.push(other),
            None => bytes.push(b'\\'),
        }
    }

    Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
}
