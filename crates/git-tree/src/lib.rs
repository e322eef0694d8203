// Git tree listings for repository browsing
// This crate turns `git ls-tree -l` output into a lazily expanded tree of blobs, trees and symlinks

mod client;
pub mod commands;
mod cursor;
mod node;
mod projection;
mod repository;
pub mod rows;
mod tree;
mod walk;

pub use client::{GitCli, RepositoryClient, GIT_BINARY_ENV};
pub use cursor::Cursor;
pub use node::{join_path, Blob, Node, ObjectKind, Symlink, SYMLINK_MODE};
pub use projection::{normalize_age, DetailEntry, EntryKind, FlatEntry};
pub use repository::Repository;
pub use tree::{treeish_path, Tree};
pub use walk::Walker;
