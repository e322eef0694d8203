use anyhow::Result;
use git_tree::{Node, Repository, Walker};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    // Use current directory and master if nothing is provided
    let path = env::args().nth(1).unwrap_or_else(|| ".".to_string());
    let treeish = env::args().nth(2).unwrap_or_else(|| "master".to_string());

    let repo = Repository::open(&path)?;
    println!("Opened repository at: {}", repo.path().display());

    // Top level, folders first
    let mut root = repo.tree(&treeish);
    root.parse()?;

    println!("\n{} ({} entries):", treeish, root.len());
    for entry in root.flat_listing() {
        match entry.target {
            Some(target) => println!(
                "  {:<8} {} -> {}",
                entry.kind.to_string(),
                entry.name,
                target
            ),
            None => println!("  {:<8} {}", entry.kind.to_string(), entry.name),
        }
    }

    if root.skipped_rows() > 0 {
        println!("  ({} rows could not be read)", root.skipped_rows());
    }

    // Everything below, two levels deep
    println!("\nRecursive listing:");
    Walker::new().max_depth(2).walk(&root, |node, depth| {
        let indent = "  ".repeat(depth + 1);
        match node {
            Node::Blob(blob) => println!("{}{} ({} bytes)", indent, blob.path, blob.size),
            Node::Tree(tree) => println!("{}{}/", indent, tree.path()),
            Node::Symlink(link) => println!("{}{} -> {}", indent, link.path, link.target),
        }
        Ok(())
    })?;

    Ok(())
}
