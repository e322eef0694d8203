mod common;

use common::FakeClient;
use git_tree::{DetailEntry, EntryKind, FlatEntry};
use pretty_assertions::assert_eq;

const MIXED_LISTING: &str = "100644 blob a1 12\tREADME.md\n\
040000 tree b1 -\tsrc\n\
120000 blob c1 9\tlatest\n\
100755 blob d1 340\tbuild.sh\n\
040000 tree e1 -\tdocs\n";

fn mixed_client(treeish: &str) -> FakeClient {
    let client = FakeClient::new();
    client
        .respond(format!("ls-tree -l {}", treeish), MIXED_LISTING)
        .respond("show c1", "README.md");
    client
}

fn render(entries: &[FlatEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            let size = entry.size.map_or("-".to_string(), |size| size.to_string());
            match &entry.target {
                Some(target) => format!("{} {} {} -> {}", entry.kind, entry.name, size, target),
                None => format!("{} {} {} {}", entry.kind, entry.name, size, entry.hash),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_flat_listing_puts_folders_first() {
    let client = FakeClient::new();
    client.respond(
        "ls-tree -l master",
        "100644 blob a1 1\ta\n040000 tree b1 -\tb\n100644 blob c1 2\tc\n",
    );
    let repo = client.repository();
    let mut tree = repo.tree("master");
    tree.parse().unwrap();

    let names: Vec<String> = tree.flat_listing().into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["b", "a", "c"]);
}

#[test]
fn test_flat_listing_rendering() {
    let client = mixed_client("master");
    let repo = client.repository();
    let mut tree = repo.tree("master");
    tree.parse().unwrap();

    let listing = tree.flat_listing();
    assert_eq!(listing.len(), tree.len());

    insta::assert_snapshot!(render(&listing), @r###"
    folder src - b1
    symlink latest - -> README.md
    folder docs - e1
    blob README.md 12 a1
    blob build.sh 340 d1
    "###);
}

#[test]
fn test_flat_listing_symlink_entry() {
    let client = mixed_client("master");
    let repo = client.repository();
    let mut tree = repo.tree("master");
    tree.parse().unwrap();

    let link = tree
        .flat_listing()
        .into_iter()
        .find(|entry| entry.name == "latest")
        .unwrap();

    assert_eq!(
        link,
        FlatEntry {
            kind: EntryKind::Symlink,
            name: "latest".to_string(),
            size: None,
            mode: "120000".to_string(),
            hash: String::new(),
            target: Some("README.md".to_string()),
        }
    );
}

#[test]
fn test_flat_listing_of_unparsed_tree_is_empty() {
    let client = FakeClient::new();
    let repo = client.repository();
    assert!(repo.tree("master").flat_listing().is_empty());
}

#[test]
fn test_detail_listing_skips_symlinks() {
    let client = mixed_client(r#"master:"app"/"#);
    for (path, age, subject) in [
        ("app/README.md", "3 days ago\n", "Document setup\n"),
        ("app/src", "2 years, 4 months ago\n", "  Split modules  \n"),
        ("app/build.sh", "1 year, 1 month ago\n", "Add build script\n"),
        ("app/docs", "5 hours ago\n", "Fix typo\n"),
    ] {
        client
            .respond(
                format!(r#"log -1 --date=relative --format="%ad" -- "{}""#, path),
                age,
            )
            .respond(format!(r#"log -1 --format="%s" -- "{}""#, path), subject);
    }
    let repo = client.repository();
    let mut tree = repo.tree(r#"master:"app"/"#);
    tree.parse().unwrap();

    let details = tree.detail_listing().unwrap();

    assert_eq!(details.len(), tree.len() - tree.symlinks().count());
    assert_eq!(
        details,
        vec![
            DetailEntry {
                hash: "a1".to_string(),
                age: "3 days ago".to_string(),
                comment: "Document setup".to_string(),
            },
            DetailEntry {
                hash: "b1".to_string(),
                age: "2 years ago".to_string(),
                comment: "Split modules".to_string(),
            },
            DetailEntry {
                hash: "d1".to_string(),
                age: "1 year ago".to_string(),
                comment: "Add build script".to_string(),
            },
            DetailEntry {
                hash: "e1".to_string(),
                age: "5 hours ago".to_string(),
                comment: "Fix typo".to_string(),
            },
        ]
    );
    assert!(!client
        .calls()
        .iter()
        .any(|command| command.contains("app/latest")));
}

#[test]
fn test_detail_listing_propagates_failures() {
    let client = FakeClient::new();
    client
        .respond("ls-tree -l master", "100644 blob a1 12\tREADME.md\n")
        .fail(r#"log -1 --date=relative --format="%ad" -- "README.md""#);
    let repo = client.repository();
    let mut tree = repo.tree("master");
    tree.parse().unwrap();

    let err = tree.detail_listing().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to read last change date of README.md"
    );
}

#[cfg(feature = "serde")]
#[test]
fn test_flat_entry_serializes() {
    let entry = FlatEntry {
        kind: EntryKind::Folder,
        name: "src".to_string(),
        size: None,
        mode: "040000".to_string(),
        hash: "b1".to_string(),
        target: None,
    };

    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["kind"], "folder");
    assert_eq!(json["size"], serde_json::Value::Null);
}
