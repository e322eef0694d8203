//! Command lines sent to the repository client.
//!
//! Each function returns the git arguments as a single string; the client
//! decides how to execute it.

/// Long-format listing of one tree object
pub fn ls_tree(hash: &str) -> String {
    format!("ls-tree -l {}", hash)
}

/// Raw contents of an object, used to read symlink targets
pub fn show(hash: &str) -> String {
    format!("show {}", hash)
}

/// Relative date of the last commit touching `path`
pub fn last_change_age(path: &str) -> String {
    format!(
        "log -1 --date=relative --format=\"%ad\" -- \"{}\"",
        escape_quoted(path)
    )
}

/// Subject line of the last commit touching `path`
pub fn last_change_subject(path: &str) -> String {
    format!("log -1 --format=\"%s\" -- \"{}\"", escape_quoted(path))
}

// Inside double quotes only backslash and the quote itself need escaping
// when the command is split with `shell_words`.
fn escape_quoted(path: &str) -> String {
    path.replace('\\', "\\\\").replace('"', "\\\"")
}
