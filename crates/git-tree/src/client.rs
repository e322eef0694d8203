use anyhow::{anyhow, Context, Result};
use log::{debug, error};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::repository::Repository;

/// Environment variable overriding the git binary used by [`GitCli::from_env`]
pub const GIT_BINARY_ENV: &str = "GIT_TREE_GIT";

/// Executes version-control queries against a repository.
///
/// The command is the argument text that follows `git`, e.g. `ls-tree -l master`.
/// Implementations return standard output verbatim; an empty string is a valid answer.
pub trait RepositoryClient {
    fn run(&self, repository: &Repository, command: &str) -> Result<String>;
}

/// Runs queries through the `git` command line tool
#[derive(Debug, Clone)]
pub struct GitCli {
    binary: PathBuf,
    envs: Vec<(OsString, OsString)>,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("git"),
            envs: Vec::new(),
        }
    }
}

impl GitCli {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `$GIT_TREE_GIT` as the git binary when it is set
    pub fn from_env() -> Self {
        match std::env::var_os(GIT_BINARY_ENV) {
            Some(binary) if !binary.is_empty() => Self::new().binary(binary),
            _ => Self::new(),
        }
    }

    pub fn binary<P: Into<PathBuf>>(mut self, binary: P) -> Self {
        self.binary = binary.into();
        self
    }

    /// Add an environment variable for every spawned git process
    pub fn env<K: Into<OsString>, V: Into<OsString>>(mut self, key: K, value: V) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn binary_path(&self) -> &Path {
        &self.binary
    }

    /// Build the git process for `command`.
    ///
    /// The command text is split into words with shell quoting rules, but no
    /// shell ever sees it, so names in the repository are passed through literally.
    fn command(&self, root: &Path, command: &str) -> Result<Command> {
        let words = shell_words::split(command)
            .with_context(|| format!("Failed to split git command: {}", command))?;

        let mut git = Command::new(&self.binary);
        git.current_dir(root)
            .envs(self.envs.iter().cloned())
            .args(words);
        Ok(git)
    }
}

impl RepositoryClient for GitCli {
    fn run(&self, repository: &Repository, command: &str) -> Result<String> {
        debug!("git {} (in {})", command, repository.path().display());

        let output = self
            .command(repository.path(), command)?
            .output()
            .with_context(|| format!("Failed to spawn {}", self.binary.display()))?;

        handle_output(command, output)
    }
}

fn handle_output(command: &str, output: Output) -> Result<String> {
    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        error!("{}", stderr.trim());
    }

    Err(anyhow!(
        "git {} exited with {}: {}",
        command,
        output.status,
        stderr.trim()
    ))
}
