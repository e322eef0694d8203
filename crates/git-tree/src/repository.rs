use anyhow::{Context, Result};
use git2::Repository as Git2Repository;
use path_clean::PathClean;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::client::{GitCli, RepositoryClient};
use crate::tree::Tree;

/// A repository on disk paired with the client that queries it
pub struct Repository {
    /// Directory commands run in: the working directory, or the git dir of a bare repository
    path: PathBuf,
    client: Box<dyn RepositoryClient>,
}

impl Repository {
    /// Open the git repository containing `path`, queried through the git command line
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, GitCli::from_env())
    }

    /// Open the git repository containing `path` with a custom client
    pub fn open_with<P, C>(path: P, client: C) -> Result<Self>
    where
        P: AsRef<Path>,
        C: RepositoryClient + 'static,
    {
        let path = path.as_ref();
        let repo = Git2Repository::discover(path)
            .with_context(|| format!("Failed to discover git repository at {}", path.display()))?;

        let root = match repo.workdir() {
            Some(work_dir) => work_dir.to_path_buf(),
            None => repo.path().to_path_buf(),
        };

        Ok(Self::new(root, client))
    }

    /// Pair a path with a client without looking at the filesystem
    pub fn new<P, C>(path: P, client: C) -> Self
    where
        P: Into<PathBuf>,
        C: RepositoryClient + 'static,
    {
        let path: PathBuf = path.into();
        Self {
            path: path.clean(),
            client: Box::new(client),
        }
    }

    /// The directory queries run in
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run one query against this repository
    pub fn run(&self, command: &str) -> Result<String> {
        self.client.run(self, command)
    }

    /// An unparsed tree for `treeish`, e.g. `master` or `master:"src"/`
    pub fn tree(&self, treeish: &str) -> Tree<'_> {
        Tree::new(treeish, self)
    }
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
