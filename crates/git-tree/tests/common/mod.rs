#![allow(dead_code)]

use anyhow::{bail, Result};
use git_tree::{Repository, RepositoryClient};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// Listing used across tests: a file, a folder and a submodule
pub const ROOT_LISTING: &str = "100644 blob abc123       12\tREADME.md\n\
040000 tree def456       -\tsrc\n\
160000 commit aaa111       -\tvendor/lib\n";

#[derive(Default)]
struct State {
    responses: HashMap<String, String>,
    failing: HashSet<String>,
    calls: Vec<String>,
}

/// A repository client answering from canned text
#[derive(Clone, Default)]
pub struct FakeClient {
    state: Rc<RefCell<State>>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `command` with `output`
    pub fn respond(&self, command: impl Into<String>, output: impl Into<String>) -> &Self {
        let command = command.into();
        let mut state = self.state.borrow_mut();
        state.failing.remove(&command);
        state.responses.insert(command, output.into());
        self
    }

    /// Make `command` fail
    pub fn fail(&self, command: impl Into<String>) -> &Self {
        self.state.borrow_mut().failing.insert(command.into());
        self
    }

    /// Commands received so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    pub fn repository(&self) -> Repository {
        Repository::new("/srv/git/project", self.clone())
    }
}

impl RepositoryClient for FakeClient {
    fn run(&self, _repository: &Repository, command: &str) -> Result<String> {
        let mut state = self.state.borrow_mut();
        state.calls.push(command.to_string());

        if state.failing.contains(command) {
            bail!("fatal: {} failed", command);
        }

        match state.responses.get(command) {
            Some(output) => Ok(output.clone()),
            None => bail!("unexpected command: {}", command),
        }
    }
}
