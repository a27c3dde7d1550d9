mod ast;
mod compiler;
mod error;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub(crate) use error::InstanceError;
use sapling_planner::core::problem::Problem;
use sapling_planner::core::problem::State;

/// The name under which the initial state of a problem file can be evaluated.
pub(crate) const INITIAL_STATE_NAME: &str = "initial";

/// A compiled problem file.
#[derive(Debug)]
pub(crate) struct Instance {
    pub(crate) problem: Problem,
    pub(crate) initial_state: State,
    /// The named states of the file; all of them are valid states of `problem`.
    pub(crate) states: BTreeMap<String, State>,
}

impl Instance {
    pub(crate) fn state(&self, name: &str) -> Option<&State> {
        if name == INITIAL_STATE_NAME {
            Some(&self.initial_state)
        } else {
            self.states.get(name)
        }
    }
}

/// Reads the JSON problem file at `path` and compiles it.
pub(crate) fn load(path: impl AsRef<Path>) -> Result<Instance, InstanceError> {
    let file = File::open(path)?;
    let ast: ast::InstanceAst = serde_json::from_reader(BufReader::new(file))?;

    compiler::compile(ast)
}
